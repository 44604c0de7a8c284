// Sponsor records and campaign layout configuration.
//
// These types mirror the JSON the campaign backend hands out. The engine
// never persists them; every render call receives a fresh copy.

use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// Fallback constants for missing numeric fields
// ---------------------------------------------------------------------------

pub const DEFAULT_FONT_SIZE: f64 = 16.0;
pub const DEFAULT_LOGO_WIDTH: f64 = 100.0;
pub const DEFAULT_AMOUNT: f64 = 0.0;

// ---------------------------------------------------------------------------
// Sponsor enums
// ---------------------------------------------------------------------------

/// How a sponsor wants to be shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SponsorType {
    #[default]
    Text,
    Logo,
}

/// Moderation state of an uploaded logo.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApprovalStatus {
    Pending,
    Approved,
    Rejected,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    Pending,
    #[default]
    Paid,
    Failed,
}

/// Visual size bucket derived from the contribution amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplaySize {
    Small,
    Medium,
    Large,
    Xlarge,
}

impl DisplaySize {
    /// Ordering rank used by size-ordered layouts (small=1 .. xlarge=4).
    pub fn rank(&self) -> u8 {
        match self {
            DisplaySize::Small => 1,
            DisplaySize::Medium => 2,
            DisplaySize::Large => 3,
            DisplaySize::Xlarge => 4,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            DisplaySize::Small => "small",
            DisplaySize::Medium => "medium",
            DisplaySize::Large => "large",
            DisplaySize::Xlarge => "xlarge",
        }
    }
}

impl fmt::Display for DisplaySize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

// ---------------------------------------------------------------------------
// SponsorRecord
// ---------------------------------------------------------------------------

/// A single sponsor as stored by the campaign backend.
///
/// Numeric fields are optional because older records and offline payments
/// frequently omit them; use the accessor methods, which apply the
/// documented fallbacks, instead of reading the raw fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SponsorRecord {
    pub id: String,
    pub name: String,
    /// Shown under the logo only when both logo and name are displayed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position_id: Option<String>,
    #[serde(default)]
    pub sponsor_type: SponsorType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo_approval_status: Option<ApprovalStatus>,
    #[serde(default)]
    pub payment_status: PaymentStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub calculated_font_size: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub calculated_logo_width: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_size: Option<DisplaySize>,
}

impl SponsorRecord {
    /// Minimal text sponsor; the remaining fields take their defaults.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        SponsorRecord {
            id: id.into(),
            name: name.into(),
            display_name: None,
            message: None,
            amount: None,
            position_id: None,
            sponsor_type: SponsorType::Text,
            logo_url: None,
            logo_approval_status: None,
            payment_status: PaymentStatus::Paid,
            calculated_font_size: None,
            calculated_logo_width: None,
            display_size: None,
        }
    }

    /// Contribution amount, 0 when missing, negative or not finite.
    pub fn amount(&self) -> f64 {
        positive_or(self.amount, DEFAULT_AMOUNT)
    }

    pub fn font_size(&self) -> f64 {
        positive_or(self.calculated_font_size, DEFAULT_FONT_SIZE)
    }

    pub fn logo_width(&self) -> f64 {
        positive_or(self.calculated_logo_width, DEFAULT_LOGO_WIDTH)
    }

    pub fn is_logo(&self) -> bool {
        self.sponsor_type == SponsorType::Logo
    }

    pub fn is_logo_approved(&self) -> bool {
        self.logo_approval_status == Some(ApprovalStatus::Approved)
    }

    /// Non-empty display name, if any.
    pub fn display_name(&self) -> Option<&str> {
        self.display_name
            .as_deref()
            .map(str::trim)
            .filter(|n| !n.is_empty())
    }

    pub fn has_logo_url(&self) -> bool {
        self.logo_url.as_deref().is_some_and(|u| !u.trim().is_empty())
    }

    /// Numeric value of `position_id`, if it parses.
    pub fn position_number(&self) -> Option<f64> {
        self.position_id
            .as_deref()
            .and_then(|p| p.trim().parse::<f64>().ok())
            .filter(|n| n.is_finite())
    }
}

fn positive_or(value: Option<f64>, fallback: f64) -> f64 {
    match value {
        Some(v) if v.is_finite() && v > 0.0 => v,
        _ => fallback,
    }
}

// ---------------------------------------------------------------------------
// Layout configuration
// ---------------------------------------------------------------------------

/// Spatial arrangement chosen by the campaign organizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LayoutStyle {
    Grid,
    SizeOrdered,
    AmountOrdered,
    WordCloud,
    /// Any style string this engine does not know. Rendered like
    /// `AmountOrdered`.
    #[serde(other)]
    Unknown,
}

/// Pricing strategy of the campaign.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CampaignType {
    Fixed,
    Positional,
    PayWhatYouWant,
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SponsorDisplayType {
    TextOnly,
    LogoOnly,
    Both,
}

impl SponsorDisplayType {
    pub fn shows_logos(&self) -> bool {
        !matches!(self, SponsorDisplayType::TextOnly)
    }
}

/// One purchasable slot in a grid campaign.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Position {
    pub position_id: String,
    #[serde(default)]
    pub price: f64,
    #[serde(default)]
    pub is_taken: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub section: Option<String>,
}

impl Position {
    pub fn new(position_id: impl Into<String>, price: f64) -> Self {
        Position {
            position_id: position_id.into(),
            price,
            is_taken: false,
            section: None,
        }
    }
}

/// A labeled pricing tier of a section-based grid (top/middle/bottom).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GridSection {
    pub label: String,
    pub price: f64,
    pub slot_count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutConfig {
    pub layout_style: LayoutStyle,
    pub campaign_type: CampaignType,
    pub sponsor_display_type: SponsorDisplayType,
    /// Ordered grid positions. Empty for free-form layouts.
    #[serde(default)]
    pub positions: Vec<Position>,
    /// Tiered sections; expanded into positions when `positions` is empty.
    #[serde(default)]
    pub sections: Vec<GridSection>,
}

impl LayoutConfig {
    pub fn new(
        layout_style: LayoutStyle,
        campaign_type: CampaignType,
        sponsor_display_type: SponsorDisplayType,
    ) -> Self {
        LayoutConfig {
            layout_style,
            campaign_type,
            sponsor_display_type,
            positions: Vec::new(),
            sections: Vec::new(),
        }
    }

    /// The grid positions in assignment order: explicit positions win,
    /// otherwise the sections are enumerated.
    pub fn grid_positions(&self) -> Vec<Position> {
        if !self.positions.is_empty() {
            self.positions.clone()
        } else {
            crate::layout::grid::positions_from_sections(&self.sections)
        }
    }

    pub fn has_grid(&self) -> bool {
        !self.positions.is_empty() || self.sections.iter().any(|s| s.slot_count > 0)
    }
}

/// Available drawing area. Width is always known; height is a recommended
/// minimum the caller may grow.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Container {
    pub width: f64,
    pub height: f64,
}

impl Container {
    pub fn new(width: f64, height: f64) -> Self {
        Container { width, height }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
