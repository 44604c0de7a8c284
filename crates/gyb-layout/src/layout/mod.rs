// Sponsor layout pipeline: filter -> rank -> size -> place.

pub mod engine;
pub mod filter;
pub mod grid;
pub mod rank;
pub mod size;
pub mod spiral;
pub mod variant;

use serde::Serialize;

use crate::sponsor::{PaymentStatus, Position, SponsorRecord};
use variant::Variant;

// ---------------------------------------------------------------------------
// Geometry
// ---------------------------------------------------------------------------

/// Axis-aligned box in container pixels, origin at the top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Rect {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// True when the two boxes come closer than `padding` on both axes.
    /// Symmetric in its two operands.
    pub fn overlaps(&self, other: &Rect, padding: f64) -> bool {
        self.x < other.right() + padding
            && other.x < self.right() + padding
            && self.y < other.bottom() + padding
            && other.y < self.bottom() + padding
    }
}

// ---------------------------------------------------------------------------
// Output types
// ---------------------------------------------------------------------------

/// Where a sponsor ended up.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Placement {
    /// A discrete grid cell.
    Slot {
        #[serde(rename = "positionId")]
        position_id: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        section: Option<String>,
    },
    /// Free-form word-cloud coordinates.
    Point {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        /// No clear spot was found; this box may overlap its neighbours.
        fallback: bool,
    },
    /// 1-based position in a wrap/flow list laid out by the caller.
    Flow { rank: usize },
}

impl Placement {
    pub fn rect(&self) -> Option<Rect> {
        match *self {
            Placement::Point {
                x,
                y,
                width,
                height,
                ..
            } => Some(Rect::new(x, y, width, height)),
            _ => None,
        }
    }

    /// Whether this is a word-cloud box placed at the fallback spot.
    pub fn is_fallback(&self) -> bool {
        matches!(self, Placement::Point { fallback: true, .. })
    }

    pub fn position_id(&self) -> Option<&str> {
        match self {
            Placement::Slot { position_id, .. } => Some(position_id),
            _ => None,
        }
    }
}

/// A sponsor together with its resolved look and location.
/// Recomputed on every render; never persisted.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlacedSponsor {
    #[serde(flatten)]
    pub sponsor: SponsorRecord,
    pub variant: Variant,
    pub placement: Placement,
    /// Payment still pending; drawn at reduced opacity.
    pub dimmed: bool,
}

impl PlacedSponsor {
    pub fn new(sponsor: SponsorRecord, variant: Variant, placement: Placement) -> Self {
        let dimmed = sponsor.payment_status == PaymentStatus::Pending;
        PlacedSponsor {
            sponsor,
            variant,
            placement,
            dimmed,
        }
    }

    /// Text drawn for this sponsor: the display name under a logo card,
    /// otherwise the sponsor name.
    pub fn label(&self) -> &str {
        match self.variant {
            Variant::LogoWithName => self.sponsor.display_name().unwrap_or(&self.sponsor.name),
            _ => &self.sponsor.name,
        }
    }
}

/// Placement strategy the orchestrator picked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Strategy {
    Grid,
    Flow,
    WordCloud,
}

/// Result of one render call.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Layout {
    pub strategy: Strategy,
    pub placed: Vec<PlacedSponsor>,
    /// Grid positions left unfilled, in grid order. Empty for non-grid
    /// strategies.
    pub available_positions: Vec<Position>,
}

impl Layout {
    pub fn empty(strategy: Strategy) -> Self {
        Layout {
            strategy,
            placed: Vec::new(),
            available_positions: Vec::new(),
        }
    }

    /// No sponsors to draw; callers show their empty-state message.
    pub fn is_empty(&self) -> bool {
        self.placed.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
