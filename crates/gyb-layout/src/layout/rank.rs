// Sponsor ordering policies.
//
// All sorts are stable: sponsors with equal keys keep their input order.

use std::cmp::Ordering;

use crate::sponsor::{CampaignType, LayoutStyle, SponsorDisplayType, SponsorRecord};

use super::size::SizeCalculator;

// ---------------------------------------------------------------------------
// Rank keys
// ---------------------------------------------------------------------------

/// Which key a layout orders its sponsors by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RankKey {
    /// Keep input order.
    Input,
    AmountDesc,
    PositionAsc,
    PositionDesc,
    TierDesc,
    /// Largest box first; word-cloud processing order.
    FootprintDesc,
}

impl RankKey {
    pub fn for_layout(style: LayoutStyle, campaign: CampaignType) -> Self {
        match (style, campaign) {
            (LayoutStyle::Grid, _) => RankKey::Input,
            (LayoutStyle::SizeOrdered, CampaignType::Fixed) => RankKey::PositionAsc,
            (LayoutStyle::SizeOrdered, CampaignType::Positional) => RankKey::PositionDesc,
            (LayoutStyle::SizeOrdered, _) => RankKey::TierDesc,
            (LayoutStyle::WordCloud, _) => RankKey::FootprintDesc,
            (LayoutStyle::AmountOrdered | LayoutStyle::Unknown, _) => RankKey::AmountDesc,
        }
    }
}

// ---------------------------------------------------------------------------
// Ranking
// ---------------------------------------------------------------------------

/// Order sponsors for the given layout style and campaign type.
///
/// `sizes` and `display` are only consulted for word-cloud layouts, whose
/// processing order depends on rendered footprint.
pub fn rank(
    sponsors: Vec<SponsorRecord>,
    campaign: CampaignType,
    style: LayoutStyle,
    sizes: &SizeCalculator,
    display: SponsorDisplayType,
) -> Vec<SponsorRecord> {
    match RankKey::for_layout(style, campaign) {
        RankKey::Input => sponsors,
        RankKey::AmountDesc => by_amount_desc(sponsors),
        RankKey::PositionAsc => by_position(sponsors, false),
        RankKey::PositionDesc => by_position(sponsors, true),
        RankKey::TierDesc => by_tier_desc(sponsors, sizes),
        RankKey::FootprintDesc => by_footprint_desc(sponsors, sizes, display),
    }
}

pub fn by_amount_desc(mut sponsors: Vec<SponsorRecord>) -> Vec<SponsorRecord> {
    sponsors.sort_by(|a, b| desc(a.amount(), b.amount()));
    sponsors
}

/// Order by numeric position id. Sponsors without a parsable id go last in
/// either direction.
pub fn by_position(mut sponsors: Vec<SponsorRecord>, descending: bool) -> Vec<SponsorRecord> {
    sponsors.sort_by(|a, b| match (a.position_number(), b.position_number()) {
        (Some(x), Some(y)) if descending => desc(x, y),
        (Some(x), Some(y)) => x.partial_cmp(&y).unwrap_or(Ordering::Equal),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });
    sponsors
}

pub fn by_tier_desc(
    mut sponsors: Vec<SponsorRecord>,
    sizes: &SizeCalculator,
) -> Vec<SponsorRecord> {
    sponsors.sort_by_key(|s| std::cmp::Reverse(sizes.display_tier(s).rank()));
    sponsors
}

pub fn by_footprint_desc(
    sponsors: Vec<SponsorRecord>,
    sizes: &SizeCalculator,
    display: SponsorDisplayType,
) -> Vec<SponsorRecord> {
    let mut keyed: Vec<(f64, SponsorRecord)> = sponsors
        .into_iter()
        .map(|s| (sizes.size_of(&s, display).area(), s))
        .collect();
    keyed.sort_by(|a, b| desc(a.0, b.0));
    keyed.into_iter().map(|(_, s)| s).collect()
}

fn desc(a: f64, b: f64) -> Ordering {
    b.partial_cmp(&a).unwrap_or(Ordering::Equal)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
