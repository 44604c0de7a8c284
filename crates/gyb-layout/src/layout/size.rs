// Sponsor footprint calculation.
//
// The same box sizes drive both word-cloud placement and on-screen drawing;
// if the two disagree, placed sponsors visibly overlap. Text measurement is
// delegated to a `TextMeasurer` so a canvas-backed renderer can substitute
// real font metrics.

use crate::config::{SizingConfig, TierConfig};
use crate::sponsor::{DisplaySize, SponsorDisplayType, SponsorRecord};

use super::variant::{resolve_variant, Variant};

// ---------------------------------------------------------------------------
// Text measurement adapter
// ---------------------------------------------------------------------------

pub trait TextMeasurer: Send + Sync {
    /// Size (width, height) of `text` rendered at `font_size` pixels.
    fn measure(&self, text: &str, font_size: f64) -> (f64, f64);
}

/// Glyph-count estimate:
/// `width = max(font * chars * char_width, font * min_chars)`,
/// `height = font * line_height`.
#[derive(Debug, Clone, Copy)]
pub struct HeuristicMeasurer {
    pub char_width: f64,
    pub min_chars: f64,
    pub line_height: f64,
}

impl HeuristicMeasurer {
    pub fn from_sizing(sizing: &SizingConfig) -> Self {
        HeuristicMeasurer {
            char_width: sizing.char_width,
            min_chars: sizing.min_text_chars,
            line_height: sizing.text_line_height,
        }
    }
}

impl TextMeasurer for HeuristicMeasurer {
    fn measure(&self, text: &str, font_size: f64) -> (f64, f64) {
        let chars = text.chars().count() as f64;
        let width = (font_size * chars * self.char_width).max(font_size * self.min_chars);
        (width, font_size * self.line_height)
    }
}

// ---------------------------------------------------------------------------
// Box size
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoxSize {
    pub width: f64,
    pub height: f64,
}

impl BoxSize {
    pub const ZERO: BoxSize = BoxSize {
        width: 0.0,
        height: 0.0,
    };

    pub fn area(&self) -> f64 {
        self.width * self.height
    }

    pub fn max_side(&self) -> f64 {
        self.width.max(self.height)
    }
}

// ---------------------------------------------------------------------------
// SizeCalculator
// ---------------------------------------------------------------------------

pub struct SizeCalculator {
    sizing: SizingConfig,
    tiers: TierConfig,
    measurer: Box<dyn TextMeasurer>,
}

impl SizeCalculator {
    pub fn new(sizing: SizingConfig, tiers: TierConfig) -> Self {
        let measurer = Box::new(HeuristicMeasurer::from_sizing(&sizing));
        SizeCalculator {
            sizing,
            tiers,
            measurer,
        }
    }

    pub fn with_measurer(
        sizing: SizingConfig,
        tiers: TierConfig,
        measurer: Box<dyn TextMeasurer>,
    ) -> Self {
        SizeCalculator {
            sizing,
            tiers,
            measurer,
        }
    }

    /// Bounding box for a sponsor under the given display mode.
    pub fn size_of(&self, sponsor: &SponsorRecord, display: SponsorDisplayType) -> BoxSize {
        self.size_for_variant(sponsor, resolve_variant(sponsor, display))
    }

    /// Bounding box for an already-resolved variant.
    pub fn size_for_variant(&self, sponsor: &SponsorRecord, variant: Variant) -> BoxSize {
        let s = &self.sizing;
        match variant {
            Variant::LogoWithName => {
                let logo = sponsor.logo_width();
                BoxSize {
                    width: (logo + s.logo_padding).max(s.logo_min_width),
                    height: logo * s.logo_aspect + self.caption_height() + s.caption_gap,
                }
            }
            Variant::LogoOnly => {
                let logo = sponsor.logo_width();
                BoxSize {
                    width: logo + s.logo_padding,
                    height: logo * s.logo_aspect + s.logo_padding,
                }
            }
            Variant::TextOnly => {
                let (width, height) = self.measurer.measure(&sponsor.name, sponsor.font_size());
                BoxSize { width, height }
            }
            Variant::Hidden => BoxSize::ZERO,
        }
    }

    /// Two caption lines under a logo card.
    pub fn caption_height(&self) -> f64 {
        2.0 * self.sizing.caption_font_size * self.sizing.caption_line_height
    }

    /// Bucket a contribution amount into a display tier.
    pub fn tier_for(&self, amount: f64) -> DisplaySize {
        if amount >= self.tiers.xlarge {
            DisplaySize::Xlarge
        } else if amount >= self.tiers.large {
            DisplaySize::Large
        } else if amount >= self.tiers.medium {
            DisplaySize::Medium
        } else {
            DisplaySize::Small
        }
    }

    /// Precomputed tier if the backend supplied one, otherwise derived
    /// from the amount.
    pub fn display_tier(&self, sponsor: &SponsorRecord) -> DisplaySize {
        sponsor
            .display_size
            .unwrap_or_else(|| self.tier_for(sponsor.amount()))
    }
}

impl Default for SizeCalculator {
    fn default() -> Self {
        SizeCalculator::new(SizingConfig::default(), TierConfig::default())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sponsor::{ApprovalStatus, SponsorType};

    fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    fn logo_sponsor(width: Option<f64>, display_name: Option<&str>) -> SponsorRecord {
        let mut s = SponsorRecord::new("l", "Logo Co");
        s.sponsor_type = SponsorType::Logo;
        s.logo_url = Some("https://cdn.example/l.png".into());
        s.logo_approval_status = Some(ApprovalStatus::Approved);
        s.calculated_logo_width = width;
        s.display_name = display_name.map(String::from);
        s
    }

    #[test]
    fn logo_with_name_box() {
        let calc = SizeCalculator::default();
        let s = logo_sponsor(Some(120.0), Some("Logo"));
        let size = calc.size_of(&s, SponsorDisplayType::Both);
        assert!(approx_eq(size.width, 136.0));
        // 120 * 0.8 + 2 * 12 * 1.25 + 12
        assert!(approx_eq(size.height, 96.0 + 30.0 + 12.0));
    }

    #[test]
    fn logo_with_name_has_minimum_width() {
        let calc = SizeCalculator::default();
        let s = logo_sponsor(Some(20.0), Some("Tiny"));
        let size = calc.size_of(&s, SponsorDisplayType::Both);
        assert!(approx_eq(size.width, 60.0));
    }

    #[test]
    fn logo_only_box_uses_default_width() {
        let calc = SizeCalculator::default();
        let s = logo_sponsor(None, None);
        let size = calc.size_of(&s, SponsorDisplayType::LogoOnly);
        assert!(approx_eq(size.width, 116.0));
        assert!(approx_eq(size.height, 96.0));
    }

    #[test]
    fn text_box_scales_with_name_length() {
        let calc = SizeCalculator::default();
        let mut s = SponsorRecord::new("t", "Hardware Store");
        s.calculated_font_size = Some(20.0);
        let size = calc.size_of(&s, SponsorDisplayType::TextOnly);
        assert!(approx_eq(size.width, 20.0 * 14.0 * 0.6));
        assert!(approx_eq(size.height, 30.0));
    }

    #[test]
    fn short_names_get_minimum_text_width() {
        let calc = SizeCalculator::default();
        let s = SponsorRecord::new("t", "Al");
        let size = calc.size_of(&s, SponsorDisplayType::TextOnly);
        assert!(approx_eq(size.width, 48.0));
        assert!(approx_eq(size.height, 24.0));
    }

    #[test]
    fn text_width_counts_characters_not_bytes() {
        let calc = SizeCalculator::default();
        let s = SponsorRecord::new("t", "Café Müller");
        let size = calc.size_of(&s, SponsorDisplayType::TextOnly);
        assert!(approx_eq(size.width, 16.0 * 11.0 * 0.6));
    }

    #[test]
    fn hidden_sponsor_has_no_footprint() {
        let calc = SizeCalculator::default();
        let mut s = logo_sponsor(Some(100.0), None);
        s.logo_approval_status = Some(ApprovalStatus::Pending);
        assert_eq!(calc.size_of(&s, SponsorDisplayType::LogoOnly), BoxSize::ZERO);
    }

    struct FixedMeasurer;

    impl TextMeasurer for FixedMeasurer {
        fn measure(&self, _text: &str, _font_size: f64) -> (f64, f64) {
            (42.0, 7.0)
        }
    }

    #[test]
    fn custom_measurer_is_used_for_text() {
        let calc = SizeCalculator::with_measurer(
            SizingConfig::default(),
            TierConfig::default(),
            Box::new(FixedMeasurer),
        );
        let size = calc.size_of(&SponsorRecord::new("t", "Anything"), SponsorDisplayType::Both);
        assert_eq!(size, BoxSize { width: 42.0, height: 7.0 });
    }

    #[test]
    fn tiers_bucket_amounts() {
        let calc = SizeCalculator::default();
        assert_eq!(calc.tier_for(0.0), DisplaySize::Small);
        assert_eq!(calc.tier_for(49.99), DisplaySize::Small);
        assert_eq!(calc.tier_for(50.0), DisplaySize::Medium);
        assert_eq!(calc.tier_for(100.0), DisplaySize::Large);
        assert_eq!(calc.tier_for(1000.0), DisplaySize::Xlarge);
    }

    #[test]
    fn precomputed_tier_wins_over_amount() {
        let calc = SizeCalculator::default();
        let mut s = SponsorRecord::new("t", "T");
        s.amount = Some(5.0);
        s.display_size = Some(DisplaySize::Large);
        assert_eq!(calc.display_tier(&s), DisplaySize::Large);
        s.display_size = None;
        assert_eq!(calc.display_tier(&s), DisplaySize::Small);
    }
}
