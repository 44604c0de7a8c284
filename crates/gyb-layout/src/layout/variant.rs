// Visual variant resolution.
//
// Sponsor type, display mode and display-name presence combine into one of
// four variants. Resolve once per sponsor and pass the result along so the
// filter, the size calculator and the renderer always agree.

use serde::Serialize;

use crate::sponsor::{SponsorDisplayType, SponsorRecord};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Variant {
    /// Logo card with the display name captioned underneath.
    LogoWithName,
    LogoOnly,
    TextOnly,
    /// Not shown at all (logo awaiting or failing moderation).
    Hidden,
}

impl Variant {
    pub fn is_visible(&self) -> bool {
        !matches!(self, Variant::Hidden)
    }

    pub fn shows_logo(&self) -> bool {
        matches!(self, Variant::LogoWithName | Variant::LogoOnly)
    }
}

pub fn resolve_variant(sponsor: &SponsorRecord, display: SponsorDisplayType) -> Variant {
    if !display.shows_logos() || !sponsor.is_logo() {
        return Variant::TextOnly;
    }
    if !sponsor.is_logo_approved() {
        return Variant::Hidden;
    }
    // Approved but nothing to draw: fall back to the name.
    if !sponsor.has_logo_url() {
        return Variant::TextOnly;
    }
    match (display, sponsor.display_name()) {
        (SponsorDisplayType::Both, Some(_)) => Variant::LogoWithName,
        _ => Variant::LogoOnly,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sponsor::ApprovalStatus;
    use crate::sponsor::SponsorType;

    fn logo(status: Option<ApprovalStatus>, display_name: Option<&str>) -> SponsorRecord {
        let mut s = SponsorRecord::new("l", "Logo Co");
        s.sponsor_type = SponsorType::Logo;
        s.logo_url = Some("https://cdn.example/logo.png".into());
        s.logo_approval_status = status;
        s.display_name = display_name.map(String::from);
        s
    }

    #[test]
    fn text_only_mode_ignores_approval() {
        for status in [None, Some(ApprovalStatus::Pending), Some(ApprovalStatus::Rejected)] {
            let s = logo(status, None);
            assert_eq!(
                resolve_variant(&s, SponsorDisplayType::TextOnly),
                Variant::TextOnly
            );
        }
    }

    #[test]
    fn unapproved_logos_are_hidden_in_logo_modes() {
        for display in [SponsorDisplayType::LogoOnly, SponsorDisplayType::Both] {
            for status in [None, Some(ApprovalStatus::Pending), Some(ApprovalStatus::Rejected)] {
                let s = logo(status, Some("Logo"));
                assert_eq!(resolve_variant(&s, display), Variant::Hidden);
            }
        }
    }

    #[test]
    fn both_mode_with_display_name_captions_the_logo() {
        let s = logo(Some(ApprovalStatus::Approved), Some("Logo"));
        assert_eq!(
            resolve_variant(&s, SponsorDisplayType::Both),
            Variant::LogoWithName
        );
        assert_eq!(
            resolve_variant(&s, SponsorDisplayType::LogoOnly),
            Variant::LogoOnly
        );
    }

    #[test]
    fn both_mode_without_display_name_is_logo_only() {
        let s = logo(Some(ApprovalStatus::Approved), None);
        assert_eq!(resolve_variant(&s, SponsorDisplayType::Both), Variant::LogoOnly);
    }

    #[test]
    fn approved_logo_without_url_falls_back_to_text() {
        let mut s = logo(Some(ApprovalStatus::Approved), None);
        s.logo_url = None;
        assert_eq!(
            resolve_variant(&s, SponsorDisplayType::LogoOnly),
            Variant::TextOnly
        );
    }

    #[test]
    fn text_sponsors_stay_text_in_every_mode() {
        let s = SponsorRecord::new("t", "Plain Text");
        for display in [
            SponsorDisplayType::TextOnly,
            SponsorDisplayType::LogoOnly,
            SponsorDisplayType::Both,
        ] {
            assert_eq!(resolve_variant(&s, display), Variant::TextOnly);
        }
    }
}
