// Sponsor eligibility filtering.

use crate::config::FilterOptions;
use crate::sponsor::{PaymentStatus, SponsorDisplayType, SponsorRecord};

use super::variant::resolve_variant;

/// Drop sponsors whose logo has not cleared moderation when the display
/// mode requires logos. Text-only mode keeps everyone. Order is preserved.
pub fn filter(sponsors: &[SponsorRecord], display: SponsorDisplayType) -> Vec<SponsorRecord> {
    sponsors
        .iter()
        .filter(|s| resolve_variant(s, display).is_visible())
        .cloned()
        .collect()
}

/// Whether a sponsor's payment state allows it on the public page.
pub fn payment_eligible(sponsor: &SponsorRecord, options: &FilterOptions) -> bool {
    match sponsor.payment_status {
        PaymentStatus::Paid => true,
        PaymentStatus::Pending => options.show_pending,
        PaymentStatus::Failed => false,
    }
}

/// [`filter`] plus the payment rule: paid sponsors always, pending ones
/// only when `show_pending` is set, failed ones never.
pub fn filter_with(
    sponsors: &[SponsorRecord],
    display: SponsorDisplayType,
    options: &FilterOptions,
) -> Vec<SponsorRecord> {
    sponsors
        .iter()
        .filter(|s| payment_eligible(s, options))
        .filter(|s| resolve_variant(s, display).is_visible())
        .cloned()
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
