// Grid slot assignment.
//
// Sponsors are mapped onto an enumerated list of positions in rank order.
// Positions left over are reported as available unless already sold;
// sponsors left over are dropped, since upstream position allocation
// should never produce them.

use std::collections::HashMap;

use tracing::{debug, warn};

use crate::sponsor::{GridSection, Position, SponsorRecord};

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// One grid position and whoever fills it.
#[derive(Debug, Clone, PartialEq)]
pub struct GridSlot {
    pub position: Position,
    pub sponsor: Option<SponsorRecord>,
}

impl GridSlot {
    /// Empty and not already sold.
    pub fn is_available(&self) -> bool {
        self.sponsor.is_none() && !self.position.is_taken
    }
}

/// Outcome of assigning sponsors to a grid.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct GridAssignment {
    /// Every position, in grid order.
    pub slots: Vec<GridSlot>,
    /// Sponsors that did not fit.
    pub dropped: Vec<SponsorRecord>,
}

impl GridAssignment {
    pub fn filled(&self) -> impl Iterator<Item = (&Position, &SponsorRecord)> {
        self.slots
            .iter()
            .filter_map(|slot| slot.sponsor.as_ref().map(|s| (&slot.position, s)))
    }

    pub fn available(&self) -> impl Iterator<Item = &Position> {
        self.slots
            .iter()
            .filter(|slot| slot.is_available())
            .map(|slot| &slot.position)
    }

    pub fn sponsor_for(&self, position_id: &str) -> Option<&SponsorRecord> {
        self.slots
            .iter()
            .find(|slot| slot.position.position_id == position_id)
            .and_then(|slot| slot.sponsor.as_ref())
    }

    /// positionId -> sponsor for every filled slot.
    pub fn as_map(&self) -> HashMap<&str, &SponsorRecord> {
        self.filled()
            .map(|(p, s)| (p.position_id.as_str(), s))
            .collect()
    }
}

// ---------------------------------------------------------------------------
// Section expansion
// ---------------------------------------------------------------------------

/// Enumerate tiered sections into positions. Ids run "1".."N" across all
/// sections in section order; each position carries its section label and
/// price.
pub fn positions_from_sections(sections: &[GridSection]) -> Vec<Position> {
    sections
        .iter()
        .flat_map(|section| std::iter::repeat(section).take(section.slot_count))
        .enumerate()
        .map(|(i, section)| Position {
            position_id: (i + 1).to_string(),
            price: section.price,
            is_taken: false,
            section: Some(section.label.clone()),
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Assignment
// ---------------------------------------------------------------------------

/// Assign the i-th ranked sponsor to the i-th open position.
///
/// Positions marked `is_taken` are already sold: only the sponsor whose
/// `position_id` names one may sit there, and an unclaimed taken position
/// stays empty without being reported as available. With no taken
/// positions this is a plain rank-order mapping.
pub fn assign(ranked: &[SponsorRecord], positions: &[Position]) -> GridAssignment {
    seat(ranked, positions, |slot| slot.position.is_taken)
}

/// Assign sponsors to the positions they purchased.
///
/// A sponsor whose `position_id` names an unoccupied position takes it,
/// taken or not. Everyone else (no id, unknown id, or a position already
/// claimed) fills the remaining open positions in order, exactly like
/// [`assign`]. Taken positions nobody claims stay empty. With no claims
/// and no taken positions this is identical to [`assign`].
pub fn assign_claimed(sponsors: &[SponsorRecord], positions: &[Position]) -> GridAssignment {
    seat(sponsors, positions, |_| true)
}

/// Seat claimants on the slots `honors_claim` accepts, then fill the open
/// slots in order with everyone else.
fn seat(
    sponsors: &[SponsorRecord],
    positions: &[Position],
    honors_claim: impl Fn(&GridSlot) -> bool,
) -> GridAssignment {
    let index: HashMap<&str, usize> = positions
        .iter()
        .enumerate()
        .map(|(i, p)| (p.position_id.as_str(), i))
        .collect();

    let mut slots: Vec<GridSlot> = positions
        .iter()
        .map(|p| GridSlot {
            position: p.clone(),
            sponsor: None,
        })
        .collect();

    let mut unclaimed = Vec::new();
    for sponsor in sponsors {
        let claim = sponsor
            .position_id
            .as_deref()
            .map(str::trim)
            .and_then(|id| index.get(id).copied())
            .filter(|&i| slots[i].sponsor.is_none() && honors_claim(&slots[i]));
        match claim {
            Some(i) => slots[i].sponsor = Some(sponsor.clone()),
            None => unclaimed.push(sponsor),
        }
    }

    let mut rest = unclaimed.into_iter();
    for slot in slots.iter_mut().filter(|slot| slot.is_available()) {
        match rest.next() {
            Some(sponsor) => slot.sponsor = Some(sponsor.clone()),
            None => break,
        }
    }
    let dropped: Vec<SponsorRecord> = rest.cloned().collect();

    log_result(&slots, &dropped);
    GridAssignment { slots, dropped }
}

fn log_result(slots: &[GridSlot], dropped: &[SponsorRecord]) {
    let filled = slots.iter().filter(|s| s.sponsor.is_some()).count();
    debug!(
        "grid assignment: {} of {} positions filled",
        filled,
        slots.len()
    );
    if !dropped.is_empty() {
        warn!(
            "{} sponsor(s) exceed the {} grid positions and were not placed",
            dropped.len(),
            slots.len()
        );
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
