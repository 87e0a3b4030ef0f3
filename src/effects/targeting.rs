//! Target legality for card uses.

use crate::cards::{Card, CardSubtype};
use crate::core::PlayerId;

/// Whether `targets` is a complete, acceptable target list for `card`.
///
/// Fixed-target cards accept any list (an empty one is filled in at use).
/// Everything else needs at least one target.
#[must_use]
pub fn target_feasible(card: &Card, targets: &[PlayerId], _actor: PlayerId) -> bool {
    card.is_target_fixed() || !targets.is_empty()
}

/// Whether `candidate` may be added to `selected` while picking targets.
///
/// By default a card takes one target other than its user. Single-target
/// tricks leave the choice to their script and accept any candidate.
#[must_use]
pub fn target_filter(card: &Card, selected: &[PlayerId], candidate: PlayerId, actor: PlayerId) -> bool {
    match card.subtype() {
        CardSubtype::SingleTarget => true,
        _ => selected.is_empty() && candidate != actor,
    }
}

/// Check a whole target list by feeding it through `target_filter` one
/// candidate at a time, then `target_feasible`.
#[must_use]
pub fn targets_acceptable(card: &Card, targets: &[PlayerId], actor: PlayerId) -> bool {
    let legal_picks = (0..targets.len()).all(|i| target_filter(card, &targets[..i], targets[i], actor));
    legal_picks && target_feasible(card, targets, actor)
}
