//! Card behavior: who a card may target and what using it does.
//!
//! - `targeting`: incremental and final target legality
//! - `resolver`: category behavior of a use (`on_use`, `resolve_use`)
//!
//! What a particular card does to each target is not here: that lives in
//! the card's `CardScript`, reached through `GameLogic::take_card_effect`.

mod resolver;
mod targeting;

pub use resolver::{on_use, resolve_use};
pub use targeting::{target_feasible, target_filter, targets_acceptable};
