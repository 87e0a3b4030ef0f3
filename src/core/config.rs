//! Table configuration.
//!
//! A `RoomConfig` is fixed when a table forms. It carries the timing and
//! rule constants the engine needs; everything is overridable through
//! builder methods and the whole struct round-trips through serde so a
//! host can load it from its own config files.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Default time a player has to answer a decision request.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

/// Configuration for one table.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoomConfig {
    /// How long a decision request waits for a reply before passing.
    pub request_timeout: Duration,

    /// Cards dealt to every player before the first turn.
    pub initial_hand_size: usize,

    /// Cards drawn in the default draw phase.
    pub draw_per_phase: usize,

    /// Starting (and maximum) hp.
    pub max_hp: i32,

    /// Seed for the table RNG.
    pub seed: u64,

    /// Stop after this many full rounds. `None` plays until one player is left.
    pub max_rounds: Option<u32>,

    /// How many generals each player is offered. Zero skips selection.
    pub general_candidates: usize,

    /// Names to deal general offers from.
    pub general_pool: Vec<String>,
}

impl Default for RoomConfig {
    fn default() -> Self {
        Self {
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            initial_hand_size: 4,
            draw_per_phase: 2,
            max_hp: 4,
            seed: 0,
            max_rounds: None,
            general_candidates: 0,
            general_pool: Vec::new(),
        }
    }
}

impl RoomConfig {
    /// Create a configuration with default rules.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the decision request timeout.
    #[must_use]
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Set the opening hand size.
    #[must_use]
    pub fn with_initial_hand_size(mut self, size: usize) -> Self {
        self.initial_hand_size = size;
        self
    }

    /// Set the number of cards drawn per draw phase.
    #[must_use]
    pub fn with_draw_per_phase(mut self, count: usize) -> Self {
        self.draw_per_phase = count;
        self
    }

    /// Set starting hp.
    #[must_use]
    pub fn with_max_hp(mut self, hp: i32) -> Self {
        self.max_hp = hp;
        self
    }

    /// Set the RNG seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Cap the game length in rounds.
    #[must_use]
    pub fn with_max_rounds(mut self, rounds: u32) -> Self {
        self.max_rounds = Some(rounds);
        self
    }

    /// Enable general selection with `candidates` offers per player.
    #[must_use]
    pub fn with_generals(mut self, candidates: usize, pool: Vec<String>) -> Self {
        self.general_candidates = candidates;
        self.general_pool = pool;
        self
    }
}
