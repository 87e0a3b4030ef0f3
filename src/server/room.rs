//! A table's set of connected agents.
//!
//! The room routes notifications and requests to agents and owns the
//! abandonment flag. Abandonment is observed cooperatively: every dispatch
//! and every request checks it and unwinds with `EngineError::GameFinished`.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use log::info;
use rustc_hash::FxHashMap;

use super::agent::Agent;
use crate::core::PlayerId;
use crate::error::{EngineError, EngineResult};
use crate::protocol::{Command, Reply};

/// Cloneable handle that can abandon a running table from any thread.
#[derive(Clone, Debug, Default)]
pub struct RoomHandle {
    abandoned: Arc<AtomicBool>,
}

impl RoomHandle {
    /// Abandon the table. Pending resolution unwinds at its next check.
    pub fn abandon(&self) {
        self.abandoned.store(true, Ordering::SeqCst);
    }

    #[must_use]
    pub fn is_abandoned(&self) -> bool {
        self.abandoned.load(Ordering::SeqCst)
    }
}

/// Agents seated at one table.
#[derive(Default)]
pub struct Room {
    agents: FxHashMap<PlayerId, Box<dyn Agent>>,
    /// Attachment order, for stable broadcast order.
    order: Vec<PlayerId>,
    handle: RoomHandle,
}

impl Room {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach the agent behind `player`, replacing any previous one.
    pub fn attach(&mut self, player: PlayerId, agent: Box<dyn Agent>) {
        if self.agents.insert(player, agent).is_none() {
            self.order.push(player);
        }
    }

    /// Detach and return the agent behind `player`.
    pub fn detach(&mut self, player: PlayerId) -> Option<Box<dyn Agent>> {
        self.order.retain(|&p| p != player);
        self.agents.remove(&player)
    }

    #[must_use]
    pub fn has_agent(&self, player: PlayerId) -> bool {
        self.agents.contains_key(&player)
    }

    /// Players with an attached agent, in attachment order.
    #[must_use]
    pub fn agent_players(&self) -> Vec<PlayerId> {
        self.order.clone()
    }

    #[must_use]
    pub fn handle(&self) -> RoomHandle {
        self.handle.clone()
    }

    /// Abandoned explicitly, or every attached agent has disconnected.
    #[must_use]
    pub fn is_abandoned(&self) -> bool {
        if self.handle.is_abandoned() {
            return true;
        }
        !self.agents.is_empty() && self.agents.values().all(|a| !a.is_connected())
    }

    /// Fail with `GameFinished` once the table is abandoned.
    pub fn ensure_active(&self) -> EngineResult<()> {
        if self.is_abandoned() {
            return Err(EngineError::GameFinished);
        }
        Ok(())
    }

    /// Notify every agent.
    pub fn broadcast(&mut self, command: &Command) {
        self.broadcast_except(command, None);
    }

    /// Notify every agent except the one behind `except`.
    pub fn broadcast_except(&mut self, command: &Command, except: Option<PlayerId>) {
        for player in &self.order {
            if Some(*player) == except {
                continue;
            }
            if let Some(agent) = self.agents.get_mut(player) {
                agent.notify(command);
            }
        }
    }

    /// Notify the agent behind `player`, if any.
    pub fn notify(&mut self, player: PlayerId, command: &Command) {
        if let Some(agent) = self.agents.get_mut(&player) {
            agent.notify(command);
        }
    }

    /// Ask `player` for a decision.
    ///
    /// Players without a connected agent answer nothing. The table's state
    /// is checked before and after waiting, so an abandonment during the
    /// wait surfaces as `GameFinished` rather than as a reply.
    pub fn request(
        &mut self,
        player: PlayerId,
        command: &Command,
        timeout: Duration,
    ) -> EngineResult<Option<Reply>> {
        self.ensure_active()?;
        let reply = match self.agents.get_mut(&player) {
            Some(agent) if agent.is_connected() => agent.request(command, timeout),
            _ => None,
        };
        if self.is_abandoned() {
            info!("table abandoned while {} was deciding", player);
            return Err(EngineError::GameFinished);
        }
        Ok(reply)
    }
}

impl std::fmt::Debug for Room {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Room")
            .field("agents", &self.order)
            .field("abandoned", &self.handle.is_abandoned())
            .finish()
    }
}
