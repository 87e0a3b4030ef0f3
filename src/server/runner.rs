//! Running tables on a tokio runtime.
//!
//! Each table's logic is synchronous and runs on its own blocking task, so
//! tables proceed independently and a slow decision at one table never
//! stalls another.

use log::info;
use tokio::task::JoinHandle;

use super::room::RoomHandle;
use crate::error::EngineResult;
use crate::rules::{GameLogic, GameResult};

/// A table running in the background.
#[derive(Debug)]
pub struct TableTask {
    handle: RoomHandle,
    task: JoinHandle<EngineResult<GameResult>>,
}

impl TableTask {
    /// Abandon the table. The game unwinds at its next check and the task
    /// finishes with `GameResult::Abandoned`.
    pub fn abandon(&self) {
        info!("abandoning table");
        self.handle.abandon();
    }

    #[must_use]
    pub fn room_handle(&self) -> RoomHandle {
        self.handle.clone()
    }

    /// Wait for the game to end.
    pub async fn join(self) -> EngineResult<GameResult> {
        match self.task.await {
            Ok(result) => result,
            Err(join_error) if join_error.is_panic() => std::panic::resume_unwind(join_error.into_panic()),
            Err(_) => Ok(GameResult::Abandoned),
        }
    }
}

/// Start `logic` on the current runtime's blocking pool.
///
/// Must be called from within a tokio runtime.
pub fn spawn_table(mut logic: GameLogic) -> TableTask {
    let handle = logic.room_handle();
    let task = tokio::task::spawn_blocking(move || logic.run());
    TableTask { handle, task }
}
