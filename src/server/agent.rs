//! Remote decision makers.
//!
//! An `Agent` is the table's view of whoever sits behind a seat. The table
//! runs synchronously on its own blocking thread, so requests block until a
//! reply arrives or the timeout elapses.

use std::time::Duration;

use log::{debug, info};
use tokio::runtime::Handle;
use tokio::sync::mpsc;

use crate::protocol::{Command, Envelope, Reply, ReplyEnvelope};

/// One remote participant.
pub trait Agent: Send {
    /// Fire-and-forget notification.
    fn notify(&mut self, command: &Command);

    /// Ask for a decision. `None` on timeout or disconnect.
    fn request(&mut self, command: &Command, timeout: Duration) -> Option<Reply>;

    fn is_connected(&self) -> bool;
}

/// Remote end of a `ChannelAgent`, held by the transport or a test.
#[derive(Debug)]
pub struct RemoteEnd {
    /// Commands sent by the table.
    pub commands: mpsc::UnboundedReceiver<Envelope>,
    /// Replies to the table's requests.
    pub replies: mpsc::UnboundedSender<ReplyEnvelope>,
}

/// An agent backed by tokio channels.
///
/// Must not be driven from inside an async context: `request` blocks on the
/// runtime handle it was created with.
#[derive(Debug)]
pub struct ChannelAgent {
    outgoing: mpsc::UnboundedSender<Envelope>,
    incoming: mpsc::UnboundedReceiver<ReplyEnvelope>,
    runtime: Handle,
    next_request: u64,
    connected: bool,
}

impl ChannelAgent {
    /// Create a connected agent and its remote end.
    #[must_use]
    pub fn pair(runtime: Handle) -> (Self, RemoteEnd) {
        let (outgoing, commands) = mpsc::unbounded_channel();
        let (replies, incoming) = mpsc::unbounded_channel();
        let agent = Self {
            outgoing,
            incoming,
            runtime,
            next_request: 0,
            connected: true,
        };
        (agent, RemoteEnd { commands, replies })
    }

    fn send(&mut self, envelope: Envelope) -> bool {
        if self.outgoing.send(envelope).is_err() {
            info!("agent channel closed; marking disconnected");
            self.connected = false;
        }
        self.connected
    }
}

impl Agent for ChannelAgent {
    fn notify(&mut self, command: &Command) {
        if !self.connected {
            return;
        }
        self.send(Envelope {
            request: None,
            command: command.clone(),
        });
    }

    fn request(&mut self, command: &Command, timeout: Duration) -> Option<Reply> {
        if !self.connected {
            return None;
        }

        self.next_request += 1;
        let id = self.next_request;
        let envelope = Envelope {
            request: Some(id),
            command: command.clone(),
        };
        if !self.send(envelope) {
            return None;
        }

        let deadline = tokio::time::Instant::now() + timeout;
        let incoming = &mut self.incoming;
        loop {
            let received = self
                .runtime
                .block_on(async { tokio::time::timeout_at(deadline, incoming.recv()).await });
            match received {
                Ok(Some(reply)) if reply.request == id => return Some(reply.reply),
                Ok(Some(stale)) => {
                    debug!("dropping stale reply to request {} (waiting for {})", stale.request, id);
                }
                Ok(None) => {
                    info!("agent disconnected while waiting for {}", command.name());
                    self.connected = false;
                    return None;
                }
                Err(_) => {
                    info!("request {} ({}) timed out after {:?}", id, command.name(), timeout);
                    return None;
                }
            }
        }
    }

    fn is_connected(&self) -> bool {
        self.connected && !self.outgoing.is_closed()
    }
}
