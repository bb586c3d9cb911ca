use tokio::sync::mpsc;
use tracing::debug;

use super::{PlayerCommand, PlayerControls};

/// Host that hasn't wired any command. Every request is silently dropped.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopControls;

impl PlayerControls for NoopControls {}

/// Forwards commands to the host over an unbounded channel.
#[derive(Debug, Clone)]
pub struct ChannelControls {
    sender: mpsc::UnboundedSender<PlayerCommand>,
}

impl ChannelControls {
    pub fn new(sender: mpsc::UnboundedSender<PlayerCommand>) -> Self {
        Self { sender }
    }

    /// Controls plus the receiving end the host drains.
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<PlayerCommand>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self::new(tx), rx)
    }
}

impl PlayerControls for ChannelControls {
    fn send(&mut self, command: PlayerCommand) {
        // A gone receiver means the host stopped listening - not our problem
        if self.sender.send(command).is_err() {
            debug!("Host command channel closed, dropping {:?}", command);
        }
    }
}

/// Keeps every command in order. Handy for tests and dry runs.
#[derive(Debug, Clone, Default)]
pub struct RecordingControls {
    commands: Vec<PlayerCommand>,
}

impl RecordingControls {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> &[PlayerCommand] {
        &self.commands
    }

    pub fn take(&mut self) -> Vec<PlayerCommand> {
        std::mem::take(&mut self.commands)
    }
}

impl PlayerControls for RecordingControls {
    fn send(&mut self, command: PlayerCommand) {
        self.commands.push(command);
    }
}
