// Replay host - stands in for a real player so rules can be tried against a scripted session
// Commands from the skipper are applied to an in-memory queue, then the resulting
// notifications are fed back the way a player would send them

use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;
use tracing::{debug, info};

use crate::audio::{PlayQueue, Track};
use crate::error::Result;
use crate::host::{ChannelControls, PlayerCommand, PlayerListener, SettingsStore};
use crate::skipper::SongSkipper;

/// Starting queue plus what the "user" does, in order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SessionScript {
    pub queue: Vec<Track>,
    #[serde(default)]
    pub events: Vec<ScriptEvent>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum ScriptEvent {
    /// Host announces the current queue
    PlaylistChanged,
    /// User starts the track at `index`
    Play { index: usize },
    /// User presses next
    Next,
    Position { position: f64 },
    Volume { volume: f64 },
    PlaybackMode { shuffle: bool, repeat: i32 },
    ExtensionSelected,
}

#[derive(Debug, Clone, Serialize)]
pub struct SessionReport {
    /// Commands the skipper sent, in the order the host applied them
    pub commands: Vec<PlayerCommand>,
    pub queue: Vec<Track>,
    pub now_playing: Option<Track>,
    pub now_playing_position: Option<usize>,
}

pub struct ReplayHost<S> {
    skipper: SongSkipper<S, ChannelControls>,
    commands: mpsc::UnboundedReceiver<PlayerCommand>,
    queue: PlayQueue,
    playing: bool,
    applied: Vec<PlayerCommand>,
}

impl<S: SettingsStore> ReplayHost<S> {
    pub fn new(settings: S, queue: Vec<Track>) -> Self {
        let (controls, commands) = ChannelControls::channel();
        Self {
            skipper: SongSkipper::with_controls(settings, controls),
            commands,
            queue: PlayQueue::new(queue),
            playing: false,
            applied: Vec::new(),
        }
    }

    pub fn queue(&self) -> &PlayQueue {
        &self.queue
    }

    pub fn skipper(&self) -> &SongSkipper<S, ChannelControls> {
        &self.skipper
    }

    /// Play the whole script and report what happened.
    pub fn run(mut self, events: &[ScriptEvent]) -> Result<SessionReport> {
        for event in events {
            self.deliver(event)?;
        }

        Ok(SessionReport {
            commands: self.applied,
            now_playing: self.queue.current_track().cloned(),
            now_playing_position: self.queue.current_index(),
            queue: self.queue.tracks().to_vec(),
        })
    }

    /// Hand one event to the skipper, then settle every command it triggers.
    pub fn deliver(&mut self, event: &ScriptEvent) -> Result<()> {
        debug!("Delivering {:?}", event);
        match *event {
            ScriptEvent::PlaylistChanged => self.skipper.on_playlist_changed(self.queue.tracks())?,
            ScriptEvent::Play { index } => {
                if self.queue.play(index) {
                    self.playing = true;
                    self.notify_playback()?;
                }
            }
            ScriptEvent::Next => {
                self.queue.advance();
                self.notify_playback()?;
            }
            ScriptEvent::Position { position } => self.skipper.on_position_changed(position)?,
            ScriptEvent::Volume { volume } => self.skipper.on_volume_changed(volume)?,
            ScriptEvent::PlaybackMode { shuffle, repeat } => self.skipper.on_playback_mode_changed(shuffle, repeat)?,
            ScriptEvent::ExtensionSelected => self.skipper.on_extension_selected()?,
        }

        self.settle()
    }

    // Apply queued commands in batches, re-notifying after each batch, until the
    // skipper goes quiet. Each round either shrinks the queue or moves playback forward.
    fn settle(&mut self) -> Result<()> {
        loop {
            let mut batch = Vec::new();
            while let Ok(command) = self.commands.try_recv() {
                batch.push(command);
            }
            if batch.is_empty() {
                return Ok(());
            }

            let before = (self.queue.current_index(), self.queue.current_track().cloned());
            let mut playlist_changed = false;

            for command in batch {
                playlist_changed |= self.apply(command);
                self.applied.push(command);
            }

            if playlist_changed {
                self.skipper.on_playlist_changed(self.queue.tracks())?;
            }
            let after = (self.queue.current_index(), self.queue.current_track().cloned());
            if after != before {
                self.notify_playback()?;
            }
        }
    }

    /// Returns true if the queue contents changed.
    fn apply(&mut self, command: PlayerCommand) -> bool {
        match command {
            PlayerCommand::Next => {
                self.queue.advance();
                false
            }
            PlayerCommand::RemovePlaylistItem { position } => self.queue.remove(position).is_some(),
            PlayerCommand::MovePlaylistItem { from, to } => self.queue.move_track(from, to),
            PlayerCommand::Play => {
                self.playing = true;
                false
            }
            PlayerCommand::Pause => {
                self.playing = false;
                false
            }
            other => {
                debug!("Replay host ignores {:?}", other);
                false
            }
        }
    }

    fn notify_playback(&mut self) -> Result<()> {
        match self.queue.current_track().cloned() {
            Some(track) => {
                info!("Now playing '{}' by {}", track.title, track.display_artist());
                self.skipper.on_playback_state_changed(self.playing, 0.0, &track)
            }
            None => {
                self.playing = false;
                Ok(())
            }
        }
    }
}
