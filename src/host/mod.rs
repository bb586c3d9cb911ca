// Host bridge - the seams between the filter and whatever player embeds it
// Notifications come in through PlayerListener, commands go out through PlayerControls

pub mod controls; // command sinks: unwired, channel-backed, recording
pub mod settings; // settings store + settings screen descriptors

pub use controls::{ChannelControls, NoopControls, RecordingControls};
pub use settings::{filter_configuration, setting_items, MemoryStore, SettingItem, SettingValue, SettingsStore};

use serde::{Deserialize, Serialize};

use crate::audio::Track;
use crate::error::Result;

/// Playback lifecycle notifications delivered by the host, one call per event.
///
/// Methods take `&mut self`, so a host can't deliver a new notification while
/// one is still being handled. Hosts with concurrent delivery put the listener
/// behind a mutex.
pub trait PlayerListener {
    fn on_playback_state_changed(&mut self, is_playing: bool, position: f64, track: &Track) -> Result<()>;

    fn on_playlist_changed(&mut self, playlist: &[Track]) -> Result<()>;

    fn on_playback_mode_changed(&mut self, _is_shuffle: bool, _repeat_state: i32) -> Result<()> {
        Ok(())
    }

    fn on_position_changed(&mut self, _position: f64) -> Result<()> {
        Ok(())
    }

    fn on_volume_changed(&mut self, _volume: f64) -> Result<()> {
        Ok(())
    }

    fn on_extension_selected(&mut self) -> Result<()> {
        Ok(())
    }
}

/// Everything a listener may ask the host to do.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum PlayerCommand {
    Play,
    Pause,
    Next,
    Previous,
    Seek { position: f64 },
    MovePlaylistItem { from: usize, to: usize },
    RemovePlaylistItem { position: usize },
    SetShuffleMode { enabled: bool },
    SetRepeatMode { mode: i32 },
    SetVolume { volume: f64 },
}

/// Command surface the host wires up. Fire-and-forget: nothing waits for the
/// host to carry a command out.
///
/// Every method funnels into `send`, whose default drops the command. A host
/// that hasn't wired a capability just leaves it at the default.
pub trait PlayerControls {
    fn send(&mut self, _command: PlayerCommand) {}

    fn play(&mut self) {
        self.send(PlayerCommand::Play);
    }

    fn pause(&mut self) {
        self.send(PlayerCommand::Pause);
    }

    fn next(&mut self) {
        self.send(PlayerCommand::Next);
    }

    fn previous(&mut self) {
        self.send(PlayerCommand::Previous);
    }

    fn seek(&mut self, position: f64) {
        self.send(PlayerCommand::Seek { position });
    }

    fn move_playlist_item(&mut self, from: usize, to: usize) {
        self.send(PlayerCommand::MovePlaylistItem { from, to });
    }

    fn remove_playlist_item(&mut self, position: usize) {
        self.send(PlayerCommand::RemovePlaylistItem { position });
    }

    fn set_shuffle_mode(&mut self, enabled: bool) {
        self.send(PlayerCommand::SetShuffleMode { enabled });
    }

    fn set_repeat_mode(&mut self, mode: i32) {
        self.send(PlayerCommand::SetRepeatMode { mode });
    }

    fn set_volume(&mut self, volume: f64) {
        self.send(PlayerCommand::SetVolume { volume });
    }
}
