// SongSkipper - the piece a host actually registers
// Reads a fresh settings snapshot per notification, asks the engine, relays commands

use tracing::{debug, warn};

use crate::audio::Track;
use crate::error::Result;
use crate::filter::{Action, DecisionEngine, FilterConfiguration, RuleCategory};
use crate::host::{
    filter_configuration, setting_items, NoopControls, PlayerControls, PlayerListener, SettingItem, SettingsStore,
};

pub struct SongSkipper<S, C = NoopControls> {
    settings: S,
    controls: C,
    engine: DecisionEngine,
}

impl<S: SettingsStore> SongSkipper<S, NoopControls> {
    /// Skipper whose host hasn't wired any commands yet.
    pub fn new(settings: S) -> Self {
        Self::with_controls(settings, NoopControls)
    }
}

impl<S: SettingsStore, C: PlayerControls> SongSkipper<S, C> {
    pub fn with_controls(settings: S, controls: C) -> Self {
        Self {
            settings,
            controls,
            engine: DecisionEngine::new(),
        }
    }

    /// Swap in a new settings store. Compiled rules carry over; they're keyed
    /// by rule text and mode, not by store.
    pub fn set_settings(&mut self, settings: S) {
        self.settings = settings;
    }

    pub fn settings(&self) -> &S {
        &self.settings
    }

    pub fn controls(&self) -> &C {
        &self.controls
    }

    pub fn controls_mut(&mut self) -> &mut C {
        &mut self.controls
    }

    pub fn engine(&self) -> &DecisionEngine {
        &self.engine
    }

    pub fn configuration(&self) -> FilterConfiguration {
        filter_configuration(&self.settings)
    }

    /// Compile the current rules without acting on anything.
    pub fn validate(&self) -> Result<()> {
        self.configuration().validate().inspect_err(|err| {
            warn!("Rejecting filter settings: {}", err);
        })
    }

    /// Which rule category would flag `track` under the current settings.
    pub fn check(&mut self, track: &Track) -> Result<Option<RuleCategory>> {
        let config = self.configuration();
        self.engine.evaluate_track(&config, track)
    }

    pub fn setting_items(&self) -> Vec<SettingItem> {
        setting_items(&self.settings)
    }

    fn dispatch(&mut self, action: Action) {
        match action {
            Action::SkipToNext => self.controls.next(),
            Action::RemoveAt(position) => self.controls.remove_playlist_item(position),
        }
    }
}

impl<S: SettingsStore, C: PlayerControls> PlayerListener for SongSkipper<S, C> {
    fn on_playback_state_changed(&mut self, is_playing: bool, position: f64, track: &Track) -> Result<()> {
        debug!(
            "Playback changed: '{}' by {} (playing: {}, at {:.1}s)",
            track.title,
            track.display_artist(),
            is_playing,
            position
        );
        let config = self.configuration();
        if let Some(action) = self.engine.on_playback_changed(&config, track)? {
            self.dispatch(action);
        }
        Ok(())
    }

    fn on_playlist_changed(&mut self, playlist: &[Track]) -> Result<()> {
        debug!("Playlist changed: {} tracks", playlist.len());
        let config = self.configuration();
        for action in self.engine.on_playlist_changed(&config, playlist)? {
            self.dispatch(action);
        }
        Ok(())
    }

    fn on_playback_mode_changed(&mut self, is_shuffle: bool, repeat_state: i32) -> Result<()> {
        debug!("Ignoring playback mode change (shuffle: {}, repeat: {})", is_shuffle, repeat_state);
        Ok(())
    }

    fn on_position_changed(&mut self, _position: f64) -> Result<()> {
        Ok(())
    }

    fn on_volume_changed(&mut self, volume: f64) -> Result<()> {
        debug!("Ignoring volume change to {:.2}", volume);
        Ok(())
    }

    fn on_extension_selected(&mut self) -> Result<()> {
        debug!("Song skipper selected");
        Ok(())
    }
}
