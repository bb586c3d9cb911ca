use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::audio::Track;
use crate::error::{Result, SkipperError};

use super::cache::{CacheStats, PatternCache};
use super::compiler::{compile, MatchMode};
use super::matcher::{matches_artists, matches_title};
use super::RuleCategory;

/// What to do with matching tracks. Also picks which notification does the work:
/// removal runs on playlist changes, skipping on playback changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SkipTarget {
    RemoveFromPlaylist,
    SkipToNext,
}

impl SkipTarget {
    /// Parse the stored setting value (`Remove` / `Skip`). Anything else means no target.
    pub fn from_setting(value: &str) -> Option<Self> {
        match value {
            "Remove" => Some(SkipTarget::RemoveFromPlaylist),
            "Skip" => Some(SkipTarget::SkipToNext),
            _ => None,
        }
    }

    pub fn as_setting(&self) -> &'static str {
        match self {
            SkipTarget::RemoveFromPlaylist => "Remove",
            SkipTarget::SkipToNext => "Skip",
        }
    }
}

/// Snapshot of the filter settings, taken fresh for every notification.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterConfiguration {
    pub regex_enabled: bool,
    pub skip_target: Option<SkipTarget>,
    pub skipped_artists: Option<String>,
    pub skipped_songs: Option<String>,
}

impl FilterConfiguration {
    pub fn match_mode(&self) -> MatchMode {
        MatchMode::from_regex_enabled(self.regex_enabled)
    }

    /// Compile every configured rule without caching, so a host can reject a bad
    /// change before it takes effect.
    pub fn validate(&self) -> Result<()> {
        let mode = self.match_mode();
        for (category, raw) in [
            (RuleCategory::Artist, &self.skipped_artists),
            (RuleCategory::Song, &self.skipped_songs),
        ] {
            if let Some(raw) = raw {
                compile(raw, mode).map_err(SkipperError::invalid_rule(category))?;
            }
        }
        Ok(())
    }
}

/// Corrective command for the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Action {
    SkipToNext,
    RemoveAt(usize),
}

/// The policy layer. Holds nothing between notifications except the compiled-rule caches.
#[derive(Debug)]
pub struct DecisionEngine {
    artists: PatternCache,
    songs: PatternCache,
}

impl DecisionEngine {
    pub fn new() -> Self {
        Self {
            artists: PatternCache::new(RuleCategory::Artist),
            songs: PatternCache::new(RuleCategory::Song),
        }
    }

    /// Which rule category (if any) flags this track. Artist rules win over song rules,
    /// and song rules aren't even compiled once an artist rule has matched.
    /// With no artist rule stored at all, nothing is flagged.
    pub fn evaluate_track(&mut self, config: &FilterConfiguration, track: &Track) -> Result<Option<RuleCategory>> {
        let mode = config.match_mode();

        let artists = self
            .artists
            .resolve(config.skipped_artists.as_deref(), mode)
            .map_err(SkipperError::invalid_rule(RuleCategory::Artist))?;
        let Some(artists) = artists else {
            debug!("No artist rule stored, leaving '{}' alone", track.title);
            return Ok(None);
        };
        if matches_artists(track, Some(&*artists)) {
            return Ok(Some(RuleCategory::Artist));
        }

        let songs = self
            .songs
            .resolve(config.skipped_songs.as_deref(), mode)
            .map_err(SkipperError::invalid_rule(RuleCategory::Song))?;
        if matches_title(track, songs.as_deref()) {
            return Ok(Some(RuleCategory::Song));
        }

        Ok(None)
    }

    /// A new track started (or playback state changed). Only acts in skip mode.
    pub fn on_playback_changed(&mut self, config: &FilterConfiguration, track: &Track) -> Result<Option<Action>> {
        if config.skip_target != Some(SkipTarget::SkipToNext) {
            return Ok(None);
        }

        match self.evaluate_track(config, track)? {
            Some(category) => {
                info!(
                    "Skipping '{}' by {} ({} rule matched)",
                    track.title,
                    track.display_artist(),
                    category
                );
                Ok(Some(Action::SkipToNext))
            }
            None => Ok(None),
        }
    }

    /// The queue changed. Only acts in remove mode, and only on artist rules.
    ///
    /// Removals come back highest position first. Every position refers to the snapshot
    /// we were given and stays correct whether the host applies each removal straight
    /// away (shifting what follows) or batches them.
    pub fn on_playlist_changed(&mut self, config: &FilterConfiguration, playlist: &[Track]) -> Result<Vec<Action>> {
        if config.skip_target != Some(SkipTarget::RemoveFromPlaylist) {
            return Ok(Vec::new());
        }

        let positions = self.matching_positions(config, playlist)?;
        for &position in &positions {
            let track = &playlist[position];
            info!(
                "Removing '{}' by {} at position {}",
                track.title,
                track.display_artist(),
                position
            );
        }

        Ok(positions.into_iter().rev().map(Action::RemoveAt).collect())
    }

    /// Positions (ascending) of playlist tracks flagged by the artist rules.
    pub fn matching_positions(&mut self, config: &FilterConfiguration, playlist: &[Track]) -> Result<Vec<usize>> {
        let artists = self
            .artists
            .resolve(config.skipped_artists.as_deref(), config.match_mode())
            .map_err(SkipperError::invalid_rule(RuleCategory::Artist))?;

        let Some(artists) = artists.filter(|set| !set.is_empty()) else {
            debug!("No artist rules configured, leaving playlist of {} alone", playlist.len());
            return Ok(Vec::new());
        };

        Ok(playlist
            .iter()
            .enumerate()
            .filter(|(_, track)| matches_artists(track, Some(&*artists)))
            .map(|(position, _)| position)
            .collect())
    }

    pub fn cache_stats(&self, category: RuleCategory) -> CacheStats {
        match category {
            RuleCategory::Artist => self.artists.stats(),
            RuleCategory::Song => self.songs.stats(),
        }
    }
}

impl Default for DecisionEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(target: SkipTarget, artists: &str) -> FilterConfiguration {
        FilterConfiguration {
            regex_enabled: false,
            skip_target: Some(target),
            skipped_artists: Some(artists.to_string()),
            skipped_songs: None,
        }
    }

    fn playlist() -> Vec<Track> {
        vec![
            Track::new("Rich Flex", ["Drake", "21 Savage"]),
            Track::new("Kill Bill", ["SZA"]),
            Track::new("Jimmy Cooks", ["Drake", "21 Savage"]),
        ]
    }

    #[test]
    fn test_skip_target_setting_values() {
        assert_eq!(SkipTarget::from_setting("Remove"), Some(SkipTarget::RemoveFromPlaylist));
        assert_eq!(SkipTarget::from_setting("Skip"), Some(SkipTarget::SkipToNext));
        assert_eq!(SkipTarget::from_setting("skip"), None);
        assert_eq!(SkipTarget::SkipToNext.as_setting(), "Skip");
    }

    #[test]
    fn test_artist_match_skips_without_touching_song_rules() {
        let mut engine = DecisionEngine::new();
        let mut cfg = config(SkipTarget::SkipToNext, "Drake");
        cfg.skipped_songs = Some("Flex".to_string());

        let action = engine.on_playback_changed(&cfg, &playlist()[0]).unwrap();
        assert_eq!(action, Some(Action::SkipToNext));
        assert_eq!(engine.cache_stats(RuleCategory::Song).lookups, 0);
    }

    #[test]
    fn test_song_rule_skips_when_artists_clean() {
        let mut engine = DecisionEngine::new();
        let mut cfg = config(SkipTarget::SkipToNext, "Drake");
        cfg.skipped_songs = Some("kill bill".to_string());

        let action = engine.on_playback_changed(&cfg, &playlist()[1]).unwrap();
        assert_eq!(action, Some(Action::SkipToNext));
        assert_eq!(engine.evaluate_track(&cfg, &playlist()[1]).unwrap(), Some(RuleCategory::Song));
    }

    #[test]
    fn test_song_rule_needs_artist_rule() {
        let mut engine = DecisionEngine::new();
        let mut cfg = FilterConfiguration {
            skip_target: Some(SkipTarget::SkipToNext),
            skipped_songs: Some("Kill".to_string()),
            ..Default::default()
        };
        assert_eq!(engine.on_playback_changed(&cfg, &playlist()[1]).unwrap(), None);
        assert_eq!(engine.evaluate_track(&cfg, &playlist()[1]).unwrap(), None);
        assert_eq!(engine.cache_stats(RuleCategory::Song).compilations, 0);

        // A stored but blank artist rule still lets song rules run
        cfg.skipped_artists = Some(String::new());
        assert_eq!(engine.on_playback_changed(&cfg, &playlist()[1]).unwrap(), Some(Action::SkipToNext));
    }

    #[test]
    fn test_playback_ignored_in_remove_mode() {
        let mut engine = DecisionEngine::new();
        let cfg = config(SkipTarget::RemoveFromPlaylist, "Drake");
        assert_eq!(engine.on_playback_changed(&cfg, &playlist()[0]).unwrap(), None);
        assert_eq!(engine.cache_stats(RuleCategory::Artist).lookups, 0);
    }

    #[test]
    fn test_no_target_does_nothing() {
        let mut engine = DecisionEngine::new();
        let cfg = FilterConfiguration {
            skipped_artists: Some("Drake".to_string()),
            ..Default::default()
        };
        assert_eq!(engine.on_playback_changed(&cfg, &playlist()[0]).unwrap(), None);
        assert!(engine.on_playlist_changed(&cfg, &playlist()).unwrap().is_empty());
    }

    #[test]
    fn test_blank_rules_never_act() {
        let mut engine = DecisionEngine::new();
        for raw in ["", "   "] {
            let skip = config(SkipTarget::SkipToNext, raw);
            assert_eq!(engine.on_playback_changed(&skip, &playlist()[0]).unwrap(), None);

            let remove = config(SkipTarget::RemoveFromPlaylist, raw);
            assert!(engine.on_playlist_changed(&remove, &playlist()).unwrap().is_empty());
        }
    }

    #[test]
    fn test_removals_come_highest_first() {
        let mut engine = DecisionEngine::new();
        let cfg = config(SkipTarget::RemoveFromPlaylist, "drake");

        let actions = engine.on_playlist_changed(&cfg, &playlist()).unwrap();
        assert_eq!(actions, vec![Action::RemoveAt(2), Action::RemoveAt(0)]);

        // Applying them one at a time against a shifting list removes exactly the flagged tracks
        let mut remaining = playlist();
        for action in actions {
            if let Action::RemoveAt(position) = action {
                remaining.remove(position);
            }
        }
        assert_eq!(remaining, vec![Track::new("Kill Bill", ["SZA"])]);
    }

    #[test]
    fn test_duplicate_tracks_resolved_by_position() {
        let mut engine = DecisionEngine::new();
        let cfg = config(SkipTarget::RemoveFromPlaylist, "Drake");
        let dup = Track::new("Rich Flex", ["Drake"]);
        let list = vec![dup.clone(), Track::new("Snooze", ["SZA"]), dup];

        assert_eq!(
            engine.on_playlist_changed(&cfg, &list).unwrap(),
            vec![Action::RemoveAt(2), Action::RemoveAt(0)]
        );
    }

    #[test]
    fn test_song_rules_ignored_for_removal() {
        let mut engine = DecisionEngine::new();
        let mut cfg = config(SkipTarget::RemoveFromPlaylist, "Nobody");
        cfg.skipped_songs = Some("Kill Bill".to_string());
        assert!(engine.on_playlist_changed(&cfg, &playlist()).unwrap().is_empty());
    }

    #[test]
    fn test_malformed_regex_is_an_error() {
        let mut engine = DecisionEngine::new();
        let mut cfg = config(SkipTarget::SkipToNext, "[");
        cfg.regex_enabled = true;

        let err = engine.on_playback_changed(&cfg, &playlist()[0]).unwrap_err();
        assert_eq!(err.pattern(), "[");
        assert!(matches!(err, SkipperError::InvalidRule { category: RuleCategory::Artist, .. }));
    }

    #[test]
    fn test_validate_reports_song_rule() {
        let cfg = FilterConfiguration {
            regex_enabled: true,
            skip_target: Some(SkipTarget::SkipToNext),
            skipped_artists: Some("Dra.*".to_string()),
            skipped_songs: Some("(intro".to_string()),
        };
        let err = cfg.validate().unwrap_err();
        assert!(matches!(err, SkipperError::InvalidRule { category: RuleCategory::Song, .. }));

        assert!(FilterConfiguration::default().validate().is_ok());
    }
}
