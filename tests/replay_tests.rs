use song_skipper::config::{Config, FilterSettings};
use song_skipper::host::PlayerCommand;
use song_skipper::session::{ReplayHost, SessionScript};

const SCRIPT: &str = r#"{
    "queue": [
        {"title": "Rich Flex", "artists": ["Drake", "21 Savage"]},
        {"title": "Kill Bill", "artists": ["SZA"]},
        {"title": "Intro (Skit)", "artists": ["SZA"]},
        {"title": "Snooze", "artists": ["SZA"]}
    ],
    "events": [
        {"event": "extension_selected"},
        {"event": "playlist_changed"},
        {"event": "play", "index": 0},
        {"event": "volume", "volume": 0.8},
        {"event": "next"}
    ]
}"#;

fn config(target: &str, artists: &str, songs: Option<&str>) -> Config {
    Config {
        filter: FilterSettings {
            regex_enabled: false,
            skip_target: Some(target.to_string()),
            skipped_artists: Some(artists.to_string()),
            skipped_songs: songs.map(str::to_string),
        },
        ..Default::default()
    }
}

#[test]
fn test_skip_session_skips_artist_and_title_matches() {
    let script: SessionScript = serde_json::from_str(SCRIPT).unwrap();
    let report = ReplayHost::new(config("Skip", "Drake", Some("skit")), script.queue)
        .run(&script.events)
        .unwrap();

    // Rich Flex (artist) skipped on play, Intro (Skit) (title) skipped after the user's next
    assert_eq!(report.commands, vec![PlayerCommand::Next, PlayerCommand::Next]);
    assert_eq!(report.now_playing.unwrap().title, "Snooze");
    assert_eq!(report.queue.len(), 4);
}

#[test]
fn test_remove_session_prunes_before_playback() {
    let script: SessionScript = serde_json::from_str(SCRIPT).unwrap();
    let report = ReplayHost::new(config("Remove", "Drake", Some("skit")), script.queue)
        .run(&script.events)
        .unwrap();

    assert_eq!(report.commands, vec![PlayerCommand::RemovePlaylistItem { position: 0 }]);
    let titles: Vec<&str> = report.queue.iter().map(|t| t.title.as_str()).collect();
    assert_eq!(titles, vec!["Kill Bill", "Intro (Skit)", "Snooze"]);
    // play index 0 is now Kill Bill, then the user's next lands on the skit (song rules don't remove)
    assert_eq!(report.now_playing_position, Some(1));
}

#[test]
fn test_bad_rule_aborts_replay() {
    let script: SessionScript = serde_json::from_str(SCRIPT).unwrap();
    let mut cfg = config("Skip", "(Drake", None);
    cfg.filter.regex_enabled = true;

    let err = ReplayHost::new(cfg, script.queue).run(&script.events).unwrap_err();
    assert_eq!(err.pattern(), "(Drake");
}
