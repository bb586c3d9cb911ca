// Song Skipper Library - content filter add-on for host music players
// Host sends playback notifications in, we send skip/remove commands back

pub mod audio;   // track snapshots and an in-memory play queue
pub mod config;  // settings file for the CLI
pub mod error;   // library error type
pub mod filter;  // rule compiling, caching, matching, decisions
pub mod host;    // traits the host player implements / calls
pub mod session; // scripted replay host
pub mod skipper; // the add-on itself

// Export the stuff embedding hosts actually use
pub use audio::{PlayQueue, Track};
pub use config::Config;
pub use error::{Result, SkipperError};
pub use filter::{DecisionEngine, FilterConfiguration, MatchMode, PatternCompilationError, RuleCategory, SkipTarget};
pub use host::{PlayerCommand, PlayerControls, PlayerListener, SettingsStore};
pub use skipper::SongSkipper;
