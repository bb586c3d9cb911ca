// Song Skipper CLI - try your skip rules without a player
// Check single tracks, validate rules, dump the settings screen, replay scripted sessions

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use song_skipper::config::LoggingConfig;
use song_skipper::filter::split_patterns;
use song_skipper::host::settings::{SKIPPED_ARTISTS, SKIPPED_SONGS};
use song_skipper::session::{ReplayHost, SessionScript};
use song_skipper::{Config, RuleCategory, SettingsStore, SkipTarget, SongSkipper, Track};

#[derive(Parser)]
#[command(name = "song-skipper")]
#[command(about = "Skip or remove tracks whose artist or title matches your rules")]
struct Args {
    /// Config file to use instead of the default location
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Enable developer logging (stderr + debug output)
    #[arg(long, global = true)]
    dev: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Check a single track against the configured rules
    Check {
        #[arg(long)]
        title: String,
        /// Repeat for each artist, in credit order
        #[arg(long = "artist")]
        artists: Vec<String>,
    },
    /// Compile the configured rules and report errors
    Validate,
    /// Print the settings screen descriptors as JSON
    Settings,
    /// Replay a scripted session (JSON) and print what got skipped or removed
    Replay { script: PathBuf },
}

fn init_logging(logging: &LoggingConfig, dev: bool) -> Result<WorkerGuard> {
    std::fs::create_dir_all(&logging.directory)?;

    // Daily rotating file appender
    let file_appender = tracing_appender::rolling::daily(&logging.directory, &logging.file_prefix);
    let (file_writer, guard) = tracing_appender::non_blocking(file_appender);

    let base_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,song_skipper=debug"));

    let file_layer = fmt::layer()
        .with_writer(file_writer)
        .with_target(true)
        .with_level(true)
        .with_ansi(false);

    // Dev mode also logs to stderr
    let stderr_layer = dev.then(|| fmt::layer().with_writer(std::io::stderr).with_target(false));

    tracing_subscriber::registry()
        .with(base_filter)
        .with(file_layer)
        .with(stderr_layer)
        .try_init()?;

    Ok(guard)
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };

    let _guard = init_logging(&config.logging, args.dev)?;
    info!("Song skipper starting up");

    match args.command {
        Command::Check { title, artists } => check(config, Track::new(title, artists)),
        Command::Validate => validate(config),
        Command::Settings => {
            let skipper = SongSkipper::new(config);
            println!("{}", serde_json::to_string_pretty(&skipper.setting_items())?);
            Ok(())
        }
        Command::Replay { script } => replay(config, &script),
    }
}

fn check(config: Config, track: Track) -> Result<()> {
    let mut skipper = SongSkipper::new(config);
    let target = skipper.configuration().skip_target;

    let Some(category) = skipper.check(&track)? else {
        println!("'{}' by {}: no rule matches", track.title, track.display_artist());
        return Ok(());
    };

    let outcome = match (target, category) {
        (Some(SkipTarget::SkipToNext), _) => "would be skipped when it starts playing",
        (Some(SkipTarget::RemoveFromPlaylist), RuleCategory::Artist) => "would be removed from the playlist",
        (Some(SkipTarget::RemoveFromPlaylist), RuleCategory::Song) => {
            "stays put - song rules only apply when skipping"
        }
        (None, _) => "stays put - no skip target configured",
    };
    println!(
        "'{}' by {}: matches a {} rule, {}",
        track.title,
        track.display_artist(),
        category,
        outcome
    );
    Ok(())
}

fn validate(config: Config) -> Result<()> {
    let skipper = SongSkipper::new(config);
    skipper.validate().context("Filter rules are invalid")?;

    let count = |key: &str| {
        skipper
            .settings()
            .get_string(key)
            .map_or(0, |raw| split_patterns(&raw).count())
    };
    println!(
        "Rules OK: {} artist pattern(s), {} song pattern(s)",
        count(SKIPPED_ARTISTS),
        count(SKIPPED_SONGS)
    );
    Ok(())
}

fn replay(config: Config, script_path: &Path) -> Result<()> {
    let content = std::fs::read_to_string(script_path)
        .with_context(|| format!("Failed to read session script {}", script_path.display()))?;
    let script: SessionScript = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse session script {}", script_path.display()))?;

    info!("Replaying {} events over {} tracks", script.events.len(), script.queue.len());
    let report = ReplayHost::new(config, script.queue).run(&script.events)?;

    println!("Commands sent ({}):", report.commands.len());
    for command in &report.commands {
        println!("  {}", serde_json::to_string(command)?);
    }

    println!("Final queue ({} tracks):", report.queue.len());
    for (position, track) in report.queue.iter().enumerate() {
        let marker = if report.now_playing_position == Some(position) { ">" } else { " " };
        println!("{} {:>3}. {} - {}", marker, position, track.display_artist(), track.title);
    }
    Ok(())
}
