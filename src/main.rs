// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{Result, anyhow, Context};
use log::{error, warn, info, debug, LevelFilter, Log, Metadata, Record, Level, SetLoggerError};
use std::path::{Path, PathBuf};
use std::io::Write;
use clap::{Parser, ValueEnum, CommandFactory, Subcommand};
use clap_complete::{generate, Shell};

use subedit::app_config::{self, Config};
use subedit::dfxp::{self, DfxpMetadata, timing::format_time_expression};
use subedit::file_utils::FileManager;
use subedit::language_utils;
use subedit::markup::from_inline_markup;
use subedit::subtitles::SubtitleList;

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for app_config::LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => app_config::LogLevel::Error,
            CliLogLevel::Warn => app_config::LogLevel::Warn,
            CliLogLevel::Info => app_config::LogLevel::Info,
            CliLogLevel::Debug => app_config::LogLevel::Debug,
            CliLogLevel::Trace => app_config::LogLevel::Trace,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print every cue of a DFXP file as inline markup
    Markup {
        /// DFXP file to read
        #[arg(value_name = "INPUT_FILE")]
        input: PathBuf,

        /// Print cues as JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Convert inline markup to a DFXP paragraph
    Dfxp {
        /// Inline markup, e.g. "_underline **bold**_"
        #[arg(value_name = "MARKUP")]
        markup: String,
    },

    /// Check that every cue has text and timing
    Check {
        /// DFXP file or directory to check
        #[arg(value_name = "INPUT_PATH")]
        input_path: PathBuf,
    },

    /// Rewrite a DFXP file through the subtitle list model
    Convert {
        /// DFXP file to read
        #[arg(value_name = "INPUT_FILE")]
        input: PathBuf,

        /// Output file (defaults to <stem>.normalized.<ext> next to the input)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Force overwrite of existing output files
        #[arg(short, long)]
        force_overwrite: bool,
    },

    /// Generate shell completions for subedit
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// subedit - subtitle editor core tools
///
/// Converts DFXP subtitle documents to inline markup and back, and checks
/// that subtitles are complete before review.
#[derive(Parser, Debug)]
#[command(name = "subedit")]
#[command(version)]
#[command(about = "DFXP subtitle markup and completeness tool")]
#[command(long_about = "subedit converts DFXP subtitle styling to inline markup and back.

EXAMPLES:
    subedit markup talk.en.dfxp               # Print cues as inline markup
    subedit markup --json talk.en.dfxp        # Print cues as JSON
    subedit dfxp '_underline **bold**_'       # Markup to a DFXP paragraph
    subedit check /subtitles/                 # Check every DFXP file in a directory
    subedit convert -f talk.en.dfxp           # Rewrite a file through the cue model
    subedit completions bash > subedit.bash   # Generate bash completions

CONFIGURATION:
    Configuration is stored in conf.json by default. You can specify a different
    config file with --config-path. If the config file doesn't exist, a default one
    will be created automatically.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json", global = true)]
    config_path: String,

    /// Set logging level
    #[arg(short, long, value_enum, global = true)]
    log_level: Option<CliLogLevel>,
}

// @struct: Custom logger implementation
struct CustomLogger {
    level: LevelFilter,
}

impl CustomLogger {
    // @creates: New logger with specified level
    fn new(level: LevelFilter) -> Self {
        CustomLogger { level }
    }

    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        let logger = Box::new(CustomLogger::new(level));
        log::set_boxed_logger(logger)?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: ANSI color and tag for log level
    fn style_for_level(level: Level) -> (&'static str, &'static str) {
        match level {
            Level::Error => ("\x1B[1;31m", "ERROR"),
            Level::Warn => ("\x1B[1;33m", "WARN "),
            Level::Info => ("\x1B[1;32m", "INFO "),
            Level::Debug => ("\x1B[1;36m", "DEBUG"),
            Level::Trace => ("\x1B[1;35m", "TRACE"),
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S.%3f");
            let (color, tag) = Self::style_for_level(record.level());

            let mut stderr = std::io::stderr();
            let _ = writeln!(stderr, "{}{} {} {}\x1B[0m", color, now, tag, record.args());
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

fn main() -> Result<()> {
    // Trace is the ceiling; the effective level is set with set_max_level
    CustomLogger::init(LevelFilter::Trace)?;
    log::set_max_level(LevelFilter::Info);

    let cli = CommandLineOptions::parse();

    if let Commands::Completions { shell } = &cli.command {
        let mut cmd = CommandLineOptions::command();
        generate(*shell, &mut cmd, "subedit", &mut std::io::stdout());
        return Ok(());
    }

    // If log level is set via command line, apply it immediately
    if let Some(cmd_log_level) = &cli.log_level {
        let level: app_config::LogLevel = cmd_log_level.clone().into();
        log::set_max_level(level.to_level_filter());
    }

    let mut config = Config::load_or_create(&cli.config_path)?;
    if let Some(log_level) = &cli.log_level {
        config.log_level = log_level.clone().into();
    }
    config.validate().context("Configuration validation failed")?;
    log::set_max_level(config.log_level.to_level_filter());

    match cli.command {
        Commands::Markup { input, json } => print_markup(&config, &input, json),
        Commands::Dfxp { markup } => print_dfxp(&markup),
        Commands::Check { input_path } => run_check(&config, &input_path),
        Commands::Convert { input, output, force_overwrite } => {
            run_convert(&config, &input, output, force_overwrite)
        }
        Commands::Completions { .. } => Ok(()),
    }
}

fn load_list(config: &Config, path: &Path) -> Result<(dfxp::DfxpDocument, SubtitleList)> {
    let xml = FileManager::read_to_string(path)?;
    let document = dfxp::parse_dfxp_with(&xml, &config.subtitle.read_options())
        .with_context(|| format!("Failed to read DFXP file: {}", path.display()))?;
    let list = SubtitleList::from_dfxp(&document);
    debug!("Loaded {} cues from {:?}", list.len(), path);
    Ok((document, list))
}

fn format_optional_time(ms: Option<u64>) -> String {
    ms.map(format_time_expression)
        .unwrap_or_else(|| "--:--:--.---".to_string())
}

fn print_markup(config: &Config, input: &Path, json: bool) -> Result<()> {
    let (_, list) = load_list(config, input)?;

    if json {
        let output = serde_json::to_string_pretty(list.cues())
            .context("Failed to serialize cues to JSON")?;
        println!("{}", output);
        return Ok(());
    }

    for (index, cue) in list.iter().enumerate() {
        println!(
            "{}\n{} --> {}\n{}\n",
            index + 1,
            format_optional_time(cue.start_time_ms()),
            format_optional_time(cue.end_time_ms()),
            cue.content()
        );
    }
    Ok(())
}

fn print_dfxp(markup: &str) -> Result<()> {
    let tree = from_inline_markup(markup)
        .map_err(|e| anyhow!("Cannot convert markup: {}", e))?;
    println!("<p>{}</p>", dfxp::node_to_dfxp(&tree));
    Ok(())
}

fn check_file(config: &Config, path: &Path) -> Result<bool> {
    let (_, list) = load_list(config, path)?;

    if list.is_complete() {
        info!("{}: complete ({} lines)", path.display(), list.len());
        return Ok(true);
    }

    let first = list
        .first_incomplete()
        .and_then(|id| list.index_of(id))
        .map(|index| index + 1)
        .unwrap_or_default();
    warn!(
        "{}: {} of {} lines incomplete ({} synced), first at line {}",
        path.display(),
        list.incomplete_count(),
        list.len(),
        list.synced_count(),
        first
    );
    Ok(false)
}

fn run_check(config: &Config, input_path: &Path) -> Result<()> {
    let files = if FileManager::file_exists(input_path) {
        vec![input_path.to_path_buf()]
    } else if FileManager::dir_exists(input_path) {
        FileManager::find_subtitle_files(input_path)?
    } else {
        return Err(anyhow!("Input path does not exist: {:?}", input_path));
    };

    if files.is_empty() {
        warn!("No DFXP files found in: {:?}", input_path);
        return Ok(());
    }

    let mut incomplete = 0;
    for file in &files {
        match check_file(config, file) {
            Ok(true) => {}
            Ok(false) => incomplete += 1,
            Err(e) => {
                error!("Error checking file: {:#}", e);
                incomplete += 1;
            }
        }
    }

    info!("Checked {} file(s)", files.len());
    if incomplete > 0 {
        return Err(anyhow!("{} of {} file(s) incomplete or unreadable", incomplete, files.len()));
    }
    Ok(())
}

fn run_convert(config: &Config, input: &Path, output: Option<PathBuf>, force_overwrite: bool) -> Result<()> {
    let output = output.unwrap_or_else(|| {
        FileManager::generate_output_path(
            input,
            input.parent().unwrap_or(Path::new(".")),
            "normalized",
            &config.subtitle.output_extension,
        )
    });

    if output.exists() && !force_overwrite {
        warn!("Output file already exists: {:?}. Use -f to force overwrite.", output);
        return Ok(());
    }

    let (document, list) = load_list(config, input)?;
    let language = document
        .metadata
        .language
        .clone()
        .unwrap_or_else(|| config.language.clone());
    if let Ok(name) = language_utils::get_language_name(&language) {
        debug!("Document language: {} ({})", language, name);
    }

    let metadata = DfxpMetadata {
        language: Some(language),
        ..document.metadata
    };
    let converted = list
        .to_dfxp(metadata)
        .map_err(|e| anyhow!("Cannot rebuild DFXP document: {}", e))?;

    FileManager::write_to_file(&output, &dfxp::write_dfxp(&converted))?;
    info!("Success: {:?}", output);
    Ok(())
}
