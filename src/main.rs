// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{Result, anyhow};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{Shell, generate};
use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError, error, warn};
use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use json3vtt::app_config::{Config, LogLevel};
use json3vtt::diagnostics::LogSink;
use json3vtt::errors::AppError;
use json3vtt::file_utils::FileManager;
use json3vtt::Converter;

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, Copy, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => LogLevel::Error,
            CliLogLevel::Warn => LogLevel::Warn,
            CliLogLevel::Info => LogLevel::Info,
            CliLogLevel::Debug => LogLevel::Debug,
            CliLogLevel::Trace => LogLevel::Trace,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Convert JSON3 captions to WebVTT (default command)
    Convert(ConvertArgs),

    /// Generate shell completions for json3vtt
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Parser, Debug)]
struct ConvertArgs {
    /// Input JSON3 file, or a directory to convert recursively
    #[arg(value_name = "INPUT_PATH")]
    input_path: PathBuf,

    /// Output VTT file (default: input name with a .vtt extension)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Verbose output with detailed information
    #[arg(short, long, conflicts_with = "quiet")]
    verbose: bool,

    /// Quiet mode (errors only)
    #[arg(short, long)]
    quiet: bool,

    /// Set logging level
    #[arg(short, long, value_enum, conflicts_with_all = ["verbose", "quiet"])]
    log_level: Option<CliLogLevel>,

    /// Configuration file path
    #[arg(short, long)]
    config_path: Option<PathBuf>,
}

/// json3vtt - JSON3 caption to WebVTT converter
///
/// Converts the JSON3 caption documents served by video platforms into
/// WebVTT subtitle files, keeping the timing and cleaning the text.
#[derive(Parser, Debug)]
#[command(name = "json3vtt")]
#[command(version)]
#[command(about = "Convert JSON3 captions to WebVTT")]
#[command(long_about = "json3vtt converts JSON3 caption files into WebVTT subtitles.

EXAMPLES:
    json3vtt input.json3 -o output.vtt          # Convert to an explicit output file
    json3vtt captions.json3 --verbose           # Convert with debug logging
    json3vtt video.json3                        # Saves as video.vtt
    json3vtt /captions/                         # Convert every .json3 file in a directory
    json3vtt completions bash > json3vtt.bash   # Generate bash completions

CONFIGURATION:
    An optional JSON configuration file can be given with --config-path to tune
    the merge tolerance, the fallback event duration, the validation sample
    size and the output extension.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Input JSON3 file, or a directory to convert recursively
    #[arg(value_name = "INPUT_PATH")]
    input_path: Option<PathBuf>,

    /// Output VTT file (default: input name with a .vtt extension)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Verbose output with detailed information
    #[arg(short, long, conflicts_with = "quiet")]
    verbose: bool,

    /// Quiet mode (errors only)
    #[arg(short, long)]
    quiet: bool,

    /// Set logging level
    #[arg(short, long, value_enum, conflicts_with_all = ["verbose", "quiet"])]
    log_level: Option<CliLogLevel>,

    /// Configuration file path
    #[arg(short, long)]
    config_path: Option<PathBuf>,
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

    // @returns: ANSI color and marker for log level
    fn style_for_level(level: Level) -> (&'static str, &'static str) {
        match level {
            Level::Error => ("1;31", "❌"),
            Level::Warn => ("1;33", "🚧"),
            Level::Info => ("1;32", " "),
            Level::Debug => ("1;36", "🔍"),
            Level::Trace => ("1;35", "📋"),
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S");
            let (color, marker) = Self::style_for_level(record.level());

            let mut stderr = std::io::stderr();
            let _ = writeln!(
                stderr,
                "\x1B[{}m{} {} {}\x1B[0m",
                color, now, marker, record.args()
            );
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

fn main() -> ExitCode {
    let cli = CommandLineOptions::parse();

    let args = match cli.command {
        Some(Commands::Completions { shell }) => {
            let mut cmd = CommandLineOptions::command();
            generate(shell, &mut cmd, "json3vtt", &mut std::io::stdout());
            return ExitCode::SUCCESS;
        }
        Some(Commands::Convert(args)) => args,
        None => match cli.input_path {
            Some(input_path) => ConvertArgs {
                input_path,
                output: cli.output,
                verbose: cli.verbose,
                quiet: cli.quiet,
                log_level: cli.log_level,
                config_path: cli.config_path,
            },
            None => {
                let _ = CommandLineOptions::command().print_help();
                return ExitCode::FAILURE;
            }
        },
    };

    match run_convert(args) {
        Ok(output) => {
            println!("✓ Conversion complete: {}", output.display());
            ExitCode::SUCCESS
        }
        Err(e) => {
            // The converter has already reported its own failures
            if !matches!(e.downcast_ref::<AppError>(), Some(AppError::Conversion(_))) {
                error!("{:#}", e);
            }
            println!("✗ Conversion failed");
            ExitCode::FAILURE
        }
    }
}

/// Pick the effective level: quiet and verbose flags first, then an explicit
/// level, then the config file
fn resolve_log_level(options: &ConvertArgs, config: &Config) -> LevelFilter {
    if options.quiet {
        LevelFilter::Error
    } else if options.verbose {
        LevelFilter::Debug
    } else if let Some(level) = options.log_level {
        LogLevel::from(level).to_level_filter()
    } else {
        config.log_level.to_level_filter()
    }
}

fn load_config(options: &ConvertArgs) -> Result<Config> {
    let config = match &options.config_path {
        Some(path) => Config::from_file(path)?,
        None => Config::default(),
    };
    config.validate()?;
    Ok(config)
}

fn run_convert(options: ConvertArgs) -> Result<PathBuf> {
    // Loading happens before the logger exists, so errors travel up to main
    let config = load_config(&options);
    let level = match &config {
        Ok(config) => resolve_log_level(&options, config),
        Err(_) => LevelFilter::Error,
    };
    CustomLogger::init(level)?;
    let config = config?;

    let converter = Converter::new(config.conversion.clone(), LogSink::new(level));

    if FileManager::dir_exists(&options.input_path) {
        if options.output.is_some() {
            return Err(anyhow!("--output cannot be used with a directory input"));
        }

        let report = converter.convert_dir(&options.input_path).map_err(AppError::from)?;
        for (input, e) in &report.failed {
            warn!("Failed to convert {}: {}", input.display(), e);
        }
        if report.converted.is_empty() && report.failed.is_empty() {
            return Err(anyhow!(
                "No .json3 files found in {}",
                options.input_path.display()
            ));
        }
        if !report.is_success() {
            return Err(anyhow!(
                "{} of {} files failed to convert",
                report.failed.len(),
                report.failed.len() + report.converted.len()
            ));
        }
        return Ok(options.input_path);
    }

    let output = options.output.clone().unwrap_or_else(|| {
        FileManager::default_output_path(&options.input_path, &config.conversion.output_extension)
    });

    converter
        .convert_file(&options.input_path, &output)
        .map_err(AppError::from)?;

    Ok(output)
}
