// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{Result, anyhow, Context};
use log::{warn, info, LevelFilter, Log, Metadata, Record, Level, SetLoggerError};
use std::path::{Path, PathBuf};
use std::io::Write;
use std::fs::File;
use std::io::BufReader;
use clap::{Args, Parser, ValueEnum, CommandFactory, Subcommand};
use clap_complete::{generate, Shell};

use levelgrid::app_config::{Config, LogLevel};
use levelgrid::app_controller::Controller;
use levelgrid::level::{ModelDialect, Orientation, RaggedColumnPolicy, ShapeEnforcement};

/// CLI Wrapper for ModelDialect to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliDialect {
    #[value(alias = "llama-3")]
    Llama3,
    #[value(alias = "gemma-3")]
    Gemma3,
    #[value(alias = "qwen-2.5")]
    Qwen25,
    #[value(alias = "qwen-3")]
    Qwen3,
}

impl From<CliDialect> for ModelDialect {
    fn from(cli_dialect: CliDialect) -> Self {
        match cli_dialect {
            CliDialect::Llama3 => ModelDialect::Llama3,
            CliDialect::Gemma3 => ModelDialect::Gemma3,
            CliDialect::Qwen25 => ModelDialect::Qwen25,
            CliDialect::Qwen3 => ModelDialect::Qwen3,
        }
    }
}

/// CLI Wrapper for Orientation to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliOrientation {
    Horizontal,
    Vertical,
}

impl From<CliOrientation> for Orientation {
    fn from(cli_orientation: CliOrientation) -> Self {
        match cli_orientation {
            CliOrientation::Horizontal => Orientation::Horizontal,
            CliOrientation::Vertical => Orientation::Vertical,
        }
    }
}

/// CLI Wrapper for ShapeEnforcement to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliEnforcement {
    None,
    Rows,
    Columns,
    Both,
}

impl From<CliEnforcement> for ShapeEnforcement {
    fn from(cli_enforcement: CliEnforcement) -> Self {
        match cli_enforcement {
            CliEnforcement::None => ShapeEnforcement::None,
            CliEnforcement::Rows => ShapeEnforcement::Rows,
            CliEnforcement::Columns => ShapeEnforcement::Columns,
            CliEnforcement::Both => ShapeEnforcement::Both,
        }
    }
}

/// CLI Wrapper for RaggedColumnPolicy to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliRaggedColumns {
    Pad,
    Omit,
}

impl From<CliRaggedColumns> for RaggedColumnPolicy {
    fn from(cli_policy: CliRaggedColumns) -> Self {
        match cli_policy {
            CliRaggedColumns::Pad => RaggedColumnPolicy::Pad,
            CliRaggedColumns::Omit => RaggedColumnPolicy::Omit,
        }
    }
}

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
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
    /// Normalize level samples into canonical grids (default command)
    Normalize(NormalizeArgs),

    /// Generate shell completions for levelgrid
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Args, Debug, Clone)]
struct NormalizeArgs {
    /// Sample file (.txt or .json) or directory to process
    #[arg(value_name = "INPUT_PATH")]
    input_path: Option<PathBuf>,

    /// Chat-template dialect of the samples
    #[arg(short, long, value_enum)]
    dialect: Option<CliDialect>,

    /// Orientation of the generated level
    #[arg(short, long, value_enum)]
    orientation: Option<CliOrientation>,

    /// Default row/column separator (auto-detected when unambiguous)
    #[arg(long)]
    separator: Option<char>,

    /// Empty-space padding character
    #[arg(long)]
    fill_char: Option<char>,

    /// Padding character for the last row (solid ground)
    #[arg(long)]
    ground_char: Option<char>,

    /// Target number of rows
    #[arg(long)]
    rows: Option<usize>,

    /// Target number of columns
    #[arg(long)]
    cols: Option<usize>,

    /// Dimensions to enforce (inferred from --rows/--cols when omitted)
    #[arg(long, value_enum)]
    enforce: Option<CliEnforcement>,

    /// Run the convergent trim/pad pass even when only rows are enforced
    #[arg(long)]
    legacy_column_fallback: bool,

    /// Handling of vertical columns shorter than the first one
    #[arg(long, value_enum)]
    ragged_columns: Option<CliRaggedColumns>,

    /// Directory for the canonical grids (defaults to the input's directory)
    #[arg(long)]
    output_dir: Option<PathBuf>,

    /// Print the canonical grid instead of writing a file (single file only)
    #[arg(long)]
    stdout: bool,

    /// Force overwrite of existing output files
    #[arg(short, long)]
    force_overwrite: bool,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json")]
    config_path: String,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,
}

/// levelgrid - canonical game-level grids from model output
///
/// Strips chat-template framing from generated levels, rebuilds vertical
/// encodings and normalizes the result into a rectangular grid.
#[derive(Parser, Debug)]
#[command(name = "levelgrid")]
#[command(version)]
#[command(about = "Canonical level grids from model output")]
#[command(args_conflicts_with_subcommands = true)]
#[command(long_about = "levelgrid turns generated level text into a rectangular character grid.

EXAMPLES:
    levelgrid sample.txt                              # Normalize using default config
    levelgrid -d qwen3 sample.txt --stdout            # Strip Qwen 3 framing and print
    levelgrid -o vertical samples/                    # Rebuild vertical-bar levels in a folder
    levelgrid --rows 14 --cols 100 --ground-char X s.txt  # Enforce an exact shape
    levelgrid completions bash > levelgrid.bash       # Generate bash completions

CONFIGURATION:
    Configuration is stored in conf.json by default. You can specify a different
    config file with --config-path. If the config file doesn't exist, a default one
    will be created automatically. Command line flags override the file.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Option<Commands>,

    #[command(flatten)]
    normalize: NormalizeArgs,
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

    // @returns: Tag and ANSI colour for log level
    fn style_for_level(level: Level) -> (&'static str, &'static str) {
        match level {
            Level::Error => ("ERROR", "1;31"),
            Level::Warn => ("WARN ", "1;33"),
            Level::Info => ("INFO ", "1;32"),
            Level::Debug => ("DEBUG", "1;36"),
            Level::Trace => ("TRACE", "1;35"),
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
            let (tag, colour) = Self::style_for_level(record.level());

            let mut stderr = std::io::stderr();
            let _ = writeln!(
                stderr,
                "\x1B[{}m{} {} {}\x1B[0m",
                colour, now, tag, record.args()
            );
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Trace is the ceiling; the effective level is lowered once options are known
    CustomLogger::init(LevelFilter::Trace)?;
    log::set_max_level(LevelFilter::Info);

    let cli = CommandLineOptions::parse();

    match cli.command {
        Some(Commands::Completions { shell }) => {
            let mut cmd = CommandLineOptions::command();
            generate(shell, &mut cmd, "levelgrid", &mut std::io::stdout());
            Ok(())
        }
        Some(Commands::Normalize(args)) => run_normalize(args).await,
        None => run_normalize(cli.normalize).await,
    }
}

async fn run_normalize(options: NormalizeArgs) -> Result<()> {
    let input_path = options.input_path.clone().ok_or_else(|| {
        anyhow!("INPUT_PATH is required")
    })?;

    // If log level is set via command line, apply it immediately
    if let Some(cmd_log_level) = &options.log_level {
        let log_level: LogLevel = cmd_log_level.clone().into();
        log::set_max_level(log_level.to_level_filter());
    }

    let config = load_config(&options)?;

    if options.log_level.is_none() {
        log::set_max_level(config.log_level.to_level_filter());
    }

    let controller = Controller::with_config(config)?;

    if options.stdout {
        if !input_path.is_file() {
            return Err(anyhow!("--stdout requires a single input file: {:?}", input_path));
        }
        let level = controller.normalize_file(&input_path)?;
        for warning in &level.warnings {
            warn!("{}", warning);
        }
        println!("{}", level.grid);
        return Ok(());
    }

    if input_path.is_file() {
        controller.run(input_path, options.output_dir, options.force_overwrite).await?;
    } else if input_path.is_dir() {
        let report = controller.run_folder(input_path, options.output_dir, options.force_overwrite).await?;
        if report.failed() > 0 {
            warn!("{} file(s) could not be normalized", report.failed());
        }
    } else {
        return Err(anyhow!("Input path does not exist: {:?}", input_path));
    }

    Ok(())
}

/// Load the config file (creating a default one when missing) and apply CLI overrides
fn load_config(options: &NormalizeArgs) -> Result<Config> {
    let config_path = &options.config_path;
    let mut config = if Path::new(config_path).exists() {
        let file = File::open(config_path)
            .context(format!("Failed to open config file: {}", config_path))?;

        let reader = BufReader::new(file);
        serde_json::from_reader(reader)
            .context(format!("Failed to parse config file: {}", config_path))?
    } else {
        warn!("Config file not found at '{}', creating default config.", config_path);

        let config = Config::default();
        let config_json = serde_json::to_string_pretty(&config)
            .context("Failed to serialize default config to JSON")?;

        std::fs::write(config_path, config_json)
            .context(format!("Failed to write default config to file: {}", config_path))?;

        info!("Default config written to {}", config_path);
        config
    };

    apply_overrides(&mut config, options);
    Ok(config)
}

fn apply_overrides(config: &mut Config, options: &NormalizeArgs) {
    if let Some(dialect) = &options.dialect {
        config.extraction.dialect = Some(dialect.clone().into());
    }

    let layout = &mut config.layout;
    if let Some(orientation) = &options.orientation {
        layout.orientation = orientation.clone().into();
    }
    if let Some(separator) = options.separator {
        layout.separator = separator;
    }
    if let Some(fill_char) = options.fill_char {
        layout.fill.fill_char = fill_char;
    }
    if let Some(ground_char) = options.ground_char {
        layout.fill.ground_char = Some(ground_char);
    }
    if let Some(policy) = &options.ragged_columns {
        layout.ragged_columns = policy.clone().into();
    }

    let shape_requested = options.rows.is_some()
        || options.cols.is_some()
        || options.enforce.is_some()
        || options.legacy_column_fallback;
    if shape_requested {
        let mut shape = layout.shape.unwrap_or_default();
        if options.rows.is_some() {
            shape.row_count = options.rows;
        }
        if options.cols.is_some() {
            shape.col_count = options.cols;
        }
        shape.enforcement = match &options.enforce {
            Some(enforce) => enforce.clone().into(),
            None => match (options.rows.is_some(), options.cols.is_some()) {
                (true, true) => ShapeEnforcement::Both,
                (true, false) => ShapeEnforcement::Rows,
                (false, true) => ShapeEnforcement::Columns,
                (false, false) => shape.enforcement,
            },
        };
        if options.legacy_column_fallback {
            shape.legacy_column_fallback = true;
        }
        layout.shape = Some(shape);
    }
}
