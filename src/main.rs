// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{Result, anyhow, Context};
use log::{error, warn, info, LevelFilter, Log, Metadata, Record, Level, SetLoggerError};
use std::path::{Path, PathBuf};
use std::io::Write;
use std::fs::File;
use std::io::BufReader;
use std::process::ExitCode;
use clap::{Parser, ValueEnum, CommandFactory, Subcommand, Args};
use clap_complete::{generate, Shell};

use docfill::app_config::{self, Config, NamingStrategy};
use docfill::app_controller::Controller;
use docfill::mapping::Mapping;

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

/// CLI Wrapper for NamingStrategy to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliNamingStrategy {
    Placeholder,
    Timestamp,
}

impl From<CliNamingStrategy> for NamingStrategy {
    fn from(cli_strategy: CliNamingStrategy) -> Self {
        match cli_strategy {
            CliNamingStrategy::Placeholder => NamingStrategy::PlaceholderValue,
            CliNamingStrategy::Timestamp => NamingStrategy::Timestamp,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List template files in a directory
    List {
        /// Directory containing templates
        #[arg(value_name = "DIR")]
        dir: PathBuf,
    },

    /// Print the placeholders found in one or more templates
    Scan {
        /// Template files to scan
        #[arg(value_name = "TEMPLATE", required = true)]
        templates: Vec<PathBuf>,

        /// Show which document zones each placeholder appears in
        #[arg(short, long)]
        zones: bool,

        /// Treat TEMPLATE arguments as names listed in this directory
        #[arg(short, long, value_name = "DIR")]
        template_dir: Option<PathBuf>,
    },

    /// Fill templates with values and write the results
    Fill(FillArgs),

    /// Generate shell completions for docfill
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Args, Debug)]
struct FillArgs {
    /// Template files to fill
    #[arg(value_name = "TEMPLATE", required = true)]
    templates: Vec<PathBuf>,

    /// Treat TEMPLATE arguments as names listed in this directory
    #[arg(short, long, value_name = "DIR")]
    template_dir: Option<PathBuf>,

    /// Output directory
    #[arg(short, long, default_value = "generated")]
    output_dir: PathBuf,

    /// Placeholder value as TOKEN=VALUE (repeatable)
    #[arg(short = 's', long = "set", value_name = "TOKEN=VALUE")]
    assignments: Vec<String>,

    /// JSON file with a {"{TOKEN}": "value"} object
    #[arg(long, value_name = "FILE")]
    values: Option<PathBuf>,

    /// JSON file with raw form fields; placeholder keys carry the configured prefix
    #[arg(long, value_name = "FILE")]
    form: Option<PathBuf>,

    /// Force overwrite of existing output files
    #[arg(short, long)]
    force_overwrite: bool,

    /// Keep the original color of filled-in values
    #[arg(long)]
    keep_color: bool,

    /// Output naming strategy
    #[arg(long, value_enum)]
    naming: Option<CliNamingStrategy>,
}

/// docfill - Fill placeholders in document templates
///
/// Replaces {PLACEHOLDER} tokens in document templates with values while
/// preserving the formatting of the surrounding text.
#[derive(Parser, Debug)]
#[command(name = "docfill")]
#[command(version)]
#[command(about = "Fill placeholders in document templates")]
#[command(long_about = "docfill replaces {PLACEHOLDER} tokens in document templates with values, keeping fonts, sizes and colors of the surrounding text.

EXAMPLES:
    docfill list templates/                                   # List available templates
    docfill scan templates/contract.json templates/annex.json # Show placeholders
    docfill fill templates/contract.json -s FULL_NAME='Jane Doe' -s '{SUM}=100'
    docfill fill templates/*.json --values values.json -o out/ -f
    docfill fill -t templates/ contract.json annex.json -s FULL_NAME='Jane Doe'
    docfill completions bash > docfill.bash

CONFIGURATION:
    Configuration is stored in conf.json by default. You can specify a different
    config file with --config-path. If the config file doesn't exist, a default one
    will be created automatically.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path
    #[arg(short, long, global = true, default_value = "conf.json")]
    config_path: String,

    /// Set logging level
    #[arg(short, long, global = true, value_enum)]
    log_level: Option<CliLogLevel>,
}

// @struct: Custom logger implementation
struct CustomLogger;

impl CustomLogger {
    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        log::set_boxed_logger(Box::new(CustomLogger))?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: ANSI color code and label for log level
    fn style_for_level(level: Level) -> (&'static str, &'static str) {
        match level {
            Level::Error => ("1;31", "ERROR"),
            Level::Warn => ("1;33", "WARN "),
            Level::Info => ("1;32", "INFO "),
            Level::Debug => ("1;36", "DEBUG"),
            Level::Trace => ("1;35", "TRACE"),
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S.%3f");
            let (color, label) = Self::style_for_level(record.level());

            let mut stderr = std::io::stderr();
            let _ = writeln!(
                stderr,
                "\x1B[{}m{} {} {}\x1B[0m",
                color, now, label, record.args()
            );
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

fn main() -> ExitCode {
    // Initialize the logger once with info level by default
    // We'll update the level after loading the config if needed
    if let Err(e) = CustomLogger::init(LevelFilter::Info) {
        eprintln!("error: failed to initialize logger: {e}");
        return ExitCode::FAILURE;
    }

    let cli = CommandLineOptions::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: CommandLineOptions) -> Result<()> {
    // If log level is set via command line, apply it immediately
    if let Some(cmd_log_level) = &cli.log_level {
        let level: app_config::LogLevel = cmd_log_level.clone().into();
        log::set_max_level(level.to_level_filter());
    }

    match cli.command {
        Commands::Completions { shell } => {
            let mut cmd = CommandLineOptions::command();
            generate(shell, &mut cmd, "docfill", &mut std::io::stdout());
        }
        Commands::List { dir } => {
            let config = prepare_config(&cli.config_path, cli.log_level)?;
            let controller = Controller::with_config(config)?;
            for template in controller.list_templates(&dir)? {
                println!("{}", template.display());
            }
        }
        Commands::Scan { templates, zones, template_dir } => {
            let config = prepare_config(&cli.config_path, cli.log_level)?;
            let controller = Controller::with_config(config)?;
            let templates = resolve_templates(&controller, templates, template_dir.as_deref())?;
            if zones {
                for (token, found_in) in controller.scan_with_zones(&templates)? {
                    let zones: Vec<&str> = found_in.iter().map(|z| z.as_str()).collect();
                    println!("{}\t{}", token, zones.join(","));
                }
            } else {
                for token in controller.scan(&templates)? {
                    println!("{}", token);
                }
            }
        }
        Commands::Fill(args) => {
            let config = prepare_config(&cli.config_path, cli.log_level)?;
            run_fill(config, args)?;
        }
    }

    Ok(())
}

// @loads: Config file (created with defaults if missing) with the CLI log level applied
fn prepare_config(config_path: &str, log_level: Option<CliLogLevel>) -> Result<Config> {
    let mut config = load_or_create_config(config_path)?;

    if let Some(log_level) = log_level {
        // Update log level in config if specified via command line
        config.log_level = log_level.into();
    } else {
        // Just update the max level without reinitializing the logger
        log::set_max_level(config.log_level.to_level_filter());
    }

    Ok(config)
}

fn run_fill(mut config: Config, args: FillArgs) -> Result<()> {
    // Override config with CLI options if provided
    if args.keep_color {
        config.fill.normalize_color = false;
    }
    if let Some(naming) = args.naming {
        config.naming.strategy = naming.into();
    }

    let controller = Controller::with_config(config)?;

    let mut mapping = Mapping::new();
    if let Some(form_path) = &args.form {
        let fields: serde_json::Map<String, serde_json::Value> = read_json(form_path)?;
        let fields = fields.into_iter().filter_map(|(key, value)| match value {
            serde_json::Value::String(s) => Some((key, s)),
            other => {
                warn!("Ignoring non-string form field '{}': {}", key, other);
                None
            }
        });
        mapping.extend(controller.decode_form(fields));
    }
    if let Some(values_path) = &args.values {
        let values: Mapping = read_json(values_path)?;
        mapping.extend(values);
    }
    for assignment in &args.assignments {
        let (token, value) = Mapping::parse_assignment(assignment)?;
        mapping.insert(token, value);
    }

    if mapping.is_empty() {
        warn!("No placeholder values given; templates will be copied unchanged");
    }

    let templates = resolve_templates(&controller, args.templates, args.template_dir.as_deref())?;
    let summary = controller.generate(&templates, &mapping, &args.output_dir, args.force_overwrite)?;

    info!(
        "Generated {} file(s), skipped {} (bundle name: {})",
        summary.generated.len(),
        summary.skipped.len(),
        summary.bundle_stem
    );
    for generated in &summary.generated {
        println!("{}", generated.output.display());
    }

    Ok(())
}

// @resolves: Template names against a template directory listing, or paths as given
fn resolve_templates(controller: &Controller, templates: Vec<PathBuf>, template_dir: Option<&Path>) -> Result<Vec<PathBuf>> {
    match template_dir {
        Some(dir) => {
            let names: Vec<String> = templates.iter().map(|t| t.to_string_lossy().to_string()).collect();
            controller.select_templates(dir, &names)
        }
        None => Ok(templates),
    }
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T> {
    let file = File::open(path).context(format!("Failed to open file: {:?}", path))?;
    serde_json::from_reader(BufReader::new(file)).context(format!("Failed to parse JSON file: {:?}", path))
}

fn load_or_create_config(config_path: &str) -> Result<Config> {
    if Path::new(config_path).exists() {
        let file = File::open(config_path)
            .context(format!("Failed to open config file: {}", config_path))?;

        let reader = BufReader::new(file);
        let config: Config = serde_json::from_reader(reader)
            .context(format!("Failed to parse config file: {}", config_path))?;
        return Ok(config);
    }

    // Create default configuration if not exists
    warn!("Config file not found at '{}', creating default config.", config_path);

    let config = Config::default();
    let config_json = serde_json::to_string_pretty(&config)
        .context("Failed to serialize default config to JSON")?;

    std::fs::write(config_path, config_json)
        .map_err(|e| anyhow!("Failed to write default config to file {}: {}", config_path, e))?;

    Ok(config)
}
