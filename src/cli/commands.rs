use crate::config::DocsConfig;
use crate::logging::{init_logging_with_config, LogConfig};
use crate::manifest::Manifest;
use crate::spec::{ApiSpec, OutputFormat};
use clap::{Parser, Subcommand, ValueEnum};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::info;

/// Command-line interface for routedoc
///
/// Builds OpenAPI documents from route manifests.
#[derive(Parser, Debug)]
#[command(name = "routedoc", version)]
#[command(about = "Route documentation generator", long_about = None)]
pub struct Cli {
    /// Log at debug level (overrides ROUTEDOC_LOG_LEVEL)
    #[arg(short, long, global = true, default_value_t = false)]
    pub verbose: bool,

    /// The subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Build the OpenAPI document for a manifest
    Generate {
        /// Route manifest (YAML or JSON)
        #[arg(short, long)]
        manifest: PathBuf,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output format (default: from the output extension, else json)
        #[arg(short, long, value_enum)]
        format: Option<FormatArg>,

        /// Document routes declared without docs using placeholder models
        #[arg(long, default_value_t = false)]
        default_docs: bool,

        /// Docs configuration file (YAML, TOML or JSON)
        #[arg(short, long, env = "ROUTEDOC_CONFIG")]
        config: Option<PathBuf>,
    },

    /// List the documented operations of a manifest
    Routes {
        /// Route manifest (YAML or JSON)
        #[arg(short, long)]
        manifest: PathBuf,

        /// Document routes declared without docs using placeholder models
        #[arg(long, default_value_t = false)]
        default_docs: bool,

        /// Docs configuration file (YAML, TOML or JSON)
        #[arg(short, long, env = "ROUTEDOC_CONFIG")]
        config: Option<PathBuf>,
    },
}

/// Output document format
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum FormatArg {
    Json,
    Yaml,
}

impl From<FormatArg> for OutputFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Json => OutputFormat::Json,
            FormatArg::Yaml => OutputFormat::Yaml,
        }
    }
}

/// Parse arguments, set up logging and run
pub fn run_cli() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut log_config = LogConfig::from_env();
    if cli.verbose {
        log_config = log_config.with_level("debug");
    }
    init_logging_with_config(&log_config)?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    execute(&cli.command, &mut out)
}

/// Run a parsed command, writing any document or listing to `out`
pub fn execute(command: &Commands, out: &mut dyn Write) -> anyhow::Result<()> {
    match command {
        Commands::Generate {
            manifest,
            output,
            format,
            default_docs,
            config,
        } => {
            let config = load_config(config.as_deref())?;
            let spec = build_spec(manifest, &config, *default_docs)?;

            match output {
                Some(path) => {
                    let format = format
                        .map(OutputFormat::from)
                        .unwrap_or_else(|| OutputFormat::from_path(path));
                    spec.write_as(path, format)?;
                    info!(output = %path.display(), "OpenAPI document written");
                }
                None => {
                    let format = format.map_or(OutputFormat::Json, OutputFormat::from);
                    writeln!(out, "{}", spec.render(format)?)?;
                }
            }
            Ok(())
        }
        Commands::Routes {
            manifest,
            default_docs,
            config,
        } => {
            let config = load_config(config.as_deref())?;
            let spec = build_spec(manifest, &config, *default_docs)?;
            for line in operation_lines(&spec)? {
                writeln!(out, "{line}")?;
            }
            Ok(())
        }
    }
}

fn load_config(path: Option<&Path>) -> anyhow::Result<DocsConfig> {
    match path {
        Some(path) => DocsConfig::from_file(path),
        None => Ok(DocsConfig::from_env()),
    }
}

fn build_spec(
    manifest: &Path,
    config: &DocsConfig,
    default_docs: bool,
) -> anyhow::Result<ApiSpec> {
    let mut manifest = Manifest::load(manifest)?;
    if default_docs {
        manifest.generate_default_docs = Some(true);
    }
    let app = manifest.build(config)?;
    Ok(app.spec().clone())
}

/// `METHOD path  summary` for every documented operation, sorted by path
pub fn operation_lines(spec: &ApiSpec) -> anyhow::Result<Vec<String>> {
    let openapi = spec.to_openapi()?;
    let mut lines = Vec::new();
    if let Some(paths) = openapi.paths.as_ref() {
        for (path, item) in paths {
            for (method, operation) in item.methods() {
                let summary = operation
                    .summary
                    .as_deref()
                    .or(item.summary.as_deref())
                    .unwrap_or("");
                let line = format!("{:<7} {path}  {summary}", method.as_str());
                lines.push(line.trim_end().to_string());
            }
        }
    }
    Ok(lines)
}
