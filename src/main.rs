use anyhow::{Context, Result, anyhow};
use clap::{Parser, Subcommand, ValueEnum};
use log::info;
use std::io::Read;
use std::path::{Path, PathBuf};

use proxq::analysis::{self, TermAnalyzer};
use proxq::config::{CapitalizationParams, DEFAULT_ANALYZER, ProximityParams, QueryRequest};
use proxq::output::{self, Format};
use proxq::query::CompileMode;

#[derive(Parser)]
#[command(name = "proxq")]
#[command(about = "Compile proximity and capitalization expressions into span queries")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Line, global = true)]
    format: OutputFormat,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    /// Log parsing steps (same as RUST_LOG=debug)
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Compile a proximity expression, e.g. `quick fox w5 dog`
    Prox {
        /// The expression
        expr: String,

        /// Query field
        #[arg(short, long)]
        field: String,

        /// Composition mode: loose or phrase
        #[arg(short, long, default_value = "loose")]
        mode: CompileMode,

        /// Minimum should match, as a percentage (loose mode)
        #[arg(long)]
        mm: Option<String>,

        /// Built-in analyzer: standard or whitespace
        #[arg(short, long, default_value = DEFAULT_ANALYZER)]
        analyzer: String,
    },
    /// Compile a capitalization expression, e.g. `firstcap(trump)`
    Cap {
        /// The expression
        expr: String,

        /// Query field
        #[arg(short, long)]
        field: String,

        /// Built-in analyzer: standard or whitespace
        #[arg(short, long, default_value = DEFAULT_ANALYZER)]
        analyzer: String,
    },
    /// Compile a JSON request document (`-` reads stdin)
    Request {
        /// Path to the request file
        path: PathBuf,
    },
    /// Show the capitalization class of raw tokens
    Classify {
        /// Tokens as they appear in the source text
        #[arg(required = true)]
        tokens: Vec<String>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Line,
    Tree,
    Json,
}

impl From<OutputFormat> for Format {
    fn from(f: OutputFormat) -> Self {
        match f {
            OutputFormat::Line => Format::Line,
            OutputFormat::Tree => Format::Tree,
            OutputFormat::Json => Format::Json,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let color = !cli.no_color;
    let format = Format::from(cli.format);

    match cli.command {
        Commands::Prox {
            expr,
            field,
            mode,
            mm,
            analyzer,
        } => {
            let analyzer = resolve_analyzer(&analyzer)?;
            let params = ProximityParams { qf: field, mm, mode };
            info!("qf: {}; mm: {:?}; mode: {:?}", params.qf, params.mm, params.mode);
            let node = params
                .compile(&expr, analyzer.as_ref())
                .with_context(|| format!("cannot compile {:?}", expr))?;
            output::print_query(&node, format, color)?;
        }
        Commands::Cap {
            expr,
            field,
            analyzer,
        } => {
            let analyzer = resolve_analyzer(&analyzer)?;
            let params = CapitalizationParams { qf: field };
            info!("qf: {}", params.qf);
            let node = params
                .compile(&expr, analyzer.as_ref())
                .with_context(|| format!("cannot compile {:?}", expr))?;
            output::print_query(&node, format, color)?;
        }
        Commands::Request { path } => {
            let json = read_request(&path)?;
            let request = QueryRequest::from_json(&json)
                .with_context(|| format!("cannot read request {}", path.display()))?;
            let node = request.compile()?;
            output::print_query(&node, format, color)?;
        }
        Commands::Classify { tokens } => {
            output::print_classes(&tokens, color)?;
        }
    }

    Ok(())
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default))
        .format_timestamp(None)
        .init();
}

fn resolve_analyzer(name: &str) -> Result<Box<dyn TermAnalyzer>> {
    analysis::for_name(name)
        .ok_or_else(|| anyhow!("unknown analyzer: {} (expected standard or whitespace)", name))
}

fn read_request(path: &Path) -> Result<String> {
    if path.as_os_str() == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("cannot read request from stdin")?;
        Ok(buf)
    } else {
        std::fs::read_to_string(path).with_context(|| format!("cannot read {}", path.display()))
    }
}
