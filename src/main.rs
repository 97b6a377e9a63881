use clap::{Parser as ClapParser, Subcommand};
use promql_fmt::cli::{self, CliError, OutputFormat, RenderCommand};
use promql_fmt::{RenderOptions, Theme, format_duration, parse_duration};
use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;
use tracing_subscriber::{EnvFilter, fmt};

#[derive(ClapParser)]
#[command(name = "promql-fmt")]
#[command(about = "promql-fmt - Pretty-print parsed PromQL expression trees")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render an AST (JSON from /api/v1/parse_query) as query text
    Render {
        /// File holding the AST (reads --input or stdin if not provided)
        file: Option<PathBuf>,

        /// Inline AST JSON
        #[arg(short, long, conflicts_with = "file")]
        input: Option<String>,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Plain, env = "PROMQL_FMT_FORMAT")]
        format: OutputFormat,

        /// Colour theme for HTML output
        #[arg(long, value_enum, default_value_t = Theme::Light, env = "PROMQL_FMT_THEME")]
        theme: Theme,

        /// Print only the top node's own syntax, not its sub-expressions
        #[arg(long)]
        no_children: bool,

        /// Stop descending after this many levels
        #[arg(long, env = "PROMQL_FMT_MAX_DEPTH")]
        max_depth: Option<u32>,
    },

    /// Format a millisecond count as a duration literal
    Duration {
        /// Milliseconds
        ms: u64,
    },

    /// Parse a duration literal into milliseconds
    ParseDuration {
        /// Duration such as 1h30m
        text: String,
    },
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env("PROMQL_FMT_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}

fn main() {
    init_tracing();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Render {
            file,
            input,
            format,
            theme,
            no_children,
            max_depth,
        } => run_render(file, input, format, theme, no_children, max_depth),
        Commands::Duration { ms } => {
            println!("{}", format_duration(ms));
            Ok(())
        }
        Commands::ParseDuration { text } => match parse_duration(&text) {
            Ok(ms) => {
                println!("{}", ms);
                Ok(())
            }
            Err(e) => Err(CliError::from(e)),
        },
    };

    if let Err(e) = result {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}

fn run_render(
    file: Option<PathBuf>,
    input: Option<String>,
    format: OutputFormat,
    theme: Theme,
    no_children: bool,
    max_depth: Option<u32>,
) -> Result<(), CliError> {
    let input = match (file, input) {
        (Some(path), _) => Some(fs::read_to_string(path)?),
        (None, Some(s)) => Some(s),
        (None, None) if !atty::is(atty::Stream::Stdin) => {
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer)?;
            Some(buffer)
        }
        (None, None) => None,
    };

    let command = RenderCommand {
        input,
        format,
        theme,
        options: RenderOptions {
            show_children: !no_children,
            max_depth,
        },
    };

    println!("{}", cli::execute_render(&command)?);
    Ok(())
}
