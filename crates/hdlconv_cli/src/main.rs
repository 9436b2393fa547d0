//! hdlconv CLI: inspect and rewrite HDL interface documents in JSON form.
//!
//! Provides `hdlconv check` for validating design documents, `hdlconv
//! normalize` for canonicalizing identifiers and interface order, and
//! `hdlconv port` for emitting the JSON form of a single port declaration.

#![warn(missing_docs)]

mod check;
mod normalize;
mod pipeline;
mod port;

use std::process;

use clap::{Parser, Subcommand, ValueEnum};
use hdlconv_objects::{Direction, Language};
use tracing_subscriber::EnvFilter;

/// hdlconv: HDL interface documents in JSON.
#[derive(Parser, Debug)]
#[command(name = "hdlconv", version, about = "HDL interface JSON converter")]
pub struct Cli {
    /// Suppress all output except errors.
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Enable verbose (debug-level) output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to a custom `hdlconv.toml` configuration file.
    #[arg(long, global = true)]
    pub config: Option<String>,

    /// The subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Validate design documents and summarize their contents.
    Check {
        /// Design JSON files to check.
        #[arg(required = true)]
        files: Vec<String>,
    },
    /// Canonicalize a design document and write it back out.
    Normalize(NormalizeArgs),
    /// Print the JSON form of one port declaration.
    Port(PortArgs),
}

/// Arguments for the `hdlconv normalize` subcommand.
#[derive(Parser, Debug)]
pub struct NormalizeArgs {
    /// Design JSON file to read.
    pub file: String,

    /// Output path (default: stdout).
    #[arg(short, long)]
    pub output: Option<String>,

    /// Source language, overriding the config file and file name.
    #[arg(short, long, value_enum)]
    pub lang: Option<HdlLanguage>,
}

/// Arguments for the `hdlconv port` subcommand.
#[derive(Parser, Debug)]
pub struct PortArgs {
    /// Port direction (in, out, inout, buffer, linkage).
    #[arg(short, long)]
    pub direction: Direction,

    /// Signal name.
    #[arg(short, long)]
    pub name: String,

    /// Type mark name.
    #[arg(short = 't', long = "type", default_value = "std_logic")]
    pub ty: String,

    /// Default value: an integer or a name.
    #[arg(long)]
    pub value: Option<String>,
}

/// HDL language selection.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum HdlLanguage {
    /// VHDL.
    Vhdl,
    /// Verilog.
    Verilog,
}

impl From<HdlLanguage> for Language {
    fn from(lang: HdlLanguage) -> Self {
        match lang {
            HdlLanguage::Vhdl => Language::Vhdl,
            HdlLanguage::Verilog => Language::Verilog,
        }
    }
}

/// Global settings derived from CLI flags.
pub struct GlobalArgs {
    /// Whether to suppress non-error output.
    pub quiet: bool,
    /// Whether to print verbose/debug information.
    pub verbose: bool,
    /// Optional path to a custom config file.
    pub config: Option<String>,
}

impl GlobalArgs {
    /// Default log filter for these flags; `RUST_LOG` takes precedence.
    fn log_level(&self) -> &'static str {
        if self.quiet {
            "error"
        } else if self.verbose {
            "debug"
        } else {
            "info"
        }
    }
}

fn init_logging(global: &GlobalArgs) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(global.log_level()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();
}

fn main() {
    let cli = Cli::parse();

    let global = GlobalArgs {
        quiet: cli.quiet,
        verbose: cli.verbose,
        config: cli.config,
    };
    init_logging(&global);

    let result = match cli.command {
        Command::Check { ref files } => check::run(files, &global),
        Command::Normalize(ref args) => normalize::run(args, &global),
        Command::Port(ref args) => port::run(args, &global),
    };

    match result {
        Ok(code) => process::exit(code),
        Err(e) => {
            tracing::error!("{e}");
            process::exit(1);
        }
    }
}
