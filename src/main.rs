use cidr_merger::config::{init_logging, ColorMode, Config, OutputFormat};
use cidr_merger::{cidr_command, merge_command, Options};
use clap::{Parser, Subcommand};
use std::error::Error;
use std::io::Read;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "cidr-merger")]
#[command(about = "Convert IP ranges to CIDR blocks and merge overlapping ranges")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format (overrides CIDR_MERGER_FORMAT)
    #[arg(short = 'o', long, global = true)]
    format: Option<OutputFormat>,

    /// Colour text output (overrides CIDR_MERGER_COLOR)
    #[arg(long, global = true)]
    color: Option<ColorMode>,

    /// Skip unparseable inputs instead of failing
    #[arg(long, global = true)]
    skip_invalid: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Split each input into CIDR blocks
    Cidr {
        /// Addresses, CIDR blocks or start-end ranges; stdin when empty
        inputs: Vec<String>,
        /// Read inputs from a file
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
    /// Merge all inputs into disjoint blocks
    Merge {
        /// Addresses, CIDR blocks or start-end ranges; stdin when empty
        inputs: Vec<String>,
        /// Read inputs from a file
        #[arg(short, long)]
        file: Option<PathBuf>,
        /// Print start-end ranges instead of CIDR blocks
        #[arg(long)]
        ranges: bool,
    },
}

fn read_input(inputs: &[String], file: Option<&PathBuf>) -> Result<String, Box<dyn Error>> {
    if let Some(path) = file {
        return std::fs::read_to_string(path)
            .map_err(|e| format!("Error reading {}: {e}", path.display()).into());
    }
    if !inputs.is_empty() {
        return Ok(inputs.join("\n"));
    }
    let mut buf = String::new();
    std::io::stdin().read_to_string(&mut buf)?;
    Ok(buf)
}

fn main() -> Result<(), Box<dyn Error>> {
    // Do as little as possible in main.rs as it can't contain any tests
    let cli = Cli::parse();
    let config = Config::from_env();
    init_logging(&config)?;
    log::info!("#Start main()");
    config.log_ignored();

    cli.color.unwrap_or(config.color).apply();
    let opts = Options {
        format: cli.format.unwrap_or(config.format),
        skip_invalid: cli.skip_invalid,
    };

    let out = match &cli.command {
        Commands::Cidr { inputs, file } => {
            cidr_command(&read_input(inputs, file.as_ref())?, &opts)?
        }
        Commands::Merge {
            inputs,
            file,
            ranges,
        } => merge_command(&read_input(inputs, file.as_ref())?, &opts, *ranges)?,
    };
    print!("{out}");

    Ok(())
}
