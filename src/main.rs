use clap::{Parser, Subcommand};
use graft::cli::{self, CliError, Pass, PassOptions};
use std::io::{self, Read};

#[derive(Parser)]
#[command(name = "graft")]
#[command(about = "Graft - A structural pattern matcher and tree rewriter for array-encoded JavaScript ASTs")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Collapse tail-constructor chains and expand using-statements
    Optimize {
        /// JSON-encoded tree (reads from stdin if not provided)
        #[arg(short, long)]
        input: Option<String>,

        /// Pretty-print the output
        #[arg(short, long)]
        pretty: bool,
    },

    /// Replace style-export assignments with empty object literals
    StripStyles {
        /// JSON-encoded tree (reads from stdin if not provided)
        #[arg(short, long)]
        input: Option<String>,

        /// Pretty-print the output
        #[arg(short, long)]
        pretty: bool,
    },

    /// Run the full pipeline: optimize, then strip style exports
    Process {
        /// JSON-encoded tree (reads from stdin if not provided)
        #[arg(short, long)]
        input: Option<String>,

        /// Pretty-print the output
        #[arg(short, long)]
        pretty: bool,
    },
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Optimize { input, pretty } => run_pass(Pass::Optimize, input, pretty),
        Commands::StripStyles { input, pretty } => run_pass(Pass::StripStyles, input, pretty),
        Commands::Process { input, pretty } => run_pass(Pass::Process, input, pretty),
    };

    if let Err(e) = result {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}

fn run_pass(pass: Pass, input: Option<String>, pretty: bool) -> Result<(), CliError> {
    let input = match input {
        Some(s) => Some(s),
        None if !atty::is(atty::Stream::Stdin) => {
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer).map_err(CliError::Io)?;
            Some(buffer)
        }
        None => None,
    };

    let options = PassOptions { input, pretty };
    let output = cli::execute_pass(pass, &options)?;

    let json = if pretty {
        serde_json::to_string_pretty(&output)
    } else {
        serde_json::to_string(&output)
    }
    .unwrap();
    println!("{}", json);
    Ok(())
}
