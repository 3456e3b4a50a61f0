//! # promptfig demo application
//!
//! A sample CLI tool that showcases the promptfig editor. It exists purely to
//! demonstrate and manually verify the editing flow.
//!
//! ## Running
//!
//! ```sh
//! cargo run --example promptfig_demo -- edit
//! cargo run --example promptfig_demo -- echo
//! ```
//!
//! ## Features demonstrated
//!
//! | Feature                  | How to exercise it                                                     |
//! |--------------------------|------------------------------------------------------------------------|
//! | Fresh edit               | `cargo run --example promptfig_demo -- edit`                           |
//! | Re-edit previous run     | Run `edit` twice; the second run starts from `promptfig.toml`          |
//! | Explicit template        | `cargo run --example promptfig_demo -- edit --template base.toml`      |
//! | Non-interactive          | `cargo run --example promptfig_demo -- edit --non-interactive`         |
//! | Custom destination       | `cargo run --example promptfig_demo -- edit -d out/demo.toml`          |
//! | Load the written file    | `cargo run --example promptfig_demo -- echo`                           |

mod config;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use colored::Colorize;

use promptfig::{DEFAULT_DESTINATION, EditorArgs, PromptfigError, load_file};

use config::DemoConfig;

/// promptfig demo: edit and inspect a sample configuration.
#[derive(Parser, Debug)]
#[command(name = "promptfig-demo")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Fill in the demo configuration interactively.
    Edit(EditorArgs),
    /// Print a previously written configuration.
    Echo {
        /// Document to read.
        #[arg(short, long, default_value = DEFAULT_DESTINATION)]
        file: PathBuf,
    },
}

fn echo(config: &DemoConfig) {
    println!("{}", config.name.bright_yellow().bold());
    if config.verbose {
        println!("{}", "[verbose]".cyan());
    }
    println!("{:<16} {}", "sample_rate".cyan(), config.sample_rate);
    println!(
        "{:<16} {}:{} (max {})",
        "server".cyan(),
        config.server.host,
        config.server.port,
        config.server.max_connections
    );
    println!("{:<16} {}", "aliases".cyan(), config.aliases.join(", "));
    for backend in &config.backends {
        println!(
            "{:<16} {} (weight {})",
            "backend".cyan(),
            backend.address,
            backend.weight
        );
    }
    for (route, limit) in &config.limits {
        println!("{:<16} {route} = {limit}", "limit".cyan());
    }
}

fn run(cli: Cli) -> Result<(), PromptfigError> {
    match cli.command {
        Commands::Edit(args) => {
            let config = args.session::<DemoConfig>().run()?;
            if config.verbose {
                echo(&config);
            }
        }
        Commands::Echo { file } => echo(&load_file::<DemoConfig>(&file)?),
    }
    Ok(())
}

fn main() {
    if let Err(e) = run(Cli::parse()) {
        eprintln!("{} {e}", "Error:".red().bold());
        std::process::exit(1);
    }
}
