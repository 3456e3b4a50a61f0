//! `promptfig-gen`: write an editor binary and a loader into a Rust project.
//!
//! ```sh
//! promptfig-gen --type AppConfig --module my_app::config --root .
//! ```

use clap::Parser;
use colored::Colorize;

use promptfig::{GenerateArgs, PromptfigError, generate};

fn run(args: GenerateArgs) -> Result<(), PromptfigError> {
    let options = args.into_options()?;
    println!("{}", "Welcome to promptfig-gen!".blue().bold());

    let generated = generate(&options)?;
    println!(
        "{} {}",
        "Generated editor for".green(),
        generated.type_path.bold()
    );
    println!("  {}", generated.editor.display());
    println!("  {}", generated.loaders.display());
    println!(
        "Add `mod promptfig_loaders;` to your library and run `cargo run --bin promptfig`."
    );
    Ok(())
}

fn main() {
    let args = GenerateArgs::parse();
    if let Err(e) = run(args) {
        eprintln!("{} {}", "Error:".red().bold(), e);
        std::process::exit(1);
    }
}
