use std::path::PathBuf;

use clap::{Parser, Subcommand};
use scene::SceneConfig;
use scene::content;
use scene::section::all_sections;
use serde::Serialize;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "portfolio", about = "Headless driver for the portfolio scene")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the section descriptors as JSON.
    Sections,
    /// Print the default scene config as JSON.
    Config,
    /// Print the expanded-card text for a section title.
    Content { title: String },
    /// Run a JSON step script and print the final snapshot with the event log.
    Simulate {
        script: PathBuf,
        #[arg(long)]
        config: Option<PathBuf>,
        #[arg(long, default_value_t = 60.0)]
        fps: f64,
    },
}

#[derive(Serialize)]
struct SectionLine {
    index: usize,
    id: &'static str,
    title: &'static str,
    description: &'static str,
    color: &'static str,
    glow_color: &'static str,
    icon: &'static str,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = real_main() {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

fn real_main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    match cli.command {
        Command::Sections => {
            let sections: Vec<SectionLine> = all_sections()
                .into_iter()
                .map(|s| SectionLine {
                    index: s.kind.index(),
                    id: s.id,
                    title: s.title,
                    description: s.description,
                    color: s.color,
                    glow_color: s.glow_color,
                    icon: s.icon.glyph(),
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&sections)?);
        }
        Command::Content { title } => {
            println!("{}", content::lookup(&title));
        }
        Command::Config => {
            println!("{}", serde_json::to_string_pretty(&SceneConfig::default())?);
        }
        Command::Simulate { script, config, fps } => {
            let config = match config {
                Some(path) => SceneConfig::load(path)?,
                None => SceneConfig::default(),
            };
            let steps = tools::load_script(&script)?;
            let report = tools::run_script(config, &steps, fps)?;
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
    }
    Ok(())
}
