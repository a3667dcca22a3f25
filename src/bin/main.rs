//! metamodel CLI - inspect and validate model definitions
//!
//! Usage:
//!   metamodel check <file_model.json>
//!   metamodel show <file_model.json> [--class <name>]
//!   metamodel configured [--config <metamodel.toml>]
//!
//! Set `METAMODEL_LOG=debug` to trace the linking passes.

use clap::{Parser, Subcommand};
use metamodel::config::Settings;
use metamodel::{ClassRef, Model, ModelCache, ModelDefinition, ModelRegistry};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "metamodel")]
#[command(about = "Build and inspect object-model definitions")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build a model definition and report whether it links
    Check {
        /// Path to the <name>_model.json file
        file: PathBuf,
    },

    /// Print a model, or a single class with its links
    Show {
        /// Path to the <name>_model.json file
        file: PathBuf,

        /// Class to describe
        #[arg(short, long)]
        class: Option<String>,
    },

    /// Build the model selected by the configuration file
    Configured {
        /// Path to metamodel.toml (defaults to the standard search locations)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env("METAMODEL_LOG").unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Check { file } => cmd_check(file),
        Commands::Show { file, class } => cmd_show(file, class),
        Commands::Configured { config } => cmd_configured(config),
    }
}

fn load_model(file: &Path) -> Result<Model, ExitCode> {
    ModelDefinition::from_file(file)
        .and_then(ModelDefinition::build)
        .map_err(|e| {
            eprintln!("Error building '{}': {}", file.display(), e);
            ExitCode::FAILURE
        })
}

fn print_summary(model: &Model) {
    println!("model:       {}", model.name());
    println!("classes:     {}", model.len());
    println!("interfaces:  {}", model.interfaces().len());
    println!("roots:       {}", model.roots().len());
    println!("fingerprint: {}", model.fingerprint());
}

fn cmd_check(file: PathBuf) -> ExitCode {
    match load_model(&file) {
        Ok(model) => {
            print_summary(&model);
            if let Err(e) = model.check_acyclic() {
                println!("warning:     {}", e);
            }
            ExitCode::SUCCESS
        }
        Err(code) => code,
    }
}

fn cmd_show(file: PathBuf, class: Option<String>) -> ExitCode {
    let model = match load_model(&file) {
        Ok(model) => model,
        Err(code) => return code,
    };

    let Some(class_name) = class else {
        for name in model.class_names() {
            println!("{}", name);
        }
        return ExitCode::SUCCESS;
    };

    match model.class(&class_name) {
        Some(class) => {
            print_class(class);
            ExitCode::SUCCESS
        }
        None => {
            eprintln!("Class '{}' not found in model '{}'", class_name, model.name());
            ExitCode::FAILURE
        }
    }
}

fn join_names(classes: &[ClassRef<'_>]) -> String {
    classes
        .iter()
        .map(|c| c.name())
        .collect::<Vec<_>>()
        .join(", ")
}

fn print_class(class: ClassRef<'_>) {
    let kind = if class.is_interface() { "interface" } else { "class" };
    println!("{} {}", kind, class.name());
    if let Some(superclass) = class.superclass() {
        println!("  extends:      {}", superclass.name());
    }
    println!("  implements:   {}", join_names(&class.interfaces()));
    println!("  subclasses:   {}", join_names(&class.direct_subclasses()));
    if class.is_interface() {
        println!("  implementors: {}", join_names(&class.direct_implementors()));
    }
    for field in class.fields() {
        println!("  {}", field);
    }
}

fn cmd_configured(config: Option<PathBuf>) -> ExitCode {
    let settings = match config {
        Some(path) => Settings::from_file(path),
        None => Settings::load(),
    };
    let settings = match settings {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Error loading settings: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let registry = match ModelRegistry::from_settings(&settings) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let cache = ModelCache::new();
    match cache.get_or_build(&registry) {
        Ok(model) => {
            print_summary(&model);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
