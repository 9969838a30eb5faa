//! react-lib CLI - Scaffolding for React UI libraries in an Nx workspace

use anyhow::Result;
use clap::{Args as ClapArgs, Parser, Subcommand};
use schematics_core::{ConfigureArgs, GenerateArgs, LibraryOptions, ProductConfig, ScaffoldRequest};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// CLI version
pub const CLI_VERSION: &str = env!("CARGO_PKG_VERSION");

/// react-lib product configuration
#[derive(Clone)]
pub struct ReactLibConfig;

impl ProductConfig for ReactLibConfig {
    fn name(&self) -> &'static str {
        "react-lib"
    }

    fn display_name(&self) -> &'static str {
        "react-lib"
    }

    fn template_dir_env(&self) -> &'static str {
        "REACT_LIB_TEMPLATE_DIR"
    }

    fn upgrade_command(&self) -> &'static str {
        "cargo install react-lib --force"
    }

    fn next_steps(&self, root: &Path, request: &ScaffoldRequest) -> Vec<String> {
        let mut steps = Vec::new();
        let current = std::env::current_dir().ok();

        // Step 1: cd to the workspace if not current
        if current.as_deref() != Some(root) && root != Path::new(".") {
            steps.push(format!("cd {}", root.display()));
        }

        steps.push(format!("Add components under {}/src/lib", request.project_root()));
        let project = LibraryOptions::for_library(request.name()).project_name();
        steps.push(format!("ng test {}", project));

        steps
    }
}

#[derive(Parser, Debug)]
#[command(name = "react-lib")]
#[command(about = "CLI for scaffolding React UI libraries")]
#[command(version)]
#[command(args_conflicts_with_subcommands = true)]
pub struct Args {
    /// Show debug diagnostics
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Command>,

    #[command(flatten)]
    pub generate: CliGenerateArgs,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Generate a new React library (default)
    Generate(CliGenerateArgs),
    /// Re-apply the React compiler options to an existing library
    Configure(CliConfigureArgs),
}

#[derive(ClapArgs, Debug, Clone)]
pub struct CliGenerateArgs {
    /// Library name (e.g. ui or shared/ui)
    pub name: Option<String>,

    /// JSON options file; only its "name" field is used
    #[arg(long)]
    pub options: Option<PathBuf>,

    /// Workspace root
    #[arg(long, default_value = ".")]
    pub root: PathBuf,

    /// Local directory to use for library templates instead of the builtin set
    #[arg(long = "template-dir")]
    pub template_dir: Option<PathBuf>,

    /// Report the changes without writing them
    #[arg(long = "dry-run")]
    pub dry_run: bool,

    /// Auto-confirm all prompts (non-interactive mode)
    #[arg(short, long)]
    pub yes: bool,
}

impl From<CliGenerateArgs> for GenerateArgs {
    fn from(args: CliGenerateArgs) -> Self {
        GenerateArgs {
            name: args.name,
            options: args.options,
            root: args.root,
            template_dir: args.template_dir,
            dry_run: args.dry_run,
            yes: args.yes,
        }
    }
}

#[derive(ClapArgs, Debug)]
pub struct CliConfigureArgs {
    /// Name of the library to configure
    pub name: String,

    /// Workspace root
    #[arg(long, default_value = ".")]
    pub root: PathBuf,

    /// Report the changes without writing them
    #[arg(long = "dry-run")]
    pub dry_run: bool,
}

impl From<CliConfigureArgs> for ConfigureArgs {
    fn from(args: CliConfigureArgs) -> Self {
        ConfigureArgs {
            name: args.name,
            root: args.root,
            dry_run: args.dry_run,
        }
    }
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn generate(config: &ReactLibConfig, args: CliGenerateArgs) -> Result<()> {
    // Interactive prompts unless auto-confirm was requested
    if args.yes {
        return schematics_core::workflow::run(config, args.into(), CLI_VERSION);
    }

    let result = schematics_core::run(config, args.into(), CLI_VERSION);

    // Ensure cursor is visible on normal exit
    let _ = console::Term::stderr().show_cursor();

    result
}

fn main() -> Result<()> {
    // Ensure terminal cursor is restored on panic
    let default_panic = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = console::Term::stderr().show_cursor();
        default_panic(info);
    }));

    // Handle Ctrl+C gracefully
    ctrlc::set_handler(move || {
        let _ = console::Term::stderr().show_cursor();
        std::process::exit(130);
    })
    .ok();

    let args = Args::parse();
    init_logging(args.verbose);
    let config = ReactLibConfig;

    tracing::debug!(product = config.name(), version = CLI_VERSION, "starting");

    match args.command {
        Some(Command::Generate(generate_args)) => generate(&config, generate_args),
        Some(Command::Configure(configure_args)) => {
            schematics_core::workflow::run_configure(configure_args.into())
        }
        // No subcommand provided, default to generate behavior
        None => generate(&config, args.generate),
    }
}
