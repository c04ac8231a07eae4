use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use pixi_panel::commands::{self, config::Config, services::build_service};
use pixi_panel::project::InitOptions;
use pixi_panel::runtime::RealRuntime;

/// pixi-panel - inspect a pixi project's environments, features and tasks
///
/// Without --catalog a built-in demo project is shown.
///
/// Examples:
///   pixi-panel info                  # Project overview
///   pixi-panel packages -e dev       # Packages resolved for the dev environment
///   pixi-panel run test              # Run a task and follow its progress
#[derive(Parser, Debug)]
#[command(author, version = env!("PIXI_PANEL_VERSION"), about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// JSON project snapshot to read (also via PIXI_PANEL_CATALOG)
    #[arg(
        long = "catalog",
        short = 'c',
        env = "PIXI_PANEL_CATALOG",
        value_name = "PATH",
        global = true
    )]
    pub catalog: Option<PathBuf>,

    /// Skip the simulated operation delays (also via PIXI_PANEL_NO_DELAY)
    #[arg(long = "no-delay", env = "PIXI_PANEL_NO_DELAY", global = true)]
    pub no_delay: bool,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Show the project overview
    Info,

    /// List the packages resolved for an environment
    Packages(PackagesArgs),

    /// List the features an environment is composed of
    Features(FeaturesArgs),

    /// List the available tasks
    Tasks,

    /// Run a task
    Run(RunArgs),

    /// Stop the running task
    Stop,

    /// Initialize a new project
    Init(InitArgs),

    /// Open the configuration for editing
    Edit,

    /// Re-initialize the project
    Reinit,

    /// Export the project configuration as JSON
    Export(ExportArgs),

    /// Add a package to a feature
    Add(AddArgs),

    /// Run a pixi command
    Exec(ExecArgs),
}

#[derive(clap::Args, Debug)]
pub struct PackagesArgs {
    /// Environment to resolve (defaults to the current environment)
    #[arg(long, short = 'e', value_name = "NAME")]
    pub environment: Option<String>,
}

#[derive(clap::Args, Debug)]
pub struct FeaturesArgs {
    /// Environment name
    #[arg(value_name = "ENVIRONMENT")]
    pub environment: String,
}

#[derive(clap::Args, Debug)]
pub struct RunArgs {
    /// Task name
    #[arg(value_name = "TASK")]
    pub task: String,
}

#[derive(clap::Args, Debug)]
pub struct InitArgs {
    /// Project name
    #[arg(value_name = "NAME")]
    pub name: String,

    /// Project description
    #[arg(long, short = 'd')]
    pub description: Option<String>,

    /// Python version
    #[arg(long = "python", value_name = "VERSION")]
    pub python_version: Option<String>,

    /// Initial packages (can be specified multiple times)
    #[arg(long = "package", short = 'p', value_name = "PACKAGE")]
    pub packages: Vec<String>,
}

#[derive(clap::Args, Debug)]
pub struct ExportArgs {
    /// Write to this file instead of stdout
    #[arg(long, short = 'o', value_name = "FILE")]
    pub output: Option<PathBuf>,
}

#[derive(clap::Args, Debug)]
pub struct AddArgs {
    /// Package to add
    #[arg(value_name = "PACKAGE")]
    pub package: String,

    /// Feature to add the package to
    #[arg(long, short = 'f', value_name = "FEATURE")]
    pub feature: String,
}

#[derive(clap::Args, Debug)]
pub struct ExecArgs {
    /// Command name
    #[arg(value_name = "COMMAND")]
    pub command: String,

    /// Command arguments
    #[arg(value_name = "ARGS", trailing_var_arg = true, allow_hyphen_values = true)]
    pub args: Vec<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();
    let runtime = Arc::new(RealRuntime);
    let config = Config::new(runtime.as_ref(), cli.catalog, cli.no_delay);
    let service = build_service(runtime.clone(), &config);

    match cli.command {
        Commands::Info => commands::info(&service).await?,
        Commands::Packages(args) => {
            commands::packages(&service, args.environment.as_deref()).await?
        }
        Commands::Features(args) => commands::features(&service, &args.environment).await?,
        Commands::Tasks => commands::tasks(&service).await?,
        Commands::Run(args) => commands::run(&service, &args.task).await?,
        Commands::Stop => commands::stop(&service).await?,
        Commands::Init(args) => {
            let options = InitOptions {
                name: args.name,
                description: args.description,
                python_version: args.python_version,
                initial_packages: args.packages,
            };
            commands::init(&service, &options).await?
        }
        Commands::Edit => commands::edit(&service).await?,
        Commands::Reinit => commands::reinit(&service).await?,
        Commands::Export(args) => {
            commands::export(runtime.as_ref(), &service, args.output.as_deref()).await?
        }
        Commands::Add(args) => commands::add(&service, &args.package, &args.feature).await?,
        Commands::Exec(args) => commands::exec(&service, &args.command, &args.args).await?,
    }
    Ok(())
}
