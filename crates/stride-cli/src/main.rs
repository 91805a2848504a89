mod config;
mod graph_cmd;
mod order_cmd;
mod query_cmds;
mod status_cmd;
mod validate_cmd;

use std::path::PathBuf;

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;

use stride_core::step::source::{DirectorySource, StepSource};
use stride_core::step::Step;

#[derive(Parser)]
#[command(name = "stride", about = "Dependency-aware task plan manager")]
struct Cli {
    /// Plan directory (overrides STRIDE_PLAN_DIR env var and config file)
    #[arg(long, global = true)]
    dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Write a stride config file
    Init {
        /// Plan directory to record in the config
        #[arg(long, default_value = config::DEFAULT_PLAN_DIR)]
        plan_dir: String,
        /// Overwrite existing config file
        #[arg(long)]
        force: bool,
    },
    /// Validate the plan's structure and dependencies
    Validate {
        /// Emit the report as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show the dependency graph: roots, leaves, edges, cycles
    Graph {
        /// Emit the graph as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show the execution order and its parallel levels
    Order {
        /// Emit the order as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show the critical path (longest dependency chain)
    CriticalPath {
        /// Emit the path as JSON
        #[arg(long)]
        json: bool,
    },
    /// List steps ready to start (pending, all dependencies completed)
    Ready {
        /// Emit the list as JSON
        #[arg(long)]
        json: bool,
    },
    /// List the steps directly blocked by a step
    Blocked {
        /// Step number to inspect
        step: u32,
        /// Emit the list as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show the full transitive prerequisite chain of a step
    Deps {
        /// Step number to inspect
        step: u32,
        /// Emit the chain as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show per-step status and plan progress
    Status {
        /// Emit the listing as JSON
        #[arg(long)]
        json: bool,
    },
    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        shell: Shell,
    },
}

/// Execute the `stride init` command: write the config file.
fn cmd_init(plan_dir: &str, force: bool) -> Result<()> {
    let path = config::config_path();

    if path.exists() && !force {
        anyhow::bail!(
            "config file already exists at {}\nUse --force to overwrite.",
            path.display()
        );
    }

    let cfg = config::ConfigFile {
        plan: config::PlanSection {
            dir: plan_dir.to_string(),
        },
    };
    config::save_config(&cfg)?;

    println!("Config written to {}", path.display());
    println!("  plan.dir = {plan_dir}");

    Ok(())
}

/// Load the plan's steps from the resolved directory.
async fn load_plan(cli_dir: Option<&PathBuf>) -> Result<Vec<Step>> {
    let dir = config::resolve_plan_dir(cli_dir);
    tracing::debug!(dir = %dir.display(), "loading plan directory");
    DirectorySource::new(dir).load_steps().await
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Init { plan_dir, force } => {
            cmd_init(&plan_dir, force)?;
        }
        Commands::Validate { json } => {
            let steps = load_plan(cli.dir.as_ref()).await?;
            validate_cmd::run_validate(&steps, json)?;
        }
        Commands::Graph { json } => {
            let steps = load_plan(cli.dir.as_ref()).await?;
            graph_cmd::run_graph(&steps, json)?;
        }
        Commands::Order { json } => {
            let steps = load_plan(cli.dir.as_ref()).await?;
            order_cmd::run_order(&steps, json)?;
        }
        Commands::CriticalPath { json } => {
            let steps = load_plan(cli.dir.as_ref()).await?;
            order_cmd::run_critical_path(&steps, json)?;
        }
        Commands::Ready { json } => {
            let steps = load_plan(cli.dir.as_ref()).await?;
            query_cmds::run_ready(&steps, json)?;
        }
        Commands::Blocked { step, json } => {
            let steps = load_plan(cli.dir.as_ref()).await?;
            query_cmds::run_blocked(&steps, step, json)?;
        }
        Commands::Deps { step, json } => {
            let steps = load_plan(cli.dir.as_ref()).await?;
            query_cmds::run_deps(&steps, step, json)?;
        }
        Commands::Status { json } => {
            let steps = load_plan(cli.dir.as_ref()).await?;
            status_cmd::run_status(&steps, json)?;
        }
        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            clap_complete::generate(shell, &mut cmd, "stride", &mut std::io::stdout());
        }
    }

    Ok(())
}
