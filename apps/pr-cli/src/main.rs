mod error;
mod report;

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use pr_core::NodeId;
use pr_solver::{
    DEFAULT_INCREMENTS, FrontierConfig, Objective, PressureTable, build_bounds, build_frontier,
    select_target_route, solve_objective,
};
use pr_survey::{CompiledSurvey, compile_survey, load_survey};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use crate::error::{AppError, AppResult};

#[derive(Parser)]
#[command(name = "pr-cli")]
#[command(about = "PipeRoute CLI - pipeline corridor route optimization", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a survey file and report its graph size
    Validate {
        /// Path to the survey YAML or JSON file
        survey_path: PathBuf,
    },
    /// Print per-node metric envelopes and linkages
    Bounds {
        survey_path: PathBuf,
        #[arg(long)]
        json: bool,
    },
    /// Solve the route minimizing one objective
    Route {
        survey_path: PathBuf,
        /// cost, length or pressure-loss
        #[arg(long, default_value = "cost")]
        objective: Objective,
        #[arg(long)]
        json: bool,
    },
    /// Find a route whose cumulative pressure loss is near a target
    Target {
        survey_path: PathBuf,
        /// Target cumulative pressure loss, psi
        #[arg(long)]
        pressure_loss: f64,
        /// Quantization buckets per psi
        #[arg(long, default_value_t = 10)]
        resolution: u32,
        /// Fail if any feasibility set grows past this many entries
        #[arg(long)]
        max_set_size: Option<usize>,
        /// Build frontier layers in parallel
        #[arg(long)]
        parallel: bool,
        #[arg(long)]
        json: bool,
    },
    /// Print a node's length/hill pressure-loss table
    Tables {
        survey_path: PathBuf,
        #[arg(long)]
        node: u32,
        #[arg(long, default_value_t = DEFAULT_INCREMENTS)]
        increments: usize,
        #[arg(long)]
        json: bool,
    },
}

fn main() -> AppResult<()> {
    init_tracing();

    let cli = Cli::parse();

    match cli.command {
        Commands::Validate { survey_path } => cmd_validate(&survey_path),
        Commands::Bounds { survey_path, json } => cmd_bounds(&survey_path, json),
        Commands::Route {
            survey_path,
            objective,
            json,
        } => cmd_route(&survey_path, objective, json),
        Commands::Target {
            survey_path,
            pressure_loss,
            resolution,
            max_set_size,
            parallel,
            json,
        } => {
            let config = FrontierConfig {
                resolution,
                max_set_size,
                parallel_layers: parallel,
            };
            cmd_target(&survey_path, pressure_loss, &config, json)
        }
        Commands::Tables {
            survey_path,
            node,
            increments,
            json,
        } => cmd_tables(&survey_path, node, increments, json),
    }
}

/// Logs go to stderr so stdout stays machine-readable.
fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .finish();

    let _ = tracing::subscriber::set_global_default(subscriber);
}

fn load(survey_path: &Path) -> AppResult<CompiledSurvey> {
    let wrap = |source: pr_survey::SurveyError| AppError::Survey {
        path: survey_path.to_path_buf(),
        source,
    };
    let survey = load_survey(survey_path).map_err(wrap)?;
    let compiled = compile_survey(&survey).map_err(wrap)?;
    tracing::info!(
        survey = %survey.name,
        nodes = compiled.graph.node_count(),
        edges = compiled.graph.edge_count(),
        "survey loaded"
    );
    Ok(compiled)
}

fn print_json<T: serde::Serialize>(value: &T) -> AppResult<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn cmd_validate(survey_path: &Path) -> AppResult<()> {
    println!("Validating survey: {}", survey_path.display());
    let compiled = load(survey_path)?;
    println!("✓ Survey is valid");
    println!("  Strips: {}", compiled.strips.len());
    println!("  Nodes: {}", compiled.graph.node_count());
    println!("  Edges: {}", compiled.graph.edge_count());
    println!(
        "  Pressure loss: alpha {:.6} psi/ft, beta {:.6} psi/ft",
        compiled.coefficients.alpha, compiled.coefficients.beta
    );
    Ok(())
}

fn cmd_bounds(survey_path: &Path, json: bool) -> AppResult<()> {
    let compiled = load(survey_path)?;
    let bounds = build_bounds(&compiled.graph, &compiled.costs)?;

    if json {
        return print_json(&bounds);
    }
    print!(
        "{}",
        report::limits_and_linkages(&compiled.graph, &compiled.costs, &bounds)?
    );
    Ok(())
}

fn cmd_route(survey_path: &Path, objective: Objective, json: bool) -> AppResult<()> {
    let compiled = load(survey_path)?;
    let route = solve_objective(&compiled.graph, &compiled.costs, objective)?;

    if json {
        return print_json(&route);
    }
    print!("{}", report::route(&route));
    Ok(())
}

fn cmd_target(
    survey_path: &Path,
    target: f64,
    config: &FrontierConfig,
    json: bool,
) -> AppResult<()> {
    let compiled = load(survey_path)?;
    let (graph, costs) = (&compiled.graph, &compiled.costs);

    let frontier = build_frontier(graph, costs, config)?;
    let route = select_target_route(graph, costs, &frontier, target)?;
    let achieved = route.totals().pressure_loss;
    tracing::info!(target, achieved, error = achieved - target, "target route");

    if json {
        return print_json(&route);
    }
    print!("{}", report::frontier_summary(&frontier, graph.sink()));
    print!("{}", report::route(&route));
    Ok(())
}

fn cmd_tables(survey_path: &Path, node: u32, increments: usize, json: bool) -> AppResult<()> {
    let compiled = load(survey_path)?;
    let count = compiled.graph.node_count();
    if node as usize >= count {
        return Err(AppError::NodeOutOfRange { node, count });
    }

    let bounds = build_bounds(&compiled.graph, &compiled.costs)?;
    let id = NodeId::from_index(node);
    let table = PressureTable::from_bounds(&bounds[id.idx()], compiled.coefficients, increments)
        .ok_or(AppError::NoPressureTable { node })?;

    if json {
        return print_json(&table);
    }
    print!("{}", report::pressure_table(id, &table));
    Ok(())
}
