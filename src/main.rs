use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use tracing::{debug, info};

use tracker_macros::app::{handle_fatal_error, init_logging, AppConfig};
use tracker_macros::config::{parse_parameter, RunConfig};
use tracker_macros::error::{ErrorCode, MacroError};
use tracker_macros::macros::{CurrentUser, MacroContext, MacroKind};
use tracker_macros::params::ParameterOverrides;
use tracker_macros::project::InMemoryProject;

/// Render project-tracking report macros
#[derive(Parser)]
#[command(name = "tracker-macros")]
#[command(about = "Render velocity, burndown and what-if report macros", long_about = None)]
struct Cli {
    /// Enable verbose output (-v for debug, -vv for trace, -vvv for all)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a macro against a project fixture and print the rendered block
    Run(RunArgs),
    /// List the available macros and their parameters
    List,
}

#[derive(Args)]
struct RunArgs {
    /// Macro to run (release_metrics, iteration_burndown, what_if)
    macro_kind: Option<MacroKind>,

    /// YAML project fixture
    #[arg(long)]
    project: Option<PathBuf>,

    /// Parameter override, repeatable
    #[arg(short = 'p', long = "param", value_parser = parse_parameter)]
    params: Vec<(String, String)>,

    /// Login of the user the macro runs for
    #[arg(long)]
    user: Option<String>,

    /// TOML run file supplying any of the above
    #[arg(short = 'c', long)]
    config: Option<PathBuf>,
}

fn main() {
    let cli = Cli::parse();
    let verbose = cli.verbose;

    let result = match cli.command {
        Commands::Run(args) => run_macro(args, verbose),
        Commands::List => {
            init_logging(&AppConfig::new(verbose));
            list_macros()
        }
    };

    if let Err(e) = result {
        handle_fatal_error(e, verbose);
    }
}

fn run_macro(args: RunArgs, verbose: u8) -> anyhow::Result<()> {
    let run = match &args.config {
        Some(path) => RunConfig::load(path)?,
        None => RunConfig::default(),
    };
    init_logging(&AppConfig::new(verbose).with_log_level(run.log_level.clone()));

    let kind = match args.macro_kind {
        Some(kind) => kind,
        None => run.macro_kind()?.ok_or_else(|| {
            MacroError::validation_with_code(
                ErrorCode::VALIDATION_INVALID_PARAMETER,
                "no macro given on the command line or in the run file",
                Some("macro".to_string()),
            )
        })?,
    };
    let project_path = args.project.or_else(|| run.project.clone()).ok_or_else(|| {
        MacroError::config_with_code(
            ErrorCode::CONFIG_MISSING_REQUIRED,
            "no project fixture given, pass --project or set `project` in the run file",
            None,
        )
    })?;

    let project = InMemoryProject::load(&project_path)?;
    let parameters: ParameterOverrides = run.merged_parameters(args.params);
    let login = args
        .user
        .or_else(|| run.user.clone())
        .or_else(|| std::env::var("USER").ok())
        .unwrap_or_else(|| "anonymous".to_string());
    let user = CurrentUser::from_login(login);

    info!(
        macro_name = kind.name(),
        project = %project_path.display(),
        parameters = parameters.len(),
        "running macro"
    );
    let ctx = MacroContext::new(&parameters, &project, &user);
    let block = kind.build(&ctx)?.execute();
    debug!(queries = ?project.executed_queries(), "queries issued");

    print!("{}", block);
    Ok(())
}

fn list_macros() -> anyhow::Result<()> {
    let project = InMemoryProject::new(chrono::Local::now().date_naive());
    let parameters = ParameterOverrides::new();
    let user = CurrentUser::from_login("anonymous");
    let ctx = MacroContext::new(&parameters, &project, &user);

    for kind in MacroKind::ALL {
        let built = kind.build(&ctx)?;
        println!("{} ({})", kind, built.title());
        for (metric, source) in built.resolver().describe() {
            println!("  {:<26} {}", metric, source);
        }
        for (alias, metric) in built.resolver().aliases() {
            println!("  {:<26} alias of {}", alias, metric);
        }
    }
    Ok(())
}
