pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod perf;
pub mod problems;
pub mod progress;
pub mod routes;
pub mod scaffold;
pub mod state;

// Crate-internal tests
#[cfg(test)]
#[path = "../tests/unit/error_handling_test.rs"]
mod error_handling_test;
#[cfg(test)]
#[path = "../tests/unit/progress_internal_test.rs"]
mod progress_internal_test;
#[cfg(test)]
#[path = "../tests/unit/scaffold_internal_test.rs"]
mod scaffold_internal_test;

use clap::Parser;
use cli::{Cli, Commands};
use config::AppConfig;
use routes::PickRequest;
use state::app::AppState;
use state::session::SessionState;

/// Parse arguments, load settings, dispatch one command.
pub fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = AppConfig::load(cli.config.as_deref());
    logging::init_logging(config.log_format);
    tracing::debug!(command = ?cli.command, "drillbook starting");

    let state = AppState::new(config);
    let mut session = SessionState::new();
    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    match cli.command {
        Commands::Pick { mode, filter, daily, context, timer, minutes, scaffold } => {
            let req = PickRequest {
                mode,
                filter: filter.to_filter(),
                daily,
                context,
                timer: timer.then_some(minutes),
                scaffold,
            };
            routes::pick(&state, &mut session, &req, &mut out, &mut std::io::stderr())?;
        }
        Commands::List { filter } => {
            routes::list(&state, &filter.to_filter(), &mut out)?;
        }
        Commands::Show { id } => {
            routes::show(&state, &id, &mut out)?;
        }
        Commands::Catalog => routes::catalog(&state, &mut out)?,
        Commands::Solve { id } => routes::solve(&state, &id, &mut out)?,
        Commands::Attempt { id, notes } => routes::attempt(&state, &id, &notes, &mut out)?,
        Commands::Status => routes::status(&state, &mut out)?,
        Commands::SaveSolution { id, from } => routes::save_solution(&state, &id, &from, &mut out)?,
    }

    Ok(())
}
