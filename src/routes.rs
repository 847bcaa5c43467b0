use std::io::Write;
use std::path::Path;
use std::time::{Duration, Instant};
use crate::cli::Mode;
use crate::error::DrillError;
use crate::problems::problem::Problem;
use crate::problems::{selector, store};
use crate::problems::selector::Filter;
use crate::state::app::AppState;
use crate::state::session::{format_remaining, SessionState};

pub const NO_MATCH_MESSAGE: &str = "No matching problem found.";
const DEFAULT_GENERATE_TOPIC: &str = "scanpy";
const DEFAULT_GENERATE_DIFFICULTY: u32 = 1;
const RECENT_ATTEMPTS: usize = 5;

#[derive(Debug, Clone, Default)]
pub struct PickRequest {
    pub mode: Mode,
    pub filter: Filter,
    pub daily: bool,
    pub context: String,
    /// `Some` runs the countdown; the inner value overrides the problem's estimate
    pub timer: Option<Option<u32>>,
    pub scaffold: bool,
}

fn problem_line(state: &AppState, solved: bool, problem: &Problem) -> String {
    let mark = if solved { "✅" } else { "⬜" };
    let focus = if problem.mentions_any(&state.config.focus_keywords) { " 🌱" } else { "" };
    format!("{}{} {} — {} (d{}, {}/{})", mark, focus, problem.id, problem.title, problem.difficulty, problem.category, problem.topic)
}

/// Blocking countdown on `out`, one update per second.
pub fn run_countdown<W: Write>(session: &mut SessionState, minutes: u32, out: &mut W) -> Result<(), DrillError> {
    session.timer.start(minutes, Instant::now());
    tracing::info!(minutes, "Timer started");

    loop {
        let now = Instant::now();
        let Some(remaining) = session.timer.remaining(now) else {
            break;
        };
        if remaining.is_zero() {
            writeln!(out, "\r⏰ Time's up!          ")?;
            break;
        }
        let pct = (session.timer.fraction_elapsed(now) * 100.0).round();
        write!(out, "\r⏳ Remaining: {} ({:>3}%)", format_remaining(remaining), pct)?;
        out.flush()?;
        std::thread::sleep(remaining.min(Duration::from_secs(1)));
    }

    session.timer.reset();
    Ok(())
}

fn generate<W: Write>(state: &AppState, req: &PickRequest, out: &mut W) -> Result<(), DrillError> {
    let difficulty = req.filter.difficulty.unwrap_or(DEFAULT_GENERATE_DIFFICULTY);
    let topic = req.filter.topic.as_deref().unwrap_or(DEFAULT_GENERATE_TOPIC);
    let text = state.generator.generate(difficulty, topic, &req.context);
    writeln!(out, "{}", text)?;
    Ok(())
}

/// Pick one problem and optionally scaffold it and run the timer.
/// Returns the picked problem, `None` in generate mode or when nothing matches.
pub fn pick<W: Write, E: Write>(
    state: &AppState,
    session: &mut SessionState,
    req: &PickRequest,
    out: &mut W,
    timer_out: &mut E,
) -> Result<Option<Problem>, DrillError> {
    if req.mode == Mode::Generate {
        generate(state, req, out)?;
        return Ok(None);
    }

    let problems = state.problems.load()?;
    let candidates = selector::filter(&problems, &req.filter);
    let chosen = if req.daily {
        selector::choose_stable_daily(&candidates, &req.filter.salt())
    } else {
        selector::choose_random(&candidates)
    };

    let Some(problem) = chosen.cloned() else {
        writeln!(out, "{}", NO_MATCH_MESSAGE)?;
        return Ok(None);
    };
    session.select(problem.id.clone());

    writeln!(out, "[{}] {}\n", problem.id, problem.title)?;
    writeln!(out, "{}", problem.description.trim_end())?;

    if req.scaffold {
        let path = state.scaffolder.ensure(&problem)?;
        writeln!(out, "\nSolution file: {}", path.display())?;
    }

    if let Some(minutes) = req.timer {
        let minutes = minutes.unwrap_or_else(|| problem.minutes_or(state.config.default_minutes));
        run_countdown(session, minutes, timer_out)?;
    }

    Ok(Some(problem))
}

pub fn list<W: Write>(state: &AppState, filter: &Filter, out: &mut W) -> Result<usize, DrillError> {
    let problems = state.problems.load()?;
    let progress = state.progress.load();
    let matches = selector::filter(&problems, filter);

    if matches.is_empty() {
        writeln!(out, "No problems found for selected filters.")?;
        return Ok(0);
    }
    for problem in &matches {
        writeln!(out, "{}", problem_line(state, progress.is_solved(&problem.id), problem))?;
    }
    Ok(matches.len())
}

pub fn show<W: Write>(state: &AppState, id: &str, out: &mut W) -> Result<bool, DrillError> {
    let problems = state.problems.load()?;
    let Some(problem) = store::find_by_id(&problems, id) else {
        writeln!(out, "No problem with id '{}'.", id)?;
        return Ok(false);
    };
    let progress = state.progress.load();

    writeln!(out, "{}", problem_line(state, progress.is_solved(id), problem))?;
    writeln!(out, "Tags: {}", problem.tags_joined())?;
    if let Some(minutes) = problem.est_time_min {
        writeln!(out, "Estimated time: {} min", minutes)?;
    }
    writeln!(out, "Attempts: {}", progress.attempts_for(id).count())?;
    writeln!(out, "\n{}", problem.description.trim_end())?;
    Ok(true)
}

pub fn catalog<W: Write>(state: &AppState, out: &mut W) -> Result<(), DrillError> {
    let problems = state.problems.load()?;
    writeln!(out, "Categories: {}", store::categories(&problems).join(", "))?;
    writeln!(out, "Topics: {}", store::topics(&problems).join(", "))?;
    Ok(())
}

/// Progress is only recorded against ids the bank knows about.
fn in_bank<W: Write>(state: &AppState, id: &str, out: &mut W) -> Result<bool, DrillError> {
    let problems = state.problems.load()?;
    if store::find_by_id(&problems, id).is_some() {
        return Ok(true);
    }
    tracing::debug!(id = %id, "Refusing to record progress for unknown id");
    writeln!(out, "No problem with id '{}'.", id)?;
    Ok(false)
}

pub fn solve<W: Write>(state: &AppState, id: &str, out: &mut W) -> Result<(), DrillError> {
    if !in_bank(state, id, out)? {
        return Ok(());
    }
    let mut progress = state.progress.load();
    if progress.mark_solved(id) {
        state.progress.save(&progress)?;
        writeln!(out, "✅ Marked {} as solved ({} solved).", id, progress.solved_count())?;
    } else {
        writeln!(out, "{} was already solved.", id)?;
    }
    Ok(())
}

pub fn attempt<W: Write>(state: &AppState, id: &str, notes: &str, out: &mut W) -> Result<(), DrillError> {
    if !in_bank(state, id, out)? {
        return Ok(());
    }
    let mut progress = state.progress.load();
    progress.log_attempt(id, notes);
    state.progress.save(&progress)?;
    writeln!(out, "Logged attempt for {} ({} total).", id, progress.attempts_for(id).count())?;
    Ok(())
}

pub fn status<W: Write>(state: &AppState, out: &mut W) -> Result<(), DrillError> {
    let problems = state.problems.load()?;
    let progress = state.progress.load();

    writeln!(out, "✅ Solved: {}/{}", progress.solved_count(), problems.len())?;
    if progress.attempts.is_empty() {
        writeln!(out, "No attempts logged yet.")?;
        return Ok(());
    }
    writeln!(out, "Recent attempts:")?;
    for a in progress.attempts.iter().rev().take(RECENT_ATTEMPTS) {
        if a.notes.is_empty() {
            writeln!(out, "  {}  {}", a.ts, a.id)?;
        } else {
            writeln!(out, "  {}  {}  {}", a.ts, a.id, a.notes)?;
        }
    }
    Ok(())
}

pub fn save_solution<W: Write>(state: &AppState, id: &str, from: &Path, out: &mut W) -> Result<(), DrillError> {
    let content = std::fs::read_to_string(from)
        .map_err(|e| DrillError::scaffold(format!("Failed to read edited solution: {}", e))
            .with_context(format!("path: {:?}", from)))?;
    let path = state.scaffolder.save(id, &content)?;
    writeln!(out, "Saved {}", path.display())?;
    Ok(())
}
