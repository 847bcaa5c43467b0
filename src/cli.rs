//! Command-line interface definition using clap

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use crate::problems::selector::Filter;

/// Practice coding exercises from a local problem bank
#[derive(Parser, Debug)]
#[command(name = "drillbook")]
#[command(version)]
#[command(about = "Browse, pick, scaffold and track coding exercises")]
pub struct Cli {
    /// Config file (TOML); defaults to $DRILLBOOK_CONFIG or the platform data directory
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Args, Debug, Clone, Default)]
pub struct FilterArgs {
    /// Exact difficulty level
    #[arg(short, long)]
    pub difficulty: Option<u32>,

    #[arg(long)]
    pub category: Option<String>,

    #[arg(short, long)]
    pub topic: Option<String>,

    /// Match problems carrying any of these tags (repeatable)
    #[arg(long = "tag", value_name = "TAG")]
    pub tags: Vec<String>,
}

impl FilterArgs {
    pub fn to_filter(&self) -> Filter {
        Filter {
            difficulty: self.difficulty,
            category: self.category.clone(),
            topic: self.topic.clone(),
            tags: if self.tags.is_empty() { None } else { Some(self.tags.clone()) },
        }
    }
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Pick from the local problem bank
    #[default]
    Local,
    /// Ask the text-generation service for a new problem
    Generate,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Pick one problem (random, or today's with --daily) or generate a new one
    Pick {
        #[arg(short, long, value_enum, default_value_t = Mode::Local)]
        mode: Mode,

        #[command(flatten)]
        filter: FilterArgs,

        /// Deterministic pick for today and this filter combination
        #[arg(long)]
        daily: bool,

        /// Extra context for generate mode
        #[arg(long, default_value = "")]
        context: String,

        /// Run a countdown timer after picking
        #[arg(long)]
        timer: bool,

        /// Countdown length; defaults to the problem's estimate
        #[arg(long, requires = "timer")]
        minutes: Option<u32>,

        /// Create the solution starter file
        #[arg(long)]
        scaffold: bool,
    },

    /// List problems matching the filters
    List {
        #[command(flatten)]
        filter: FilterArgs,
    },

    /// Print one problem in full
    Show {
        id: String,
    },

    /// Show the available categories and topics
    Catalog,

    /// Mark a problem as solved
    Solve {
        id: String,
    },

    /// Log an attempt with optional notes
    Attempt {
        id: String,

        #[arg(short, long, default_value = "")]
        notes: String,
    },

    /// Solved count and recent attempts
    Status,

    /// Overwrite a problem's solution file with your edited version
    SaveSolution {
        id: String,

        /// File holding the edited solution
        #[arg(long, value_name = "FILE")]
        from: PathBuf,
    },
}
