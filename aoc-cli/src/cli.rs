//! Command-line arguments

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// How work is spread over the thread pool
#[derive(Debug, Clone, Copy, Default, ValueEnum, PartialEq, Eq)]
pub enum ParallelizeBy {
    /// Run every day and part in order on the calling thread
    Sequential,
    /// One task per day; parts of a day share one parse
    #[default]
    Day,
    /// One task per part; each part parses its own copy of the input
    Part,
}

/// Run the Advent of Code solvers
#[derive(Parser, Debug)]
#[command(name = "aoc", about = "Run Advent of Code solvers", version)]
pub struct Args {
    /// Only run this year
    #[arg(short, long)]
    pub year: Option<u16>,

    /// Only run this day
    #[arg(short, long, value_parser = clap::value_parser!(u8).range(1..=25))]
    pub day: Option<u8>,

    /// Only run this part
    #[arg(short, long, value_parser = clap::value_parser!(u8).range(1..=2))]
    pub part: Option<u8>,

    /// Only run solvers carrying all of these tags (comma-separated)
    #[arg(short, long, value_delimiter = ',')]
    pub tags: Vec<String>,

    /// Directory holding cached puzzle inputs
    #[arg(long, default_value = "~/.cache/aoc_solver")]
    pub cache_dir: PathBuf,

    /// Read the input of the single selected day from this file
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Worker threads (defaults to the available parallelism)
    #[arg(long)]
    pub threads: Option<usize>,

    #[arg(long, value_enum, default_value_t = ParallelizeBy::Day)]
    pub parallelize_by: ParallelizeBy,

    /// Print bare answers only
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Log debug diagnostics to stderr
    #[arg(short, long)]
    pub verbose: bool,
}
