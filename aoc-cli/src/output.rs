//! Printing results and the closing summary

use crate::executor::SolverResult;
use chrono::TimeDelta;
use std::time::Instant;

pub struct OutputFormatter {
    quiet: bool,
    started: Instant,
}

impl OutputFormatter {
    pub fn new(quiet: bool) -> Self {
        Self {
            quiet,
            started: Instant::now(),
        }
    }

    pub fn print_result(&self, result: &SolverResult) {
        match (&result.answer, self.quiet) {
            (Ok(answer), true) => println!("{answer}"),
            (Ok(_), false) => println!("{}", render_result(result)),
            (Err(_), _) => eprintln!("{}", render_result(result)),
        }
    }

    /// Counts and timings; wall-clock time is measured from construction
    pub fn print_summary(&self, results: &[SolverResult]) {
        if self.quiet {
            return;
        }
        let elapsed = TimeDelta::from_std(self.started.elapsed()).unwrap_or(TimeDelta::MAX);
        println!();
        for line in summary(results, elapsed) {
            println!("{line}");
        }
    }
}

/// `2022/01 Part 1: 24000 (parse: 12µs, solve: 3µs)`
pub fn render_result(result: &SolverResult) -> String {
    let prefix = format!("{}/{:02} Part {}", result.year, result.day, result.part);
    match &result.answer {
        Ok(answer) => {
            let parse = result
                .parse_duration
                .map(|d| format!("parse: {}, ", format_duration(d)))
                .unwrap_or_default();
            format!(
                "{prefix}: {answer} ({parse}solve: {})",
                format_duration(result.solve_duration)
            )
        }
        Err(e) => format!("{prefix}: Error - {e}"),
    }
}

fn summary(results: &[SolverResult], elapsed: TimeDelta) -> Vec<String> {
    let solved: Vec<&SolverResult> = results.iter().filter(|r| r.answer.is_ok()).collect();
    let parse: TimeDelta = solved.iter().filter_map(|r| r.parse_duration).sum();
    let solve: TimeDelta = solved.iter().map(|r| r.solve_duration).sum();

    let mut lines = vec![
        "--- Summary ---".to_string(),
        format!(
            "Solvers: {} solved, {} failed",
            solved.len(),
            results.len() - solved.len()
        ),
        format!("Total parse time: {}", format_duration(parse)),
        format!("Total solve time: {}", format_duration(solve)),
        format!("Elapsed wall-clock time: {}", format_duration(elapsed)),
    ];
    if let (Some(compute), Some(wall)) = ((parse + solve).num_microseconds(), elapsed.num_microseconds())
        && wall > 0
    {
        lines.push(format!("Speedup factor: {:.2}x", compute as f64 / wall as f64));
    }
    lines
}

fn format_duration(d: TimeDelta) -> String {
    let Some(micros) = d.num_microseconds() else {
        return "N/A".to_string();
    };
    if micros < 0 {
        return format!("-{}", format_duration(-d));
    }
    match micros {
        0..1_000 => format!("{micros}µs"),
        1_000..1_000_000 => format!("{:.2}ms", micros as f64 / 1_000.0),
        _ => format!("{:.2}s", micros as f64 / 1_000_000.0),
    }
}
