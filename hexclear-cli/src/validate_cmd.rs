//! Validate command - check level files and confirm par is reachable
//!
//! ## Architecture (3-layer granularity)
//!
//! - Level 1: run() - orchestration
//! - Level 2: collect_level_files(), check_level()
//! - Level 3: verdict formatting

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Args;

use hexclear_core::Level;
use hexclear_solver::{solve, SolveOutcome, SolverConfig};

// ============================================================================
// COMMAND ARGUMENTS
// ============================================================================

#[derive(Args)]
pub struct ValidateArgs {
    /// Level files or directories of level files
    #[arg(value_name = "PATH", required = true)]
    pub paths: Vec<PathBuf>,

    /// Fail levels whose optimal move count differs from par
    #[arg(long)]
    pub strict_par: bool,

    /// Maximum states to explore per level
    #[arg(long, default_value = "500000")]
    pub max_states: usize,

    /// Time budget per level in milliseconds (unlimited if omitted)
    #[arg(long)]
    pub time_budget_ms: Option<u64>,

    /// Output results as JSON
    #[arg(long)]
    pub json: bool,
}

/// Outcome of checking one level file
#[derive(Clone, Debug, PartialEq, Eq)]
enum Verdict {
    /// Solvable and the optimal move count matches par
    Ok { optimal: u32 },
    /// Solvable but the optimal move count differs from par
    ParMismatch { optimal: u32, par: u32 },
    /// Search space exhausted without reaching a cleared board
    Unsolvable,
    /// Budget ran out before the search finished
    Inconclusive,
    /// File failed to parse or validate
    Invalid(String),
}

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

/// Run validate command
///
/// 1. Collect level files from the given paths
/// 2. Solve each level and judge the result against its par
/// 3. Summarize, failing the command if any level failed
pub fn run(args: ValidateArgs) -> Result<()> {
    let files = collect_level_files(&args.paths)?;
    if files.is_empty() {
        anyhow::bail!("no level files found");
    }

    tracing::info!("Validating {} level files", files.len());

    let config = SolverConfig {
        max_states: args.max_states,
        time_budget: args.time_budget_ms.map(Duration::from_millis),
        ..SolverConfig::default()
    };

    let mut verdicts = Vec::with_capacity(files.len());
    for path in &files {
        verdicts.push((path.clone(), check_level(path, &config)));
    }
    let failures = verdicts
        .iter()
        .filter(|(_, verdict)| is_failure(verdict, args.strict_par))
        .count();

    if args.json {
        print_json_results(&verdicts, failures);
    } else {
        print_text_results(&verdicts, failures);
    }

    if failures > 0 {
        anyhow::bail!("{} of {} levels failed validation", failures, files.len());
    }

    Ok(())
}

// ============================================================================
// LEVEL 2 - STEPS
// ============================================================================

/// Expand directories into their .json files, keeping explicit files as-is
fn collect_level_files(paths: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for path in paths {
        if path.is_dir() {
            let entries = std::fs::read_dir(path)
                .with_context(|| format!("Failed to read directory: {}", path.display()))?;

            let mut dir_files = Vec::new();
            for entry in entries {
                let entry = entry
                    .with_context(|| format!("Failed to read directory: {}", path.display()))?;
                let candidate = entry.path();
                if candidate.extension().map_or(false, |ext| ext == "json") {
                    dir_files.push(candidate);
                }
            }
            dir_files.sort();
            files.extend(dir_files);
        } else {
            files.push(path.clone());
        }
    }

    Ok(files)
}

/// Load and solve one level, judging the outcome against its par
fn check_level(path: &Path, config: &SolverConfig) -> Verdict {
    let level = match Level::load(path) {
        Ok(level) => level,
        Err(err) => return Verdict::Invalid(format!("{:#}", err)),
    };

    let report = match solve(&level, config) {
        Ok(report) => report,
        Err(err) => return Verdict::Invalid(err.to_string()),
    };

    match report.outcome {
        SolveOutcome::Solved(actions) => {
            let optimal = actions.len() as u32;
            if optimal == level.par {
                Verdict::Ok { optimal }
            } else {
                Verdict::ParMismatch {
                    optimal,
                    par: level.par,
                }
            }
        }
        SolveOutcome::ProvenUnsolvable => Verdict::Unsolvable,
        SolveOutcome::BudgetExceeded => Verdict::Inconclusive,
    }
}

// ============================================================================
// LEVEL 3 - UTILITIES
// ============================================================================

/// Print results as JSON
fn print_json_results(verdicts: &[(PathBuf, Verdict)], failures: usize) {
    #[derive(serde::Serialize)]
    struct JsonLevel {
        path: String,
        status: String,
        optimal: Option<u32>,
        par: Option<u32>,
    }

    #[derive(serde::Serialize)]
    struct JsonOutput {
        total: usize,
        passed: usize,
        failed: usize,
        levels: Vec<JsonLevel>,
    }

    let output = JsonOutput {
        total: verdicts.len(),
        passed: verdicts.len() - failures,
        failed: failures,
        levels: verdicts
            .iter()
            .map(|(path, verdict)| {
                let (status, optimal, par) = match verdict {
                    Verdict::Ok { optimal } => ("ok", Some(*optimal), Some(*optimal)),
                    Verdict::ParMismatch { optimal, par } => {
                        ("par_mismatch", Some(*optimal), Some(*par))
                    }
                    Verdict::Unsolvable => ("unsolvable", None, None),
                    Verdict::Inconclusive => ("inconclusive", None, None),
                    Verdict::Invalid(_) => ("invalid", None, None),
                };
                JsonLevel {
                    path: path.display().to_string(),
                    status: status.to_string(),
                    optimal,
                    par,
                }
            })
            .collect(),
    };

    if let Ok(json) = serde_json::to_string_pretty(&output) {
        println!("{}", json);
    }
}

/// Print results as text
fn print_text_results(verdicts: &[(PathBuf, Verdict)], failures: usize) {
    println!("\n=== Level Validation ===");
    for (path, verdict) in verdicts {
        println!("  {:<40} {}", path.display().to_string(), verdict_label(verdict));
    }
    println!("\n{} of {} levels passed", verdicts.len() - failures, verdicts.len());
}

/// A mismatched par only fails validation under --strict-par
fn is_failure(verdict: &Verdict, strict_par: bool) -> bool {
    match verdict {
        Verdict::Ok { .. } => false,
        Verdict::ParMismatch { .. } => strict_par,
        Verdict::Unsolvable | Verdict::Inconclusive | Verdict::Invalid(_) => true,
    }
}

fn verdict_label(verdict: &Verdict) -> String {
    match verdict {
        Verdict::Ok { optimal } => format!("ok (par {})", optimal),
        Verdict::ParMismatch { optimal, par } => {
            format!("par mismatch (optimal {}, par {})", optimal, par)
        }
        Verdict::Unsolvable => "unsolvable".to_string(),
        Verdict::Inconclusive => "inconclusive (budget exceeded)".to_string(),
        Verdict::Invalid(message) => format!("invalid: {}", message),
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_failure() {
        assert!(!is_failure(&Verdict::Ok { optimal: 3 }, false));
        assert!(!is_failure(&Verdict::Ok { optimal: 3 }, true));
        assert!(is_failure(&Verdict::Unsolvable, false));
        assert!(is_failure(&Verdict::Inconclusive, false));
        assert!(is_failure(&Verdict::Invalid("bad".into()), false));
    }

    #[test]
    fn test_par_mismatch_only_fails_strict() {
        let verdict = Verdict::ParMismatch { optimal: 4, par: 5 };
        assert!(!is_failure(&verdict, false));
        assert!(is_failure(&verdict, true));
    }

    #[test]
    fn test_verdict_labels() {
        assert_eq!(verdict_label(&Verdict::Ok { optimal: 3 }), "ok (par 3)");
        assert_eq!(
            verdict_label(&Verdict::ParMismatch { optimal: 4, par: 5 }),
            "par mismatch (optimal 4, par 5)"
        );
        assert_eq!(verdict_label(&Verdict::Unsolvable), "unsolvable");
    }
}
