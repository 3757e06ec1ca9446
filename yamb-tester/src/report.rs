//! Report generation over scenario results and sweep statistics.

use anyhow::Result;
use chrono::Utc;
use colored::Colorize;
use serde::Serialize;
use std::io::Write;
use std::time::Duration;

use crate::script::ScenarioResult;
use crate::sweep::SweepStats;

pub fn generate_console_report(
    out: &mut dyn Write,
    results: &[ScenarioResult],
    sweeps: &[SweepStats],
    total_duration: Duration,
) -> Result<()> {
    writeln!(out)?;
    writeln!(out, "{}", "📊 Scenario Results Summary".bright_cyan().bold())?;
    writeln!(out, "{}", "===========================".cyan())?;

    let total = results.len();
    let passed = results.iter().filter(|r| r.passed).count();
    let failed = total - passed;

    writeln!(out, "Total scenarios: {total}")?;
    writeln!(out, "Passed: {}", passed.to_string().green())?;
    writeln!(out, "Failed: {}", failed.to_string().red())?;
    if total > 0 {
        #[allow(clippy::cast_precision_loss)]
        let success_rate = (passed as f64 / total as f64) * 100.0;
        writeln!(out, "Success rate: {success_rate:.1}%")?;
    }
    writeln!(out, "Total time: {total_duration:?}")?;
    writeln!(out)?;

    for result in results {
        let status = if result.passed {
            "✅ PASS".green()
        } else {
            "❌ FAIL".red()
        };
        writeln!(out, "{} {}", status, result.scenario_name.bold())?;
        writeln!(out, "   Steps: {} in {:?}", result.steps_run, result.duration)?;
        if !result.failures.is_empty() {
            writeln!(out, "   Failures:")?;
            for failure in &result.failures {
                writeln!(out, "     • {}", failure.red())?;
            }
        }
    }

    if !sweeps.is_empty() {
        writeln!(out)?;
        writeln!(out, "{}", "🎲 Sweep Summary".bright_yellow().bold())?;
        writeln!(out, "{}", "================".yellow())?;
        for sweep in sweeps {
            writeln!(
                out,
                "seed {:>12}: {} steps, {} accepted, {} rejected, {} round-trips",
                sweep.seed, sweep.steps, sweep.accepted, sweep.rejected, sweep.round_trips
            )?;
        }
    }

    writeln!(out)?;
    writeln!(out, "Generated at {}", Utc::now().format("%Y-%m-%d %H:%M:%S UTC"))?;
    Ok(())
}

pub fn generate_json_report(
    out: &mut dyn Write,
    results: &[ScenarioResult],
    sweeps: &[SweepStats],
) -> Result<()> {
    #[derive(Serialize)]
    struct Report<'a> {
        results: &'a [ScenarioResult],
        sweeps: &'a [SweepStats],
    }

    let json = serde_json::to_string_pretty(&Report { results, sweeps })?;
    writeln!(out, "{json}")?;
    Ok(())
}

pub fn generate_markdown_report(
    out: &mut dyn Write,
    results: &[ScenarioResult],
    sweeps: &[SweepStats],
) -> Result<()> {
    writeln!(out, "# Yamb Tester Results\n")?;
    writeln!(
        out,
        "_Generated {}_\n",
        Utc::now().format("%Y-%m-%d %H:%M UTC")
    )?;

    let total = results.len();
    let passed = results.iter().filter(|r| r.passed).count();
    writeln!(out, "## Summary\n")?;
    writeln!(out, "- **Total scenarios**: {total}")?;
    writeln!(out, "- **Passed**: {passed}")?;
    writeln!(out, "- **Failed**: {}", total - passed)?;
    writeln!(out)?;

    writeln!(out, "## Detailed Results\n")?;
    for result in results {
        let status = if result.passed { "✅" } else { "❌" };
        writeln!(out, "### {} {}\n", status, result.scenario_name)?;
        writeln!(
            out,
            "- **Steps**: {} in {:?}",
            result.steps_run, result.duration
        )?;
        if !result.failures.is_empty() {
            writeln!(out, "- **Failures**:")?;
            for failure in &result.failures {
                writeln!(out, "  - {failure}")?;
            }
        }
        writeln!(out)?;
    }

    if !sweeps.is_empty() {
        writeln!(out, "## Sweeps\n")?;
        writeln!(out, "| Seed | Steps | Accepted | Rejected | Round-trips |")?;
        writeln!(out, "|------|-------|----------|----------|-------------|")?;
        for sweep in sweeps {
            writeln!(
                out,
                "| {} | {} | {} | {} | {} |",
                sweep.seed, sweep.steps, sweep.accepted, sweep.rejected, sweep.round_trips
            )?;
        }
    }
    Ok(())
}
