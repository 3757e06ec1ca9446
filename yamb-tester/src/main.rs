mod render;
mod report;
mod scenarios;
mod script;
mod store;
mod sweep;

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use std::fs::File;
use std::io::{BufWriter, Write, stdout};
use std::path::PathBuf;
use std::time::Instant;

use scenarios::{get_scenario, list_scenarios, scenario_keys};
use script::{ScenarioResult, ScriptRunner};
use store::FileStore;
use sweep::{SweepStats, run_sweep};

#[derive(Debug, Parser)]
#[command(name = "yamb-tester", version = "0.1.0")]
#[command(
    about = "Automated QA for the Yamb scorekeeper - scripted scenarios and random invariant sweeps"
)]
struct Args {
    /// Scenarios to run (comma-separated, "all" for the whole catalog)
    #[arg(long, default_value = "smoke")]
    scenarios: String,

    /// List all available scenarios and exit
    #[arg(long)]
    list_scenarios: bool,

    /// Seeds for the random sweeps (comma-separated)
    #[arg(long, default_value = "1337")]
    seeds: String,

    /// Steps per random sweep
    #[arg(long, default_value_t = 500)]
    steps: usize,

    /// Skip the random sweeps entirely
    #[arg(long)]
    no_sweep: bool,

    /// Run extended acceptance sweeps (forces ≥2000 steps per seed)
    #[arg(long)]
    acceptance: bool,

    /// Output report format
    #[arg(long, default_value = "console")]
    #[arg(value_parser = ["json", "markdown", "console"])]
    report: String,

    /// Optional path to write the report output instead of stdout
    #[arg(long)]
    output: Option<PathBuf>,

    /// Snapshot file backing save/reload steps (defaults to a temp file per scenario)
    #[arg(long)]
    state_file: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    if maybe_list_scenarios(&args)? {
        return Ok(());
    }

    announce_banner();

    let start_time = Instant::now();
    let sweep_steps = compute_sweep_steps(&args);
    let scenario_names = expand_scenarios(&args.scenarios);
    let seeds = parse_seeds(&args.seeds)?;

    let mut results = run_scenarios(&args, &scenario_names);
    let sweeps = run_sweeps(&args, &seeds, sweep_steps, &mut results);

    write_reports(&args, &results, &sweeps, start_time)?;

    if results.iter().any(|r| !r.passed) {
        std::process::exit(1);
    }

    Ok(())
}

fn maybe_list_scenarios(args: &Args) -> Result<bool> {
    if !args.list_scenarios {
        return Ok(false);
    }
    let mut output_target = OutputTarget::new(args.output.clone())?;
    writeln!(output_target.writer(), "Available scenarios:")?;
    for (key, description) in list_scenarios() {
        writeln!(output_target.writer(), "  {key:25} - {description}")?;
    }
    output_target.flush_inner()?;
    Ok(true)
}

fn announce_banner() {
    println!("{}", "🎲 Yamb Automated Tester".bright_cyan().bold());
    println!("{}", "================================".cyan());
}

fn compute_sweep_steps(args: &Args) -> usize {
    if args.acceptance {
        if args.steps < 2000 {
            println!(
                "🔁 Acceptance mode enabled: increasing sweep steps from {} to 2000",
                args.steps
            );
        } else {
            println!("🔁 Acceptance mode enabled: using {} sweep steps", args.steps);
        }
        args.steps.max(2000)
    } else {
        args.steps
    }
}

fn split_csv(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(ToString::to_string)
        .collect()
}

fn expand_scenarios(scenarios_arg: &str) -> Vec<String> {
    let mut names = split_csv(scenarios_arg);
    if names.contains(&"all".to_string()) {
        names.retain(|name| name != "all");
        names.extend(scenario_keys().into_iter().map(ToString::to_string));
    }
    names
}

fn parse_seeds(seeds_arg: &str) -> Result<Vec<u64>> {
    split_csv(seeds_arg)
        .iter()
        .map(|token| {
            token
                .parse::<u64>()
                .with_context(|| format!("invalid seed {token:?}"))
        })
        .collect()
}

fn run_scenarios(args: &Args, names: &[String]) -> Vec<ScenarioResult> {
    println!("{}", "📋 Running Scripted Scenarios".bright_yellow().bold());
    println!("{}", "-".repeat(30).yellow());

    let runner = ScriptRunner::new(args.verbose);
    let mut results = Vec::new();
    for name in names {
        let Some(scenario) = get_scenario(name) else {
            eprintln!("⚠️  Unknown scenario: {}", name.yellow());
            continue;
        };
        let store = scenario_store(args, name);
        let result = runner.run(&scenario, store);
        announce_result(&result);
        results.push(result);
    }
    results
}

fn scenario_store(args: &Args, key: &str) -> FileStore {
    args.state_file.as_ref().map_or_else(
        || FileStore::temp_for(key),
        |path| FileStore::new(path.clone()),
    )
}

fn run_sweeps(
    args: &Args,
    seeds: &[u64],
    steps: usize,
    results: &mut Vec<ScenarioResult>,
) -> Vec<SweepStats> {
    if args.no_sweep {
        return Vec::new();
    }

    println!("{}", "🎲 Running Random Sweeps".bright_blue().bold());
    println!("{}", "-".repeat(30).blue());

    let mut sweeps = Vec::new();
    for &seed in seeds {
        let (result, stats) = run_sweep(seed, steps, args.verbose);
        announce_result(&result);
        if let Some(stats) = stats {
            sweeps.push(stats);
        }
        results.push(result);
    }
    sweeps
}

fn announce_result(result: &ScenarioResult) {
    if result.passed {
        println!(
            "✅ {} - {} steps in {:?}",
            result.scenario_name.green(),
            result.steps_run,
            result.duration
        );
    } else {
        let detail = result
            .failures
            .first()
            .map_or("unknown failure", String::as_str);
        eprintln!("❌ {} - {detail}", result.scenario_name.red());
    }
}

fn write_reports(
    args: &Args,
    results: &[ScenarioResult],
    sweeps: &[SweepStats],
    start_time: Instant,
) -> Result<()> {
    let mut output_target = OutputTarget::new(args.output.clone())?;

    match args.report.as_str() {
        "json" => report::generate_json_report(&mut output_target, results, sweeps)?,
        "markdown" => report::generate_markdown_report(&mut output_target, results, sweeps)?,
        _ => report::generate_console_report(
            &mut output_target,
            results,
            sweeps,
            start_time.elapsed(),
        )?,
    }

    writeln!(&mut output_target)?;
    writeln!(&mut output_target, "🏁 Total time: {:?}", start_time.elapsed())?;
    output_target.flush_inner()?;
    Ok(())
}

enum OutputTarget {
    Stdout(BufWriter<std::io::Stdout>),
    File(BufWriter<File>),
}

impl OutputTarget {
    fn new(path: Option<PathBuf>) -> Result<Self> {
        if let Some(path) = path {
            let file = File::create(&path)
                .with_context(|| format!("failed to create {}", path.display()))?;
            Ok(Self::File(BufWriter::new(file)))
        } else {
            Ok(Self::Stdout(BufWriter::new(stdout())))
        }
    }

    fn writer(&mut self) -> &mut dyn Write {
        match self {
            Self::Stdout(w) => w,
            Self::File(w) => w,
        }
    }

    fn flush_inner(&mut self) -> std::io::Result<()> {
        match self {
            Self::Stdout(w) => w.flush(),
            Self::File(w) => w.flush(),
        }
    }
}

impl Write for OutputTarget {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.writer().write(buf)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.flush_inner()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_args() -> Args {
        Args {
            scenarios: "smoke".to_string(),
            list_scenarios: false,
            seeds: "1337".to_string(),
            steps: 500,
            no_sweep: false,
            acceptance: false,
            report: "console".to_string(),
            output: None,
            state_file: None,
            verbose: false,
        }
    }

    #[test]
    fn split_csv_trims_and_drops_empties() {
        assert_eq!(split_csv("a, b,,c "), vec!["a", "b", "c"]);
        assert!(split_csv(" , ").is_empty());
    }

    #[test]
    fn expand_scenarios_substitutes_the_catalog_for_all() {
        let names = expand_scenarios("smoke,all");
        assert!(!names.contains(&"all".to_string()));
        for key in scenario_keys() {
            assert!(names.contains(&key.to_string()), "missing {key}");
        }
    }

    #[test]
    fn parse_seeds_accepts_comma_separated_integers() {
        assert_eq!(parse_seeds("1, 42,1337").unwrap(), vec![1, 42, 1337]);
        assert!(parse_seeds("1,banana").is_err());
    }

    #[test]
    fn acceptance_mode_raises_the_step_floor() {
        let mut args = base_args();
        assert_eq!(compute_sweep_steps(&args), 500);
        args.acceptance = true;
        assert_eq!(compute_sweep_steps(&args), 2000);
        args.steps = 5000;
        assert_eq!(compute_sweep_steps(&args), 5000);
    }
}
