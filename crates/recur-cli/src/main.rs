//! `recur` - 繰り返しタスクの次回日付を計算する CLI
//!
//! ```text
//! recur nextdate <now|today> <date> <repeat>
//! recur prepare            < task.json
//! recur done               < task.json
//! recur search <query> [limit] < tasks.json
//! ```

mod config;

use std::io::{self, Read};
use std::process::ExitCode;

use anyhow::{Context, Result, bail};
use serde::Serialize;
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

use recur_core::ports::{Clock, FixedClock, SystemClock};
use recur_core::{SearchQuery, Task, TaskScheduler, filter_tasks, next_date};

use crate::config::CliConfig;

const USAGE: &str = "\
usage:
  recur nextdate <now|today> <date> <repeat>
  recur prepare                  (task JSON on stdin)
  recur done                     (task JSON on stdin)
  recur search <query> [limit]   (task JSON array on stdin)";

fn read_stdin_json<T: serde::de::DeserializeOwned>() -> Result<T> {
    let mut input = String::new();
    io::stdin()
        .read_to_string(&mut input)
        .context("reading stdin")?;
    serde_json::from_str(&input).context("decoding JSON from stdin")
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn run(config: &CliConfig, args: &[String]) -> Result<()> {
    // RECUR_TODAY pins "today"; otherwise read the system clock once.
    let today = config.today.unwrap_or_else(|| SystemClock.today());
    let scheduler = TaskScheduler::new(FixedClock::on(today));
    let arg = |i: usize| args.get(i).map(String::as_str).unwrap_or("");

    match arg(1) {
        "nextdate" => {
            let now = match arg(2) {
                "today" => today.to_string(),
                now => now.to_string(),
            };
            let next = next_date(&now, arg(3), arg(4))?;
            debug!(now = %now, date = arg(3), repeat = arg(4), next = %next, "computed next date");
            println!("{next}");
        }
        "prepare" => {
            let task: Task = read_stdin_json()?;
            print_json(&scheduler.prepare(task)?)?;
        }
        "done" => {
            let task: Task = read_stdin_json()?;
            print_json(&scheduler.complete(task)?)?;
        }
        "search" => {
            let limit = match args.get(3) {
                Some(raw) => raw
                    .parse()
                    .with_context(|| format!("invalid limit {raw:?}"))?,
                None => config.search_limit,
            };
            let tasks: Vec<Task> = read_stdin_json()?;
            let query = SearchQuery::parse(arg(2));
            let found = filter_tasks(&tasks, &query, limit);
            debug!(?query, total = tasks.len(), found = found.len(), "search");
            print_json(&found)?;
        }
        "" | "help" | "-h" | "--help" => println!("{USAGE}"),
        other => bail!("unknown command {other:?}\n{USAGE}"),
    }
    Ok(())
}

fn main() -> ExitCode {
    config::load_dotenv();
    let (config, warnings) = CliConfig::from_env();

    let filter = EnvFilter::try_new(&config.log_filter).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
    for warning in &warnings {
        warn!("{warning}");
    }

    let args: Vec<String> = std::env::args().collect();
    match run(&config, &args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}
