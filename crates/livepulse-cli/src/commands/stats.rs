use std::sync::Arc;
use std::time::{Duration, Instant};

use clap::Subcommand;
use livepulse_core::{
    format_number, Config, CounterEngine, MemoryStore, SentimentClient, StatsDb, StatsRunner,
    SystemClock,
};

#[derive(Subcommand)]
pub enum StatsAction {
    /// Print the current counter values
    Show {
        /// Print raw state as JSON
        #[arg(long)]
        json: bool,
    },
    /// Drive the scheduler for a while, printing events as JSON lines
    Run {
        /// How long to run, in seconds
        #[arg(long, default_value = "30")]
        seconds: u64,
        /// Seed the RNG for a reproducible run
        #[arg(long)]
        seed: Option<u64>,
        /// Use an in-memory store instead of the database
        #[arg(long)]
        ephemeral: bool,
    },
    /// Clear the persisted counter snapshot and hourly marker
    Reset,
}

pub fn run(action: StatsAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        StatsAction::Show { json } => show(json),
        StatsAction::Run {
            seconds,
            seed,
            ephemeral,
        } => run_loop(seconds, seed, ephemeral),
        StatsAction::Reset => reset(),
    }
}

fn build_engine(seed: Option<u64>, ephemeral: bool) -> Result<CounterEngine, Box<dyn std::error::Error>> {
    let store: Box<dyn livepulse_core::KvStore> = if ephemeral {
        Box::new(MemoryStore::new())
    } else {
        Box::new(StatsDb::open()?)
    };
    let engine = match seed {
        Some(seed) => CounterEngine::with_seed(store, Arc::new(SystemClock), seed),
        None => CounterEngine::new(store),
    };
    Ok(engine)
}

fn show(json: bool) -> Result<(), Box<dyn std::error::Error>> {
    // Read-only: a peek never persists a snapshot or runs the hourly reset.
    let db = StatsDb::open()?;
    let state = CounterEngine::peek_or_default(&db, &SystemClock);

    if json {
        println!("{}", serde_json::to_string_pretty(&state)?);
        return Ok(());
    }

    println!(
        "People searching \"AI training\" right now: {}",
        format_number(state.training_searches as f64)
    );
    println!(
        "\"Will AI replace me?\" searches this hour: {}",
        format_number(state.anxiety_searches as f64)
    );
    println!(
        "% unprepared for AI transformation: {}%",
        format_number(state.unprepared_pct)
    );
    Ok(())
}

fn run_loop(seconds: u64, seed: Option<u64>, ephemeral: bool) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;
    let mut engine = build_engine(seed, ephemeral)?;

    if !config.sentiment.endpoint.is_empty() {
        let client = SentimentClient::with_timeout(
            config.sentiment.endpoint.clone(),
            Duration::from_secs(config.sentiment.timeout_secs),
        );
        let runtime = tokio::runtime::Runtime::new()?;
        let bias = runtime.block_on(client.fetch_or_neutral());
        engine.set_sentiment(bias);
    }

    let mut runner = StatsRunner::new(engine, Arc::new(SystemClock), &config.intervals);
    runner.set_visible(true);
    tracing::debug!(seconds, "driving the stats scheduler");

    let started = Instant::now();
    while started.elapsed() < Duration::from_secs(seconds) {
        std::thread::sleep(Duration::from_millis(250));
        runner.tick();
        for event in runner.take_events() {
            println!("{}", serde_json::to_string(&event)?);
        }
    }

    runner.set_visible(false);
    let state = runner.engine().state();
    eprintln!(
        "final: training={} anxiety={} unprepared={}%",
        format_number(state.training_searches as f64),
        format_number(state.anxiety_searches as f64),
        format_number(state.unprepared_pct)
    );
    Ok(())
}

fn reset() -> Result<(), Box<dyn std::error::Error>> {
    let mut db = StatsDb::open()?;
    CounterEngine::clear_persisted(&mut db);
    println!("Counter state cleared.");
    Ok(())
}
