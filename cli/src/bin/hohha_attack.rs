//! `hohha-attack`: known-plaintext key-recovery front end. Reads test
//! vectors in spec's whitespace-separated record format, runs the
//! iterative-deepening search, and prints every accepted solution.

use std::fs::File;
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use hohha_recover::{attack, read_samples, OrderingParams, ProgressFlag, RecoverError};

#[derive(Parser)]
#[command(name = "hohha-attack")]
#[command(about = "Known-plaintext key-recovery engine for the Hohha Dynamic XOR cipher")]
struct Args {
    /// Key length in bytes (must be a power of two)
    #[arg(short = 'l', long)]
    length: usize,

    /// Jump count used by every sample
    #[arg(short = 'j', long)]
    jumps: u32,

    /// Test-vector file (defaults to stdin)
    #[arg(short = 'f', long)]
    vectors: Option<PathBuf>,

    /// Maximum iterative-deepening depth (defaults to length / 2)
    #[arg(long)]
    cutoff: Option<usize>,

    /// Weight-zeroing threshold factor for the fixed branching prefix
    #[arg(long, default_value_t = 3)]
    prefix_threshold_factor: u32,

    /// Snapshot free-list capacity
    #[arg(long, default_value_t = hohha_recover::DEFAULT_POOL_CAPACITY)]
    pool_capacity: usize,

    /// Known-correct key body (base64), checked after every prune —
    /// aborts if pruning ever drops it (spec's attacker monotonicity
    /// property). For testing the search itself, not normal use.
    #[arg(long)]
    known_answer: Option<String>,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("hohha-attack: {err}");
            ExitCode::from(exit_code(&err) as u8)
        }
    }
}

fn exit_code(err: &RecoverError) -> i32 {
    match err {
        RecoverError::InvalidInput(_) => 1,
        RecoverError::InternalInvariant(_) => 2,
        RecoverError::Io(_) => 1,
    }
}

fn run() -> Result<(), RecoverError> {
    let args = Args::parse();

    let known_answer = args
        .known_answer
        .as_deref()
        .map(hohha_base64::decode)
        .transpose()
        .map_err(|e| RecoverError::InvalidInput(e.to_string()))?;

    let samples = match args.vectors {
        Some(path) => read_samples(File::open(path)?),
        None => read_samples(io::stdin().lock()),
    };

    let progress = ProgressFlag::new();
    {
        let progress = progress.clone();
        unsafe {
            signal_hook::low_level::register(signal_hook::consts::SIGUSR1, move || {
                progress.request();
            })
        }
        .map_err(RecoverError::Io)?;
    }

    let params = OrderingParams {
        prefix_threshold_factor: args.prefix_threshold_factor,
        pool_capacity: args.pool_capacity,
        cutoff: args.cutoff,
    };

    let report = attack(
        samples,
        args.length,
        args.jumps,
        &params,
        &progress,
        known_answer.as_deref(),
    )?;

    for solution in &report.solutions {
        println!("--(done)--");
        println!("v: {:#010x} ({:#010x})", solution.v, solution.v_mask);
        println!("k: {}", hohha_base64::encode(&solution.key));
        println!("m: {}", hohha_base64::encode(&solution.key_mask));
    }

    Ok(())
}
