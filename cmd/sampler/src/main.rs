//! Private anonymous mapping demo
//!
//! Maps one page (`MAP_PRIVATE | MAP_ANONYMOUS`), seeds it, duplicates the
//! process, and lets parent and child sample pid and wall-clock time into
//! what are now independent views: every line a process prints reflects
//! its own previous write, never the other side's. Runs until killed.
//!
//! # Environment Variables
//!
//! - `COW_INTERVAL_MS` - Delay between samples in milliseconds (default 1000)
//! - `RUST_LOG` - Log filter for stderr diagnostics (default warn)

use cowpage::constants::{DEFAULT_INTERVAL_MS, SEED_VALUE};
use cowpage::{
    current_pid, duplicate, env_get, page_size, CowResult, Fork, Int32View, MappedRegion, Sampler,
    SamplerConfig, StopToken, SystemClock,
};
use env_logger::Env;
use log::debug;
use std::io::{self, Write};
use std::process::ExitCode;

fn main() -> ExitCode {
    env_logger::Builder::from_env(Env::default().default_filter_or("warn")).init();

    let config =
        SamplerConfig::default().interval_ms(env_get("COW_INTERVAL_MS", DEFAULT_INTERVAL_MS));
    if let Err(msg) = config.validate() {
        eprintln!("invalid configuration: {}", msg);
        return ExitCode::FAILURE;
    }

    match run(config) {
        // Unreachable in normal operation: the loop only ends on error.
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(config: SamplerConfig) -> CowResult<()> {
    println!("page size: {}", page_size());

    let region = MappedRegion::create(config.region_bytes)?;
    println!("ptr: {:p}", region.base());

    let mut view = Int32View::new(&region);
    view.set(0, SEED_VALUE)?;

    // Flush before duplicating so block-buffered output is not replayed
    // by both processes.
    let _ = io::stdout().flush();

    match duplicate()? {
        Fork::Parent { child } => debug!("continuing as parent of {}", child),
        Fork::Child => debug!("continuing as child"),
    }
    println!("pid: {}", current_pid());

    let clock = SystemClock;
    let token = StopToken::new();
    let mut sampler = Sampler::new(view, &clock, io::stdout(), config.interval);
    sampler.run(&token)
}
