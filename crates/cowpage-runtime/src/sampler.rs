//! Sampling loop over a private mapping
//!
//! Each iteration prints the three stored integers as last written by the
//! running process, then overwrites them with the current pid and
//! wall-clock time. After a duplication both processes keep sampling into
//! what are now disjoint views, so every line reflects that process's own
//! previous write and never the other side's.

use crate::process;
use crate::view::Int32View;
use cowpage_core::cancel::StopToken;
use cowpage_core::clock::Clock;
use cowpage_core::constants::{DEFAULT_INTERVAL_MS, SLOT_BYTES, SLOT_COUNT};
use cowpage_core::error::CowResult;
use std::io::Write;
use std::time::Duration;

/// Slot indices for the sampled integers
const SLOT_PID: usize = 0;
const SLOT_SECS: usize = 1;
const SLOT_MICROS: usize = 2;

/// Configuration for the sampling loop
#[derive(Debug, Clone)]
pub struct SamplerConfig {
    /// Delay between iterations (default: 1 second)
    pub interval: Duration,

    /// Requested region size in bytes (default: one page)
    pub region_bytes: usize,
}

impl Default for SamplerConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_millis(DEFAULT_INTERVAL_MS),
            region_bytes: crate::memory::page_size(),
        }
    }
}

impl SamplerConfig {
    /// Create a new configuration with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the sampling interval in milliseconds
    pub fn interval_ms(mut self, ms: u64) -> Self {
        self.interval = Duration::from_millis(ms);
        self
    }

    /// Set the requested region size in bytes
    pub fn region_bytes(mut self, bytes: usize) -> Self {
        self.region_bytes = bytes;
        self
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.interval.is_zero() {
            return Err("interval must be non-zero");
        }
        if self.region_bytes < SLOT_COUNT * SLOT_BYTES {
            return Err("region_bytes must hold the three sample slots");
        }
        Ok(())
    }
}

/// The three integers written each iteration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SampledState {
    /// Process id of the writer
    pub pid: i32,

    /// Wall-clock seconds at the time of the write
    pub secs: i32,

    /// Wall-clock microseconds at the time of the write
    pub micros: i32,
}

impl SampledState {
    /// Read the current slot contents
    pub fn load(view: &Int32View<'_>) -> CowResult<Self> {
        Ok(Self {
            pid: view.get(SLOT_PID)?,
            secs: view.get(SLOT_SECS)?,
            micros: view.get(SLOT_MICROS)?,
        })
    }

    /// Overwrite the slots with this state
    pub fn store(&self, view: &mut Int32View<'_>) -> CowResult<()> {
        view.set(SLOT_PID, self.pid)?;
        view.set(SLOT_SECS, self.secs)?;
        view.set(SLOT_MICROS, self.micros)?;
        Ok(())
    }
}

/// Unbounded print/overwrite/sleep loop over a region view
pub struct Sampler<'a, C: Clock, W: Write> {
    view: Int32View<'a>,
    clock: &'a C,
    out: W,
    interval: Duration,
}

impl<'a, C: Clock, W: Write> Sampler<'a, C, W> {
    pub fn new(view: Int32View<'a>, clock: &'a C, out: W, interval: Duration) -> Self {
        Self {
            view,
            clock,
            out,
            interval,
        }
    }

    /// One iteration: print the stored integers, then overwrite them
    ///
    /// Output failures are ignored; after a duplication the output stream
    /// is shared, unsynchronized and free to interleave.
    pub fn tick(&mut self) -> CowResult<()> {
        let pid = process::current_pid();
        let state = SampledState::load(&self.view)?;
        let _ = writeln!(
            self.out,
            "{}, {}, {}, {}",
            pid, state.pid, state.secs, state.micros
        );

        let now = self.clock.wall_time();
        SampledState {
            pid,
            secs: now.secs,
            micros: now.micros,
        }
        .store(&mut self.view)?;

        Ok(())
    }

    /// Run until the token stops, sleeping `interval` between iterations
    ///
    /// Returns `Err(CowError::Cancelled)` once the token fires; there is
    /// no other way out of the loop.
    pub fn run(&mut self, token: &StopToken) -> CowResult<()> {
        loop {
            token.check()?;
            self.tick()?;
            self.clock.sleep(self.interval);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::{page_size, MappedRegion};
    use cowpage_core::clock::WallTime;
    use cowpage_core::error::CowError;
    use std::cell::Cell;

    /// Deterministic clock: sleeps advance virtual time and stop the token
    /// once the budget is spent, so `run` terminates without real waits.
    struct TestClock {
        secs: Cell<i32>,
        micros: Cell<i32>,
        sleeps_left: Cell<usize>,
        token: StopToken,
    }

    impl TestClock {
        fn new(secs: i32, micros: i32, sleeps: usize, token: StopToken) -> Self {
            Self {
                secs: Cell::new(secs),
                micros: Cell::new(micros),
                sleeps_left: Cell::new(sleeps),
                token,
            }
        }
    }

    impl Clock for TestClock {
        fn wall_time(&self) -> WallTime {
            WallTime {
                secs: self.secs.get(),
                micros: self.micros.get(),
            }
        }

        fn sleep(&self, duration: Duration) {
            let mut micros = self.micros.get() + duration.subsec_micros() as i32;
            let mut secs = self.secs.get() + duration.as_secs() as i32;
            if micros >= 1_000_000 {
                secs += 1;
                micros -= 1_000_000;
            }
            self.secs.set(secs);
            self.micros.set(micros);

            let left = self.sleeps_left.get() - 1;
            self.sleeps_left.set(left);
            if left == 0 {
                self.token.stop();
            }
        }
    }

    #[test]
    fn test_each_line_reflects_previous_write() {
        let region = MappedRegion::create(page_size()).unwrap();
        let view = Int32View::new(&region);

        let token = StopToken::new();
        let clock = TestClock::new(100, 500, 3, token.clone());
        let mut out = Vec::new();

        let mut sampler = Sampler::new(view, &clock, &mut out, Duration::from_secs(1));
        let res = sampler.run(&token);
        assert_eq!(res, Err(CowError::Cancelled));
        drop(sampler);

        let pid = process::current_pid();
        let lines: Vec<String> = String::from_utf8(out)
            .unwrap()
            .lines()
            .map(|l| l.to_string())
            .collect();

        // Fresh region: first line shows the zeroed slots; each later line
        // shows exactly what the previous iteration stored.
        assert_eq!(
            lines,
            vec![
                format!("{}, 0, 0, 0", pid),
                format!("{}, {}, 100, 500", pid, pid),
                format!("{}, {}, 101, 500", pid, pid),
            ]
        );
    }

    #[test]
    fn test_stopped_token_cancels_before_first_tick() {
        let region = MappedRegion::create(page_size()).unwrap();
        let view = Int32View::new(&region);

        let token = StopToken::new();
        token.stop();
        let clock = TestClock::new(0, 0, 1, token.clone());
        let mut out = Vec::new();

        let mut sampler = Sampler::new(view, &clock, &mut out, Duration::from_secs(1));
        assert_eq!(sampler.run(&token), Err(CowError::Cancelled));
        drop(sampler);
        assert!(out.is_empty());
    }

    #[test]
    fn test_tick_stores_pid_and_time() {
        let region = MappedRegion::create(page_size()).unwrap();
        let view = Int32View::new(&region);

        let token = StopToken::new();
        let clock = TestClock::new(7, 9, usize::MAX, token);
        let mut sampler = Sampler::new(view, &clock, Vec::new(), Duration::from_secs(1));

        sampler.tick().unwrap();

        let state = SampledState::load(&sampler.view).unwrap();
        assert_eq!(
            state,
            SampledState {
                pid: process::current_pid(),
                secs: 7,
                micros: 9,
            }
        );
    }

    #[test]
    fn test_config_validation() {
        assert!(SamplerConfig::default().validate().is_ok());
        assert!(SamplerConfig::new().interval_ms(0).validate().is_err());
        assert!(SamplerConfig::new().region_bytes(8).validate().is_err());
        assert!(SamplerConfig::new().region_bytes(12).validate().is_ok());
    }
}
