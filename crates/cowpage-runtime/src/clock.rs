//! System clock backed by gettimeofday

use cowpage_core::clock::{Clock, WallTime};
use std::time::Duration;

/// Production clock: gettimeofday plus a blocking thread sleep
///
/// The gettimeofday return value is ignored; a failing time query is not
/// an expected condition on any supported platform.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn wall_time(&self) -> WallTime {
        let mut tv = libc::timeval {
            tv_sec: 0,
            tv_usec: 0,
        };
        unsafe { libc::gettimeofday(&mut tv, std::ptr::null_mut()) };

        WallTime {
            secs: tv.tv_sec as i32,
            micros: tv.tv_usec as i32,
        }
    }

    fn sleep(&self, duration: Duration) {
        std::thread::sleep(duration);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wall_time_components_in_range() {
        let now = SystemClock.wall_time();
        assert!(now.secs > 0);
        assert!((0..1_000_000).contains(&now.micros));
    }
}
