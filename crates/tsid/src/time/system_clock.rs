use crate::TimeSource;
#[cfg(not(target_arch = "wasm32"))]
use std::time::{SystemTime, UNIX_EPOCH};
#[cfg(target_arch = "wasm32")]
use web_time::{SystemTime, UNIX_EPOCH};

/// A [`TimeSource`] that reads the system wall clock on every call.
///
/// The reading follows NTP slews and manual adjustments, including backwards
/// jumps. Factories absorb those by holding their last timestamp, so a
/// backwards step costs counter space but never produces an out-of-order ID.
///
/// A system clock set before 1970 reads as `0`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct SystemClock;

impl TimeSource<u64> for SystemClock {
    fn current_millis(&self) -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_or(0, |elapsed| elapsed.as_millis() as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn system_clock_tracks_wall_clock() {
        let before = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_millis() as u64;
        let reading = SystemClock.current_millis();
        let after = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_millis() as u64;

        assert!(before <= reading && reading <= after);
        assert!(reading > crate::TSID_EPOCH_MILLIS);
    }
}
