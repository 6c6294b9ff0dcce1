use crate::{Layout, Tsid};

/// The `(last_timestamp, counter)` pair: the only mutable state of a factory.
///
/// Packs into one `u64` as `(timestamp << 22) | counter` so the atomic factory
/// can swap it in a single compare-and-exchange. The counter never exceeds 22
/// bits, whatever the layout.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct ClockState {
    pub(crate) timestamp: u64,
    pub(crate) counter: u64,
}

impl ClockState {
    pub(crate) const fn from_raw(raw: u64) -> Self {
        Self {
            timestamp: raw >> Tsid::TIMESTAMP_SHIFT,
            counter: raw & Tsid::RANDOM_MASK,
        }
    }

    pub(crate) const fn to_raw(self) -> u64 {
        (self.timestamp << Tsid::TIMESTAMP_SHIFT) | self.counter
    }

    /// Computes the state of the next ID given the clock reading `now`
    /// (milliseconds since the factory's epoch).
    ///
    /// - A later millisecond takes `now` and a reseeded counter.
    /// - The same millisecond, or an earlier one after the clock stepped back,
    ///   keeps the held timestamp and bumps the counter.
    /// - A counter that runs out of room borrows the next millisecond and is
    ///   reseeded, so the result is always strictly greater than `self`.
    ///
    /// The 42-bit timestamp field ends 2^42 ms (about 139 years) after the
    /// epoch. Factories clamp `now` to [`Tsid::TIMESTAMP_MASK`]; exhausting the
    /// counter within that last millisecond wraps the timestamp to zero.
    #[inline]
    pub(crate) fn advance(self, now: u64, layout: Layout, reseed: impl FnOnce() -> u64) -> Self {
        if now > self.timestamp {
            return Self {
                timestamp: now,
                counter: reseed() & layout.counter_mask(),
            };
        }
        if now < self.timestamp {
            cold_clock_behind(now, self.timestamp);
        }

        let counter = self.counter + 1;
        if counter > layout.max_counter() {
            return Self::cold_next_tick(self.timestamp, layout, reseed);
        }
        Self {
            timestamp: self.timestamp,
            counter,
        }
    }

    #[cold]
    #[inline(never)]
    fn cold_next_tick(timestamp: u64, layout: Layout, reseed: impl FnOnce() -> u64) -> Self {
        #[cfg(feature = "tracing")]
        tracing::debug!(
            timestamp,
            counter_bits = layout.counter_bits(),
            "counter exhausted, borrowing next millisecond"
        );
        Self {
            timestamp: timestamp + 1,
            counter: reseed() & layout.counter_mask(),
        }
    }
}

#[cold]
#[inline(never)]
#[allow(unused_variables)]
fn cold_clock_behind(now: u64, held: u64) {
    #[cfg(feature = "tracing")]
    tracing::debug!(
        now,
        held,
        behind_ms = held - now,
        "clock moved backwards, holding timestamp"
    );
}
