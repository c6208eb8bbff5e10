//! Monotonic Timing
//!
//! Reads `CLOCK_MONOTONIC` through libc on unix targets, with a fallback to
//! `std::time::Instant` elsewhere. A failed clock read degrades to a zero
//! timestamp and a warning instead of aborting the run: the affected sample
//! is unreliable but the measurement loop keeps going.

use std::io;

/// Nanoseconds per microsecond
pub const NANOS_PER_MICRO: f64 = 1_000.0;

/// Nanoseconds per millisecond
pub const NANOS_PER_MILLI: f64 = 1_000_000.0;

/// Nanoseconds per second
pub const NANOS_PER_SEC: u64 = 1_000_000_000;

// ─── Clock helpers ───────────────────────────────────────────────────────────

#[cfg(unix)]
#[inline(always)]
fn read_monotonic() -> io::Result<u64> {
    let mut ts = libc::timespec {
        tv_sec: 0,
        tv_nsec: 0,
    };
    // SAFETY: `ts` is a valid, writable timespec for the duration of the call.
    let rc = unsafe { libc::clock_gettime(libc::CLOCK_MONOTONIC, &mut ts) };
    if rc != 0 {
        return Err(io::Error::last_os_error());
    }
    Ok(ts.tv_sec as u64 * NANOS_PER_SEC + ts.tv_nsec as u64)
}

#[cfg(not(unix))]
#[inline(always)]
fn read_monotonic() -> io::Result<u64> {
    use std::sync::OnceLock;

    static ANCHOR: OnceLock<std::time::Instant> = OnceLock::new();
    let anchor = ANCHOR.get_or_init(std::time::Instant::now);
    Ok(anchor.elapsed().as_nanos() as u64)
}

// ─── Timestamp ───────────────────────────────────────────────────────────────

/// Opaque point on the monotonic clock
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp {
    nanos: u64,
}

impl Timestamp {
    /// Timestamp used when the clock cannot be read
    pub const ZERO: Timestamp = Timestamp { nanos: 0 };

    /// Capture the current monotonic time
    #[inline(always)]
    pub fn now() -> Self {
        Self::from_reading(read_monotonic())
    }

    /// Timestamp for a raw clock reading; a failed read maps to [`Timestamp::ZERO`]
    #[inline(always)]
    fn from_reading(reading: io::Result<u64>) -> Self {
        match reading {
            Ok(nanos) => Self { nanos },
            Err(err) => {
                tracing::warn!(error = %err, "monotonic clock unavailable, using zero timestamp");
                Self::ZERO
            }
        }
    }

    /// Nanoseconds between `start` and `end`.
    ///
    /// `end` must not be earlier than `start`. Callers guarantee this by
    /// taking both readings in order inside one block; a reversed pair wraps
    /// instead of panicking.
    #[inline(always)]
    pub fn diff(start: Timestamp, end: Timestamp) -> u64 {
        end.nanos.wrapping_sub(start.nanos)
    }

    /// Nanoseconds elapsed since this timestamp
    #[inline(always)]
    pub fn elapsed(&self) -> u64 {
        Self::diff(*self, Self::now())
    }

    /// Raw nanosecond reading of the monotonic clock
    pub fn as_nanos(&self) -> u64 {
        self.nanos
    }
}

// ─── Timer ───────────────────────────────────────────────────────────────────

/// Timer around a single timed call
pub struct Timer {
    start: Timestamp,
}

impl Timer {
    /// Start a new timer
    #[inline(always)]
    pub fn start() -> Self {
        Self {
            start: Timestamp::now(),
        }
    }

    /// Stop the timer and return elapsed nanoseconds
    #[inline(always)]
    pub fn stop(&self) -> u64 {
        Timestamp::diff(self.start, Timestamp::now())
    }
}

/// Resolution of the monotonic clock in nanoseconds.
///
/// Falls back to 1 ns when the resolution cannot be queried.
#[cfg(unix)]
pub fn resolution() -> u64 {
    let mut res = libc::timespec {
        tv_sec: 0,
        tv_nsec: 0,
    };
    // SAFETY: `res` is a valid, writable timespec for the duration of the call.
    let rc = unsafe { libc::clock_getres(libc::CLOCK_MONOTONIC, &mut res) };
    if rc != 0 {
        tracing::error!(error = %io::Error::last_os_error(), "clock_getres failed, assuming 1 ns");
        return 1;
    }
    let nanos = res.tv_sec as u64 * NANOS_PER_SEC + res.tv_nsec as u64;
    tracing::debug!(resolution_ns = nanos, "monotonic clock resolution");
    nanos.max(1)
}

/// Resolution of the monotonic clock in nanoseconds
#[cfg(not(unix))]
pub fn resolution() -> u64 {
    1
}

/// Convert nanoseconds to microseconds
#[inline]
pub fn ns_to_us(ns: f64) -> f64 {
    ns / NANOS_PER_MICRO
}

/// Convert nanoseconds to milliseconds
#[inline]
pub fn ns_to_ms(ns: f64) -> f64 {
    ns / NANOS_PER_MILLI
}

/// Convert nanoseconds to seconds
#[inline]
pub fn ns_to_s(ns: f64) -> f64 {
    ns / NANOS_PER_SEC as f64
}
