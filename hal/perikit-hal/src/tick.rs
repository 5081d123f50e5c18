//! Monotonic millisecond clock

/// Process-wide monotonic millisecond counter
///
/// The value wraps modulo 2^32. All elapsed-time arithmetic in perikit uses
/// [`elapsed_ms`], which stays correct across the wrap as long as the
/// interval being measured is shorter than ~49.7 days.
pub trait Tick {
    /// Current tick in milliseconds
    fn now_ms(&self) -> u32;
}

// Lets a bare `fn() -> u32` (e.g. a platform `get_tick`) serve as the clock
impl<F: Fn() -> u32> Tick for F {
    fn now_ms(&self) -> u32 {
        self()
    }
}

/// Milliseconds elapsed from `since` to `now`, across counter wraparound
#[inline]
pub fn elapsed_ms(now: u32, since: u32) -> u32 {
    now.wrapping_sub(since)
}
