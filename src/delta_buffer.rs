use std::ops::Sub;

/// Numeric type storable in a [`DeltaBuffer`]: copyable, has a zero,
/// supports subtraction, and converts to `f64` for averaging.
pub trait Count: Copy + Default + Sub<Output = Self> {
    fn to_f64(self) -> f64;
}

impl Count for u32 {
    fn to_f64(self) -> f64 { self as f64 }
}

impl Count for u64 {
    fn to_f64(self) -> f64 { self as f64 }
}

impl Count for i64 {
    fn to_f64(self) -> f64 { self as f64 }
}

impl Count for f64 {
    fn to_f64(self) -> f64 { self }
}

/// Fixed-capacity ring buffer of cumulative running totals, answering
/// "how much accumulated over the last N samples?" in O(1) for any N.
///
/// Storage holds `capacity + 1` cells so that "now" and "capacity samples
/// ago" always land in distinct cells: one cell is the baseline (the total
/// just before the oldest retained sample), the other `capacity` hold
/// progressively later totals. Callers must pass `add` a monotonically
/// non-decreasing running total; [`count_between`](Self::count_between)
/// differences two such snapshots to produce a window delta.
#[derive(Debug)]
pub struct DeltaBuffer<T> {
    counts: Vec<T>,
    /// Next cell to overwrite, in `[0, capacity]`.
    index: usize,
    /// Samples recorded since construction/reset, saturating at `capacity`.
    seen: usize,
    capacity: usize,
}

impl<T: Count> DeltaBuffer<T> {
    /// Create a buffer able to window over the last `capacity` samples.
    /// `capacity` must be at least 1.
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "DeltaBuffer capacity must be at least 1");
        Self {
            counts: vec![T::default(); capacity + 1],
            index: 0,
            seen: 0,
            capacity,
        }
    }

    /// Record the next cumulative total.
    ///
    /// The argument is a running total since the series baseline, not a
    /// per-tick increment; window queries difference two recorded totals.
    pub fn add(&mut self, count: T) {
        self.counts[self.index] = count;
        self.index = normalize(self.index as i64 + 1, self.capacity as i64 + 1);
        if self.seen != self.capacity {
            self.seen += 1;
        }
    }

    /// Discard all history and restart the series from `count`.
    ///
    /// The supplied value becomes the new baseline, so a caller restoring a
    /// previously persisted running total can continue it monotonically
    /// instead of jumping back to zero.
    pub fn reset(&mut self, count: T) {
        self.counts[self.capacity] = count;
        self.index = 0;
        self.seen = 0;
    }

    /// True once at least `n` samples have been recorded; windows of size
    /// `n` are backed by real data only after this returns true.
    pub fn has_significant(&self, n: usize) -> bool {
        self.seen >= n
    }

    /// Accumulated delta between two offsets into the past, both measured
    /// backward from now (`0` = the most recent sample, `-3` = three
    /// samples ago). Requires `from <= to <= 0`; violating that is a
    /// programming error and panics.
    ///
    /// Offsets reaching further back than the recorded history are clamped
    /// to the oldest available sample, so oversized windows shrink to "all
    /// available history" rather than reading stale cells.
    pub fn count_between(&self, from: i64, to: i64) -> T {
        assert!(from <= to, "count_between: from must not exceed to");
        assert!(to <= 0, "count_between: offsets are measured backward from 0");

        let len = self.capacity as i64 + 1;
        let newest = self.index as i64 - 1;
        let from_cell = normalize(newest - (-from).min(self.seen as i64), len);
        let to_cell = normalize(newest - (-to).min(self.seen as i64), len);

        self.counts[to_cell] - self.counts[from_cell]
    }

    /// Accumulated delta over the most recent `n` samples (or fewer, if
    /// fewer have been recorded).
    pub fn count_last(&self, n: usize) -> T {
        self.count_between(-(n as i64), 0)
    }

    /// Average per-sample delta over the most recent `n` samples.
    ///
    /// The divisor is the number of samples actually available, so an
    /// oversized window averages over real history instead of being
    /// diluted. Returns `0.0` before any sample has been recorded.
    pub fn avg_last(&self, n: usize) -> f64 {
        let mini = n.min(self.seen);
        if mini == 0 {
            0.0
        } else {
            self.count_last(mini).to_f64() / mini as f64
        }
    }

    pub fn capacity(&self) -> usize { self.capacity }

    /// Samples recorded since construction/reset, capped at capacity.
    pub fn samples_seen(&self) -> usize { self.seen }

    pub fn is_full(&self) -> bool { self.seen == self.capacity }

    /// Cell that receives the next total. Debug/inspection only.
    pub fn write_index(&self) -> usize { self.index }
}

/// Map `value` into `[0, maxi)` with a true mathematical modulo, so
/// negative inputs wrap toward positive instead of truncating.
fn normalize(value: i64, maxi: i64) -> usize {
    value.rem_euclid(maxi) as usize
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_buffer_is_not_significant() {
        let buf: DeltaBuffer<u64> = DeltaBuffer::new(5);
        assert!(!buf.has_significant(1));
        assert_eq!(buf.samples_seen(), 0);
        assert!(!buf.is_full());
    }

    #[test]
    fn significance_tracks_samples_and_saturates() {
        let mut buf: DeltaBuffer<u64> = DeltaBuffer::new(3);
        for total in [4u64, 9, 15, 22, 30, 41] {
            buf.add(total);
        }
        // Six adds into capacity 3: seen stays capped at 3.
        assert_eq!(buf.samples_seen(), 3);
        assert!(buf.is_full());
        assert!(buf.has_significant(3));
        assert!(!buf.has_significant(4));
    }

    #[test]
    fn count_last_differences_cumulative_totals() {
        let mut buf: DeltaBuffer<u64> = DeltaBuffer::new(8);
        let totals = [3u64, 7, 7, 19, 20];
        for &t in &totals {
            buf.add(t);
        }
        assert_eq!(buf.count_last(1), 20 - 19);
        assert_eq!(buf.count_last(2), 20 - 7);
        assert_eq!(buf.count_last(4), 20 - 3);
        // Five samples seen, baseline still zero.
        assert_eq!(buf.count_last(5), 20);
    }

    #[test]
    fn count_between_matches_count_last() {
        let mut buf: DeltaBuffer<u64> = DeltaBuffer::new(6);
        for total in [10u64, 12, 30, 31, 45, 50] {
            buf.add(total);
        }
        for j in 1..=6i64 {
            assert_eq!(buf.count_between(-j, 0), buf.count_last(j as usize));
        }
        assert_eq!(buf.count_between(-4, -2), 31 - 12);
        assert_eq!(buf.count_between(-1, -1), 0);
    }

    #[test]
    fn oversized_window_clamps_to_available_history() {
        let mut buf: DeltaBuffer<u64> = DeltaBuffer::new(10);
        buf.add(5);
        buf.add(11);
        assert_eq!(buf.count_last(100), buf.count_last(2));
        assert_eq!(buf.count_last(100), 11);
    }

    #[test]
    fn five_sample_scenario_with_clamped_window() {
        let mut buf: DeltaBuffer<u64> = DeltaBuffer::new(5);
        for total in [10u64, 15, 25, 25, 40] {
            buf.add(total);
        }
        assert_eq!(buf.samples_seen(), 5);
        assert_eq!(buf.count_last(1), 15);
        assert_eq!(buf.count_last(3), 25);
        assert_eq!(buf.count_last(10), buf.count_last(5));
        assert_eq!(buf.count_last(10), 30);
        assert_eq!(buf.avg_last(5), 6.0);
    }

    #[test]
    fn wraparound_keeps_full_window_correct() {
        let mut buf: DeltaBuffer<u64> = DeltaBuffer::new(3);
        for total in [2u64, 5, 9, 14] {
            buf.add(total);
        }
        // Four adds into four cells: the write index wrapped once and the
        // first total became the retained baseline.
        assert_eq!(buf.write_index(), 0);
        assert_eq!(buf.count_between(-3, 0), 14 - 2);
        assert_eq!(buf.count_last(2), 14 - 5);
    }

    #[test]
    fn avg_last_is_zero_without_data_and_uses_clamped_divisor() {
        let mut buf: DeltaBuffer<u64> = DeltaBuffer::new(4);
        assert_eq!(buf.avg_last(4), 0.0);
        buf.add(6);
        buf.add(10);
        // Two samples available: divisor is 2, not the requested 4.
        assert_eq!(buf.avg_last(4), 10.0 / 2.0);
        assert_eq!(buf.avg_last(1), 4.0);
    }

    #[test]
    fn reset_restarts_the_series_from_a_saved_total() {
        let mut buf: DeltaBuffer<u64> = DeltaBuffer::new(4);
        for total in [1u64, 2, 3] {
            buf.add(total);
        }
        buf.reset(100);
        assert_eq!(buf.samples_seen(), 0);
        assert!(!buf.has_significant(1));
        buf.add(107);
        assert_eq!(buf.count_last(1), 7);
    }

    #[test]
    fn float_buffer_averages() {
        let mut buf: DeltaBuffer<f64> = DeltaBuffer::new(3);
        buf.add(0.5);
        buf.add(2.0);
        buf.add(3.5);
        assert_eq!(buf.count_last(2), 3.0);
        assert!((buf.avg_last(3) - 3.5 / 3.0).abs() < 1e-12);
    }

    #[test]
    #[should_panic]
    fn count_between_rejects_inverted_range() {
        let buf: DeltaBuffer<u64> = DeltaBuffer::new(2);
        buf.count_between(0, -1);
    }

    #[test]
    #[should_panic]
    fn count_between_rejects_future_offsets() {
        let buf: DeltaBuffer<u64> = DeltaBuffer::new(2);
        buf.count_between(-1, 1);
    }

    #[test]
    #[should_panic]
    fn zero_capacity_is_rejected() {
        let _ = DeltaBuffer::<u64>::new(0);
    }
}
