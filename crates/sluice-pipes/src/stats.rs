//! Running statistics gathered as a side effect of a traversal

use crate::pipe::{Path, PathItem, Pipe};
use crate::source::{BindSource, Source};
use sluice_core::Value;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Below this many samples `std_dev` applies Bessel's correction
pub const SMALL_SAMPLE_CUTOFF: u64 = 30;

/// Elements that may carry a number
pub trait Numeric {
    fn as_number(&self) -> Option<f64>;
}

impl Numeric for f64 {
    fn as_number(&self) -> Option<f64> {
        Some(*self)
    }
}

impl Numeric for i64 {
    fn as_number(&self) -> Option<f64> {
        Some(*self as f64)
    }
}

impl Numeric for Value {
    fn as_number(&self) -> Option<f64> {
        self.as_f64()
    }
}

fn add_bits(cell: &AtomicU64, x: f64) {
    let mut seen = cell.load(Ordering::Relaxed);
    loop {
        let updated = (f64::from_bits(seen) + x).to_bits();
        match cell.compare_exchange_weak(seen, updated, Ordering::AcqRel, Ordering::Relaxed) {
            Ok(_) => return,
            Err(actual) => seen = actual,
        }
    }
}

/// Lock-free count, sum and sum of squares
///
/// Safe to read from another thread while a pipe feeds it. Reads are
/// eventually consistent: the three fields are updated independently.
#[derive(Debug, Default)]
pub struct RunningStats {
    count: AtomicU64,
    sum: AtomicU64,
    sum_sq: AtomicU64,
}

impl RunningStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&self, x: f64) {
        add_bits(&self.sum, x);
        add_bits(&self.sum_sq, x * x);
        self.count.fetch_add(1, Ordering::AcqRel);
    }

    pub fn count(&self) -> u64 {
        self.count.load(Ordering::Acquire)
    }

    pub fn sum(&self) -> f64 {
        f64::from_bits(self.sum.load(Ordering::Acquire))
    }

    pub fn mean(&self) -> Option<f64> {
        match self.count() {
            0 => None,
            n => Some(self.sum() / n as f64),
        }
    }

    fn squared_deviation(&self, n: u64) -> f64 {
        let sum = self.sum();
        let sum_sq = f64::from_bits(self.sum_sq.load(Ordering::Acquire));
        (sum_sq - sum * sum / n as f64).max(0.0)
    }

    /// Standard deviation, dividing by N-1 while 2 <= N < 30 and by N otherwise
    pub fn std_dev(&self) -> Option<f64> {
        let n = self.count();
        if n == 0 {
            return None;
        }
        let divisor = if (2..SMALL_SAMPLE_CUTOFF).contains(&n) { n - 1 } else { n };
        Some((self.squared_deviation(n) / divisor as f64).sqrt())
    }

    /// Standard deviation dividing by N
    pub fn population_std_dev(&self) -> Option<f64> {
        match self.count() {
            0 => None,
            n => Some((self.squared_deviation(n) / n as f64).sqrt()),
        }
    }

    pub fn clear(&self) {
        self.count.store(0, Ordering::Release);
        self.sum.store(0f64.to_bits(), Ordering::Release);
        self.sum_sq.store(0f64.to_bits(), Ordering::Release);
    }
}

/// Passes elements through unchanged while accumulating the numeric ones
///
/// Elements that carry no number are emitted but not counted.
pub struct StdDevPipe<'a, E> {
    source: Source<'a, E>,
    stats: Arc<RunningStats>,
    current: Option<E>,
}

impl<'a, E: Numeric + Clone + Into<PathItem> + 'a> StdDevPipe<'a, E> {
    pub fn new(source: Source<'a, E>) -> Self {
        Self {
            source,
            stats: Arc::new(RunningStats::new()),
            current: None,
        }
    }

    /// Shared handle on the accumulator
    pub fn stats(&self) -> Arc<RunningStats> {
        Arc::clone(&self.stats)
    }
}

impl<'a, E: Numeric + Clone + Into<PathItem> + 'a> Pipe for StdDevPipe<'a, E> {
    type Item = E;

    fn advance(&mut self) -> bool {
        self.current = self.source.pull();
        match &self.current {
            Some(element) => {
                if let Some(x) = element.as_number() {
                    self.stats.add(x);
                }
                true
            }
            None => false,
        }
    }

    fn current(&self) -> Option<&E> {
        self.current.as_ref()
    }

    fn reset(&mut self) {
        tracing::trace!(count = self.stats.count(), "Clearing running stats");
        self.stats.clear();
        self.current = None;
        self.source.reset();
    }

    fn path(&self) -> Path {
        self.source.path()
    }
}

impl<'a, E: Numeric + Clone + Into<PathItem> + 'a> BindSource<'a, E> for StdDevPipe<'a, E> {
    fn set_source(&mut self, source: Source<'a, E>) {
        self.source = source;
        self.stats.clear();
        self.current = None;
    }
}
