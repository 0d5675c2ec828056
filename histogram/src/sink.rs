//! A narrow interface for anything that consumes a stream of samples.
//!
//! Producers that only need to hand off values can take `impl Sink` instead of
//! a concrete histogram. Tuples, slices, and vectors of sinks forward every
//! sample to each member, which makes it easy to feed one stream into several
//! consumers.

use crate::{AtomicHistogram, Histogram};
use std::sync::Arc;

/// Accepts `f64` samples.
pub trait Sink {
    fn accept(&mut self, value: f64);
}

impl Sink for Histogram {
    fn accept(&mut self, value: f64) {
        self.record(value)
    }
}

impl Sink for AtomicHistogram {
    fn accept(&mut self, value: f64) {
        self.record(value)
    }
}

impl Sink for &AtomicHistogram {
    fn accept(&mut self, value: f64) {
        self.record(value)
    }
}

impl Sink for Arc<AtomicHistogram> {
    fn accept(&mut self, value: f64) {
        self.record(value)
    }
}

impl<S: Sink + ?Sized> Sink for &mut S {
    fn accept(&mut self, value: f64) {
        (**self).accept(value)
    }
}

impl<S: Sink + ?Sized> Sink for Box<S> {
    fn accept(&mut self, value: f64) {
        (**self).accept(value)
    }
}

impl<A: Sink, B: Sink> Sink for (A, B) {
    fn accept(&mut self, value: f64) {
        self.0.accept(value);
        self.1.accept(value);
    }
}

impl<S: Sink> Sink for [S] {
    fn accept(&mut self, value: f64) {
        for sink in self.iter_mut() {
            sink.accept(value);
        }
    }
}

impl<S: Sink> Sink for Vec<S> {
    fn accept(&mut self, value: f64) {
        self.as_mut_slice().accept(value)
    }
}

/// A sink which calls a closure for every sample. Created by [`from_fn`].
pub struct FromFn<F>(F);

/// Creates a sink which calls the provided closure for every sample.
///
/// ```
/// use fixed_histogram::sink::{self, Sink};
///
/// let mut total = 0.0;
/// let mut sum = sink::from_fn(|value| total += value);
/// sum.accept(1.5);
/// sum.accept(2.5);
/// drop(sum);
///
/// assert_eq!(total, 4.0);
/// ```
pub fn from_fn<F: FnMut(f64)>(f: F) -> FromFn<F> {
    FromFn(f)
}

impl<F: FnMut(f64)> Sink for FromFn<F> {
    fn accept(&mut self, value: f64) {
        (self.0)(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn feed(mut sink: impl Sink, values: &[f64]) {
        for value in values {
            sink.accept(*value);
        }
    }

    #[test]
    fn histogram() {
        let mut histogram = Histogram::new(0.0, 10.0, 5).unwrap();
        feed(&mut histogram, &[1.0, 2.0, 20.0]);
        assert_eq!(histogram.as_slice(), &[0, 1, 1, 0, 0, 0, 1]);

        let atomic = Arc::new(AtomicHistogram::new(0.0, 10.0, 5).unwrap());
        feed(&*atomic, &[1.0]);
        feed(atomic.clone(), &[-1.0]);
        assert_eq!(atomic.snapshot().as_slice(), &[1, 1, 0, 0, 0, 0, 0]);
    }

    #[test]
    // one stream fans out to every member
    fn fan_out() {
        let mut coarse = Histogram::new(0.0, 10.0, 2).unwrap();
        let mut fine = Histogram::new(0.0, 10.0, 10).unwrap();
        let mut count = 0;

        feed(
            (&mut coarse, (&mut fine, from_fn(|_| count += 1))),
            &[0.5, 4.5, 9.5],
        );

        assert_eq!(coarse.as_slice(), &[0, 2, 1, 0]);
        assert_eq!(fine.total_count(), 3);
        assert_eq!(fine.as_slice()[5], 1);
        assert_eq!(count, 3);

        let mut sinks: Vec<Box<dyn Sink>> = vec![
            Box::new(Histogram::new(0.0, 1.0, 1).unwrap()),
            Box::new(from_fn(|_| {})),
        ];
        feed(&mut sinks, &[0.5]);
    }
}
