//! Feeds a simulated sensor stream into two histograms through one sink and
//! prints the reports.

use fixed_histogram::sink::{self, Sink};
use fixed_histogram::{AtomicHistogram, Histogram};
use rand::Rng;
use std::sync::Arc;

fn main() {
    let mut rng = rand::thread_rng();

    let mut coarse = Histogram::new(0.0, 12.0, 4).unwrap();
    let mut fine = Histogram::new(0.0, 12.0, 12).unwrap();
    let mut count = 0_u64;
    let mut sum = 0.0;

    {
        let mut sinks = (
            &mut coarse,
            (
                &mut fine,
                sink::from_fn(|value| {
                    count += 1;
                    sum += value;
                }),
            ),
        );

        for _ in 0..1_000 {
            sinks.accept(rng.gen_range(-1.0..13.0));
        }
    }

    println!("coarse:\n{coarse}");
    println!("fine:\n{fine}");
    println!("mean: {}", sum / count as f64);

    // concurrent producers share an atomic histogram
    let shared = Arc::new(AtomicHistogram::new(0.0, 1.0, 5).unwrap());
    let producers: Vec<_> = (0..4)
        .map(|_| {
            let mut shared = shared.clone();
            std::thread::spawn(move || {
                let mut rng = rand::thread_rng();
                for _ in 0..250 {
                    shared.accept(rng.gen());
                }
            })
        })
        .collect();

    for producer in producers {
        producer.join().unwrap();
    }

    println!("shared:\n{shared}");
}
