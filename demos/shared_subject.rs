//! # Example: shared_subject
//!
//! Several threads share one [`SharedSubject`]: a producer updates the
//! payload and broadcasts while listeners join and leave.
//!
//! ## Run
//! ```bash
//! RUST_LOG=info cargo run --example shared_subject --features logging
//! ```

use std::sync::Arc;
use std::thread;
use std::time::Duration;

use herald::{LogObserver, ObserverRef, SharedSubject, Subject};
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let subject: SharedSubject<u32> = Subject::with_payload(0).into();

    let producer = {
        let subject = subject.clone();
        thread::spawn(move || {
            for tick in 1..=5 {
                subject.set_payload(tick);
                let report = subject.broadcast();
                println!("[producer] tick={tick} delivered={}", report.delivered());
                thread::sleep(Duration::from_millis(50));
            }
        })
    };

    let listeners: Vec<_> = ["left", "right"]
        .into_iter()
        .map(|name| {
            let subject = subject.clone();
            thread::spawn(move || {
                let me: ObserverRef<u32> = Arc::new(LogObserver::<u32>::new(name));
                subject.attach(me.clone());
                thread::sleep(Duration::from_millis(120));
                subject.detach(&me);
            })
        })
        .collect();

    for l in listeners {
        let _ = l.join();
    }
    let _ = producer.join();

    println!("observers left: {}", subject.count_observers());
}
