//! # Example: basic
//!
//! Broadcast, multicast and whisper on a single-threaded [`Subject`].
//!
//! ## Flow
//! ```text
//! Subject("v1", {alice, bob, carol})
//!     ├─► broadcast()          ──► alice, bob, carol
//!     ├─► multicast(&[bob])    ──► alice, carol
//!     ├─► clear_payload()
//!     └─► whisper(&dave)       ──► dave (not attached, payload-less signal)
//! ```
//!
//! ## Run
//! ```bash
//! RUST_LOG=trace cargo run --example basic
//! ```

use std::sync::Arc;

use herald::{Observer, ObserverRef, ReceiveError, Subject};
use tracing_subscriber::EnvFilter;

struct Person(&'static str);

impl Observer<String> for Person {
    fn receive(&self) -> Result<(), ReceiveError> {
        println!("[{}] ping (no payload)", self.0);
        Ok(())
    }

    fn receive_payload(&self, payload: &String) -> Result<(), ReceiveError> {
        println!("[{}] got {payload:?}", self.0);
        Ok(())
    }

    fn name(&self) -> &'static str {
        self.0
    }
}

fn person(name: &'static str) -> ObserverRef<String> {
    Arc::new(Person(name))
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let (alice, bob, carol) = (person("alice"), person("bob"), person("carol"));
    let mut subject = Subject::with_observers(
        Some("v1".to_string()),
        [alice.clone(), bob.clone(), carol.clone()],
    );

    // Re-attaching is a no-op.
    subject.attach(alice.clone());
    println!("observers: {}", subject.count_observers());

    println!("\n-- broadcast");
    subject.broadcast();

    println!("\n-- multicast (without bob)");
    subject.multicast(&[bob.clone()]);

    println!("\n-- whisper to dave (not attached)");
    subject.clear_payload();
    let dave = person("dave");
    subject.whisper(&dave);

    subject.detach(&bob);
    println!("\nbob attached: {}", subject.contains_observer(&bob));
}
