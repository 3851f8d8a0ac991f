//! # Counter Example
//!
//! Drives a subject from scripted key presses and shows three observers
//! reacting to every published value.
//!
//! Keys:
//! - `space` ─► increment
//! - `h`     ─► decrement
//! - `r`     ─► reset to zero
//!
//! The counter starts at 100. The score display is dropped halfway through
//! without unregistering; the subject skips it from then on.
//!
//! ## Run
//! ```bash
//! cargo run --example counter --features logging
//! cargo run --example counter --features logging -- "  h r "
//! ```

use std::rc::Rc;

use statecast::{Action, Counter, LogWriter, SharedSubject, State, Subscribe};
use tracing_subscriber::EnvFilter;

struct HealthDisplay;

impl Subscribe for HealthDisplay {
    fn on_notify(&self, value: State) {
        println!("[health] player health updated to: {value}");
    }
    fn name(&self) -> &'static str {
        "health"
    }
}

struct ScoreDisplay;

impl Subscribe for ScoreDisplay {
    fn on_notify(&self, value: State) {
        println!("[score]  player score updated to: {} points", value.saturating_mul(10));
    }
    fn name(&self) -> &'static str {
        "score"
    }
}

fn action_for(key: char) -> Option<Action> {
    match key {
        ' ' => Some(Action::Increment),
        'h' => Some(Action::Decrement),
        'r' => Some(Action::Reset),
        _ => None,
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("statecast=info")),
        )
        .init();

    let script = std::env::args().nth(1).unwrap_or_else(|| "  hr  ".to_string());

    let subject = SharedSubject::new();
    let health = Rc::new(HealthDisplay);
    let mut score = Some(Rc::new(ScoreDisplay));
    let logger = Rc::new(LogWriter::new("counter"));

    subject.add_observer(health.clone()).expect("default policy accepts every registration");
    if let Some(score) = &score {
        subject.add_observer(score.clone()).expect("default policy accepts every registration");
    }
    subject.add_observer(logger.clone()).expect("default policy accepts every registration");

    let mut counter = Counter::new(subject.clone(), 100);
    let keys: Vec<char> = script.chars().collect();
    let half = keys.len() / 2;

    for (i, key) in keys.into_iter().enumerate() {
        if i == half {
            println!("-- dropping score display --");
            score = None;
        }
        match action_for(key) {
            Some(action) => {
                counter.apply(action);
            }
            None => println!("(ignored key {key:?})"),
        }
    }

    drop(score);
    println!("final state: {}, registered: {}", subject.state(), subject.len());
}
