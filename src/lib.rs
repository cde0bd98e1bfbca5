//! # cardbox-core - flashcard scheduling core
//!
//! Pure Rust implementation of the spaced-repetition scheduler behind the
//! cardbox review app:
//!
//! - **Scheduler** - per-review memory state transition (stability,
//!   difficulty, retrievability, next due date)
//! - **MemoryState / ReviewRecord** - the value types the storage layer
//!   persists between reviews
//! - **SchedulerConfig** - the 21 calibrated weights plus the desired
//!   retention target
//!
//! The scheduler owns no state between calls and performs no I/O: the
//! caller supplies the card's persisted [`MemoryState`] and the review
//! timestamp, and gets back a freshly computed state to persist. That keeps
//! every operation deterministic, trivially unit-testable and safe to call
//! from any number of tasks at once.
//!
//! The HTTP surface, card/deck storage and deck import live in sibling
//! crates; this crate is their only source of scheduling decisions.

pub mod config;
pub mod error;
pub mod logging;
pub mod scheduler;
pub mod types;

pub use config::{SchedulerConfig, DEFAULT_WEIGHTS, WEIGHT_COUNT};
pub use error::ScheduleError;
pub use scheduler::Scheduler;
pub use types::{Grade, MemoryState, ReviewRecord, Stage};
