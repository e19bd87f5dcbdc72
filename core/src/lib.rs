//! Decision core for Catwatch.
//!
//! [`AlarmEvaluator`] owns the alarm transition rules. It reads and writes
//! sensor, arming and alarm state through a [`SecurityStore`], asks an
//! [`ImageClassifier`] whether a camera frame contains a cat, and reports
//! every change to registered [`StatusListener`]s.
//!
//! The evaluator is synchronous and takes `&mut self` for every event.
//! Hosts that receive events from several threads put the evaluator (which
//! owns its store) behind a single `Mutex`.

pub mod error;
mod evaluator;
pub mod events;
mod memory_store;
pub mod ports;

pub use error::{ClassifierError, EvaluatorError, StoreError};
pub use evaluator::{AlarmEvaluator, CAT_CONFIDENCE_THRESHOLD, ListenerId};
pub use events::StatusEvent;
pub use memory_store::MemoryStore;
pub use ports::{ImageClassifier, SecurityStore, StatusListener};
