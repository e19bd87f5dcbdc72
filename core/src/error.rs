//! Errors raised by the evaluator's collaborators.
//!
//! The evaluator has no failure modes of its own. Every error here
//! originates in a store or classifier and is propagated unchanged.

use std::error::Error as StdError;

use thiserror::Error;

use catwatch_types::SensorName;

type BoxedSource = Box<dyn StdError + Send + Sync + 'static>;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("unknown sensor '{0}'")]
    UnknownSensor(SensorName),
    #[error("security store unavailable")]
    Unavailable {
        #[source]
        source: BoxedSource,
    },
}

impl StoreError {
    pub fn unavailable(source: impl Into<BoxedSource>) -> Self {
        Self::Unavailable {
            source: source.into(),
        }
    }
}

#[derive(Debug, Error)]
#[error("image classification failed")]
pub struct ClassifierError {
    #[source]
    source: BoxedSource,
}

impl ClassifierError {
    pub fn new(source: impl Into<BoxedSource>) -> Self {
        Self {
            source: source.into(),
        }
    }
}

#[derive(Debug, Error)]
pub enum EvaluatorError {
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    Classifier(#[from] ClassifierError),
}
