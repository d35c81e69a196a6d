//! Question understanding for the campus assistant.
//!
//! A question flows through three stages:
//! 1. **Normalization** (`normalizer`, `morph`) - strip punctuation, reduce words to a normal
//!    form, drop stop words.
//! 2. **Classification** (`classifier`, `extractors`, `roster`) - a fixed-priority decision
//!    chain picks exactly one category and the entities the student asked about.
//! 3. **Dispatch** (`dispatcher`, `formatting`) - the category and entities are rendered
//!    into reply text from the campus directory and split for transport.
//!
//! `AgentRuntime` wires the stages together for the server and CLI.
//!
//! Classification never fails from the caller's point of view: faults inside the chain
//! degrade to an unknown question with no entities.

pub mod classifier;
pub mod dispatcher;
pub mod extractors;
pub mod formatting;
pub mod morph;
pub mod normalizer;
pub mod roster;
pub mod runtime;
pub mod sanitize;

pub use classifier::{Classifier, ClassifyError, DecisionStep, QueryContext};
pub use dispatcher::ResponseDispatcher;
pub use morph::{MorphReducer, ReduceError};
pub use normalizer::Normalizer;
pub use roster::{RosterIndex, SharedRoster};
pub use runtime::{AgentRuntime, Reply};
