//! State module - aggregation of records into the budget snapshot.

pub mod aggregator;
mod state_cache;
mod state_model;
mod state_service;

pub use aggregator::compute_state;
pub use state_cache::StateCache;
pub use state_model::{RecordSet, State};
pub use state_service::{StateService, StateServiceTrait};
