pub mod engine;
pub mod invariants;
pub mod selection_model;
