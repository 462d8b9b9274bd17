//! Request validation ahead of the store.

pub mod validation;

pub use validation::RequestValidator;
