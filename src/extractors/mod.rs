//! Request extractors with JSON error bodies.

pub mod json;

pub use json::JsonBody;
