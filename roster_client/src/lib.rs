//! Mobile-side student screen: HTTP client for the Record API and the screen's state and event handlers.
//!
//! The controller is independent of any UI toolkit: a view renders [`StudentScreen`]'s state and
//! forwards taps and text input to its methods.

pub mod api;
pub mod error;
pub mod models;
pub mod screen;

pub use api::{HttpStudentApi, StudentApi};
pub use error::ClientError;
pub use models::{StudentForm, StudentRecord};
pub use screen::{Alert, Modal, StudentScreen, SubmitOutcome};
