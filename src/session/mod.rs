//! Submission state for one interactive session

pub mod controller;

pub use controller::{SessionPhase, SubmissionController};
