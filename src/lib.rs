//! Resume match client library

pub mod cli;
pub mod config;
pub mod error;
pub mod input;
pub mod model;
pub mod output;
pub mod service;
pub mod session;

pub use error::{Result, ResumeMatchError};
pub use config::Config;
