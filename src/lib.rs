//! Landit - a command-line client for the LanditAI job-application assistant.
//!
//! This crate keeps the signed-in session in sync with the backend and routes
//! resume, job, cold-email and generation requests through a single HTTP
//! gateway that attaches the bearer token and reacts to expired sessions.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

/// Application layer containing the session store, use cases and DTOs.
pub mod application;
/// Domain layer containing entities, errors, and port definitions.
pub mod domain;
/// Infrastructure layer containing adapters for external services.
pub mod infrastructure;
/// Presentation layer containing the command-line front end.
pub mod presentation;

/// Current version of the application.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name.
pub const NAME: &str = "landit";
