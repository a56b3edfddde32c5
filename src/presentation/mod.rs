//! Presentation layer: the command-line front end.

/// Application orchestrator.
pub mod app;
/// Workspace and generation commands.
pub mod commands;
/// Routes and session-event handling.
pub mod navigation;
/// Terminal output.
pub mod output;

pub use app::App;
pub use navigation::{NavigationController, Navigator, Route};
