#![deny(clippy::wildcard_imports)]
#![cfg_attr(test, allow(clippy::wildcard_imports))]

pub mod config;
pub mod controller;
pub mod domain;
pub mod error;
pub mod errors;
pub mod protocol;
pub mod services;
pub mod ui;

#[cfg(test)]
pub mod test_bootstrap;

// Re-exports for public API
pub use config::client::ClientConfig;
pub use controller::{Controller, ControllerOptions};
pub use domain::{Choice, GameId, Phase, Player, PlayerId};
pub use error::AppError;
pub use errors::ErrorCode;
pub use protocol::GameSubmission;
pub use services::{GameService, HttpGameService};
pub use ui::View;

// Auto-initialize logging for unit tests
#[cfg(test)]
#[ctor::ctor]
fn init_test_logging() {
    test_bootstrap::logging::init();
}
