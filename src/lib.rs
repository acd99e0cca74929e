// Core functionality
pub mod core {
    pub mod config;
    pub mod error;
    pub mod logging;
}

// Backend access
pub mod api {
    pub mod client;
    pub mod model;
}

// Search and result state
pub mod app {
    pub mod home;
}

// User interfaces
pub mod ui {
    pub mod card;
    pub mod cli;
    pub mod map;
    pub mod tags;
    pub mod tui;
}

// Re-export commonly used types
pub use crate::core::error::{Error, Result};
pub use crate::core::config::Config;
pub use crate::api::client::{Outcome, Request, VibeClient};
pub use crate::api::model::{Location, VibeResult, VibeReport};
pub use crate::app::home::{Home, Resolution, Ticket};
pub use crate::ui::card::VibeCard;
pub use crate::ui::cli::Cli;
pub use crate::ui::tui::VibeTui;
