pub mod cli;
pub mod commands;
pub mod config;
pub mod tui;

pub use taskdeck_core as core;
pub use taskdeck_core::board;
pub use taskdeck_core::database as db;
pub use taskdeck_core::model;
pub use taskdeck_core::session;

pub use taskdeck_core::AppConfig;
