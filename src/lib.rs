pub use taskdeck_tui::cli;
pub use taskdeck_tui::commands;
pub use taskdeck_tui::config;
pub use taskdeck_tui::tui;
pub use taskdeck_tui::AppConfig;

pub use taskdeck_core as core;
pub use taskdeck_core::board;
pub use taskdeck_core::calendar;
pub use taskdeck_core::database as db;
pub use taskdeck_core::model;
pub use taskdeck_core::pipeline;
pub use taskdeck_core::session;
pub use taskdeck_core::summary;
