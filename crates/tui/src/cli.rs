use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug, Clone)]
#[command(
    name = "taskdeck",
    version,
    about = "A keyboard-first personal task board with a month-calendar view.",
    after_help = "Examples:\n  taskdeck                          Launch the TUI (same as `taskdeck tui`)\n  taskdeck signup --name Ada --email ada@example.com\n  taskdeck login ada@example.com\n  taskdeck whoami --json"
)]
pub struct Cli {
    /// Override the data directory (defaults to platform-specific app dir)
    #[arg(long, value_name = "PATH", global = true)]
    pub data_dir: Option<PathBuf>,

    /// Tracing filter directive (e.g. "info", "taskdeck_core=debug")
    #[arg(long = "log", value_name = "DIRECTIVE", global = true)]
    pub log_filter: Option<String>,

    #[command(subcommand)]
    pub command: Option<CliCommand>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum CliCommand {
    /// Launch the keyboard-first terminal UI (default command)
    Tui,
    /// Create a profile and sign it in
    Signup(SignupArgs),
    /// Sign in to an existing profile by email
    Login(LoginArgs),
    /// Sign out of the current profile
    Logout,
    /// Show the signed-in profile
    Whoami(WhoamiArgs),
}

#[derive(Args, Debug, Clone)]
pub struct SignupArgs {
    /// Display name for the new profile
    #[arg(long)]
    pub name: String,

    /// Email identifying the profile (must be unique)
    #[arg(long)]
    pub email: String,
}

#[derive(Args, Debug, Clone)]
pub struct LoginArgs {
    /// Email of the profile to sign in
    #[arg(value_name = "EMAIL")]
    pub email: String,
}

#[derive(Args, Debug, Clone)]
pub struct WhoamiArgs {
    /// Emit the profile as JSON instead of text
    #[arg(long)]
    pub json: bool,
}
