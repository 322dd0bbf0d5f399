use std::io::Write;

use anyhow::{anyhow, Result};

use crate::cli::{CliCommand, LoginArgs, SignupArgs, WhoamiArgs};
use crate::config::AppConfig;
use crate::db::Database;
use crate::session::Session;

pub fn execute<W: Write>(config: &AppConfig, command: CliCommand, mut writer: W) -> Result<()> {
    match command {
        CliCommand::Signup(args) => handle_signup(config, &args, &mut writer),
        CliCommand::Login(args) => handle_login(config, &args, &mut writer),
        CliCommand::Logout => handle_logout(config, &mut writer),
        CliCommand::Whoami(args) => handle_whoami(config, &args, &mut writer),
        CliCommand::Tui => Err(anyhow!("launch the TUI directly")),
    }
}

fn handle_signup<W: Write>(config: &AppConfig, args: &SignupArgs, mut writer: W) -> Result<()> {
    let database = Database::initialize(config)?;
    let mut session = Session::initialize(&database)?;
    let user = session.sign_up(&database, &args.name, &args.email)?;
    writeln!(writer, "Signed up and logged in as {} <{}>", user.name, user.email)?;
    Ok(())
}

fn handle_login<W: Write>(config: &AppConfig, args: &LoginArgs, mut writer: W) -> Result<()> {
    let database = Database::initialize(config)?;
    let mut session = Session::initialize(&database)?;
    let user = session.log_in(&database, &args.email)?;
    writeln!(writer, "Logged in as {} <{}>", user.name, user.email)?;
    Ok(())
}

fn handle_logout<W: Write>(config: &AppConfig, mut writer: W) -> Result<()> {
    let database = Database::initialize(config)?;
    let mut session = Session::initialize(&database)?;
    if session.is_authenticated() {
        session.log_out(&database)?;
        writeln!(writer, "Logged out")?;
    } else {
        writeln!(writer, "No profile is signed in")?;
    }
    Ok(())
}

fn handle_whoami<W: Write>(config: &AppConfig, args: &WhoamiArgs, mut writer: W) -> Result<()> {
    let database = Database::initialize(config)?;
    let session = Session::initialize(&database)?;
    match session.current_user() {
        Some(user) if args.json => {
            writeln!(writer, "{}", serde_json::to_string_pretty(user)?)?;
        }
        Some(user) => {
            writeln!(writer, "{} <{}>", user.name, user.email)?;
        }
        None => {
            writeln!(writer, "No profile is signed in")?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn temp_config() -> (AppConfig, TempDir) {
        let dir = TempDir::new().expect("temp dir");
        let config = AppConfig::from_data_dir(dir.path().to_path_buf()).expect("config");
        (config, dir)
    }

    fn run(config: &AppConfig, command: CliCommand) -> String {
        let mut output = Vec::new();
        execute(config, command, &mut output).expect("execute");
        String::from_utf8(output).expect("utf8")
    }

    fn signup_args() -> SignupArgs {
        SignupArgs {
            name: String::from("Ada"),
            email: String::from("ada@example.com"),
        }
    }

    #[test]
    fn signup_then_whoami_reports_the_profile() {
        let (config, _dir) = temp_config();
        let output = run(&config, CliCommand::Signup(signup_args()));
        assert!(output.contains("Signed up and logged in as Ada"));

        let whoami = run(&config, CliCommand::Whoami(WhoamiArgs { json: false }));
        assert!(whoami.contains("Ada <ada@example.com>"));
    }

    #[test]
    fn whoami_json_is_machine_readable() {
        let (config, _dir) = temp_config();
        run(&config, CliCommand::Signup(signup_args()));

        let output = run(&config, CliCommand::Whoami(WhoamiArgs { json: true }));
        let value: serde_json::Value = serde_json::from_str(&output).expect("json");
        assert_eq!(value["email"], "ada@example.com");
    }

    #[test]
    fn logout_clears_the_session() {
        let (config, _dir) = temp_config();
        run(&config, CliCommand::Signup(signup_args()));
        let output = run(&config, CliCommand::Logout);
        assert!(output.contains("Logged out"));

        let whoami = run(&config, CliCommand::Whoami(WhoamiArgs { json: false }));
        assert!(whoami.contains("No profile is signed in"));

        // A second logout is a no-op, not an error.
        let again = run(&config, CliCommand::Logout);
        assert!(again.contains("No profile is signed in"));
    }

    #[test]
    fn login_requires_an_existing_profile() {
        let (config, _dir) = temp_config();
        let mut output = Vec::new();
        let err = execute(
            &config,
            CliCommand::Login(LoginArgs {
                email: String::from("ghost@example.com"),
            }),
            &mut output,
        );
        assert!(err.is_err());

        run(&config, CliCommand::Signup(signup_args()));
        run(&config, CliCommand::Logout);
        let logged = run(
            &config,
            CliCommand::Login(LoginArgs {
                email: String::from("ada@example.com"),
            }),
        );
        assert!(logged.contains("Logged in as Ada"));
    }
}
