use anyhow::Result;
use clap::Parser;
use tracing_subscriber::filter::Directive;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let cli = taskdeck::cli::Cli::parse();
    init_tracing(cli.log_filter.clone())?;

    match cli.command.clone() {
        Some(taskdeck::cli::CliCommand::Tui) | None => {
            let config = taskdeck::config::from_cli(&cli)?;
            taskdeck::tui::run(config)?;
        }
        Some(command) => {
            let config = taskdeck::config::from_cli(&cli)?;
            let stdout = std::io::stdout();
            let mut handle = stdout.lock();
            taskdeck::commands::execute(&config, command, &mut handle)?;
        }
    }

    Ok(())
}

fn init_tracing(filter: Option<String>) -> Result<()> {
    // Quiet by default; `--log` or RUST_LOG opens it up.
    let filter = filter.unwrap_or_else(|| "warn".to_string());
    let directive: Directive = filter.parse()?;
    let env_filter = EnvFilter::builder()
        .with_default_directive(directive)
        .from_env_lossy();

    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .try_init();
    Ok(())
}
