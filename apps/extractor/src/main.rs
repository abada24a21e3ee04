mod cli;
mod command;
mod config;
mod error;

use error::WrapErr;

use clap::CommandFactory;
use clap::Parser;
use tracing::Level;

fn log_level(verbose: u8) -> Level {
    match verbose {
        0 => Level::INFO,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    }
}

#[tokio::main]
async fn main() -> error::Result<()> {
    color_eyre::install()?;
    let command_line = cli::Cli::parse();

    tracing_subscriber::fmt()
        .with_max_level(log_level(command_line.verbose))
        .init();

    let Some(command) = command_line.command else {
        cli::Cli::command().print_help()?;
        return Ok(());
    };

    let cfg = config::Config::load(command_line.config.as_deref(), &command_line.project)
        .wrap_err("Load configuration error")?;

    let cmd: Box<dyn command::Command> = match command {
        cli::Commands::Extract { strict } => Box::new(command::ExtractCommand::new(cfg, strict)),
        cli::Commands::Mirror => Box::new(command::MirrorCommand::new(cfg)),
        cli::Commands::Index { strict } => Box::new(command::IndexCommand::new(cfg, strict)),
        cli::Commands::List => Box::new(command::ListCommand::new(cfg)),
        cli::Commands::Doc { name, lang } => Box::new(command::DocCommand::new(cfg, name, lang)),
    };
    cmd.execute().await?;

    Ok(())
}
