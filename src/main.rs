use clap::Parser;

mod affected;
mod cli;
mod command;
mod config;
mod exec;
mod publisher;
mod record;
mod report;
mod result;
mod tags;

use crate::result::Result;

fn initialize_logger(debug: bool) -> Result<()> {
    let filter = if debug {
        simplelog::LevelFilter::Debug
    } else {
        simplelog::LevelFilter::Info
    };

    let config = simplelog::ConfigBuilder::new()
        .add_filter_allow_str("shipwright")
        .build();

    simplelog::TermLogger::init(
        filter,
        config,
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    )?;

    Ok(())
}

fn main() -> Result<()> {
    color_eyre::install()?;

    let cli_args = cli::Args::parse();

    initialize_logger(cli_args.debug)?;

    let config = config::Config::load(cli_args.config.as_deref())?;
    let env = cli::CiEnvironment::from_env();

    match &cli_args.command {
        cli::Command::Changeset { description } => command::changeset::execute(
            &config.changeset,
            description.as_deref(),
            &env,
        ),
        cli::Command::Publish => command::publish::execute(&config.publish, &env),
    }
}
