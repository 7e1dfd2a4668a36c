use clap::Parser;
use rentwatch::adapter::inbound::cli::command::{CheckCommand, Cli, ColorChoice, Commands};
use rentwatch::adapter::inbound::cli::output::{self, OutputConfig};
use rentwatch::adapter::inbound::cli::{check, run, status};
use rentwatch::error::{report, Result};

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    output::configure(OutputConfig::new(cli.json, cli.quiet, cli.verbose));

    match cli.color {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        ColorChoice::Auto => {}
    }

    if let Err(e) = dispatch(cli.command).await {
        output::error(&report(&e));
        std::process::exit(1);
    }
}

async fn dispatch(command: Commands) -> Result<()> {
    match command {
        Commands::Once(args) => run::execute_once(&args).await,
        Commands::Watch(args) => run::execute_watch(&args).await,
        Commands::Check(CheckCommand::Config(arg)) => check::config::execute_config(&arg.config),
        Commands::Check(CheckCommand::Telegram(arg)) => {
            check::telegram::execute_telegram(&arg.config).await
        }
        Commands::Status(args) => {
            status::execute(&args).await;
            Ok(())
        }
    }
}
