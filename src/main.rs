use clap::Parser;
use log::*;

use draft_autorelease::{Args, GithubCli, Outcome, Promoter, Result};

fn initialize_logger(debug: bool) -> Result<()> {
    let filter = if debug {
        simplelog::LevelFilter::Debug
    } else {
        simplelog::LevelFilter::Info
    };

    let config = simplelog::ConfigBuilder::new()
        .add_filter_allow_str("draft_autorelease")
        .build();

    simplelog::TermLogger::init(
        filter,
        config,
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    )?;

    Ok(())
}

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let cli_args = Args::parse();

    initialize_logger(cli_args.debug)?;

    let config = cli_args.get_config()?;
    let store = GithubCli::new(&config);
    let promoter = Promoter::new(&config, &store);

    promoter.log_config();

    match promoter.run().await? {
        Outcome::Promoted { tag } => info!("auto-release of {tag} complete"),
        outcome => debug!("finished without promoting: {outcome:?}"),
    }

    Ok(())
}
