use anyhow::Result;
use clap::Parser as ClapParser;

use sheetnest_cli::io;
use sheetnest_cli::io::cli::Cli;

#[tokio::main]
async fn main() -> Result<()> {
    let args = Cli::parse();
    io::init_logger(args.log_level)?;

    sheetnest_cli::run(&args).await?;
    Ok(())
}
