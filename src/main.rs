use anyhow::Result;
use clap::Parser;
use saint_of_the_day::{cli::Args, logger};

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    logger::init(args.verbose);

    args.run().await?;
    Ok(())
}
