// src/main.rs

use clap::Parser;

use mirrorctl::cli::CliArgs;
use mirrorctl::logging::init_logging;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = CliArgs::parse();
    init_logging(args.log_level)?;

    let code = mirrorctl::run(args).await?;
    if code != 0 {
        std::process::exit(code);
    }
    Ok(())
}
