mod commands;
mod terminal;

use commands::{CommandLine, sweep};
use lanscan_common::config::ScanConfig;
use terminal::{logging, print};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let commands = CommandLine::parse_args();

    logging::init_logging(commands.verbose);

    let cfg: ScanConfig = commands.into_config();
    print::banner(cfg.quiet);

    sweep::sweep(&cfg).await
}
