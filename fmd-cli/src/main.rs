//! Forest dashboard CLI - inspect the layer registry, fire statistics and
//! the GeoServer endpoints behind the map.

use clap::Parser;

#[derive(Parser)]
#[command(
    name = "fmd-cli",
    version,
    about = "Forest Monitoring Dashboard toolkit"
)]
struct Cli {
    #[command(flatten)]
    opts: fmd_cmd::GlobalOpts,

    #[command(subcommand)]
    command: fmd_cmd::Command,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    fmd_cmd::run(cli.command, cli.opts).await
}
