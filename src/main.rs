use brrtapi::cli::{run_cli, Cli};
use brrtapi::otel;
use clap::Parser;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    otel::init_logging(&cli.log_level)?;
    run_cli(cli)
}
