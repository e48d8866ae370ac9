use clap::Parser;
use cronwf_lib::Cli;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .init();

    cronwf_lib::run(Cli::parse()).await
}
