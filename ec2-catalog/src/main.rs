use clap::Parser;
use ec2_catalog::settings::Settings;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    // Diagnostics go to stderr; stdout only carries the confirmation line.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("ec2_catalog=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let settings = Settings::parse();
    ec2_catalog::run(&settings).await
}
