mod cli;

use anyhow::Result;
use clap::Parser;
use cli::Cli;
use video_info_server_lib::{config, server};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Respect RUST_LOG if set, otherwise pick defaults from the verbose flag
    let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| {
        if cli.verbose {
            "video_info_server=debug,video_info_server_lib=debug,tower_http=debug".to_string()
        } else {
            "video_info_server=info,video_info_server_lib=info,tower_http=info".to_string()
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(&env_filter)
        .init();

    let mut config = config::load_config_or_default(cli.config.as_deref())?;
    config.apply_env();
    cli.apply(&mut config);
    config.validate()?;

    tracing::info!("Starting video-info-server {}", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        "Provider mode: {}, max retries: {}, policy: {:?}",
        config.extractor.mode,
        config.retry.max_retries,
        config.retry.policy
    );

    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(server::serve(config))
}
