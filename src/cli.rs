use clap::Parser;
use std::path::PathBuf;

use video_info_server_lib::config::Config;
use video_info_server_lib::extractor::ExtractorMode;

#[derive(Parser)]
#[command(name = "video-info-server")]
#[command(author, version, about = "HTTP service returning normalized yt-dlp video metadata")]
pub struct Cli {
    /// Path to config file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Host to bind to
    #[arg(long)]
    pub host: Option<String>,

    /// Port to listen on
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Default number of retries after a failed extraction
    #[arg(long)]
    pub max_retries: Option<u32>,

    /// Provider selection: python, cli or auto
    #[arg(long)]
    pub mode: Option<ExtractorMode>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Apply command line overrides on top of the loaded config
    pub fn apply(&self, config: &mut Config) {
        if let Some(host) = &self.host {
            config.server.host = host.clone();
        }
        if let Some(port) = self.port {
            config.server.port = port;
        }
        if let Some(max_retries) = self.max_retries {
            config.retry.max_retries = max_retries;
        }
        if let Some(mode) = self.mode {
            config.extractor.mode = mode;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_override_config() {
        let cli = Cli::parse_from([
            "video-info-server",
            "--port",
            "8081",
            "--mode",
            "python",
            "--max-retries",
            "0",
        ]);
        let mut config = Config::default();
        cli.apply(&mut config);

        assert_eq!(config.server.port, 8081);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.extractor.mode, ExtractorMode::Python);
        assert_eq!(config.retry.max_retries, 0);
    }

    #[test]
    fn test_unknown_mode_rejected() {
        assert!(Cli::try_parse_from(["video-info-server", "--mode", "lux"]).is_err());
    }
}
