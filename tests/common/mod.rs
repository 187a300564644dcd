//! Shared test harness for integration tests.
//!
//! [`TestHarness::with_server`] starts the Axum router on a random port with a
//! [`StubProvider`] in place of yt-dlp, so no network access is needed.

use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use video_info_server_lib::config::Config;
use video_info_server_lib::extractor::{ExtractError, InfoProvider, RawMediaInfo};
use video_info_server_lib::server::{build_router, AppContext};

/// Raw yt-dlp output for a video with one audio stream, one 360p stream and
/// an English srt subtitle.
pub const SAMPLE_DUMP: &str = r#"{
    "id": "x",
    "title": "T",
    "uploader": "Some Uploader",
    "formats": [
        {"format_id": "140", "ext": "m4a", "vcodec": "none", "acodec": "mp4a.40.2",
         "url": "http://x/a"},
        {"format_id": "18", "ext": "mp4", "vcodec": "avc1.42001E", "acodec": "mp4a.40.2",
         "height": 360, "url": "http://x/v"}
    ],
    "subtitles": {
        "en": [
            {"ext": "vtt", "url": "http://x/en.vtt"},
            {"ext": "srt", "url": "http://x/en.srt"}
        ]
    },
    "automatic_captions": null
}"#;

/// Provider answering from a fixed result and counting calls
pub struct StubProvider {
    result: Result<RawMediaInfo, ExtractError>,
    calls: AtomicUsize,
    urls: Mutex<Vec<String>>,
}

impl StubProvider {
    pub fn succeeding() -> Self {
        let info = RawMediaInfo::from_json(SAMPLE_DUMP.as_bytes()).expect("sample dump parses");
        Self::with_result(Ok(info))
    }

    pub fn failing(error: ExtractError) -> Self {
        Self::with_result(Err(error))
    }

    fn with_result(result: Result<RawMediaInfo, ExtractError>) -> Self {
        Self {
            result,
            calls: AtomicUsize::new(0),
            urls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn urls(&self) -> Vec<String> {
        self.urls.lock().expect("urls lock").clone()
    }
}

#[async_trait]
impl InfoProvider for StubProvider {
    fn name(&self) -> &'static str {
        "stub"
    }

    fn is_available(&self) -> bool {
        true
    }

    async fn extract(&self, url: &str) -> Result<RawMediaInfo, ExtractError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.urls.lock().expect("urls lock").push(url.to_string());
        self.result.clone()
    }
}

pub struct TestHarness {
    pub provider: Arc<StubProvider>,
    pub addr: SocketAddr,
}

impl TestHarness {
    /// Start an Axum server around `provider` with default configuration
    pub async fn with_server(provider: StubProvider) -> Self {
        Self::with_server_config(provider, Config::default()).await
    }

    pub async fn with_server_config(provider: StubProvider, config: Config) -> Self {
        let provider = Arc::new(provider);
        let ctx = AppContext::with_provider(provider.clone(), &config);
        let app = build_router(ctx);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind random port");
        let addr = listener.local_addr().expect("failed to get local addr");

        tokio::spawn(async move {
            axum::serve(listener, app).await.ok();
        });

        Self { provider, addr }
    }

    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }
}
