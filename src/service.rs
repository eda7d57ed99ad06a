use std::future::Future;
use std::io::Write;
use std::path::PathBuf;
use std::pin::Pin;
use std::task::{Context, Poll};

use chrono::{DateTime, FixedOffset};
use serde::Serialize;
use tower::Service;
use tracing::info;

use crate::config::ScraperConfig;
use crate::error::ScraperError;
use crate::grant::{write_report, GrantRecord, GrantScraper};
use crate::traits::Scraper;

/// スクレイピングリクエスト
#[derive(Debug, Clone)]
pub struct ScrapeRequest {
    pub reference_time: DateTime<FixedOffset>,
    pub headless: bool,
    pub launch_browser: bool,
    pub chrome_executable: Option<PathBuf>,
}

impl ScrapeRequest {
    pub fn new(reference_time: DateTime<FixedOffset>) -> Self {
        Self {
            reference_time,
            headless: true,
            launch_browser: true,
            chrome_executable: None,
        }
    }

    pub fn with_headless(mut self, headless: bool) -> Self {
        self.headless = headless;
        self
    }

    pub fn with_browser(mut self, launch_browser: bool) -> Self {
        self.launch_browser = launch_browser;
        self
    }

    pub fn with_chrome_executable(mut self, path: impl Into<PathBuf>) -> Self {
        self.chrome_executable = Some(path.into());
        self
    }
}

impl From<ScrapeRequest> for ScraperConfig {
    fn from(req: ScrapeRequest) -> Self {
        ScraperConfig {
            headless: req.headless,
            launch_browser: req.launch_browser,
            chrome_executable: req.chrome_executable,
            ..Default::default()
        }
    }
}

/// スクレイピング結果
#[derive(Debug, Clone, Serialize)]
pub struct ScrapeResult {
    /// 基準時刻
    pub generated_at: DateTime<FixedOffset>,
    pub grants: Vec<GrantRecord>,
}

impl ScrapeResult {
    pub fn to_json(&self) -> Result<String, ScraperError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// 結果をテキストまたはJSONで書き出す
    pub fn write_to<W: Write>(&self, out: &mut W, json: bool) -> Result<(), ScraperError> {
        if json {
            serde_json::to_writer_pretty(&mut *out, self)?;
            writeln!(out)?;
        } else {
            write_report(out, &self.generated_at, &self.grants)?;
        }
        out.flush()?;
        Ok(())
    }
}

/// tower::Serviceを実装したスクレイパーサービス
#[derive(Debug, Clone, Default)]
pub struct ScraperService {}

impl ScraperService {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Service<ScrapeRequest> for ScraperService {
    type Response = ScrapeResult;
    type Error = ScraperError;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, req: ScrapeRequest) -> Self::Future {
        info!(
            "スクレイピングリクエスト受信: reference_time={}",
            req.reference_time
        );

        Box::pin(async move {
            let generated_at = req.reference_time;
            let config: ScraperConfig = req.into();
            let mut scraper = GrantScraper::new(config);

            let grants = scraper.execute(generated_at).await?;

            info!("スクレイピング完了: {}件", grants.len());

            Ok(ScrapeResult {
                generated_at,
                grants,
            })
        })
    }
}
