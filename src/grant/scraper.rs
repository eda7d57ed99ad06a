//! 助成金スクレイパー実装

use async_trait::async_trait;
use chrono::{DateTime, FixedOffset};
use chromiumoxide::browser::{Browser, BrowserConfig};
use futures::StreamExt;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::config::ScraperConfig;
use crate::error::ScraperError;
use crate::traits::Scraper;

use super::catalog::GrantCatalog;
use super::types::{GrantRecord, GrantStatus};

/// 助成金スクレイパー
///
/// ブラウザは実行中だけ確保する。データはカタログから取得する。
pub struct GrantScraper {
    config: ScraperConfig,
    catalog: Option<GrantCatalog>,
    browser: Option<Browser>,
    handler_task: Option<JoinHandle<()>>,
}

impl GrantScraper {
    pub fn new(config: ScraperConfig) -> Self {
        Self {
            config,
            catalog: None,
            browser: None,
            handler_task: None,
        }
    }

    /// 登録済み一覧の代わりに使うカタログを指定
    pub fn with_catalog(mut self, catalog: GrantCatalog) -> Self {
        self.catalog = Some(catalog);
        self
    }

    fn browser_config(&self) -> Result<BrowserConfig, ScraperError> {
        let mut builder = BrowserConfig::builder().request_timeout(self.config.timeout);

        if let Some(path) = &self.config.chrome_executable {
            builder = builder.chrome_executable(path);
        }

        if !self.config.headless {
            builder = builder.with_head();
        }

        builder
            .no_sandbox()
            .arg("--disable-dev-shm-usage")
            .arg("--disable-gpu")
            .build()
            .map_err(|e| ScraperError::BrowserInit(format!("ブラウザ設定エラー: {}", e)))
    }

    /// 登録ステータスと締切から導かれるステータスが食い違う助成金
    fn status_mismatches<'a>(
        grants: &'a [GrantRecord],
        reference_time: &DateTime<FixedOffset>,
    ) -> Vec<(&'a GrantRecord, GrantStatus)> {
        grants
            .iter()
            .filter_map(|grant| {
                GrantStatus::derive(&grant.deadline, reference_time)
                    .filter(|derived| *derived != grant.status)
                    .map(|derived| (grant, derived))
            })
            .collect()
    }

    fn warn_status_mismatch(grants: &[GrantRecord], reference_time: &DateTime<FixedOffset>) {
        for (grant, derived) in Self::status_mismatches(grants, reference_time) {
            warn!(
                "ステータス不一致: title={}, status={:?}, derived={:?}",
                grant.title, grant.status, derived
            );
        }
    }
}

#[async_trait]
impl Scraper for GrantScraper {
    async fn initialize(&mut self) -> Result<(), ScraperError> {
        if !self.config.launch_browser {
            debug!("ブラウザ起動をスキップ");
            return Ok(());
        }

        info!("ブラウザを初期化中...");

        let config = self.browser_config()?;
        let (browser, mut handler) = Browser::launch(config)
            .await
            .map_err(|e| ScraperError::BrowserInit(e.to_string()))?;

        // ブラウザイベントハンドラをバックグラウンドで実行
        let handler_task = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                debug!("Browser event: {:?}", event);
            }
        });

        self.browser = Some(browser);
        self.handler_task = Some(handler_task);

        info!("ブラウザ初期化完了");
        Ok(())
    }

    async fn scrape(
        &mut self,
        reference_time: DateTime<FixedOffset>,
    ) -> Result<Vec<GrantRecord>, ScraperError> {
        info!("助成金情報を取得中: reference_time={}", reference_time);

        let grants = match &self.catalog {
            Some(catalog) => catalog.evaluate(reference_time),
            None => GrantCatalog::builtin()?.evaluate(reference_time),
        };

        Self::warn_status_mismatch(&grants, &reference_time);

        info!("助成金情報取得完了: {}件", grants.len());
        Ok(grants)
    }

    async fn close(&mut self) -> Result<(), ScraperError> {
        let Some(mut browser) = self.browser.take() else {
            if let Some(task) = self.handler_task.take() {
                task.abort();
            }
            return Ok(());
        };

        info!("ブラウザを終了中...");

        let closed = browser
            .close()
            .await
            .map_err(|e| ScraperError::BrowserClose(e.to_string()));

        if closed.is_ok() {
            if let Err(e) = browser.wait().await {
                debug!("ブラウザプロセス待機エラー: {}", e);
            }
        }

        if let Some(task) = self.handler_task.take() {
            task.abort();
        }

        closed?;
        info!("ブラウザ終了完了");
        Ok(())
    }
}
