use async_trait::async_trait;
use chrono::{DateTime, FixedOffset};
use tracing::warn;

use crate::error::ScraperError;
use crate::grant::GrantRecord;

#[async_trait]
pub trait Scraper: Send + Sync {
    /// ブラウザ初期化
    async fn initialize(&mut self) -> Result<(), ScraperError>;

    /// 基準時刻で助成金情報を取得
    async fn scrape(
        &mut self,
        reference_time: DateTime<FixedOffset>,
    ) -> Result<Vec<GrantRecord>, ScraperError>;

    /// リソース解放
    async fn close(&mut self) -> Result<(), ScraperError>;

    /// 一括実行（initialize → scrape → close）
    ///
    /// closeはエラー時も必ず呼ばれる。close自体の失敗は結果を上書きしない。
    async fn execute(
        &mut self,
        reference_time: DateTime<FixedOffset>,
    ) -> Result<Vec<GrantRecord>, ScraperError> {
        let result = match self.initialize().await {
            Ok(()) => self.scrape(reference_time).await,
            Err(e) => Err(e),
        };

        if let Err(e) = self.close().await {
            warn!("リソース解放に失敗: {}", e);
        }

        result
    }
}
