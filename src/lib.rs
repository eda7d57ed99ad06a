//! 助成金スクレイパーライブラリ
//!
//! - 登録済みの助成金情報を締切で絞り込んで取得
//! - 日付・金額を日本語表記で整形
//!
//! # 使用例
//!
//! ```rust,ignore
//! use grant_scraper::{clock, ScrapeRequest, ScraperService};
//! use tower::Service;
//!
//! #[tokio::main]
//! async fn main() {
//!     let mut service = ScraperService::new();
//!
//!     let now = clock::reference_time("Asia/Tokyo").unwrap();
//!     let request = ScrapeRequest::new(now).with_browser(false);
//!
//!     let result = service.call(request).await.unwrap();
//!     result.write_to(&mut std::io::stdout().lock(), false).unwrap();
//! }
//! ```

pub mod clock;
pub mod config;
pub mod error;
pub mod grant;
pub mod service;
pub mod traits;

// 主要な型をリエクスポート
pub use config::ScraperConfig;
pub use error::ScraperError;
pub use grant::{GrantCatalog, GrantDeadline, GrantRecord, GrantScraper, GrantStatus};
pub use service::{ScrapeRequest, ScrapeResult, ScraperService};
pub use traits::Scraper;
