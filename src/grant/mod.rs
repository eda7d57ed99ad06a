//! 助成金スクレイパーモジュール
//!
//! 登録済みの助成金情報を締切で絞り込み、日本語表記で整形する

mod catalog;
mod format;
mod scraper;
mod types;

pub use catalog::GrantCatalog;
pub use format::{
    format_amount, format_date, format_datetime, format_deadline, status_label, write_grant,
    write_report,
};
pub use scraper::GrantScraper;
pub use types::{Currency, GrantDeadline, GrantRecord, GrantStatus};
