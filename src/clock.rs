//! 基準時刻の生成
//!
//! 締切判定に使う「現在時刻」はタイムゾーンIDを明示的に受け取って作る。

use chrono::{DateTime, FixedOffset, Utc};
use chrono_tz::Tz;

use crate::error::ScraperError;

/// デフォルトのタイムゾーン
pub const DEFAULT_ZONE: &str = "Asia/Tokyo";

/// 基準時刻のタイムゾーン
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Zone {
    /// `+09:00` 形式の固定オフセット
    Fixed(FixedOffset),
    /// IANAタイムゾーン（`Asia/Tokyo`, `Europe/Paris` など）
    Named(Tz),
}

impl Zone {
    /// このタイムゾーンでの指定時刻（その時点のオフセットで固定）
    pub fn at(&self, instant: DateTime<Utc>) -> DateTime<FixedOffset> {
        match self {
            Zone::Fixed(offset) => instant.with_timezone(offset),
            Zone::Named(tz) => instant.with_timezone(tz).fixed_offset(),
        }
    }
}

/// タイムゾーンIDを解析
///
/// IANAのID、`JST` / `Z` の別名、`+09:00` 形式のオフセットを受け付ける。
pub fn parse_zone(id: &str) -> Result<Zone, ScraperError> {
    let id = id.trim();
    let name = match id {
        "JST" => "Asia/Tokyo",
        "Z" => "UTC",
        other => other,
    };

    if name.starts_with(['+', '-']) {
        return Ok(Zone::Fixed(name.parse::<FixedOffset>()?));
    }

    name.parse::<Tz>()
        .map(Zone::Named)
        .map_err(|_| ScraperError::UnknownZone(id.to_string()))
}

/// 指定タイムゾーンでの現在時刻
pub fn now_in(zone: Zone) -> DateTime<FixedOffset> {
    zone.at(Utc::now())
}

/// タイムゾーンIDから基準時刻を生成
pub fn reference_time(zone_id: &str) -> Result<DateTime<FixedOffset>, ScraperError> {
    let zone = parse_zone(zone_id)?;
    Ok(now_in(zone))
}
