//! 助成金関連の型定義

use std::fmt;

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

/// 通貨
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Currency {
    #[serde(rename = "JPY")]
    Jpy,
    #[serde(rename = "USD")]
    Usd,
    #[serde(rename = "EUR")]
    Eur,
}

impl Currency {
    pub fn code(&self) -> &'static str {
        match self {
            Currency::Jpy => "JPY",
            Currency::Usd => "USD",
            Currency::Eur => "EUR",
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// 募集ステータス（登録時に設定）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GrantStatus {
    Active,
    Upcoming,
    Closed,
}

impl GrantStatus {
    /// 締切情報から導かれるステータス
    ///
    /// 募集期間を持たない非随時の締切は判定できないので `None`。
    pub fn derive(
        deadline: &GrantDeadline,
        reference_time: &DateTime<FixedOffset>,
    ) -> Option<GrantStatus> {
        if deadline.is_rolling {
            return Some(GrantStatus::Active);
        }
        match (deadline.start, deadline.end) {
            (_, Some(end)) if *reference_time > end => Some(GrantStatus::Closed),
            (Some(start), _) if *reference_time < start => Some(GrantStatus::Upcoming),
            (Some(_), _) | (_, Some(_)) => Some(GrantStatus::Active),
            (None, None) => None,
        }
    }
}

/// 締切情報
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GrantDeadline {
    /// 随時募集（固定の募集期間なし）
    pub is_rolling: bool,
    pub start: Option<DateTime<FixedOffset>>,
    pub end: Option<DateTime<FixedOffset>>,
    /// 次回締切。随時募集の場合は評価のたびに基準時刻+24時間で再計算
    pub next_deadline: Option<DateTime<FixedOffset>>,
    /// 募集サイクル（"daily" など、表示用）
    pub cycle: Option<String>,
}

impl GrantDeadline {
    /// 随時募集
    pub fn rolling(cycle: impl Into<String>) -> Self {
        Self {
            is_rolling: true,
            start: None,
            end: None,
            next_deadline: None,
            cycle: Some(cycle.into()),
        }
    }

    /// 固定の募集期間
    pub fn window(start: DateTime<FixedOffset>, end: DateTime<FixedOffset>) -> Self {
        Self {
            is_rolling: false,
            start: Some(start),
            end: Some(end),
            next_deadline: None,
            cycle: None,
        }
    }

    /// 次回締切のみ
    pub fn next(at: DateTime<FixedOffset>) -> Self {
        Self {
            is_rolling: false,
            start: None,
            end: None,
            next_deadline: Some(at),
            cycle: None,
        }
    }

    /// 基準時刻において表示対象か
    ///
    /// 終了日のみで判定する。開始日前でも表示される。
    pub fn is_visible_at(&self, reference_time: &DateTime<FixedOffset>) -> bool {
        if self.is_rolling {
            return true;
        }
        match self.end {
            Some(end) => *reference_time <= end,
            None => true,
        }
    }
}

/// 助成金情報
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GrantRecord {
    pub title: String,
    pub organization: String,
    pub url: String,
    /// 表示用金額（"¥500,000" など）
    pub amount: String,
    pub minimum_amount: u64,
    pub maximum_amount: u64,
    pub currency: Currency,
    pub deadline: GrantDeadline,
    pub description: String,
    pub eligibility: String,
    pub category: Vec<String>,
    pub upfront_payment: bool,
    pub status: GrantStatus,
    /// 評価時刻（保存されない）
    pub last_updated: Option<DateTime<FixedOffset>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(s: &str) -> DateTime<FixedOffset> {
        DateTime::parse_from_rfc3339(s).unwrap()
    }

    #[test]
    fn test_rolling_has_no_window() {
        let deadline = GrantDeadline::rolling("daily");
        assert!(deadline.is_rolling);
        assert!(deadline.start.is_none());
        assert!(deadline.end.is_none());
        assert_eq!(deadline.cycle.as_deref(), Some("daily"));
    }

    #[test]
    fn test_visibility_ignores_start() {
        let deadline = GrantDeadline::window(
            at("2025-01-10T00:00:00+09:00"),
            at("2025-01-15T00:00:00+09:00"),
        );
        assert!(deadline.is_visible_at(&at("2024-12-01T00:00:00+09:00")));
        assert!(deadline.is_visible_at(&at("2025-01-15T00:00:00+09:00")));
        assert!(!deadline.is_visible_at(&at("2025-01-15T00:00:01+09:00")));
    }

    #[test]
    fn test_visibility_without_end() {
        let deadline = GrantDeadline::next(at("2020-01-01T00:00:00+09:00"));
        assert!(deadline.is_visible_at(&at("2030-01-01T00:00:00+09:00")));
    }

    #[test]
    fn test_derive_status() {
        let deadline = GrantDeadline::window(
            at("2025-01-10T00:00:00+09:00"),
            at("2025-01-15T00:00:00+09:00"),
        );
        assert_eq!(
            GrantStatus::derive(&deadline, &at("2025-01-01T00:00:00+09:00")),
            Some(GrantStatus::Upcoming)
        );
        assert_eq!(
            GrantStatus::derive(&deadline, &at("2025-01-12T00:00:00+09:00")),
            Some(GrantStatus::Active)
        );
        assert_eq!(
            GrantStatus::derive(&deadline, &at("2025-01-16T00:00:00+09:00")),
            Some(GrantStatus::Closed)
        );
        assert_eq!(
            GrantStatus::derive(
                &GrantDeadline::rolling("daily"),
                &at("2025-01-16T00:00:00+09:00")
            ),
            Some(GrantStatus::Active)
        );
        assert_eq!(
            GrantStatus::derive(
                &GrantDeadline::next(at("2025-02-01T00:00:00+09:00")),
                &at("2025-01-16T00:00:00+09:00")
            ),
            None
        );
    }

    #[test]
    fn test_serde_codes() {
        assert_eq!(serde_json::to_string(&Currency::Jpy).unwrap(), "\"JPY\"");
        assert_eq!(
            serde_json::to_string(&GrantStatus::Upcoming).unwrap(),
            "\"upcoming\""
        );
    }
}
