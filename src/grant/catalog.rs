//! 助成金カタログ
//!
//! 登録済みの助成金情報を基準時刻で絞り込む。

use chrono::{DateTime, Duration, FixedOffset, Utc};

use crate::error::ScraperError;

use super::types::{Currency, GrantDeadline, GrantRecord, GrantStatus};

/// 持続化補助金の募集期間
const JIZOKUKA_START: &str = "2026-10-01T00:00:00+09:00";
const JIZOKUKA_END: &str = "2027-01-31T23:59:59+09:00";
/// ものづくり補助金の次回締切
const MONODZUKURI_NEXT: &str = "2027-01-15T17:00:00+09:00";

/// 随時募集の次回締切までの間隔
const ROLLING_WINDOW_HOURS: i64 = 24;

#[derive(Debug, Clone)]
pub struct GrantCatalog {
    records: Vec<GrantRecord>,
}

impl GrantCatalog {
    pub fn new(records: Vec<GrantRecord>) -> Self {
        Self { records }
    }

    /// 登録済みの助成金一覧
    pub fn builtin() -> Result<Self, ScraperError> {
        let parse = DateTime::parse_from_rfc3339;

        let records = vec![
            GrantRecord {
                title: "小規模事業者持続化補助金".to_string(),
                organization: "日本商工会議所".to_string(),
                url: "https://r3.jizokukahojokin.info/".to_string(),
                amount: "¥500,000".to_string(),
                minimum_amount: 0,
                maximum_amount: 500_000,
                currency: Currency::Jpy,
                deadline: GrantDeadline::window(parse(JIZOKUKA_START)?, parse(JIZOKUKA_END)?),
                description: "小規模事業者が経営計画に基づいて行う販路開拓の取り組みを支援します。"
                    .to_string(),
                eligibility: "常時使用する従業員が20人以下の小規模事業者（商業・サービス業は5人以下）"
                    .to_string(),
                category: vec!["販路開拓".to_string(), "小規模事業者".to_string()],
                upfront_payment: false,
                status: GrantStatus::Active,
                last_updated: None,
            },
            GrantRecord {
                title: "オープンソース開発者支援グラント".to_string(),
                organization: "Open Source Collective".to_string(),
                url: "https://opencollective.com/opensource".to_string(),
                amount: "$1,000".to_string(),
                minimum_amount: 100,
                maximum_amount: 1_000,
                currency: Currency::Usd,
                deadline: GrantDeadline::rolling("daily"),
                description: "オープンソースプロジェクトの保守・開発費用を随時支援します。"
                    .to_string(),
                eligibility: "OSIライセンスで公開されているプロジェクトの個人または団体".to_string(),
                category: vec!["オープンソース".to_string(), "開発支援".to_string()],
                upfront_payment: true,
                status: GrantStatus::Active,
                last_updated: None,
            },
            GrantRecord {
                title: "ものづくり・商業・サービス生産性向上促進補助金".to_string(),
                organization: "全国中小企業団体中央会".to_string(),
                url: "https://portal.monodukuri-hojo.jp/".to_string(),
                amount: "¥10,000,000".to_string(),
                minimum_amount: 1_000_000,
                maximum_amount: 10_000_000,
                currency: Currency::Jpy,
                deadline: GrantDeadline::next(parse(MONODZUKURI_NEXT)?),
                description: "革新的な製品・サービス開発や生産プロセス改善のための設備投資を支援します。"
                    .to_string(),
                eligibility: "日本国内に本社及び実施場所を有する中小企業者".to_string(),
                category: vec![
                    "設備投資".to_string(),
                    "生産性向上".to_string(),
                    "中小企業".to_string(),
                ],
                upfront_payment: false,
                status: GrantStatus::Upcoming,
                last_updated: None,
            },
        ];

        Ok(Self::new(records))
    }

    pub fn records(&self) -> &[GrantRecord] {
        &self.records
    }

    /// 基準時刻で表示対象の助成金を返す（登録順）
    ///
    /// 随時募集は次回締切を基準時刻+24時間に設定する。
    /// `last_updated` は基準時刻ではなく実際の現在時刻。
    pub fn evaluate(&self, reference_time: DateTime<FixedOffset>) -> Vec<GrantRecord> {
        let now = Utc::now().with_timezone(reference_time.offset());

        self.records
            .iter()
            .filter(|record| record.deadline.is_visible_at(&reference_time))
            .map(|record| {
                let mut grant = record.clone();
                if grant.deadline.is_rolling {
                    grant.deadline.next_deadline =
                        Some(reference_time + Duration::hours(ROLLING_WINDOW_HOURS));
                }
                grant.last_updated = Some(now);
                grant
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(s: &str) -> DateTime<FixedOffset> {
        DateTime::parse_from_rfc3339(s).unwrap()
    }

    fn record(title: &str, deadline: GrantDeadline) -> GrantRecord {
        GrantRecord {
            title: title.to_string(),
            organization: "テスト財団".to_string(),
            url: "https://example.com/".to_string(),
            amount: "¥100,000".to_string(),
            minimum_amount: 0,
            maximum_amount: 100_000,
            currency: Currency::Jpy,
            deadline,
            description: String::new(),
            eligibility: String::new(),
            category: vec![],
            upfront_payment: false,
            status: GrantStatus::Active,
            last_updated: None,
        }
    }

    fn titles(grants: &[GrantRecord]) -> Vec<&str> {
        grants.iter().map(|g| g.title.as_str()).collect()
    }

    #[test]
    fn test_builtin_catalog() {
        let catalog = GrantCatalog::builtin().unwrap();
        assert_eq!(catalog.records().len(), 3);
        assert!(catalog.records().iter().all(|r| r.last_updated.is_none()));
    }

    #[test]
    fn test_fixed_window_filtered_by_end() {
        let catalog = GrantCatalog::new(vec![record(
            "期間限定",
            GrantDeadline::window(
                at("2025-01-01T00:00:00+09:00"),
                at("2025-01-15T00:00:00+09:00"),
            ),
        )]);

        assert_eq!(catalog.evaluate(at("2025-01-14T00:00:00+09:00")).len(), 1);
        assert!(catalog.evaluate(at("2025-01-16T00:00:00+09:00")).is_empty());
    }

    #[test]
    fn test_visible_before_start() {
        let catalog = GrantCatalog::new(vec![record(
            "これから",
            GrantDeadline::window(
                at("2025-03-01T00:00:00+09:00"),
                at("2025-03-31T00:00:00+09:00"),
            ),
        )]);

        assert_eq!(catalog.evaluate(at("2025-01-01T00:00:00+09:00")).len(), 1);
    }

    #[test]
    fn test_rolling_next_deadline() {
        let catalog = GrantCatalog::new(vec![record("随時", GrantDeadline::rolling("daily"))]);

        for reference in ["2024-06-01T00:00:00+09:00", "2099-12-31T23:00:00+09:00"] {
            let grants = catalog.evaluate(at(reference));
            assert_eq!(grants.len(), 1);
        }

        let grants = catalog.evaluate(at("2024-06-01T00:00:00+09:00"));
        assert_eq!(
            grants[0].deadline.next_deadline,
            Some(at("2024-06-02T00:00:00+09:00"))
        );
        assert!(catalog.records()[0].deadline.next_deadline.is_none());
    }

    #[test]
    fn test_authoring_order() {
        let catalog = GrantCatalog::new(vec![
            record("C", GrantDeadline::rolling("daily")),
            record("A", GrantDeadline::next(at("2025-01-01T00:00:00+09:00"))),
            record(
                "B",
                GrantDeadline::window(
                    at("2025-01-01T00:00:00+09:00"),
                    at("2025-12-31T00:00:00+09:00"),
                ),
            ),
        ]);

        let grants = catalog.evaluate(at("2025-06-01T00:00:00+09:00"));
        assert_eq!(titles(&grants), vec!["C", "A", "B"]);
    }

    #[test]
    fn test_evaluate_is_idempotent() {
        let catalog = GrantCatalog::builtin().unwrap();
        let reference = at("2026-11-01T12:00:00+09:00");

        let strip = |mut grants: Vec<GrantRecord>| {
            for grant in &mut grants {
                grant.last_updated = None;
            }
            grants
        };

        let first = strip(catalog.evaluate(reference));
        let second = strip(catalog.evaluate(reference));
        assert_eq!(first, second);
        assert_eq!(first.len(), 3);
    }

    #[test]
    fn test_builtin_window_expires() {
        let catalog = GrantCatalog::builtin().unwrap();
        let grants = catalog.evaluate(at("2027-02-01T00:00:00+09:00"));
        assert_eq!(
            titles(&grants),
            vec![
                "オープンソース開発者支援グラント",
                "ものづくり・商業・サービス生産性向上促進補助金",
            ]
        );
    }

    #[test]
    fn test_last_updated_stamped() {
        let catalog = GrantCatalog::builtin().unwrap();
        let grants = catalog.evaluate(at("2026-11-01T12:00:00+09:00"));
        assert!(grants.iter().all(|g| g.last_updated.is_some()));
    }
}
