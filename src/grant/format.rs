//! 表示用フォーマット

use std::io::{self, Write};

use chrono::{DateTime, FixedOffset};

use super::types::{Currency, GrantDeadline, GrantRecord, GrantStatus};

const ROLLING_LABEL: &str = "随時募集";
const FALLBACK_LABEL: &str = "詳細は公式サイトをご確認ください";
const SEPARATOR: &str = "----------------------------------------";

/// 日付（ja-JP 短縮形式: 2025/1/15）
pub fn format_date(date: &DateTime<FixedOffset>) -> String {
    date.format("%Y/%-m/%-d").to_string()
}

/// 日時（ja-JP 形式: 2025/1/15 9:05:03）
pub fn format_datetime(date: &DateTime<FixedOffset>) -> String {
    date.format("%Y/%-m/%-d %-H:%M:%S").to_string()
}

/// 締切の表示文字列
///
/// 随時募集 > 次回締切 > 募集期間 > 公式サイト参照 の優先順。
pub fn format_deadline(deadline: &GrantDeadline) -> String {
    if deadline.is_rolling {
        return ROLLING_LABEL.to_string();
    }
    if let Some(next) = &deadline.next_deadline {
        return format!("次回締切: {}", format_date(next));
    }
    match (&deadline.start, &deadline.end) {
        (Some(start), Some(end)) => {
            format!("募集期間: {} 〜 {}", format_date(start), format_date(end))
        }
        _ => FALLBACK_LABEL.to_string(),
    }
}

/// 金額の表示文字列（円の場合は全角の円記号に置換）
pub fn format_amount(amount: &str, currency: Currency) -> String {
    match currency {
        Currency::Jpy => amount.replace('\u{00A5}', "\u{FFE5}"),
        _ => amount.to_string(),
    }
}

pub fn status_label(status: GrantStatus) -> &'static str {
    match status {
        GrantStatus::Active => "募集中",
        _ => "募集予定",
    }
}

fn yes_no(value: bool) -> &'static str {
    if value {
        "あり"
    } else {
        "なし"
    }
}

/// 助成金1件分の表示ブロックを書き出す
pub fn write_grant<W: Write>(out: &mut W, grant: &GrantRecord) -> io::Result<()> {
    writeln!(out, "タイトル: {}", grant.title)?;
    writeln!(out, "実施機関: {}", grant.organization)?;
    writeln!(
        out,
        "金額: {} ({})",
        format_amount(&grant.amount, grant.currency),
        grant.currency
    )?;
    writeln!(out, "ステータス: {}", status_label(grant.status))?;
    writeln!(out, "締切: {}", format_deadline(&grant.deadline))?;
    writeln!(out, "カテゴリ: {}", grant.category.join("、"))?;
    writeln!(out, "対象: {}", grant.eligibility)?;
    writeln!(out, "前払い: {}", yes_no(grant.upfront_payment))?;
    writeln!(out, "概要: {}", grant.description)?;
    writeln!(out, "URL: {}", grant.url)
}

/// 出力全体（現在時刻 + 各助成金）を書き出す
pub fn write_report<W: Write>(
    out: &mut W,
    generated_at: &DateTime<FixedOffset>,
    grants: &[GrantRecord],
) -> io::Result<()> {
    writeln!(out, "現在時刻: {}", format_datetime(generated_at))?;
    writeln!(out, "助成金情報: {}件", grants.len())?;
    for grant in grants {
        writeln!(out, "{}", SEPARATOR)?;
        write_grant(out, grant)?;
    }
    Ok(())
}
