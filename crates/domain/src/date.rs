//! # 日付入力の検証
//!
//! 利用者が入力した文字列（[`DateQuery`]）を検証し、判定に使える
//! [`ValidatedDate`] を生成する。
//!
//! ## 検証の順序
//!
//! 1. 未入力・空白のみ → `validation`
//! 2. 日付として解釈できない → `format`
//! 3. 年が `1900..=今年+10` の範囲外 → `validation`（上限は判定時点で計算）
//!
//! ## 受け付ける形式
//!
//! | 形式 | 例 |
//! |------|-----|
//! | ISO 8601 | `2024-01-15`, `2024-1-5` |
//! | スラッシュ・ドット区切り | `2024/01/15`, `2024.01.15` |
//! | 区切りなし | `20240115` |
//! | 和文 | `2024年1月15日` |
//! | 英語の月名 | `15 Jan 2024`, `Jan 15 2024`, `January 15, 2024` |
//! | RFC 3339 タイムスタンプ | `2024-01-15T10:00:00+09:00`（日付部分のみ使用） |

use chrono::{DateTime, Datelike, NaiveDate, Weekday};
use derive_more::Display;
use serde::Serialize;

use crate::CheckError;

/// 受け付ける年の下限
pub const MIN_YEAR: i32 = 1900;

/// 今年から何年先まで受け付けるか
pub const MAX_YEARS_AHEAD: i32 = 10;

/// 未入力時のメッセージ
pub const EMPTY_INPUT_MESSAGE: &str = "日付が入力されていません。有効な日付を入力してください。";

/// 日付として解釈できない入力のメッセージ
pub const INVALID_FORMAT_MESSAGE: &str =
    "無効な日付形式です。正しい日付を入力してください。（例：2024-01-15）";

/// `chrono` の書式で表現できる入力形式（先頭から順に試す）
const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%Y.%m.%d",
    "%Y年%m月%d日",
    "%d %b %Y",
    "%d %B %Y",
    "%b %d %Y",
    "%B %d %Y",
    "%B %d, %Y",
];

/// 文字列を日付として解釈する
///
/// 前後の空白は無視する。存在しない日付（`2024-02-30` など）は `None`。
pub fn parse_date(input: &str) -> Option<NaiveDate> {
    let input = input.trim();
    if input.is_empty() {
        return None;
    }

    if input.len() == 8 && input.bytes().all(|b| b.is_ascii_digit()) {
        return parse_compact(input);
    }

    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(input, format).ok())
        .or_else(|| {
            DateTime::parse_from_rfc3339(input)
                .ok()
                .map(|timestamp| timestamp.date_naive())
        })
}

/// `YYYYMMDD` 形式を解釈する
fn parse_compact(input: &str) -> Option<NaiveDate> {
    let year = input.get(0..4)?.parse().ok()?;
    let month = input.get(4..6)?.parse().ok()?;
    let day = input.get(6..8)?.parse().ok()?;
    NaiveDate::from_ymd_opt(year, month, day)
}

// =========================================================================
// YearRange（受け付ける年の範囲）
// =========================================================================

/// 受け付ける年の範囲
///
/// 上限はリクエスト時点の「今年」から計算するため、保持せず毎回生成する。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct YearRange {
    min: i32,
    max: i32,
}

impl YearRange {
    /// 今日の日付から範囲を計算する
    pub fn for_today(today: NaiveDate) -> Self {
        Self {
            min: MIN_YEAR,
            max: today.year() + MAX_YEARS_AHEAD,
        }
    }

    pub fn min(&self) -> i32 {
        self.min
    }

    pub fn max(&self) -> i32 {
        self.max
    }

    pub fn contains(&self, year: i32) -> bool {
        (self.min..=self.max).contains(&year)
    }

    /// 範囲内の最初の日（フォームの `min` 属性用）
    pub fn first_day(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.min, 1, 1)
    }

    /// 範囲内の最後の日（フォームの `max` 属性用）
    pub fn last_day(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.max, 12, 31)
    }

    /// 範囲外だったときのメッセージ
    pub fn out_of_range_message(&self) -> String {
        format!(
            "日付の年が範囲外です。{}年から{}年の間で入力してください。",
            self.min, self.max
        )
    }
}

// =========================================================================
// DateQuery（未検証の入力）
// =========================================================================

/// 利用者が入力した未検証の文字列
///
/// フォームで項目自体が送られなかった場合は空文字列として扱う。
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DateQuery(String);

impl DateQuery {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// 入力された文字列をそのまま返す
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// 未入力または空白のみか
    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }

    /// 入力を検証して [`ValidatedDate`] を生成する
    ///
    /// `today` は範囲上限の計算に使う（日本時間の今日を渡す）。
    ///
    /// # エラー
    ///
    /// - 未入力・範囲外: [`CheckError::Validation`]
    /// - 解釈できない形式: [`CheckError::Format`]
    pub fn validate(&self, today: NaiveDate) -> Result<ValidatedDate, CheckError> {
        if self.is_blank() {
            return Err(CheckError::Validation(EMPTY_INPUT_MESSAGE.to_string()));
        }

        let date = parse_date(&self.0)
            .ok_or_else(|| CheckError::Format(INVALID_FORMAT_MESSAGE.to_string()))?;

        let range = YearRange::for_today(today);
        if !range.contains(date.year()) {
            return Err(CheckError::Validation(range.out_of_range_message()));
        }

        Ok(ValidatedDate(date))
    }
}

impl From<Option<String>> for DateQuery {
    fn from(raw: Option<String>) -> Self {
        Self(raw.unwrap_or_default())
    }
}

// =========================================================================
// ValidatedDate（検証済みの日付）
// =========================================================================

/// 検証済みの日付（値オブジェクト）
///
/// # 不変条件
///
/// - 実在する日付である
/// - 年が検証時点の [`YearRange`] に含まれる
///
/// [`DateQuery::validate`] からのみ生成できる。
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display, Serialize)]
#[display("{}", _0.format("%Y-%m-%d"))]
#[serde(transparent)]
pub struct ValidatedDate(NaiveDate);

impl ValidatedDate {
    pub fn as_naive_date(&self) -> NaiveDate {
        self.0
    }

    pub fn weekday(&self) -> Weekday {
        self.0.weekday()
    }

    /// 画面表示用の和文表記（例: `2024年01月13日（土）`）
    pub fn to_japanese_string(&self) -> String {
        format!(
            "{}（{}）",
            self.0.format("%Y年%m月%d日"),
            weekday_kanji(self.weekday())
        )
    }
}

fn weekday_kanji(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "月",
        Weekday::Tue => "火",
        Weekday::Wed => "水",
        Weekday::Thu => "木",
        Weekday::Fri => "金",
        Weekday::Sat => "土",
        Weekday::Sun => "日",
    }
}
