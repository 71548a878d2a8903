//! # 祝日テーブル
//!
//! `date,name` ヘッダを持つ CSV から祝日の一覧を読み込む。
//! 振替休日・国民の休日も 1 行ずつ収録する。
//!
//! ```csv
//! date,name
//! 2024-01-01,元日
//! 2024-01-08,成人の日
//! ```
//!
//! 既定のテーブルはバイナリに埋め込まれている。祝日法施行（1948-07-20）から
//! 2099 年までを収録し、1900〜1947 年は祝日のない年として扱う。

use std::{collections::BTreeMap, fs::File, io, path::Path};

use chrono::{Datelike, NaiveDate};
use eigyobi_domain::date::MIN_YEAR;
use serde::Deserialize;

use crate::error::InfraError;

const EMBEDDED_CSV: &str = include_str!("../../data/jp_holidays.csv");

#[derive(Debug, Deserialize)]
struct HolidayRecord {
    date: String,
    name: String,
}

/// 祝日テーブル
///
/// 収録範囲は最初の祝日の年（[`with_coverage_from`](Self::with_coverage_from)
/// で前に広げられる）から最後の祝日の年まで。範囲外の年を引くと [`YearNotAvailable`](crate::InfraErrorKind::YearNotAvailable) になる。
#[derive(Debug, Clone)]
pub struct HolidayTable {
    holidays:   BTreeMap<NaiveDate, String>,
    first_year: i32,
    last_year:  i32,
}

impl HolidayTable {
    /// バイナリに埋め込まれた既定のテーブルを読み込む
    pub fn embedded() -> Result<Self, InfraError> {
        Ok(Self::from_reader(EMBEDDED_CSV.as_bytes())?.with_coverage_from(MIN_YEAR))
    }

    /// ファイルからテーブルを読み込む
    #[tracing::instrument(skip_all, level = "debug", fields(path = %path.display()))]
    pub fn from_path(path: &Path) -> Result<Self, InfraError> {
        let file = File::open(path)?;
        Self::from_reader(file)
    }

    /// 任意の CSV ソースからテーブルを読み込む
    pub fn from_reader<R: io::Read>(source: R) -> Result<Self, InfraError> {
        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(source);
        let headers = reader.headers()?.clone();

        let mut holidays = BTreeMap::new();
        for result in reader.records() {
            let record = result?;
            let line = record.position().map_or(0, csv::Position::line);
            let row: HolidayRecord = record.deserialize(Some(&headers))?;

            let date = NaiveDate::parse_from_str(&row.date, "%Y-%m-%d").map_err(|e| {
                InfraError::invalid_record(line, format!("日付が不正です: {} ({e})", row.date))
            })?;
            if row.name.is_empty() {
                return Err(InfraError::invalid_record(line, "祝日名が空です"));
            }
            if holidays.insert(date, row.name).is_some() {
                return Err(InfraError::invalid_record(
                    line,
                    format!("日付が重複しています: {date}"),
                ));
            }
        }

        Self::from_map(holidays)
    }

    fn from_map(holidays: BTreeMap<NaiveDate, String>) -> Result<Self, InfraError> {
        let (Some((first, _)), Some((last, _))) =
            (holidays.first_key_value(), holidays.last_key_value())
        else {
            return Err(InfraError::empty_table());
        };
        let (first_year, last_year) = (first.year(), last.year());

        tracing::debug!(
            count = holidays.len(),
            first_year,
            last_year,
            "祝日テーブルを読み込みました"
        );

        Ok(Self {
            holidays,
            first_year,
            last_year,
        })
    }

    /// `year` から最初の祝日の前年までを、祝日のない年として収録範囲に含める
    pub fn with_coverage_from(mut self, year: i32) -> Self {
        self.first_year = self.first_year.min(year);
        self
    }

    /// 収録している最初の年
    pub fn first_year(&self) -> i32 {
        self.first_year
    }

    /// 収録している最後の年
    pub fn last_year(&self) -> i32 {
        self.last_year
    }

    /// 指定した年を収録しているか
    pub fn covers_year(&self, year: i32) -> bool {
        (self.first_year..=self.last_year).contains(&year)
    }

    /// 収録している祝日の件数
    pub fn len(&self) -> usize {
        self.holidays.len()
    }

    pub fn is_empty(&self) -> bool {
        self.holidays.is_empty()
    }

    /// 祝日名を引く
    ///
    /// 祝日でなければ `Ok(None)`。収録範囲外の年はエラー。
    pub fn lookup(&self, date: NaiveDate) -> Result<Option<&str>, InfraError> {
        if !self.covers_year(date.year()) {
            return Err(InfraError::year_not_available(date.year()));
        }
        Ok(self.holidays.get(&date).map(String::as_str))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;
    use crate::InfraErrorKind;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_埋め込みテーブルは受付範囲の下限から2099年までを収録する() {
        let table = HolidayTable::embedded().unwrap();

        assert_eq!(table.first_year(), MIN_YEAR);
        assert_eq!(table.last_year(), 2099);
        assert!(table.covers_year(1900));
        assert!(!table.covers_year(2100));
    }

    #[rstest]
    #[case(ymd(2024, 1, 1), Some("元日"))]
    #[case(ymd(2024, 1, 8), Some("成人の日"))]
    #[case(ymd(2024, 2, 12), Some("振替休日"))]
    #[case(ymd(2024, 2, 23), Some("天皇誕生日"))]
    #[case(ymd(2024, 3, 20), Some("春分の日"))]
    #[case(ymd(2026, 9, 22), Some("国民の休日"))]
    #[case(ymd(2024, 1, 10), None)]
    #[case(ymd(1948, 11, 3), Some("文化の日"))]
    #[case(ymd(1973, 4, 30), Some("振替休日"))]
    #[case(ymd(1988, 12, 23), None)]
    #[case(ymd(1989, 2, 24), Some("休日（祝日扱い）"))]
    #[case(ymd(2009, 9, 22), Some("国民の休日"))]
    #[case(ymd(2010, 1, 6), None)]
    #[case(ymd(2036, 1, 9), None)]
    #[case(ymd(2099, 11, 23), Some("勤労感謝の日"))]
    fn test_埋め込みテーブルの祝日名(#[case] date: NaiveDate, #[case] expected: Option<&str>) {
        let table = HolidayTable::embedded().unwrap();

        assert_eq!(table.lookup(date).unwrap(), expected);
    }

    #[rstest]
    #[case(ymd(1900, 1, 1))]
    #[case(ymd(1930, 1, 1))]
    #[case(ymd(1947, 5, 5))]
    #[case(ymd(1948, 5, 5))]
    fn test_祝日法施行前の日付は祝日ではない(#[case] date: NaiveDate) {
        let table = HolidayTable::embedded().unwrap();

        assert_eq!(table.lookup(date).unwrap(), None);
    }

    #[test]
    fn test_埋め込みテーブルの範囲外の年はエラー() {
        let table = HolidayTable::embedded().unwrap();

        let err = table.lookup(ymd(2100, 1, 4)).unwrap_err();

        assert!(matches!(
            err.kind(),
            InfraErrorKind::YearNotAvailable { year: 2100 }
        ));
    }

    #[test]
    fn test_読み込んだテーブルは祝日のある年だけを収録する() {
        let csv = "date,name\n2030-01-01,元日\n2031-01-01,元日\n";
        let table = HolidayTable::from_reader(csv.as_bytes()).unwrap();

        assert!(table.lookup(ymd(2029, 6, 1)).is_err());
        assert!(table.lookup(ymd(2032, 6, 1)).is_err());

        let table = table.with_coverage_from(2020);
        assert_eq!(table.first_year(), 2020);
        assert_eq!(table.lookup(ymd(2029, 6, 1)).unwrap(), None);
        assert!(table.lookup(ymd(2019, 6, 1)).is_err());
    }

    #[test]
    fn test_with_coverage_fromは範囲を狭めない() {
        let csv = "date,name\n2030-01-01,元日\n";
        let table = HolidayTable::from_reader(csv.as_bytes())
            .unwrap()
            .with_coverage_from(2035);

        assert_eq!(table.first_year(), 2030);
    }

    #[test]
    fn test_前後の空白は無視される() {
        let csv = "date , name\n 2030-01-01 , 元日 \n";

        let table = HolidayTable::from_reader(csv.as_bytes()).unwrap();

        assert_eq!(table.lookup(ymd(2030, 1, 1)).unwrap(), Some("元日"));
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_ヘッダのみのcsvは空テーブルエラー() {
        let err = HolidayTable::from_reader("date,name\n".as_bytes()).unwrap_err();

        assert!(matches!(err.kind(), InfraErrorKind::EmptyTable));
    }

    #[test]
    fn test_存在しない日付は行番号付きでエラー() {
        let csv = "date,name\n2024-01-01,元日\n2024-02-30,架空の日\n";

        let err = HolidayTable::from_reader(csv.as_bytes()).unwrap_err();

        assert!(matches!(
            err.kind(),
            InfraErrorKind::InvalidRecord { line: 3, .. }
        ));
    }

    #[test]
    fn test_祝日名が空ならエラー() {
        let csv = "date,name\n2024-01-01,\n";

        let err = HolidayTable::from_reader(csv.as_bytes()).unwrap_err();

        assert!(matches!(
            err.kind(),
            InfraErrorKind::InvalidRecord { line: 2, .. }
        ));
    }

    #[test]
    fn test_重複した日付はエラー() {
        let csv = "date,name\n2024-01-01,元日\n2024-01-01,元日\n";

        let err = HolidayTable::from_reader(csv.as_bytes()).unwrap_err();

        assert!(err.to_string().contains("重複"));
    }

    #[test]
    fn test_列数が合わない行はcsvエラー() {
        let csv = "date,name\n2024-01-01\n";

        let err = HolidayTable::from_reader(csv.as_bytes()).unwrap_err();

        assert!(matches!(err.kind(), InfraErrorKind::Csv(_)));
    }

    #[test]
    fn test_存在しないファイルはioエラー() {
        let err = HolidayTable::from_path(Path::new("/nonexistent/holidays.csv")).unwrap_err();

        assert!(matches!(err.kind(), InfraErrorKind::Io(_)));
    }
}
