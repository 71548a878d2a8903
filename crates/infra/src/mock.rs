//! # テスト用モックカレンダー
//!
//! ユースケース・ハンドラのテストで使用するインメモリのカレンダー。
//! `test-utils` feature を有効にすることで、他クレートからも利用可能。
//!
//! ```toml
//! [dev-dependencies]
//! eigyobi-infra = { workspace = true, features = ["test-utils"] }
//! ```
//!
//! 土日は常に非営業日。祝日・休業日・失敗させる処理はビルダーで指定する。

use std::collections::{HashMap, HashSet};

use chrono::{Datelike, NaiveDate, Weekday};

use crate::{calendar::BusinessCalendar, error::InfraError};

/// 祝日の登録内容（名前なしは名前取得が `Ok(None)` になる）
#[derive(Debug, Clone)]
enum MockHoliday {
    Named(String),
    Unnamed,
}

#[derive(Debug, Clone, Default)]
pub struct MockBusinessCalendar {
    holidays:           HashMap<NaiveDate, MockHoliday>,
    closures:           HashSet<NaiveDate>,
    lookup_error:       Option<String>,
    holiday_name_error: Option<String>,
    panic_message:      Option<String>,
}

impl MockBusinessCalendar {
    pub fn new() -> Self {
        Self::default()
    }

    /// 名前付きの祝日を登録する
    pub fn with_holiday(mut self, date: NaiveDate, name: impl Into<String>) -> Self {
        self.holidays.insert(date, MockHoliday::Named(name.into()));
        self
    }

    /// 名前のない祝日を登録する
    pub fn with_unnamed_holiday(mut self, date: NaiveDate) -> Self {
        self.holidays.insert(date, MockHoliday::Unnamed);
        self
    }

    /// 祝日ではない非営業日を登録する
    pub fn with_closure(mut self, date: NaiveDate) -> Self {
        self.closures.insert(date);
        self
    }

    /// `is_business_day` / `is_holiday` を失敗させる
    pub fn failing_lookup(mut self, message: impl Into<String>) -> Self {
        self.lookup_error = Some(message.into());
        self
    }

    /// `holiday_name` だけを失敗させる
    pub fn failing_holiday_name(mut self, message: impl Into<String>) -> Self {
        self.holiday_name_error = Some(message.into());
        self
    }

    /// すべての判定でパニックさせる
    pub fn panicking(mut self, message: impl Into<String>) -> Self {
        self.panic_message = Some(message.into());
        self
    }

    fn check_failures(&self) -> Result<(), InfraError> {
        if let Some(message) = &self.panic_message {
            panic!("{message}");
        }
        match &self.lookup_error {
            Some(message) => Err(InfraError::unexpected(message.clone())),
            None => Ok(()),
        }
    }
}

impl BusinessCalendar for MockBusinessCalendar {
    fn is_business_day(&self, date: NaiveDate) -> Result<bool, InfraError> {
        self.check_failures()?;
        let weekend = matches!(date.weekday(), Weekday::Sat | Weekday::Sun);
        Ok(!weekend && !self.holidays.contains_key(&date) && !self.closures.contains(&date))
    }

    fn is_holiday(&self, date: NaiveDate) -> Result<bool, InfraError> {
        self.check_failures()?;
        Ok(self.holidays.contains_key(&date))
    }

    fn holiday_name(&self, date: NaiveDate) -> Result<Option<String>, InfraError> {
        if let Some(message) = &self.holiday_name_error {
            return Err(InfraError::unexpected(message.clone()));
        }
        self.check_failures()?;
        Ok(match self.holidays.get(&date) {
            Some(MockHoliday::Named(name)) => Some(name.clone()),
            Some(MockHoliday::Unnamed) | None => None,
        })
    }
}
