//! # 日本の営業日カレンダー
//!
//! 土日・国民の祝日（振替休日・国民の休日を含む）を非営業日とする。
//! オプションで銀行の年末年始休業日（12/31, 1/2, 1/3）も非営業日にできる。

use chrono::{Datelike, NaiveDate, Weekday};

use super::{BusinessCalendar, HolidayTable};
use crate::error::InfraError;

/// 祝日テーブルに基づく日本の営業日カレンダー
#[derive(Debug, Clone)]
pub struct JapaneseHolidayCalendar {
    table:            HolidayTable,
    year_end_closure: bool,
}

impl JapaneseHolidayCalendar {
    pub fn new(table: HolidayTable) -> Self {
        Self {
            table,
            year_end_closure: false,
        }
    }

    /// 年末年始休業（12/31, 1/2, 1/3）を非営業日として扱うかを設定する
    ///
    /// 1/1 は元日として祝日テーブルに含まれる。
    pub fn with_year_end_closure(mut self, enabled: bool) -> Self {
        self.year_end_closure = enabled;
        self
    }

    pub fn table(&self) -> &HolidayTable {
        &self.table
    }

    fn is_closure_day(&self, date: NaiveDate) -> bool {
        self.year_end_closure && matches!((date.month(), date.day()), (12, 31) | (1, 2) | (1, 3))
    }
}

fn is_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

impl BusinessCalendar for JapaneseHolidayCalendar {
    #[tracing::instrument(skip_all, level = "debug", fields(%date))]
    fn is_business_day(&self, date: NaiveDate) -> Result<bool, InfraError> {
        if is_weekend(date) || self.is_closure_day(date) {
            return Ok(false);
        }
        Ok(self.table.lookup(date)?.is_none())
    }

    #[tracing::instrument(skip_all, level = "debug", fields(%date))]
    fn is_holiday(&self, date: NaiveDate) -> Result<bool, InfraError> {
        Ok(self.table.lookup(date)?.is_some())
    }

    #[tracing::instrument(skip_all, level = "debug", fields(%date))]
    fn holiday_name(&self, date: NaiveDate) -> Result<Option<String>, InfraError> {
        Ok(self.table.lookup(date)?.map(str::to_owned))
    }
}
