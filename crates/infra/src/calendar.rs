//! # 営業日カレンダー
//!
//! 日付が営業日かどうか、祝日かどうかを判定するインフラストラクチャモジュール。
//!
//! ## 設計方針
//!
//! - **trait による抽象化**: [`BusinessCalendar`] で祝日データの出所を隠蔽する
//! - **データ駆動**: 祝日は計算せず、CSV の祝日テーブル（[`HolidayTable`]）から引く
//! - **週末はテーブル不要**: 土日はテーブルの収録範囲外でも判定できる

mod holiday_table;
mod japanese;

use chrono::NaiveDate;
pub use holiday_table::HolidayTable;
pub use japanese::JapaneseHolidayCalendar;

use crate::error::InfraError;

/// 営業日カレンダートレイト
///
/// 判定はブロッキング処理として呼ばれる前提で、同期 API とする。
pub trait BusinessCalendar: Send + Sync {
    /// 営業日かどうかを判定する
    fn is_business_day(&self, date: NaiveDate) -> Result<bool, InfraError>;

    /// 祝日かどうかを判定する
    fn is_holiday(&self, date: NaiveDate) -> Result<bool, InfraError>;

    /// 祝日名を取得する（祝日でなければ `None`）
    fn holiday_name(&self, date: NaiveDate) -> Result<Option<String>, InfraError>;
}
