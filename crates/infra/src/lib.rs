//! # Eigyobi インフラ層
//!
//! 祝日カレンダーなど、外部データに依存する処理を担当する。
//!
//! ## 責務
//!
//! - **祝日テーブル**: CSV 形式の祝日データの読み込み
//! - **営業日カレンダー**: [`calendar::BusinessCalendar`] の日本向け実装
//!
//! ## 依存関係
//!
//! ```text
//! web → infra → domain
//! ```
//!
//! ## モジュール構成
//!
//! - [`calendar`] - 営業日カレンダーのトレイトと実装
//! - [`error`] - インフラ層エラー定義

pub mod calendar;
pub mod error;
#[cfg(feature = "test-utils")]
pub mod mock;

pub use calendar::{BusinessCalendar, HolidayTable, JapaneseHolidayCalendar};
pub use error::{InfraError, InfraErrorKind};
