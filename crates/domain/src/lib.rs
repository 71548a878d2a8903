//! # Eigyobi ドメイン層
//!
//! 営業日判定の入力検証と判定結果を表現するドメインモデルを定義する。
//!
//! ## 依存関係の方向
//!
//! ```text
//! web → infra → domain
//! ```
//!
//! ドメイン層はインフラ層（祝日カレンダーの実装）に一切依存しない。
//!
//! ## モジュール構成
//!
//! - [`clock`] - 現在時刻の抽象化（日本時間の「今日」を提供）
//! - [`date`] - 入力文字列の検証と [`date::ValidatedDate`] の生成
//! - [`check`] - 判定結果（[`check::BusinessDayCheck`]）と非営業日の理由
//! - [`error`] - 判定失敗の分類（[`ErrorKind`]）とエラー型
//!
//! ## 使用例
//!
//! ```rust
//! use chrono::NaiveDate;
//! use eigyobi_domain::{ErrorKind, date::DateQuery};
//!
//! let today = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
//!
//! let date = DateQuery::new("2024-01-13").validate(today).unwrap();
//! assert_eq!(date.to_string(), "2024-01-13");
//!
//! let error = DateQuery::new("not-a-date").validate(today).unwrap_err();
//! assert_eq!(error.kind(), ErrorKind::Format);
//! ```

pub mod check;
pub mod clock;
pub mod date;
pub mod error;

pub use error::{CheckError, ErrorKind};
