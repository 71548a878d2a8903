//! # 判定エラー定義
//!
//! 営業日判定の失敗を表現するエラー型。
//!
//! ## エラー種別と発生箇所
//!
//! | 種別 | 発生箇所 | 例 |
//! |------|----------|-----|
//! | `validation` | 入力検証 | 未入力、年が範囲外 |
//! | `format` | 入力検証 | 日付として解釈できない文字列 |
//! | `gem_unavailable` | 判定 | 祝日カレンダーが起動時に初期化できなかった |
//! | `lookup_failure` | 判定 | 祝日カレンダーへの照会が失敗した |
//! | `system` | リクエスト境界 | 判定処理の異常終了 |
//!
//! すべてのエラーはリクエスト境界で回収され、利用者向けの日本語メッセージに変換される。

use serde::Serialize;
use strum::{Display, IntoStaticStr};
use thiserror::Error;

/// 祝日カレンダー未初期化時のメッセージ
pub const CALENDAR_UNAVAILABLE_MESSAGE: &str =
    "祝日カレンダーが利用できません。アプリケーションの設定を確認してください。";

/// 予期しないエラー時に利用者へ表示するメッセージ
pub const SYSTEM_ERROR_MESSAGE: &str =
    "予期しないエラーが発生しました。しばらく時間をおいて再度お試しください。";

/// エラー種別
///
/// 外部表現（JSON・テンプレート）は snake_case の文字列。
/// `CalendarUnavailable` は既存クライアントとの互換のため `gem_unavailable` と表記する。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Display, IntoStaticStr)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ErrorKind {
    /// 未入力・範囲外
    Validation,
    /// 日付として解釈できない
    Format,
    /// 祝日カレンダーが利用できない
    #[serde(rename = "gem_unavailable")]
    #[strum(serialize = "gem_unavailable")]
    CalendarUnavailable,
    /// 祝日カレンダーへの照会失敗
    LookupFailure,
    /// その他の予期しない失敗
    System,
}

/// 営業日判定で発生するエラー
///
/// `Display` の出力がそのまま利用者向けメッセージになる。
/// `System` のみ運用者向けの `debug_info` を持つ。
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CheckError {
    /// 入力値の検証エラー
    #[error("{0}")]
    Validation(String),

    /// 日付形式のエラー
    #[error("{0}")]
    Format(String),

    /// 祝日カレンダーが初期化されていない
    #[error("{}", CALENDAR_UNAVAILABLE_MESSAGE)]
    CalendarUnavailable,

    /// 祝日カレンダーの照会失敗
    ///
    /// カレンダー側のエラーメッセージを埋め込む。
    #[error("営業日の判定中にエラーが発生しました：{0}")]
    LookupFailure(String),

    /// 予期しないエラー
    #[error("{}", SYSTEM_ERROR_MESSAGE)]
    System {
        /// 運用者向けの診断情報
        debug_info: String,
    },
}

impl CheckError {
    /// エラー種別を返す
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation(_) => ErrorKind::Validation,
            Self::Format(_) => ErrorKind::Format,
            Self::CalendarUnavailable => ErrorKind::CalendarUnavailable,
            Self::LookupFailure(_) => ErrorKind::LookupFailure,
            Self::System { .. } => ErrorKind::System,
        }
    }

    /// 運用者向けの診断情報（`System` のみ）
    pub fn debug_info(&self) -> Option<&str> {
        match self {
            Self::System { debug_info } => Some(debug_info),
            _ => None,
        }
    }
}
