//! # エラーレスポンス（RFC 9457 Problem Details）
//!
//! JSON API の失敗レスポンス。axum への変換は web アプリ側で行うため、
//! ここには serde のみを置く。
//!
//! | [`ProblemType`] | status | `type` 末尾 |
//! |---|---|---|
//! | `Validation` | 400 | `validation` |
//! | `Format` | 400 | `format` |
//! | `LookupFailure` | 502 | `lookup-failure` |
//! | `CalendarUnavailable` | 503 | `gem-unavailable` |
//! | `System` | 500 | `system` |

use serde::{Deserialize, Serialize};

const ERROR_TYPE_BASE: &str = "https://eigyobi.example.com/errors";

/// API が返しうる問題の種類
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProblemType {
   Validation,
   Format,
   LookupFailure,
   CalendarUnavailable,
   System,
}

impl ProblemType {
   pub const fn slug(self) -> &'static str {
      match self {
         Self::Validation => "validation",
         Self::Format => "format",
         Self::LookupFailure => "lookup-failure",
         Self::CalendarUnavailable => "gem-unavailable",
         Self::System => "system",
      }
   }

   pub const fn title(self) -> &'static str {
      match self {
         Self::Validation => "Validation Error",
         Self::Format => "Invalid Date Format",
         Self::LookupFailure => "Calendar Lookup Failed",
         Self::CalendarUnavailable => "Service Unavailable",
         Self::System => "Internal Server Error",
      }
   }

   pub const fn status(self) -> u16 {
      match self {
         Self::Validation | Self::Format => 400,
         Self::System => 500,
         Self::LookupFailure => 502,
         Self::CalendarUnavailable => 503,
      }
   }

   pub fn uri(self) -> String {
      format!("{ERROR_TYPE_BASE}/{}", self.slug())
   }
}

/// Problem Details 本体
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
   #[serde(rename = "type")]
   pub error_type: String,
   pub title:      String,
   pub status:     u16,
   pub detail:     String,
}

impl ErrorResponse {
   /// `System` の detail には利用者向けの汎用メッセージだけを渡すこと。
   pub fn of(problem: ProblemType, detail: impl Into<String>) -> Self {
      Self {
         error_type: problem.uri(),
         title:      problem.title().to_owned(),
         status:     problem.status(),
         detail:     detail.into(),
      }
   }
}
