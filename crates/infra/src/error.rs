//! # 祝日データのエラー
//!
//! [`InfraError`] は種別 [`InfraErrorKind`] と、生成した時点の [`SpanTrace`]
//! を組にして持つ。`From` 変換と下の生成関数はどれも `SpanTrace` を取るので、
//! `ErrorLayer` が有効なら「どのファイルを読んでいたか」がログに残る。
//!
//! 呼び出し側は種別で分岐する:
//!
//! ```ignore
//! if let InfraErrorKind::YearNotAvailable { year } = error.kind() {
//!     // 収録外の年
//! }
//! ```

use derive_more::Display;
use thiserror::Error;
use tracing_error::SpanTrace;

/// 祝日テーブルの読み込み・参照の失敗
#[derive(Debug, Display)]
#[display("{kind}")]
pub struct InfraError {
    kind:       InfraErrorKind,
    span_trace: SpanTrace,
}

/// [`InfraError`] の種別
#[derive(Debug, Error)]
pub enum InfraErrorKind {
    #[error("祝日データを読み込めません")]
    Io(#[source] std::io::Error),

    #[error("祝日データの CSV が不正です")]
    Csv(#[source] csv::Error),

    /// CSV としては読めたが中身が不正
    #[error("祝日データの {line} 行目が不正です: {reason}")]
    InvalidRecord {
        /// 1 始まり、ヘッダ行を含む
        line:   u64,
        reason: String,
    },

    #[error("祝日データが空です")]
    EmptyTable,

    /// テーブルの収録範囲外
    #[error("{year}年の祝日データがありません")]
    YearNotAvailable { year: i32 },

    /// テスト用カレンダーなど、上のどれにも当たらない失敗
    #[error("予期しないエラー: {0}")]
    Unexpected(String),
}

impl InfraError {
    pub fn kind(&self) -> &InfraErrorKind {
        &self.kind
    }

    /// 生成時点のスパン
    pub fn span_trace(&self) -> &SpanTrace {
        &self.span_trace
    }

    pub fn invalid_record(line: u64, reason: impl Into<String>) -> Self {
        InfraErrorKind::InvalidRecord {
            line,
            reason: reason.into(),
        }
        .into()
    }

    pub fn empty_table() -> Self {
        InfraErrorKind::EmptyTable.into()
    }

    pub fn year_not_available(year: i32) -> Self {
        InfraErrorKind::YearNotAvailable { year }.into()
    }

    pub fn unexpected(message: impl Into<String>) -> Self {
        InfraErrorKind::Unexpected(message.into()).into()
    }
}

impl std::error::Error for InfraError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        std::error::Error::source(&self.kind)
    }
}

impl From<InfraErrorKind> for InfraError {
    fn from(kind: InfraErrorKind) -> Self {
        Self {
            kind,
            span_trace: SpanTrace::capture(),
        }
    }
}

impl From<std::io::Error> for InfraError {
    fn from(source: std::io::Error) -> Self {
        InfraErrorKind::Io(source).into()
    }
}

impl From<csv::Error> for InfraError {
    fn from(source: csv::Error) -> Self {
        InfraErrorKind::Csv(source).into()
    }
}
