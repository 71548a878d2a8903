//! # 営業日判定の結果
//!
//! 判定成功時の結果（[`BusinessDayCheck`]）と、営業日でない場合の理由
//! （[`NonBusinessReason`]）を定義する。
//!
//! 判定全体の結果は [`CheckResult`]（`Result<BusinessDayCheck, CheckError>`）で表す。

use derive_more::Display;
use serde::{Serialize, Serializer};

use crate::{CheckError, date::ValidatedDate};

/// 1 回の判定の結果
pub type CheckResult = Result<BusinessDayCheck, CheckError>;

/// 営業日でない理由
///
/// 判定の優先順位は 土曜 → 日曜 → 祝日 → その他。
/// `Display` の出力が画面に表示する理由の文言になる。
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum NonBusinessReason {
    #[display("土曜日（週末）")]
    Saturday,
    #[display("日曜日（週末）")]
    Sunday,
    /// 名前が取得できた祝日
    #[display("祝日（{_0}）")]
    NamedHoliday(String),
    /// 名前が取得できなかった祝日
    #[display("日本の祝日")]
    Holiday,
    /// 週末でも祝日でもないが営業日ではない（年末休業など）
    #[display("営業日ではありません")]
    NotBusinessDay,
}

impl Serialize for NonBusinessReason {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// 判定成功時の結果
///
/// `reason` は `is_business_day` が `false` のときのみ `Some`。
/// `input_echo` は利用者が入力した文字列そのもの（再入力用）。
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BusinessDayCheck {
    pub date:            ValidatedDate,
    pub is_business_day: bool,
    pub reason:          Option<NonBusinessReason>,
    pub input_echo:      String,
}

impl BusinessDayCheck {
    /// 営業日だった場合の結果
    pub fn business_day(date: ValidatedDate, input_echo: impl Into<String>) -> Self {
        Self {
            date,
            is_business_day: true,
            reason: None,
            input_echo: input_echo.into(),
        }
    }

    /// 営業日でなかった場合の結果
    pub fn non_business_day(
        date: ValidatedDate,
        reason: NonBusinessReason,
        input_echo: impl Into<String>,
    ) -> Self {
        Self {
            date,
            is_business_day: false,
            reason: Some(reason),
            input_echo: input_echo.into(),
        }
    }
}
