//! # ユースケース層
//!
//! ハンドラから呼ばれるアプリケーションロジックを配置する。

pub mod business_day;

pub use business_day::BusinessDayUseCaseImpl;
