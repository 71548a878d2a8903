//! # HTTP リクエストハンドラ
//!
//! axum のルートに対応するハンドラ関数を定義する。
//!
//! - 各ハンドラはサブモジュールに配置し、ここで re-export する
//! - ハンドラは薄く保ち、判定ロジックはユースケースに委譲する

pub mod check;
pub mod form;
pub mod health;

pub use check::{CheckState, check_api, check_form};
pub use form::{FormState, index};
pub use health::{HealthState, health_check, status_check};
