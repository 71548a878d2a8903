//! # ヘルスチェックハンドラ
//!
//! - `/health` — JSON で稼働状態と祝日カレンダーの利用可否を返す
//! - `/status` — プレーンテキストで `OK` または `GEM_UNAVAILABLE` を返す
//!
//! レスポンス型は [`eigyobi_shared::HealthResponse`] を参照。

use std::sync::Arc;

use axum::{Json, extract::State};
use chrono::SecondsFormat;
use eigyobi_domain::clock::Clock;
use eigyobi_shared::HealthResponse;

use crate::state::CalendarStatus;

/// ヘルスチェックハンドラの State
pub struct HealthState {
    pub calendar: Arc<CalendarStatus>,
    pub clock:    Arc<dyn Clock>,
}

/// ヘルスチェック
///
/// カレンダーが利用できない場合も 200 で `WARNING` を返す。
pub async fn health_check(State(state): State<Arc<HealthState>>) -> Json<HealthResponse> {
    let timestamp = state
        .clock
        .now_jst()
        .to_rfc3339_opts(SecondsFormat::Secs, false);
    let message = state
        .calendar
        .unavailable_reason()
        .map(|reason| format!("holiday calendar not available: {reason}"));

    Json(HealthResponse::new(
        state.calendar.is_available(),
        timestamp,
        message,
    ))
}

/// 簡易ステータス
pub async fn status_check(State(state): State<Arc<HealthState>>) -> &'static str {
    if state.calendar.is_available() {
        "OK"
    } else {
        "GEM_UNAVAILABLE"
    }
}
