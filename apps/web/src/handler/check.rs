//! # 営業日判定ハンドラ
//!
//! フォーム送信（HTML）と JSON API の 2 つの入口から同じ判定を実行する。
//!
//! 判定はブロッキングプールで実行し、判定中のパニックは `system` エラーとして
//! 利用者に返す（サーバーは停止しない）。

use std::sync::Arc;

use axum::{
    Form,
    Json,
    extract::{
        State,
        rejection::{FormRejection, JsonRejection},
    },
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use eigyobi_domain::{
    CheckError,
    ErrorKind,
    check::CheckResult,
    clock::Clock,
    date::DateQuery,
};
use eigyobi_shared::ApiResponse;
use serde::Deserialize;

use crate::{
    error::{ApiError, WebError},
    usecase::BusinessDayUseCaseImpl,
    view::TemplateRenderer,
};

/// 判定ハンドラの State
pub struct CheckState {
    pub usecase:  Arc<BusinessDayUseCaseImpl>,
    pub renderer: Arc<TemplateRenderer>,
    pub clock:    Arc<dyn Clock>,
}

/// フォーム送信の内容（JSON API のリクエストボディも同じ形）
#[derive(Debug, Default, Deserialize)]
pub struct CheckRequest {
    pub date: Option<String>,
}

/// フォーム送信を判定して結果ページを返す
///
/// 判定の成否にかかわらず 200 で結果ページを返す。
///
/// ## エンドポイント
/// POST /check
#[tracing::instrument(skip_all)]
pub async fn check_form(
    State(state): State<Arc<CheckState>>,
    form: Result<Form<CheckRequest>, FormRejection>,
) -> Result<Html<String>, WebError> {
    let request = match form {
        Ok(Form(request)) => request,
        Err(rejection) => {
            tracing::warn!(error.message = %rejection, "フォームの内容を解釈できません");
            CheckRequest::default()
        }
    };

    let result = run_check(&state.usecase, DateQuery::from(request.date)).await;
    log_outcome(&result);

    let html = state.renderer.render_result(&result, state.clock.today())?;
    Ok(Html(html))
}

/// JSON で判定結果を返す
///
/// ## エンドポイント
/// POST /api/check
///
/// 成功時は `{"data": {...}}`、失敗時は Problem Details を返す。
#[tracing::instrument(skip_all)]
pub async fn check_api(
    State(state): State<Arc<CheckState>>,
    body: Result<Json<CheckRequest>, JsonRejection>,
) -> Result<Response, ApiError> {
    let Json(request) = body.map_err(|rejection| ApiError::InvalidBody(rejection.body_text()))?;

    let result = run_check(&state.usecase, DateQuery::from(request.date)).await;
    log_outcome(&result);

    let check = result?;
    Ok((StatusCode::OK, Json(ApiResponse::new(check))).into_response())
}

/// ブロッキングプールで判定を実行する
///
/// タスクのパニック・キャンセルは `System` エラーに変換する。
async fn run_check(usecase: &Arc<BusinessDayUseCaseImpl>, query: DateQuery) -> CheckResult {
    let usecase = Arc::clone(usecase);
    match tokio::task::spawn_blocking(move || usecase.check(&query)).await {
        Ok(result) => result,
        Err(e) => Err(CheckError::System {
            debug_info: e.to_string(),
        }),
    }
}

fn log_outcome(result: &CheckResult) {
    match result {
        Ok(check) => tracing::info!(
            date = %check.date,
            is_business_day = check.is_business_day,
            reason = %check.reason.as_ref().map_or_else(String::new, ToString::to_string),
            "営業日を判定しました"
        ),
        Err(e) => match e.kind() {
            ErrorKind::Validation | ErrorKind::Format => {
                tracing::info!(error.kind = %e.kind(), error.message = %e, "入力エラー");
            }
            ErrorKind::CalendarUnavailable | ErrorKind::LookupFailure => {
                tracing::warn!(error.kind = %e.kind(), error.message = %e, "判定に失敗しました");
            }
            ErrorKind::System => {
                tracing::error!(
                    error.kind = %e.kind(),
                    error.debug_info = e.debug_info().unwrap_or_default(),
                    "予期しないエラーが発生しました"
                );
            }
        },
    }
}
