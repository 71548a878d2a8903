//! # アプリケーション構築
//!
//! State の初期化とルーター構築を担当する。
//! `main.rs` は設定読み込みとサーバー起動に集中する。

use std::sync::Arc;

use axum::{
    Router,
    middleware::from_fn,
    routing::{get, post},
};
use eigyobi_domain::clock::Clock;
use eigyobi_shared::{
    canonical_log::CanonicalLogLineLayer,
    observability::{MakeRequestUuidV7, make_request_span},
};
use tower_http::{
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};

use crate::{
    error::WebError,
    handler::{
        CheckState,
        FormState,
        HealthState,
        check_api,
        check_form,
        health_check,
        index,
        status_check,
    },
    middleware::no_cache,
    state::CalendarStatus,
    usecase::BusinessDayUseCaseImpl,
    view::TemplateRenderer,
};

/// State の組み立てとルーター定義を行う
///
/// 祝日カレンダーの状態は起動時に確定したものを受け取る。
/// テンプレートの登録に失敗した場合のみエラーを返す。
pub fn build_app(calendar: CalendarStatus, clock: Arc<dyn Clock>) -> Result<Router, WebError> {
    let calendar = Arc::new(calendar);
    let renderer = Arc::new(TemplateRenderer::new()?);
    let usecase = Arc::new(BusinessDayUseCaseImpl::new(calendar.clone(), clock.clone()));

    let form_state = Arc::new(FormState {
        renderer: renderer.clone(),
        clock:    clock.clone(),
    });
    let check_state = Arc::new(CheckState {
        usecase,
        renderer,
        clock: clock.clone(),
    });
    let health_state = Arc::new(HealthState { calendar, clock });

    let app = Router::new()
        .route("/", get(index))
        .with_state(form_state)
        .merge(
            Router::new()
                .route("/check", post(check_form))
                .route("/api/check", post(check_api))
                .with_state(check_state),
        )
        .merge(
            Router::new()
                .route("/health", get(health_check))
                .route("/status", get(status_check))
                .with_state(health_state),
        )
        .layer(from_fn(no_cache))
        // Request ID レイヤー（下に書いたものが外側）
        // 1. SetRequestIdLayer（最外）: UUID v7 を生成（またはクライアント提供値を使用）
        // 2. TraceLayer: request_id を含むスパンを作成
        // 3. CanonicalLogLineLayer: リクエスト完了時に1行サマリログを出力（スパン内）
        // 4. PropagateRequestIdLayer: レスポンスヘッダーに X-Request-Id をコピー
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(CanonicalLogLineLayer::default())
        .layer(TraceLayer::new_for_http().make_span_with(make_request_span))
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuidV7));

    Ok(app)
}
