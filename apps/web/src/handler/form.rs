//! # 入力フォームハンドラ

use std::sync::Arc;

use axum::{extract::State, response::Html};
use eigyobi_domain::clock::Clock;

use crate::{error::WebError, view::TemplateRenderer};

/// 入力フォームハンドラの State
pub struct FormState {
    pub renderer: Arc<TemplateRenderer>,
    pub clock:    Arc<dyn Clock>,
}

/// 入力フォームを表示する
///
/// ## エンドポイント
/// GET /
pub async fn index(State(state): State<Arc<FormState>>) -> Result<Html<String>, WebError> {
    let html = state.renderer.render_index(state.clock.today())?;
    Ok(Html(html))
}
