//! # Web アプリケーションのエラー定義
//!
//! HTML ページ描画の失敗（[`WebError`]）と、JSON API のエラー（[`ApiError`]）の
//! HTTP レスポンスへの変換を定義する。

use axum::{
   Json,
   http::StatusCode,
   response::{Html, IntoResponse, Response},
};
use eigyobi_domain::{CheckError, ErrorKind};
use eigyobi_shared::{ErrorResponse, ProblemType};
use thiserror::Error;

/// HTML ページの描画で発生するエラー
#[derive(Debug, Error)]
pub enum WebError {
   /// テンプレートの登録・描画の失敗
   #[error("テンプレートエラー: {0}")]
   Template(#[from] tera::Error),
}

impl IntoResponse for WebError {
   fn into_response(self) -> Response {
      tracing::error!(error.message = %self, "ページの描画に失敗しました");
      (
         StatusCode::INTERNAL_SERVER_ERROR,
         Html("<!DOCTYPE html><html lang=\"ja\"><body><h1>500 Internal Server Error</h1></body></html>"),
      )
         .into_response()
   }
}

/// JSON API のエラー
#[derive(Debug, Error)]
pub enum ApiError {
   /// 判定処理のエラー
   #[error(transparent)]
   Check(#[from] CheckError),

   /// リクエストボディが JSON として解釈できない
   #[error("リクエストボディが不正です: {0}")]
   InvalidBody(String),
}

/// 判定エラーを Problem Details に変換する
///
/// `System` の診断情報はレスポンスに含めない。
pub fn problem_details(error: &CheckError) -> ErrorResponse {
   let problem = match error.kind() {
      ErrorKind::Validation => ProblemType::Validation,
      ErrorKind::Format => ProblemType::Format,
      ErrorKind::CalendarUnavailable => ProblemType::CalendarUnavailable,
      ErrorKind::LookupFailure => ProblemType::LookupFailure,
      ErrorKind::System => ProblemType::System,
   };
   ErrorResponse::of(problem, error.to_string())
}

impl IntoResponse for ApiError {
   fn into_response(self) -> Response {
      let body = match &self {
         ApiError::Check(e) => problem_details(e),
         ApiError::InvalidBody(msg) => ErrorResponse::of(ProblemType::Validation, msg.clone()),
      };
      let status =
         StatusCode::from_u16(body.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

      (status, Json(body)).into_response()
   }
}
