//! # Canonical Log Line ミドルウェア
//!
//! リクエスト 1 件ごとに、完了時点の要約（メソッド・パス・ステータス・
//! レイテンシ・Request ID）を 1 行のログとして出力する tower Layer。
//!
//! ステータスに応じてレベルを変える:
//!
//! | ステータス | レベル |
//! |------------|--------|
//! | 5xx / Service エラー | ERROR |
//! | 4xx | WARN |
//! | その他 | INFO |
//!
//! ロードバランサーから高頻度で呼ばれる監視用パスは出力しない。

use std::{
    future::Future,
    pin::Pin,
    sync::Arc,
    task::{Context, Poll},
    time::Instant,
};

use http::{Request, Response, StatusCode};
use tower::{Layer, Service};

use crate::observability::request_id_of;

/// 既定で出力対象外にするパス（前方一致）
const DEFAULT_SKIP_PREFIXES: &[&str] = &["/health", "/status"];

/// Canonical Log Line を出力する Layer
///
/// ```text
/// SetRequestIdLayer → TraceLayer → CanonicalLogLineLayer → handler
/// ```
///
/// TraceLayer のスパン内に置くと、スパンのフィールドもログに含まれる。
#[derive(Clone, Debug)]
pub struct CanonicalLogLineLayer {
    skip_prefixes: Arc<[&'static str]>,
}

impl Default for CanonicalLogLineLayer {
    fn default() -> Self {
        Self::skipping(DEFAULT_SKIP_PREFIXES)
    }
}

impl CanonicalLogLineLayer {
    /// 指定したパス（前方一致）を出力対象外にする
    pub fn skipping(prefixes: &[&'static str]) -> Self {
        Self {
            skip_prefixes: prefixes.into(),
        }
    }

    fn skips(&self, path: &str) -> bool {
        self.skip_prefixes
            .iter()
            .any(|prefix| path == *prefix || path.starts_with(&format!("{prefix}/")))
    }
}

impl<S> Layer<S> for CanonicalLogLineLayer {
    type Service = CanonicalLogLineService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        CanonicalLogLineService {
            inner,
            layer: self.clone(),
        }
    }
}

/// [`CanonicalLogLineLayer`] が生成する Service
#[derive(Clone, Debug)]
pub struct CanonicalLogLineService<S> {
    inner: S,
    layer: CanonicalLogLineLayer,
}

/// 1 リクエスト分の要約
struct CanonicalLine {
    method:     String,
    path:       String,
    request_id: String,
    started:    Instant,
}

impl CanonicalLine {
    fn start<B>(req: &Request<B>) -> Self {
        Self {
            method: req.method().to_string(),
            path: req.uri().path().to_owned(),
            request_id: request_id_of(req).to_owned(),
            started: Instant::now(),
        }
    }

    fn latency_ms(&self) -> u64 {
        u64::try_from(self.started.elapsed().as_millis()).unwrap_or(u64::MAX)
    }

    fn emit_response(&self, status: StatusCode) {
        let latency_ms = self.latency_ms();
        macro_rules! canonical {
            ($level:ident) => {
                tracing::$level!(
                    log.r#type = "canonical",
                    http.method = %self.method,
                    http.path = %self.path,
                    http.request_id = %self.request_id,
                    http.status_code = status.as_u16(),
                    http.latency_ms = latency_ms,
                    "リクエスト完了"
                )
            };
        }

        if status.is_server_error() {
            canonical!(error);
        } else if status.is_client_error() {
            canonical!(warn);
        } else {
            canonical!(info);
        }
    }

    fn emit_error(&self, error: &dyn std::fmt::Display) {
        tracing::error!(
            log.r#type = "canonical",
            http.method = %self.method,
            http.path = %self.path,
            http.request_id = %self.request_id,
            http.latency_ms = self.latency_ms(),
            error.message = %error,
            "リクエスト処理エラー"
        );
    }
}

impl<S, ReqBody, ResBody> Service<Request<ReqBody>> for CanonicalLogLineService<S>
where
    S: Service<Request<ReqBody>, Response = Response<ResBody>> + Clone + Send + 'static,
    S::Future: Send + 'static,
    S::Error: std::fmt::Display + 'static,
    ReqBody: Send + 'static,
    ResBody: Send + 'static,
{
    type Error = S::Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;
    type Response = S::Response;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, req: Request<ReqBody>) -> Self::Future {
        // poll_ready 済みの inner を使い、手元には clone を残す
        let clone = self.inner.clone();
        let mut inner = std::mem::replace(&mut self.inner, clone);

        let line = (!self.layer.skips(req.uri().path())).then(|| CanonicalLine::start(&req));

        Box::pin(async move {
            let result = inner.call(req).await;
            if let Some(line) = line {
                match &result {
                    Ok(response) => line.emit_response(response.status()),
                    Err(err) => line.emit_error(err),
                }
            }
            result
        })
    }
}
