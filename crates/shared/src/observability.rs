//! # Observability 基盤
//!
//! ログ出力形式の選択、tracing subscriber の組み立て、
//! リクエストごとの Request ID とスパンの生成をまとめる。

use std::str::FromStr;

use thiserror::Error;

/// `RUST_LOG` 未設定時のフィルタ
pub const DEFAULT_DIRECTIVES: &str = "info,eigyobi=debug";

/// リクエストヘッダー名（`SetRequestIdLayer::x_request_id` と揃える）
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// ログ出力形式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// 1 イベント 1 行の JSON
    Json,
    /// 開発向けの複数行表示
    #[default]
    Pretty,
}

/// 未知の `LOG_FORMAT` 値
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown LOG_FORMAT={0:?}")]
pub struct UnknownLogFormat(pub String);

impl FromStr for LogFormat {
    type Err = UnknownLogFormat;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "pretty" | "" => Ok(Self::Pretty),
            _ => Err(UnknownLogFormat(s.to_owned())),
        }
    }
}

impl LogFormat {
    /// 値から形式を決める。未知の値は stderr に警告して Pretty にする
    /// （subscriber 初期化前なので tracing は使えない）。
    pub fn resolve(value: Option<&str>) -> Self {
        match value.map(str::parse) {
            None => Self::default(),
            Some(Ok(format)) => format,
            Some(Err(err)) => {
                eprintln!("WARNING: {err}, falling back to pretty");
                Self::Pretty
            }
        }
    }
}

/// subscriber の設定
#[derive(Debug, Clone)]
pub struct TracingConfig {
    pub service_name: String,
    pub log_format:   LogFormat,
    /// `RUST_LOG` が無いときに使うフィルタ
    pub directives:   String,
}

impl TracingConfig {
    pub fn new(service_name: impl Into<String>, log_format: LogFormat) -> Self {
        Self {
            service_name: service_name.into(),
            log_format,
            directives: DEFAULT_DIRECTIVES.to_owned(),
        }
    }

    /// 環境変数 `LOG_FORMAT` から読み取る
    pub fn from_env(service_name: impl Into<String>) -> Self {
        Self::from_lookup(service_name, |key| std::env::var(key).ok())
    }

    /// 任意の参照関数から読み取る（テストで環境変数を汚さないため）
    pub fn from_lookup(
        service_name: impl Into<String>,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Self {
        let format = LogFormat::resolve(lookup("LOG_FORMAT").as_deref());
        Self::new(service_name, format)
    }
}

/// グローバル subscriber を登録する
///
/// JSON 形式ではイベントのフィールドをトップレベルに展開し、現在のスパン
/// （`request_id` を含む）を添える。`ErrorLayer` によりインフラ層エラーの
/// `SpanTrace` に呼び出し経路が残る。
#[cfg(feature = "observability")]
pub fn init_tracing(
    config: TracingConfig,
) -> Result<(), tracing_subscriber::util::TryInitError> {
    use tracing_subscriber::{EnvFilter, Layer as _, layer::SubscriberExt, util::SubscriberInitExt};

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.directives));

    let output = match config.log_format {
        LogFormat::Json => tracing_subscriber::fmt::layer()
            .json()
            .flatten_event(true)
            .with_current_span(true)
            .with_span_list(false)
            .boxed(),
        LogFormat::Pretty => tracing_subscriber::fmt::layer().with_target(false).boxed(),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(output)
        .with(tracing_error::ErrorLayer::default())
        .try_init()?;

    tracing::debug!(
        service = %config.service_name,
        format = ?config.log_format,
        "トレーシングを初期化しました"
    );
    Ok(())
}

/// リクエストに付いた Request ID。無ければ `-`
#[cfg(feature = "observability")]
pub fn request_id_of<B>(request: &http::Request<B>) -> &str {
    request
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .unwrap_or("-")
}

/// UUID v7 の Request ID 生成器
///
/// クライアントが `X-Request-Id` を送った場合は `SetRequestIdLayer` がそれを
/// 使うため、この生成器は呼ばれない。
#[cfg(feature = "observability")]
#[derive(Debug, Clone, Copy, Default)]
pub struct MakeRequestUuidV7;

#[cfg(feature = "observability")]
impl tower_http::request_id::MakeRequestId for MakeRequestUuidV7 {
    fn make_request_id<B>(
        &mut self,
        _request: &http::Request<B>,
    ) -> Option<tower_http::request_id::RequestId> {
        let mut buf = uuid::Uuid::encode_buffer();
        let id = uuid::Uuid::now_v7().hyphenated().encode_lower(&mut buf);
        http::HeaderValue::from_str(id)
            .ok()
            .map(tower_http::request_id::RequestId::new)
    }
}

/// `TraceLayer::make_span_with` 用のリクエストスパン
#[cfg(feature = "observability")]
pub fn make_request_span<B>(request: &http::Request<B>) -> tracing::Span {
    tracing::info_span!(
        "request",
        method = %request.method(),
        uri = %request.uri(),
        version = ?request.version(),
        request_id = %request_id_of(request),
    )
}
