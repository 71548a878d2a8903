//! # 営業日チェッカー Web サーバー
//!
//! ## 環境変数
//!
//! | 変数名 | 必須 | 説明 |
//! |--------|------|------|
//! | `WEB_HOST` | No | バインドアドレス（デフォルト: `0.0.0.0`） |
//! | `WEB_PORT` | No | ポート番号（デフォルト: `4567`） |
//! | `HOLIDAY_DATA_PATH` | No | 祝日 CSV のパス（未設定なら埋め込みテーブル） |
//! | `YEAR_END_CLOSURE` | No | `true` で 12/31, 1/2, 1/3 を非営業日にする |
//! | `LOG_FORMAT` | No | `json` または `pretty`（デフォルト: `pretty`） |
//!
//! ## 起動方法
//!
//! ```bash
//! cargo run -p eigyobi-web
//!
//! WEB_PORT=8080 LOG_FORMAT=json cargo run -p eigyobi-web --release
//! ```

use std::{net::SocketAddr, sync::Arc};

use anyhow::Context as _;
use eigyobi_domain::clock::SystemClock;
use eigyobi_shared::observability::{TracingConfig, init_tracing};
use eigyobi_web::{build_app, config::WebConfig, state::CalendarStatus};
use tokio::net::TcpListener;

/// Web サーバーのエントリーポイント
///
/// 1. 環境変数の読み込み（.env ファイル）
/// 2. トレーシングの初期化
/// 3. 設定の読み込み
/// 4. 祝日カレンダーの初期化（失敗しても起動は続ける）
/// 5. ルーターの構築と HTTP サーバーの起動
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // .env ファイルを読み込む（存在する場合）
    dotenvy::dotenv().ok();

    init_tracing(TracingConfig::from_env("eigyobi-web"))
        .context("トレーシングの初期化に失敗しました")?;
    let _tracing_guard = tracing::info_span!("app", service = "eigyobi-web").entered();

    let config = WebConfig::from_env().context("設定の読み込みに失敗しました")?;

    let calendar = CalendarStatus::load(&config.calendar);
    if !calendar.is_available() {
        tracing::warn!("祝日カレンダーなしで起動します（判定リクエストはエラーになります）");
    }

    let app = build_app(calendar, Arc::new(SystemClock))
        .context("アプリケーションの構築に失敗しました")?;

    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .with_context(|| format!("アドレスのパースに失敗しました: {}:{}", config.host, config.port))?;

    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("{addr} にバインドできません"))?;
    tracing::info!("営業日チェッカーが起動しました: {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
