//! # 営業日チェッカー Web アプリケーション
//!
//! 日付を入力すると、その日が日本の営業日かどうかを表示する。
//!
//! ## エンドポイント
//!
//! | メソッド | パス | 内容 |
//! |----------|------|------|
//! | GET | `/` | 入力フォーム |
//! | POST | `/check` | 判定結果ページ（フォーム項目 `date`） |
//! | POST | `/api/check` | 判定結果 JSON |
//! | GET | `/health` | ヘルスチェック JSON |
//! | GET | `/status` | `OK` または `GEM_UNAVAILABLE` |
//!
//! ## モジュール構成
//!
//! - [`app_builder`] - State の組み立てとルーター構築
//! - [`config`] - 環境変数からの設定読み込み
//! - [`state`] - 起動時に確定する祝日カレンダーの利用可否
//! - [`usecase`] - 入力検証と営業日判定
//! - [`handler`] - HTTP ハンドラ
//! - [`view`] - HTML テンプレートの描画

pub mod app_builder;
pub mod config;
pub mod error;
pub mod handler;
pub mod middleware;
pub mod state;
pub mod usecase;
pub mod view;

pub use app_builder::build_app;
