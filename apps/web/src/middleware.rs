//! # ミドルウェア
//!
//! - [`cache_control`] - 動的レスポンスのキャッシュ抑止

pub mod cache_control;

pub use cache_control::no_cache;
