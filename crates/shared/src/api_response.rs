//! # API レスポンスエンベロープ
//!
//! JSON API の統一レスポンス形式 `{ "data": T }` を提供する。

use serde::{Deserialize, Serialize};

/// JSON API の統一レスポンス型
///
/// 成功レスポンスは `{ "data": T }` 形式で返す。
/// 失敗時は [`ErrorResponse`](crate::ErrorResponse) を使用する。
///
/// ## 使用例
///
/// ```
/// use eigyobi_shared::ApiResponse;
///
/// let response = ApiResponse::new("2024-01-10");
/// assert_eq!(response.data, "2024-01-10");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub data: T,
}

impl<T> ApiResponse<T> {
    /// 新しい `ApiResponse` を作成する
    pub fn new(data: T) -> Self {
        Self { data }
    }
}
