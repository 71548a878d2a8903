//! # ヘルスチェック共通型
//!
//! `/health` エンドポイントが返すレスポンス型を提供する。
//! 祝日カレンダーの初期化状態に応じて `OK` / `WARNING` を切り替える。

use serde::{Deserialize, Serialize};

/// 稼働状態
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HealthStatus {
    /// 全機能が利用可能
    Ok,
    /// 起動はしているが祝日カレンダーが利用できない
    Warning,
}

/// ヘルスチェックレスポンス
///
/// `status` が [`HealthStatus::Warning`] になるのは `gem_available` が `false` の
/// ときに限られる。`message` は警告時のみ出力する。
///
/// ## 使用例
///
/// ```
/// use eigyobi_shared::{HealthResponse, HealthStatus};
///
/// let response = HealthResponse::new(true, "2024-01-15T10:00:00+09:00", None);
/// assert_eq!(response.status, HealthStatus::Ok);
/// assert!(response.message.is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthResponse {
    /// 稼働状態（`"OK"` または `"WARNING"`）
    pub status:        HealthStatus,
    /// 祝日カレンダーが利用可能か
    pub gem_available: bool,
    /// 応答時刻（ISO 8601）
    pub timestamp:     String,
    /// 警告メッセージ
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message:       Option<String>,
}

impl HealthResponse {
    /// カレンダーの利用可否からレスポンスを組み立てる
    ///
    /// 利用可能な場合、`unavailable_message` は無視される。
    pub fn new(
        gem_available: bool,
        timestamp: impl Into<String>,
        unavailable_message: Option<String>,
    ) -> Self {
        let (status, message) = if gem_available {
            (HealthStatus::Ok, None)
        } else {
            (
                HealthStatus::Warning,
                Some(
                    unavailable_message
                        .unwrap_or_else(|| "holiday calendar not available".to_string()),
                ),
            )
        };

        Self {
            status,
            gem_available,
            timestamp: timestamp.into(),
            message,
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_利用可能時はokでmessageを出力しない() {
        let response = HealthResponse::new(
            true,
            "2024-01-15T10:00:00+09:00",
            Some("無視される".to_string()),
        );
        let json = serde_json::to_value(&response).unwrap();

        assert_eq!(
            json,
            serde_json::json!({
                "status": "OK",
                "gem_available": true,
                "timestamp": "2024-01-15T10:00:00+09:00"
            })
        );
    }

    #[test]
    fn test_利用不可時はwarningでmessageを含む() {
        let response = HealthResponse::new(
            false,
            "2024-01-15T10:00:00+09:00",
            Some("holiday calendar not available: missing file".to_string()),
        );
        let json = serde_json::to_value(&response).unwrap();

        assert_eq!(json["status"], "WARNING");
        assert_eq!(json["gem_available"], false);
        assert_eq!(
            json["message"],
            "holiday calendar not available: missing file"
        );
    }

    #[test]
    fn test_利用不可でメッセージ未指定なら既定文言を使う() {
        let response = HealthResponse::new(false, "2024-01-15T10:00:00+09:00", None);

        assert_eq!(
            response.message.as_deref(),
            Some("holiday calendar not available")
        );
    }

    #[test]
    fn test_health_statusのserialize結果() {
        assert_eq!(
            serde_json::to_value(HealthStatus::Ok).unwrap(),
            serde_json::json!("OK")
        );
        assert_eq!(
            serde_json::to_value(HealthStatus::Warning).unwrap(),
            serde_json::json!("WARNING")
        );
    }
}
