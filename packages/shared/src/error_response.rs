//! # エラーレスポンス
//!
//! バリデーション失敗時に返すエラーエンベロープ
//! `{ "status": false, "statusCode": 400, "message": "..." }` を提供する。
//!
//! ## 設計
//!
//! - `ErrorResponse` は純粋なデータ構造（`Serialize` / `Deserialize` のみ）
//! - axum の `IntoResponse` 変換は api クレートの責務
//! - 予期しない内部エラーにはこの型を使わない（固定のプレーンテキストを返す）

use serde::{Deserialize, Serialize};

/// エラーレスポンス
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    /// 失敗時は常に `false`
    pub status:      bool,
    pub status_code: u16,
    pub message:     String,
}

impl ErrorResponse {
    /// 汎用コンストラクタ
    pub fn new(status_code: u16, message: impl Into<String>) -> Self {
        Self {
            status: false,
            status_code,
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_jsonシリアライズでdataフィールドを持たない() {
        let error = ErrorResponse::new(400, "No valid fields to update");
        let json = serde_json::to_value(&error).unwrap();

        assert_eq!(
            json,
            serde_json::json!({
                "status": false,
                "statusCode": 400,
                "message": "No valid fields to update",
            })
        );
        assert!(json.get("data").is_none());
    }

    #[test]
    fn test_newでstatusは常にfalse() {
        let error = ErrorResponse::new(415, "Unsupported Media Type");

        assert!(!error.status);
        assert_eq!(error.status_code, 415);
    }
}
