//! # API レスポンスエンベロープ
//!
//! 公開 API の統一レスポンス形式
//! `{ "status": true, "statusCode": 200, "message": "...", "data": T }` を提供する。

use serde::{Deserialize, Serialize};

/// 公開 API の成功レスポンス型
///
/// すべての成功レスポンスはこの形式で返す。
/// 失敗時は [`ErrorResponse`](crate::ErrorResponse) を使用する。
///
/// ## 使用例
///
/// ```
/// use todos_shared::ApiResponse;
///
/// let response = ApiResponse::ok("取得しました", vec![1, 2, 3]);
/// assert!(response.status);
/// assert_eq!(response.status_code, 200);
/// assert_eq!(response.data, vec![1, 2, 3]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse<T> {
    /// 成功時は常に `true`
    pub status:      bool,
    /// HTTP ステータスコード（レスポンスヘッダと同じ値）
    pub status_code: u16,
    pub message:     String,
    pub data:        T,
}

impl<T> ApiResponse<T> {
    /// 任意のステータスコードで成功レスポンスを作成する
    pub fn new(status_code: u16, message: impl Into<String>, data: T) -> Self {
        Self {
            status: true,
            status_code,
            message: message.into(),
            data,
        }
    }

    /// 200 OK の成功レスポンスを作成する
    pub fn ok(message: impl Into<String>, data: T) -> Self {
        Self::new(200, message, data)
    }
}
