//! # API エラーハンドリング
//!
//! ハンドラが返すエラーと、HTTP レスポンスへの変換を定義する。
//!
//! ## エラーの階層
//!
//! ```text
//! DomainError / JsonRejection / PathRejection ──▶ ApiError::Validation ──▶ {status:false, statusCode, message}
//! InfraError                                  ──▶ ApiError::Infra      ──▶ 500 "Something broke!"
//! ```
//!
//! データベースエラーの詳細はクライアントに返さない。
//! エラー内容と [`SpanTrace`](tracing_error::SpanTrace) はサーバーサイドのログにのみ出力する。

use axum::{
    Json,
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;
use todos_domain::DomainError;
use todos_infra::InfraError;
use todos_shared::ErrorResponse;

/// 内部エラー時に返す固定のレスポンスボディ
pub const INTERNAL_ERROR_BODY: &str = "Something broke!";

/// API 層で発生するエラー
#[derive(Debug, Error)]
pub enum ApiError {
    /// 入力値の検証エラー
    ///
    /// `status` はそのまま HTTP ステータスとエンベロープの `statusCode` になる。
    #[error("{message}")]
    Validation { status: StatusCode, message: String },

    /// データベースエラー（500 Internal Server Error）
    #[error("データベースエラー: {0}")]
    Infra(#[from] InfraError),
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        let status = match err {
            DomainError::MissingFields => StatusCode::NOT_FOUND,
            DomainError::InvalidPatch
            | DomainError::NoFieldsToUpdate
            | DomainError::InvalidText
            | DomainError::InvalidStatus => StatusCode::BAD_REQUEST,
        };
        Self::Validation {
            status,
            message: err.to_string(),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::Validation {
            status:  rejection.status(),
            message: rejection.body_text(),
        }
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        Self::Validation {
            status:  rejection.status(),
            message: rejection.body_text(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Validation { status, message } => {
                (status, Json(ErrorResponse::new(status.as_u16(), message))).into_response()
            }
            ApiError::Infra(e) => {
                tracing::error!(
                    error = %e,
                    span_trace = %e.span_trace(),
                    "データベースエラー"
                );
                (StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_ERROR_BODY).into_response()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use axum::body::to_bytes;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    async fn body_string(response: Response) -> String {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[rstest]
    #[case(DomainError::MissingFields, StatusCode::NOT_FOUND)]
    #[case(DomainError::InvalidPatch, StatusCode::BAD_REQUEST)]
    #[case(DomainError::NoFieldsToUpdate, StatusCode::BAD_REQUEST)]
    #[case(DomainError::InvalidText, StatusCode::BAD_REQUEST)]
    #[case(DomainError::InvalidStatus, StatusCode::BAD_REQUEST)]
    #[tokio::test]
    async fn test_ドメインエラーのステータスとエンベロープ(
        #[case] err: DomainError,
        #[case] expected: StatusCode,
    ) {
        let message = err.to_string();

        let response = ApiError::from(err).into_response();

        assert_eq!(response.status(), expected);
        let body: ErrorResponse = serde_json::from_str(&body_string(response).await).unwrap();
        assert_eq!(body, ErrorResponse::new(expected.as_u16(), message));
    }

    #[tokio::test]
    async fn test_インフラエラーは500と固定のプレーンテキスト() {
        let err = ApiError::from(InfraError::from(sqlx::Error::PoolTimedOut));

        let response = err.into_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let content_type = response.headers()["content-type"].to_str().unwrap().to_string();
        assert!(content_type.starts_with("text/plain"));
        assert_eq!(body_string(response).await, "Something broke!");
    }
}
