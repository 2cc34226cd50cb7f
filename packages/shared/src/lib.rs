//! # Todos 共有ユーティリティ
//!
//! このクレートは、Todos プロジェクト全体で使用される共通ユーティリティを提供する。
//!
//! ## 設計方針
//!
//! - 他のすべてのクレート（domain, infra, api）から依存される
//! - ビジネスロジックを含まない純粋なユーティリティのみを配置
//! - axum には依存しない（`IntoResponse` 変換は api クレートの責務）

pub mod api_response;
pub mod error_response;
pub mod health;
pub mod observability;

pub use api_response::ApiResponse;
pub use error_response::ErrorResponse;
pub use health::{CheckStatus, HealthResponse, ReadinessResponse, ReadinessStatus};
