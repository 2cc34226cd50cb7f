//! # ヘルスチェックハンドラ
//!
//! アプリケーションの稼働状態を確認するためのエンドポイント。
//!
//! ## エンドポイント
//!
//! ```text
//! GET /health        # Liveness（プロセスが応答できるか）
//! GET /health/ready  # Readiness（データベースに到達できるか）
//! ```
//!
//! ## レスポンス例
//!
//! ```json
//! {"status":"healthy","version":"0.1.0"}
//! {"status":"ready","checks":{"database":"ok"}}
//! ```

use std::{collections::HashMap, sync::Arc, time::Duration};

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use sqlx::PgPool;
use todos_infra::db;
use todos_shared::{CheckStatus, HealthResponse, ReadinessResponse};

/// データベース疎通確認のタイムアウト
const DATABASE_CHECK_TIMEOUT: Duration = Duration::from_secs(5);

/// ヘルスチェックエンドポイント
///
/// データベースへの接続は確認せず、アプリケーション自体の起動状態のみを返す。
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status:  "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Readiness Check 用の State
pub struct ReadinessState {
    pub pool: PgPool,
}

/// Readiness Check エンドポイント
///
/// 全チェック OK → 200、1 つでも失敗 → 503。
#[tracing::instrument(skip_all)]
pub async fn readiness_check(State(state): State<Arc<ReadinessState>>) -> impl IntoResponse {
    let mut checks = HashMap::new();
    checks.insert("database".to_string(), check_database(&state.pool).await);

    let response = ReadinessResponse::from_checks(checks);
    let http_status = if response.is_ready() {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (http_status, Json(response))
}

/// データベースへの接続を `SELECT 1` で確認する
async fn check_database(pool: &PgPool) -> CheckStatus {
    match db::ping(pool, DATABASE_CHECK_TIMEOUT).await {
        Ok(()) => CheckStatus::Ok,
        Err(e) if e.is_timeout() => {
            tracing::warn!(error = %e, "readiness check: database ping timed out");
            CheckStatus::Error
        }
        Err(e) => {
            tracing::warn!(error = %e, "readiness check: database ping failed");
            CheckStatus::Error
        }
    }
}
