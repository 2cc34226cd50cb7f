//! # アプリケーション構築
//!
//! State の受け取りとルーター構築を担当する。
//! `main.rs` はインフラ初期化とサーバー起動に集中する。

use std::sync::Arc;

use axum::{Router, routing::get};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::handler::{
    ReadinessState,
    TodoState,
    create_todo,
    delete_todo,
    get_todo,
    health_check,
    list_todos,
    patch_todo,
    readiness_check,
    replace_todo,
};

/// Todo API のマウント先
pub const TODOS_PREFIX: &str = "/api/v1/todos";

/// Todo API のルーター（マウント先からの相対パス）
fn todo_routes(state: Arc<TodoState>) -> Router {
    Router::new()
        .route("/", get(list_todos).post(create_todo))
        .route(
            "/{id}",
            get(get_todo)
                .put(replace_todo)
                .patch(patch_todo)
                .delete(delete_todo),
        )
        .with_state(state)
}

/// アプリケーション全体のルーターを構築する
///
/// CORS はすべてのオリジンを許可する。
pub fn build_app(todo_state: Arc<TodoState>, readiness_state: Arc<ReadinessState>) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .merge(
            Router::new()
                .route("/health/ready", get(readiness_check))
                .with_state(readiness_state),
        )
        .nest(TODOS_PREFIX, todo_routes(todo_state))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}
