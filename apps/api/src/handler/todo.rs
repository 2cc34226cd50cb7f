//! # Todo ハンドラ
//!
//! `todos` テーブルの CRUD API を提供する。
//!
//! ## エンドポイント
//!
//! - `GET /` - 一覧取得
//! - `GET /{id}` - ID 指定取得（該当なしでも 200 + 空配列）
//! - `POST /` - 作成（200 + 挿入結果メタデータ）
//! - `PUT /{id}` - 全体更新（text 偽値 + status 真値なら 404）
//! - `PATCH /{id}` - 部分更新
//! - `DELETE /{id}` - 削除
//!
//! パスはマウント先（`/api/v1/todos`）からの相対。
//! 成功時はすべて 200 で `{status, statusCode, message, data}` を返す。

use std::sync::Arc;

use axum::{
    Json,
    extract::{
        Path,
        State,
        rejection::{JsonRejection, PathRejection},
    },
    http::StatusCode,
    response::IntoResponse,
};
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use todos_domain::todo::{NewTodo, TodoId, TodoPatch, TodoReplacement};
use todos_infra::repository::TodoRepository;
use todos_shared::ApiResponse;

use crate::error::ApiError;

/// Todo API の共有状態
pub struct TodoState {
    pub repository: Arc<dyn TodoRepository>,
}

// --- リクエスト型 ---

/// 書き込み系リクエストのボディ
///
/// 各フィールドは「未指定」と「明示的な null」を区別するため
/// `Option<Value>` で受け取り、検証はドメイン層の入力型に委ねる。
#[derive(Debug, Default, Deserialize)]
pub struct TodoFieldsRequest {
    #[serde(default, deserialize_with = "deserialize_present")]
    pub text:   Option<Value>,
    #[serde(default, deserialize_with = "deserialize_present")]
    pub status: Option<Value>,
}

/// キーが存在すれば null も含めて `Some` にする
fn deserialize_present<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

// --- ハンドラ ---

/// GET /
///
/// 全件取得する。
#[tracing::instrument(skip_all)]
pub async fn list_todos(
    State(state): State<Arc<TodoState>>,
) -> Result<impl IntoResponse, ApiError> {
    let todos = state.repository.find_all().await?;

    let response = ApiResponse::ok("Success retrieved all todos data", todos);
    Ok((StatusCode::OK, Json(response)))
}

/// GET /{id}
///
/// ID で絞り込んだ結果を配列で返す。該当なしは空配列。
#[tracing::instrument(skip_all)]
pub async fn get_todo(
    State(state): State<Arc<TodoState>>,
    path: Result<Path<TodoId>, PathRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Path(id) = path?;

    let todos = state.repository.find_by_id(id).await?;

    let response = ApiResponse::ok("Success retrieved todo detail", todos);
    Ok((StatusCode::OK, Json(response)))
}

/// POST /
///
/// text のみを挿入する（未指定は NULL）。
///
/// ## レスポンス
///
/// - `200 OK`: `{affectedRows, insertId}`
/// - `400 Bad Request`: text が文字列でない
#[tracing::instrument(skip_all)]
pub async fn create_todo(
    State(state): State<Arc<TodoState>>,
    body: Result<Json<TodoFieldsRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(req) = body?;
    let new_todo = NewTodo::new(req.text)?;

    let result = state.repository.insert(&new_todo).await?;

    let response = ApiResponse::ok("Success created new todo", result);
    Ok((StatusCode::OK, Json(response)))
}

/// PUT /{id}
///
/// text と status の両方を書き換える（未指定は NULL）。
///
/// ## レスポンス
///
/// - `200 OK`: `{affectedRows}`
/// - `404 Not Found`: text が偽値かつ status が真値
/// - `400 Bad Request`: 型が不正
#[tracing::instrument(skip_all)]
pub async fn replace_todo(
    State(state): State<Arc<TodoState>>,
    path: Result<Path<TodoId>, PathRejection>,
    body: Result<Json<TodoFieldsRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Path(id) = path?;
    let Json(req) = body?;
    let replacement = TodoReplacement::new(req.text, req.status)?;

    let result = state.repository.replace(id, &replacement).await?;

    let response = ApiResponse::ok("Success updated new todo", result);
    Ok((StatusCode::OK, Json(response)))
}

/// PATCH /{id}
///
/// 指定されたフィールドのみ書き換える。
///
/// ## レスポンス
///
/// - `200 OK`: `{affectedRows}`
/// - `400 Bad Request`: text が空文字、status が真偽値でない、または更新対象なし
#[tracing::instrument(skip_all)]
pub async fn patch_todo(
    State(state): State<Arc<TodoState>>,
    path: Result<Path<TodoId>, PathRejection>,
    body: Result<Json<TodoFieldsRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Path(id) = path?;
    let Json(req) = body?;
    let patch = TodoPatch::new(req.text, req.status)?;

    let result = state.repository.patch(id, &patch).await?;

    let response = ApiResponse::ok("Success updated todo data", result);
    Ok((StatusCode::OK, Json(response)))
}

/// DELETE /{id}
///
/// 削除する。該当なしでも 200（`affectedRows: 0`）。
#[tracing::instrument(skip_all)]
pub async fn delete_todo(
    State(state): State<Arc<TodoState>>,
    path: Result<Path<TodoId>, PathRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Path(id) = path?;

    let result = state.repository.delete(id).await?;

    let response = ApiResponse::ok("Success deleted todo data", result);
    Ok((StatusCode::OK, Json(response)))
}
