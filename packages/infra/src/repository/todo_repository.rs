//! # TodoRepository
//!
//! `todos` テーブルの CRUD を担当するリポジトリ。
//!
//! ## 設計方針
//!
//! - **存在チェックをしない**: ID で絞り込んだ結果が 0 件でもエラーにしない。
//!   取得は空の一覧、更新・削除は `affectedRows: 0` を返す
//! - **部分更新の動的 SQL**: 指定されたカラムだけを `SET` 句に含める。
//!   カラム名は固定文字列、値はすべてバインドパラメータ
//!
//! ## テーブル
//!
//! ```sql
//! todos (
//!     id     BIGSERIAL PRIMARY KEY,
//!     text   TEXT,
//!     status BOOLEAN DEFAULT FALSE
//! )
//! ```

use async_trait::async_trait;
use sqlx::{PgPool, Postgres, QueryBuilder};
use todos_domain::todo::{NewTodo, Todo, TodoId, TodoPatch, TodoReplacement, TodoWriteResult};

use crate::error::InfraError;

/// Todo リポジトリトレイト
#[async_trait]
pub trait TodoRepository: Send + Sync {
    /// 全件取得する（ページネーションなし）
    async fn find_all(&self) -> Result<Vec<Todo>, InfraError>;

    /// ID で絞り込んで取得する
    ///
    /// 存在しない場合は空の Vec を返す。
    async fn find_by_id(&self, id: TodoId) -> Result<Vec<Todo>, InfraError>;

    /// 挿入する（status はテーブルのデフォルト値）
    async fn insert(&self, new_todo: &NewTodo) -> Result<TodoWriteResult, InfraError>;

    /// text と status の両方を書き換える
    async fn replace(
        &self,
        id: TodoId,
        replacement: &TodoReplacement,
    ) -> Result<TodoWriteResult, InfraError>;

    /// 指定されたカラムのみ書き換える
    async fn patch(&self, id: TodoId, patch: &TodoPatch) -> Result<TodoWriteResult, InfraError>;

    /// 削除する
    async fn delete(&self, id: TodoId) -> Result<TodoWriteResult, InfraError>;
}

/// PostgreSQL 実装の TodoRepository
#[derive(Debug, Clone)]
pub struct PostgresTodoRepository {
    pool: PgPool,
}

impl PostgresTodoRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// `todos` テーブルの行
#[derive(Debug, sqlx::FromRow)]
struct TodoRow {
    id:     i64,
    text:   Option<String>,
    status: Option<bool>,
}

impl From<TodoRow> for Todo {
    fn from(row: TodoRow) -> Self {
        Todo::from_db(TodoId::from_i64(row.id), row.text, row.status)
    }
}

#[async_trait]
impl TodoRepository for PostgresTodoRepository {
    #[tracing::instrument(skip_all, level = "debug")]
    async fn find_all(&self) -> Result<Vec<Todo>, InfraError> {
        let rows = sqlx::query_as::<_, TodoRow>("SELECT id, text, status FROM todos ORDER BY id")
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(Todo::from).collect())
    }

    #[tracing::instrument(skip_all, level = "debug", fields(%id))]
    async fn find_by_id(&self, id: TodoId) -> Result<Vec<Todo>, InfraError> {
        let rows =
            sqlx::query_as::<_, TodoRow>("SELECT id, text, status FROM todos WHERE id = $1")
                .bind(id.as_i64())
                .fetch_all(&self.pool)
                .await?;

        Ok(rows.into_iter().map(Todo::from).collect())
    }

    #[tracing::instrument(skip_all, level = "debug")]
    async fn insert(&self, new_todo: &NewTodo) -> Result<TodoWriteResult, InfraError> {
        let id: i64 = sqlx::query_scalar("INSERT INTO todos (text) VALUES ($1) RETURNING id")
            .bind(new_todo.text())
            .fetch_one(&self.pool)
            .await?;

        Ok(TodoWriteResult::inserted(TodoId::from_i64(id)))
    }

    #[tracing::instrument(skip_all, level = "debug", fields(%id))]
    async fn replace(
        &self,
        id: TodoId,
        replacement: &TodoReplacement,
    ) -> Result<TodoWriteResult, InfraError> {
        let result = sqlx::query("UPDATE todos SET text = $1, status = $2 WHERE id = $3")
            .bind(replacement.text())
            .bind(replacement.status())
            .bind(id.as_i64())
            .execute(&self.pool)
            .await?;

        Ok(TodoWriteResult::affected(result.rows_affected()))
    }

    #[tracing::instrument(skip_all, level = "debug", fields(%id))]
    async fn patch(&self, id: TodoId, patch: &TodoPatch) -> Result<TodoWriteResult, InfraError> {
        let mut builder = build_patch_query(id, patch);
        let result = builder.build().execute(&self.pool).await?;

        Ok(TodoWriteResult::affected(result.rows_affected()))
    }

    #[tracing::instrument(skip_all, level = "debug", fields(%id))]
    async fn delete(&self, id: TodoId) -> Result<TodoWriteResult, InfraError> {
        let result = sqlx::query("DELETE FROM todos WHERE id = $1")
            .bind(id.as_i64())
            .execute(&self.pool)
            .await?;

        Ok(TodoWriteResult::affected(result.rows_affected()))
    }
}

/// 部分更新の UPDATE 文を組み立てる
///
/// `TodoPatch` は少なくとも 1 フィールドを持つため、`SET` 句が空になることはない。
fn build_patch_query(id: TodoId, patch: &TodoPatch) -> QueryBuilder<'static, Postgres> {
    let mut builder = QueryBuilder::<Postgres>::new("UPDATE todos SET ");

    let mut columns = builder.separated(", ");
    if let Some(text) = patch.text() {
        columns.push("text = ");
        columns.push_bind_unseparated(text.map(str::to_string));
    }
    if let Some(status) = patch.status() {
        columns.push("status = ");
        columns.push_bind_unseparated(status);
    }

    builder.push(" WHERE id = ");
    builder.push_bind(id.as_i64());
    builder
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    #[test]
    fn test_部分更新でtextのみのsql() {
        let patch = TodoPatch::new(Some(json!("walk dog")), None).unwrap();

        let builder = build_patch_query(TodoId::from_i64(1), &patch);

        assert_eq!(builder.sql(), "UPDATE todos SET text = $1 WHERE id = $2");
    }

    #[test]
    fn test_部分更新でstatusのみのsql() {
        let patch = TodoPatch::new(None, Some(json!(true))).unwrap();

        let builder = build_patch_query(TodoId::from_i64(1), &patch);

        assert_eq!(builder.sql(), "UPDATE todos SET status = $1 WHERE id = $2");
    }

    #[test]
    fn test_部分更新でtextのnull指定もバインドされる() {
        let patch = TodoPatch::new(Some(json!(null)), None).unwrap();

        let builder = build_patch_query(TodoId::from_i64(1), &patch);

        assert_eq!(builder.sql(), "UPDATE todos SET text = $1 WHERE id = $2");
    }

    #[test]
    fn test_部分更新で両方指定したsql() {
        let patch = TodoPatch::new(Some(json!("walk dog")), Some(json!(false))).unwrap();

        let builder = build_patch_query(TodoId::from_i64(1), &patch);

        assert_eq!(
            builder.sql(),
            "UPDATE todos SET text = $1, status = $2 WHERE id = $3"
        );
    }
}
