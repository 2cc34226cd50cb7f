//! # テスト用フェイクリポジトリ
//!
//! ハンドラテストで使用するインメモリ実装。
//! `test-utils` feature を有効にすることで、他クレートからも利用可能。
//!
//! ```toml
//! [dev-dependencies]
//! todos-infra = { workspace = true, features = ["test-utils"] }
//! ```

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use todos_domain::todo::{NewTodo, Todo, TodoId, TodoPatch, TodoReplacement, TodoWriteResult};

use crate::{error::InfraError, repository::TodoRepository};

// ===== FakeTodoRepository =====

/// `todos` テーブルを Vec で模したリポジトリ
///
/// 採番は 1 から始まる連番。作成時の status はテーブルのデフォルト値（false）。
#[derive(Clone)]
pub struct FakeTodoRepository {
    state: Arc<Mutex<FakeTable>>,
}

struct FakeTable {
    rows:    Vec<Todo>,
    next_id: i64,
}

impl FakeTodoRepository {
    pub fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(FakeTable {
                rows:    Vec::new(),
                next_id: 1,
            })),
        }
    }

    /// 既存の行を登録した状態で作成する
    pub fn with_todos(todos: Vec<Todo>) -> Self {
        let next_id = todos.iter().map(|t| t.id().as_i64()).max().unwrap_or(0) + 1;
        Self {
            state: Arc::new(Mutex::new(FakeTable {
                rows: todos,
                next_id,
            })),
        }
    }

    /// 現在の行をすべて返す
    pub fn snapshot(&self) -> Vec<Todo> {
        self.state.lock().unwrap().rows.clone()
    }

    fn update_where(&self, id: TodoId, f: impl Fn(Todo) -> Todo) -> TodoWriteResult {
        let mut state = self.state.lock().unwrap();
        let mut affected = 0;
        state.rows = std::mem::take(&mut state.rows)
            .into_iter()
            .map(|todo| {
                if todo.id() == id {
                    affected += 1;
                    f(todo)
                } else {
                    todo
                }
            })
            .collect();
        TodoWriteResult::affected(affected)
    }
}

impl Default for FakeTodoRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TodoRepository for FakeTodoRepository {
    async fn find_all(&self) -> Result<Vec<Todo>, InfraError> {
        Ok(self.snapshot())
    }

    async fn find_by_id(&self, id: TodoId) -> Result<Vec<Todo>, InfraError> {
        Ok(self
            .state
            .lock()
            .unwrap()
            .rows
            .iter()
            .filter(|t| t.id() == id)
            .cloned()
            .collect())
    }

    async fn insert(&self, new_todo: &NewTodo) -> Result<TodoWriteResult, InfraError> {
        let mut state = self.state.lock().unwrap();
        let id = TodoId::from_i64(state.next_id);
        state.next_id += 1;
        state.rows.push(Todo::from_db(
            id,
            new_todo.text().map(str::to_string),
            Some(false),
        ));
        Ok(TodoWriteResult::inserted(id))
    }

    async fn replace(
        &self,
        id: TodoId,
        replacement: &TodoReplacement,
    ) -> Result<TodoWriteResult, InfraError> {
        Ok(self.update_where(id, |todo| todo.replaced(replacement)))
    }

    async fn patch(&self, id: TodoId, patch: &TodoPatch) -> Result<TodoWriteResult, InfraError> {
        Ok(self.update_where(id, |todo| todo.patched(patch)))
    }

    async fn delete(&self, id: TodoId) -> Result<TodoWriteResult, InfraError> {
        let mut state = self.state.lock().unwrap();
        let before = state.rows.len();
        state.rows.retain(|t| t.id() != id);
        Ok(TodoWriteResult::affected((before - state.rows.len()) as u64))
    }
}

// ===== FailingTodoRepository =====

/// すべての操作でデータベースエラーを返すリポジトリ
#[derive(Clone, Default)]
pub struct FailingTodoRepository;

impl FailingTodoRepository {
    #[tracing::instrument(name = "failing_todo_repository")]
    fn fail<T>() -> Result<T, InfraError> {
        Err(sqlx::Error::PoolTimedOut.into())
    }
}

#[async_trait]
impl TodoRepository for FailingTodoRepository {
    async fn find_all(&self) -> Result<Vec<Todo>, InfraError> {
        Self::fail()
    }

    async fn find_by_id(&self, _id: TodoId) -> Result<Vec<Todo>, InfraError> {
        Self::fail()
    }

    async fn insert(&self, _new_todo: &NewTodo) -> Result<TodoWriteResult, InfraError> {
        Self::fail()
    }

    async fn replace(
        &self,
        _id: TodoId,
        _replacement: &TodoReplacement,
    ) -> Result<TodoWriteResult, InfraError> {
        Self::fail()
    }

    async fn patch(&self, _id: TodoId, _patch: &TodoPatch) -> Result<TodoWriteResult, InfraError> {
        Self::fail()
    }

    async fn delete(&self, _id: TodoId) -> Result<TodoWriteResult, InfraError> {
        Self::fail()
    }
}
