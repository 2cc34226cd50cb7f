//! # リポジトリ実装
//!
//! `todos` テーブルへのアクセスを提供する。
//!
//! ## 設計方針
//!
//! - **1 操作 = 1 SQL**: 各メソッドはちょうど 1 つのステートメントを発行する
//! - **パラメータバインド**: 値はすべてバインドパラメータで渡す
//! - **テスタビリティ**: トレイト経由でフェイク実装に差し替え可能

pub mod todo_repository;

pub use todo_repository::{PostgresTodoRepository, TodoRepository};
