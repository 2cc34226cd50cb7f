//! # Todos ドメイン層
//!
//! Todo エンティティと、リクエストごとの入力ルールを定義する。
//!
//! ## 設計方針
//!
//! - **エンティティ**: [`todo::Todo`] は DB の 1 行をそのまま表す。識別子は DB が採番する
//! - **入力ルール**: 作成・全体更新・部分更新の入力を型（[`todo::NewTodo`],
//!   [`todo::TodoReplacement`], [`todo::TodoPatch`]）で表し、構築時に検証する
//! - **ドメインエラー**: ルール違反は [`DomainError`] で表現する
//!
//! ## 依存関係の方向
//!
//! ```text
//! api → infra → domain
//!   ↘            ↑
//!     ──────────
//! ```
//!
//! ドメイン層はインフラ層（DB）には一切依存しない。
//!
//! ## 使用例
//!
//! ```rust
//! use serde_json::json;
//! use todos_domain::{DomainError, todo::TodoPatch};
//!
//! let patch = TodoPatch::new(None, Some(json!(true))).unwrap();
//! assert_eq!(patch.status(), Some(true));
//!
//! let err = TodoPatch::new(None, None).unwrap_err();
//! assert!(matches!(err, DomainError::NoFieldsToUpdate));
//! ```

pub mod error;
pub mod todo;

pub use error::DomainError;
