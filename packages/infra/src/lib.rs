//! # Todos インフラ層
//!
//! PostgreSQL との接続・通信を担当するインフラストラクチャ層。
//!
//! ## 責務
//!
//! - **データベース接続**: PostgreSQL への接続プール管理（[`db`]）
//! - **リポジトリ実装**: `todos` テーブルに対する SQL の発行（[`repository`]）
//! - **エラー定義**: 呼び出し経路付きのインフラ層エラー（[`error`]）
//!
//! ## 依存関係
//!
//! ```text
//! api → infra → domain
//! ```
//!
//! ## 使用例
//!
//! ```rust,ignore
//! use todos_infra::{db, repository::{PostgresTodoRepository, TodoRepository}};
//!
//! async fn setup(config: &db::DatabaseConfig) -> Result<(), Box<dyn std::error::Error>> {
//!     let pool = db::create_pool(config).await?;
//!     let repository = PostgresTodoRepository::new(pool);
//!     let todos = repository.find_all().await?;
//!     Ok(())
//! }
//! ```

pub mod db;
pub mod error;
#[cfg(any(test, feature = "test-utils"))]
pub mod fake;
pub mod repository;

pub use error::{InfraError, InfraErrorKind};
