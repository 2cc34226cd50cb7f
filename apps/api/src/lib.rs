//! # Todos API サーバー
//!
//! `todos` テーブルに対する CRUD を提供する HTTP サービス。
//!
//! ## モジュール構成
//!
//! - [`app`] - ルーター構築
//! - [`config`] - アプリケーション設定（環境変数からの読み込み）
//! - [`error`] - API エラー定義と HTTP レスポンスへの変換
//! - [`handler`] - HTTP リクエストハンドラ
//!
//! ## 依存関係
//!
//! - `todos_domain`: Todo エンティティ、入力ルール
//! - `todos_infra`: データベース接続、リポジトリ
//! - `todos_shared`: レスポンスエンベロープ、Observability
//!
//! ## 使用例
//!
//! ```rust,ignore
//! use todos_api::{app::build_app, config::ApiConfig};
//!
//! let config = ApiConfig::from_env()?;
//! ```

pub mod app;
pub mod config;
pub mod error;
pub mod handler;
