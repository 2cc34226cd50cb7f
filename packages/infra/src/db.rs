//! # PostgreSQL データベース接続管理
//!
//! データベース接続プールの作成と管理を行う。
//!
//! ## 設計方針
//!
//! - **接続プール**: 単一の共有コネクションではなくプールを使い、同時リクエスト間で
//!   コネクションの取り合い（head-of-line blocking）が起きないようにする
//! - **ライフサイクル**: 起動時に一度だけ作成し、シャットダウン時に `PgPool::close` で閉じる
//! - **接続情報の分割指定**: ホスト・ユーザー・DB 名・パスワードを個別の環境変数から受け取る
//!
//! ## 使用例
//!
//! ```rust,ignore
//! use todos_infra::db::{self, DatabaseConfig};
//!
//! async fn example(config: &DatabaseConfig) -> Result<(), sqlx::Error> {
//!     let pool = db::create_pool(config).await?;
//!
//!     // クエリ実行（接続はプールから自動取得・返却）
//!     let row: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM todos")
//!         .fetch_one(&pool)
//!         .await?;
//!
//!     pool.close().await;
//!     Ok(())
//! }
//! ```

use std::{fmt, time::Duration};

use sqlx::{
    PgPool,
    postgres::{PgConnectOptions, PgPoolOptions},
};

use crate::error::InfraError;

/// プールからの接続取得タイムアウト
const ACQUIRE_TIMEOUT: Duration = Duration::from_secs(5);

/// データベース接続設定
#[derive(Clone)]
pub struct DatabaseConfig {
    pub host:            String,
    pub port:            u16,
    pub user:            String,
    pub database:        String,
    pub password:        String,
    /// プールの最大接続数
    pub max_connections: u32,
}

impl DatabaseConfig {
    /// sqlx の接続オプションに変換する
    pub fn connect_options(&self) -> PgConnectOptions {
        let options = PgConnectOptions::new()
            .host(&self.host)
            .port(self.port)
            .username(&self.user)
            .database(&self.database);

        if self.password.is_empty() {
            options
        } else {
            options.password(&self.password)
        }
    }
}

// パスワードをログに出さない
impl fmt::Debug for DatabaseConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DatabaseConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("user", &self.user)
            .field("database", &self.database)
            .field("password", &"********")
            .field("max_connections", &self.max_connections)
            .finish()
    }
}

/// PostgreSQL 接続プールを作成する
///
/// アプリケーション起動時に一度だけ呼び出し、作成したプールを
/// アプリケーション全体で共有する。
///
/// # 設定値
///
/// - `max_connections`: [`DatabaseConfig::max_connections`]
/// - `acquire_timeout(5秒)`: 接続取得のタイムアウト。超過時はエラー
///
/// # エラー
///
/// 接続失敗、認証エラーなどは `sqlx::Error` で返す。パニックしない。
pub async fn create_pool(config: &DatabaseConfig) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(ACQUIRE_TIMEOUT)
        .connect_with(config.connect_options())
        .await
}

/// `SELECT 1` でデータベースへの疎通を確認する
///
/// `timeout` を超えた場合は [`InfraError::timeout`] を返す。
#[tracing::instrument(skip(pool))]
pub async fn ping(pool: &PgPool, timeout: Duration) -> Result<(), InfraError> {
    match tokio::time::timeout(timeout, sqlx::query("SELECT 1").execute(pool)).await {
        Ok(result) => {
            result?;
            Ok(())
        }
        Err(_) => Err(InfraError::timeout("データベースの疎通確認", timeout)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(password: &str) -> DatabaseConfig {
        DatabaseConfig {
            host:            "db.internal".to_string(),
            port:            5433,
            user:            "todos".to_string(),
            database:        "todos_db".to_string(),
            password:        password.to_string(),
            max_connections: 10,
        }
    }

    #[test]
    fn test_connect_optionsに接続情報が反映される() {
        let options = config("secret").connect_options();

        assert_eq!(options.get_host(), "db.internal");
        assert_eq!(options.get_port(), 5433);
        assert_eq!(options.get_username(), "todos");
        assert_eq!(options.get_database(), Some("todos_db"));
    }

    #[test]
    fn test_debug出力にパスワードが含まれない() {
        let debug = format!("{:?}", config("secret"));

        assert!(!debug.contains("secret"));
        assert!(debug.contains("********"));
    }

    #[tokio::test]
    async fn test_pingは接続できないとエラーを返す() {
        let pool = PgPoolOptions::new()
            .acquire_timeout(Duration::from_millis(200))
            .connect_lazy_with(
                DatabaseConfig {
                    host: "127.0.0.1".to_string(),
                    port: 1,
                    ..config("")
                }
                .connect_options(),
            );

        let result = ping(&pool, Duration::from_secs(2)).await;

        assert!(result.is_err());
    }
}
