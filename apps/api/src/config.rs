//! # API サーバー設定
//!
//! 環境変数から API サーバーの設定を読み込む。
//!
//! ## 環境変数
//!
//! | 変数名 | 必須 | デフォルト | 説明 |
//! |--------|------|------------|------|
//! | `HOST` | No | `0.0.0.0` | バインドアドレス |
//! | `PORT` | No | `3001` | ポート番号 |
//! | `DB_HOST` | **Yes** | - | データベースホスト |
//! | `DB_PORT` | No | `5432` | データベースポート |
//! | `DB_USER` | **Yes** | - | データベースユーザー |
//! | `DB_DATABASE` | **Yes** | - | データベース名 |
//! | `DB_PASSWORD` | No | 空 | データベースパスワード |
//! | `DB_MAX_CONNECTIONS` | No | `10` | 接続プールの最大接続数 |
//!
//! 開発環境では `.env` ファイルから読み込まれる（`main` で `dotenvy::dotenv()` を呼ぶ）。

use std::str::FromStr;

use thiserror::Error;
use todos_infra::db::DatabaseConfig;

/// 設定読み込みエラー
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// 必須の環境変数が設定されていない
    #[error("環境変数 {0} が設定されていません")]
    Missing(&'static str),

    /// 環境変数の値を解釈できない
    #[error("環境変数 {name} の値が不正です: {value:?}")]
    Invalid { name: &'static str, value: String },
}

/// API サーバーの設定
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// バインドアドレス
    pub host:     String,
    /// ポート番号
    pub port:     u16,
    /// データベース接続設定
    pub database: DatabaseConfig,
}

impl ApiConfig {
    /// 環境変数から設定を読み込む
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// 任意の参照関数から設定を読み込む
    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let required = |name: &'static str| lookup(name).ok_or(ConfigError::Missing(name));

        Ok(Self {
            host:     lookup("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port:     parse_or(&lookup, "PORT", 3001)?,
            database: DatabaseConfig {
                host:            required("DB_HOST")?,
                port:            parse_or(&lookup, "DB_PORT", 5432)?,
                user:            required("DB_USER")?,
                database:        required("DB_DATABASE")?,
                password:        lookup("DB_PASSWORD").unwrap_or_default(),
                max_connections: parse_or(&lookup, "DB_MAX_CONNECTIONS", 10)?,
            },
        })
    }
}

/// 数値の環境変数を読み込む（未設定ならデフォルト値）
fn parse_or<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &'static str,
    default: T,
) -> Result<T, ConfigError> {
    match lookup(name) {
        Some(value) => value
            .parse()
            .map_err(|_| ConfigError::Invalid { name, value }),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use pretty_assertions::assert_eq;

    use super::*;

    fn load(vars: &[(&str, &str)]) -> Result<ApiConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ApiConfig::from_lookup(|name| vars.get(name).cloned())
    }

    const REQUIRED: [(&str, &str); 3] = [
        ("DB_HOST", "localhost"),
        ("DB_USER", "todos"),
        ("DB_DATABASE", "todos_db"),
    ];

    #[test]
    fn test_必須項目のみでデフォルト値が使われる() {
        let config = load(&REQUIRED).unwrap();

        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 3001);
        assert_eq!(config.database.host, "localhost");
        assert_eq!(config.database.port, 5432);
        assert_eq!(config.database.user, "todos");
        assert_eq!(config.database.database, "todos_db");
        assert_eq!(config.database.password, "");
        assert_eq!(config.database.max_connections, 10);
    }

    #[test]
    fn test_任意項目を上書きできる() {
        let mut vars = REQUIRED.to_vec();
        vars.extend([
            ("HOST", "127.0.0.1"),
            ("PORT", "8080"),
            ("DB_PORT", "15432"),
            ("DB_PASSWORD", "secret"),
            ("DB_MAX_CONNECTIONS", "3"),
        ]);

        let config = load(&vars).unwrap();

        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 8080);
        assert_eq!(config.database.port, 15432);
        assert_eq!(config.database.password, "secret");
        assert_eq!(config.database.max_connections, 3);
    }

    #[test]
    fn test_必須項目が欠けるとmissingエラー() {
        let result = load(&[("DB_HOST", "localhost"), ("DB_DATABASE", "todos_db")]);

        assert_eq!(result.unwrap_err(), ConfigError::Missing("DB_USER"));
    }

    #[test]
    fn test_数値でないポートはinvalidエラー() {
        let mut vars = REQUIRED.to_vec();
        vars.push(("PORT", "abc"));

        let result = load(&vars);

        assert_eq!(
            result.unwrap_err(),
            ConfigError::Invalid {
                name:  "PORT",
                value: "abc".to_string(),
            }
        );
    }
}
