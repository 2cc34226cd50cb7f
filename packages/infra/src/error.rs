//! # インフラ層エラー定義
//!
//! `todos` テーブルへのアクセスで発生する失敗を表す。
//!
//! [`InfraError`] は失敗の種別（[`InfraErrorKind`]）と、生成時点の [`SpanTrace`] を束ねる。
//! リポジトリメソッドは `#[tracing::instrument]` でスパンを張っているため、
//! `?` で `sqlx::Error` を変換した瞬間に「どの操作の、どの ID で」失敗したかが残る。
//!
//! | 種別 | 発生源 | API 層での扱い |
//! |------|--------|----------------|
//! | `Database` | クエリ実行・接続取得 | 500 `Something broke!` + ログ |
//! | `Timeout` | 疎通確認の時間切れ | readiness の `error` 判定 |

use std::time::Duration;

use derive_more::Display;
use thiserror::Error;
use tracing_error::SpanTrace;

/// インフラ層で発生するエラー
#[derive(Debug, Display)]
#[display("{kind}")]
pub struct InfraError {
    kind:       InfraErrorKind,
    span_trace: SpanTrace,
}

/// インフラ層エラーの種別
#[derive(Debug, Error)]
pub enum InfraErrorKind {
    /// SQL の実行失敗、接続プールの枯渇など sqlx が返したエラー
    #[error("データベースエラー: {0}")]
    Database(#[source] sqlx::Error),

    /// 制限時間内に応答がなかった
    #[error("{operation}がタイムアウトしました（{}ms）", .after.as_millis())]
    Timeout {
        operation: &'static str,
        after:     Duration,
    },
}

impl InfraError {
    fn capture(kind: InfraErrorKind) -> Self {
        Self {
            kind,
            span_trace: SpanTrace::capture(),
        }
    }

    /// `operation` が `after` 以内に終わらなかったことを表すエラー
    pub fn timeout(operation: &'static str, after: Duration) -> Self {
        Self::capture(InfraErrorKind::Timeout { operation, after })
    }

    pub fn kind(&self) -> &InfraErrorKind {
        &self.kind
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self.kind, InfraErrorKind::Timeout { .. })
    }

    /// 生成時点のスパン（リポジトリ操作名と対象 ID）
    pub fn span_trace(&self) -> &SpanTrace {
        &self.span_trace
    }
}

impl std::error::Error for InfraError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        std::error::Error::source(&self.kind)
    }
}

impl From<sqlx::Error> for InfraError {
    fn from(source: sqlx::Error) -> Self {
        Self::capture(InfraErrorKind::Database(source))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use tracing_subscriber::layer::SubscriberExt as _;

    use super::*;

    fn with_error_layer(f: impl FnOnce()) {
        let subscriber = tracing_subscriber::registry().with(tracing_error::ErrorLayer::default());
        let _guard = tracing::subscriber::set_default(subscriber);
        f();
    }

    #[test]
    fn test_sqlxエラーの変換時にリポジトリのスパンが記録される() {
        with_error_layer(|| {
            let span = tracing::info_span!("patch", id = 42);
            let _enter = span.enter();

            let err: InfraError = sqlx::Error::PoolTimedOut.into();

            assert!(matches!(err.kind(), InfraErrorKind::Database(_)));
            let trace = err.span_trace().to_string();
            assert!(trace.contains("patch"), "SpanTrace がスパン名を含むこと: {trace}");
            assert!(trace.contains("id=42"), "SpanTrace がフィールドを含むこと: {trace}");
        });
    }

    #[test]
    fn test_timeoutは操作名と経過時間を表示する() {
        let err = InfraError::timeout("データベースの疎通確認", Duration::from_millis(1500));

        assert!(err.is_timeout());
        assert_eq!(
            err.to_string(),
            "データベースの疎通確認がタイムアウトしました（1500ms）"
        );
    }

    #[test]
    fn test_データベースエラーはtimeoutではない() {
        let err: InfraError = sqlx::Error::PoolClosed.into();

        assert!(!err.is_timeout());
        assert!(err.to_string().starts_with("データベースエラー: "));
    }

    #[test]
    fn test_sourceはsqlxエラーを指す() {
        use std::error::Error;

        let err: InfraError = sqlx::Error::RowNotFound.into();
        let timeout = InfraError::timeout("x", Duration::from_secs(1));

        assert!(err.source().is_some());
        assert!(timeout.source().is_none());
    }
}
