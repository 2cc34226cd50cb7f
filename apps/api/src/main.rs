//! # Todos API サーバー
//!
//! `todos` テーブルの CRUD を `/api/v1/todos` で公開する HTTP サーバー。
//!
//! ## 環境変数
//!
//! | 変数名 | 必須 | 説明 |
//! |--------|------|------|
//! | `HOST` | No | バインドアドレス（デフォルト: `0.0.0.0`） |
//! | `PORT` | No | ポート番号（デフォルト: `3001`） |
//! | `DB_HOST` / `DB_USER` / `DB_DATABASE` | **Yes** | データベース接続先 |
//! | `DB_PASSWORD` | No | データベースパスワード |
//! | `LOG_FORMAT` | No | `json` または `pretty` |
//! | `RUST_LOG` | No | ログフィルタ（デフォルト: `info,todos=debug`） |
//!
//! 詳細は [`todos_api::config`] を参照。
//!
//! ## 起動方法
//!
//! ```bash
//! DB_HOST=localhost DB_USER=todos DB_DATABASE=todos cargo run -p todos-api
//! ```

use std::{net::SocketAddr, sync::Arc};

use anyhow::Context as _;
use todos_api::{
    app::build_app,
    config::ApiConfig,
    handler::{ReadinessState, TodoState},
};
use todos_infra::{db, repository::PostgresTodoRepository};
use todos_shared::observability::{TracingConfig, init_tracing};
use tokio::{net::TcpListener, signal};

/// API サーバーのエントリーポイント
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // .env ファイルを読み込む（存在する場合）
    dotenvy::dotenv().ok();

    init_tracing(TracingConfig::from_env("todos-api"));
    let _tracing_guard = tracing::info_span!("app", service = "todos-api").entered();

    let config = ApiConfig::from_env().context("設定の読み込みに失敗しました")?;
    tracing::info!(
        "API サーバーを起動します: {}:{}",
        config.host,
        config.port
    );

    let pool = db::create_pool(&config.database)
        .await
        .context("データベース接続に失敗しました")?;
    tracing::info!(database = ?config.database, "データベースに接続しました");

    // Readiness Check 用 State（pool が move される前に clone）
    let readiness_state = Arc::new(ReadinessState { pool: pool.clone() });
    let todo_state = Arc::new(TodoState {
        repository: Arc::new(PostgresTodoRepository::new(pool.clone())),
    });

    let app = build_app(todo_state, readiness_state);

    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .context("アドレスのパースに失敗しました")?;

    let listener = TcpListener::bind(addr).await?;
    tracing::info!(%addr, "Server running on http://localhost:{}", config.port);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    pool.close().await;
    tracing::info!("データベース接続を閉じました");

    Ok(())
}

/// Ctrl+C または SIGTERM を待つ
///
/// シグナルハンドラの登録に失敗した場合はそのシグナルを待たない。
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "Ctrl+C ハンドラの登録に失敗しました");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "SIGTERM ハンドラの登録に失敗しました");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => tracing::info!("Ctrl+C を受信しました。シャットダウンします"),
        () = terminate => tracing::info!("SIGTERM を受信しました。シャットダウンします"),
    }
}
