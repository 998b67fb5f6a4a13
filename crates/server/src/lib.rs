//! Quill Server Library
//!
//! Token-authenticated user and post storage, file uploads, product
//! demos, and a broadcast chat room over WebSocket.

pub mod auth;
pub mod chat;
pub mod config;
pub mod error;
pub mod handlers;
pub mod models;
pub mod store;

use axum::{routing::get, routing::post, Router};
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use auth::TokenService;
use chat::ChatRelay;
use config::{AppState, ServerConfig};
use handlers::{
    // Products
    all_products,
    // Chat
    chat_upgrade,
    // Posts
    create_post,
    // Users
    create_user,
    delete_post,
    delete_user,
    // Files
    download_file,
    // Inspection
    inspect,
    // Token
    issue_token,
    list_user_posts,
    list_users,
    login,
    product_card,
    products_with_header,
    read_post,
    // Templating
    render_product,
    set_cookie,
    update_post,
    update_user,
    upload_file,
    upload_lines,
};
use store::Database;

/// Build the router over a ready AppState.
pub fn app(state: AppState) -> Router {
    Router::new()
        // Token endpoint
        .route("/auth/token", post(issue_token))
        // User endpoints
        .route(
            "/user",
            post(create_user)
                .get(list_users)
                .put(update_user)
                .delete(delete_user),
        )
        .route("/user/login", post(login))
        // Post endpoints
        .route("/posts", post(create_post))
        .route("/posts/{user_id}", get(list_user_posts))
        .route(
            "/posts/post/{post_id}",
            get(read_post).put(update_post).delete(delete_post),
        )
        // Product demos
        .route("/product/all", get(all_products))
        .route("/product/withheader", get(products_with_header))
        .route("/product/set_cookie", get(set_cookie))
        .route("/product/{id}", get(product_card))
        // File endpoints
        .route("/file/upload", post(upload_lines))
        .route("/file/uploadfile", post(upload_file))
        .route("/file/download/{file_name}", get(download_file))
        // HTML templating
        .route("/templates/product/{id}", post(render_product))
        // Request inspection
        .route("/inspect", get(inspect))
        // Chat room
        .route("/chat", get(chat_upgrade))
        // Health check
        .route("/health", get(health_check))
        .with_state(state)
        .layer(tower_http::cors::CorsLayer::permissive())
        .layer(tower_http::trace::TraceLayer::new_for_http())
}

pub async fn run() -> anyhow::Result<()> {
    // Initialize tracing
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("quill_server=debug,info"));
    let subscriber = FmtSubscriber::builder().with_env_filter(filter).finish();
    if tracing::subscriber::set_global_default(subscriber).is_err() {
        // Already set, ignore
    }

    info!("=== Quill Server ===");
    info!("Features: Token Auth | Users & Posts | Files | Chat Room");

    // Initialize configuration
    let config = ServerConfig::from_env();
    config.ensure_dirs().await?;

    info!("Data directory: {:?}", config.root_dir);
    info!("Upload directory: {:?}", config.upload_dir);

    // Open the database
    let db = Database::connect(&config.database_path()).await?;

    // Token service signs with the configured secret
    let tokens = TokenService::new(config.token_secret.as_bytes(), config.token_ttl_minutes);
    info!("Token service ready (ttl {} min)", config.token_ttl_minutes);

    // Chat relay
    let relay = Arc::new(ChatRelay::new());

    // Create app state
    let state = AppState {
        users: db.users(),
        posts: db.posts(),
        tokens,
        relay,
        config: config.clone(),
    };

    let router = app(state);

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    info!("");
    info!("╔════════════════════════════════════════════════════════════╗");
    info!("║  Quill Server Running                                      ║");
    info!("║  Address: http://localhost:{:<33}║", config.port);
    info!("╚════════════════════════════════════════════════════════════╝");
    info!("");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router).await?;

    Ok(())
}

async fn health_check() -> &'static str {
    "OK - Quill Server"
}
