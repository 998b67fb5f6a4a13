//! HTTP and WebSocket handlers.

pub mod auth;
pub mod chat;
pub mod files;
pub mod inspect;
pub mod posts;
pub mod products;
pub mod templates;
pub mod users;

// Re-export AppState from config
pub use crate::config::AppState;

// Token endpoint
pub use auth::issue_token;

// Chat room
pub use chat::chat_upgrade;

// File uploads and downloads
pub use files::{download_file, upload_file, upload_lines};

// Request inspection
pub use inspect::inspect;

// Post CRUD
pub use posts::{create_post, delete_post, list_user_posts, read_post, update_post};

// Product demos
pub use products::{all_products, product_card, products_with_header, set_cookie};

// HTML templating
pub use templates::render_product;

// User CRUD
pub use users::{create_user, delete_user, list_users, login, update_user};
