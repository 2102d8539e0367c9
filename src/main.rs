use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    http::HeaderValue,
    routing::{get, post},
    Router,
};
use sqlx::postgres::PgPoolOptions;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

use kozarusa_api::api::handlers::users;
use kozarusa_api::api::AppState;
use kozarusa_api::auth::service::AuthService;
use kozarusa_api::config::Config;
use kozarusa_api::infrastructure::repositories::PostgresUserRepository;

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    // Load environment variables
    dotenv::dotenv().ok();

    let config = Config::from_env();

    // Connect to database
    tracing::info!("Connecting to database...");
    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&config.database_url)
        .await
        .expect("Failed to connect to database");

    tracing::info!("Database connected successfully");

    let users_repo = Arc::new(PostgresUserRepository::new(pool));
    let auth = Arc::new(AuthService::new(
        users_repo,
        config.jwt_secret.clone(),
        config.jwt_expires_hours,
        config.bcrypt_rounds,
    ));
    let state = AppState { auth };

    // Configure CORS: explicit allow list when configured, permissive in dev
    let cors = match &config.cors_origin {
        Some(list) => {
            let origins: Vec<HeaderValue> = list
                .split(',')
                .filter_map(|origin| origin.trim().parse().ok())
                .collect();
            CorsLayer::new()
                .allow_origin(AllowOrigin::list(origins))
                .allow_methods(Any)
                .allow_headers(Any)
        }
        None => CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any),
    };

    // Build router
    let app = Router::new()
        // Health check
        .route("/health", get(users::health_check))
        // User routes
        .route("/users", get(users::list_users))
        .route("/users/login", post(users::login))
        .route("/users/signup", post(users::signup))
        // Middleware
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        // Shared state
        .with_state(state);

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind address");

    axum::serve(listener, app).await.expect("Server failed");
}
