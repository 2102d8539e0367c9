// Development bootstrap: resets the users table and inserts an admin account
// Execute: cargo run --bin seed

use sqlx::postgres::PgPoolOptions;

use kozarusa_api::auth::password::hash_password;
use kozarusa_api::config::Config;
use kozarusa_api::domain::repositories::UserRepository;
use kozarusa_api::domain::user::{User, UserRecord};
use kozarusa_api::infrastructure::repositories::PostgresUserRepository;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();
    dotenv::dotenv().ok();

    let config = Config::from_env();

    let pool = PgPoolOptions::new()
        .max_connections(1)
        .connect(&config.database_url)
        .await
        .expect("Failed to connect to database");

    sqlx::query("DELETE FROM users")
        .execute(&pool)
        .await
        .expect("Failed to clear users");

    let password =
        hash_password("Adm1n123!", config.bcrypt_rounds).expect("Failed to hash password");

    // Elevated roles are assigned here, with direct store access; the public
    // signup path always forces the default role
    let admin = User::new(UserRecord {
        id: None,
        username: "admin".to_string(),
        first_name: "Admin".to_string(),
        last_name: "Admin".to_string(),
        email: "administration@test.be".to_string(),
        password,
        role: "admin".to_string(),
        created_at: None,
        updated_at: None,
    })
    .expect("Admin user should be valid");

    let repo = PostgresUserRepository::new(pool);
    let stored = repo.insert(&admin).await.expect("Failed to insert admin");

    tracing::info!("Seeded admin user with id {:?}", stored.id());
}
