mod config;
mod entities;
mod error;
mod extract;
mod routes;
mod services;
mod state;

use std::sync::Arc;

use migration::{Migrator, MigratorTrait};
use sea_orm::Database;

use config::Config;
use routes::create_routes;
use services::s3::StorageService;
use state::AppState;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    let config = Config::from_env();

    let db = Database::connect(&config.database_url)
        .await
        .expect("Failed to connect to database");
    Migrator::up(&db, None)
        .await
        .expect("Failed to run migrations");

    let storage = StorageService::new(&config);
    let app = create_routes(AppState {
        db: Arc::new(db),
        storage,
    });

    let listener = tokio::net::TcpListener::bind("0.0.0.0:3000").await.unwrap();
    println!("Listening on {}", listener.local_addr().unwrap());
    axum::serve(listener, app).await.unwrap();
}
