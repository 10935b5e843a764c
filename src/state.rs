use std::sync::Arc;

use sea_orm::DatabaseConnection;

use crate::services::s3::StorageService;

// DatabaseConnection is not Clone when sea-orm's mock feature is enabled,
// so the shared handle lives behind an Arc.
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<DatabaseConnection>,
    pub storage: StorageService,
}
