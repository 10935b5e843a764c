use std::env;

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub storage_access_key_id: String,
    pub storage_secret_access_key: String,
    pub storage_endpoint: String,
    pub storage_bucket: String,
    pub cdn_base_url: String,
}

impl Config {
    pub fn from_env() -> Self {
        let database_url = env::var("DATABASE_URL").expect("DATABASE_URL must be set");
        let storage_access_key_id =
            env::var("STORAGE_ACCESS_KEY_ID").expect("STORAGE_ACCESS_KEY_ID must be set");
        let storage_secret_access_key =
            env::var("STORAGE_SECRET_ACCESS_KEY").expect("STORAGE_SECRET_ACCESS_KEY must be set");
        let storage_endpoint = env::var("STORAGE_ENDPOINT").expect("STORAGE_ENDPOINT must be set");
        let storage_bucket = env::var("STORAGE_BUCKET").unwrap_or_else(|_| "files".to_string());
        let cdn_base_url = env::var("CDN_BASE_URL").expect("CDN_BASE_URL must be set");

        Self {
            database_url,
            storage_access_key_id,
            storage_secret_access_key,
            storage_endpoint,
            storage_bucket,
            cdn_base_url,
        }
    }
}
