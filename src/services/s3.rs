use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::Client;

use crate::config::Config;
use crate::error::AppError;

#[derive(Clone)]
pub struct StorageService {
    client: Client,
    bucket_name: String,
    access_key_id: String,
    cdn_base_url: String,
}

impl StorageService {
    pub fn new(config: &Config) -> Self {
        let credentials = aws_sdk_s3::config::Credentials::new(
            config.storage_access_key_id.clone(),
            config.storage_secret_access_key.clone(),
            None,
            None,
            "manual_config",
        );

        let s3_config = aws_sdk_s3::config::Builder::new()
            .behavior_version(aws_sdk_s3::config::BehaviorVersion::latest())
            .region(aws_sdk_s3::config::Region::new("ru-central1"))
            .credentials_provider(credentials)
            .endpoint_url(&config.storage_endpoint)
            .force_path_style(true)
            .build();

        Self {
            client: Client::from_conf(s3_config),
            bucket_name: config.storage_bucket.clone(),
            access_key_id: config.storage_access_key_id.clone(),
            cdn_base_url: config.cdn_base_url.trim_end_matches('/').to_string(),
        }
    }

    pub async fn put_object(
        &self,
        key: &str,
        data: Vec<u8>,
        content_type: &str,
    ) -> Result<(), AppError> {
        self.client
            .put_object()
            .bucket(&self.bucket_name)
            .key(key)
            .body(ByteStream::from(data))
            .content_type(content_type)
            .send()
            .await
            .map_err(|e| {
                eprintln!("S3 Upload Error: {:?}", e);
                AppError::InternalServerError(format!("Failed to upload object: {}", e))
            })?;

        Ok(())
    }

    pub async fn delete_object(&self, key: &str) -> Result<(), AppError> {
        self.client
            .delete_object()
            .bucket(&self.bucket_name)
            .key(key)
            .send()
            .await
            .map_err(|e| {
                eprintln!("S3 Delete Error: {}", e);
                AppError::InternalServerError("Failed to delete object".to_string())
            })?;

        Ok(())
    }

    /// Public CDN address of an uploaded object. The CDN namespaces blobs by
    /// the storage account's access-key id rather than by bucket name.
    pub fn public_url(&self, key: &str) -> String {
        format!(
            "{}/projects/{}/bucket/{}",
            self.cdn_base_url, self.access_key_id, key
        )
    }
}
