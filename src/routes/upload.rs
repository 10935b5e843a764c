use axum::{extract::State, Json};
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use sea_orm::{ActiveModelTrait, NotSet, Set};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::entities::video;
use crate::error::AppError;
use crate::extract::AppJson;
use crate::state::AppState;

fn default_author_name() -> String {
    "Anonymous".to_string()
}

fn default_video_type() -> String {
    "regular".to_string()
}

fn default_category() -> String {
    "entertainment".to_string()
}

fn default_video_format() -> String {
    "hd".to_string()
}

fn default_true() -> bool {
    true
}

/// Upload payload. Binary fields arrive as data URLs or bare base64; every
/// metadata field is optional with the documented default.
#[derive(Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UploadVideoRequest {
    #[serde(default)]
    pub captcha_verified: bool,
    pub video_file: Option<String>,
    pub thumbnail_file: Option<String>,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default = "default_author_name")]
    pub author_name: String,
    #[serde(default)]
    pub author_avatar: String,
    #[serde(default = "default_video_type")]
    pub video_type: String,
    #[serde(default = "default_category")]
    pub category: String,
    #[serde(default)]
    pub is_nsfw: bool,
    #[serde(default)]
    pub is_nsfl: bool,
    #[serde(default = "default_true")]
    pub show_in_newsfeed: bool,
    #[serde(default = "default_true")]
    pub allow_comments: bool,
    #[serde(default = "default_video_format")]
    pub video_format: String,
    #[serde(default)]
    pub duration: i32,
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UploadVideoResponse {
    pub success: bool,
    pub video_id: Uuid,
    pub video_url: String,
    pub thumbnail_url: Option<String>,
}

/// Decodes a base64 payload, tolerating a `data:...;base64,` prefix.
fn decode_media_payload(raw: &str) -> Result<Vec<u8>, AppError> {
    let encoded = match raw.split_once(',') {
        Some((_, rest)) => rest,
        None => raw,
    };

    BASE64
        .decode(encoded)
        .map_err(|e| AppError::InternalServerError(format!("Invalid base64 payload: {}", e)))
}

// POST /videos/upload
#[utoipa::path(
    post,
    path = "/videos/upload",
    request_body = UploadVideoRequest,
    responses(
        (status = 200, description = "Video uploaded", body = UploadVideoResponse),
        (status = 400, description = "Captcha not passed, or video/title missing"),
        (status = 405, description = "Method not allowed"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Videos"
)]
pub async fn upload_video(
    State(state): State<AppState>,
    AppJson(req): AppJson<UploadVideoRequest>,
) -> Result<Json<UploadVideoResponse>, AppError> {
    if !req.captcha_verified {
        return Err(AppError::BadRequest("Captcha not passed".to_string()));
    }

    let video_file = match req.video_file.as_deref().filter(|s| !s.is_empty()) {
        Some(payload) if !req.title.trim().is_empty() => payload,
        _ => {
            return Err(AppError::BadRequest(
                "Video and title are required".to_string(),
            ))
        }
    };

    let video_id = Uuid::new_v4();

    // Decode everything before the first blob write so a bad payload cannot
    // leave a half-written upload behind.
    let video_data = decode_media_payload(video_file)?;
    let thumbnail_data = match req.thumbnail_file.as_deref().filter(|s| !s.is_empty()) {
        Some(thumbnail_file) => Some(decode_media_payload(thumbnail_file)?),
        None => None,
    };

    let video_key = format!("videos/{}.mp4", video_id);
    state
        .storage
        .put_object(&video_key, video_data, "video/mp4")
        .await?;
    let video_url = state.storage.public_url(&video_key);

    let mut thumbnail_key = None;
    let mut thumbnail_url = None;
    if let Some(data) = thumbnail_data {
        let key = format!("thumbnails/{}.jpg", video_id);
        if let Err(e) = state.storage.put_object(&key, data, "image/jpeg").await {
            // The video blob is already durable; sweep it before failing.
            let _ = state.storage.delete_object(&video_key).await;
            return Err(e);
        }
        thumbnail_url = Some(state.storage.public_url(&key));
        thumbnail_key = Some(key);
    }

    let row = video::ActiveModel {
        id: Set(video_id),
        title: Set(req.title),
        description: Set(Some(req.description)),
        author_name: Set(req.author_name),
        author_avatar: Set(Some(req.author_avatar).filter(|s| !s.is_empty())),
        video_url: Set(video_url.clone()),
        thumbnail_url: Set(thumbnail_url.clone()),
        video_type: Set(req.video_type),
        category: Set(req.category),
        duration: Set(req.duration),
        is_nsfw: Set(req.is_nsfw),
        is_nsfl: Set(req.is_nsfl),
        show_in_newsfeed: Set(req.show_in_newsfeed),
        allow_comments: Set(req.allow_comments),
        video_format: Set(req.video_format),
        // Counters and upload time come from column defaults.
        views: NotSet,
        likes: NotSet,
        dislikes: NotSet,
        uploaded_at: NotSet,
    };

    if let Err(e) = row.insert(state.db.as_ref()).await {
        // The blobs are already durable; without this sweep a failed insert
        // would orphan them.
        let _ = state.storage.delete_object(&video_key).await;
        if let Some(key) = &thumbnail_key {
            let _ = state.storage.delete_object(key).await;
        }
        return Err(AppError::DatabaseError(e));
    }

    println!(
        "Upload | POST /videos/upload | video={} | res=200",
        video_id
    );
    Ok(Json(UploadVideoResponse {
        success: true,
        video_id,
        video_url,
        thumbnail_url,
    }))
}
