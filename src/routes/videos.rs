use axum::{extract::State, Json};
use sea_orm::{ColumnTrait, Condition, EntityTrait, QueryFilter, QueryOrder, QuerySelect, Select};
use serde::{Deserialize, Serialize};

use crate::entities::video;
use crate::error::AppError;
use crate::extract::AppQuery;
use crate::state::AppState;

/// Shown when an author never set an avatar.
pub const DEFAULT_AVATAR_URL: &str =
    "https://images.unsplash.com/photo-1472099645785-5658abf4ff4e?w=100&auto=format&fit=crop&q=60&ixlib=rb-4.0.3";
/// Shown when a video was uploaded without a thumbnail.
pub const DEFAULT_THUMBNAIL_URL: &str =
    "https://images.unsplash.com/photo-1611162616475-46b635cb6868?w=800&auto=format&fit=crop&q=60&ixlib=rb-4.0.3";

#[derive(Deserialize, utoipa::IntoParams)]
pub struct ListVideosQuery {
    /// Category filter; "all" disables it.
    pub category: Option<String>,
    /// Feed partition, e.g. "regular" or "shorts".
    #[serde(rename = "type")]
    pub video_type: Option<String>,
    #[param(default = 50)]
    pub limit: Option<u64>,
    #[param(default = 0)]
    pub offset: Option<u64>,
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct AuthorView {
    pub name: String,
    pub avatar: String,
}

#[derive(Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VideoView {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub author: AuthorView,
    pub video_url: String,
    pub thumbnail: String,
    pub video_type: String,
    pub category: String,
    pub duration: i32,
    pub views: i32,
    pub likes: i32,
    pub dislikes: i32,
    pub is_nsfw: bool,
    pub is_nsfl: bool,
    pub show_in_newsfeed: bool,
    pub allow_comments: bool,
    pub video_format: String,
    pub uploaded_at: Option<String>,
}

impl From<video::Model> for VideoView {
    fn from(model: video::Model) -> Self {
        let avatar = match model.author_avatar {
            Some(url) if !url.is_empty() => url,
            _ => DEFAULT_AVATAR_URL.to_string(),
        };
        let thumbnail = match model.thumbnail_url {
            Some(url) if !url.is_empty() => url,
            _ => DEFAULT_THUMBNAIL_URL.to_string(),
        };

        Self {
            id: model.id.to_string(),
            title: model.title,
            description: model.description,
            author: AuthorView {
                name: model.author_name,
                avatar,
            },
            video_url: model.video_url,
            thumbnail,
            video_type: model.video_type,
            category: model.category,
            duration: model.duration,
            views: model.views,
            likes: model.likes,
            dislikes: model.dislikes,
            is_nsfw: model.is_nsfw,
            is_nsfl: model.is_nsfl,
            show_in_newsfeed: model.show_in_newsfeed,
            allow_comments: model.allow_comments,
            video_format: model.video_format,
            uploaded_at: model.uploaded_at.map(|ts| ts.and_utc().to_rfc3339()),
        }
    }
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct ListVideosResponse {
    pub videos: Vec<VideoView>,
    /// Number of videos in this page, not the total match count.
    pub count: usize,
}

/// Newsfeed page query: fixed type + visibility filter, optional category,
/// newest first.
fn feed_query(video_type: &str, category: &str, limit: u64, offset: u64) -> Select<video::Entity> {
    let mut condition = Condition::all()
        .add(video::Column::VideoType.eq(video_type))
        .add(video::Column::ShowInNewsfeed.eq(true));

    if category != "all" {
        condition = condition.add(video::Column::Category.eq(category));
    }

    video::Entity::find()
        .filter(condition)
        .order_by_desc(video::Column::UploadedAt)
        .limit(limit)
        .offset(offset)
}

// GET /videos
#[utoipa::path(
    get,
    path = "/videos",
    params(
        ListVideosQuery
    ),
    responses(
        (status = 200, description = "Page of newsfeed videos", body = ListVideosResponse),
        (status = 405, description = "Method not allowed"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Videos"
)]
pub async fn list_videos(
    State(state): State<AppState>,
    AppQuery(query): AppQuery<ListVideosQuery>,
) -> Result<Json<ListVideosResponse>, AppError> {
    let category = query.category.as_deref().unwrap_or("all");
    let video_type = query.video_type.as_deref().unwrap_or("regular");
    let limit = query.limit.unwrap_or(50);
    let offset = query.offset.unwrap_or(0);

    let rows = feed_query(video_type, category, limit, offset)
        .all(state.db.as_ref())
        .await?;

    let videos: Vec<VideoView> = rows.into_iter().map(VideoView::from).collect();
    let count = videos.len();

    println!(
        "Videos | GET /videos | type={} category={} | res=200 count={}",
        video_type, category, count
    );
    Ok(Json(ListVideosResponse { videos, count }))
}
