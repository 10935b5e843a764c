use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Deserialize, Serialize)]
#[sea_orm(table_name = "videos")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub author_name: String,
    pub author_avatar: Option<String>,
    pub video_url: String,
    pub thumbnail_url: Option<String>,
    pub video_type: String, // e.g. "regular", "shorts"
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
    pub uploaded_at: Option<DateTime>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
