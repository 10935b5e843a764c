use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Videos::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Videos::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Videos::Title).string().not_null())
                    .col(ColumnDef::new(Videos::Description).string().null())
                    .col(
                        ColumnDef::new(Videos::AuthorName)
                            .string()
                            .not_null()
                            .default("Anonymous"),
                    )
                    .col(ColumnDef::new(Videos::AuthorAvatar).string().null())
                    .col(ColumnDef::new(Videos::VideoUrl).string().not_null())
                    .col(ColumnDef::new(Videos::ThumbnailUrl).string().null())
                    .col(
                        ColumnDef::new(Videos::VideoType)
                            .string()
                            .not_null()
                            .default("regular"),
                    )
                    .col(
                        ColumnDef::new(Videos::Category)
                            .string()
                            .not_null()
                            .default("entertainment"),
                    )
                    .col(ColumnDef::new(Videos::Duration).integer().not_null().default(0))
                    .col(ColumnDef::new(Videos::Views).integer().not_null().default(0))
                    .col(ColumnDef::new(Videos::Likes).integer().not_null().default(0))
                    .col(ColumnDef::new(Videos::Dislikes).integer().not_null().default(0))
                    .col(ColumnDef::new(Videos::IsNsfw).boolean().not_null().default(false))
                    .col(ColumnDef::new(Videos::IsNsfl).boolean().not_null().default(false))
                    .col(
                        ColumnDef::new(Videos::ShowInNewsfeed)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(Videos::AllowComments)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(Videos::VideoFormat)
                            .string()
                            .not_null()
                            .default("hd"),
                    )
                    .col(
                        ColumnDef::new(Videos::UploadedAt)
                            .timestamp()
                            .null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        // The newsfeed query always filters on type + visibility and sorts by
        // upload time, so index those together.
        manager
            .create_index(
                Index::create()
                    .name("idx_videos_feed")
                    .table(Videos::Table)
                    .col(Videos::VideoType)
                    .col(Videos::ShowInNewsfeed)
                    .col(Videos::UploadedAt)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Videos::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Videos {
    Table,
    Id,
    Title,
    Description,
    AuthorName,
    AuthorAvatar,
    VideoUrl,
    ThumbnailUrl,
    VideoType,
    Category,
    Duration,
    Views,
    Likes,
    Dislikes,
    IsNsfw,
    IsNsfl,
    ShowInNewsfeed,
    AllowComments,
    VideoFormat,
    UploadedAt,
}
