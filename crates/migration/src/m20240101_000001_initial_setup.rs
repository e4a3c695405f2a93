use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Tenants::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Tenants::Id).string().not_null().primary_key())
                    .col(ColumnDef::new(Tenants::Name).string().not_null())
                    .col(
                        ColumnDef::new(Tenants::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Cameras::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Cameras::Id).string().not_null().primary_key())
                    .col(ColumnDef::new(Cameras::TenantId).string().not_null())
                    .col(ColumnDef::new(Cameras::Key).string().not_null())
                    .col(ColumnDef::new(Cameras::Label).string().not_null())
                    .col(
                        ColumnDef::new(Cameras::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_camera_tenant")
                            .from(Cameras::Table, Cameras::TenantId)
                            .to(Tenants::Table, Tenants::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_cameras_tenant_key")
                    .table(Cameras::Table)
                    .col(Cameras::TenantId)
                    .col(Cameras::Key)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Events::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Events::Id).string().not_null().primary_key())
                    .col(ColumnDef::new(Events::TenantId).string().not_null())
                    .col(ColumnDef::new(Events::CameraId).string().not_null())
                    .col(ColumnDef::new(Events::FrigateEventId).string().not_null())
                    .col(ColumnDef::new(Events::EventType).string().not_null())
                    .col(ColumnDef::new(Events::Label).string().not_null())
                    .col(
                        ColumnDef::new(Events::HasSnapshot)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Events::HasClip)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(Events::StartTime).double())
                    .col(ColumnDef::new(Events::EndTime).double())
                    .col(ColumnDef::new(Events::RawPayload).json_binary().not_null())
                    .col(
                        ColumnDef::new(Events::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_event_tenant")
                            .from(Events::Table, Events::TenantId)
                            .to(Tenants::Table, Tenants::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_event_camera")
                            .from(Events::Table, Events::CameraId)
                            .to(Cameras::Table, Cameras::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_events_tenant_frigate_event")
                    .table(Events::Table)
                    .col(Events::TenantId)
                    .col(Events::FrigateEventId)
                    .unique()
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_events_camera")
                    .table(Events::Table)
                    .col(Events::CameraId)
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_events_created_at")
                    .table(Events::Table)
                    .col(Events::CreatedAt)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Reviews::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Reviews::Id).string().not_null().primary_key())
                    .col(ColumnDef::new(Reviews::TenantId).string().not_null())
                    .col(ColumnDef::new(Reviews::CameraId).string().not_null())
                    .col(ColumnDef::new(Reviews::ReviewId).string().not_null())
                    .col(ColumnDef::new(Reviews::CameraName).string().not_null())
                    .col(ColumnDef::new(Reviews::Severity).string().not_null())
                    .col(
                        ColumnDef::new(Reviews::Retracted)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(Reviews::Timestamp).timestamp_with_time_zone())
                    .col(ColumnDef::new(Reviews::RawPayload).json_binary().not_null())
                    .col(
                        ColumnDef::new(Reviews::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_review_tenant")
                            .from(Reviews::Table, Reviews::TenantId)
                            .to(Tenants::Table, Tenants::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_review_camera")
                            .from(Reviews::Table, Reviews::CameraId)
                            .to(Cameras::Table, Cameras::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_reviews_tenant_review")
                    .table(Reviews::Table)
                    .col(Reviews::TenantId)
                    .col(Reviews::ReviewId)
                    .unique()
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_reviews_camera")
                    .table(Reviews::Table)
                    .col(Reviews::CameraId)
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_reviews_created_at")
                    .table(Reviews::Table)
                    .col(Reviews::CreatedAt)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(AvailabilityLogs::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(AvailabilityLogs::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(AvailabilityLogs::TenantId).string().not_null())
                    .col(
                        ColumnDef::new(AvailabilityLogs::Available)
                            .boolean()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(AvailabilityLogs::Timestamp)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(AvailabilityLogs::RawPayload)
                            .json_binary()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(AvailabilityLogs::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_availability_tenant")
                            .from(AvailabilityLogs::Table, AvailabilityLogs::TenantId)
                            .to(Tenants::Table, Tenants::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_availability_tenant")
                    .table(AvailabilityLogs::Table)
                    .col(AvailabilityLogs::TenantId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(AvailabilityLogs::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Reviews::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Events::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Cameras::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Tenants::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum Tenants {
    Table,
    Id,
    Name,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Cameras {
    Table,
    Id,
    TenantId,
    Key,
    Label,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Events {
    Table,
    Id,
    TenantId,
    CameraId,
    FrigateEventId,
    EventType,
    Label,
    HasSnapshot,
    HasClip,
    StartTime,
    EndTime,
    RawPayload,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Reviews {
    Table,
    Id,
    TenantId,
    CameraId,
    ReviewId,
    CameraName,
    Severity,
    Retracted,
    Timestamp,
    RawPayload,
    CreatedAt,
}

#[derive(DeriveIden)]
enum AvailabilityLogs {
    Table,
    Id,
    TenantId,
    Available,
    Timestamp,
    RawPayload,
    CreatedAt,
}
