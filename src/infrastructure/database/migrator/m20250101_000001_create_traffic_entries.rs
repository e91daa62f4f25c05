//! Create traffic_entries table

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(TrafficEntries::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(TrafficEntries::Id)
                            .integer()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(TrafficEntries::Datetime)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(TrafficEntries::IsPeak)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(TrafficEntries::VehicleClass)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(TrafficEntries::DetectionGroup)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(TrafficEntries::CrzEntries)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(TrafficEntries::ExcludedRoadwayEntries)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .to_owned(),
            )
            .await?;

        // Range queries always bound on datetime; group/class filters ride
        // on top of the datetime scan.
        manager
            .create_index(
                Index::create()
                    .name("idx_traffic_entries_datetime")
                    .table(TrafficEntries::Table)
                    .col(TrafficEntries::Datetime)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_traffic_entries_detection_group")
                    .table(TrafficEntries::Table)
                    .col(TrafficEntries::DetectionGroup)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(TrafficEntries::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum TrafficEntries {
    Table,
    Id,
    Datetime,
    IsPeak,
    VehicleClass,
    DetectionGroup,
    CrzEntries,
    ExcludedRoadwayEntries,
}
