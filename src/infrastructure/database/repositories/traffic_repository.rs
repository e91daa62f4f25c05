//! SeaORM repository for traffic entries
//!
//! All aggregation endpoints query with SUM over grouped rows rather than
//! assuming (datetime, detection_group, vehicle_class, is_peak) tuples are
//! unique; duplicate source rows simply sum together.

use sea_orm::{
    ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, QueryOrder, QuerySelect,
};

use crate::domain::{ClassGroup, SeriesRow};
use crate::infrastructure::database::entities::traffic_entry;

/// Half-open datetime range `[start, end)` plus optional equality filters.
///
/// The bounds are compared as strings by the store. Lexicographic order
/// matches chronological order for the `YYYY-MM-DD HH:MM:SS` format, and
/// callers depend on exactly those comparison semantics, so the bounds are
/// passed through unparsed.
#[derive(Debug, Clone, Default)]
pub struct RangeFilter {
    pub start: String,
    pub end: String,
    pub detection_group: Option<String>,
    pub vehicle_class: Option<String>,
}

#[derive(Clone)]
pub struct TrafficRepository {
    db: DatabaseConnection,
}

impl TrafficRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// First `limit` rows in store order, for the raw listing endpoint.
    pub async fn first_rows(&self, limit: u64) -> Result<Vec<traffic_entry::Model>, DbErr> {
        traffic_entry::Entity::find().limit(limit).all(&self.db).await
    }

    /// Entry sums grouped by (vehicle_class, is_peak) within a range.
    pub async fn class_groups(&self, filter: &RangeFilter) -> Result<Vec<ClassGroup>, DbErr> {
        let mut query = traffic_entry::Entity::find()
            .select_only()
            .column(traffic_entry::Column::VehicleClass)
            .column(traffic_entry::Column::IsPeak)
            .column_as(traffic_entry::Column::CrzEntries.sum(), "entries")
            .filter(traffic_entry::Column::Datetime.gte(filter.start.as_str()))
            .filter(traffic_entry::Column::Datetime.lt(filter.end.as_str()));

        if let Some(group) = &filter.detection_group {
            query = query.filter(traffic_entry::Column::DetectionGroup.eq(group.as_str()));
        }
        if let Some(class) = &filter.vehicle_class {
            query = query.filter(traffic_entry::Column::VehicleClass.eq(class.as_str()));
        }

        let rows: Vec<(String, i32, Option<i64>)> = query
            .group_by(traffic_entry::Column::VehicleClass)
            .group_by(traffic_entry::Column::IsPeak)
            .into_tuple()
            .all(&self.db)
            .await?;

        Ok(rows
            .into_iter()
            .map(|(vehicle_class, is_peak, entries)| ClassGroup {
                vehicle_class,
                is_peak: is_peak != 0,
                entries: entries.unwrap_or(0),
            })
            .collect())
    }

    /// Entry sums grouped by (datetime, detection_group, vehicle_class,
    /// is_peak) within `[start, end)`, ordered by block timestamp. Feeds the
    /// frame-distribution engine.
    pub async fn series_rows(&self, start: &str, end: &str) -> Result<Vec<SeriesRow>, DbErr> {
        let rows: Vec<(String, String, String, i32, Option<i64>)> =
            traffic_entry::Entity::find()
                .select_only()
                .column(traffic_entry::Column::Datetime)
                .column(traffic_entry::Column::DetectionGroup)
                .column(traffic_entry::Column::VehicleClass)
                .column(traffic_entry::Column::IsPeak)
                .column_as(traffic_entry::Column::CrzEntries.sum(), "entries")
                .filter(traffic_entry::Column::Datetime.gte(start))
                .filter(traffic_entry::Column::Datetime.lt(end))
                .group_by(traffic_entry::Column::Datetime)
                .group_by(traffic_entry::Column::DetectionGroup)
                .group_by(traffic_entry::Column::VehicleClass)
                .group_by(traffic_entry::Column::IsPeak)
                .order_by_asc(traffic_entry::Column::Datetime)
                .into_tuple()
                .all(&self.db)
                .await?;

        Ok(rows
            .into_iter()
            .map(
                |(datetime, detection_group, vehicle_class, is_peak, entries)| SeriesRow {
                    datetime,
                    detection_group,
                    vehicle_class,
                    is_peak: is_peak != 0,
                    entries: entries.unwrap_or(0),
                },
            )
            .collect())
    }
}
