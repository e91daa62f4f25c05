//! Traffic entry entity - one 10-minute observation block

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// One stored traffic count: vehicles of one class detected at one location
/// during one fixed 10-minute block. Rows are loaded once at startup and
/// never updated.
///
/// `datetime` is deliberately a string in `YYYY-MM-DD HH:MM:SS` form. Range
/// queries compare it lexicographically, which matches chronological order
/// for this format; callers rely on those comparison semantics, so the
/// column must not be converted to a native timestamp type.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "traffic_entries")]
pub struct Model {
    /// Source CSV row index.
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: i32,

    /// Block start, `YYYY-MM-DD HH:MM:SS`.
    pub datetime: String,

    /// 1 when the peak tariff applies to this block, else 0.
    pub is_peak: i32,

    /// Vehicle class name (e.g. "Car", "Multi Unit Trucks"). Free-form;
    /// classes outside the pricing table are tolerated.
    pub vehicle_class: String,

    /// Physical detection point / crossing identifier.
    pub detection_group: String,

    /// Tolled vehicle count for this block.
    pub crz_entries: i32,

    /// Untolled count, carried for reference only.
    pub excluded_roadway_entries: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
