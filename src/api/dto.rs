//! API response DTOs

use serde::Serialize;
use utoipa::ToSchema;

use crate::infrastructure::database::entities::traffic_entry;

/// One raw traffic row as served by `GET /data`.
#[derive(Debug, Serialize, ToSchema)]
pub struct TrafficRow {
    pub id: i32,
    /// Block start, `YYYY-MM-DD HH:MM:SS`.
    pub datetime: String,
    /// 0/1 peak-tariff flag, as stored.
    pub is_peak: i32,
    pub vehicle_class: String,
    pub detection_group: String,
    pub crz_entries: i32,
    pub excluded_roadway_entries: i32,
}

impl From<traffic_entry::Model> for TrafficRow {
    fn from(m: traffic_entry::Model) -> Self {
        Self {
            id: m.id,
            datetime: m.datetime,
            is_peak: m.is_peak,
            vehicle_class: m.vehicle_class,
            detection_group: m.detection_group,
            crz_entries: m.crz_entries,
            excluded_roadway_entries: m.excluded_roadway_entries,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn traffic_row_serializes_stored_shape() {
        let row = TrafficRow::from(traffic_entry::Model {
            id: 7,
            datetime: "2025-01-05 08:10:00".to_string(),
            is_peak: 1,
            vehicle_class: "Taxi".to_string(),
            detection_group: "Holland Tunnel".to_string(),
            crz_entries: 42,
            excluded_roadway_entries: 3,
        });
        let json = serde_json::to_string(&row).unwrap();
        assert!(json.contains("\"datetime\":\"2025-01-05 08:10:00\""));
        assert!(json.contains("\"is_peak\":1"));
        assert!(json.contains("\"excluded_roadway_entries\":3"));
    }
}
