//! Traffic data endpoints: raw listing, range aggregation, playback series

use axum::extract::{Query, State};
use axum::Json;
use chrono::NaiveDateTime;
use serde::Deserialize;

use crate::api::dto::TrafficRow;
use crate::api::router::AppState;
use crate::domain::{build_frames, collect_blocks, summarize, Frame, RangeSummary, TIMESTAMP_FORMAT};
use crate::infrastructure::database::repositories::RangeFilter;
use crate::shared::types::errors::ApiError;

/// Fixed row limit for the raw listing endpoint.
const DATA_PREVIEW_LIMIT: u64 = 12;

// ── Query params ───────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct FilterParams {
    pub datetime_start: Option<String>,
    pub datetime_end: Option<String>,
    pub detection_group: Option<String>,
    pub vehicle_class: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SeriesParams {
    /// Interval preset name; defaults to `1hr`.
    pub interval: Option<String>,
    pub datetime_start: Option<String>,
}

// ── 1. Raw listing ─────────────────────────────────────────────

/// First 12 rows in store order.
#[utoipa::path(
    get,
    path = "/data",
    tag = "Traffic",
    responses(
        (status = 200, description = "First 12 traffic rows", body = Vec<TrafficRow>)
    )
)]
pub async fn get_data(State(state): State<AppState>) -> Result<Json<Vec<TrafficRow>>, ApiError> {
    let rows = state.repo.first_rows(DATA_PREVIEW_LIMIT).await?;
    Ok(Json(rows.into_iter().map(TrafficRow::from).collect()))
}

// ── 2. Range aggregation ───────────────────────────────────────

/// Vehicle counts and toll revenue over `[datetime_start, datetime_end)`.
///
/// Bound strings are handed to the store as opaque lexicographic bounds; no
/// datetime parsing happens here. That laxness is intentional — stored
/// timestamps are strings and callers rely on string comparison matching the
/// `YYYY-MM-DD HH:MM:SS` layout.
#[utoipa::path(
    get,
    path = "/filter",
    tag = "Traffic",
    params(
        ("datetime_start" = String, Query, description = "Range start (inclusive), YYYY-MM-DD HH:MM:SS"),
        ("datetime_end" = String, Query, description = "Range end (exclusive), YYYY-MM-DD HH:MM:SS"),
        ("detection_group" = Option<String>, Query, description = "Exact detection group filter"),
        ("vehicle_class" = Option<String>, Query, description = "Exact vehicle class filter")
    ),
    responses(
        (status = 200, description = "Aggregated counts and revenue", body = RangeSummary),
        (status = 400, description = "Missing required parameter")
    )
)]
pub async fn get_filter(
    State(state): State<AppState>,
    Query(params): Query<FilterParams>,
) -> Result<Json<RangeSummary>, ApiError> {
    let (start, end) = match (params.datetime_start, params.datetime_end) {
        (Some(start), Some(end)) => (start, end),
        _ => {
            return Err(ApiError::InvalidRequest(
                "datetime_start and datetime_end are required".to_string(),
            ))
        }
    };

    let filter = RangeFilter {
        start,
        end,
        detection_group: params.detection_group,
        vehicle_class: params.vehicle_class,
    };

    let groups = state.repo.class_groups(&filter).await?;
    Ok(Json(summarize(&groups, &state.pricing)))
}

// ── 3. Playback series ─────────────────────────────────────────

/// Synthetic animation frames distributing block counts over the interval.
///
/// Always returns exactly the preset's frame count; frames past the data
/// present in storage carry an empty `locations` map.
#[utoipa::path(
    get,
    path = "/realtime_series",
    tag = "Traffic",
    params(
        ("interval" = Option<String>, Query, description = "Preset name (10min..3month); default 1hr"),
        ("datetime_start" = String, Query, description = "Span start, YYYY-MM-DD HH:MM:SS")
    ),
    responses(
        (status = 200, description = "Frame sequence", body = Vec<Frame>),
        (status = 400, description = "Missing/unparseable datetime_start or unknown interval")
    )
)]
pub async fn get_realtime_series(
    State(state): State<AppState>,
    Query(params): Query<SeriesParams>,
) -> Result<Json<Vec<Frame>>, ApiError> {
    let interval_name = params
        .interval
        .unwrap_or_else(|| crate::domain::DEFAULT_INTERVAL.to_string());
    let spec = state.intervals.get(&interval_name).ok_or_else(|| {
        ApiError::InvalidRequest(format!(
            "unknown interval '{}'; valid intervals: {}",
            interval_name,
            state.intervals.names().join(", ")
        ))
    })?;

    let start_str = params.datetime_start.ok_or_else(|| {
        ApiError::InvalidRequest("datetime_start is required".to_string())
    })?;
    let start = NaiveDateTime::parse_from_str(&start_str, TIMESTAMP_FORMAT).map_err(|_| {
        ApiError::InvalidRequest(
            "datetime_start must be in format YYYY-MM-DD HH:MM:SS".to_string(),
        )
    })?;

    let end = (start + spec.duration()).format(TIMESTAMP_FORMAT).to_string();
    let rows = state.repo.series_rows(&start_str, &end).await?;
    let blocks = collect_blocks(&rows, &state.pricing);
    Ok(Json(build_frames(start, spec, &blocks)))
}
