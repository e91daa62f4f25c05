//! One-shot CSV batch load into the traffic_entries table
//!
//! Runs only when the backing SQLite file did not exist at startup; the
//! existence check (not an upsert) is what keeps re-runs from duplicating
//! rows. CSV contents are trusted as-is, per the ingestion contract.

use std::path::Path;

use sea_orm::{DatabaseConnection, DbErr, EntityTrait, Set};
use serde::Deserialize;
use thiserror::Error;
use tracing::info;

use crate::infrastructure::database::entities::traffic_entry;

const INSERT_BATCH: usize = 1000;

#[derive(Debug, Error)]
pub enum IngestError {
    #[error("CSV read error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// One CSV row, column names as exported by the cleaning pipeline.
#[derive(Debug, Deserialize)]
struct CsvRecord {
    #[serde(rename = "Index")]
    index: i32,
    #[serde(rename = "Datetime")]
    datetime: String,
    #[serde(rename = "Is Peak")]
    is_peak: i32,
    #[serde(rename = "Vehicle Class")]
    vehicle_class: String,
    #[serde(rename = "Detection Group")]
    detection_group: String,
    #[serde(rename = "CRZ Entries")]
    crz_entries: i32,
    #[serde(rename = "Excluded Roadway Entries")]
    excluded_roadway_entries: i32,
}

impl From<CsvRecord> for traffic_entry::ActiveModel {
    fn from(record: CsvRecord) -> Self {
        traffic_entry::ActiveModel {
            id: Set(record.index),
            datetime: Set(record.datetime),
            is_peak: Set(record.is_peak),
            vehicle_class: Set(record.vehicle_class),
            detection_group: Set(record.detection_group),
            crz_entries: Set(record.crz_entries),
            excluded_roadway_entries: Set(record.excluded_roadway_entries),
        }
    }
}

/// Whether the startup ingest should run: true only when the SQLite file is
/// not there yet. Connecting with `mode=rwc` creates the file, so this must
/// be checked before the first connection. An existing file always skips the
/// load; re-runs never duplicate rows.
pub fn needs_initial_load(db_path: &Path) -> bool {
    !db_path.exists()
}

/// Load every row of `path` into the table. Returns the row count.
pub async fn load_csv(db: &DatabaseConnection, path: &Path) -> Result<u64, IngestError> {
    info!("Loading traffic data from {}", path.display());

    let mut reader = csv::Reader::from_path(path)?;
    let mut batch: Vec<traffic_entry::ActiveModel> = Vec::with_capacity(INSERT_BATCH);
    let mut loaded = 0u64;

    for record in reader.deserialize::<CsvRecord>() {
        batch.push(record?.into());
        if batch.len() >= INSERT_BATCH {
            loaded += flush(db, &mut batch).await?;
        }
    }
    loaded += flush(db, &mut batch).await?;

    info!("CSV load complete: {} rows", loaded);
    Ok(loaded)
}

async fn flush(
    db: &DatabaseConnection,
    batch: &mut Vec<traffic_entry::ActiveModel>,
) -> Result<u64, DbErr> {
    if batch.is_empty() {
        return Ok(0);
    }
    let count = batch.len() as u64;
    traffic_entry::Entity::insert_many(batch.drain(..)).exec(db).await?;
    Ok(count)
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use sea_orm::{ConnectOptions, Database, DatabaseConnection, EntityTrait, QueryOrder};
    use sea_orm_migration::MigratorTrait;

    use super::*;
    use crate::infrastructure::database::migrator::Migrator;

    async fn memory_db() -> DatabaseConnection {
        let mut options = ConnectOptions::new("sqlite::memory:".to_owned());
        options.max_connections(1);
        let db = Database::connect(options).await.unwrap();
        Migrator::up(&db, None).await.unwrap();
        db
    }

    const HEADER: &str =
        "Index,Datetime,Is Peak,Vehicle Class,Detection Group,CRZ Entries,Excluded Roadway Entries";

    fn write_csv(lines: &[String]) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "{}", HEADER).unwrap();
        for line in lines {
            writeln!(file, "{}", line).unwrap();
        }
        file.flush().unwrap();
        file
    }

    #[tokio::test]
    async fn loads_rows_with_original_headers() {
        let db = memory_db().await;
        let file = write_csv(&[
            "1,2025-01-05 08:00:00,1,Car,Brooklyn Bridge,10,2".to_string(),
            "2,2025-01-05 08:10:00,0,Multi Unit Trucks,Holland Tunnel,4,0".to_string(),
        ]);

        let loaded = load_csv(&db, file.path()).await.unwrap();
        assert_eq!(loaded, 2);

        let rows = traffic_entry::Entity::find()
            .order_by_asc(traffic_entry::Column::Id)
            .all(&db)
            .await
            .unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].id, 1);
        assert_eq!(rows[0].datetime, "2025-01-05 08:00:00");
        assert_eq!(rows[0].is_peak, 1);
        assert_eq!(rows[0].vehicle_class, "Car");
        assert_eq!(rows[0].detection_group, "Brooklyn Bridge");
        assert_eq!(rows[0].crz_entries, 10);
        assert_eq!(rows[0].excluded_roadway_entries, 2);
        assert_eq!(rows[1].vehicle_class, "Multi Unit Trucks");
    }

    #[tokio::test]
    async fn loads_across_batch_boundary() {
        let db = memory_db().await;
        let lines: Vec<String> = (0..INSERT_BATCH as i32 + 5)
            .map(|i| format!("{},2025-01-05 08:00:00,0,Car,Brooklyn Bridge,1,0", i + 1))
            .collect();
        let file = write_csv(&lines);

        let loaded = load_csv(&db, file.path()).await.unwrap();
        assert_eq!(loaded, INSERT_BATCH as u64 + 5);

        let stored = traffic_entry::Entity::find().all(&db).await.unwrap();
        assert_eq!(stored.len(), INSERT_BATCH + 5);
    }

    #[tokio::test]
    async fn empty_csv_loads_zero_rows() {
        let db = memory_db().await;
        let file = write_csv(&[]);

        let loaded = load_csv(&db, file.path()).await.unwrap();
        assert_eq!(loaded, 0);
        assert!(traffic_entry::Entity::find().all(&db).await.unwrap().is_empty());
    }

    #[test]
    fn initial_load_runs_only_when_db_file_is_absent() {
        let dir = tempfile::tempdir().unwrap();
        let db_path = dir.path().join("traffic.db");

        assert!(needs_initial_load(&db_path));

        std::fs::write(&db_path, b"").unwrap();
        assert!(!needs_initial_load(&db_path));
    }
}
