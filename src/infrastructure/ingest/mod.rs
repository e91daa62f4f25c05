pub mod csv_loader;

pub use csv_loader::{load_csv, needs_initial_load, IngestError};
