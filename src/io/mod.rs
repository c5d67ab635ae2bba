//! I/O module
//!
//! The persistence and export boundary around the engine:
//!
//! - `snapshot` - JSON snapshot of the full entity set (defensive load,
//!   pretty save)
//! - `persist` - debounced background saver with a single in-flight slot
//! - `csv_export` - account summary CSV writer

pub mod csv_export;
pub mod persist;
pub mod snapshot;

pub use csv_export::write_accounts_csv;
pub use persist::{DebouncedSaver, FileSnapshotPort, SnapshotPort};
pub use snapshot::{load_or_default, Snapshot};
