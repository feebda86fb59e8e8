pub mod schema;
pub mod snapshot;
pub mod sqlite_store;

pub use schema::{ConfidenceFilter, Genre, Word};
pub use sqlite_store::RecordStore;
