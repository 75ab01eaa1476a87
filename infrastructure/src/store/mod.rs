//! Assembly snapshot persistence

mod json_store;
mod snapshot;

pub use json_store::JsonSnapshotStore;
pub use snapshot::AssemblySnapshot;
