pub mod preference_repo;
pub mod snapshot_repo;

pub use preference_repo::{LastUsed, PreferenceRepository};
pub use snapshot_repo::SnapshotRepository;
