//! Database layer (Firestore).

pub mod firestore;

pub use firestore::FirestoreDb;

/// Collection names as constants.
pub mod collections {
    /// Participant profiles (keyed by user_id)
    pub const PROFILES: &str = "profiles";
    pub const AVAILABILITY_SLOTS: &str = "availability_slots";
    /// Matches written by matching runs
    pub const MATCHES: &str = "matches";
}
