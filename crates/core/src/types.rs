use uuid::Uuid;

/// Asset primary keys are UUIDv7: time-ordered, so their canonical text form
/// sorts the same way as their bytes.
pub type AssetId = Uuid;

pub type FavoriteId = Uuid;

pub type UserId = Uuid;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Generate a fresh time-ordered identifier.
///
/// `Uuid::now_v7` keeps a per-process counter, so ids generated within the
/// same millisecond are still strictly increasing.
pub fn new_id() -> Uuid {
    Uuid::now_v7()
}

/// Current UTC time.
pub fn now() -> Timestamp {
    chrono::Utc::now()
}
