use chrono::{DateTime, Utc};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq)]
pub struct Note {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub edited_at: Option<DateTime<Utc>>,
    pub completed: bool,
    pub completed_at: Option<DateTime<Utc>>,
    pub owner_id: Uuid,
}

/// One page of an owner's notes together with the size of the whole
/// filtered set, so callers can compute page counts.
#[derive(Debug, Clone)]
pub struct NotePage {
    pub total_count: i64,
    pub notes: Vec<Note>,
}
