use catalog::LoadWarning;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::storage::Session;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateSessionResponse {
    pub session_id: String,
    pub entry_count: usize,
    pub rejected_rows: usize,
    pub warnings: Vec<LoadWarning>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionMeta {
    pub session_id: String,
    pub filename: String,
    pub created_at: DateTime<Utc>,
    pub entry_count: usize,
    pub unknown_year_count: usize,
    pub warnings: Vec<LoadWarning>,
}

impl SessionMeta {
    pub fn from_session(session: &Session) -> Self {
        Self {
            session_id: session.id.clone(),
            filename: session.filename.clone(),
            created_at: session.created_at,
            entry_count: session.dataset.len(),
            unknown_year_count: session.dataset.iter().filter(|e| !e.year.is_known()).count(),
            warnings: session.warnings.clone(),
        }
    }
}
