use catalog::{Dataset, LoadReport, LoadWarning};
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use uuid::Uuid;

/// One analysis session: an uploaded file's dataset and its load warnings.
/// Dropped together when the session is deleted.
#[derive(Debug)]
pub struct Session {
    pub id: String,
    pub filename: String,
    pub created_at: DateTime<Utc>,
    pub dataset: Dataset,
    pub warnings: Vec<LoadWarning>,
}

/// In-memory session registry. Nothing is written to disk.
#[derive(Debug, Default)]
pub struct SessionStore {
    sessions: RwLock<HashMap<String, Arc<Session>>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn create_session(&self, filename: &str, report: LoadReport) -> Arc<Session> {
        let session = Arc::new(Session {
            id: Uuid::new_v4().to_string(),
            filename: filename.to_string(),
            created_at: Utc::now(),
            dataset: report.dataset,
            warnings: report.warnings,
        });

        self.sessions
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .insert(session.id.clone(), Arc::clone(&session));

        session
    }

    pub fn get_session(&self, session_id: &str) -> Option<Arc<Session>> {
        self.sessions
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .get(session_id)
            .cloned()
    }

    /// Returns false when there was no such session
    pub fn delete_session(&self, session_id: &str) -> bool {
        self.sessions
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .remove(session_id)
            .is_some()
    }

    pub fn len(&self) -> usize {
        self.sessions
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use catalog::{Entry, Year};

    fn report() -> LoadReport {
        LoadReport {
            dataset: vec![Entry {
                name: "Portal".into(),
                year: Year::Known(2008),
                price: 19.99,
            }]
            .into_iter()
            .collect(),
            warnings: Vec::new(),
        }
    }

    #[test]
    fn test_session_lifecycle() {
        let store = SessionStore::new();
        let session = store.create_session("games.csv", report());

        assert_eq!(store.len(), 1);
        let fetched = store.get_session(&session.id).unwrap();
        assert_eq!(fetched.filename, "games.csv");
        assert_eq!(fetched.dataset.len(), 1);

        assert!(store.delete_session(&session.id));
        assert!(store.get_session(&session.id).is_none());
        assert!(!store.delete_session(&session.id));
        assert_eq!(store.len(), 0);
    }

    #[test]
    fn test_sessions_are_independent() {
        let store = SessionStore::new();
        let a = store.create_session("a.csv", report());
        let b = store.create_session("b.csv", LoadReport::default());

        assert_ne!(a.id, b.id);
        assert_eq!(store.get_session(&b.id).unwrap().dataset.len(), 0);
        assert_eq!(store.get_session(&a.id).unwrap().dataset.len(), 1);
    }
}
