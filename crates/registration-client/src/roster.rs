//! Registered student list.

use crate::client::StudentsApi;
use crate::error::FetchError;
use crate::flag::BusyFlag;
use crate::types::StudentRecord;
use tracing::{debug, instrument};

/// Column headers of the student table.
pub const COLUMNS: [&str; 6] = [
    "Student Name",
    "Parent Name",
    "Email",
    "Phone",
    "Course",
    "Grade",
];

/// What the list should display right now.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListState<'a> {
    Loading,
    Empty,
    Populated(&'a [StudentRecord]),
}

impl<'a> ListState<'a> {
    /// State as seen by a renderer holding the list's loading flag and its
    /// last snapshot. Loading takes precedence over whatever was loaded
    /// before.
    pub fn observe(loading: &BusyFlag, records: &'a [StudentRecord]) -> Self {
        if loading.is_set() {
            ListState::Loading
        } else if records.is_empty() {
            ListState::Empty
        } else {
            ListState::Populated(records)
        }
    }
}

/// Cached snapshot of the backend's registrations.
///
/// Each successful refresh replaces the snapshot wholesale; a failed refresh
/// leaves the previous one in place. Overlapping refreshes are not ordered:
/// whichever response resolves last wins.
#[derive(Debug, Default)]
pub struct StudentList {
    records: Vec<StudentRecord>,
    loading: BusyFlag,
}

impl StudentList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> ListState<'_> {
        ListState::observe(&self.loading, &self.records)
    }

    pub fn records(&self) -> &[StudentRecord] {
        &self.records
    }

    /// Handle for observing the loading flag from elsewhere.
    pub fn loading_flag(&self) -> BusyFlag {
        self.loading.clone()
    }

    /// Fetch a fresh snapshot. Returns the number of records loaded.
    #[instrument(skip(self, api))]
    pub async fn refresh(&mut self, api: &dyn StudentsApi) -> Result<usize, FetchError> {
        let records = {
            let _loading = self.loading.raise();
            api.fetch_students().await?
        };

        debug!("Student list replaced with {} records", records.len());
        self.records = records;
        Ok(self.records.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::MockStudentsApi;
    use std::sync::{Arc, OnceLock};

    fn record(name: &str, email: &str) -> StudentRecord {
        StudentRecord {
            student_name: name.into(),
            email: email.into(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_refresh_replaces_snapshot() {
        let mut api = MockStudentsApi::new();
        let mut calls = 0;
        api.expect_fetch_students().times(2).returning(move || {
            calls += 1;
            if calls == 1 {
                Ok(vec![record("A", "a@x.com"), record("B", "b@x.com")])
            } else {
                Ok(vec![record("C", "c@x.com")])
            }
        });

        let mut list = StudentList::new();
        assert_eq!(list.state(), ListState::Empty);

        assert_eq!(list.refresh(&api).await.unwrap(), 2);
        assert!(matches!(list.state(), ListState::Populated(r) if r.len() == 2));

        assert_eq!(list.refresh(&api).await.unwrap(), 1);
        assert_eq!(list.records(), &[record("C", "c@x.com")]);
    }

    #[tokio::test]
    async fn test_failed_refresh_keeps_previous_snapshot() {
        let mut api = MockStudentsApi::new();
        let mut first = true;
        api.expect_fetch_students().returning(move || {
            if std::mem::take(&mut first) {
                Ok(vec![record("A", "a@x.com")])
            } else {
                Err(FetchError::Api {
                    status: 500,
                    message: "database unavailable".into(),
                })
            }
        });

        let mut list = StudentList::new();
        list.refresh(&api).await.unwrap();

        let err = list.refresh(&api).await.unwrap_err();
        assert_eq!(err.to_string(), "database unavailable");
        assert_eq!(list.records().len(), 1);
        assert!(!list.loading_flag().is_set());
    }

    #[tokio::test]
    async fn test_empty_response_is_empty_state() {
        let mut api = MockStudentsApi::new();
        api.expect_fetch_students().returning(|| Ok(Vec::new()));

        let mut list = StudentList::new();
        list.refresh(&api).await.unwrap();
        assert_eq!(list.state(), ListState::Empty);
    }

    #[tokio::test]
    async fn test_loading_while_fetch_in_flight() {
        let observed = Arc::new(OnceLock::<BusyFlag>::new());
        let seen = observed.clone();
        let previous = vec![record("A", "a@x.com")];

        let mut api = MockStudentsApi::new();
        api.expect_fetch_students().times(1).returning(move || {
            let flag = seen.get().expect("flag registered before refresh");
            assert_eq!(ListState::observe(flag, &previous), ListState::Loading);
            Ok(vec![record("B", "b@x.com")])
        });

        let mut list = StudentList::new();
        observed.set(list.loading_flag()).unwrap();
        assert_eq!(list.state(), ListState::Empty);

        list.refresh(&api).await.unwrap();
        assert!(!list.loading_flag().is_set());
        assert!(matches!(list.state(), ListState::Populated(r) if r[0].student_name == "B"));
    }

    #[test]
    fn test_observe_prefers_loading() {
        let records = [record("A", "a@x.com")];
        let flag = BusyFlag::new();
        assert_eq!(ListState::observe(&flag, &records), ListState::Populated(&records));
        assert_eq!(ListState::observe(&flag, &[]), ListState::Empty);

        let _guard = flag.raise();
        assert_eq!(ListState::observe(&flag, &records), ListState::Loading);
        assert_eq!(ListState::observe(&flag, &[]), ListState::Loading);
    }
}
