//! Registration page: the submission flow, the optional student list and the
//! feedback banner they share.

use crate::admin::AdminMode;
use crate::client::StudentsApi;
use crate::error::UnknownField;
use crate::flow::SubmissionFlow;
use crate::roster::StudentList;
use crate::types::{FormField, SubmissionOutcome};
use std::sync::Arc;
use tracing::{info, warn};

pub struct RegistrationPage {
    api: Arc<dyn StudentsApi>,
    admin: AdminMode,
    flow: SubmissionFlow,
    students: Option<StudentList>,
    feedback: SubmissionOutcome,
}

impl RegistrationPage {
    pub fn new(api: Arc<dyn StudentsApi>, admin: AdminMode) -> Self {
        Self {
            flow: SubmissionFlow::new(api.clone()),
            students: admin.is_on().then(StudentList::new),
            api,
            admin,
            feedback: SubmissionOutcome::None,
        }
    }

    /// Initial load. Fetches the student list in admin mode.
    pub async fn mount(&mut self) {
        if self.admin.is_on() {
            info!("Admin mode: loading registered students");
            self.refresh_students().await;
        }
    }

    pub fn admin(&self) -> AdminMode {
        self.admin
    }

    pub fn flow(&self) -> &SubmissionFlow {
        &self.flow
    }

    /// `None` outside admin mode.
    pub fn students(&self) -> Option<&StudentList> {
        self.students.as_ref()
    }

    /// Banner shared by submissions and list fetches.
    pub fn feedback(&self) -> &SubmissionOutcome {
        &self.feedback
    }

    pub fn update_field(&mut self, field: FormField, value: impl Into<String>) {
        self.flow.update_field(field, value);
    }

    pub fn update_named(
        &mut self,
        name: &str,
        value: impl Into<String>,
    ) -> Result<(), UnknownField> {
        self.flow.update_named(name, value)
    }

    /// Submit the form. In admin mode a successful submission refreshes the
    /// student list, and a failed refresh replaces the success banner.
    pub async fn submit(&mut self) -> &SubmissionOutcome {
        self.feedback = self.flow.submit().await;
        self.flow.acknowledge();

        if self.feedback.is_success() && self.admin.is_on() {
            self.refresh_students().await;
        }

        &self.feedback
    }

    /// Re-fetch the student list. No-op outside admin mode.
    pub async fn refresh_students(&mut self) {
        let Some(students) = self.students.as_mut() else {
            return;
        };

        if let Err(e) = students.refresh(&*self.api).await {
            warn!("Could not load students: {}", e);
            self.feedback = SubmissionOutcome::error(format!("Could not load students: {}", e));
        }
    }
}
