//! Student list/detail/edit screen controller.

use crate::api::StudentApi;
use crate::error::ClientError;
use crate::models::{StudentForm, StudentRecord};

/// Which modal is showing.
#[derive(Debug, Clone, PartialEq)]
pub enum Modal {
    Closed,
    /// Add or edit form, depending on [`StudentScreen::editing_id`].
    Form,
    /// Read-only view of a tapped record.
    Detail(StudentRecord),
}

/// A message the view shows as a dialog.
#[derive(Debug, Clone, PartialEq)]
pub struct Alert {
    pub title: String,
    pub message: Option<String>,
}

impl Alert {
    fn new(title: &str, message: Option<&str>) -> Self {
        Alert {
            title: title.to_string(),
            message: message.map(str::to_string),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// A field was blank; nothing was sent.
    Invalid,
    Created(i32),
    Updated(i32),
    Failed,
}

pub struct StudentScreen<A> {
    api: A,
    students: Vec<StudentRecord>,
    form: StudentForm,
    editing_id: Option<i32>,
    modal: Modal,
    alerts: Vec<Alert>,
}

impl<A: StudentApi> StudentScreen<A> {
    pub fn new(api: A) -> Self {
        StudentScreen {
            api,
            students: Vec::new(),
            form: StudentForm::default(),
            editing_id: None,
            modal: Modal::Closed,
            alerts: Vec::new(),
        }
    }

    pub fn students(&self) -> &[StudentRecord] {
        &self.students
    }

    pub fn form(&self) -> &StudentForm {
        &self.form
    }

    /// Text inputs write straight into the form.
    pub fn form_mut(&mut self) -> &mut StudentForm {
        &mut self.form
    }

    pub fn editing_id(&self) -> Option<i32> {
        self.editing_id
    }

    pub fn modal(&self) -> &Modal {
        &self.modal
    }

    pub fn alerts(&self) -> &[Alert] {
        &self.alerts
    }

    /// Hands pending alerts to the view, which shows them once.
    pub fn take_alerts(&mut self) -> Vec<Alert> {
        std::mem::take(&mut self.alerts)
    }

    pub async fn mount(&mut self) {
        let _ = self.refresh().await;
    }

    /// Replaces the list wholesale. On failure the previous list stays and an alert is raised.
    pub async fn refresh(&mut self) -> Result<(), ClientError> {
        match self.api.list().await {
            Ok(rows) => {
                self.students = rows;
                Ok(())
            }
            Err(e) => {
                tracing::warn!(error = %e, "fetching students failed");
                self.alerts.push(Alert::new(
                    "Error",
                    Some("Failed to fetch students. Please try again."),
                ));
                Err(e)
            }
        }
    }

    pub fn open_add_form(&mut self) {
        self.reset_form();
        self.modal = Modal::Form;
    }

    /// Pre-fills the form from `student` and opens it in edit mode.
    pub fn begin_edit(&mut self, student: &StudentRecord) {
        self.form = StudentForm::from(student);
        self.editing_id = Some(student.id);
        self.modal = Modal::Form;
    }

    pub fn cancel_form(&mut self) {
        self.modal = Modal::Closed;
        self.reset_form();
    }

    /// Creates or updates depending on whether an edit is in progress.
    pub async fn submit(&mut self) -> SubmitOutcome {
        if !self.form.is_complete() {
            self.alerts
                .push(Alert::new("Validation Error", Some("All fields are required.")));
            return SubmitOutcome::Invalid;
        }

        let editing = self.editing_id;
        let result = match editing {
            Some(id) => self.api.update(id, &self.form).await.map(|_| SubmitOutcome::Updated(id)),
            None => self.api.create(&self.form).await.map(SubmitOutcome::Created),
        };

        match result {
            Ok(outcome) => {
                self.modal = Modal::Closed;
                self.reset_form();
                let _ = self.refresh().await;
                let title = if editing.is_some() { "Student Updated!" } else { "Student Added!" };
                self.alerts.push(Alert::new(title, None));
                outcome
            }
            Err(e) => {
                tracing::warn!(error = %e, "saving student failed");
                self.alerts.push(Alert::new("Error", Some("Failed to save student.")));
                SubmitOutcome::Failed
            }
        }
    }

    /// Waits for the delete; the list is refreshed only when the server confirmed it.
    pub async fn delete(&mut self, id: i32) -> Result<(), ClientError> {
        if let Err(e) = self.api.delete(id).await {
            tracing::warn!(error = %e, student_id = id, "deleting student failed");
            self.alerts
                .push(Alert::new("Error", Some("Failed to delete student.")));
            return Err(e);
        }
        let _ = self.refresh().await;
        self.alerts.push(Alert::new("Student Deleted!", None));
        Ok(())
    }

    pub fn select(&mut self, student: &StudentRecord) {
        self.modal = Modal::Detail(student.clone());
    }

    pub fn close_detail(&mut self) {
        if matches!(self.modal, Modal::Detail(_)) {
            self.modal = Modal::Closed;
        }
    }

    fn reset_form(&mut self) {
        self.form = StudentForm::default();
        self.editing_id = None;
    }
}
