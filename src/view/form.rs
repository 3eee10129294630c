//! Contact form view state.
//!
//! Submitting disables the button and shows "Sending..."; the button comes
//! back on a fixed timer rather than when the request finishes.

use crate::dom::NodeId;
use crate::net::form::FormOutcome;

pub const SENDING_LABEL: &str = "Sending...";

#[derive(Debug, Clone)]
pub struct FormSlots {
    pub form: NodeId,
    /// `(name, input element)` in document order.
    pub fields: Vec<(String, NodeId)>,
    pub submit: Option<NodeId>,
    pub status: Option<NodeId>,
}

#[derive(Debug, Clone)]
pub struct ContactForm {
    values: Vec<(String, String)>,
    status: Option<String>,
    button_disabled: bool,
    button_label: String,
    idle_label: String,
}

impl ContactForm {
    pub fn new(field_names: impl IntoIterator<Item = String>, idle_label: impl Into<String>) -> Self {
        let idle_label = idle_label.into();
        Self {
            values: field_names.into_iter().map(|n| (n, String::new())).collect(),
            status: None,
            button_disabled: false,
            button_label: idle_label.clone(),
            idle_label,
        }
    }

    /// Update a field. Unknown names are ignored.
    pub fn set_field(&mut self, name: &str, value: &str) -> bool {
        match self.values.iter_mut().find(|(n, _)| n == name) {
            Some((_, v)) => {
                *v = value.to_string();
                true
            }
            None => false,
        }
    }

    pub fn field(&self, name: &str) -> Option<&str> {
        self.values
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn fields(&self) -> &[(String, String)] {
        &self.values
    }

    /// Lock the button and hand back the payload to post. `None` while a
    /// previous submission still holds the button.
    pub fn begin_submit(&mut self) -> Option<Vec<(String, String)>> {
        if self.button_disabled {
            return None;
        }
        self.button_disabled = true;
        self.button_label = SENDING_LABEL.to_string();
        Some(self.values.clone())
    }

    pub fn reenable(&mut self) {
        self.button_disabled = false;
        self.button_label = self.idle_label.clone();
    }

    /// Show the endpoint's verdict; a success also clears every field.
    pub fn finish(&mut self, outcome: &FormOutcome) {
        self.status = Some(outcome.message.clone());
        if outcome.success {
            for (_, v) in &mut self.values {
                v.clear();
            }
        }
    }

    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    pub fn button_disabled(&self) -> bool {
        self.button_disabled
    }

    pub fn button_label(&self) -> &str {
        &self.button_label
    }
}
