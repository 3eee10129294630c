//! Project detail dialog.

use std::collections::HashMap;

use crate::content::ProjectDetail;
use crate::dom::NodeId;
use crate::error::{FolioError, Result};

/// Elements the dialog writes into.
#[derive(Debug, Clone, Copy)]
pub struct ModalSlots {
    pub dialog: NodeId,
    pub title: Option<NodeId>,
    pub description: Option<NodeId>,
    pub tech: Option<NodeId>,
    pub close: Option<NodeId>,
}

#[derive(Debug, Clone)]
pub struct ModalController {
    catalog: HashMap<&'static str, ProjectDetail>,
    selection: Option<&'static str>,
}

impl ModalController {
    pub fn new(projects: &[ProjectDetail]) -> Self {
        Self {
            catalog: projects.iter().map(|p| (p.id, p.clone())).collect(),
            selection: None,
        }
    }

    /// Show the project with `id`. Unknown ids leave the dialog untouched.
    pub fn open(&mut self, id: &str) -> Result<&ProjectDetail> {
        let detail = self
            .catalog
            .get(id)
            .ok_or_else(|| FolioError::UnknownProject(id.to_string()))?;
        self.selection = Some(detail.id);
        Ok(detail)
    }

    pub fn close(&mut self) {
        self.selection = None;
    }

    pub fn is_open(&self) -> bool {
        self.selection.is_some()
    }

    pub fn selection(&self) -> Option<&ProjectDetail> {
        self.selection.and_then(|id| self.catalog.get(id))
    }
}
