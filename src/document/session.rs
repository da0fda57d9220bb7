//! Ordered open-document list with a current selection.
//!
//! Mirrors the tab strip of the editor: open/focus, close with neighbor
//! selection, drag-and-drop reordering, dirty tracking against the saved
//! server copy, and the per-edit graph update pipeline.

use crate::error::EditorError;
use crate::graph::Graph;
use crate::workspace::Workspace;

use super::OpenDocument;

/// What closing a tab left behind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseOutcome {
    /// Another document was selected.
    Switched,
    /// The last document was closed; the caller should leave the editor.
    EditorEmpty,
}

#[derive(Debug, Default)]
pub struct EditorSession {
    open: Vec<OpenDocument>,
    current: Option<usize>,
}

impl EditorSession {
    pub fn new() -> Self {
        EditorSession::default()
    }

    pub fn documents(&self) -> &[OpenDocument] {
        &self.open
    }

    pub fn current(&self) -> Option<&OpenDocument> {
        self.current.and_then(|i| self.open.get(i))
    }

    pub fn current_mut(&mut self) -> Option<&mut OpenDocument> {
        match self.current {
            Some(i) => self.open.get_mut(i),
            None => None,
        }
    }

    pub fn current_index(&self) -> Option<usize> {
        self.current
    }

    fn index_of(&self, file_name: &str, hostname: &str) -> Option<usize> {
        self.open
            .iter()
            .position(|d| d.file_name == file_name && d.hostname == hostname)
    }

    /// Open a file: focus the already-open document for this (name, host)
    /// pair, or create one from `code` and select it.
    pub fn open_file(
        &mut self,
        file_name: &str,
        code: &str,
        hostname: &str,
    ) -> &OpenDocument {
        let index = match self.index_of(file_name, hostname) {
            Some(existing) => existing,
            None => {
                self.open
                    .push(OpenDocument::new(file_name, code, hostname));
                self.open.len() - 1
            }
        };
        self.current = Some(index);
        &self.open[index]
    }

    pub fn select(&mut self, index: usize) -> bool {
        if index < self.open.len() {
            self.current = Some(index);
            true
        } else {
            false
        }
    }

    /// Drag-and-drop tab move: lift the document at `start` and reinsert it
    /// at `end`. The current selection follows its document.
    pub fn reorder(&mut self, start: usize, end: usize) {
        if start >= self.open.len() || end >= self.open.len() {
            return;
        }
        let current_doc = self
            .current
            .and_then(|i| self.open.get(i))
            .map(|d| (d.file_name.clone(), d.hostname.clone()));
        let moved = self.open.remove(start);
        self.open.insert(end, moved);
        if let Some((name, host)) = current_doc {
            self.current = self.index_of(&name, &host);
        }
    }

    /// Close the tab at `index`, returning the removed document.
    ///
    /// The next selection prefers the left neighbor, then the element after
    /// the removed slot, then the slot itself. Closing the last document
    /// empties the session.
    pub fn close(&mut self, index: usize) -> Option<(OpenDocument, CloseOutcome)> {
        if index >= self.open.len() {
            return None;
        }
        let removed = self.open.remove(index);

        if self.open.is_empty() {
            self.current = None;
            return Some((removed, CloseOutcome::EditorEmpty));
        }

        let next = if index >= 1 && index - 1 < self.open.len() {
            index - 1
        } else if index + 1 < self.open.len() {
            index + 1
        } else {
            index.min(self.open.len() - 1)
        };
        self.current = Some(next);
        Some((removed, CloseOutcome::Switched))
    }

    /// Drop documents whose host no longer exists. A vanished current
    /// selection falls back to the first remaining document.
    pub fn prune_missing_hosts(&mut self, workspace: &Workspace) {
        let current_doc = self
            .current
            .and_then(|i| self.open.get(i))
            .map(|d| (d.file_name.clone(), d.hostname.clone()));
        self.open.retain(|d| workspace.host(&d.hostname).is_some());

        self.current = match current_doc {
            Some((name, host)) => self
                .index_of(&name, &host)
                .or(if self.open.is_empty() { None } else { Some(0) }),
            None => None,
        };
    }

    /// Whether the document's buffer differs from the saved server copy.
    /// A file with no saved copy counts as dirty.
    pub fn dirty(&self, index: usize, workspace: &Workspace) -> bool {
        let Some(doc) = self.open.get(index) else {
            return false;
        };
        match workspace.server_code(&doc.hostname, &doc.file_name) {
            Some(saved) => saved != doc.code,
            None => true,
        }
    }

    /// The per-edit pipeline: apply the edited graph to the current
    /// document and, when it actually changed, persist the regenerated
    /// source. Returns whether anything was written.
    ///
    /// An absent current document is a logic fault, not a user condition.
    pub fn on_graph_update(
        &mut self,
        edited: &Graph,
        workspace: &mut Workspace,
    ) -> Result<bool, EditorError> {
        let Some(doc) = self.current_mut() else {
            tracing::error!("graph update with no current document, nothing saved");
            return Err(EditorError::NoCurrentDocument);
        };

        if !doc.apply_graph_update(edited) {
            return Ok(false);
        }

        let (hostname, file_name, code) =
            (doc.hostname.clone(), doc.file_name.clone(), doc.code.clone());
        workspace.save_file(&hostname, &file_name, &code)?;
        Ok(true)
    }
}
