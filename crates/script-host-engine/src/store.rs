use indexmap::IndexMap;
use script_host_config::{DuplicatePolicy, HostConfig};

use crate::editing::{Document, LineCol, Span, VersionDelta};
use crate::error::{HostError, HostResult};

/// Every script the host tracks, keyed by name.
///
/// Owned by the caller and passed by reference; there is no global registry.
/// Names enumerate in registration order.
#[derive(Debug, Clone, Default)]
pub struct ScriptStore {
    scripts: IndexMap<String, Document>,
    history_limit: Option<usize>,
    on_duplicate: DuplicatePolicy,
}

impl ScriptStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(config: &HostConfig) -> Self {
        Self {
            scripts: IndexMap::new(),
            history_limit: config.history_limit,
            on_duplicate: config.on_duplicate,
        }
    }

    pub fn len(&self) -> usize {
        self.scripts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scripts.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.scripts.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.scripts.keys().map(String::as_str)
    }

    pub fn documents(&self) -> impl Iterator<Item = &Document> {
        self.scripts.values()
    }

    pub fn document(&self, name: &str) -> HostResult<&Document> {
        self.scripts
            .get(name)
            .ok_or_else(|| HostError::NotFound(name.to_string()))
    }

    fn document_mut(&mut self, name: &str) -> HostResult<&mut Document> {
        self.scripts
            .get_mut(name)
            .ok_or_else(|| HostError::NotFound(name.to_string()))
    }

    /// Start tracking `name` at version 1.
    pub fn register(&mut self, name: impl Into<String>, content: &str) -> HostResult<()> {
        let name = name.into();
        if self.scripts.contains_key(&name) {
            match self.on_duplicate {
                DuplicatePolicy::Reject => return Err(HostError::DuplicateName(name)),
                DuplicatePolicy::Overwrite => {
                    tracing::debug!(script = %name, "overwriting registered script");
                }
            }
        }
        let doc = Document::new(name.clone(), content, self.history_limit);
        tracing::debug!(script = %name, len = content.len(), "registered script");
        // insert keeps the original position when the key already exists
        self.scripts.insert(name, doc);
        Ok(())
    }

    /// Replace the whole text of `name`, returning the new version.
    pub fn replace_content(&mut self, name: &str, content: &str) -> HostResult<u64> {
        let doc = self.document_mut(name)?;
        doc.replace(content);
        Ok(doc.version())
    }

    /// Replace `start..end` of `name` with `replacement`, returning the new version.
    pub fn apply_edit(
        &mut self,
        name: &str,
        start: usize,
        end: usize,
        replacement: &str,
    ) -> HostResult<u64> {
        let doc = self.document_mut(name)?;
        doc.edit(Span::new(start, end), replacement)?;
        Ok(doc.version())
    }

    pub fn delta_since(&self, name: &str, from_version: u64) -> HostResult<VersionDelta> {
        self.document(name)?.delta_since(from_version)
    }

    pub fn line_col_to_offset(&self, name: &str, line: usize, column: usize) -> HostResult<usize> {
        self.document(name)?.line_col_to_offset(line, column)
    }

    pub fn offset_to_line_col(&self, name: &str, offset: usize) -> HostResult<LineCol> {
        self.document(name)?.offset_to_line_col(offset)
    }

    pub fn set_open(&mut self, name: &str, open: bool) -> HostResult<()> {
        self.document_mut(name)?.set_open(open);
        Ok(())
    }

    /// Stop tracking `name`. Remaining scripts keep their relative order.
    pub fn remove(&mut self, name: &str) -> HostResult<Document> {
        let doc = self
            .scripts
            .shift_remove(name)
            .ok_or_else(|| HostError::NotFound(name.to_string()))?;
        tracing::debug!(script = %name, "removed script");
        Ok(doc)
    }
}
