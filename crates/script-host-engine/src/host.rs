//! The capability set an external language service expects from its host,
//! and [`ScriptHost`], the adapter that provides it from a [`ScriptStore`].

use script_host_config::{CompilationSettings, HostConfig};

use crate::editing::{LineCol, ScriptSnapshot, Span, TextEdit, VersionDelta, apply_edits};
use crate::error::HostResult;
use crate::io::{IoError, load_scripts};
use crate::store::ScriptStore;

/// Logging sink offered to the language service.
///
/// The level probes tell the service which messages are worth formatting.
pub trait HostLogger {
    fn information(&self) -> bool;
    fn debug(&self) -> bool;
    fn warning(&self) -> bool;
    fn error(&self) -> bool;
    fn fatal(&self) -> bool;
    fn log(&self, message: &str);
}

/// Callbacks the language service uses to read scripts.
///
/// Offsets are UTF-8 byte offsets; lines and columns are 1-based.
pub trait LanguageServiceHost: HostLogger {
    /// `None` asks the service to use its default settings.
    fn compilation_settings(&self) -> Option<&CompilationSettings>;
    fn script_file_names(&self) -> Vec<String>;
    fn script_is_open(&self, name: &str) -> HostResult<bool>;
    fn script_source_text(&self, name: &str, start: usize, end: usize) -> HostResult<String>;
    fn script_source_length(&self, name: &str) -> HostResult<usize>;
    fn script_version(&self, name: &str) -> HostResult<u64>;
    fn script_snapshot(&self, name: &str) -> HostResult<ScriptSnapshot>;
    fn edit_range_since_version(&self, name: &str, version: u64) -> HostResult<VersionDelta>;
    fn line_col_to_offset(&self, name: &str, line: usize, column: usize) -> HostResult<usize>;
    fn offset_to_line_col(&self, name: &str, offset: usize) -> HostResult<LineCol>;
}

/// Adapter between a [`ScriptStore`] and a language service.
#[derive(Debug, Clone, Default)]
pub struct ScriptHost {
    store: ScriptStore,
    config: HostConfig,
}

impl ScriptHost {
    pub fn new(config: HostConfig) -> Self {
        Self {
            store: ScriptStore::from_config(&config),
            config,
        }
    }

    /// Build a host and register every script under the configured
    /// `scripts_root` whose extension is in `extensions`.
    ///
    /// Without a `scripts_root` this is the same as [`ScriptHost::new`].
    pub fn load(config: HostConfig, extensions: &[&str]) -> Result<Self, IoError> {
        let mut host = Self::new(config);
        if let Some(root) = host.config.scripts_root.clone() {
            let names = load_scripts(&mut host.store, &root, extensions)?;
            tracing::info!(root = %root.display(), count = names.len(), "preloaded scripts");
        }
        Ok(host)
    }

    pub fn config(&self) -> &HostConfig {
        &self.config
    }

    pub fn store(&self) -> &ScriptStore {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut ScriptStore {
        &mut self.store
    }

    pub fn add_script(&mut self, name: impl Into<String>, content: &str) -> HostResult<()> {
        self.store.register(name, content)
    }

    pub fn update_script(&mut self, name: &str, content: &str) -> HostResult<u64> {
        self.store.replace_content(name, content)
    }

    pub fn edit_script(
        &mut self,
        name: &str,
        start: usize,
        end: usize,
        replacement: &str,
    ) -> HostResult<u64> {
        self.store.apply_edit(name, start, end, replacement)
    }

    pub fn script_content(&self, name: &str) -> HostResult<String> {
        Ok(self.store.document(name)?.text())
    }

    /// Apply a batch of edits to `content`, e.g. the result of a rename.
    pub fn apply_edits(&self, content: &str, edits: Vec<TextEdit>) -> HostResult<String> {
        apply_edits(content, edits)
    }
}

impl HostLogger for ScriptHost {
    fn information(&self) -> bool {
        true
    }

    fn debug(&self) -> bool {
        true
    }

    fn warning(&self) -> bool {
        true
    }

    fn error(&self) -> bool {
        true
    }

    fn fatal(&self) -> bool {
        true
    }

    fn log(&self, message: &str) {
        tracing::info!(target: "language_service", "{message}");
    }
}

impl LanguageServiceHost for ScriptHost {
    fn compilation_settings(&self) -> Option<&CompilationSettings> {
        self.config.compilation.as_ref()
    }

    fn script_file_names(&self) -> Vec<String> {
        self.store.names().map(str::to_string).collect()
    }

    fn script_is_open(&self, name: &str) -> HostResult<bool> {
        Ok(self.store.document(name)?.is_open())
    }

    fn script_source_text(&self, name: &str, start: usize, end: usize) -> HostResult<String> {
        self.store.document(name)?.slice(Span::new(start, end))
    }

    fn script_source_length(&self, name: &str) -> HostResult<usize> {
        Ok(self.store.document(name)?.len())
    }

    fn script_version(&self, name: &str) -> HostResult<u64> {
        Ok(self.store.document(name)?.version())
    }

    fn script_snapshot(&self, name: &str) -> HostResult<ScriptSnapshot> {
        Ok(self.store.document(name)?.snapshot())
    }

    fn edit_range_since_version(&self, name: &str, version: u64) -> HostResult<VersionDelta> {
        tracing::trace!(script = %name, version, "edit range requested");
        self.store.delta_since(name, version)
    }

    fn line_col_to_offset(&self, name: &str, line: usize, column: usize) -> HostResult<usize> {
        self.store.line_col_to_offset(name, line, column)
    }

    fn offset_to_line_col(&self, name: &str, offset: usize) -> HostResult<LineCol> {
        self.store.offset_to_line_col(name, offset)
    }
}
