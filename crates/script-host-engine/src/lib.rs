pub mod editing;
pub mod error;
pub mod host;
pub mod io;
pub mod store;

#[cfg(test)]
pub mod tests;

// Re-export key types for easier usage
pub use editing::*;
pub use error::{HostError, HostResult};
pub use host::{HostLogger, LanguageServiceHost, ScriptHost};
pub use io::*;
pub use script_host_config::{CompilationSettings, DuplicatePolicy, HostConfig};
pub use store::ScriptStore;
