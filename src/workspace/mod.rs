//! In-memory virtual filesystem the editor saves into.
//!
//! Each host owns a flat list of executable scripts and plain text files.
//! Saving dispatches on the file-name suffix and either overwrites the
//! existing entry or creates a new one; validation failures abort before any
//! write happens.

use std::collections::HashMap;

use regex::Regex;

use crate::error::EditorError;

/// Suffixes treated as executable scripts.
pub const SCRIPT_EXTENSIONS: &[&str] = &[".script", ".js", ".ns"];

#[derive(Debug, Clone, PartialEq)]
pub struct ScriptFile {
    pub filename: String,
    pub code: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TextFile {
    pub name: String,
    pub text: String,
}

/// One host's files.
#[derive(Debug, Clone, Default)]
pub struct Host {
    pub hostname: String,
    pub scripts: Vec<ScriptFile>,
    pub text_files: Vec<TextFile>,
}

impl Host {
    pub fn new(hostname: impl Into<String>) -> Self {
        Host {
            hostname: hostname.into(),
            ..Host::default()
        }
    }

    pub fn script(&self, filename: &str) -> Option<&ScriptFile> {
        self.scripts.iter().find(|s| s.filename == filename)
    }

    pub fn text_file(&self, name: &str) -> Option<&TextFile> {
        self.text_files.iter().find(|t| t.name == name)
    }
}

/// How a save request was classified.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SavedAs {
    Script,
    Text,
}

/// The set of hosts the editor can address.
#[derive(Debug, Clone, Default)]
pub struct Workspace {
    hosts: HashMap<String, Host>,
}

impl Workspace {
    pub fn new() -> Self {
        Workspace::default()
    }

    pub fn add_host(&mut self, host: Host) {
        self.hosts.insert(host.hostname.clone(), host);
    }

    pub fn host(&self, hostname: &str) -> Option<&Host> {
        self.hosts.get(hostname)
    }

    pub fn host_mut(&mut self, hostname: &str) -> Option<&mut Host> {
        self.hosts.get_mut(hostname)
    }

    pub fn remove_host(&mut self, hostname: &str) -> Option<Host> {
        self.hosts.remove(hostname)
    }

    /// The saved contents of a file on a host, if any. Used by dirty
    /// tracking to compare the editor buffer against the stored copy.
    pub fn server_code(&self, hostname: &str, file_name: &str) -> Option<&str> {
        let host = self.host(hostname)?;
        if let Some(script) = host.script(file_name) {
            return Some(&script.code);
        }
        host.text_file(file_name).map(|t| t.text.as_str())
    }

    /// Create or overwrite a file on `hostname`.
    ///
    /// Validation runs before any write: an invalid name or missing host
    /// leaves the workspace untouched.
    pub fn save_file(
        &mut self,
        hostname: &str,
        file_name: &str,
        contents: &str,
    ) -> Result<SavedAs, EditorError> {
        if file_name.is_empty() {
            return Err(EditorError::EmptyFileName);
        }
        if !is_valid_file_path(file_name) {
            return Err(EditorError::InvalidFilePath(file_name.to_string()));
        }
        let host = self
            .host_mut(hostname)
            .ok_or_else(|| EditorError::HostNotFound(hostname.to_string()))?;

        if is_script_filename(file_name) {
            match host.scripts.iter_mut().find(|s| s.filename == file_name) {
                Some(script) => script.code = contents.to_string(),
                None => host.scripts.push(ScriptFile {
                    filename: file_name.to_string(),
                    code: contents.to_string(),
                }),
            }
            Ok(SavedAs::Script)
        } else if file_name.ends_with(".txt") {
            match host.text_files.iter_mut().find(|t| t.name == file_name) {
                Some(text) => text.text = contents.to_string(),
                None => host.text_files.push(TextFile {
                    name: file_name.to_string(),
                    text: contents.to_string(),
                }),
            }
            Ok(SavedAs::Text)
        } else {
            Err(EditorError::InvalidExtension(file_name.to_string()))
        }
    }
}

/// Whether a file name denotes an executable script.
pub fn is_script_filename(name: &str) -> bool {
    SCRIPT_EXTENSIONS.iter().any(|ext| name.ends_with(ext))
}

/// File paths are slash-separated segments of alphanumerics, hyphens,
/// underscores and dots, and must end with an extension.
pub fn is_valid_file_path(name: &str) -> bool {
    let re = Regex::new(r"^(\.?[\w-]+/)*[\w.-]+\.[A-Za-z0-9]+$").unwrap();
    re.is_match(name)
}
