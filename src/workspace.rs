use std::path::{Path, PathBuf};

/// Root folder opened in an editor workspace.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct WorkspaceFolder {
    pub name: String,
    pub path: PathBuf,
}

impl WorkspaceFolder {
    /// Create folder named after the last component of its path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.to_string_lossy().into_owned());
        Self { name, path }
    }
}

/// Read-only view of an editor workspace.
pub trait Workspace {
    /// All folders opened in the workspace.
    fn folders(&self) -> &[WorkspaceFolder];

    /// Path of a document currently active in the editor.
    fn active_document(&self) -> Option<&Path>;
}

/// Workspace with a fixed set of folders.
#[derive(Clone, Debug, Default)]
pub struct StaticWorkspace {
    folders: Vec<WorkspaceFolder>,
    active_document: Option<PathBuf>,
}

impl StaticWorkspace {
    pub fn new(folders: Vec<WorkspaceFolder>) -> Self {
        Self {
            folders,
            active_document: None,
        }
    }

    pub fn with_active_document(self, document: Option<PathBuf>) -> Self {
        Self {
            active_document: document,
            ..self
        }
    }
}

impl Workspace for StaticWorkspace {
    fn folders(&self) -> &[WorkspaceFolder] {
        &self.folders
    }

    fn active_document(&self) -> Option<&Path> {
        self.active_document.as_deref()
    }
}

impl<W: Workspace + ?Sized> Workspace for &W {
    fn folders(&self) -> &[WorkspaceFolder] {
        (**self).folders()
    }

    fn active_document(&self) -> Option<&Path> {
        (**self).active_document()
    }
}

/// Return local root of a debug session workspace.
///
/// An explicitly chosen folder wins. Without it, a single-folder workspace gives
/// its only folder and a multi-folder workspace gives the folder containing the
/// active document. Absence of a root is a regular result, not an error.
pub fn resolve_workspace_root(
    workspace: &impl Workspace,
    folder: Option<&WorkspaceFolder>,
) -> Option<PathBuf> {
    if let Some(folder) = folder {
        return Some(folder.path.clone());
    }

    match workspace.folders() {
        [] => None,
        [single] => Some(single.path.clone()),
        folders => {
            let document = workspace.active_document()?;
            folders
                .iter()
                .filter(|f| document.starts_with(&f.path))
                .max_by_key(|f| f.path.components().count())
                .map(|f| f.path.clone())
        }
    }
}
