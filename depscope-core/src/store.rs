use crate::project::Manifest;
use std::fs;
use std::path::{Path, PathBuf};

/// Where installed packages live on disk.
///
/// The inspection engine never assumes a directory layout directly; it asks
/// the store, so tests can substitute an in-memory fixture for a real
/// `node_modules` tree.
pub trait PackageStore {
    /// Resolve a package name to its install directory, or `None` when the
    /// package is not present on disk.
    fn install_dir(&self, name: &str) -> Option<PathBuf>;

    /// Read the package's own manifest. Any failure (absent package,
    /// unreadable or malformed file) is `None`.
    fn read_manifest(&self, name: &str) -> Option<Manifest>;
}

/// The conventional `<project>/node_modules/<name>` layout.
#[derive(Debug, Clone)]
pub struct NodeModulesStore {
    root: PathBuf,
}

impl NodeModulesStore {
    pub fn new(project_root: &Path) -> Self {
        NodeModulesStore {
            root: project_root.join("node_modules"),
        }
    }
}

impl PackageStore for NodeModulesStore {
    fn install_dir(&self, name: &str) -> Option<PathBuf> {
        // Scoped names contain a slash; join maps @scope/pkg to nested dirs
        let dir = self.root.join(name);
        dir.is_dir().then_some(dir)
    }

    fn read_manifest(&self, name: &str) -> Option<Manifest> {
        let path = self.install_dir(name)?.join("package.json");
        let data = fs::read_to_string(path).ok()?;
        serde_json::from_str(&data).ok()
    }
}
