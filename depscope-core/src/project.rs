use crate::{DepscopeError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Manifest {
    pub name: Option<String>,
    pub version: Option<String>,
    #[serde(default)]
    pub dependencies: BTreeMap<String, String>,
    #[serde(default)]
    pub dev_dependencies: BTreeMap<String, String>,
    #[serde(default)]
    pub peer_dependencies: BTreeMap<String, String>,
}

#[derive(Debug)]
pub struct Project {
    pub root: PathBuf,
    pub manifest_path: PathBuf,
    pub manifest: Manifest,
}

impl Project {
    pub fn discover(start: &Path) -> Result<Self> {
        let mut current = Some(start);

        while let Some(dir) = current {
            let candidate = dir.join("package.json");
            if candidate.is_file() {
                return Self::from_manifest_path(candidate);
            }
            current = dir.parent();
        }

        Err(DepscopeError::ManifestMissing {
            path: start.to_path_buf(),
        })
    }

    pub fn from_manifest_path(path: PathBuf) -> Result<Self> {
        let data = fs::read_to_string(&path).map_err(|source| DepscopeError::ReadFile {
            path: path.clone(),
            source,
        })?;

        let manifest: Manifest =
            serde_json::from_str(&data).map_err(|source| DepscopeError::ParseJson {
                path: path.clone(),
                source,
            })?;

        let root =
            path.parent()
                .map(Path::to_path_buf)
                .ok_or_else(|| DepscopeError::ManifestInvalid {
                    path: path.clone(),
                    reason: "manifest has no parent directory".into(),
                })?;

        Ok(Project {
            root,
            manifest_path: path,
            manifest,
        })
    }

    /// Project name for report headings, falling back to the directory name.
    pub fn label(&self) -> String {
        if let Some(name) = self.manifest.name.as_deref() {
            return name.to_string();
        }

        self.root
            .file_name()
            .and_then(|os| os.to_str())
            .unwrap_or(".")
            .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn discovers_manifest_in_parent_directory() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("package.json"),
            r#"{"name": "fixture", "version": "1.2.3"}"#,
        )
        .unwrap();
        let nested = dir.path().join("src").join("deep");
        fs::create_dir_all(&nested).unwrap();

        let project = Project::discover(&nested).unwrap();
        assert_eq!(project.manifest.name.as_deref(), Some("fixture"));
        assert_eq!(project.root, dir.path());
    }

    #[test]
    fn missing_manifest_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(Project::discover(dir.path()).is_err());
    }

    #[test]
    fn parses_dependency_sections() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("package.json");
        fs::write(
            &path,
            r#"{
                "name": "fixture",
                "dependencies": {"lodash": "^4.17.0"},
                "devDependencies": {"vitest": "^1.0.0"},
                "peerDependencies": {"react": ">=17"}
            }"#,
        )
        .unwrap();

        let project = Project::from_manifest_path(path).unwrap();
        assert_eq!(project.manifest.dependencies.len(), 1);
        assert_eq!(project.manifest.dev_dependencies.len(), 1);
        assert_eq!(
            project.manifest.peer_dependencies.get("react").map(String::as_str),
            Some(">=17")
        );
    }

    #[test]
    fn label_falls_back_to_directory_name() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("package.json"), "{}").unwrap();

        let project = Project::discover(dir.path()).unwrap();
        let expected = dir.path().file_name().unwrap().to_str().unwrap();
        assert_eq!(project.label(), expected);
    }
}
