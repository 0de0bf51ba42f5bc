use crate::store::PackageStore;
use serde::Serialize;
use std::fs;
use std::path::Path;

pub const MIB: u64 = 1024 * 1024;

const MEDIUM_TIER_BYTES: u64 = 5 * MIB;
const HIGH_TIER_BYTES: u64 = 10 * MIB;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SizeTier {
    Low,
    Medium,
    High,
}

impl SizeTier {
    /// Boundaries are inclusive on the lower tier: exactly 5 MiB is low,
    /// exactly 10 MiB is medium.
    pub fn for_bytes(bytes: u64) -> Self {
        if bytes > HIGH_TIER_BYTES {
            SizeTier::High
        } else if bytes > MEDIUM_TIER_BYTES {
            SizeTier::Medium
        } else {
            SizeTier::Low
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SizeTier::Low => "low",
            SizeTier::Medium => "medium",
            SizeTier::High => "high",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SizeRecord {
    pub name: String,
    pub size_bytes: u64,
    pub tier: SizeTier,
}

#[derive(Debug, Default, Serialize)]
pub struct SizeLedger {
    pub records: Vec<SizeRecord>,
    pub total_bytes: u64,
    #[serde(skip)]
    pub warnings: Vec<String>,
}

impl SizeLedger {
    pub fn count(&self) -> usize {
        self.records.len()
    }
}

/// Total on-disk size, in bytes, of the subtree rooted at `path`.
///
/// Symlinks are never followed and never counted; `.git` entries are
/// skipped. An unreadable directory contributes zero and pushes one
/// warning for that path.
pub fn directory_size(path: &Path, warnings: &mut Vec<String>) -> u64 {
    let entries = match fs::read_dir(path) {
        Ok(entries) => entries,
        Err(err) => {
            warnings.push(format!("could not read {}: {}", path.display(), err));
            return 0;
        }
    };

    let mut total = 0u64;

    for entry in entries.filter_map(|entry| entry.ok()) {
        if entry.file_name() == ".git" {
            continue;
        }

        let Ok(file_type) = entry.file_type() else {
            continue;
        };

        if file_type.is_symlink() {
            continue;
        }

        if file_type.is_dir() {
            total += directory_size(&entry.path(), warnings);
        } else if file_type.is_file() {
            total += entry.metadata().map(|metadata| metadata.len()).unwrap_or(0);
        }
    }

    total
}

/// Size ledger over the root's direct dependencies, one level only.
///
/// Missing installs warn and are dropped; zero-size records never reach the
/// display, and the total covers displayed records only, summed in bytes
/// before any rounding.
pub fn build_size_ledger(names: &[String], store: &dyn PackageStore) -> SizeLedger {
    let mut ledger = SizeLedger::default();
    let mut sized = Vec::with_capacity(names.len());

    for name in names {
        match store.install_dir(name) {
            Some(dir) => {
                let bytes = directory_size(&dir, &mut ledger.warnings);
                sized.push((name.clone(), bytes));
            }
            None => {
                ledger
                    .warnings
                    .push(format!("{} is not installed in node_modules", name));
            }
        }
    }

    // Stable sort: ties keep first-seen order
    sized.sort_by(|a, b| b.1.cmp(&a.1));

    for (name, bytes) in sized {
        if bytes == 0 {
            continue;
        }

        ledger.total_bytes += bytes;
        ledger.records.push(SizeRecord {
            name,
            size_bytes: bytes,
            tier: SizeTier::for_bytes(bytes),
        });
    }

    ledger
}

/// Presentation-time conversion; sizes stay in bytes everywhere else.
pub fn format_mib(bytes: u64) -> String {
    format!("{:.2} MB", bytes as f64 / MIB as f64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::fixtures::MemoryStore;
    use std::fs;

    fn write_file(path: &Path, len: usize) {
        fs::write(path, vec![0u8; len]).unwrap();
    }

    #[test]
    fn sums_regular_files() {
        let dir = tempfile::tempdir().unwrap();
        write_file(&dir.path().join("one.bin"), MIB as usize);
        let nested = dir.path().join("nested");
        fs::create_dir(&nested).unwrap();
        write_file(&nested.join("two.bin"), 2 * MIB as usize);

        let mut warnings = Vec::new();
        assert_eq!(directory_size(dir.path(), &mut warnings), 3_145_728);
        assert!(warnings.is_empty());
    }

    #[test]
    fn skips_git_directories() {
        let dir = tempfile::tempdir().unwrap();
        write_file(&dir.path().join("kept.bin"), 100);
        let git = dir.path().join(".git");
        fs::create_dir(&git).unwrap();
        write_file(&git.join("objects.bin"), 4096);

        let mut warnings = Vec::new();
        assert_eq!(directory_size(dir.path(), &mut warnings), 100);
    }

    #[cfg(unix)]
    #[test]
    fn symlinks_contribute_zero() {
        let dir = tempfile::tempdir().unwrap();
        write_file(&dir.path().join("real.bin"), 256);
        std::os::unix::fs::symlink(dir.path().join("real.bin"), dir.path().join("link.bin"))
            .unwrap();

        let mut warnings = Vec::new();
        assert_eq!(directory_size(dir.path(), &mut warnings), 256);
    }

    #[test]
    fn unreadable_root_reports_zero_with_warning() {
        let dir = tempfile::tempdir().unwrap();
        let gone = dir.path().join("missing");

        let mut warnings = Vec::new();
        assert_eq!(directory_size(&gone, &mut warnings), 0);
        assert_eq!(warnings.len(), 1);
    }

    #[test]
    fn tier_boundaries_are_inclusive_on_the_lower_tier() {
        assert_eq!(SizeTier::for_bytes(5 * MIB), SizeTier::Low);
        assert_eq!(SizeTier::for_bytes(5 * MIB + 1), SizeTier::Medium);
        assert_eq!(SizeTier::for_bytes(10 * MIB), SizeTier::Medium);
        assert_eq!(SizeTier::for_bytes(10 * MIB + 1), SizeTier::High);
    }

    #[test]
    fn ledger_sorts_descending_and_keeps_tie_order() {
        let big = tempfile::tempdir().unwrap();
        write_file(&big.path().join("blob.bin"), 3000);
        let tie_a = tempfile::tempdir().unwrap();
        write_file(&tie_a.path().join("blob.bin"), 1000);
        let tie_b = tempfile::tempdir().unwrap();
        write_file(&tie_b.path().join("blob.bin"), 1000);

        let store = MemoryStore::default()
            .with_dir("tie-a", tie_a.path().to_path_buf())
            .with_dir("big", big.path().to_path_buf())
            .with_dir("tie-b", tie_b.path().to_path_buf());

        let names = vec!["tie-a".to_string(), "big".to_string(), "tie-b".to_string()];
        let ledger = build_size_ledger(&names, &store);

        let order: Vec<&str> = ledger.records.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(order, vec!["big", "tie-a", "tie-b"]);
        assert_eq!(ledger.total_bytes, 5000);
    }

    #[test]
    fn missing_install_warns_and_never_displays() {
        let installed = tempfile::tempdir().unwrap();
        write_file(&installed.path().join("index.js"), 3 * MIB as usize);

        let store = MemoryStore::default().with_dir("pkg-a", installed.path().to_path_buf());
        let names = vec!["pkg-a".to_string(), "pkg-b".to_string()];

        let ledger = build_size_ledger(&names, &store);
        assert_eq!(ledger.count(), 1);
        assert_eq!(ledger.records[0].name, "pkg-a");
        assert_eq!(ledger.records[0].tier, SizeTier::Low);
        assert_eq!(ledger.total_bytes, 3 * MIB);
        assert!(ledger.warnings.iter().any(|w| w.contains("pkg-b")));
    }

    #[test]
    fn formats_bytes_as_fractional_mib() {
        assert_eq!(format_mib(3 * MIB), "3.00 MB");
        assert_eq!(format_mib(1_572_864), "1.50 MB");
    }
}
