pub mod audit;
pub mod health;
pub mod outdated;
pub mod unused;

pub use audit::{AuditReport, Severity, VulnerabilityCounts, audit};
pub use health::{HealthClient, PackageHealth, health};
pub use outdated::{OutdatedEntry, outdated};
pub use unused::{UnusedReport, unused};
