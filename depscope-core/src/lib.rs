pub mod config;
pub mod console;
pub mod error;
pub mod graph;
pub mod manager;
pub mod operations;
pub mod project;
pub mod size;
pub mod store;
pub mod suggest;

pub use config::DepscopeConfig;
pub use error::DepscopeError;
pub use graph::PackageNode;
pub use project::{Manifest, Project};
pub use store::{NodeModulesStore, PackageStore};

pub type Result<T> = std::result::Result<T, DepscopeError>;
