pub mod alternatives;
pub mod audit;
pub mod cache;
pub mod health;
pub mod install;
pub mod outdated;
pub mod size;
pub mod tree;
pub mod uninstall;
pub mod unused;
