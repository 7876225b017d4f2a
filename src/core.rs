pub mod archive;
pub mod classifier;
pub mod installer;
pub mod mapper;
pub mod preview;
pub mod reconcile;
pub mod registry;
pub mod uninstaller;
