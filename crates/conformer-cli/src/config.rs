pub mod builder;
pub mod defaults;
pub mod file;
pub mod models;

pub use builder::{build_populate_config, build_transform_config};
pub use models::{PopulateConfig, TransformConfig};
