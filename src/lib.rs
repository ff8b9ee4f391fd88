pub mod config;
pub mod core;
pub mod domain;
pub mod slides;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;
pub use config::{cli::LocalStorage, toml_config::AppConfig};

pub use core::{
    batch::BatchRunner,
    image_client::ImageClient,
    orchestrator::{Orchestrator, RunMode, RunSummary},
};
pub use utils::error::{AssetError, GenerationError, Result};
