pub mod batch;
pub mod image_client;
pub mod jobs;
pub mod orchestrator;
pub mod prompt;

pub use crate::domain::model::{BatchReport, ImageJob, ImageRequest};
pub use crate::domain::ports::{Confirm, ImageGenerator, Storage};
pub use crate::utils::error::Result;
