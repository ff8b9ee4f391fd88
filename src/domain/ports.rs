use crate::domain::model::ImageRequest;
use crate::utils::error::{GenerationError, Result};
use async_trait::async_trait;

pub trait Storage: Send + Sync {
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
    /// Human-readable location of `path`, for progress output.
    fn describe(&self, path: &str) -> String;
}

/// Turns a formatted prompt into raw image bytes.
#[async_trait]
pub trait ImageGenerator: Send + Sync {
    async fn generate(
        &self,
        request: &ImageRequest,
    ) -> std::result::Result<Vec<u8>, GenerationError>;
}

/// Yes/no gate in front of steps that cost money.
pub trait Confirm {
    fn confirm(&self, question: &str) -> bool;
}
