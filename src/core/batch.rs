use crate::core::prompt::short_label;
use crate::domain::model::{BatchReport, FailedAsset, ImageJob};
use crate::domain::ports::{ImageGenerator, Storage};

/// Generates and saves images one at a time. A failed job is recorded and skipped; the rest
/// of the batch always runs.
pub struct BatchRunner<'a, G: ImageGenerator, S: Storage> {
    generator: &'a G,
    storage: &'a S,
    cost_per_image: f64,
}

impl<'a, G: ImageGenerator, S: Storage> BatchRunner<'a, G, S> {
    pub fn new(generator: &'a G, storage: &'a S, cost_per_image: f64) -> Self {
        Self {
            generator,
            storage,
            cost_per_image,
        }
    }

    pub async fn run(&self, jobs: &[ImageJob]) -> BatchReport {
        let mut report = BatchReport::new(self.cost_per_image);

        for job in jobs {
            report.attempted += 1;
            println!("  ├─ Generating: {}", short_label(&job.request.prompt));

            let bytes = match self.generator.generate(&job.request).await {
                Ok(bytes) => bytes,
                Err(e) => {
                    tracing::warn!("Image generation failed for {}: {}", job.label, e);
                    println!("  └─ ❌ Failed: {} ({})", job.label, e);
                    report.failures.push(FailedAsset {
                        label: job.label.clone(),
                        reason: e.to_string(),
                    });
                    continue;
                }
            };

            match self.storage.write_file(&job.output_path, &bytes).await {
                Ok(()) => {
                    tracing::debug!(
                        "Wrote {} bytes to {}",
                        bytes.len(),
                        self.storage.describe(&job.output_path)
                    );
                    println!("  └─ ✅ Saved: {}", job.label);
                    report.saved.push(job.output_path.clone());
                }
                Err(e) => {
                    tracing::warn!("Could not save {}: {}", job.output_path, e);
                    println!("  └─ ❌ Failed: {} ({})", job.label, e);
                    report.failures.push(FailedAsset {
                        label: job.label.clone(),
                        reason: e.to_string(),
                    });
                }
            }
        }

        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::ImageRequest;
    use crate::utils::error::{AssetError, GenerationError, Result};
    use async_trait::async_trait;
    use std::collections::{HashMap, HashSet};
    use std::sync::Arc;
    use tokio::sync::Mutex;

    #[derive(Clone)]
    struct MockStorage {
        files: Arc<Mutex<HashMap<String, Vec<u8>>>>,
        read_only: HashSet<String>,
    }

    impl MockStorage {
        fn new() -> Self {
            Self {
                files: Arc::new(Mutex::new(HashMap::new())),
                read_only: HashSet::new(),
            }
        }

        async fn get_file(&self, path: &str) -> Option<Vec<u8>> {
            let files = self.files.lock().await;
            files.get(path).cloned()
        }

        async fn file_count(&self) -> usize {
            self.files.lock().await.len()
        }
    }

    impl Storage for MockStorage {
        async fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
            if self.read_only.contains(path) {
                return Err(AssetError::IoError(std::io::Error::new(
                    std::io::ErrorKind::PermissionDenied,
                    format!("read-only: {}", path),
                )));
            }
            let mut files = self.files.lock().await;
            files.insert(path.to_string(), data.to_vec());
            Ok(())
        }

        fn describe(&self, path: &str) -> String {
            format!("mock://{}", path)
        }
    }

    /// Fails every prompt listed in `failing`; otherwise echoes the prompt as bytes.
    struct ScriptedGenerator {
        failing: HashSet<String>,
        calls: Mutex<Vec<String>>,
    }

    impl ScriptedGenerator {
        fn failing_on(prompts: &[&str]) -> Self {
            Self {
                failing: prompts.iter().map(|p| p.to_string()).collect(),
                calls: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl ImageGenerator for ScriptedGenerator {
        async fn generate(
            &self,
            request: &ImageRequest,
        ) -> std::result::Result<Vec<u8>, GenerationError> {
            self.calls.lock().await.push(request.prompt.clone());
            if self.failing.contains(&request.prompt) {
                Err(GenerationError::MissingImages)
            } else {
                Ok(request.prompt.as_bytes().to_vec())
            }
        }
    }

    fn job(name: &str) -> ImageJob {
        ImageJob {
            label: format!("{name}.png"),
            output_path: format!("visuals/{name}.png"),
            request: ImageRequest {
                prompt: name.to_string(),
                temperature: 0.7,
            },
        }
    }

    #[tokio::test]
    async fn test_all_jobs_attempted_despite_failures() {
        let jobs: Vec<ImageJob> = ["a", "b", "c", "d", "e"].iter().map(|n| job(n)).collect();
        let generator = ScriptedGenerator::failing_on(&["a", "c"]);
        let storage = MockStorage::new();

        let report = BatchRunner::new(&generator, &storage, 0.039).run(&jobs).await;

        assert_eq!(report.attempted, 5);
        assert_eq!(report.succeeded(), 3);
        assert_eq!(report.failed(), 2);
        assert_eq!(
            *generator.calls.lock().await,
            vec!["a", "b", "c", "d", "e"]
        );
        assert_eq!(report.failures[0].label, "a.png");
        assert_eq!(report.failures[1].reason, "No images in response");
        assert_eq!(storage.file_count().await, 3);
        assert!(storage.get_file("visuals/a.png").await.is_none());
        assert_eq!(storage.get_file("visuals/b.png").await.unwrap(), b"b");
        assert!((report.estimated_cost() - 3.0 * 0.039).abs() < 1e-9);
    }

    #[tokio::test]
    async fn test_every_job_failing_still_attempts_all() {
        let jobs: Vec<ImageJob> = ["x", "y", "z"].iter().map(|n| job(n)).collect();
        let generator = ScriptedGenerator::failing_on(&["x", "y", "z"]);
        let storage = MockStorage::new();

        let report = BatchRunner::new(&generator, &storage, 0.039).run(&jobs).await;

        assert_eq!(report.attempted, 3);
        assert_eq!(report.succeeded(), 0);
        assert_eq!(report.failed(), 3);
        assert_eq!(storage.file_count().await, 0);
        assert_eq!(report.estimated_cost(), 0.0);
    }

    #[tokio::test]
    async fn test_write_failure_counts_as_failed_asset() {
        let jobs = vec![job("a"), job("b")];
        let generator = ScriptedGenerator::failing_on(&[]);
        let mut storage = MockStorage::new();
        storage.read_only.insert("visuals/a.png".to_string());

        let report = BatchRunner::new(&generator, &storage, 0.039).run(&jobs).await;

        assert_eq!(report.succeeded(), 1);
        assert_eq!(report.failed(), 1);
        assert_eq!(report.saved, vec!["visuals/b.png".to_string()]);
    }

    #[tokio::test]
    async fn test_empty_batch() {
        let generator = ScriptedGenerator::failing_on(&[]);
        let storage = MockStorage::new();

        let report = BatchRunner::new(&generator, &storage, 0.039).run(&[]).await;

        assert_eq!(report.attempted, 0);
        assert!(generator.calls.lock().await.is_empty());
    }
}
