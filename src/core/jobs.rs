use crate::config::toml_config::ImageApiSettings;
use crate::core::prompt::{mascot_filename, mascot_prompt, visual_asset_prompt};
use crate::domain::brand::{MASCOT_DIR, VISUALS_DIR};
use crate::domain::catalog;
use crate::domain::model::{AssetSpec, ImageJob, ImageRequest};

pub fn visual_asset_job(spec: &AssetSpec, settings: &ImageApiSettings) -> ImageJob {
    ImageJob {
        label: spec.filename.to_string(),
        output_path: format!("{}/{}", VISUALS_DIR, spec.filename),
        request: ImageRequest {
            prompt: visual_asset_prompt(spec.prompt, spec.style),
            temperature: settings.temperature,
        },
    }
}

/// Jobs for the named catalog categories, in the order given.
///
/// Unknown categories are skipped with a warning. `max_per_category` keeps the first N specs
/// of each category; `None` or `Some(0)` keeps them all.
pub fn visual_asset_jobs<S: AsRef<str>>(
    categories: &[S],
    max_per_category: Option<usize>,
    settings: &ImageApiSettings,
) -> Vec<ImageJob> {
    let mut jobs = Vec::new();

    for category in categories {
        let name = category.as_ref().trim();
        let Some(specs) = catalog::category(name) else {
            tracing::warn!("⚠️ Unknown category: {}", name);
            continue;
        };

        let take = match max_per_category {
            Some(limit) if limit > 0 => limit,
            _ => specs.len(),
        };
        jobs.extend(
            specs
                .iter()
                .take(take)
                .map(|spec| visual_asset_job(spec, settings)),
        );
    }

    jobs
}

pub fn mascot_jobs<S: AsRef<str>>(poses: &[S], settings: &ImageApiSettings) -> Vec<ImageJob> {
    poses
        .iter()
        .map(|pose| {
            let pose = pose.as_ref();
            let filename = mascot_filename(pose);
            ImageJob {
                label: filename.clone(),
                output_path: format!("{}/{}", MASCOT_DIR, filename),
                request: ImageRequest {
                    prompt: mascot_prompt(pose),
                    temperature: settings.mascot_temperature,
                },
            }
        })
        .collect()
}
