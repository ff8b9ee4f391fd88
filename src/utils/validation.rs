//! Value checks for `brand-assets.toml`. Every error names the TOML key it came from.

use crate::domain::brand::NANO_BANANA;
use crate::utils::error::{AssetError, Result};
use url::Url;

/// OpenRouter accepts sampling temperatures in this closed range.
pub const TEMPERATURE_RANGE: (f64, f64) = (0.0, 2.0);

const CHAT_COMPLETIONS_PATH: &str = "/chat/completions";

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

fn invalid(field: &str, value: impl ToString, reason: impl Into<String>) -> AssetError {
    AssetError::InvalidConfigValueError {
        field: field.to_string(),
        value: value.to_string(),
        reason: reason.into(),
    }
}

/// The image endpoint must be an absolute http(s) URL with a host.
///
/// A path that is not a chat-completions route is allowed (proxies rename things) but logged.
pub fn check_endpoint(field: &str, endpoint: &str) -> Result<()> {
    let url = Url::parse(endpoint.trim()).map_err(|e| {
        invalid(
            field,
            endpoint,
            format!(
                "not an absolute URL ({}); the OpenRouter endpoint is {}",
                e, NANO_BANANA.endpoint
            ),
        )
    })?;

    if !matches!(url.scheme(), "https" | "http") {
        return Err(invalid(
            field,
            endpoint,
            format!("images are requested over https, not {}", url.scheme()),
        ));
    }
    if url.host_str().map_or(true, str::is_empty) {
        return Err(invalid(field, endpoint, "URL has no host"));
    }
    if !url.path().trim_end_matches('/').ends_with(CHAT_COMPLETIONS_PATH) {
        tracing::warn!(
            "{} = {} does not end in {}; OpenRouter serves images from {}",
            field,
            endpoint,
            CHAT_COMPLETIONS_PATH,
            NANO_BANANA.endpoint
        );
    }
    Ok(())
}

/// OpenRouter model ids look like `vendor/model`; blanks and embedded spaces never resolve.
pub fn check_model_id(field: &str, model: &str) -> Result<()> {
    if model.trim().is_empty() {
        return Err(invalid(field, model, "model id is empty"));
    }
    if model.chars().any(char::is_whitespace) {
        return Err(invalid(field, model, "model id contains whitespace"));
    }
    Ok(())
}

pub fn check_temperature(field: &str, value: f64) -> Result<()> {
    let (min, max) = TEMPERATURE_RANGE;
    if !value.is_finite() || !(min..=max).contains(&value) {
        return Err(invalid(
            field,
            value,
            format!("temperature must be a number from {} to {}", min, max),
        ));
    }
    Ok(())
}

/// Prices feed the cost estimate only, but NaN or a negative value would print nonsense.
pub fn check_price(field: &str, value: f64) -> Result<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(invalid(
            field,
            value,
            "price per image must be a finite, non-negative USD amount",
        ));
    }
    Ok(())
}

pub fn check_at_least_one(field: &str, value: u64) -> Result<()> {
    if value == 0 {
        return Err(invalid(field, value, "must be at least 1"));
    }
    Ok(())
}

pub fn check_output_root(field: &str, root: &str) -> Result<()> {
    if root.trim().is_empty() {
        return Err(invalid(field, root, "output directory is empty"));
    }
    if root.contains('\0') {
        return Err(invalid(field, root, "output directory contains a NUL byte"));
    }
    Ok(())
}
