//! Client for the chat-completions image endpoint (OpenRouter, `google/gemini-2.5-flash-image`).
//!
//! One request per image, no retries. Every way the call can go wrong is reported as a
//! [`GenerationError`] so the caller can log it and move on to the next asset.

use crate::config::toml_config::ImageApiSettings;
use crate::domain::brand::NANO_BANANA;
use crate::domain::model::ImageRequest;
use crate::domain::ports::ImageGenerator;
use crate::utils::error::{AssetError, GenerationError, Result};
use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD as BASE64_ENGINE;
use base64::Engine;
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use serde_json::{json, Value};

const ERROR_BODY_PREVIEW_CHARS: usize = 200;
const DATA_URI_IMAGE_PREFIX: &str = "data:image";

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Option<Vec<ChatChoice>>,
    #[serde(default)]
    usage: Option<Usage>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    #[serde(default)]
    message: Option<ChatMessage>,
}

#[derive(Debug, Deserialize)]
struct ChatMessage {
    #[serde(default)]
    images: Option<Vec<ResponseImage>>,
}

#[derive(Debug, Deserialize)]
struct ResponseImage {
    #[serde(default)]
    image_url: Option<ImageUrl>,
}

#[derive(Debug, Deserialize)]
struct ImageUrl {
    url: String,
}

#[derive(Debug, Deserialize)]
struct Usage {
    total_tokens: Option<u64>,
    cost: Option<f64>,
}

/// Holds the API key explicitly; nothing in here reads the environment.
#[derive(Clone)]
pub struct ImageClient {
    client: Client,
    settings: ImageApiSettings,
    api_key: String,
}

impl ImageClient {
    pub fn new(settings: ImageApiSettings, api_key: impl Into<String>) -> Result<Self> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(AssetError::MissingConfigError {
                field: NANO_BANANA.api_key_env.to_string(),
            });
        }

        let client = Client::builder().timeout(settings.timeout()).build()?;

        Ok(Self {
            client,
            settings,
            api_key,
        })
    }

    /// Resolves the key through `lookup` first, so a missing key fails before any request exists.
    pub fn from_settings<F>(settings: ImageApiSettings, lookup: F) -> Result<Self>
    where
        F: FnOnce(&str) -> Option<String>,
    {
        let api_key = settings.resolve_api_key(lookup)?;
        Self::new(settings, api_key)
    }

    pub fn from_env(settings: ImageApiSettings) -> Result<Self> {
        Self::from_settings(settings, |name| std::env::var(name).ok())
    }

    pub fn settings(&self) -> &ImageApiSettings {
        &self.settings
    }

    pub fn request_body(&self, request: &ImageRequest) -> Value {
        json!({
            "model": self.settings.model,
            "messages": [{ "role": "user", "content": request.prompt }],
            "modalities": NANO_BANANA.modalities,
            "max_tokens": self.settings.max_tokens,
            "temperature": request.temperature,
        })
    }

    pub async fn generate_image(
        &self,
        request: &ImageRequest,
    ) -> std::result::Result<Vec<u8>, GenerationError> {
        tracing::debug!(
            "POST {} (model {}, prompt {} chars, temperature {})",
            self.settings.endpoint,
            self.settings.model,
            request.prompt.len(),
            request.temperature
        );

        let response = self
            .client
            .post(&self.settings.endpoint)
            .bearer_auth(&self.api_key)
            .header(CONTENT_TYPE, "application/json")
            .json(&self.request_body(request))
            .send()
            .await?;

        let status = response.status();
        tracing::debug!("Image API response status: {}", status);

        if status != StatusCode::OK {
            // The status is the error; an unreadable body only loses the preview.
            let body = match response.text().await {
                Ok(text) => text.chars().take(ERROR_BODY_PREVIEW_CHARS).collect(),
                Err(e) => {
                    tracing::debug!("Could not read error body: {}", e);
                    String::new()
                }
            };
            return Err(GenerationError::Status { status, body });
        }

        let response_text = response.text().await?;
        parse_image_response(&response_text)
    }
}

impl std::fmt::Debug for ImageClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImageClient")
            .field("endpoint", &self.settings.endpoint)
            .field("model", &self.settings.model)
            .field("api_key", &"<redacted>")
            .finish()
    }
}

#[async_trait]
impl ImageGenerator for ImageClient {
    async fn generate(
        &self,
        request: &ImageRequest,
    ) -> std::result::Result<Vec<u8>, GenerationError> {
        self.generate_image(request).await
    }
}

/// Pulls `choices[0].message.images[0].image_url.url` out of a 200 body and decodes it.
pub fn parse_image_response(body: &str) -> std::result::Result<Vec<u8>, GenerationError> {
    let response: ChatCompletionResponse = serde_json::from_str(body)?;

    if let Some(usage) = &response.usage {
        tracing::debug!(
            "Reported usage: {:?} tokens, cost {:?}",
            usage.total_tokens,
            usage.cost
        );
    }

    let choice = response
        .choices
        .and_then(|choices| choices.into_iter().next())
        .ok_or(GenerationError::MissingChoices)?;

    let image_url = choice
        .message
        .and_then(|message| message.images)
        .and_then(|images| images.into_iter().next())
        .ok_or(GenerationError::MissingImages)?
        .image_url
        .ok_or_else(|| GenerationError::MalformedDataUri("missing image_url".to_string()))?;

    decode_data_uri(&image_url.url)
}

/// `data:image/png;base64,<payload>` -> raw bytes. Line breaks inside the payload are ignored.
pub fn decode_data_uri(url: &str) -> std::result::Result<Vec<u8>, GenerationError> {
    if !url.starts_with(DATA_URI_IMAGE_PREFIX) {
        return Err(GenerationError::MalformedDataUri(preview(url)));
    }

    let (_, payload) = url
        .split_once(',')
        .ok_or_else(|| GenerationError::MalformedDataUri(preview(url)))?;

    let payload: String = payload
        .chars()
        .filter(|c| !c.is_ascii_whitespace())
        .collect();
    Ok(BASE64_ENGINE.decode(payload)?)
}

fn preview(url: &str) -> String {
    url.chars().take(40).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;

    const PNG_BYTES: &[u8] = &[
        0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A, 0x00, 0x00, 0x00, 0x0D, b'I', b'H', b'D',
        b'R', 0xFF, 0x00, 0x7F,
    ];

    fn settings_for(server: &MockServer) -> ImageApiSettings {
        ImageApiSettings {
            endpoint: server.url("/api/v1/chat/completions"),
            timeout_seconds: 5,
            ..ImageApiSettings::default()
        }
    }

    fn image_response(data_uri: &str) -> Value {
        json!({
            "id": "gen-1",
            "choices": [{
                "message": {
                    "role": "assistant",
                    "content": "Here is your image",
                    "images": [{ "type": "image_url", "image_url": { "url": data_uri } }]
                }
            }],
            "usage": { "total_tokens": 1290, "cost": 0.039 }
        })
    }

    fn request() -> ImageRequest {
        ImageRequest {
            prompt: "A friendly cell".to_string(),
            temperature: 0.7,
        }
    }

    #[tokio::test]
    async fn test_generate_image_round_trips_png_bytes() {
        let server = MockServer::start();
        let data_uri = format!("data:image/png;base64,{}", BASE64_ENGINE.encode(PNG_BYTES));

        let api_mock = server.mock(|when, then| {
            when.method(POST)
                .path("/api/v1/chat/completions")
                .header("Authorization", "Bearer test-key")
                .header("Content-Type", "application/json")
                .body_contains("\"modalities\":[\"image\",\"text\"]")
                .body_contains("\"model\":\"google/gemini-2.5-flash-image\"")
                .body_contains("A friendly cell");
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(image_response(&data_uri));
        });

        let client = ImageClient::new(settings_for(&server), "test-key").unwrap();
        let bytes = client.generate_image(&request()).await.unwrap();

        api_mock.assert();
        assert_eq!(bytes, PNG_BYTES);
    }

    #[tokio::test]
    async fn test_non_200_status_is_a_failure() {
        let server = MockServer::start();
        let api_mock = server.mock(|when, then| {
            when.method(POST).path("/api/v1/chat/completions");
            then.status(402).body("insufficient credits");
        });

        let client = ImageClient::new(settings_for(&server), "test-key").unwrap();
        let err = client.generate_image(&request()).await.unwrap_err();

        api_mock.assert();
        match err {
            GenerationError::Status { status, body } => {
                assert_eq!(status, StatusCode::PAYMENT_REQUIRED);
                assert_eq!(body, "insufficient credits");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_error_body_is_truncated() {
        let server = MockServer::start();
        let long_body = "x".repeat(1000);
        server.mock(|when, then| {
            when.method(POST);
            then.status(500).body(long_body.clone());
        });

        let client = ImageClient::new(settings_for(&server), "test-key").unwrap();
        match client.generate_image(&request()).await {
            Err(GenerationError::Status { body, .. }) => assert_eq!(body.len(), 200),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    /// Answers every request with `response` verbatim, then closes the connection.
    async fn raw_http_server(response: &'static str) -> String {
        use tokio::io::{AsyncReadExt, AsyncWriteExt};

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            let (mut stream, _) = listener.accept().await.unwrap();
            let mut request = Vec::new();
            let mut chunk = [0u8; 4096];
            loop {
                let n = stream.read(&mut chunk).await.unwrap();
                if n == 0 {
                    break;
                }
                request.extend_from_slice(&chunk[..n]);
                let text = String::from_utf8_lossy(&request).into_owned();
                if let Some(head_end) = text.find("\r\n\r\n") {
                    let length = text[..head_end]
                        .lines()
                        .filter_map(|line| line.split_once(':'))
                        .find(|(name, _)| name.eq_ignore_ascii_case("content-length"))
                        .and_then(|(_, value)| value.trim().parse::<usize>().ok())
                        .unwrap_or(0);
                    if request.len() >= head_end + 4 + length {
                        break;
                    }
                }
            }
            stream.write_all(response.as_bytes()).await.unwrap();
            stream.shutdown().await.unwrap();
        });

        format!("http://{}/api/v1/chat/completions", addr)
    }

    #[tokio::test]
    async fn test_status_survives_an_unreadable_error_body() {
        // Announces 100 bytes, sends 13, then hangs up.
        let endpoint = raw_http_server(
            "HTTP/1.1 503 Service Unavailable\r\nContent-Length: 100\r\n\r\nupstream busy",
        )
        .await;
        let settings = ImageApiSettings {
            endpoint,
            timeout_seconds: 5,
            ..ImageApiSettings::default()
        };
        let client = ImageClient::new(settings, "test-key").unwrap();

        match client.generate_image(&request()).await {
            Err(GenerationError::Status { status, body }) => {
                assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
                assert!(body.is_empty());
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_transport_failure_is_reported() {
        let settings = ImageApiSettings {
            endpoint: "http://127.0.0.1:9/api/v1/chat/completions".to_string(),
            timeout_seconds: 2,
            ..ImageApiSettings::default()
        };
        let client = ImageClient::new(settings, "test-key").unwrap();

        let err = client.generate_image(&request()).await.unwrap_err();
        assert!(matches!(err, GenerationError::Transport(_)));
    }

    #[test]
    fn test_missing_choices() {
        let err = parse_image_response(r#"{"id": "gen-1"}"#).unwrap_err();
        assert!(matches!(err, GenerationError::MissingChoices));

        let err = parse_image_response(r#"{"choices": []}"#).unwrap_err();
        assert!(matches!(err, GenerationError::MissingChoices));
    }

    #[test]
    fn test_missing_images() {
        let err = parse_image_response(
            r#"{"choices": [{"message": {"role": "assistant", "content": "I cannot draw that"}}]}"#,
        )
        .unwrap_err();
        assert!(matches!(err, GenerationError::MissingImages));

        let err =
            parse_image_response(r#"{"choices": [{"message": {"images": []}}]}"#).unwrap_err();
        assert!(matches!(err, GenerationError::MissingImages));

        let err = parse_image_response(r#"{"choices": [{}]}"#).unwrap_err();
        assert!(matches!(err, GenerationError::MissingImages));
    }

    #[test]
    fn test_malformed_data_uri() {
        let body = image_response("https://cdn.example.com/image.png").to_string();
        let err = parse_image_response(&body).unwrap_err();
        assert!(matches!(err, GenerationError::MalformedDataUri(_)));

        let err = decode_data_uri("data:image/png;base64").unwrap_err();
        assert!(matches!(err, GenerationError::MalformedDataUri(_)));
    }

    #[test]
    fn test_line_wrapped_payload_decodes() {
        let encoded = BASE64_ENGINE.encode(PNG_BYTES);
        let wrapped: String = encoded
            .as_bytes()
            .chunks(8)
            .map(|chunk| String::from_utf8_lossy(chunk).into_owned())
            .collect::<Vec<_>>()
            .join("\r\n");
        assert!(wrapped.contains('\n'));

        let bytes = decode_data_uri(&format!("data:image/png;base64,{}\n", wrapped)).unwrap();
        assert_eq!(bytes, PNG_BYTES);
    }

    #[test]
    fn test_invalid_base64_payload() {
        let err = decode_data_uri("data:image/png;base64,@@not-base64@@").unwrap_err();
        assert!(matches!(err, GenerationError::Decode(_)));
    }

    #[test]
    fn test_non_json_body() {
        let err = parse_image_response("<html>gateway</html>").unwrap_err();
        assert!(matches!(err, GenerationError::InvalidJson(_)));
    }

    #[test]
    fn test_empty_api_key_is_rejected() {
        let result = ImageClient::new(ImageApiSettings::default(), "  ");
        assert!(matches!(
            result,
            Err(AssetError::MissingConfigError { .. })
        ));
    }

    #[test]
    fn test_request_body_shape() {
        let client = ImageClient::new(ImageApiSettings::default(), "key").unwrap();
        let body = client.request_body(&ImageRequest {
            prompt: "Pose: reading".to_string(),
            temperature: 0.8,
        });

        assert_eq!(body["model"], "google/gemini-2.5-flash-image");
        assert_eq!(body["messages"][0]["role"], "user");
        assert_eq!(body["messages"][0]["content"], "Pose: reading");
        assert_eq!(body["modalities"], json!(["image", "text"]));
        assert_eq!(body["max_tokens"], 16000);
        assert_eq!(body["temperature"], 0.8);
        assert_eq!(body.to_string().matches("\"temperature\":0.8").count(), 1);
    }
}
