use base64::{engine::general_purpose::STANDARD, Engine};
use brand_assets::config::toml_config::ImageApiSettings;
use brand_assets::core::jobs::visual_asset_jobs;
use brand_assets::core::orchestrator::AutoConfirm;
use brand_assets::domain::brand::{COLOR_PALETTE_FILE, TEMPLATES_FILE};
use brand_assets::{
    AssetError, BatchRunner, ImageClient, LocalStorage, Orchestrator, RunMode,
};
use chrono::NaiveDate;
use httpmock::prelude::*;
use std::io::Read;
use std::path::Path;
use tempfile::TempDir;

const PNG_BYTES: &[u8] = &[
    0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A, 0x00, 0x00, 0x00, 0x0D, b'I', b'H', b'D', b'R',
];

fn settings_for(server: &MockServer) -> ImageApiSettings {
    ImageApiSettings {
        endpoint: server.url("/api/v1/chat/completions"),
        timeout_seconds: 5,
        ..ImageApiSettings::default()
    }
}

fn image_body() -> serde_json::Value {
    serde_json::json!({
        "choices": [{
            "message": {
                "role": "assistant",
                "images": [{
                    "type": "image_url",
                    "image_url": { "url": format!("data:image/png;base64,{}", STANDARD.encode(PNG_BYTES)) }
                }]
            }
        }]
    })
}

fn zip_entries(path: &Path) -> Vec<String> {
    let file = std::fs::File::open(path).unwrap();
    let archive = zip::ZipArchive::new(file).unwrap();
    archive.file_names().map(str::to_string).collect()
}

#[tokio::test]
async fn test_demo_run_writes_decks_and_images() {
    let temp_dir = TempDir::new().unwrap();
    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(POST)
            .path("/api/v1/chat/completions")
            .header("Authorization", "Bearer integration-key");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(image_body());
    });

    let settings = settings_for(&server);
    let client = ImageClient::new(settings.clone(), "integration-key").unwrap();
    let storage = LocalStorage::new(temp_dir.path());
    let root = temp_dir.path().to_str().unwrap();
    let today = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();

    let summary = Orchestrator::new(&client, &storage, &AutoConfirm(true), &settings, today)
        .run(RunMode::Demo, root)
        .await;

    api_mock.assert_hits(13);
    assert!(summary.all_succeeded());
    assert_eq!(summary.images.succeeded(), 13);

    let image = std::fs::read(temp_dir.path().join("visuals/water_molecule_3d.png")).unwrap();
    assert_eq!(image, PNG_BYTES);
    assert!(temp_dir
        .path()
        .join("mascot/micro_mayhem_experimenting_holding_test_tube.png")
        .exists());
    assert!(!temp_dir
        .path()
        .join("mascot/micro_mayhem_surprised_wide_eyes.png")
        .exists());

    let palette = zip_entries(&temp_dir.path().join(COLOR_PALETTE_FILE));
    for slide in 1..=4 {
        assert!(palette.contains(&format!("ppt/slides/slide{slide}.xml")));
    }
    assert!(!palette.contains(&"ppt/slides/slide5.xml".to_string()));
    assert!(palette.contains(&"[Content_Types].xml".to_string()));

    let templates = zip_entries(&temp_dir.path().join(TEMPLATES_FILE));
    assert!(templates.contains(&"ppt/slides/slide4.xml".to_string()));
}

#[tokio::test]
async fn test_palette_deck_mentions_generation_date() {
    let temp_dir = TempDir::new().unwrap();
    let server = MockServer::start();
    let settings = settings_for(&server);
    let client = ImageClient::new(settings.clone(), "integration-key").unwrap();
    let storage = LocalStorage::new(temp_dir.path());
    let today = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();

    // Declining both paid steps leaves only the decks.
    let summary = Orchestrator::new(&client, &storage, &AutoConfirm(false), &settings, today)
        .run(RunMode::Full, "out")
        .await;
    assert_eq!(summary.images.attempted, 0);

    let file = std::fs::File::open(temp_dir.path().join(COLOR_PALETTE_FILE)).unwrap();
    let mut archive = zip::ZipArchive::new(file).unwrap();
    let mut slide = String::new();
    archive
        .by_name("ppt/slides/slide1.xml")
        .unwrap()
        .read_to_string(&mut slide)
        .unwrap();
    assert!(slide.contains("Generated: June 01, 2025"));
}

#[tokio::test]
async fn test_missing_api_key_makes_no_request() {
    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(POST).path("/api/v1/chat/completions");
        then.status(200).json_body(image_body());
    });

    let result = ImageClient::from_settings(settings_for(&server), |_| None);

    match result {
        Err(AssetError::MissingConfigError { field }) => assert_eq!(field, "OPENROUTER_API_KEY"),
        other => panic!("expected a missing key error, got {:?}", other),
    }
    api_mock.assert_hits(0);
}

#[tokio::test]
async fn test_non_200_response_writes_no_file() {
    let temp_dir = TempDir::new().unwrap();
    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(POST).path("/api/v1/chat/completions");
        then.status(500).body("upstream exploded");
    });

    let settings = settings_for(&server);
    let client = ImageClient::new(settings.clone(), "integration-key").unwrap();
    let storage = LocalStorage::new(temp_dir.path());
    let jobs = visual_asset_jobs(&["cell_imagery"], Some(2), &settings);

    let report = BatchRunner::new(&client, &storage, settings.cost_per_image)
        .run(&jobs)
        .await;

    api_mock.assert_hits(2);
    assert_eq!(report.failed(), 2);
    assert_eq!(report.succeeded(), 0);
    assert!(report.failures[0].reason.contains("500"));
    assert!(!temp_dir.path().join("visuals").exists());
}

#[tokio::test]
async fn test_missing_choices_counts_as_failure() {
    let temp_dir = TempDir::new().unwrap();
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/api/v1/chat/completions");
        then.status(200).json_body(serde_json::json!({ "choices": [] }));
    });

    let settings = settings_for(&server);
    let client = ImageClient::new(settings.clone(), "integration-key").unwrap();
    let storage = LocalStorage::new(temp_dir.path());
    let jobs = visual_asset_jobs(&["network_diagrams"], Some(1), &settings);

    let report = BatchRunner::new(&client, &storage, settings.cost_per_image)
        .run(&jobs)
        .await;

    assert_eq!(report.attempted, 1);
    assert_eq!(report.failed(), 1);
    assert_eq!(report.estimated_cost(), 0.0);
}
