use std::fmt;
use std::io::{BufRead, Write};

use chrono::NaiveDate;

use crate::config::toml_config::ImageApiSettings;
use crate::core::batch::BatchRunner;
use crate::core::jobs::{mascot_jobs, visual_asset_jobs};
use crate::domain::brand::{
    COLOR_PALETTE_FILE, MASCOT_DIR, MASCOT_INFO, MASCOT_KEY_POSES, TEMPLATES_FILE, VISUALS_DIR,
};
use crate::domain::catalog;
use crate::domain::model::{BatchReport, ImageJob};
use crate::domain::ports::{Confirm, ImageGenerator, Storage};
use crate::slides::pptx::save_presentation;
use crate::slides::{color_palette, templates};
use crate::utils::monitor::RunMonitor;

const DEMO_ASSETS_PER_CATEGORY: usize = 2;
const CONFIRM_QUESTION: &str = "Continue? (y/n)";

/// Steps that stay manual, with the hint shown for each.
pub const MANUAL_STEPS: [(&str, &str); 3] = [
    ("TPT Covers", "Manual workflow ready"),
    ("Graphic Library", "Use visual-assets with icon prompts"),
    ("Style Guide PDF", "Manual compilation ready"),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum RunMode {
    #[default]
    Demo,
    Full,
}

impl RunMode {
    /// `None` means every spec in the catalog.
    pub fn assets_per_category(self) -> Option<usize> {
        match self {
            RunMode::Demo => Some(DEMO_ASSETS_PER_CATEGORY),
            RunMode::Full => None,
        }
    }

    pub fn mascot_pose_count(self) -> usize {
        match self {
            RunMode::Demo => MASCOT_KEY_POSES,
            RunMode::Full => MASCOT_INFO.poses.len(),
        }
    }

    /// Full runs ask before each step that costs money.
    pub fn confirms_paid_steps(self) -> bool {
        matches!(self, RunMode::Full)
    }
}

impl fmt::Display for RunMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunMode::Demo => write!(f, "demo"),
            RunMode::Full => write!(f, "full"),
        }
    }
}

/// The paid image jobs a run would submit.
#[derive(Debug, Clone, PartialEq)]
pub struct RunPlan {
    pub mode: RunMode,
    pub visual_jobs: Vec<ImageJob>,
    pub mascot_jobs: Vec<ImageJob>,
    pub cost_per_image: f64,
}

impl RunPlan {
    pub fn new(mode: RunMode, settings: &ImageApiSettings) -> Self {
        let visual_jobs = visual_asset_jobs(
            &catalog::category_names(),
            mode.assets_per_category(),
            settings,
        );
        let mascot_jobs = mascot_jobs(&MASCOT_INFO.poses[..mode.mascot_pose_count()], settings);

        Self {
            mode,
            visual_jobs,
            mascot_jobs,
            cost_per_image: settings.cost_per_image,
        }
    }

    pub fn planned_images(&self) -> usize {
        self.visual_jobs.len() + self.mascot_jobs.len()
    }

    /// Cosmetic: planned images times the configured per-image price.
    pub fn estimated_cost(&self) -> f64 {
        self.planned_images() as f64 * self.cost_per_image
    }

    pub fn print(&self, output_root: &str) {
        println!("📋 Plan ({} mode)", self.mode);
        println!("   • Color Palette: $0 (PowerPoint) -> {}/{}", output_root, COLOR_PALETTE_FILE);
        println!("   • PPT Templates: $0 (PowerPoint) -> {}/{}", output_root, TEMPLATES_FILE);
        println!(
            "   • Visual Assets: ~${:.2} ({} of {} images) -> {}/{}/",
            self.visual_jobs.len() as f64 * self.cost_per_image,
            self.visual_jobs.len(),
            catalog::total_visual_assets(),
            output_root,
            VISUALS_DIR
        );
        for job in &self.visual_jobs {
            println!("     - {}", job.label);
        }
        println!(
            "   • Mascot: ~${:.2} ({} poses) -> {}/{}/",
            self.mascot_jobs.len() as f64 * self.cost_per_image,
            self.mascot_jobs.len(),
            output_root,
            MASCOT_DIR
        );
        for job in &self.mascot_jobs {
            println!("     - {}", job.label);
        }
        println!("\n💰 Estimated Cost: ~${:.2}", self.estimated_cost());
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepOutcome {
    pub name: String,
    pub success: bool,
    pub notes: String,
}

impl StepOutcome {
    fn new(name: &str, success: bool, notes: impl Into<String>) -> Self {
        Self {
            name: name.to_string(),
            success,
            notes: notes.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    pub mode: RunMode,
    pub steps: Vec<StepOutcome>,
    pub images: BatchReport,
    pub planned_images: usize,
    pub output_root: String,
}

impl RunSummary {
    pub fn planned_cost(&self) -> f64 {
        self.planned_images as f64 * self.images.cost_per_image
    }

    pub fn step(&self, name: &str) -> Option<&StepOutcome> {
        self.steps.iter().find(|step| step.name == name)
    }

    pub fn all_succeeded(&self) -> bool {
        self.steps.iter().all(|step| step.success)
    }

    pub fn print(&self) {
        println!("\n{}", "=".repeat(70));
        println!("📊 GENERATION SUMMARY");
        println!("{}", "=".repeat(70));
        for step in &self.steps {
            let status = if step.success { "✅" } else { "❌" };
            println!("{} {:.<40} {}", status, step.name, step.notes);
        }
        println!("{}", "=".repeat(70));

        println!(
            "\n🖼️  Images: {} generated, {} failed, {} planned",
            self.images.succeeded(),
            self.images.failed(),
            self.planned_images
        );
        for failure in &self.images.failures {
            println!("   ❌ {}: {}", failure.label, failure.reason);
        }

        println!(
            "\n💰 Estimated Cost ({} mode): ~${:.2} planned, ~${:.2} spent",
            self.mode,
            self.planned_cost(),
            self.images.estimated_cost()
        );

        println!("\n📁 Output Locations:");
        for dir in ["colors", "templates", VISUALS_DIR, MASCOT_DIR] {
            println!("   • {}/{}/", self.output_root, dir);
        }
    }
}

/// Reads the answer from stdin; only "y" or "yes" proceeds.
pub struct StdinConfirm;

impl Confirm for StdinConfirm {
    fn confirm(&self, question: &str) -> bool {
        print!("{}: ", question);
        if std::io::stdout().flush().is_err() {
            return false;
        }

        let mut answer = String::new();
        match std::io::stdin().lock().read_line(&mut answer) {
            Ok(_) => matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"),
            Err(e) => {
                tracing::warn!("Could not read confirmation: {}", e);
                false
            }
        }
    }
}

/// Fixed answer, for `--yes` and tests.
pub struct AutoConfirm(pub bool);

impl Confirm for AutoConfirm {
    fn confirm(&self, _question: &str) -> bool {
        self.0
    }
}

/// Runs every generator in a fixed order: palette deck, template deck, visual assets, mascot,
/// then the manual-workflow notes.
pub struct Orchestrator<'a, G: ImageGenerator, S: Storage, C: Confirm> {
    generator: &'a G,
    storage: &'a S,
    confirm: &'a C,
    settings: &'a ImageApiSettings,
    generated_on: NaiveDate,
    monitor: Option<&'a RunMonitor>,
}

impl<'a, G: ImageGenerator, S: Storage, C: Confirm> Orchestrator<'a, G, S, C> {
    pub fn new(
        generator: &'a G,
        storage: &'a S,
        confirm: &'a C,
        settings: &'a ImageApiSettings,
        generated_on: NaiveDate,
    ) -> Self {
        Self {
            generator,
            storage,
            confirm,
            settings,
            generated_on,
            monitor: None,
        }
    }

    /// Samples `monitor` after each generator step.
    pub fn with_monitor(mut self, monitor: &'a RunMonitor) -> Self {
        self.monitor = Some(monitor);
        self
    }

    fn sample(&self, step: &str) {
        if let Some(monitor) = self.monitor {
            monitor.log_stats(step);
        }
    }

    pub async fn run(&self, mode: RunMode, output_root: &str) -> RunSummary {
        let plan = RunPlan::new(mode, self.settings);
        tracing::info!(
            "Starting {} run: {} images planned",
            mode,
            plan.planned_images()
        );

        let mut steps = Vec::new();
        let mut images = BatchReport::new(self.settings.cost_per_image);

        banner("Color Palette");
        steps.push(self.color_palette_step().await);
        self.sample("Color Palette");

        banner("PowerPoint Templates");
        steps.push(self.templates_step().await);
        self.sample("PowerPoint Templates");

        banner("Visual Assets");
        steps.push(
            self.image_step("Visual Assets", "images", &plan.visual_jobs, mode, &mut images)
                .await,
        );
        self.sample("Visual Assets");

        banner("Mascot Variations");
        steps.push(
            self.image_step("Mascot Variations", "poses", &plan.mascot_jobs, mode, &mut images)
                .await,
        );
        self.sample("Mascot Variations");

        for (name, notes) in MANUAL_STEPS {
            println!("\n📦 {}: {}", name, notes);
            steps.push(StepOutcome::new(name, true, notes));
        }

        RunSummary {
            mode,
            steps,
            images,
            planned_images: plan.planned_images(),
            output_root: output_root.to_string(),
        }
    }

    async fn color_palette_step(&self) -> StepOutcome {
        const NAME: &str = "Color Palette";
        let deck = color_palette::build_color_palette(self.generated_on);
        let properties = color_palette::document_properties();

        match save_presentation(self.storage, COLOR_PALETTE_FILE, &deck, &properties).await {
            Ok(location) => {
                println!("  └─ ✅ Saved to: {}", location);
                StepOutcome::new(NAME, true, format!("{} slides", deck.slides.len()))
            }
            Err(e) => {
                tracing::error!("Color palette deck failed: {}", e);
                println!("  └─ ❌ {}", e.user_friendly_message());
                StepOutcome::new(NAME, false, e.to_string())
            }
        }
    }

    async fn templates_step(&self) -> StepOutcome {
        const NAME: &str = "PowerPoint Templates";
        let deck = templates::build_templates();
        let properties = templates::document_properties();

        match save_presentation(self.storage, TEMPLATES_FILE, &deck, &properties).await {
            Ok(location) => {
                println!("  └─ ✅ Saved to: {}", location);
                StepOutcome::new(NAME, true, format!("{} templates", deck.slides.len()))
            }
            Err(e) => {
                tracing::error!("Template deck failed: {}", e);
                println!("  └─ ❌ {}", e.user_friendly_message());
                StepOutcome::new(NAME, false, e.to_string())
            }
        }
    }

    async fn image_step(
        &self,
        name: &str,
        unit: &str,
        jobs: &[ImageJob],
        mode: RunMode,
        images: &mut BatchReport,
    ) -> StepOutcome {
        println!(
            "🎨 {}: {} {} (~${:.2})",
            name,
            jobs.len(),
            unit,
            jobs.len() as f64 * self.settings.cost_per_image
        );

        if mode.confirms_paid_steps() && !self.confirm.confirm(CONFIRM_QUESTION) {
            println!("⏭️  Skipped {}", name.to_lowercase());
            tracing::info!("{} skipped by user", name);
            return StepOutcome::new(name, false, "Skipped by user");
        }

        let report = BatchRunner::new(self.generator, self.storage, self.settings.cost_per_image)
            .run(jobs)
            .await;

        let prefix = match mode {
            RunMode::Demo => "Demo: ",
            RunMode::Full => "",
        };
        let notes = format!(
            "{}{}/{} {}",
            prefix,
            report.succeeded(),
            report.attempted,
            unit
        );
        let success = report.failed() == 0;
        images.merge(report);

        StepOutcome::new(name, success, notes)
    }
}

fn banner(title: &str) {
    println!("\n{}", "=".repeat(60));
    println!("🚀 Running: {}", title);
    println!("{}", "=".repeat(60));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::ImageRequest;
    use crate::utils::error::{GenerationError, Result};
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use tokio::sync::Mutex;

    #[derive(Clone, Default)]
    struct MockStorage {
        files: Arc<Mutex<HashMap<String, Vec<u8>>>>,
    }

    impl MockStorage {
        async fn paths(&self) -> Vec<String> {
            let mut paths: Vec<String> = self.files.lock().await.keys().cloned().collect();
            paths.sort();
            paths
        }
    }

    impl Storage for MockStorage {
        async fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
            let mut files = self.files.lock().await;
            files.insert(path.to_string(), data.to_vec());
            Ok(())
        }

        fn describe(&self, path: &str) -> String {
            format!("mock://{}", path)
        }
    }

    #[derive(Default)]
    struct CountingGenerator {
        calls: AtomicUsize,
        fail_every: Option<usize>,
    }

    #[async_trait]
    impl ImageGenerator for CountingGenerator {
        async fn generate(
            &self,
            _request: &ImageRequest,
        ) -> std::result::Result<Vec<u8>, GenerationError> {
            let n = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
            match self.fail_every {
                Some(every) if n % every == 0 => Err(GenerationError::MissingChoices),
                _ => Ok(vec![0x89, b'P', b'N', b'G']),
            }
        }
    }

    /// Answers from a script and remembers how often it was asked.
    struct ScriptedConfirm {
        answers: std::sync::Mutex<Vec<bool>>,
        asked: AtomicUsize,
    }

    impl ScriptedConfirm {
        fn new(answers: &[bool]) -> Self {
            Self {
                answers: std::sync::Mutex::new(answers.iter().rev().copied().collect()),
                asked: AtomicUsize::new(0),
            }
        }
    }

    impl Confirm for ScriptedConfirm {
        fn confirm(&self, question: &str) -> bool {
            assert_eq!(question, "Continue? (y/n)");
            self.asked.fetch_add(1, Ordering::SeqCst);
            self.answers
                .lock()
                .map(|mut answers| answers.pop().unwrap_or(false))
                .unwrap_or(false)
        }
    }

    fn generated_on() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, 15).unwrap()
    }

    #[test]
    fn test_plan_counts_per_mode() {
        let settings = ImageApiSettings::default();

        let demo = RunPlan::new(RunMode::Demo, &settings);
        assert_eq!(demo.visual_jobs.len(), 8);
        assert_eq!(demo.mascot_jobs.len(), 5);
        assert!((demo.estimated_cost() - 13.0 * 0.039).abs() < 1e-9);

        let full = RunPlan::new(RunMode::Full, &settings);
        assert_eq!(full.visual_jobs.len(), 20);
        assert_eq!(full.mascot_jobs.len(), 10);
        assert_eq!(full.planned_images(), 30);
    }

    #[test]
    fn test_run_mode_display_and_default() {
        assert_eq!(RunMode::default(), RunMode::Demo);
        assert_eq!(RunMode::Demo.to_string(), "demo");
        assert_eq!(RunMode::Full.to_string(), "full");
        assert!(!RunMode::Demo.confirms_paid_steps());
    }

    #[tokio::test]
    async fn test_demo_run_never_prompts() {
        let settings = ImageApiSettings::default();
        let generator = CountingGenerator::default();
        let storage = MockStorage::default();
        let confirm = ScriptedConfirm::new(&[]);

        let summary = Orchestrator::new(&generator, &storage, &confirm, &settings, generated_on())
            .run(RunMode::Demo, "assets")
            .await;

        assert_eq!(confirm.asked.load(Ordering::SeqCst), 0);
        assert_eq!(generator.calls.load(Ordering::SeqCst), 13);
        assert_eq!(summary.images.succeeded(), 13);
        assert_eq!(summary.planned_images, 13);
        assert!(summary.all_succeeded());

        let names: Vec<&str> = summary.steps.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "Color Palette",
                "PowerPoint Templates",
                "Visual Assets",
                "Mascot Variations",
                "TPT Covers",
                "Graphic Library",
                "Style Guide PDF",
            ]
        );
        assert_eq!(summary.step("Visual Assets").unwrap().notes, "Demo: 8/8 images");

        let paths = storage.paths().await;
        assert_eq!(paths.len(), 15);
        assert!(paths.contains(&COLOR_PALETTE_FILE.to_string()));
        assert!(paths.contains(&TEMPLATES_FILE.to_string()));
        assert!(paths.contains(&"mascot/micro_mayhem_thinking_hand_on_chin.png".to_string()));
    }

    #[cfg(feature = "cli")]
    #[tokio::test]
    async fn test_attached_monitor_is_sampled_after_each_step() {
        let settings = ImageApiSettings::default();
        let generator = CountingGenerator::default();
        let storage = MockStorage::default();
        let monitor = RunMonitor::new(true);

        Orchestrator::new(&generator, &storage, &AutoConfirm(true), &settings, generated_on())
            .with_monitor(&monitor)
            .run(RunMode::Demo, "assets")
            .await;

        assert_eq!(monitor.samples(), 4);
    }

    #[tokio::test]
    async fn test_full_run_declined_steps_make_no_calls() {
        let settings = ImageApiSettings::default();
        let generator = CountingGenerator::default();
        let storage = MockStorage::default();
        let confirm = ScriptedConfirm::new(&[false, false]);

        let summary = Orchestrator::new(&generator, &storage, &confirm, &settings, generated_on())
            .run(RunMode::Full, "assets")
            .await;

        assert_eq!(confirm.asked.load(Ordering::SeqCst), 2);
        assert_eq!(generator.calls.load(Ordering::SeqCst), 0);

        let visuals = summary.step("Visual Assets").unwrap();
        assert!(!visuals.success);
        assert_eq!(visuals.notes, "Skipped by user");
        assert_eq!(summary.step("Mascot Variations").unwrap().notes, "Skipped by user");

        // decks are free and always written
        assert_eq!(storage.paths().await.len(), 2);
        assert_eq!(summary.planned_images, 30);
        assert_eq!(summary.images.estimated_cost(), 0.0);
    }

    #[tokio::test]
    async fn test_full_run_confirms_each_paid_step_separately() {
        let settings = ImageApiSettings::default();
        let generator = CountingGenerator::default();
        let storage = MockStorage::default();
        let confirm = ScriptedConfirm::new(&[true, false]);

        let summary = Orchestrator::new(&generator, &storage, &confirm, &settings, generated_on())
            .run(RunMode::Full, "assets")
            .await;

        assert_eq!(generator.calls.load(Ordering::SeqCst), 20);
        assert_eq!(summary.step("Visual Assets").unwrap().notes, "20/20 images");
        assert!(!summary.step("Mascot Variations").unwrap().success);
        assert!(!summary.all_succeeded());
    }

    #[tokio::test]
    async fn test_failed_images_are_counted_and_the_run_continues() {
        let settings = ImageApiSettings::default();
        let generator = CountingGenerator {
            fail_every: Some(4),
            ..CountingGenerator::default()
        };
        let storage = MockStorage::default();
        let confirm = AutoConfirm(true);

        let summary = Orchestrator::new(&generator, &storage, &confirm, &settings, generated_on())
            .run(RunMode::Demo, "assets")
            .await;

        assert_eq!(generator.calls.load(Ordering::SeqCst), 13);
        assert_eq!(summary.images.failed(), 3);
        assert_eq!(summary.images.succeeded(), 10);
        assert_eq!(summary.step("Visual Assets").unwrap().notes, "Demo: 6/8 images");
        assert!(!summary.step("Visual Assets").unwrap().success);
        assert!(summary.step("Style Guide PDF").unwrap().success);
        assert!((summary.planned_cost() - 13.0 * 0.039).abs() < 1e-9);
    }
}
