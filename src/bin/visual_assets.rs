use brand_assets::core::jobs::visual_asset_jobs;
use brand_assets::domain::brand::VISUALS_DIR;
use brand_assets::domain::catalog;
use brand_assets::domain::model::BatchReport;
use brand_assets::utils::logger;
use brand_assets::{AppConfig, BatchRunner, ImageClient, LocalStorage, Result};
use clap::Parser;

const DEMO_MAX_PER_CATEGORY: usize = 2;

#[derive(Parser)]
#[command(name = "visual-assets")]
#[command(about = "Generate ModelIt K12 illustrations through the OpenRouter image API")]
struct Args {
    /// Comma-separated categories (default: all, 2 each)
    categories: Option<String>,

    /// Images per category (default or 0: all in the named categories)
    max_per_category: Option<usize>,

    /// Path to a TOML configuration file
    #[arg(short, long)]
    config: Option<String>,

    /// Override the output root from the configuration
    #[arg(long)]
    output_dir: Option<String>,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

impl Args {
    fn selection(&self) -> (Vec<String>, Option<usize>) {
        match &self.categories {
            Some(list) => (
                list.split(',')
                    .map(|name| name.trim().to_string())
                    .filter(|name| !name.is_empty())
                    .collect(),
                self.max_per_category,
            ),
            None => (
                catalog::category_names()
                    .into_iter()
                    .map(str::to_string)
                    .collect(),
                Some(DEMO_MAX_PER_CATEGORY),
            ),
        }
    }
}

#[tokio::main]
async fn main() {
    let args = Args::parse();
    logger::init_cli_logger(args.verbose);

    if let Err(e) = run(&args).await {
        e.report();
        std::process::exit(e.exit_code());
    }
}

async fn run(args: &Args) -> Result<()> {
    let config = AppConfig::load_validated(args.config.as_deref(), args.output_dir.as_deref())?;
    let settings = &config.image_api;
    let client = ImageClient::from_env(settings.clone())?;
    let storage = LocalStorage::new(config.output_root());
    let runner = BatchRunner::new(&client, &storage, settings.cost_per_image);

    println!("\n🎨 Generating ModelIt K12 Visual Assets with Nano Banana...");
    println!("   Model: {}", settings.model);
    println!("   Cost per image: ${}", settings.cost_per_image);

    let (categories, max_per_category) = args.selection();
    let mut report = BatchReport::new(settings.cost_per_image);

    for category in &categories {
        let jobs = visual_asset_jobs(std::slice::from_ref(category), max_per_category, settings);
        if jobs.is_empty() {
            continue;
        }

        println!("\n📁 Category: {}", catalog::display_name(category));
        println!("   Generating {} images...", jobs.len());
        report.merge(runner.run(&jobs).await);
    }

    println!("\n{}", "=".repeat(60));
    println!("📊 Visual Assets Generation Complete!");
    println!("   ✅ Successfully generated: {} images", report.succeeded());
    if report.failed() > 0 {
        println!("   ❌ Failed: {} images", report.failed());
    }
    println!("   💰 Total cost: ${:.2}", report.estimated_cost());
    println!("   📁 Location: {}", storage.full_path(VISUALS_DIR).display());
    println!("{}", "=".repeat(60));
    Ok(())
}
