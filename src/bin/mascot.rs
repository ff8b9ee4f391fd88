use brand_assets::core::jobs::mascot_jobs;
use brand_assets::domain::brand::{MASCOT_DIR, MASCOT_INFO, MASCOT_KEY_POSES};
use brand_assets::utils::logger;
use brand_assets::{AppConfig, BatchRunner, ImageClient, LocalStorage, Result};
use clap::Parser;

#[derive(Parser)]
#[command(name = "mascot")]
#[command(about = "Generate Micro Mayhem mascot poses through the OpenRouter image API")]
struct Args {
    /// Render all ten poses instead of the five key poses
    #[arg(long)]
    all: bool,

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

    let count = if args.all {
        MASCOT_INFO.poses.len()
    } else {
        MASCOT_KEY_POSES
    };
    let jobs = mascot_jobs(&MASCOT_INFO.poses[..count], settings);

    println!("\n🎭 Generating Micro Mayhem Mascot Variations...");
    println!("   Character: {}", MASCOT_INFO.name);
    println!("   Model: {}", settings.model);

    let report = BatchRunner::new(&client, &storage, settings.cost_per_image)
        .run(&jobs)
        .await;

    println!("\n📊 Mascot Generation Complete!");
    println!("   ✅ Generated: {}/{} poses", report.succeeded(), jobs.len());
    println!("   💰 Total cost: ${:.2}", report.estimated_cost());
    println!("   📁 Location: {}", storage.full_path(MASCOT_DIR).display());
    Ok(())
}
