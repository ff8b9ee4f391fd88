use brand_assets::domain::brand::TEMPLATES_FILE;
use brand_assets::slides::pptx::save_presentation;
use brand_assets::slides::templates::{build_templates, document_properties, TEMPLATE_NAMES};
use brand_assets::utils::logger;
use brand_assets::{AppConfig, LocalStorage, Result};
use clap::Parser;

#[derive(Parser)]
#[command(name = "ppt-templates")]
#[command(about = "Generate the branded ModelIt K12 presentation templates")]
struct Args {
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
    let storage = LocalStorage::new(config.output_root());

    println!("\n📊 Generating ModelIt K12 PowerPoint Templates...");
    for name in TEMPLATE_NAMES {
        println!("  ├─ Creating {} template...", name);
    }
    let deck = build_templates();
    let location =
        save_presentation(&storage, TEMPLATES_FILE, &deck, &document_properties()).await?;
    tracing::info!("Template deck written to {}", location);

    println!("  └─ ✅ Saved to: {}", location);
    println!("\n📊 PowerPoint Templates Complete!");
    println!("   • {} template slides", deck.slides.len());
    println!("   • Branded colors and fonts");
    println!("   • Ready for conference/webinar use");
    Ok(())
}
