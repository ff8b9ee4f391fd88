use brand_assets::domain::brand::{BRAND_COLORS, COLOR_PALETTE_FILE};
use brand_assets::slides::color_palette::{build_color_palette, document_properties};
use brand_assets::slides::pptx::save_presentation;
use brand_assets::utils::logger;
use brand_assets::{AppConfig, LocalStorage, Result};
use clap::Parser;

#[derive(Parser)]
#[command(name = "color-palette")]
#[command(about = "Generate the ModelIt K12 brand color palette deck")]
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

    println!("🎨 Generating ModelIt K12 Color Palette...");
    let deck = build_color_palette(chrono::Local::now().date_naive());
    let location =
        save_presentation(&storage, COLOR_PALETTE_FILE, &deck, &document_properties()).await?;
    tracing::info!("Color palette deck written to {}", location);

    println!("  └─ ✅ Saved to: {}", location);
    println!("\n📊 Color Palette Complete!");
    println!("   • {} brand colors defined", BRAND_COLORS.len());
    println!("   • {} slides generated", deck.slides.len());
    println!("   • HEX, RGB, and CMYK codes included");
    println!("   • Usage examples provided");
    Ok(())
}
