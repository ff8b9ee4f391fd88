use brand_assets::core::orchestrator::{AutoConfirm, RunPlan, StdinConfirm};
use brand_assets::domain::ports::Confirm;
use brand_assets::utils::{logger, monitor::RunMonitor};
use brand_assets::{AppConfig, CliConfig, ImageClient, LocalStorage, Orchestrator, RunSummary};
use clap::Parser;

#[tokio::main]
async fn main() {
    let cli = CliConfig::parse();

    logger::init(cli.verbose, cli.json_logs);

    tracing::info!("Starting brand-assets ({} mode)", cli.mode);
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    let config = match cli.app_config() {
        Ok(config) => config,
        Err(e) => {
            e.report();
            std::process::exit(e.exit_code());
        }
    };

    tracing::info!("✅ Configuration loaded and validated");

    println!("\n{}", "=".repeat(70));
    println!("🎨 MODELIT K12 BRAND IDENTITY - COMPLETE AUTOMATION");
    println!("{}", "=".repeat(70));
    println!("Mode: {}", cli.mode.to_string().to_uppercase());
    println!("Started: {}", chrono::Local::now().format("%Y-%m-%d %H:%M:%S"));
    println!("{}", "=".repeat(70));

    let plan = RunPlan::new(cli.mode, &config.image_api);
    if cli.dry_run {
        plan.print(config.output_root());
        println!("\n🧪 Dry run: no API calls made, no files written");
        return;
    }

    // The key must resolve before anything touches the network.
    let client = match ImageClient::from_env(config.image_api.clone()) {
        Ok(client) => client,
        Err(e) => {
            e.report();
            std::process::exit(e.exit_code());
        }
    };

    let monitor = RunMonitor::new(cli.monitor);
    if monitor.is_enabled() {
        tracing::info!("🔍 System monitoring enabled");
        monitor.log_stats("startup");
    }

    let storage = LocalStorage::new(config.output_root());
    let summary = if cli.yes {
        run(&client, &storage, &AutoConfirm(true), &monitor, &config, &cli).await
    } else {
        run(&client, &storage, &StdinConfirm, &monitor, &config, &cli).await
    };

    monitor.log_final_stats();
    summary.print();

    if summary.all_succeeded() {
        tracing::info!("✅ Brand identity package ready");
        println!("\n✅ Brand Identity Package Ready!");
    } else {
        tracing::warn!("Some steps were skipped or failed");
        println!("\n⚠️ Brand identity package incomplete, see the summary above");
    }
    println!("Completed: {}", chrono::Local::now().format("%Y-%m-%d %H:%M:%S"));
}

async fn run<C: Confirm>(
    client: &ImageClient,
    storage: &LocalStorage,
    confirm: &C,
    monitor: &RunMonitor,
    config: &AppConfig,
    cli: &CliConfig,
) -> RunSummary {
    let today = chrono::Local::now().date_naive();
    Orchestrator::new(client, storage, confirm, &config.image_api, today)
        .with_monitor(monitor)
        .run(cli.mode, config.output_root())
        .await
}
