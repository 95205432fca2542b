use births_deaths_dashboard::utils::{logger, validation::Validate};
use births_deaths_dashboard::{server, CliConfig, Dashboard, DashboardError, LocalStorage};
use clap::Parser;

fn exit_with(e: &DashboardError) -> ! {
    tracing::error!(
        "❌ Dashboard failed: {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());
    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());
    std::process::exit(e.exit_code());
}

#[tokio::main]
async fn main() {
    let args = CliConfig::parse();

    // 初始化日誌
    logger::init_logger(args.verbose, args.log_json);

    tracing::info!("🚀 Starting births-deaths-dashboard");
    tracing::debug!("CLI args: {:?}", args);

    let config = match args.resolve() {
        Ok(config) => config,
        Err(e) => exit_with(&e),
    };

    // 驗證配置
    if let Err(e) = config.validate() {
        exit_with(&e);
    }

    // 資料只在啟動時載入一次，失敗即結束
    let storage = LocalStorage::current_dir();
    let dashboard = match Dashboard::load(&storage, &config).await {
        Ok(dashboard) => dashboard,
        Err(e) => exit_with(&e),
    };

    if args.dry_run {
        tracing::info!("🔍 DRY RUN MODE - not starting the server");
        println!("{}", dashboard.summary());
        return;
    }

    if let Err(e) = server::serve(&config, dashboard).await {
        exit_with(&e);
    }
}
