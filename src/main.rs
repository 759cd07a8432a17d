use clap::Parser;
use tabular_etl::utils::error::ErrorSeverity;
use tabular_etl::utils::{logger, validation::Validate};
use tabular_etl::{CleaningTransform, CliConfig, EtlEngine, EtlError, Reader, Writer};

#[tokio::main]
async fn main() {
    let config = CliConfig::parse();

    // 初始化日誌
    if config.json_logs {
        logger::init_json_logger(config.verbose);
    } else {
        logger::init_cli_logger(config.verbose);
    }

    tracing::info!("Starting tabular-etl CLI");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    if let Err(e) = run(&config).await {
        tracing::error!(
            "❌ ETL process failed: {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 Suggestion: {}", e.recovery_suggestion());

        let exit_code = match e.severity() {
            ErrorSeverity::Low => 0,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        };
        if exit_code > 0 {
            std::process::exit(exit_code);
        }
    }
}

async fn run(config: &CliConfig) -> Result<(), EtlError> {
    // 驗證配置
    config.validate()?;
    let source = config.source_descriptor()?;
    let sink = config.sink_descriptor()?;

    if config.monitor {
        tracing::info!("🔍 System monitoring enabled");
    }

    let engine = EtlEngine::new_with_monitoring(
        Reader::new(),
        Writer::new(),
        CleaningTransform::title_basics(),
        config.monitor,
    );

    let summary = engine.run(&source, &sink).await?;

    tracing::info!("✅ ETL process completed successfully!");
    println!("✅ ETL process completed successfully!");
    println!(
        "📁 {} rows x {} columns saved to: {}",
        summary.rows_stored,
        summary.columns,
        sink.location()
    );
    println!(
        "Time elapsed: {:.2} seconds.",
        summary.elapsed.as_secs_f64()
    );
    Ok(())
}
