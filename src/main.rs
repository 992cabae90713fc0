use anyhow::Context;
use clap::Parser;
use meow_etl::config::toml_config::MonitoringConfig;
use meow_etl::domain::ConfigProvider;
use meow_etl::utils::error::ErrorSeverity;
use meow_etl::utils::{logger, validation::Validate};
use meow_etl::{CliConfig, EtlEngine, HttpFactSource, LocalStorage, RunOutcome, TomlConfig};

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    if cli.json_logs {
        logger::init_json_logger(cli.verbose);
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::info!("Starting meow-etl");

    let exit_code = match &cli.config {
        Some(path) => {
            tracing::info!("📁 Loading configuration from: {}", path);
            let mut config = TomlConfig::from_file(path)
                .with_context(|| format!("failed to load config file '{}'", path))?;
            if cli.monitor {
                config.monitoring = Some(MonitoringConfig { enabled: true });
            }
            run(&config).await
        }
        None => run(&cli).await,
    };

    if exit_code > 0 {
        std::process::exit(exit_code);
    }

    Ok(())
}

async fn run<C>(config: &C) -> i32
where
    C: ConfigProvider + Validate + std::fmt::Debug,
{
    tracing::debug!("Config: {:?}", config);

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        return 1;
    }

    let source = match HttpFactSource::from_config(config) {
        Ok(source) => source,
        Err(e) => {
            eprintln!("❌ {}", e.user_friendly_message());
            return 1;
        }
    };
    let storage = LocalStorage::new(config.output_dir());

    if config.monitoring_enabled() {
        tracing::info!("🔍 System monitoring enabled");
    }

    let mut engine = EtlEngine::from_config(source, storage, config);

    match engine.run().await {
        Ok(RunOutcome::Saved {
            path,
            records,
            skipped,
        }) => {
            tracing::info!("✅ Saved {} records ({} skipped) to {}", records, skipped, path);
            println!("✅ Saved {} records to {}", records, path);
            if skipped > 0 {
                println!("⚠️ {} facts could not be fetched and were skipped", skipped);
            }
            0
        }
        Ok(RunOutcome::NothingFetched { count, skipped }) => {
            println!(
                "⚠️ Discovered {} facts but all {} requests failed; no file written",
                count, skipped
            );
            0
        }
        Ok(RunOutcome::Aborted { discovery }) => {
            println!(
                "⚠️ Could not determine the number of facts ({:?}); nothing to extract",
                discovery.stop
            );
            0
        }
        Err(e) => {
            tracing::error!(
                "❌ Extraction failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());

            match e.severity() {
                ErrorSeverity::Low => 0,
                ErrorSeverity::Medium => 2,
                ErrorSeverity::High => 1,
                ErrorSeverity::Critical => 3,
            }
        }
    }
}
