use clap::Parser;
use company_roster::utils::error::ErrorSeverity;
use company_roster::utils::{logger, validation::Validate};
use company_roster::{CliConfig, LocalStorage, RosterSession};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = CliConfig::parse();

    // 設定檔與命令列參數合併
    let settings = match config.resolve() {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 建議: {}", e.recovery_suggestion());
            std::process::exit(1);
        }
    };

    // 初始化日誌
    if settings.json_logs {
        logger::init_json_logger(config.verbose, settings.log_level.as_deref());
    } else {
        logger::init_cli_logger(config.verbose, settings.log_level.as_deref());
    }

    tracing::debug!("CLI config: {:?}", config);
    tracing::debug!("Resolved settings: {:?}", settings);

    if let Err(e) = settings.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    let storage = LocalStorage::new(settings.base_path.clone());
    let command = match (&config.command, &settings.report_file) {
        (company_roster::Command::Report { output: None }, Some(file)) => {
            company_roster::Command::Report {
                output: Some(file.clone()),
            }
        }
        (command, _) => command.clone(),
    };
    let session = RosterSession::new(storage, settings);

    match session.run(&command).await {
        Ok(output) => {
            if !output.is_empty() {
                println!("{}", output);
            }
        }
        Err(e) => {
            tracing::error!(
                "❌ Command failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );

            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 建議: {}", e.recovery_suggestion());

            // 根據錯誤嚴重程度決定退出碼
            let exit_code = match e.severity() {
                ErrorSeverity::Medium => 2,
                ErrorSeverity::High => 1,
                ErrorSeverity::Critical => 3,
            };
            std::process::exit(exit_code);
        }
    }

    Ok(())
}
