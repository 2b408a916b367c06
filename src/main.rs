use chrono::{DateTime, Utc};
use clap::Parser;
use mu_sparql_helpers::config::cli::{CliArgs, Command};
use mu_sparql_helpers::core::headers::inbound_headers;
use mu_sparql_helpers::utils::error::{ErrorSeverity, MuError};
use mu_sparql_helpers::utils::id::generate_uuid_v4;
use mu_sparql_helpers::utils::logger;
use mu_sparql_helpers::utils::validation::Validate;
use mu_sparql_helpers::{generate_uuid, update_modified, ConfigProvider, MuConfig, SparqlClient};

async fn run(args: CliArgs, config: MuConfig) -> mu_sparql_helpers::Result<()> {
    let inbound = inbound_headers(args.header_pairs())?;
    let inbound = (!inbound.is_empty()).then_some(&inbound);

    match args.command {
        Command::Uuid { random } => {
            println!("{}", if random { generate_uuid_v4() } else { generate_uuid() });
        }
        Command::Query { statement } => {
            let client = SparqlClient::new(&config)?;
            let results = client.query(&statement, inbound).await?;
            println!("{}", serde_json::to_string_pretty(&results)?);
        }
        Command::Update { statement } => {
            let client = SparqlClient::new(&config)?;
            if client.update(&statement, inbound).await? {
                println!("✅ Update executed");
            } else {
                println!("⚠️  Not an update statement, nothing sent");
            }
        }
        Command::Touch { subject, at } => {
            let at = at
                .map(|raw| {
                    DateTime::parse_from_rfc3339(&raw)
                        .map(|dt| dt.with_timezone(&Utc))
                        .map_err(|e| MuError::InvalidConfigValueError {
                            field: "--at".to_string(),
                            value: raw.clone(),
                            reason: e.to_string(),
                        })
                })
                .transpose()?;
            let client = SparqlClient::new(&config)?;
            let written =
                update_modified(&client, config.application_graph(), &subject, at, inbound)
                    .await?;
            println!("✅ {} modified at {}", subject, written.to_rfc3339());
        }
    }

    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = CliArgs::parse();

    let config = match MuConfig::from_env().and_then(|c| c.validate().map(|_| c)) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Configuration validation failed: {}", e);
            eprintln!("💡 Suggestion: {}", e.recovery_suggestion());
            std::process::exit(1);
        }
    };

    // 日誌目錄不可寫時退回只輸出到 stdout
    if let Err(e) = logger::init_logger(&config, args.verbose) {
        eprintln!("⚠️  {}", e);
        let console_only = MuConfig {
            log_dir: None,
            ..config.clone()
        };
        logger::init_logger(&console_only, args.verbose)?;
    }

    tracing::info!("Starting mu-sparql");
    if args.verbose {
        tracing::debug!("Config: {:?}", config);
    }

    if let Err(e) = run(args, config).await {
        tracing::error!(
            "❌ mu-sparql failed: {} (Severity: {:?})",
            e,
            e.severity()
        );
        eprintln!("❌ {}", e);
        eprintln!("💡 {}", e.recovery_suggestion());

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

    Ok(())
}
