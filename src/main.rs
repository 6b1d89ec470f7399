use anyhow::Context;
use batchmate_lookup::app::render::render;
use batchmate_lookup::core::ConfigProvider;
use batchmate_lookup::utils::error::{ErrorSeverity, LookupError};
use batchmate_lookup::utils::{logger, validation::Validate};
use batchmate_lookup::{CliConfig, LocalDirectory, LookupService, OutputFormat, TomlConfig};
use clap::Parser;
use std::io::{self, BufRead, Write};

fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    if cli.log_json {
        logger::init_json_logger(cli.verbose);
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::info!("Starting batchmate-lookup");
    tracing::debug!("CLI config: {:?}", cli);

    let exit_code = match &cli.config {
        Some(path) => {
            tracing::info!("📁 Loading configuration from: {}", path);
            let mut config = TomlConfig::from_file(path)
                .with_context(|| format!("Failed to load config file '{}'", path))?;
            config.apply_cli_overrides(&cli);

            if let Err(e) = config.validate() {
                tracing::error!("❌ Configuration validation failed: {}", e);
                tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
                eprintln!("❌ {}", e.user_friendly_message());
                std::process::exit(1);
            }
            run(config, &cli)?
        }
        None => run(cli.clone(), &cli)?,
    };

    if exit_code > 0 {
        std::process::exit(exit_code);
    }
    Ok(())
}

fn run<P: ConfigProvider>(config: P, cli: &CliConfig) -> anyhow::Result<i32> {
    let catalog = LocalDirectory::new(config.data_dir());
    let service = LookupService::new(catalog, config);

    match &cli.erp_id {
        Some(input) => Ok(lookup_once(&service, input, cli.format)),
        None => {
            interactive(&service, cli.format).context("Failed to read from the terminal")?;
            Ok(0)
        }
    }
}

fn exit_code(e: &LookupError) -> i32 {
    match e.severity() {
        ErrorSeverity::Low => 0,
        ErrorSeverity::Medium => 2,
        ErrorSeverity::High => 1,
        ErrorSeverity::Critical => 3,
    }
}

fn lookup_once<P: ConfigProvider>(
    service: &LookupService<LocalDirectory, P>,
    input: &str,
    format: OutputFormat,
) -> i32 {
    match service.lookup(input) {
        Ok(report) => {
            println!("{}", render(&report, service.config().title(), format));
            0
        }
        Err(e) => {
            tracing::warn!("Rejected input {:?}: {} ({:?})", input, e, e.category());
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());
            exit_code(&e)
        }
    }
}

fn interactive<P: ConfigProvider>(
    service: &LookupService<LocalDirectory, P>,
    format: OutputFormat,
) -> io::Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();

    loop {
        print!("Enter your ERP ID: ");
        stdout.flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }

        let input = line.trim();
        if input.is_empty() || input.eq_ignore_ascii_case("quit") || input.eq_ignore_ascii_case("exit") {
            break;
        }
        lookup_once(service, input, format);
    }

    Ok(())
}
