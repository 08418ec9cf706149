use std::sync::Arc;

use anyhow::{ anyhow, Result };
use clap::Parser;
use log::{ error, info, warn };

use qaforge::{
    CancellationToken,
    ErrorSeverity,
    EvaluationRequest,
    Gateways,
    LexicalIndex,
    LlmClient,
    LlmJudge,
    Orchestrator,
    QaConfig,
    QaError,
    ReferenceContext,
};

mod cli;
use cli::{ ui, Commands, QaCli };

#[tokio::main]
async fn main() -> Result<()> {
    let cli = QaCli::parse();

    setup_logging(&cli.log_level);

    if let Err(e) = dotenv::dotenv() {
        info!("No .env file loaded: {}", e);
    }

    let mut config = match &cli.config {
        Some(path) => QaConfig::from_file(path)?,
        None => QaConfig::default(),
    };
    if let Some(corpus) = &cli.corpus {
        config.corpus_path = Some(corpus.clone());
    }

    let cancel = CancellationToken::new();
    let on_interrupt = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Interrupt received, cancelling at the next gateway call");
            on_interrupt.cancel();
        }
    });

    let succeeded = match run(&cli, config, &cancel).await {
        Ok(ok) => ok,
        Err(e) => {
            report_error(&e);
            false
        }
    };

    if !succeeded {
        std::process::exit(1);
    }
    Ok(())
}

async fn run(cli: &QaCli, mut config: QaConfig, cancel: &CancellationToken) -> Result<bool> {
    if let Commands::Health = &cli.command {
        let client = LlmClient::from_config(&config)?;
        return cli::commands::health::execute(&client).await;
    }
    if let Commands::Batch { retrieved_context: true, .. } = &cli.command {
        config.engine.reference_context = ReferenceContext::Retrieved;
    }

    let system = build_system(&config)?;
    let format = cli.output_format;

    match &cli.command {
        Commands::Generate { query } => {
            let query = match query {
                Some(q) => q.clone(),
                None => ui::prompt_text("Enter a requirement to generate a test case")?,
            };
            cli::commands::generate::execute(&system, &query, format, cancel).await?;
            Ok(true)
        }

        Commands::Review { requirement } => {
            let requirement = match requirement {
                Some(r) => r.clone(),
                None => ui::prompt_text("Enter a requirement to plan tests for")?,
            };
            cli::commands::review::execute(&system, &requirement, format, cancel).await?;
            Ok(true)
        }

        Commands::Evaluate { query, context, output, all_metrics, threshold } => {
            let threshold = threshold.unwrap_or(system.options().threshold);
            let request = if *all_metrics {
                EvaluationRequest::all_metrics(threshold)
            } else {
                EvaluationRequest::faithfulness_only(threshold)
            };
            cli::commands::evaluate::execute(&system, query, context, output, &request, format).await?;
            Ok(true)
        }

        Commands::Batch { scenarios, .. } => {
            cli::commands::batch::execute(&system, scenarios.as_deref(), format, cancel).await
        }

        Commands::Health => Err(anyhow!("health is handled before the engine is built")),
    }
}

fn build_system(config: &QaConfig) -> Result<Orchestrator> {
    let inference = Arc::new(LlmClient::from_config(config)?);
    let judge_client = Arc::new(LlmClient::judge_from_config(config)?);
    let retrieval = match &config.corpus_path {
        Some(path) => LexicalIndex::from_yaml_file(path)?,
        None => LexicalIndex::seeded(),
    };

    let gateways = Gateways {
        inference,
        retrieval: Arc::new(retrieval),
        evaluation: Arc::new(LlmJudge::new(judge_client, config)?),
    };
    Ok(Orchestrator::new(config, gateways)?)
}

fn report_error(e: &anyhow::Error) {
    let Some(qa) = e.downcast_ref::<QaError>() else {
        error!("{}", e);
        ui::print_error(&e.to_string());
        return;
    };

    let ctx = qa.context();
    match ctx.severity {
        ErrorSeverity::Info => {
            info!("{}", qa);
            ui::print_info(&qa.to_string());
        }
        ErrorSeverity::Warning => {
            warn!("{}", qa);
            ui::print_warning(&qa.to_string());
        }
        ErrorSeverity::Error | ErrorSeverity::Fatal => {
            error!("{}", qa);
            ui::print_error(&qa.to_string());
        }
    }
    if let Some(stage) = ctx.stage {
        ui::print_result("Stage", &stage);
    }
    if let Some(suggestion) = ctx.suggestion {
        ui::print_info(&suggestion);
    }
}

fn setup_logging(log_level: &str) {
    let level = match log_level.to_lowercase().as_str() {
        "trace" => log::LevelFilter::Trace,
        "debug" => log::LevelFilter::Debug,
        "info" => log::LevelFilter::Info,
        "warn" => log::LevelFilter::Warn,
        "error" => log::LevelFilter::Error,
        _ => log::LevelFilter::Info,
    };

    env_logger::Builder::new().filter_level(level).init();

    info!("Logger initialized with level: {}", log_level);
}
