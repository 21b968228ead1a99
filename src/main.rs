use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use textlens::analysis::{AnalysisRequest, Analyzer};
use textlens::batch::{analyze_dir, read_file_content};
use textlens::cli::{Cli, Commands, ModelArgs};
use textlens::nlp::LanguageModel;
use textlens::{report, server};

fn init_logging(default_filter: &str) {
    // Logs go to stderr so `analyze` output on stdout stays clean JSON.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .init();
}

/// Build the language model once. A load failure is logged and the service
/// continues without it.
fn load_model(args: &ModelArgs) -> Option<Arc<LanguageModel>> {
    if args.no_model {
        info!("Language model disabled");
        return None;
    }

    let loaded = match &args.model_path {
        Some(path) => LanguageModel::from_file(path),
        None => LanguageModel::english(),
    };
    match loaded {
        Ok(model) => {
            info!("Language model loaded successfully");
            Some(Arc::new(model))
        }
        Err(e) => {
            error!("Failed to load language model: {:#}", e);
            None
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli.log_level);

    match cli.command() {
        Commands::Serve(args) => {
            let analyzer = Arc::new(Analyzer::new(load_model(&args.model)));
            info!("Starting NLP server v{} on port {}", env!("CARGO_PKG_VERSION"), args.port);
            let runtime = tokio::runtime::Runtime::new().context("failed to start async runtime")?;
            runtime.block_on(server::serve(&args.host, args.port, analyzer))?;
        }
        Commands::Analyze { text, file, report: as_report, pretty, model } => {
            let text = match (text, file) {
                (Some(text), _) => text,
                (None, Some(path)) => read_file_content(&path)?,
                (None, None) => anyhow::bail!("either --text or --file is required"),
            };
            let request = AnalysisRequest::new(text)?;
            let analyzer = Analyzer::new(load_model(&model));
            let result = analyzer.analyze(&request.text);

            if as_report {
                report::print_report(&result)?;
            } else if pretty {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                println!("{}", serde_json::to_string(&result)?);
            }
        }
        Commands::Batch { dir, out, model } => {
            let analyzer = Analyzer::new(load_model(&model));
            analyze_dir(&analyzer, &dir, &out)?;
            println!("Wrote results to {}", out.display());
        }
    }
    Ok(())
}
