use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

pub const DEFAULT_LOG_LEVEL: &str = "info,tower_http=info";

#[derive(Parser, Debug)]
#[command(name = "textlens", version, about = "Text analysis service: sentiment, entities, emotions and summaries")]
pub struct Cli {
    /// Log filter used when RUST_LOG is not set.
    #[arg(long, global = true, default_value = DEFAULT_LOG_LEVEL)]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the HTTP server (default).
    Serve(ServeArgs),
    /// Analyze a single text or file and print the result.
    Analyze {
        #[arg(short, long, conflicts_with = "file", required_unless_present = "file")]
        text: Option<String>,
        #[arg(short, long)]
        file: Option<PathBuf>,
        /// Print a colored report instead of JSON.
        #[arg(long)]
        report: bool,
        #[arg(long)]
        pretty: bool,
        #[command(flatten)]
        model: ModelArgs,
    },
    /// Analyze every text document under a directory.
    Batch {
        #[arg(short, long)]
        dir: PathBuf,
        #[arg(short, long, default_value = "textlens_results.json")]
        out: PathBuf,
        #[command(flatten)]
        model: ModelArgs,
    },
}

#[derive(Args, Debug, Clone)]
pub struct ServeArgs {
    #[arg(long, env = "TEXTLENS_HOST", default_value = "127.0.0.1")]
    pub host: String,
    #[arg(short, long, env = "TEXTLENS_PORT", default_value_t = 5000)]
    pub port: u16,
    #[command(flatten)]
    pub model: ModelArgs,
}

#[derive(Args, Debug, Clone, Default)]
pub struct ModelArgs {
    /// JSON model file overriding stop words and gazetteers.
    #[arg(short, long = "model", env = "TEXTLENS_MODEL")]
    pub model_path: Option<PathBuf>,
    /// Start without a language model; NER and summarization are disabled.
    #[arg(long)]
    pub no_model: bool,
}

// Lets `serve` defaults (including env overrides) apply when no subcommand is given.
#[derive(Parser)]
struct DefaultServe {
    #[command(flatten)]
    args: ServeArgs,
}

impl Cli {
    /// The subcommand to run; `serve` when none is given.
    pub fn command(self) -> Commands {
        self.command
            .unwrap_or_else(|| Commands::Serve(DefaultServe::parse_from(["textlens"]).args))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_subcommand_defaults_to_serve() {
        let cli = Cli::parse_from(["textlens"]);
        assert_eq!(cli.log_level, DEFAULT_LOG_LEVEL);
        match cli.command() {
            Commands::Serve(args) => {
                assert_eq!(args.port, 5000);
                assert!(!args.model.no_model);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_serve_args() {
        let cli = Cli::parse_from(["textlens", "serve", "--port", "8080", "--host", "0.0.0.0", "--no-model"]);
        match cli.command() {
            Commands::Serve(args) => {
                assert_eq!(args.port, 8080);
                assert_eq!(args.host, "0.0.0.0");
                assert!(args.model.no_model);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_analyze_requires_text_or_file() {
        assert!(Cli::try_parse_from(["textlens", "analyze"]).is_err());
        assert!(Cli::try_parse_from(["textlens", "analyze", "--text", "a", "--file", "b.txt"]).is_err());
        assert!(Cli::try_parse_from(["textlens", "analyze", "--text", "hello"]).is_ok());
    }

    #[test]
    fn test_batch_default_out() {
        let cli = Cli::parse_from(["textlens", "batch", "--dir", "docs"]);
        match cli.command() {
            Commands::Batch { dir, out, .. } => {
                assert_eq!(dir, PathBuf::from("docs"));
                assert_eq!(out, PathBuf::from("textlens_results.json"));
            }
            other => panic!("unexpected command {:?}", other),
        }
    }
}
