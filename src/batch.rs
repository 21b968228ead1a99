// Document reading and directory batch analysis.
use anyhow::{anyhow, Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use walkdir::WalkDir;

use crate::analysis::{AnalysisRequest, AnalysisResult, Analyzer};

pub const ALLOWED_EXTENSIONS: [&str; 5] = ["txt", "md", "csv", "json", "pdf"];

#[derive(Debug, Serialize, Deserialize)]
pub struct DocumentAnalysis {
    pub path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<AnalysisResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

pub fn read_file_content(path: &Path) -> Result<String> {
    let ext = path.extension().and_then(|s| s.to_str()).unwrap_or("");
    match ext {
        "pdf" => pdf_extract::extract_text(path).map_err(|e| anyhow!("PDF extraction failed: {}", e)),
        "txt" | "md" | "csv" | "json" => {
            fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
        }
        _ => Err(anyhow!("Unsupported file format: {}", ext)),
    }
}

fn has_allowed_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|s| s.to_str())
        .map(|ext| ALLOWED_EXTENSIONS.contains(&ext))
        .unwrap_or(false)
}

pub fn collect_documents(dir: &Path) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = WalkDir::new(dir)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .filter(|e| has_allowed_extension(e.path()))
        .map(|e| e.path().to_path_buf())
        .collect();
    files.sort();
    files
}

/// Analyze one document. Each document is analyzed sequentially; unreadable
/// or blank files carry an error instead of a result.
pub fn analyze_document(analyzer: &Analyzer, path: &Path) -> DocumentAnalysis {
    let outcome = read_file_content(path).and_then(|text| {
        let request = AnalysisRequest::new(text)?;
        Ok(analyzer.analyze(&request.text))
    });
    let path = path.to_string_lossy().to_string();
    match outcome {
        Ok(result) => DocumentAnalysis { path, result: Some(result), error: None },
        Err(e) => {
            warn!("skipping {}: {}", path, e);
            DocumentAnalysis { path, result: None, error: Some(e.to_string()) }
        }
    }
}

/// Analyze every supported document under `dir` (files in parallel) and
/// write the results as a JSON array to `out`.
pub fn analyze_dir(analyzer: &Analyzer, dir: &Path, out: &Path) -> Result<Vec<DocumentAnalysis>> {
    let files = collect_documents(dir);

    let pb = ProgressBar::new(files.len() as u64);
    pb.set_style(
        ProgressStyle::with_template("{spinner:.green} [{elapsed_precise}] {wide_bar} {pos}/{len} {msg}")?
            .progress_chars("=>-"),
    );

    let docs: Vec<DocumentAnalysis> = files
        .par_iter()
        .map(|p| {
            let doc = analyze_document(analyzer, p);
            pb.inc(1);
            doc
        })
        .collect();

    pb.finish_with_message("analyzing files");

    let fout = File::create(out).with_context(|| format!("failed to create {}", out.display()))?;
    serde_json::to_writer_pretty(fout, &docs)?;
    info!("Wrote {} results to {}", docs.len(), out.display());
    Ok(docs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nlp::LanguageModel;
    use std::io::Write;
    use std::sync::Arc;
    use tempfile::TempDir;

    fn analyzer() -> Analyzer {
        Analyzer::new(Some(Arc::new(LanguageModel::english().unwrap())))
    }

    #[test]
    fn test_read_file_content_txt() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let file_path = temp_dir.path().join("test.txt");
        let mut file = File::create(&file_path)?;
        writeln!(file, "Test content")?;

        let content = read_file_content(&file_path)?;
        assert_eq!(content, "Test content\n");
        Ok(())
    }

    #[test]
    fn test_read_file_content_unsupported() {
        let err = read_file_content(Path::new("image.png")).unwrap_err();
        assert!(err.to_string().contains("Unsupported file format"));
    }

    #[test]
    fn test_collect_documents_filters_and_sorts() -> Result<()> {
        let temp_dir = TempDir::new()?;
        fs::create_dir(temp_dir.path().join("nested"))?;
        fs::write(temp_dir.path().join("b.md"), "B")?;
        fs::write(temp_dir.path().join("a.txt"), "A")?;
        fs::write(temp_dir.path().join("nested").join("c.csv"), "C")?;
        fs::write(temp_dir.path().join("binary.bin"), [0u8, 1, 2])?;

        let files = collect_documents(temp_dir.path());
        let names: Vec<String> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
            .collect();
        assert_eq!(names, vec!["a.txt", "b.md", "c.csv"]);
        Ok(())
    }

    #[test]
    fn test_analyze_document_blank_file_is_error() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let path = temp_dir.path().join("blank.txt");
        fs::write(&path, "   \n")?;
        let doc = analyze_document(&analyzer(), &path);
        assert!(doc.result.is_none());
        assert_eq!(doc.error.as_deref(), Some("Empty text provided"));
        Ok(())
    }

    #[test]
    fn test_analyze_dir_writes_results() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let docs_dir = temp_dir.path().join("docs");
        fs::create_dir(&docs_dir)?;
        fs::write(docs_dir.join("one.txt"), "Barack Obama was born in Hawaii.")?;
        fs::write(docs_dir.join("two.md"), "I love sunny days. I hate traffic jams.")?;

        let out = temp_dir.path().join("results.json");
        let docs = analyze_dir(&analyzer(), &docs_dir, &out)?;
        assert_eq!(docs.len(), 2);
        assert!(docs.iter().all(|d| d.result.is_some()));

        let written: Vec<DocumentAnalysis> = serde_json::from_reader(File::open(&out)?)?;
        assert_eq!(written.len(), 2);
        assert!(written[0].path.ends_with("one.txt"));
        let first = written[0].result.as_ref().unwrap();
        assert!(first.entities.iter().any(|e| e.text == "Barack Obama"));
        Ok(())
    }
}
