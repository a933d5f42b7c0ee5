//! # Validate Subcommand
//!
//! Validates frame documents on disk against the collection schema.
//!
//! A directory argument is treated as a collection root: every
//! `.yaml`/`.yml`/`.json` file below it is an entry whose slug is its
//! path relative to the root without the extension (`en/Person.yaml`
//! becomes `en/Person`). A file argument takes its slug from its parent
//! directory and file stem.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;

use essential_core::{create_is_lang_entry, EntrySlug, EssentialEntry, FrameType};
use essential_schema::FrameValidator;

const DOCUMENT_EXTENSIONS: &[&str] = &["yaml", "yml", "json"];

/// Arguments for the `essential validate` subcommand.
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Frame documents or collection directories.
    #[arg(value_name = "PATH", required = true)]
    pub paths: Vec<PathBuf>,

    /// Only validate entries whose slug is in this locale (e.g. `en`).
    #[arg(long, value_name = "TAG")]
    pub lang: Option<String>,
}

/// A frame document and the slug it is registered under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub path: PathBuf,
    pub slug: EntrySlug,
}

/// A document that failed to load or validate.
#[derive(Debug, Clone)]
pub struct DocumentFailure {
    pub path: PathBuf,
    pub error: String,
}

/// Outcome of validating a set of documents.
#[derive(Debug, Default)]
pub struct ValidationReport {
    pub entries: Vec<EssentialEntry>,
    pub failures: Vec<DocumentFailure>,
}

impl ValidationReport {
    pub fn total(&self) -> usize {
        self.entries.len() + self.failures.len()
    }

    pub fn passed(&self) -> usize {
        self.entries.len()
    }

    /// Number of valid entries resolved to `frametype`.
    pub fn count(&self, frametype: FrameType) -> usize {
        self.entries
            .iter()
            .filter(|e| e.frametype() == frametype)
            .count()
    }
}

/// Execute the validate subcommand.
///
/// Returns exit code: 0 if every document is valid, 1 otherwise.
pub fn run_validate(args: &ValidateArgs) -> Result<u8> {
    let validator = FrameValidator::new().context("failed to compile frame shapes")?;

    let mut documents = collect_documents(&args.paths);
    if let Some(lang) = &args.lang {
        let in_lang = create_is_lang_entry(lang);
        documents.retain(|d| in_lang(d.slug.as_str()));
    }

    tracing::info!(document_count = documents.len(), "validating frame documents");

    let report = validate_documents(&validator, &documents);

    for entry in &report.entries {
        println!("OK: {}", entry.slug);
    }
    for failure in &report.failures {
        println!("FAIL: {}: {}", failure.path.display(), failure.error);
    }

    println!("Frames: {}/{} passed", report.passed(), report.total());
    for frametype in FrameType::all() {
        let count = report.count(*frametype);
        if count > 0 {
            println!("  {frametype}: {count}");
        }
    }

    if report.failures.is_empty() {
        Ok(0)
    } else {
        println!(
            "\n{} document(s) failed validation out of {} total.",
            report.failures.len(),
            report.total()
        );
        Ok(1)
    }
}

/// Validate every document, collecting entries and failures.
pub fn validate_documents(validator: &FrameValidator, documents: &[Document]) -> ValidationReport {
    let mut report = ValidationReport::default();
    for document in documents {
        match validator.validate_file(&document.path) {
            Ok(frame) => {
                tracing::debug!(slug = %document.slug, frametype = %frame.frametype(), "frame valid");
                report
                    .entries
                    .push(EssentialEntry::new(document.slug.clone(), frame));
            }
            Err(e) => report.failures.push(DocumentFailure {
                path: document.path.clone(),
                error: e.to_string(),
            }),
        }
    }
    report
}

/// Expand path arguments into documents with their slugs.
pub fn collect_documents(paths: &[PathBuf]) -> Vec<Document> {
    let mut documents = Vec::new();
    for path in paths {
        if path.is_dir() {
            for file in find_documents(path) {
                let slug = relative_slug(path, &file);
                documents.push(Document { path: file, slug });
            }
        } else {
            documents.push(Document {
                path: path.clone(),
                slug: file_slug(path),
            });
        }
    }
    documents
}

/// Slug of a file relative to its collection root, `/`-separated.
fn relative_slug(root: &Path, file: &Path) -> EntrySlug {
    let relative = file.strip_prefix(root).unwrap_or(file).with_extension("");
    let segments: Vec<String> = relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect();
    EntrySlug::new(segments.join("/"))
}

/// Slug of a standalone file: `<parent dir>/<stem>`.
fn file_slug(path: &Path) -> EntrySlug {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    match path.parent().and_then(|p| p.file_name()) {
        Some(lang) => EntrySlug::new(format!("{}/{stem}", lang.to_string_lossy())),
        None => EntrySlug::new(stem),
    }
}

fn is_document(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| DOCUMENT_EXTENSIONS.contains(&ext))
}

/// Recursively find frame documents under a directory, sorted.
fn find_documents(dir: &Path) -> Vec<PathBuf> {
    let mut results = Vec::new();
    walk_for_documents(dir, &mut results);
    results.sort();
    results
}

fn walk_for_documents(dir: &Path, acc: &mut Vec<PathBuf>) {
    let entries = match std::fs::read_dir(dir) {
        Ok(e) => e,
        Err(e) => {
            tracing::warn!(
                dir = %dir.display(),
                error = %e,
                "failed to read directory during document walk"
            );
            return;
        }
    };
    for entry in entries {
        let entry = match entry {
            Ok(e) => e,
            Err(e) => {
                tracing::warn!(dir = %dir.display(), error = %e, "failed to read directory entry");
                continue;
            }
        };
        let file_type = match entry.file_type() {
            Ok(t) => t,
            Err(e) => {
                tracing::warn!(path = %entry.path().display(), error = %e, "failed to stat entry");
                continue;
            }
        };
        let path = entry.path();
        // Symlinked directories are not followed.
        if file_type.is_dir() {
            walk_for_documents(&path, acc);
        } else if !path.is_dir() && is_document(&path) {
            acc.push(path);
        }
    }
}
