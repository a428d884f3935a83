//! `folio duplicates` handler.

use super::commands::DuplicatesArgs;
use folio::{DuplicateDetector, FolioConfig, FolioResult, StorageError, StorageErrorKind};
use std::path::Path;

async fn read(path: &Path) -> FolioResult<String> {
    tokio::fs::read_to_string(path).await.map_err(|e| {
        StorageError::new(StorageErrorKind::FileRead(format!("{}: {}", path.display(), e))).into()
    })
}

/// Scan a chapter (and optionally its predecessor) and print the findings.
pub async fn run_duplicates(args: DuplicatesArgs, config: &FolioConfig) -> FolioResult<()> {
    let threshold = args
        .threshold
        .unwrap_or(*config.audit().similarity_threshold());
    let detector = DuplicateDetector::new(threshold)?;
    let chapter = read(&args.file).await?;

    let findings = detector.find_in_chapter(&chapter);
    if findings.is_empty() {
        println!("No duplicate paragraphs within {}.", args.file.display());
    } else {
        println!("Duplicate paragraphs within {}:", args.file.display());
        for f in &findings {
            println!(
                "- Paragraph {} duplicates paragraph {} (similarity: {:.2}), excerpt: {}",
                f.paragraph_index(),
                f.matched_index(),
                f.score(),
                f.excerpt()
            );
        }
    }

    if let Some(previous_path) = &args.previous {
        let previous = read(previous_path).await?;
        let findings = detector.find_against_previous(&chapter, &previous);
        if findings.is_empty() {
            println!("No paragraphs repeated from {}.", previous_path.display());
        } else {
            println!("Paragraphs repeated from {}:", previous_path.display());
            for f in &findings {
                println!(
                    "- Paragraph {} duplicates previous chapter paragraph {} (similarity: {:.2}), excerpt: {}",
                    f.paragraph_index(),
                    f.matched_index(),
                    f.score(),
                    f.excerpt()
                );
            }
        }
    }

    Ok(())
}
