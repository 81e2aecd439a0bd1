use colored::*;
use std::path::{Path, PathBuf};

use crate::generator::GenerationReport;

/// How many created folders are listed before the rest are summarized.
const FOLDER_PREVIEW: usize = 10;

pub fn print_tree(path: &Path, prefix: &str, is_last: bool) {
    let name = path.file_name().and_then(|n| n.to_str()).unwrap_or("");

    let connector = if is_last { "└── " } else { "├── " };
    println!("{}{}{}", prefix, connector, name.blue());

    if path.is_dir() {
        let new_prefix = if is_last {
            format!("{}    ", prefix)
        } else {
            format!("{}│   ", prefix)
        };

        if let Ok(entries) = std::fs::read_dir(path) {
            let mut entries: Vec<_> = entries
                .filter_map(|e| e.ok())
                .filter(|e| e.path().is_dir())
                .collect();
            entries.sort_by_key(|e| e.path());

            let count = entries.len();
            for (i, entry) in entries.iter().enumerate() {
                print_tree(&entry.path(), &new_prefix, i == count - 1);
            }
        }
    }
}

/// `path` relative to whichever project root contains it.
pub fn relative_to_roots<'p>(path: &'p Path, roots: &[PathBuf]) -> &'p Path {
    roots
        .iter()
        .find_map(|root| path.strip_prefix(root).ok())
        .unwrap_or(path)
}

pub fn print_report(report: &GenerationReport) {
    if report.success {
        println!("\n{}", format!("✅ {}", report.message).green().bold());
    } else {
        eprintln!("\n{}: {}", "Error".red().bold(), report.message);
    }

    for path in &report.project_paths {
        println!("📁 {}", path.display().to_string().yellow());
    }

    if !report.created_folders.is_empty() {
        println!(
            "\n{} ({} new)",
            "Folders:".cyan().bold(),
            report.newly_created
        );
        for folder in report.created_folders.iter().take(FOLDER_PREVIEW) {
            println!(
                "  {}",
                relative_to_roots(folder, &report.project_paths).display()
            );
        }
        if report.created_folders.len() > FOLDER_PREVIEW {
            println!(
                "  ... and {} more",
                report.created_folders.len() - FOLDER_PREVIEW
            );
        }
    }

    if report.client_added {
        println!("{}", "👤 New client added to the registry".green());
    }
    for warning in &report.warnings {
        eprintln!("{}: {}", "Warning".yellow(), warning);
    }
}
