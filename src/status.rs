// Resource status display: where the model and lexicon live and whether
// they are installed.

use std::path::Path;

use colored::Colorize;

use crate::config::Config;
use crate::embedding::onnx::{MODEL_FILE, TOKENIZER_FILE};
use crate::resources::{self, download};
use crate::text::lemmatizer::{NOUN_EXCEPTIONS_FILE, NOUN_INDEX_FILE};

/// Display resource status to the terminal.
pub fn show(config: &Config) {
    println!("{}", "=== semscore status ===".bold());

    let model_ok = download::model_files_present(&config.model_dir);
    println!("\nEmbedding model: {}", installed_label(model_ok));
    println!("  Directory: {}", config.model_dir.display());
    print_file(&config.model_dir, MODEL_FILE);
    print_file(&config.model_dir, TOKENIZER_FILE);

    let lexicon_ok = download::lexicon_files_present(&config.lexicon_dir);
    println!("\nWordNet lexicon: {}", installed_label(lexicon_ok));
    println!("  Directory: {}", config.lexicon_dir.display());
    print_file(&config.lexicon_dir, NOUN_INDEX_FILE);
    print_file(&config.lexicon_dir, NOUN_EXCEPTIONS_FILE);

    if !resources::resources_present(config) {
        println!(
            "\n{}",
            "Run `semscore download` to fetch missing resources (or just run a score).".dimmed()
        );
    }
}

fn installed_label(ok: bool) -> colored::ColoredString {
    if ok {
        "installed".green()
    } else {
        "missing".yellow()
    }
}

fn print_file(dir: &Path, name: &str) {
    let path = dir.join(name);
    match std::fs::metadata(&path) {
        Ok(meta) => println!("  {} {} ({})", "✓".green(), name, format_bytes(meta.len())),
        Err(_) => println!("  {} {}", "-".dimmed(), name),
    }
}

fn format_bytes(bytes: u64) -> String {
    if bytes < 1024 {
        format!("{} B", bytes)
    } else if bytes < 1024 * 1024 {
        format!("{:.1} KB", bytes as f64 / 1024.0)
    } else {
        format!("{:.1} MB", bytes as f64 / (1024.0 * 1024.0))
    }
}
