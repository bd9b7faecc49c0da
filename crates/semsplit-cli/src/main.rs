//! semsplit CLI - Split text files into semantic chunks.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use clap::{Parser, Subcommand};
use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

use semsplit_chunk::{DocumentSplitter, SemanticSplitter};
use semsplit_core::{
    AppConfig, Document, Embedder, Metadata, TextSegment, ABSOLUTE_DIRECTORY_PATH, FILE_NAME,
};
use semsplit_embed::{MockEmbedder, OllamaEmbedder};

/// semsplit - Semantic document splitter
#[derive(Parser)]
#[command(name = "semsplit")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Config file (default: <config dir>/semsplit/config.toml or ./semsplit.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Split a file or directory and print chunks as JSON lines
    Split {
        /// Path to file or directory
        path: PathBuf,

        /// Recursively process directories
        #[arg(short, long)]
        recursive: bool,

        /// Similarity threshold (0.0 to 1.0)
        #[arg(long)]
        threshold: Option<f64>,

        /// Minimum chunk size in characters before a semantic split
        #[arg(long)]
        min: Option<usize>,

        /// Maximum chunk size in characters
        #[arg(long)]
        max: Option<usize>,

        /// Use deterministic mock embeddings instead of Ollama
        #[arg(long)]
        mock: bool,

        /// Prefix each chunk with its file name
        #[arg(long)]
        prefix_file_name: bool,
    },

    /// Print the effective configuration
    Config,
}

fn setup_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::WARN };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber).ok();
}

fn load_config(path: Option<&Path>) -> semsplit_core::Result<AppConfig> {
    match path {
        Some(path) => AppConfig::load(path),
        None => AppConfig::load_default(),
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    setup_logging(cli.verbose);

    let mut config = load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Config => {
            print!("{}", config.to_toml()?);
        }
        Commands::Split {
            path,
            recursive,
            threshold,
            min,
            max,
            mock,
            prefix_file_name,
        } => {
            if let Some(threshold) = threshold {
                config.splitter.similarity_threshold = threshold;
            }
            if let Some(min) = min {
                config.splitter.min_chunk_chars = min;
            }
            if let Some(max) = max {
                config.splitter.max_chunk_chars = max;
            }

            let embedder: Arc<dyn Embedder> = if mock {
                Arc::new(MockEmbedder::new())
            } else {
                Arc::new(OllamaEmbedder::from_config(&config.embedding)?)
            };
            let splitter = SemanticSplitter::new(embedder, config.splitter.clone())?;

            split(&splitter, &path, recursive, prefix_file_name).await?;
        }
    }

    Ok(())
}

async fn split(
    splitter: &impl DocumentSplitter,
    path: &Path,
    recursive: bool,
    prefix_file_name: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let files = collect_files(path, recursive)?;

    if files.is_empty() {
        warn!("No supported files found at: {}", path.display());
        return Ok(());
    }

    info!("Splitting {} file(s)", files.len());

    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    for file_path in files {
        let document = load_document(&file_path)?;
        let segments = splitter.split(&document).await?;

        info!("{}: {} chunk(s)", file_path.display(), segments.len());

        for segment in segments {
            let segment = if prefix_file_name {
                with_file_name_prefix(segment)
            } else {
                segment
            };
            writeln!(out, "{}", serde_json::to_string(&segment)?)?;
        }
    }

    Ok(())
}

/// Read a file into a document carrying its file name and directory.
fn load_document(path: &Path) -> std::io::Result<Document> {
    let text = fs::read_to_string(path)?;
    let absolute = path.canonicalize()?;

    let mut metadata = Metadata::new();
    if let Some(name) = absolute.file_name() {
        metadata.insert(FILE_NAME, name.to_string_lossy());
    }
    if let Some(dir) = absolute.parent() {
        metadata.insert(ABSOLUTE_DIRECTORY_PATH, dir.to_string_lossy());
    }

    Ok(Document::with_metadata(text, metadata))
}

/// Put the file name on its own line above the chunk text.
fn with_file_name_prefix(segment: TextSegment) -> TextSegment {
    let Some(name) = segment.metadata.get(FILE_NAME) else {
        return segment;
    };
    let text = format!("{}\n{}", name, segment.text);
    TextSegment { text, ..segment }
}

fn collect_files(path: &Path, recursive: bool) -> Result<Vec<PathBuf>, std::io::Error> {
    let mut files = Vec::new();

    if path.is_file() {
        if is_supported_file(path) {
            files.push(path.to_path_buf());
        }
    } else if path.is_dir() {
        let mut entries = fs::read_dir(path)?
            .map(|entry| entry.map(|e| e.path()))
            .collect::<Result<Vec<_>, _>>()?;
        entries.sort();

        for entry_path in entries {
            if entry_path.is_file() && is_supported_file(&entry_path) {
                files.push(entry_path);
            } else if entry_path.is_dir() && recursive {
                files.extend(collect_files(&entry_path, recursive)?);
            }
        }
    }

    Ok(files)
}

fn is_supported_file(path: &Path) -> bool {
    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
    matches!(ext, "txt" | "md" | "markdown")
}
