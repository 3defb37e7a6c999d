use anyhow::Result;
use boolq::{load_index, run, Format};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(name = "boolq")]
#[command(about = "Evaluate boolean queries term-at-a-time and document-at-a-time", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the index from a postings file and evaluate every line of a query file
    Run {
        /// Postings file, one `term\c<df>\m[doc/freq, ...]` entry per line
        #[arg(long)]
        corpus: PathBuf,
        /// Query file, one whitespace separated query per line
        #[arg(long)]
        queries: PathBuf,
        /// Output file for the result blocks
        #[arg(long)]
        output: PathBuf,
        /// Number of terms listed by getTopK
        #[arg(long, default_value_t = 10)]
        top_k: usize,
        #[arg(long, value_enum, default_value_t = Format::Text)]
        format: Format,
    },
    /// Print both orderings of one term's postings
    Postings {
        #[arg(long)]
        corpus: PathBuf,
        term: String,
    },
}

fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Run { corpus, queries, output, top_k, format } => run(&corpus, &queries, &output, top_k, format),
        Commands::Postings { corpus, term } => {
            let index = load_index(&corpus)?;
            match index.postings(&term) {
                Some(lists) => {
                    println!("Ordered by doc IDs: {:?}", lists.by_doc_id);
                    println!("Ordered by TF: {:?}", lists.by_frequency);
                }
                None => println!("term not found"),
            }
            Ok(())
        }
    }
}
