use anyhow::Result;
use clap::{Parser, Subcommand};
use search_core::input::parse_jsonl;
use search_core::{Document, DocumentId, DocumentStatus, SearchServer};
use tracing_subscriber::{fmt, EnvFilter};

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "search-cli")]
#[command(about = "Search documents with an in-memory TF-IDF index", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the top documents for a query
    Search {
        /// JSONL file with one {id, text, status, ratings} object per line
        #[arg(long)]
        documents: PathBuf,
        /// Space separated stop words
        #[arg(long)]
        stop_words: Option<String>,
        /// Query, e.g. "пушистый -пёс"
        #[arg(long)]
        query: String,
        /// Only documents with this status
        #[arg(long, default_value = "actual")]
        status: DocumentStatus,
        /// Only documents rated at least this much
        #[arg(long)]
        min_rating: Option<i32>,
    },
    /// Match a query against every document in insertion order
    Match {
        #[arg(long)]
        documents: PathBuf,
        #[arg(long)]
        stop_words: Option<String>,
        #[arg(long)]
        query: String,
    },
    /// Run the built-in sample session
    Demo,
}

fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Search { documents, stop_words, query, status, min_rating } => {
            let server = load_server(&documents, stop_words.as_deref())?;
            let min_rating = min_rating.unwrap_or(i32::MIN);
            find_top_documents(&server, &query, move |_, doc_status, rating| {
                doc_status == status && rating >= min_rating
            });
            Ok(())
        }
        Commands::Match { documents, stop_words, query } => {
            let server = load_server(&documents, stop_words.as_deref())?;
            match_documents(&server, &query);
            Ok(())
        }
        Commands::Demo => demo(),
    }
}

fn load_server(path: &Path, stop_words: Option<&str>) -> Result<SearchServer> {
    let mut server = match stop_words {
        Some(text) => SearchServer::with_stop_words_text(text)?,
        None => SearchServer::new(),
    };
    let docs = parse_jsonl(BufReader::new(File::open(path)?))?;
    for doc in &docs {
        if let Err(e) = doc.add_to(&mut server) {
            tracing::warn!(id = doc.id, error = %e, "document rejected");
        }
    }
    tracing::info!(path = %path.display(), documents = server.document_count(), "documents loaded");
    Ok(server)
}

fn print_document(document: &Document) {
    println!(
        "{{ document_id = {}, relevance = {}, rating = {} }}",
        document.id, document.relevance, document.rating
    );
}

fn print_match_document_result(id: DocumentId, words: &[String], status: DocumentStatus) {
    let mut line = format!("{{ document_id = {id}, status = {status}, words =");
    for word in words {
        line.push(' ');
        line.push_str(word);
    }
    line.push('}');
    println!("{line}");
}

fn add_document(
    server: &mut SearchServer,
    id: DocumentId,
    text: &str,
    status: DocumentStatus,
    ratings: &[i32],
) {
    if let Err(e) = server.add_document(id, text, status, ratings) {
        println!("Failed to add document {id}: {e}");
    }
}

fn find_top_documents<F>(server: &SearchServer, raw_query: &str, predicate: F)
where
    F: Fn(DocumentId, DocumentStatus, i32) -> bool,
{
    println!("Search results for query: {raw_query}");
    match server.find_top_documents_with(raw_query, predicate) {
        Ok(documents) => documents.iter().for_each(print_document),
        Err(e) => println!("Search failed: {e}"),
    }
}

fn match_documents(server: &SearchServer, query: &str) {
    println!("Matching documents for query: {query}");
    for id in server.document_ids() {
        match server.match_document(query, id) {
            Ok((words, status)) => print_match_document_result(id, &words, status),
            Err(e) => {
                println!("Matching failed for query {query}: {e}");
                return;
            }
        }
    }
}

fn demo() -> Result<()> {
    let mut server = SearchServer::with_stop_words_text("и в на")?;

    let documents: [(DocumentId, &str, &[i32]); 5] = [
        (5, "пушистый кот пушистый хвост и", &[7, 2, 7]),
        (1, "пушистый пёс и модный ошейник", &[1, 2]),
        (-1, "пушистый пёс и модный ошейник", &[1, 2]),
        (3, "большой пёс скво\x12рец евгений", &[1, 3, 2]),
        (4, "большой пёс скворец евгений", &[1, 1, 1]),
    ];
    for (id, text, ratings) in documents {
        add_document(&mut server, id, text, DocumentStatus::Actual, ratings);
    }

    let actual = |_: DocumentId, status: DocumentStatus, _: i32| status == DocumentStatus::Actual;
    for query in ["и в на", "пушистый -пёс", "пушистый --кот", "пушистый -"] {
        find_top_documents(&server, query, actual);
    }

    for query in ["пушистый пёс", "модный -кот", "модный --пёс", "пушистый - хвост"] {
        match_documents(&server, query);
    }

    if let Err(e) = server.document_id(server.document_count()) {
        println!("{e}");
    }
    Ok(())
}
