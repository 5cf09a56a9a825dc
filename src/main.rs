use std::collections::HashSet;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};

use devfixpro::config::{load_registry, read_config};
use devfixpro::content::store::ContentStore;
use devfixpro::content::Collection;
use devfixpro::logger::configure_logger;
use devfixpro::text_utils::format_date_time;
use devfixpro::toc::extract_toc;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Path of the configuration file
    #[arg(short, long, default_value = "devfixpro.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List all records of a collection, newest first
    List { collection: CollectionArg },
    /// Show a single record with its table of contents
    Show { collection: CollectionArg, slug: String },
    /// Cross-check content files and the guide registry
    Check,
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum CollectionArg {
    Posts,
    Guides,
}

impl From<CollectionArg> for Collection {
    fn from(value: CollectionArg) -> Self {
        match value {
            CollectionArg::Posts => Collection::Posts,
            CollectionArg::Guides => Collection::Guides,
        }
    }
}

fn collection_name(collection: Collection) -> &'static str {
    match collection {
        Collection::Posts => "posts",
        Collection::Guides => "guides",
    }
}

fn cmd_list(store: &ContentStore, collection: Collection) -> Result<ExitCode> {
    let records = store.list_all(collection)?;
    for record in &records {
        let date = match record.published {
            Some(ref published) => format_date_time(published).0,
            None => "          ".to_string(),
        };
        println!("{}  {}  {}", date, record.slug, record.title);
    }
    println!("{} {}", records.len(), collection_name(collection));
    Ok(ExitCode::SUCCESS)
}

fn cmd_show(store: &ContentStore, collection: Collection, slug: &str) -> Result<ExitCode> {
    let record = match store.get_by_slug(collection, slug)? {
        Some(record) => record,
        None => {
            eprintln!("{}: not found in {}", slug, collection_name(collection));
            return Ok(ExitCode::FAILURE);
        }
    };

    if collection == Collection::Guides {
        // The registry half of a guide: what list views display
        if let Some(summary) = store.registry().get(slug) {
            println!("[{}] {} - {}", summary.icon, summary.title, summary.description);
        }
    }

    let toc = extract_toc(&record.body);
    if !toc.is_empty() {
        println!("contents:");
        for entry in &toc {
            let indent = if entry.level == 3 { "    " } else { "  " };
            println!("{}- {} (#{})", indent, entry.text, entry.id);
        }
        println!();
    }

    println!("{}", record);
    Ok(ExitCode::SUCCESS)
}

fn cmd_check(store: &ContentStore) -> Result<ExitCode> {
    let mut problems: Vec<String> = vec![];

    for collection in [Collection::Posts, Collection::Guides] {
        let readable: HashSet<String> = store.list_all(collection)?
            .into_iter()
            .map(|record| record.slug)
            .collect();
        for slug in store.file_slugs(collection)? {
            if !readable.contains(&slug) {
                problems.push(format!("{}: {}.md does not parse", collection_name(collection), slug));
            }
        }
    }

    let guide_files: HashSet<String> = store.file_slugs(Collection::Guides)?.into_iter().collect();
    for summary in store.registry().iter() {
        if !guide_files.contains(&summary.slug) {
            problems.push(format!("guides: registry lists {} but there is no guide file", summary.slug));
        }
    }
    for slug in &guide_files {
        if !store.registry().contains(slug) {
            problems.push(format!("guides: {}.md has no registry entry", slug));
        }
    }

    if problems.is_empty() {
        println!("Content is consistent");
        return Ok(ExitCode::SUCCESS);
    }

    for problem in &problems {
        eprintln!("{}", problem);
    }
    eprintln!("{} problems found", problems.len());
    Ok(ExitCode::FAILURE)
}

fn run(args: Args) -> Result<ExitCode> {
    let config = read_config(&args.config)?;
    configure_logger(&config)?;

    let registry = load_registry(&config.paths.guide_registry)?;
    let store = ContentStore::from_config(&config, registry);

    match args.command {
        Command::List { collection } => cmd_list(&store, collection.into()),
        Command::Show { collection, slug } => cmd_show(&store, collection.into(), &slug),
        Command::Check => cmd_check(&store),
    }
}

fn main() -> ExitCode {
    let args = Args::parse();
    match run(args) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
