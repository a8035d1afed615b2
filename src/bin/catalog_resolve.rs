//! Resolve an external identifier or a URI through XML catalogs.
//!
//! Usage:
//!   catalog-resolve --catalog /etc/xml/catalog --public "-//OASIS//DTD DocBook XML V4.1.2//EN"
//!   catalog-resolve --catalog a.xml --catalog b.xml --system http://example.com/a.dtd
//!   XML_CATALOG_FILES=/etc/xml/catalog catalog-resolve --uri http://www.w3.org/2001/xml.xsd
//!
//! Prints one JSON object; `resolved` is null when no catalog maps the input.

use anyhow::{Context, Result, bail};
use clap::Parser;
use serde::Serialize;
use std::sync::Arc;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};
use xcatalog::{
    CatalogCache, CatalogReader, ENV_CATALOG_FILES, ExternalIdentifierMapper,
    FileLocationResolver, NoCache, SimpleCatalogCache, UriMapper, split_list,
};

#[derive(Parser, Debug)]
#[command(name = "catalog-resolve")]
#[command(about = "Map public/system identifiers or URIs through XML catalogs")]
struct Cli {
    /// Catalog to consult; repeat to consult several in order. Defaults to XML_CATALOG_FILES.
    #[arg(long = "catalog")]
    catalogs: Vec<String>,
    /// Public identifier to map. Usually starts with `-//` or `+//`.
    #[arg(long, allow_hyphen_values = true)]
    public: Option<String>,
    /// System identifier to map.
    #[arg(long, allow_hyphen_values = true)]
    system: Option<String>,
    /// URI to map (instead of an external identifier).
    #[arg(long, allow_hyphen_values = true, conflicts_with_all = ["public", "system"])]
    uri: Option<String>,
    /// Parse every catalog reference again instead of sharing parsed catalogs.
    #[arg(long)]
    no_cache: bool,
    /// Log catalog loading on stderr.
    #[arg(long, short)]
    verbose: bool,
}

#[derive(Debug, Serialize)]
struct Resolution {
    kind: &'static str,
    public_id: Option<String>,
    system_id: Option<String>,
    uri: Option<String>,
    resolved: Option<String>,
}

fn main() {
    if let Err(err) = run() {
        eprintln!("{err:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let references = if cli.catalogs.is_empty() {
        std::env::var(ENV_CATALOG_FILES)
            .map(|raw| split_list(&raw))
            .unwrap_or_default()
    } else {
        cli.catalogs.clone()
    };
    if references.is_empty() {
        bail!("no catalogs given; pass --catalog or set {ENV_CATALOG_FILES}");
    }
    if cli.public.is_none() && cli.system.is_none() && cli.uri.is_none() {
        bail!("nothing to resolve; pass --public and/or --system, or --uri");
    }

    let cache: Arc<dyn CatalogCache> = if cli.no_cache {
        Arc::new(NoCache)
    } else {
        Arc::new(SimpleCatalogCache::new())
    };
    let reader = CatalogReader::new(FileLocationResolver::new()).with_cache(cache);
    let catalog = reader
        .parse_all(references.iter().map(String::as_str))
        .context("loading catalogs")?;

    let resolution = match cli.uri {
        Some(uri) => Resolution {
            kind: "uri",
            public_id: None,
            system_id: None,
            resolved: catalog.map_uri(&uri),
            uri: Some(uri),
        },
        None => Resolution {
            kind: "external",
            resolved: catalog
                .map_external_identifier(cli.public.as_deref(), cli.system.as_deref()),
            public_id: cli.public,
            system_id: cli.system,
            uri: None,
        },
    };

    println!("{}", serde_json::to_string(&resolution)?);
    Ok(())
}

fn init_logging(verbose: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if verbose {
            EnvFilter::new("xcatalog=debug")
        } else {
            EnvFilter::new("xcatalog=warn")
        }
    });

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(false)
                .without_time()
                .with_writer(std::io::stderr),
        )
        .with(filter)
        .init();
}
