//! Terminal browser for API specification catalogs.
//!
//! Loads the index payload (with proxy fallbacks), normalizes it, and drives
//! the app reducer exactly the way a view shell would: dispatch commands,
//! print the resulting render snapshot as JSON.

mod config;

use anyhow::Result;
use clap::{Parser, Subcommand};
use specdex_app::{
    AppState, Command, Fragment, MemFragment, Route, Theme, ThemeStore, parse_fragment,
};
use specdex_loader::PayloadLoader;
use specdex_normalize::normalize;
use specdex_query::SortKey;
use tracing_subscriber::EnvFilter;

use crate::config::Config;

#[derive(Parser)]
#[command(name = "specdex")]
#[command(about = "Browse an API specification catalog", long_about = None)]
struct Cli {
    /// Primary index URL (falls back to SPECDEX_INDEX_URL).
    #[arg(long, global = true)]
    url: Option<String>,
    /// Fallback proxy URL template, `{url}` is replaced by the encoded
    /// primary URL. Repeatable; falls back to SPECDEX_PROXY_TEMPLATES.
    #[arg(long = "proxy", global = true)]
    proxies: Vec<String>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the visible page of documents after filtering and sorting.
    List {
        #[arg(long)]
        category: Option<String>,
        #[arg(long)]
        domain: Option<String>,
        #[arg(long)]
        search: Option<String>,
        #[arg(long, default_value = "name")]
        sort: SortKey,
        #[arg(long, default_value = "1")]
        page: usize,
    },
    /// Show one document by id, going through route reconciliation.
    Show {
        id: String,
    },
    /// Parse a URL fragment and print the route it resolves to (offline).
    Resolve {
        fragment: String,
    },
    /// Print the category filter options.
    Categories,
    /// Print the domain filter options.
    Domains,
    /// Print or persist the theme preference.
    Theme {
        choice: Option<Theme>,
    },
}

async fn load_state(cli: &Cli) -> Result<(AppState, MemFragment)> {
    let config = Config::resolve(cli.url.clone(), cli.proxies.clone())?;
    let theme = ThemeStore::new(ThemeStore::default_path()).load();
    let mut state = AppState::new(config.page_size).with_theme(theme);
    let mut fragment = MemFragment::default();

    let loader = PayloadLoader::new(&config.index_url, &config.proxy_templates)?;
    match loader.load().await {
        Ok(loaded) => {
            let documents = normalize(&loaded.payload);
            state.apply(
                Command::IndexLoaded { documents, via_fallback: loaded.via_fallback },
                &mut fragment,
            );
        },
        Err(e) => state.apply(Command::LoadFailed(e.to_string()), &mut fragment),
    }
    Ok((state, fragment))
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match &cli.command {
        Commands::Resolve { fragment } => {
            let route = parse_fragment(fragment);
            print_json(&route)?;
        },
        Commands::Theme { choice } => {
            let store = ThemeStore::new(ThemeStore::default_path());
            match choice {
                Some(theme) => {
                    store.save(*theme)?;
                    println!("{}", theme.as_str());
                },
                None => println!("{}", store.load().as_str()),
            }
        },
        Commands::List { category, domain, search, sort, page } => {
            let (mut state, mut fragment) = load_state(&cli).await?;
            state.apply(Command::SetCategory(category.clone()), &mut fragment);
            state.apply(Command::SetDomain(domain.clone()), &mut fragment);
            if let Some(term) = search {
                state.apply(Command::SetSearch(term.clone()), &mut fragment);
            }
            state.apply(Command::SetSort(*sort), &mut fragment);
            state.apply(Command::SetPage(*page), &mut fragment);
            print_json(&state.snapshot())?;
        },
        Commands::Show { id } => {
            let (mut state, mut fragment) = load_state(&cli).await?;
            state.apply(Command::Navigate(Route::detail(id.clone())), &mut fragment);
            tracing::debug!(fragment = %fragment.get(), "resolved fragment");
            print_json(&state.snapshot())?;
        },
        Commands::Categories => {
            let (state, _) = load_state(&cli).await?;
            print_json(&state.snapshot().categories)?;
        },
        Commands::Domains => {
            let (state, _) = load_state(&cli).await?;
            print_json(&state.snapshot().domains)?;
        },
    }

    Ok(())
}
