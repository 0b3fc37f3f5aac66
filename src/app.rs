//! Application wiring: build the store and registry once, run a command.
//!
//! There is no global service locator; every collaborator is constructed
//! here and handed down explicitly.

use std::sync::Arc;

use anyhow::Context;
use tabled::{Table, Tabled};

use crate::adapters::stores::db::{create_pool, run_migrations};
use crate::adapters::{LogPresenter, SqliteShopStore, StaticWorldCatalog};
use crate::cli::{Cli, Commands, SearchArgs, StatsArgs};
use crate::config::Config;
use crate::domain::ExactMatcher;
use crate::registry::{SearchQuery, ShopRegistry};

pub struct App;

impl App {
    /// Open the database, load the registry and execute the CLI command.
    pub async fn run(cli: Cli, config: Config) -> anyhow::Result<()> {
        let pool = create_pool(&config.database.path).context("open database")?;
        run_migrations(&pool).context("run migrations")?;

        let store = SqliteShopStore::new(pool);
        let catalog = StaticWorldCatalog::new(config.worlds.available.iter().map(String::as_str));
        let registry = ShopRegistry::load(
            store,
            Arc::new(LogPresenter),
            Arc::new(ExactMatcher),
            &catalog,
        )
        .await
        .context("load shops")?;

        match cli.command {
            Commands::Stats(args) => print_stats(&registry, &args).await?,
            Commands::List => print_shops(&registry).await,
            Commands::Search(args) => print_search(&registry, &args).await,
        }
        Ok(())
    }
}

#[derive(Tabled)]
struct ShopLine {
    #[tabled(rename = "Owner")]
    owner: String,
    #[tabled(rename = "Location")]
    location: String,
    #[tabled(rename = "Listings")]
    listings: usize,
    #[tabled(rename = "Revenue items")]
    revenue_items: u32,
}

#[derive(Tabled)]
struct SearchLine {
    #[tabled(rename = "Item")]
    item: String,
    #[tabled(rename = "Stock")]
    stock: u32,
    #[tabled(rename = "Price")]
    price: String,
    #[tabled(rename = "Seller")]
    seller: String,
    #[tabled(rename = "Location")]
    location: String,
}

async fn print_stats(
    registry: &ShopRegistry<SqliteShopStore>,
    args: &StatsArgs,
) -> anyhow::Result<()> {
    let stats = registry.statistics().await;
    if args.json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
        return Ok(());
    }
    println!(
        "shops: {} ({} active), listings: {}, revenue items: {}",
        stats.total_shops, stats.active_shops, stats.total_listings, stats.total_revenue_items
    );
    Ok(())
}

async fn print_shops(registry: &ShopRegistry<SqliteShopStore>) {
    let mut lines = Vec::new();
    for shop in registry.all_shops().await {
        lines.push(ShopLine {
            owner: shop.owner_name().to_string(),
            location: shop.location().to_string(),
            listings: shop.items().len(),
            revenue_items: shop.total_revenue_items(),
        });
    }
    if lines.is_empty() {
        println!("no shops registered");
    } else {
        println!("{}", Table::new(lines));
    }
}

async fn print_search(registry: &ShopRegistry<SqliteShopStore>, args: &SearchArgs) {
    let mut query = SearchQuery::by_name(&args.name);
    query.seller = args.seller.clone();

    let hits = registry.search(&query).await;
    if hits.is_empty() {
        println!("no matching listings");
        return;
    }
    let lines: Vec<SearchLine> = hits
        .into_iter()
        .map(|hit| SearchLine {
            item: hit.item,
            stock: hit.quantity,
            price: hit.price,
            seller: hit.owner_name,
            location: hit.location.to_string(),
        })
        .collect();
    println!("{}", Table::new(lines));
}
