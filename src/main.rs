use std::fs;
use std::io::{self, Read, Write};

use anyhow::{Context, Result};
use tracing::info;
use tracing_subscriber::EnvFilter;

use recipe_nutrition::catalog::FoodCatalog;
use recipe_nutrition::ingredient_matcher::parse_and_match_all;
use recipe_nutrition::ingredient_model::NutritionTotals;
use recipe_nutrition::matcher_config::{AppConfig, LogFormat};

fn init_logging(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr);

    match format {
        LogFormat::Json => builder.json().init(),
        LogFormat::Text => builder.init(),
    }
}

fn main() -> Result<()> {
    // Load configuration from environment (and .env)
    let config = AppConfig::from_env()?;

    init_logging(config.log_format);

    info!("Starting recipe nutrition calculator");

    let catalog = FoodCatalog::from_path(&config.catalog_path)
        .with_context(|| format!("Cannot load catalog {}", config.catalog_path.display()))?;

    info!(foods = catalog.len(), "Food catalog ready");

    let text = match &config.ingredients_path {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("Cannot read ingredients {}", path.display()))?,
        None => {
            let mut text = String::new();
            io::stdin()
                .read_to_string(&mut text)
                .context("Cannot read ingredients from stdin")?;
            text
        }
    };

    let matches = parse_and_match_all(&text, &catalog);
    let totals = NutritionTotals::from_matches(&matches);

    info!(
        matched = totals.matched_count,
        unmatched = totals.unmatched_count,
        "Ingredients resolved"
    );

    let mut out = io::stdout().lock();
    for (i, matched) in matches.iter().enumerate() {
        writeln!(out, "{}. {}", i + 1, matched)?;
    }
    writeln!(out, "{totals}")?;

    Ok(())
}
