use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use log::info;
use std::env;
use std::path::PathBuf;
use std::str::FromStr;

use recipe_calculator::aggregation;
use recipe_calculator::catalog_loader::load_catalog;
use recipe_calculator::catalog_model::Catalog;
use recipe_calculator::image_resolver::resolve_recipe_image;
use recipe_calculator::localization::{Language, LocalizationManager};
use recipe_calculator::presentation;
use recipe_calculator::resolver_config::ResolverConfig;
use recipe_calculator::selection::Selection;

#[derive(Parser)]
#[command(name = "recipe-calculator")]
#[command(about = "Scale recipes and aggregate shopping lists from a workbook catalog")]
struct Cli {
    /// Path to the catalog workbook (JSON export); defaults to
    /// RECIPE_CATALOG_PATH or recipe_database.json
    #[arg(short, long)]
    catalog: Option<PathBuf>,

    /// Display language: en or zh
    #[arg(short, long, default_value = "en")]
    language: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List recipes, optionally narrowed by category/subcategory
    List {
        #[arg(long)]
        category: Option<String>,

        #[arg(long)]
        subcategory: Option<String>,
    },

    /// Scale the selected recipes and print BoMs, the shopping list,
    /// tools and the production plan
    Calc {
        /// Selections as RECIPE_ID or RECIPE_ID=MULTIPLIER
        selection: Vec<String>,

        /// Also print the per-recipe production plan
        #[arg(short, long)]
        plan: bool,

        /// Also fetch each recipe's photo and save it next to the
        /// working directory
        #[arg(long)]
        images: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();
    dotenv::dotenv().ok();

    let cli = Cli::parse();
    let lang = Language::from_str(&cli.language)?;
    let loc = LocalizationManager::new()?;

    let catalog_path = cli
        .catalog
        .or_else(|| env::var("RECIPE_CATALOG_PATH").ok().map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from("recipe_database.json"));
    let catalog = load_catalog(&catalog_path)?;

    println!("{}\n", loc.t(lang, "app-title"));

    match cli.command {
        Commands::List {
            category,
            subcategory,
        } => {
            for recipe in catalog.recipes_in(category.as_deref(), subcategory.as_deref()) {
                println!(
                    "{}  {}",
                    recipe.id,
                    presentation::display_name(&recipe.name, lang)
                );
            }
        }
        Commands::Calc {
            selection,
            plan,
            images,
        } => {
            if selection.is_empty() {
                println!("{}", loc.t(lang, "select-prompt"));
                return Ok(());
            }
            let selection = parse_selection_args(&selection)?;
            run_calc(&catalog, &selection, plan, images, lang, &loc).await?;
        }
    }

    Ok(())
}

/// Parse CLI selection arguments of the form `ID` or `ID=MULTIPLIER`
fn parse_selection_args(args: &[String]) -> Result<Selection> {
    let mut pairs = Vec::new();
    for arg in args {
        match arg.split_once('=') {
            Some((id, mult)) => {
                let multiplier: u32 = mult
                    .parse()
                    .with_context(|| format!("Invalid multiplier in '{}'", arg))?;
                pairs.push((id.to_string(), multiplier));
            }
            None => pairs.push((arg.clone(), 1)),
        }
    }
    Ok(Selection::new(pairs)?)
}

async fn run_calc(
    catalog: &Catalog,
    selection: &Selection,
    plan: bool,
    images: bool,
    lang: Language,
    loc: &LocalizationManager,
) -> Result<()> {
    let resolver_config = ResolverConfig::default();

    for entry in selection.entries() {
        let Some(info) = catalog.recipe(&entry.recipe_id) else {
            info!("Recipe '{}' not found in catalog, skipping", entry.recipe_id);
            continue;
        };

        println!(
            "{}",
            presentation::render_recipe_header(info, entry.multiplier, lang, loc)
        );

        if images {
            if let Some(reference) = &info.image {
                if let Some(img) = resolve_recipe_image(reference, &resolver_config).await {
                    let path = format!("{}_photo.png", entry.recipe_id);
                    match img.save(&path) {
                        Ok(()) => println!("🖼️  {}", path),
                        Err(e) => info!("Could not save photo for '{}': {}", entry.recipe_id, e),
                    }
                }
            }
        }

        let bom = aggregation::scale_bom(catalog, &entry.recipe_id, entry.multiplier)?;
        println!("{}", presentation::render_bom(&bom, lang, loc));

        if plan {
            let steps = aggregation::step_plan(catalog, &entry.recipe_id);
            if !steps.is_empty() {
                let single = Selection::single(&entry.recipe_id, entry.multiplier)?;
                let minutes = aggregation::total_time(catalog, &single);
                println!(
                    "{}",
                    presentation::render_production_plan(&steps, minutes, lang, loc)
                );
            }
        }
    }

    let summary = aggregation::summarize(catalog, selection);
    println!("{}", presentation::render_shopping_list(&summary, lang, loc));

    let tools = aggregation::aggregate_tools(catalog, selection);
    if !tools.is_empty() {
        println!("{}", presentation::render_tool_list(&tools, lang, loc));
    }

    Ok(())
}
