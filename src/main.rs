use std::path::PathBuf;
use std::rc::Rc;

use clap::Parser;
use spark_kitchen::{
    define_all, observability, pipeline, AppContext, ColorScheme, Config,
    InMemoryRecipeRepository, Result,
};

/// spark-kitchen - browse recipes and plan meals in the terminal
#[derive(Parser)]
#[command(name = "spark-kitchen", version)]
#[command(about = "Reactive recipe browser and meal planner", long_about = None)]
struct Cli {
    /// Path to configuration file (TOML)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Start with this color scheme (overrides config file)
    #[arg(long)]
    color_scheme: Option<ColorScheme>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = Config::load(cli.config.as_deref())?;
    observability::init_logging(&config.logging)?;

    define_all()?;

    let repository = if config.catalog.recipes.is_empty() {
        InMemoryRecipeRepository::with_sample_catalog()
    } else {
        InMemoryRecipeRepository::new(config.catalog.recipes.clone())
    };
    tracing::info!(recipes = repository.len(), "catalog loaded");

    let scheme = cli.color_scheme.unwrap_or(config.ui.color_scheme);
    let ctx = AppContext::new(Rc::new(repository)).with_color_scheme(scheme);

    let handle = pipeline::mount(&ctx)?;
    let result = pipeline::run(&handle);
    handle.unmount();
    result
}
