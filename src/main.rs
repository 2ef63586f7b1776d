use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;
use tracing::{error, info, warn, Level};
use tracing_subscriber::EnvFilter;

use snap_filters::{
    config::Config,
    filters::{FilterCatalog, FilterKind},
    imaging::{ProcessingContext, SourceImage},
    render::Renderer,
};

#[derive(Parser)]
#[command(
    name = "snap-filters",
    version,
    about = "Render filtered previews of a photo",
    long_about = "snap-filters applies each filter of its catalog to a photo and writes one preview image per filter, every preview the same size as the photo."
)]
struct Cli {
    /// Photo to filter (PNG, JPEG)
    #[arg(short, long, required_unless_present = "list")]
    input: Option<PathBuf>,

    /// Directory the previews are written to
    #[arg(short, long, default_value = ".")]
    output: PathBuf,

    /// Only render these filters (repeatable, e.g. --filter sepia_tone)
    #[arg(short, long = "filter")]
    filters: Vec<String>,

    /// Configuration file (optional)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Print the filter catalog and exit
    #[arg(short, long)]
    list: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

/// Narrow the catalog to the filters named on the command line
fn select_filters(catalog: &FilterCatalog, names: &[String]) -> Result<FilterCatalog> {
    let kinds = names
        .iter()
        .map(|name| name.parse::<FilterKind>())
        .collect::<Result<Vec<_>, _>>()?;

    let selected = catalog.select(&kinds);
    if selected.is_empty() {
        bail!("none of the requested filters ({}) is in the configured catalog", names.join(", "));
    }
    Ok(selected)
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(log_level.to_string()));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    info!("Starting snap-filters v{}", env!("CARGO_PKG_VERSION"));

    // Load configuration
    let config = match &cli.config {
        Some(config_path) => {
            info!("Loading configuration from {:?}", config_path);
            Config::from_file(config_path)?
        }
        None => {
            info!("Using default configuration");
            Config::default()
        }
    };
    config.validate()?;

    // A missing operation or bad parameter stops here, before any rendering
    let context = ProcessingContext::from_config(&config.context)?;
    let mut catalog = FilterCatalog::from_config(&context, &config)?;

    if !cli.filters.is_empty() {
        catalog = select_filters(&catalog, &cli.filters)?;
    }

    if cli.list {
        for (index, filter) in catalog.iter().enumerate() {
            let metadata = filter.metadata();
            println!("{:2}. {:<22} {} - {}", index + 1, filter.name(), metadata.display_name, metadata.description);
        }
        return Ok(());
    }

    let Some(input) = cli.input else {
        bail!("no input photo given");
    };

    let source = SourceImage::open(&input)
        .with_context(|| format!("failed to read photo {:?}", input))?;
    info!("Loaded {:?} ({}x{})", input, source.width(), source.height());

    let renderer = Renderer::with_config(context, &config.render)?;
    let batch = renderer.render_catalog(&source, &catalog);

    std::fs::create_dir_all(&cli.output)
        .with_context(|| format!("failed to create output directory {:?}", cli.output))?;

    let mut written = 0;
    for (index, (filter, result)) in catalog.iter().zip(batch.iter()).enumerate() {
        match result {
            Ok(image) => {
                let path = cli.output.join(format!(
                    "{}_{:02}_{}.png",
                    config.output.file_prefix,
                    index + 1,
                    filter.name()
                ));
                match image.save_png(&path) {
                    Ok(()) => {
                        info!("Wrote {:?}", path);
                        written += 1;
                    }
                    Err(e) => error!("Could not save {:?}: {}", path, e),
                }
            }
            Err(e) => warn!("Skipping {}: {}", filter.name(), e),
        }
    }

    if written == 0 && !batch.is_empty() {
        bail!("no preview could be rendered");
    }

    info!("Done: {}/{} previews written to {:?}", written, batch.len(), cli.output);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use snap_filters::filters::FilterDefinition;

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|name| name.to_string()).collect()
    }

    #[test]
    fn test_select_filters_keeps_catalog_order() {
        let catalog = FilterCatalog::builtin(&ProcessingContext::new()).unwrap();
        let selected = select_filters(&catalog, &names(&["sepia_tone", "color_clamp"])).unwrap();
        assert_eq!(selected.names(), vec!["color_clamp", "sepia_tone"]);
    }

    #[test]
    fn test_select_filters_outside_catalog_fails() {
        let context = ProcessingContext::new();
        let catalog = FilterCatalog::from_definitions(&context, vec![FilterDefinition::PhotoEffectNoir]).unwrap();

        assert!(select_filters(&catalog, &names(&["sepia_tone"])).is_err());
        assert!(select_filters(&catalog, &names(&["posterize"])).is_err());
        assert_eq!(select_filters(&catalog, &names(&["photo_effect_noir"])).unwrap().len(), 1);
    }
}
