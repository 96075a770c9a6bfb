use crate::config_manager::{Config, TEMPLATE_SUBDIR};
use crate::logger;
use crate::GlobalOpts;
use anyhow::Context;
use colored::Colorize;
use wgt_wrapper::TemplateCache;

/// Template cache for the configured resources directory
pub fn template_cache(config: &Config) -> TemplateCache {
    TemplateCache::new(config.resources_dir().join(TEMPLATE_SUBDIR))
}

pub fn handle_templates(opts: &GlobalOpts) -> anyhow::Result<()> {
    let config = Config::load().context("Failed to load config")?;
    let cache = template_cache(&config);
    let templates = cache.ensure_loaded();

    if templates.is_empty() {
        logger::warn(&format!(
            "No wrapper templates found in {}",
            cache.dir().display()
        ));
        return Ok(());
    }

    println!("{}", "MIME types:".bold().green());
    for mime in templates.mime_types() {
        println!("  {}", mime);
    }
    println!("{}", "Extensions:".bold().green());
    for extension in templates.extensions() {
        println!("  {}", extension);
    }

    if templates.config().is_empty() {
        logger::warn("Wrapper config template is missing; generated manifests will be empty");
    } else if opts.verbosity_level() > 0 {
        println!("{} {}", "from".cyan(), cache.dir().display());
    }
    Ok(())
}
