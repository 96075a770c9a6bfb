//! `wgt wrap`: wrap a media file or URL into a widget package

use crate::commands::templates::template_cache;
use crate::config_manager::Config;
use crate::logger;
use anyhow::Context;
use clap::Args;
use std::path::PathBuf;
use wgt_manifest::types::{DEFAULT_HEIGHT, DEFAULT_WIDTH};
use wgt_wrapper::{create_wrapper, SizeHint};

#[derive(Args, Debug, Clone)]
pub struct WrapArgs {
    /// Local media file or URL to embed
    pub source: String,

    /// MIME type of the media; the file extension is used when no template matches
    #[arg(long, default_value = "")]
    pub mime: String,

    /// Widget width in pixels
    #[arg(long, default_value_t = DEFAULT_WIDTH)]
    pub width: u32,

    /// Widget height in pixels
    #[arg(long, default_value_t = DEFAULT_HEIGHT)]
    pub height: u32,

    /// Package name (defaults to the source's file name up to its first dot)
    #[arg(long, default_value = "")]
    pub name: String,

    /// Directory receiving the package (defaults to the configured library path)
    #[arg(long)]
    pub out: Option<PathBuf>,
}

pub fn handle_wrap(args: WrapArgs) -> anyhow::Result<()> {
    let config = Config::load().context("Failed to load config")?;
    let cache = template_cache(&config);
    let target_dir = args.out.unwrap_or_else(|| config.library_dir());
    logger::debug(&format!(
        "Wrapping {} into {} using templates from {}",
        args.source,
        target_dir.display(),
        cache.dir().display()
    ));

    logger::spinner_start(&format!("Wrapping {}", args.source));
    let created = create_wrapper(
        &cache,
        &args.source,
        &target_dir,
        &args.mime,
        SizeHint::new(args.width, args.height),
        &args.name,
    );

    match created {
        Ok(package_dir) => {
            logger::spinner_success(&format!("Created {}", package_dir.display()));
            println!("{}", package_dir.display());
            Ok(())
        }
        Err(e) => {
            logger::spinner_stop();
            Err(e).with_context(|| format!("Cannot wrap {}", args.source))
        }
    }
}
