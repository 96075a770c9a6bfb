//! `wgt wrap-html`: turn an HTML fragment into a resizable widget package

use crate::config_manager::Config;
use crate::logger;
use anyhow::Context;
use clap::Args;
use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;
use wgt_manifest::types::{DEFAULT_HEIGHT, DEFAULT_WIDTH};
use wgt_wrapper::{create_html_wrapper, SizeHint};

#[derive(Args, Debug, Clone)]
pub struct WrapHtmlArgs {
    /// File holding the HTML fragment, or `-` to read it from stdin
    pub input: String,

    /// Widget name; also names the package and its HTML document
    #[arg(long)]
    pub name: String,

    /// Widget width in pixels
    #[arg(long, default_value_t = DEFAULT_WIDTH)]
    pub width: u32,

    /// Widget height in pixels
    #[arg(long, default_value_t = DEFAULT_HEIGHT)]
    pub height: u32,

    /// Directory receiving the package (defaults to the configured library path)
    #[arg(long)]
    pub out: Option<PathBuf>,
}

pub fn handle_wrap_html(args: WrapHtmlArgs) -> anyhow::Result<()> {
    let html = read_input(&args.input)?;
    logger::info(&format!("Read {} bytes of HTML from {}", html.len(), args.input));
    let target_dir = match args.out {
        Some(dir) => dir,
        None => Config::load()
            .context("Failed to load config")?
            .library_dir(),
    };

    let package_dir = create_html_wrapper(
        &html,
        &target_dir,
        SizeHint::new(args.width, args.height),
        &args.name,
    )
    .with_context(|| format!("Cannot create HTML widget '{}'", args.name))?;

    logger::success(&format!("Created {}", package_dir.display()));
    println!("{}", package_dir.display());
    Ok(())
}

fn read_input(input: &str) -> anyhow::Result<String> {
    if input == "-" {
        let mut html = String::new();
        io::stdin()
            .read_to_string(&mut html)
            .context("Failed to read HTML from stdin")?;
        Ok(html)
    } else {
        fs::read_to_string(input).with_context(|| format!("Failed to read {}", input))
    }
}
