//! `wgt inspect`: load a widget package and print what its manifest declares

use crate::common::resolve_locale;
use crate::config_manager::Config;
use crate::logger;
use anyhow::Context;
use clap::Args;
use colored::Colorize;
use serde::Serialize;
use std::path::{Path, PathBuf};
use wgt_manifest::{PackageDescriptor, WidgetPackage};

#[derive(Args, Debug, Clone)]
pub struct InspectArgs {
    /// Package directory, or any file inside it
    pub path: PathBuf,

    /// Print the descriptor as JSON
    #[arg(long)]
    pub json: bool,

    /// Locale used for localized names and descriptions (e.g. fr_FR)
    #[arg(long)]
    pub locale: Option<String>,
}

#[derive(Serialize)]
struct InspectReport<'a> {
    root: &'a Path,
    entry_path: &'a Path,
    locale: &'a str,
    #[serde(flatten)]
    descriptor: &'a PackageDescriptor,
}

pub fn handle_inspect(args: InspectArgs) -> anyhow::Result<()> {
    let config = Config::load().context("Failed to load config")?;
    let locale = resolve_locale(args.locale.as_deref(), &config);
    logger::debug(&format!(
        "Inspecting {} with locale {}",
        args.path.display(),
        locale
    ));

    let package = WidgetPackage::load(&args.path, &locale)
        .with_context(|| format!("Cannot load widget package {}", args.path.display()))?;

    let report = InspectReport {
        root: package.root(),
        entry_path: package.entry_path(),
        locale: locale.name(),
        descriptor: package.descriptor(),
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report);
    }
    Ok(())
}

fn print_report(report: &InspectReport<'_>) {
    let descriptor = report.descriptor;
    let metadata = &descriptor.metadata;

    let title = if metadata.name.is_empty() {
        "(unnamed widget)"
    } else {
        metadata.name.as_str()
    };
    println!("{}", title.bold().green());
    print_field("id", &metadata.id);
    print_field("version", &metadata.version);
    print_field("description", &metadata.description);
    print_field("author", &metadata.author);
    print_field("author-href", &metadata.author_href);
    print_field("author-email", &metadata.author_email);
    print_field("root", &report.root.display().to_string());
    print_field("entry", &report.entry_path.display().to_string());
    print_field(
        "size",
        &format!("{}x{}", descriptor.width, descriptor.height),
    );
    print_field("resizable", &descriptor.resizable.to_string());
    print_field("freezable", &descriptor.freezable.to_string());
    print_field("roles", &roles(descriptor));

    if !descriptor.preferences.is_empty() {
        println!("  {}", "preferences:".cyan());
        for preference in descriptor.preferences.values() {
            let readonly = if preference.readonly {
                " (readonly)".yellow().to_string()
            } else {
                String::new()
            };
            println!("    {} = {}{}", preference.name, preference.value, readonly);
        }
    }
}

fn print_field(key: &str, value: &str) {
    if !value.is_empty() {
        println!("  {}: {}", key.cyan(), value);
    }
}

fn roles(descriptor: &PackageDescriptor) -> String {
    match (descriptor.can_be_content, descriptor.can_be_tool) {
        (true, true) => "content, tool".to_string(),
        (true, false) => "content".to_string(),
        (false, true) => "tool".to_string(),
        (false, false) => "none".to_string(),
    }
}
