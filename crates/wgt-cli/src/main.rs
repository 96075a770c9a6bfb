use clap::{Parser, Subcommand};
use wgt::{
    commands::{
        config::{self, ConfigAction},
        inspect::{self, InspectArgs},
        templates,
        wrap::{self, WrapArgs},
        wrap_html::{self, WrapHtmlArgs},
    },
    init_tracing, logger, GlobalOpts,
};

#[derive(Parser)]
#[command(name = "wgt")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(
    about = "W3C widget package toolkit",
    long_about = "wgt inspects W3C widget packages and wraps media files or HTML fragments into new ones."
)]
struct Cli {
    #[command(flatten)]
    global: GlobalOpts,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show what a widget package's manifest declares
    Inspect(InspectArgs),
    /// Wrap a media file or URL into a widget package
    Wrap(WrapArgs),
    /// Wrap an HTML fragment into a widget package
    WrapHtml(WrapHtmlArgs),
    /// List the installed wrapper templates
    Templates,
    /// Configure wgt
    #[command(subcommand_required = false, arg_required_else_help = false)]
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = logger::init_with_verbosity(cli.global.verbosity_level(), cli.global.no_stdout)
    {
        eprintln!("Warning: Failed to initialize logger: {}", e);
    }
    init_tracing(&cli.global);

    let result = match cli.command {
        Commands::Inspect(args) => inspect::handle_inspect(args),
        Commands::Wrap(args) => wrap::handle_wrap(args),
        Commands::WrapHtml(args) => wrap_html::handle_wrap_html(args),
        Commands::Templates => templates::handle_templates(&cli.global),
        Commands::Config { action } => config::handle_config(action, &cli.global),
    };

    if let Err(e) = result {
        logger::error(&format!("{:#}", e));
        std::process::exit(1);
    }
}
