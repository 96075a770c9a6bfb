//! Common types and utilities shared across commands

use clap::Parser;
use wgt_config::Config;
use wgt_manifest::Locale;

/// Global CLI options available to all commands
#[derive(Parser, Debug, Clone, Default)]
pub struct GlobalOpts {
    #[arg(short, long, global = true, help = "Decrease verbosity")]
    pub quiet: bool,

    #[arg(short, long, global = true, action = clap::ArgAction::Count, help = "Increase verbosity (-v for debug, -vv for trace)")]
    pub verbose: u8,

    #[arg(
        long,
        global = true,
        help = "Only print errors on the console (everything is still logged to file)"
    )]
    pub no_stdout: bool,
}

impl GlobalOpts {
    /// Get the effective verbosity level
    /// - 0: quiet/warn only
    /// - 1: debug (-v)
    /// - 2: trace (-vv)
    pub fn verbosity_level(&self) -> u8 {
        if self.quiet {
            0
        } else {
            self.verbose
        }
    }
}

/// Locale for localized manifest text: explicit flag, then config, then environment
pub fn resolve_locale(flag: Option<&str>, config: &Config) -> Locale {
    non_empty(flag)
        .or_else(|| non_empty(config.locale.as_deref()))
        .map_or_else(Locale::from_env, Locale::new)
}

fn non_empty(name: Option<&str>) -> Option<&str> {
    name.map(str::trim).filter(|n| !n.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quiet_overrides_verbose() {
        let opts = GlobalOpts {
            quiet: true,
            verbose: 2,
            no_stdout: false,
        };
        assert_eq!(opts.verbosity_level(), 0);

        let opts = GlobalOpts {
            verbose: 2,
            ..GlobalOpts::default()
        };
        assert_eq!(opts.verbosity_level(), 2);
    }

    #[test]
    fn test_locale_precedence() {
        let config = Config {
            locale: Some("de_DE".to_string()),
            ..Config::default()
        };
        assert_eq!(resolve_locale(Some("fr_FR"), &config).name(), "fr_FR");
        assert_eq!(resolve_locale(None, &config).name(), "de_DE");
        assert_eq!(resolve_locale(Some("  "), &config).name(), "de_DE");
    }
}
