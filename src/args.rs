use clap::Parser;
use std::path::PathBuf;

use crate::config::Config;

#[derive(Parser, Debug)]
#[command(name = "linkshelf")]
#[command(about = "Keep a shelf of useful links with short descriptions")]
#[command(version)]
pub struct Args {
    /// Path to config.toml (defaults to the user config directory)
    #[arg(long, env = "LINKSHELF_CONFIG")]
    pub config: Option<PathBuf>,

    /// Start with the sample links
    #[arg(long, conflicts_with = "no_samples")]
    pub samples: bool,

    /// Start with an empty shelf
    #[arg(long)]
    pub no_samples: bool,

    /// Command used to open links in a browser
    #[arg(long, env = "LINKSHELF_OPENER")]
    pub opener: Option<String>,

    /// Write logs to this file
    #[arg(long, env = "LINKSHELF_LOG_FILE")]
    pub log_file: Option<PathBuf>,

    /// Log at debug level unless RUST_LOG says otherwise
    #[arg(long)]
    pub debug: bool,
}

impl Args {
    /// Command-line values win over the config file
    pub fn apply(&self, mut config: Config) -> Config {
        if self.samples {
            config.seed_samples = true;
        }
        if self.no_samples {
            config.seed_samples = false;
        }
        if let Some(ref opener) = self.opener {
            config.opener = Some(opener.clone());
        }
        if let Some(ref log_file) = self.log_file {
            config.log_file = Some(log_file.clone());
        }
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_override_config() {
        let args = Args::parse_from(["linkshelf", "--no-samples", "--opener", "firefox"]);
        let config = args.apply(Config::default());
        assert!(!config.seed_samples);
        assert_eq!(config.opener.as_deref(), Some("firefox"));
    }

    #[test]
    fn absent_flags_keep_config() {
        let file_config = Config {
            seed_samples: false,
            log_file: Some(PathBuf::from("/tmp/linkshelf.log")),
            ..Config::default()
        };
        let args = Args::parse_from(["linkshelf"]);
        assert_eq!(args.apply(file_config.clone()), file_config);
    }

    #[test]
    fn samples_flags_conflict() {
        assert!(Args::try_parse_from(["linkshelf", "--samples", "--no-samples"]).is_err());
    }
}
