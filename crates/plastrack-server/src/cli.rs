//! Command line arguments.

use clap::Parser;
use plastrack_config::Config;
use std::path::PathBuf;

/// Command line arguments
#[derive(Parser, Debug, Default)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Configuration file path
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Address to listen on, e.g. 127.0.0.1:5000
    #[arg(short, long)]
    pub bind: Option<String>,

    /// Path of the usage record file
    #[arg(short, long)]
    pub data_file: Option<PathBuf>,

    /// Log level filter
    #[arg(short, long)]
    pub log_level: Option<String>,
}

impl Args {
    /// Applies flags on top of the loaded configuration.
    ///
    /// Flags win over both the configuration file and the environment.
    pub fn apply_to(&self, config: &mut Config) {
        if let Some(bind) = &self.bind {
            config.server.bind_address.clone_from(bind);
        }
        if let Some(data_file) = &self.data_file {
            config.storage.data_file.clone_from(data_file);
        }
        if let Some(level) = &self.log_level {
            config.logging.level.clone_from(level);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_flags() {
        let args = Args::parse_from([
            "plastrack",
            "--config",
            "tracker.yaml",
            "--bind",
            "0.0.0.0:8080",
            "--data-file",
            "data/usage.csv",
            "--log-level",
            "debug",
        ]);

        assert_eq!(args.config, Some(PathBuf::from("tracker.yaml")));
        assert_eq!(args.bind.as_deref(), Some("0.0.0.0:8080"));
        assert_eq!(args.data_file, Some(PathBuf::from("data/usage.csv")));
        assert_eq!(args.log_level.as_deref(), Some("debug"));
    }

    #[test]
    fn test_flags_override_config() {
        let mut config = Config::default();
        let args = Args {
            bind: Some("0.0.0.0:9000".to_string()),
            data_file: Some(PathBuf::from("elsewhere.csv")),
            ..Args::default()
        };

        args.apply_to(&mut config);

        assert_eq!(config.server.bind_address, "0.0.0.0:9000");
        assert_eq!(config.storage.data_file, PathBuf::from("elsewhere.csv"));
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_no_flags_leave_config_alone() {
        let mut config = Config::default();
        Args::parse_from(["plastrack"]).apply_to(&mut config);
        assert_eq!(config, Config::default());
    }
}
