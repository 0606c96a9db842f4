use std::path::PathBuf;

use clap::Parser;

/// Terminal playback console for a CRT media server.
#[derive(Debug, Parser)]
#[command(name = "crt", version, about)]
pub struct Args {
    /// Media server base URL; overrides `server.base_url` from the config file.
    #[arg(long, short = 's', value_name = "URL")]
    pub server: Option<String>,

    /// Read configuration from this file instead of the default location.
    #[arg(long, short = 'c', value_name = "PATH")]
    pub config: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = Args::try_parse_from(["crt"]).unwrap();
        assert!(args.server.is_none());
        assert!(args.config.is_none());
    }

    #[test]
    fn test_server_and_config() {
        let args = Args::try_parse_from([
            "crt",
            "--server",
            "http://10.0.0.5:5000",
            "-c",
            "/tmp/crt.toml",
        ])
        .unwrap();
        assert_eq!(args.server.as_deref(), Some("http://10.0.0.5:5000"));
        assert_eq!(args.config, Some(PathBuf::from("/tmp/crt.toml")));
    }

    #[test]
    fn test_unknown_flag_rejected() {
        assert!(Args::try_parse_from(["crt", "--daemon"]).is_err());
    }
}
