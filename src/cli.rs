use clap::Parser;

use crate::config::AppConfig;

#[derive(Parser, Debug)]
#[command(name = "flavordesk", version, about = "Propose flavors for an EOSC performance site")]
pub struct Args {
    /// Id of the site to propose flavors for
    #[arg(short, long)]
    pub site: String,

    /// Base URL of the performance API (e.g., "http://localhost:5000/api/v1")
    #[arg(long)]
    pub api_url: Option<String>,

    /// Bearer token used to authenticate submissions
    #[arg(long, env = "FLAVORDESK_TOKEN", hide_env_values = true)]
    pub token: Option<String>,
}

impl Args {
    /// Override config values with the ones given on the command line.
    pub fn apply(&self, config: &mut AppConfig) {
        if let Some(url) = &self.api_url {
            config.api.base_url.clone_from(url);
        }
        if let Some(token) = &self.token {
            config.api.token = Some(token.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_site_is_required() {
        assert!(Args::try_parse_from(["flavordesk"]).is_err());
    }

    #[test]
    fn test_overrides_config() {
        let args = Args::try_parse_from([
            "flavordesk",
            "--site",
            "s1",
            "--api-url",
            "http://localhost:5000/api/v1",
            "--token",
            "abc",
        ])
        .unwrap();

        let mut config = AppConfig::default();
        args.apply(&mut config);

        assert_eq!(args.site, "s1");
        assert_eq!(config.api.base_url, "http://localhost:5000/api/v1");
        assert_eq!(config.api.token.as_deref(), Some("abc"));
    }

    #[test]
    fn test_missing_overrides_keep_config() {
        let args = Args::try_parse_from(["flavordesk", "-s", "s1"]).unwrap();
        let mut config = AppConfig::default();
        config.api.token = Some("from-file".to_string());
        args.apply(&mut config);

        if args.token.is_none() {
            assert_eq!(config.api.token.as_deref(), Some("from-file"));
        }
        assert_eq!(config.api.base_url, AppConfig::default().api.base_url);
    }
}
