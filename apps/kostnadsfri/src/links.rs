use crate::config::Config;

/// Where generated pages live.
#[derive(Debug, Clone)]
pub struct LinkTargets {
    pub sajtmaskin_base: String,
    pub sajtstudio_base: String,
}

impl LinkTargets {
    pub fn new(sajtmaskin_base: impl Into<String>, sajtstudio_base: impl Into<String>) -> Self {
        Self {
            sajtmaskin_base: sajtmaskin_base.into().trim_end_matches('/').to_string(),
            sajtstudio_base: sajtstudio_base.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(&config.sajtmaskin_base_url, &config.sajtstudio_base_url)
    }

    /// SajtMaskin page: `<base>/kostnadsfri/<slug>`.
    pub fn kostnadsfri_url(&self, slug: &str) -> String {
        format!("{}/kostnadsfri/{slug}", self.sajtmaskin_base)
    }

    /// Sajtstudio protected embed: `<base>/<slug>`.
    pub fn studio_url(&self, slug: &str) -> String {
        format!("{}/{slug}", self.sajtstudio_base)
    }

    /// Page-creation endpoint on SajtMaskin.
    pub fn page_api_url(&self) -> String {
        format!("{}/api/kostnadsfri", self.sajtmaskin_base)
    }
}
