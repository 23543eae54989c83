use anyhow::{anyhow, Result};
use url::Url;

pub const SEC_EDGAR_URL: &str = "https://www.sec.gov/Archives/edgar";

#[derive(Clone, Debug)]
pub struct EdgarConfig {
    pub archives_url: Url,
}

impl EdgarConfig {
    pub fn from_env() -> Result<Self> {
        let raw = std::env::var("EDGAR_ARCHIVES_URL").unwrap_or_else(|_| SEC_EDGAR_URL.to_string());
        Self::with_archives_url(&raw)
    }

    pub fn with_archives_url(raw: &str) -> Result<Self> {
        let archives_url = Url::parse(raw)
            .map_err(|e| anyhow!("Invalid EDGAR archives URL {}: {}", raw, e))?;

        if archives_url.cannot_be_a_base() {
            return Err(anyhow!("EDGAR archives URL cannot be used as a base: {}", raw));
        }

        log::debug!("Using EDGAR archives URL {}", archives_url);
        Ok(Self { archives_url })
    }

    /// Archives URL without a trailing slash, ready for path concatenation.
    pub fn base(&self) -> &str {
        self.archives_url.as_str().trim_end_matches('/')
    }
}

impl Default for EdgarConfig {
    fn default() -> Self {
        Self {
            archives_url: Url::parse(SEC_EDGAR_URL).expect("SEC_EDGAR_URL is a valid URL"),
        }
    }
}
