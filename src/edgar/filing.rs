use anyhow::{anyhow, Context, Result};
use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::path::Path;

use super::report::ReportType;
use crate::core::config::EdgarConfig;

static ACCESSION_NUMBER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{10}-\d{2}-\d{6}$").expect("valid accession regex"));

pub fn is_valid_accession_number(accession_number: &str) -> bool {
    ACCESSION_NUMBER_RE.is_match(accession_number)
}

/// Metadata of a single SEC filing. Two filings are the same filing when
/// their accession numbers match.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Filing {
    #[serde(rename = "accession_number")]
    pub accession_no: String,
    pub cik: u64,
    pub company: String,
    pub form: ReportType,
    pub filing_date: NaiveDate,
}

impl Filing {
    pub fn new(
        cik: u64,
        company: impl Into<String>,
        form: ReportType,
        filing_date: NaiveDate,
        accession_no: impl Into<String>,
    ) -> Result<Self> {
        let accession_no = accession_no.into();
        if !is_valid_accession_number(&accession_no) {
            return Err(anyhow!("Invalid accession number: {}", accession_no));
        }

        Ok(Self {
            accession_no,
            cik,
            company: company.into(),
            form,
            filing_date,
        })
    }

    pub fn accession_number(&self) -> &str {
        &self.accession_no
    }

    pub fn base_dir(&self, config: &EdgarConfig) -> String {
        format!(
            "{}/data/{}/{}",
            config.base(),
            self.cik,
            self.accession_no.replace('-', "")
        )
    }

    pub fn homepage_url(&self, config: &EdgarConfig) -> String {
        format!("{}/data/{}/{}-index.html", config.base(), self.cik, self.accession_no)
    }

    pub fn text_url(&self, config: &EdgarConfig) -> String {
        format!("{}/{}.txt", self.base_dir(config), self.accession_no)
    }

    pub fn index_header_url(&self, config: &EdgarConfig) -> String {
        format!("{}/index-headers.html", self.base_dir(config))
    }

    pub fn url(&self, config: &EdgarConfig) -> String {
        self.homepage_url(config)
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self).map_err(|e| anyhow!("Failed to serialize filing: {}", e))
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let filing: Filing = serde_json::from_str(json)
            .map_err(|e| anyhow!("Failed to parse filing JSON: {}", e))?;

        if !is_valid_accession_number(&filing.accession_no) {
            return Err(anyhow!("Invalid accession number: {}", filing.accession_no));
        }
        Ok(filing)
    }

    pub fn from_json_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read filing from {:?}", path))?;
        Self::from_json(&content)
    }
}

impl PartialEq for Filing {
    fn eq(&self, other: &Self) -> bool {
        self.accession_no == other.accession_no
    }
}

impl Eq for Filing {}

impl Hash for Filing {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.accession_no.hash(state);
    }
}

impl fmt::Display for Filing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Filing(form='{}', filing_date='{}', company='{}', cik={}, accession_no='{}')",
            self.form, self.filing_date, self.company, self.cik, self.accession_no
        )
    }
}
