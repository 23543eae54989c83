use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};
use strum::EnumIter;

/// SEC form type of a filing. Anything not listed is kept verbatim in `Other`,
/// which is also where amendments such as `10-K/A` land.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, EnumIter)]
#[serde(try_from = "String", into = "String")]
pub enum ReportType {
    Form10K,
    Form6K,
    Form10Q,
    Form8K,
    Form3,
    Form4,
    Form5,
    FormS1,
    FormS3,
    FormS4,
    FormF1,
    FormF3,
    FormDEF14A,
    Form13FHR,
    FormSC13D,
    FormSC13G,
    FormSD,
    Form20F,
    Form40F,
    FormNCSR,
    FormNPORT,
    FormNQ,
    FormNPX,
    Form144,
    Other(String),
}

impl TryFrom<String> for ReportType {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        ReportType::from_str(&s)
    }
}

impl From<ReportType> for String {
    fn from(report_type: ReportType) -> Self {
        report_type.to_string()
    }
}

impl fmt::Display for ReportType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReportType::Form10K => write!(f, "10-K"),
            ReportType::Form6K => write!(f, "6-K"),
            ReportType::Form10Q => write!(f, "10-Q"),
            ReportType::Form8K => write!(f, "8-K"),
            ReportType::Form3 => write!(f, "3"),
            ReportType::Form4 => write!(f, "4"),
            ReportType::Form5 => write!(f, "5"),
            ReportType::FormS1 => write!(f, "S-1"),
            ReportType::FormS3 => write!(f, "S-3"),
            ReportType::FormS4 => write!(f, "S-4"),
            ReportType::FormF1 => write!(f, "F-1"),
            ReportType::FormF3 => write!(f, "F-3"),
            ReportType::FormDEF14A => write!(f, "DEF 14A"),
            ReportType::Form13FHR => write!(f, "13F-HR"),
            ReportType::FormSC13D => write!(f, "SC 13D"),
            ReportType::FormSC13G => write!(f, "SC 13G"),
            ReportType::FormSD => write!(f, "SD"),
            ReportType::Form20F => write!(f, "20-F"),
            ReportType::Form40F => write!(f, "40-F"),
            ReportType::FormNCSR => write!(f, "N-CSR"),
            ReportType::FormNPORT => write!(f, "N-PORT"),
            ReportType::FormNQ => write!(f, "N-Q"),
            ReportType::FormNPX => write!(f, "N-PX"),
            ReportType::Form144 => write!(f, "144"),
            ReportType::Other(s) => write!(f, "{}", s),
        }
    }
}

impl FromStr for ReportType {
    type Err = String;
    fn from_str(s: &str) -> std::result::Result<ReportType, std::string::String> {
        match s.trim().to_uppercase().as_str() {
            "10-K" => Ok(ReportType::Form10K),
            "6-K" => Ok(ReportType::Form6K),
            "10-Q" => Ok(ReportType::Form10Q),
            "8-K" => Ok(ReportType::Form8K),
            "3" => Ok(ReportType::Form3),
            "4" => Ok(ReportType::Form4),
            "5" => Ok(ReportType::Form5),
            "S-1" => Ok(ReportType::FormS1),
            "S-3" => Ok(ReportType::FormS3),
            "S-4" => Ok(ReportType::FormS4),
            "F-1" => Ok(ReportType::FormF1),
            "F-3" => Ok(ReportType::FormF3),
            "DEF 14A" => Ok(ReportType::FormDEF14A),
            "13F-HR" => Ok(ReportType::Form13FHR),
            "SC 13D" => Ok(ReportType::FormSC13D),
            "SC 13G" => Ok(ReportType::FormSC13G),
            "SD" => Ok(ReportType::FormSD),
            "20-F" => Ok(ReportType::Form20F),
            "40-F" => Ok(ReportType::Form40F),
            "N-CSR" => Ok(ReportType::FormNCSR),
            "N-PORT" => Ok(ReportType::FormNPORT),
            "N-Q" => Ok(ReportType::FormNQ),
            "N-PX" => Ok(ReportType::FormNPX),
            "144" => Ok(ReportType::Form144),
            _ => Ok(ReportType::Other(s.trim().to_string())),
        }
    }
}

impl ReportType {
    pub fn is_amendment(&self) -> bool {
        matches!(self, ReportType::Other(s) if s.ends_with("/A"))
    }

    /// Periodic reports carry the financial statements (and the XBRL linkbases).
    pub fn is_periodic(&self) -> bool {
        match self {
            ReportType::Form10K | ReportType::Form10Q | ReportType::Form20F | ReportType::Form40F => true,
            ReportType::Other(s) => {
                matches!(s.trim_end_matches("/A"), "10-K" | "10-Q" | "20-F" | "40-F")
            }
            _ => false,
        }
    }
}

/// Expands form names with their amendment variants: `["10-K"]` becomes
/// `["10-K", "10-K/A"]`.
pub fn form_with_amendments(forms: &[&str]) -> Vec<String> {
    forms
        .iter()
        .map(|f| f.to_string())
        .chain(forms.iter().map(|f| format!("{}/A", f)))
        .collect()
}
