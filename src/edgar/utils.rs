use chrono::{Datelike, NaiveDate};
use once_cell::sync::Lazy;
use regex::Regex;

pub type YearAndQuarter = (i32, u32);

// EDGAR full-text indexes start in the third quarter of 1994
const FIRST_QUARTER: YearAndQuarter = (1994, 3);

static DATE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("valid date regex"));

/// A `YYYY-MM-DD` string naming a real calendar day.
pub fn is_valid_date(date_str: &str) -> bool {
    DATE_RE.is_match(date_str) && NaiveDate::parse_from_str(date_str, "%Y-%m-%d").is_ok()
}

/// Either a single date or a `start:end` range where each side may be empty.
pub fn is_valid_filing_date(filing_date: &str) -> bool {
    match filing_date.split_once(':') {
        Some((start, end)) => {
            if end.contains(':') {
                return false;
            }
            (start.is_empty() || is_valid_date(start)) && (end.is_empty() || is_valid_date(end))
        }
        None => is_valid_date(filing_date),
    }
}

pub fn previous_quarter(year: i32, quarter: u32) -> YearAndQuarter {
    if quarter == 1 {
        (year - 1, 4)
    } else {
        (year, quarter - 1)
    }
}

pub fn year_and_quarter(date: NaiveDate) -> YearAndQuarter {
    (date.year(), (date.month() - 1) / 3 + 1)
}

/// Every quarter with an EDGAR index, from 1994Q3 up to the quarter containing `today`.
pub fn available_quarters(today: NaiveDate) -> Vec<YearAndQuarter> {
    let (current_year, current_quarter) = year_and_quarter(today);
    let mut quarters = Vec::new();
    for year in FIRST_QUARTER.0..=current_year {
        for quarter in 1..=4 {
            let yq = (year, quarter);
            if yq >= FIRST_QUARTER && yq <= (current_year, current_quarter) {
                quarters.push(yq);
            }
        }
    }
    quarters
}

/// Cross product of years and quarters (all four when `quarters` is empty),
/// keeping only quarters that have an index as of `today`.
pub fn expand_quarters(years: &[i32], quarters: &[u32], today: NaiveDate) -> Vec<YearAndQuarter> {
    let quarters: Vec<u32> = if quarters.is_empty() {
        vec![1, 2, 3, 4]
    } else {
        quarters.to_vec()
    };
    let available = available_quarters(today);

    years
        .iter()
        .flat_map(|&year| quarters.iter().map(move |&quarter| (year, quarter)))
        .filter(|yq| available.contains(yq))
        .collect()
}
