use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use strum::{AsRefStr, Display, EnumIter, EnumString};

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, AsRefStr, EnumIter,
)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StandardStatement {
    BalanceSheet,
    IncomeStatement,
    CashFlow,
    Equity,
    ComprehensiveIncome,
    CoverPage,
}

const STANDARD_STATEMENTS: &[(StandardStatement, &[&str])] = &[
    (
        StandardStatement::BalanceSheet,
        &[
            "CONSOLIDATEDBALANCESHEETS",
            "CONSOLIDATEDBALANCESHEET",
            "COMPREHENSIVEBALANCESHEETS",
            "COMPREHENSIVEBALANCESHEET",
            "BALANCESHEET",
            "BALANCESHEETS",
            "STATEMENTOFFINANCIALPOSITION",
            "STATEMENTSOFFINANCIALPOSITION",
            "CONSOLIDATEDSTATEMENTOFFINANCIALPOSITION",
            "CONSOLIDATEDSTATEMENTSOFFINANCIALPOSITION",
        ],
    ),
    (
        StandardStatement::IncomeStatement,
        &[
            "CONSOLIDATEDSTATEMENTSOFOPERATIONS",
            "CONSOLIDATEDSTATEMENTOFOPERATIONS",
            "STATEMENTSOFOPERATIONS",
            "STATEMENTOFOPERATIONS",
            "INCOMESTATEMENT",
            "INCOMESTATEMENTS",
            "CONSOLIDATEDINCOMESTATEMENT",
            "CONSOLIDATEDINCOMESTATEMENTS",
            "STATEMENTSOFINCOME",
            "STATEMENTOFINCOME",
            "CONSOLIDATEDSTATEMENTSOFINCOME",
            "CONSOLIDATEDSTATEMENTOFINCOME",
            "CONSOLIDATEDSTATEMENTSOFINCOMELOSS",
            "CONSOLIDATEDSTATEMENTOFINCOMELOSS",
            "STATEMENTSOFEARNINGS",
            "STATEMENTOFEARNINGS",
            "CONSOLIDATEDSTATEMENTSOFEARNINGS",
            "CONSOLIDATEDSTATEMENTOFEARNINGS",
        ],
    ),
    (
        StandardStatement::CashFlow,
        &[
            "CONSOLIDATEDSTATEMENTSOFCASHFLOWS",
            "CONSOLIDATEDSTATEMENTOFCASHFLOWS",
            "STATEMENTOFCASHFLOWS",
            "STATEMENTSOFCASHFLOWS",
            "CASHFLOWSTATEMENT",
            "CASHFLOWSTATEMENTS",
        ],
    ),
    (
        StandardStatement::Equity,
        &[
            "CONSOLIDATEDSTATEMENTSOFSHAREHOLDERSEQUITY",
            "CONSOLIDATEDSTATEMENTOFSHAREHOLDERSEQUITY",
            "CONSOLIDATEDSTATEMENTSOFSTOCKHOLDERSEQUITY",
            "CONSOLIDATEDSTATEMENTOFSTOCKHOLDERSEQUITY",
            "STATEMENTOFSHAREHOLDERSEQUITY",
            "STATEMENTOFSTOCKHOLDERSEQUITY",
            "STATEMENTSOFCHANGESINEQUITY",
            "STATEMENTOFCHANGESINEQUITY",
            "CONSOLIDATEDSTATEMENTSOFCHANGESINEQUITY",
            "CONSOLIDATEDSTATEMENTOFCHANGESINEQUITY",
            "STATEMENTOFEQUITY",
            "STATEMENTSOFEQUITY",
        ],
    ),
    (
        StandardStatement::ComprehensiveIncome,
        &[
            "CONSOLIDATEDSTATEMENTSOFCOMPREHENSIVEINCOME",
            "CONSOLIDATEDSTATEMENTOFCOMPREHENSIVEINCOME",
            "STATEMENTOFCOMPREHENSIVEINCOME",
            "STATEMENTSOFCOMPREHENSIVEINCOME",
            "COMPREHENSIVEINCOMESTATEMENT",
            "COMPREHENSIVEINCOMESTATEMENTS",
        ],
    ),
    (
        StandardStatement::CoverPage,
        &[
            "COVERPAGE",
            "COVER",
            "DOCUMENTANDENTITYINFORMATION",
            "ENTITYINFORMATION",
        ],
    ),
];

static VARIANT_TO_STATEMENT: Lazy<HashMap<&'static str, StandardStatement>> = Lazy::new(|| {
    let mut map = HashMap::new();
    for (statement, variants) in STANDARD_STATEMENTS {
        for variant in variants.iter() {
            map.entry(*variant).or_insert(*statement);
        }
    }
    map
});

/// `http://x.com/role/ConsolidatedBalanceSheets.htm` -> `CONSOLIDATEDBALANCESHEETS`
pub fn normalize_role_name(role_uri: &str) -> String {
    let last_segment = role_uri.rsplit('/').next().unwrap_or(role_uri);
    let stem = last_segment.split('.').next().unwrap_or(last_segment);
    stem.chars()
        .filter(|c| c.is_alphanumeric())
        .flat_map(char::to_uppercase)
        .collect()
}

impl StandardStatement {
    pub fn from_role(role_uri: &str) -> Option<StandardStatement> {
        VARIANT_TO_STATEMENT
            .get(normalize_role_name(role_uri).as_str())
            .copied()
    }

    pub fn name_variants(&self) -> &'static [&'static str] {
        STANDARD_STATEMENTS
            .iter()
            .find(|(statement, _)| statement == self)
            .map(|(_, variants)| *variants)
            .unwrap_or(&[])
    }
}

/// Maps each role to its standard statement. Roles are visited in the given
/// order and a later role replaces an earlier one for the same statement.
pub fn build_statement_map<'a>(
    roles: impl IntoIterator<Item = &'a str>,
) -> HashMap<StandardStatement, String> {
    let mut map = HashMap::new();
    for role in roles {
        if let Some(statement) = StandardStatement::from_role(role) {
            if let Some(previous) = map.insert(statement, role.to_string()) {
                log::debug!("{} mapped to {} replaces {}", statement, role, previous);
            }
        }
    }
    map
}
