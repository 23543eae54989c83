mod common;

use common::{init_logging, read_test_file};
use edgar_xbrl::edgar::parsing::xbrl::normalize_concept;
use edgar_xbrl::{NodeType, PresentationElement, StandardStatement, XbrlPresentation};
use std::collections::HashSet;

const ROLE_A: &str = "http://acme.com/role/ConsolidatedBalanceSheets";
const ROLE_B: &str = "http://acme.com/role/RevenueByProductDetails";

fn parse(name: &str) -> XbrlPresentation {
    init_logging();
    XbrlPresentation::parse(&read_test_file(name)).unwrap()
}

fn concepts(elements: &[&PresentationElement]) -> Vec<String> {
    elements.iter().map(|e| e.concept.clone()).collect()
}

#[test]
fn test_two_role_scenario() {
    let p = parse("two_roles.xml");
    assert_eq!(p.list_roles(), vec![ROLE_A, ROLE_B]);

    let line_items = p.get_statement_line_items(ROLE_A);
    assert_eq!(concepts(&line_items), vec!["us-gaap_Assets", "us-gaap_Liabilities"]);
    assert!(line_items.iter().all(|e| e.node_type() == NodeType::LineItem));
    assert_eq!(
        line_items[0].preferred_label.as_deref(),
        Some("http://www.xbrl.org/2003/role/totalLabel")
    );

    let root_b = p.role(ROLE_B).unwrap();
    let axes = p.get_axes_for_role(root_b);
    assert_eq!(concepts(&axes), vec!["srt_ProductOrServiceAxis"]);

    let members = p.get_members_for_axis(axes[0].id);
    assert_eq!(concepts(&members), vec!["acme_WidgetsMember", "acme_GadgetsMember"]);

    assert_eq!(p.get_role_by_standard_name("BALANCE_SHEET"), Some(ROLE_A));
    assert_eq!(p.role_for_statement(StandardStatement::IncomeStatement), None);
}

#[test]
fn test_queries_do_not_cross_roles() {
    let p = parse("two_roles.xml");
    assert!(p.get_axes_for_role(ROLE_A).is_empty());
    assert!(p.get_statement_line_items(ROLE_B).is_empty());
}

#[test]
fn test_every_element_leads_back_to_its_root() {
    for fixture_name in ["two_roles.xml", "annual_report.xml", "legacy.xml"] {
        let p = parse(fixture_name);
        for (role, root) in p.roles() {
            for element in p.descendants(root) {
                let found = p.get_root_element(element.id).unwrap();
                assert_eq!(found.id, root.id, "{} in {} ({})", element.concept, role, fixture_name);
                if element.id != root.id {
                    let parent = p.element(element.parent.unwrap()).unwrap();
                    assert!(parent.children.contains(&element.id));
                }
            }
        }
    }
}

#[test]
fn test_siblings_have_distinct_concepts() {
    for fixture_name in ["two_roles.xml", "annual_report.xml", "legacy.xml"] {
        let p = parse(fixture_name);
        for (_, root) in p.roles() {
            for element in p.descendants(root) {
                let mut seen = HashSet::new();
                for child in p.children(element.id) {
                    assert!(
                        seen.insert(normalize_concept(&child.concept).to_string()),
                        "duplicate {} under {}",
                        child.concept,
                        element.concept
                    );
                }
            }
        }
    }
}

#[test]
fn test_index_covers_every_reachable_element() {
    let p = parse("annual_report.xml");
    for (role, root) in p.roles() {
        for element in p.descendants(root) {
            let roles = p.concept_index().get(&element.concept).unwrap();
            assert!(roles.iter().any(|r| r == role), "{} not indexed for {}", element.concept, role);
        }
    }
}

#[test]
fn test_legacy_linkbase_without_locators() {
    let p = parse("legacy.xml");
    let role = "http://legacy.example.com/role/StatementsOfOperations";
    let root = p.role(role).unwrap();

    let walk = p.descendants(root);
    let labels: HashSet<&str> = walk.iter().map(|e| e.label.as_str()).collect();
    for label in [
        "us-gaap_IncomeStatementAbstract",
        "us-gaap_Revenues_1",
        "us-gaap_CostOfRevenue",
        "us-gaap_NetIncomeLoss",
        "us-gaap_EarningsPerShareBasic",
    ] {
        assert!(labels.contains(label), "missing {}", label);
    }

    let top: Vec<_> = p.children(root.id).collect();
    assert_eq!(concepts(&top), vec!["us-gaap_IncomeStatementAbstract"]);
    assert!(top[0].href.is_empty());
    assert_eq!(
        p.get_roles_containing_concept("Revenues"),
        &[role.to_string()],
        "suffix is normalized away"
    );
    assert_eq!(p.get_role_by_standard_name("INCOME_STATEMENT"), Some(role));
}

#[test]
fn test_malformed_document_is_an_error() {
    let err = XbrlPresentation::parse("<link:linkbase><link:presentationLink>").unwrap_err();
    assert!(err.to_string().contains("Failed to parse presentation linkbase XML"));
}
