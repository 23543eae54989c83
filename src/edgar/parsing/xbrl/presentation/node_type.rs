use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString};

/// Semantic kind of a presentation node, derived from XBRL naming conventions.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, AsRefStr, EnumIter,
)]
pub enum NodeType {
    Statement,
    Table,
    LineItems,
    Axis,
    Member,
    Domain,
    Abstract,
    LineItem,
}

struct Rule {
    node_type: NodeType,
    suffix: &'static str,
    fragments: &'static [&'static str],
}

// Evaluated top to bottom; the first hit wins. Names overlap ("...TableAbstract",
// "...AbstractAxis") so moving a rule changes results.
const RULES: &[Rule] = &[
    Rule {
        node_type: NodeType::Table,
        suffix: "Table",
        fragments: &["statementtable"],
    },
    Rule {
        node_type: NodeType::LineItems,
        suffix: "LineItems",
        fragments: &["statementlineitems", "schedulelineitems"],
    },
    Rule {
        node_type: NodeType::Axis,
        suffix: "Axis",
        fragments: &["[axis]"],
    },
    Rule {
        node_type: NodeType::Member,
        suffix: "Member",
        fragments: &["[member]"],
    },
    Rule {
        node_type: NodeType::Domain,
        suffix: "Domain",
        fragments: &["[domain]"],
    },
    Rule {
        node_type: NodeType::Abstract,
        suffix: "Abstract",
        fragments: &["[abstract]", "abstract"],
    },
];

fn is_role_uri(s: &str) -> bool {
    (s.starts_with("http://") || s.starts_with("https://")) && s.to_lowercase().contains("role")
}

impl NodeType {
    /// Classifies a node. `raw_concept` is the unnormalized source of the
    /// concept (the role URI for role roots) and only feeds the Statement rule.
    pub fn classify(concept: &str, raw_concept: &str) -> NodeType {
        if is_role_uri(raw_concept) || is_role_uri(concept) {
            return NodeType::Statement;
        }

        let concept_lower = concept.to_lowercase();
        RULES
            .iter()
            .find(|rule| {
                concept.ends_with(rule.suffix)
                    || rule.fragments.iter().any(|f| concept_lower.contains(f))
            })
            .map(|rule| rule.node_type)
            .unwrap_or(NodeType::LineItem)
    }

    /// Structural nodes hold other nodes rather than reportable facts.
    pub fn is_structural(&self) -> bool {
        !matches!(self, NodeType::LineItem)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classify(concept: &str) -> NodeType {
        NodeType::classify(concept, concept)
    }

    #[test]
    fn test_basic_kinds() {
        assert_eq!(classify("us-gaap_StatementTable"), NodeType::Table);
        assert_eq!(classify("us-gaap_StatementLineItems"), NodeType::LineItems);
        assert_eq!(classify("us-gaap_ScheduleOfSegmentReportingLineItems"), NodeType::LineItems);
        assert_eq!(classify("us-gaap_StatementBusinessSegmentsAxis"), NodeType::Axis);
        assert_eq!(classify("us-gaap_SegmentDomain"), NodeType::Domain);
        assert_eq!(classify("aapl_IPhoneMember"), NodeType::Member);
        assert_eq!(classify("us-gaap_AssetsAbstract"), NodeType::Abstract);
        assert_eq!(classify("us-gaap_Assets"), NodeType::LineItem);
    }

    #[test]
    fn test_role_uri_is_statement() {
        let role = "http://www.apple.com/role/CONSOLIDATEDBALANCESHEETS";
        assert_eq!(NodeType::classify(role, role), NodeType::Statement);
        // the raw form decides even when the concept looks like a table
        assert_eq!(
            NodeType::classify("IncomeTable", "https://example.com/role/IncomeTable"),
            NodeType::Statement
        );
        // a URI without "role" is not a statement
        assert_eq!(classify("http://example.com/elts/Assets"), NodeType::LineItem);
    }

    #[test]
    fn test_table_precedes_abstract() {
        assert_eq!(classify("us-gaap_StatementTableAbstract"), NodeType::Table);
        assert_eq!(classify("us-gaap_IncomeStatementAbstract"), NodeType::Abstract);
    }

    #[test]
    fn test_axis_and_member_precede_abstract() {
        assert_eq!(classify("xyz_AbstractAxis"), NodeType::Axis);
        assert_eq!(classify("xyz_AbstractMember"), NodeType::Member);
        assert_eq!(classify("xyz_AbstractDomain"), NodeType::Domain);
    }

    #[test]
    fn test_line_items_precede_member() {
        assert_eq!(classify("xyz_MemberStatementLineItems"), NodeType::LineItems);
        assert_eq!(classify("xyz_ScheduleLineItemsMember"), NodeType::LineItems);
    }

    #[test]
    fn test_bracketed_labels_are_case_insensitive() {
        assert_eq!(classify("Segments [Axis] x"), NodeType::Axis);
        assert_eq!(classify("Products [MEMBER] x"), NodeType::Member);
        assert_eq!(classify("Segment [Domain] x"), NodeType::Domain);
    }

    #[test]
    fn test_suffixes_are_case_sensitive() {
        assert_eq!(classify("us-gaap_Fooaxis"), NodeType::LineItem);
        // "abstract" is also a fragment, so any casing counts
        assert_eq!(classify("us-gaap_FooABSTRACTbar"), NodeType::Abstract);
    }

    #[test]
    fn test_is_structural() {
        assert!(NodeType::Axis.is_structural());
        assert!(!NodeType::LineItem.is_structural());
    }
}
