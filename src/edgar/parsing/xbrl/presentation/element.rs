use serde::{Deserialize, Serialize};
use std::fmt;

use super::concept::concept_from_href;
use super::node_type::NodeType;

/// Handle of an element inside an `XbrlPresentation` arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A single node of a role's presentation hierarchy.
///
/// `children` keeps insertion order; consumers sort by `order` for display.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PresentationElement {
    pub id: NodeId,
    pub label: String,
    pub concept: String,
    pub href: String,
    pub order: f64,
    pub level: u32,
    pub preferred_label: Option<String>,
    pub children: Vec<NodeId>,
    pub parent: Option<NodeId>,
}

impl PresentationElement {
    pub(crate) fn new(id: NodeId, label: &str, href: &str, concept: &str) -> Self {
        Self {
            id,
            label: label.to_string(),
            concept: concept.to_string(),
            href: href.to_string(),
            order: 0.0,
            level: 0,
            preferred_label: None,
            children: Vec::new(),
            parent: None,
        }
    }

    /// The concept as written in the source, before suffix normalization.
    pub fn raw_concept(&self) -> &str {
        if self.href.is_empty() {
            &self.label
        } else {
            concept_from_href(&self.href)
        }
    }

    pub fn node_type(&self) -> NodeType {
        NodeType::classify(&self.concept, self.raw_concept())
    }

    pub fn is_abstract(&self) -> bool {
        self.concept.ends_with("Abstract")
    }

    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    /// Namespace prefix and local name, e.g. `("us-gaap", "Assets")`.
    pub fn namespace_and_name(&self) -> Option<(&str, &str)> {
        self.concept.split_once('_')
    }
}

impl fmt::Display for PresentationElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "PresentationElement(label='{}', concept='{}', children={})",
            self.label,
            self.concept,
            self.children.len()
        )
    }
}
