//! XBRL presentation linkbase.
//!
//! A presentation linkbase describes, per reporting role, how taxonomy concepts
//! are arranged for display. [`XbrlPresentation::parse`] turns the `loc` /
//! `presentationArc` graph of every `presentationLink` into one tree per role,
//! merging repeated concepts, and indexes the result by concept and by
//! standard statement (balance sheet, income statement, ...).
//!
//! Elements live in a single arena and refer to each other through [`NodeId`]
//! handles. The structure is read-only once parsed.

mod builder;
pub mod concept;
pub mod element;
pub mod node_type;
pub mod query;
pub mod statements;

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

pub use concept::normalize_concept;
pub use element::{NodeId, PresentationElement};
pub use node_type::NodeType;
pub use query::Target;
pub use statements::StandardStatement;

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct XbrlPresentation {
    elements: Vec<PresentationElement>,
    roles: Vec<(String, NodeId)>,
    role_positions: HashMap<String, usize>,
    skipped_roles: Vec<String>,
    standard_statement_map: HashMap<StandardStatement, String>,
    concept_index: HashMap<String, Vec<String>>,
}

impl XbrlPresentation {
    pub fn element(&self, id: NodeId) -> Option<&PresentationElement> {
        self.elements.get(id.0)
    }

    // Only for handles taken from this arena.
    pub(crate) fn node(&self, id: NodeId) -> &PresentationElement {
        &self.elements[id.0]
    }

    pub fn children(&self, id: NodeId) -> impl Iterator<Item = &PresentationElement> + '_ {
        self.element(id)
            .map(|e| e.children.as_slice())
            .unwrap_or(&[])
            .iter()
            .map(move |&child| self.node(child))
    }

    /// Children in display order (by `order`, ties keep insertion order).
    pub fn sorted_children(&self, id: NodeId) -> Vec<&PresentationElement> {
        let mut children: Vec<_> = self.children(id).collect();
        children.sort_by(|a, b| a.order.total_cmp(&b.order));
        children
    }

    /// Root element of a role.
    pub fn role(&self, role: &str) -> Option<&PresentationElement> {
        self.role_positions
            .get(role)
            .map(|&position| self.node(self.roles[position].1))
    }

    /// Roles with their roots, in document order.
    pub fn roles(&self) -> impl Iterator<Item = (&str, &PresentationElement)> + '_ {
        self.roles
            .iter()
            .map(move |(role, root)| (role.as_str(), self.node(*root)))
    }

    pub fn list_roles(&self) -> Vec<&str> {
        self.roles.iter().map(|(role, _)| role.as_str()).collect()
    }

    pub fn get_skipped_roles(&self) -> &[String] {
        &self.skipped_roles
    }

    pub fn standard_statement_map(&self) -> &HashMap<StandardStatement, String> {
        &self.standard_statement_map
    }

    pub fn role_for_statement(&self, statement: StandardStatement) -> Option<&str> {
        self.standard_statement_map.get(&statement).map(String::as_str)
    }

    /// Looks up a role by standard statement name such as `"BALANCE_SHEET"`.
    pub fn get_role_by_standard_name(&self, standard_name: &str) -> Option<&str> {
        let statement: StandardStatement = standard_name.parse().ok()?;
        self.role_for_statement(statement)
    }

    pub fn concept_index(&self) -> &HashMap<String, Vec<String>> {
        &self.concept_index
    }

    pub fn is_empty(&self) -> bool {
        self.roles.is_empty()
    }
}
