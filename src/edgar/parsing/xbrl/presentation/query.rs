use super::element::{NodeId, PresentationElement};
use super::node_type::NodeType;
use super::XbrlPresentation;

/// Namespaces tried, in order, when a concept is looked up without one.
pub const COMMON_NAMESPACES: &[&str] = &["us-gaap", "ifrs-full", "dei"];

/// Where a structural query starts: a role URI or an element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target<'a> {
    Role(&'a str),
    Element(NodeId),
}

impl<'a> From<&'a str> for Target<'a> {
    fn from(role: &'a str) -> Self {
        Target::Role(role)
    }
}

impl<'a> From<&'a String> for Target<'a> {
    fn from(role: &'a String) -> Self {
        Target::Role(role.as_str())
    }
}

impl From<NodeId> for Target<'_> {
    fn from(id: NodeId) -> Self {
        Target::Element(id)
    }
}

impl<'a> From<&'a PresentationElement> for Target<'a> {
    fn from(element: &'a PresentationElement) -> Self {
        Target::Element(element.id)
    }
}

impl XbrlPresentation {
    fn resolve(&self, target: Target) -> Option<&PresentationElement> {
        match target {
            Target::Role(role) => self.role(role),
            Target::Element(id) => self.element(id),
        }
    }

    /// Axes hanging directly off the first tables found under `role`.
    pub fn get_axes_for_role<'a>(&self, role: impl Into<Target<'a>>) -> Vec<&PresentationElement> {
        let mut axes = Vec::new();
        if let Some(start) = self.resolve(role.into()) {
            self.collect_axes(start, &mut axes);
        }
        axes
    }

    fn collect_axes<'s>(&'s self, element: &'s PresentationElement, axes: &mut Vec<&'s PresentationElement>) {
        if element.node_type() == NodeType::Table {
            axes.extend(
                self.children(element.id)
                    .filter(|child| child.node_type() == NodeType::Axis),
            );
        } else {
            for child in self.children(element.id) {
                self.collect_axes(child, axes);
            }
        }
    }

    /// Members of each domain directly under `axis`.
    pub fn get_members_for_axis(&self, axis: NodeId) -> Vec<&PresentationElement> {
        self.children(axis)
            .filter(|domain| domain.node_type() == NodeType::Domain)
            .flat_map(|domain| self.children(domain.id))
            .filter(|member| member.node_type() == NodeType::Member)
            .collect()
    }

    /// Contents of the LineItems node of each table under `role`. The
    /// LineItems node itself is not included.
    pub fn get_statement_line_items<'a>(&self, role: impl Into<Target<'a>>) -> Vec<&PresentationElement> {
        let mut line_items = Vec::new();
        if let Some(start) = self.resolve(role.into()) {
            self.collect_line_items(start, &mut line_items);
        }
        line_items
    }

    fn collect_line_items<'s>(
        &'s self,
        element: &'s PresentationElement,
        line_items: &mut Vec<&'s PresentationElement>,
    ) {
        if element.node_type() == NodeType::Table {
            if let Some(items) = self
                .children(element.id)
                .find(|child| child.node_type() == NodeType::LineItems)
            {
                line_items.extend(self.children(items.id));
            }
        } else {
            for child in self.children(element.id) {
                self.collect_line_items(child, line_items);
            }
        }
    }

    pub fn get_root_element(&self, element: NodeId) -> Option<&PresentationElement> {
        let mut current = self.element(element)?;
        while let Some(parent) = current.parent {
            current = self.element(parent)?;
        }
        Some(current)
    }

    /// Roles containing `concept`, one entry per occurrence. Bare names such as
    /// `Assets` also match `us-gaap_Assets`, `ifrs-full_Assets` or `dei_Assets`,
    /// and `us-gaap:Assets` matches `us-gaap_Assets`.
    pub fn get_roles_containing_concept(&self, concept: &str) -> &[String] {
        if let Some(roles) = self.concept_index.get(concept) {
            return roles;
        }

        if let Some((namespace, name)) = concept.split_once(':') {
            return self
                .concept_index
                .get(&format!("{}_{}", namespace, name))
                .map(Vec::as_slice)
                .unwrap_or(&[]);
        }

        if !concept.contains('_') {
            for namespace in COMMON_NAMESPACES {
                if let Some(roles) = self.concept_index.get(&format!("{}_{}", namespace, concept)) {
                    return roles;
                }
            }
        }

        &[]
    }

    /// Pre-order walk from `start`, `start` included.
    pub fn descendants<'a>(&self, start: impl Into<Target<'a>>) -> Vec<&PresentationElement> {
        let mut out = Vec::new();
        let mut stack: Vec<&PresentationElement> = self.resolve(start.into()).into_iter().collect();
        while let Some(element) = stack.pop() {
            out.push(element);
            let children: Vec<_> = self.children(element.id).collect();
            stack.extend(children.into_iter().rev());
        }
        out
    }

    /// Elements of every role whose concept matches, in role order.
    pub fn find_elements(&self, concept: &str) -> Vec<&PresentationElement> {
        self.roles()
            .flat_map(|(_, root)| self.descendants(root))
            .filter(|element| element.concept == concept)
            .collect()
    }
}
