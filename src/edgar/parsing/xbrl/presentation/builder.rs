use anyhow::{anyhow, Result};
use roxmltree::{Document, Node};
use std::borrow::Cow;
use std::collections::{HashMap, HashSet};
use std::ops::Range;

use super::concept::{concept_from_href, normalize_concept};
use super::element::{NodeId, PresentationElement};
use super::statements::build_statement_map;
use super::XbrlPresentation;

const XLINK_NS: &str = "http://www.w3.org/1999/xlink";
const LINKBASE_NS: &str = "http://www.xbrl.org/2003/linkbase";

fn namespace_for_prefix(prefix: &str) -> Cow<'static, str> {
    match prefix {
        "xlink" => Cow::Borrowed(XLINK_NS),
        "link" => Cow::Borrowed(LINKBASE_NS),
        "xbrli" => Cow::Borrowed("http://www.xbrl.org/2003/instance"),
        other => Cow::Owned(format!("urn:undeclared:{}", other)),
    }
}

/// Adds an `xmlns:{prefix}` declaration to the root element's start tag.
fn declare_prefix(xml: &str, prefix: &str) -> Option<String> {
    let mut rest = 0;
    let tag_start = loop {
        let open = rest + xml[rest..].find('<')?;
        let after = &xml[open + 1..];
        if after.starts_with("?") {
            rest = open + 1 + after.find("?>")? + 2;
        } else if after.starts_with("!--") {
            rest = open + 1 + after.find("-->")? + 3;
        } else if after.starts_with('!') {
            rest = open + 1 + after.find('>')? + 1;
        } else {
            break open + 1;
        }
    };

    let name_len = xml[tag_start..].find(|c: char| c.is_whitespace() || c == '>' || c == '/')?;
    let insert_at = tag_start + name_len;
    Some(format!(
        "{} xmlns:{}=\"{}\"{}",
        &xml[..insert_at],
        prefix,
        namespace_for_prefix(prefix),
        &xml[insert_at..]
    ))
}

/// `xlink:name`, falling back to a bare `name` attribute.
fn xlink_attr<'a>(node: Node<'a, '_>, name: &str) -> Option<&'a str> {
    node.attribute((XLINK_NS, name))
        .or_else(|| node.attribute(name))
        .filter(|value| !value.is_empty())
}

#[derive(Debug)]
struct PresentationArc {
    from: String,
    to: String,
    order: f64,
    preferred_label: Option<String>,
}

fn parse_order(raw: Option<&str>) -> f64 {
    match raw {
        None => 0.0,
        Some(value) => value.trim().parse::<f64>().unwrap_or_else(|_| {
            log::debug!("Unparseable arc order {:?}, using 0", value);
            0.0
        }),
    }
}

/// Locator label -> element, in first-seen order. A label seen again points
/// at the newer element but keeps its original position.
#[derive(Default)]
struct Locators {
    labels: Vec<String>,
    by_label: HashMap<String, NodeId>,
}

impl Locators {
    fn insert(&mut self, label: &str, id: NodeId) {
        if self.by_label.insert(label.to_string(), id).is_none() {
            self.labels.push(label.to_string());
        }
    }

    fn get(&self, label: &str) -> Option<NodeId> {
        self.by_label.get(label).copied()
    }

    fn contains(&self, label: &str) -> bool {
        self.by_label.contains_key(label)
    }

    fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    fn iter(&self) -> impl Iterator<Item = (&str, NodeId)> + '_ {
        self.labels
            .iter()
            .map(move |label| (label.as_str(), self.by_label[label]))
    }
}

#[derive(Default)]
struct TreeBuilder {
    nodes: Vec<PresentationElement>,
    roles: Vec<(String, NodeId)>,
    role_positions: HashMap<String, usize>,
    skipped_roles: Vec<String>,
}

impl TreeBuilder {
    fn alloc(&mut self, label: &str, href: &str, concept: &str) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(PresentationElement::new(id, label, href, concept));
        id
    }

    fn add_link(&mut self, link: Node) {
        let Some(role) = xlink_attr(link, "role") else {
            log::debug!("Skipping presentationLink without a role");
            return;
        };

        let first = self.nodes.len();
        let mut locs = Locators::default();
        for loc in link.descendants().filter(|n| n.has_tag_name("loc")) {
            let (Some(label), Some(href)) = (xlink_attr(loc, "label"), xlink_attr(loc, "href")) else {
                log::debug!("Skipping locator without label or href in {}", role);
                continue;
            };
            let concept = normalize_concept(concept_from_href(href)).to_string();
            let id = self.alloc(label, href, &concept);
            locs.insert(label, id);
        }

        let mut arcs = Vec::new();
        for arc in link.descendants().filter(|n| n.has_tag_name("presentationArc")) {
            let (Some(from), Some(to)) = (xlink_attr(arc, "from"), xlink_attr(arc, "to")) else {
                log::debug!("Skipping presentationArc without from/to in {}", role);
                continue;
            };
            arcs.push(PresentationArc {
                from: from.to_string(),
                to: to.to_string(),
                order: parse_order(arc.attribute("order")),
                preferred_label: arc
                    .attribute("preferredLabel")
                    .filter(|value| !value.is_empty())
                    .map(String::from),
            });
        }

        // Older linkbases reference concepts straight from the arcs
        if locs.is_empty() && !arcs.is_empty() {
            log::debug!("No locators in {}, building elements from arc labels", role);
            for arc in &arcs {
                for label in [arc.from.as_str(), arc.to.as_str()] {
                    if !locs.contains(label) {
                        let id = self.alloc(label, "", normalize_concept(label));
                        locs.insert(label, id);
                    }
                }
            }
        }

        for arc in &arcs {
            let (Some(parent), Some(child)) = (locs.get(&arc.from), locs.get(&arc.to)) else {
                log::debug!("Dropping arc {} -> {} in {}: unknown locator", arc.from, arc.to, role);
                continue;
            };
            self.attach(parent, child, arc);
        }

        let targets: HashSet<&str> = arcs.iter().map(|arc| arc.to.as_str()).collect();
        let top_level: Vec<NodeId> = locs
            .iter()
            .filter(|(label, _)| !targets.contains(label))
            .map(|(_, id)| id)
            .collect();

        let root = if top_level.is_empty() {
            None
        } else {
            let root = self.alloc(role, "", normalize_concept(role));
            for &id in &top_level {
                self.nodes[id.0].parent = Some(root);
            }
            self.nodes[root.0].children = top_level;
            Some(root)
        };

        let link_nodes = first..self.nodes.len();
        self.break_cycles(link_nodes.clone(), root, role);
        self.assign_levels(link_nodes);

        match root {
            Some(root) => self.insert_role(role, root),
            None => {
                log::debug!("Role {} has no top-level elements, skipping", role);
                self.skipped_roles.push(role.to_string());
            }
        }
    }

    fn attach(&mut self, parent: NodeId, child: NodeId, arc: &PresentationArc) {
        let element = &mut self.nodes[child.0];
        element.order = arc.order;
        element.preferred_label = arc.preferred_label.clone();

        let concept = normalize_concept(&self.nodes[child.0].concept);
        let existing = self.nodes[parent.0]
            .children
            .iter()
            .copied()
            .find(|&sibling| normalize_concept(&self.nodes[sibling.0].concept) == concept);

        match existing {
            Some(existing) => self.merge(existing, child),
            None => {
                self.nodes[parent.0].children.push(child);
                self.nodes[child.0].parent = Some(parent);
            }
        }
    }

    /// Folds `duplicate` into `existing`. Only the immediate children move;
    /// nothing below them is merged again.
    fn merge(&mut self, existing: NodeId, duplicate: NodeId) {
        if existing == duplicate {
            return;
        }

        let grandchildren = self.nodes[duplicate.0].children.clone();
        self.nodes[existing.0].children.extend(grandchildren);

        let duplicate = self.nodes[duplicate.0].clone();
        let target = &mut self.nodes[existing.0];
        if duplicate.label.len() > target.label.len() {
            target.label = duplicate.label;
        }
        if duplicate.concept.len() < target.concept.len() {
            target.concept = duplicate.concept;
        }
        if duplicate.preferred_label.is_some() {
            target.preferred_label = duplicate.preferred_label;
        }
    }

    /// Depth-first walk over the elements of one link, root first, dropping
    /// every child edge that points back at an element still on the stack.
    /// Afterwards each `parent` is an edge that survived, and elements reached
    /// from the root have a parent reached from the root.
    fn break_cycles(&mut self, link_nodes: Range<usize>, root: Option<NodeId>, role: &str) {
        #[derive(Clone, Copy, PartialEq)]
        enum Mark {
            Open,
            Done,
        }

        let mut marks: HashMap<NodeId, Mark> = HashMap::new();
        let mut via: HashMap<NodeId, NodeId> = HashMap::new();
        let mut edges: HashSet<(NodeId, NodeId)> = HashSet::new();
        let mut from_root: HashSet<NodeId> = HashSet::new();

        let starts: Vec<NodeId> = root.into_iter().chain(link_nodes.clone().map(NodeId)).collect();
        for start in starts {
            if marks.contains_key(&start) {
                continue;
            }
            let rooted = Some(start) == root;
            marks.insert(start, Mark::Open);
            if rooted {
                from_root.insert(start);
            }

            let mut stack = vec![(start, 0usize)];
            loop {
                let Some(&(id, position)) = stack.last() else {
                    break;
                };
                let Some(child) = self.nodes[id.0].children.get(position).copied() else {
                    marks.insert(id, Mark::Done);
                    stack.pop();
                    continue;
                };

                match marks.get(&child).copied() {
                    Some(Mark::Open) => {
                        log::debug!(
                            "Dropping arc {} -> {} in {}: cycle",
                            self.nodes[id.0].label,
                            self.nodes[child.0].label,
                            role
                        );
                        self.nodes[id.0].children.remove(position);
                    }
                    Some(Mark::Done) => {
                        edges.insert((id, child));
                        advance(&mut stack);
                    }
                    None => {
                        edges.insert((id, child));
                        advance(&mut stack);
                        marks.insert(child, Mark::Open);
                        via.insert(child, id);
                        if rooted {
                            from_root.insert(child);
                        }
                        stack.push((child, 0));
                    }
                }
            }
        }

        for id in link_nodes.map(NodeId) {
            let keep = self.nodes[id.0].parent.is_some_and(|parent| {
                edges.contains(&(parent, id))
                    && (!from_root.contains(&id) || from_root.contains(&parent))
            });
            if !keep {
                self.nodes[id.0].parent = via.get(&id).copied();
            }
        }
    }

    /// Depth below the role root along `parent` links. Top-level elements
    /// sit at 1.
    fn assign_levels(&mut self, link_nodes: Range<usize>) {
        let mut levels: HashMap<NodeId, u32> = HashMap::new();
        for start in link_nodes.map(NodeId) {
            let mut path = Vec::new();
            let mut next_level = 0;
            let mut current = Some(start);
            while let Some(id) = current {
                if let Some(&level) = levels.get(&id) {
                    next_level = level + 1;
                    break;
                }
                path.push(id);
                current = self.nodes[id.0].parent;
            }
            for id in path.into_iter().rev() {
                levels.insert(id, next_level);
                self.nodes[id.0].level = next_level;
                next_level += 1;
            }
        }
    }

    fn insert_role(&mut self, role: &str, root: NodeId) {
        match self.role_positions.get(role) {
            Some(&position) => {
                log::debug!("Role {} defined by more than one link, keeping the last", role);
                self.roles[position].1 = root;
            }
            None => {
                self.role_positions.insert(role.to_string(), self.roles.len());
                self.roles.push((role.to_string(), root));
            }
        }
    }

    fn finish(self) -> XbrlPresentation {
        let standard_statement_map =
            build_statement_map(self.roles.iter().map(|(role, _)| role.as_str()));

        let mut concept_index: HashMap<String, Vec<String>> = HashMap::new();
        for (role, root) in &self.roles {
            index_concepts(&self.nodes, *root, role, &mut concept_index);
        }

        XbrlPresentation {
            elements: self.nodes,
            roles: self.roles,
            role_positions: self.role_positions,
            skipped_roles: self.skipped_roles,
            standard_statement_map,
            concept_index,
        }
    }
}

fn index_concepts(
    nodes: &[PresentationElement],
    root: NodeId,
    role: &str,
    index: &mut HashMap<String, Vec<String>>,
) {
    let mut stack = vec![root];
    while let Some(id) = stack.pop() {
        let element = &nodes[id.0];
        index
            .entry(element.concept.clone())
            .or_default()
            .push(role.to_string());
        stack.extend(element.children.iter().rev().copied());
    }
}

fn advance(stack: &mut [(NodeId, usize)]) {
    if let Some(frame) = stack.last_mut() {
        frame.1 += 1;
    }
}

impl XbrlPresentation {
    /// Parses a presentation linkbase document. Fails only when the text is
    /// not XML; broken locators and arcs are skipped. Namespace prefixes used
    /// without a declaration are declared on the root element and the parse
    /// is retried.
    pub fn parse(xml: &str) -> Result<Self> {
        let mut text = Cow::Borrowed(xml);
        let mut declared: Vec<String> = Vec::new();
        loop {
            let prefix = match Document::parse(&text) {
                Ok(document) => return Ok(Self::from_document(&document)),
                Err(roxmltree::Error::UnknownNamespace(prefix, _)) if !declared.contains(&prefix) => prefix,
                Err(e) => return Err(anyhow!("Failed to parse presentation linkbase XML: {}", e)),
            };

            log::debug!("Declaring undeclared namespace prefix {}", prefix);
            let patched = declare_prefix(&text, &prefix).ok_or_else(|| {
                anyhow!("Failed to parse presentation linkbase XML: no root element to declare {} on", prefix)
            })?;
            declared.push(prefix);
            text = Cow::Owned(patched);
        }
    }

    fn from_document(document: &Document) -> Self {
        let mut builder = TreeBuilder::default();
        for link in document
            .descendants()
            .filter(|n| n.has_tag_name("presentationLink"))
        {
            builder.add_link(link);
        }

        let presentation = builder.finish();
        log::info!(
            "Parsed presentation linkbase: {} roles, {} skipped, {} concepts",
            presentation.roles.len(),
            presentation.skipped_roles.len(),
            presentation.concept_index.len()
        );
        presentation
    }
}
