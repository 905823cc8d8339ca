//! Read-only FB2 element tree.
//!
//! A small arena-backed tree built from raw markup with a `quick_xml` event
//! loop. This is the only surface the renderers see: element kind, attribute
//! lookup, ordered children (text runs included), concatenated text, first
//! matching descendant, and verbatim serialization for table pass-through.
//!
//! The tree is immutable once built; all walks below are iterative so that
//! adversarially deep input cannot exhaust the call stack here.

use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

use crate::error::Result;
use crate::kind::NodeKind;

/// Index of a node in the document arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(u32);

impl NodeId {
    /// The synthetic root node containing all top-level elements.
    pub const ROOT: NodeId = NodeId(0);

    fn index(self) -> usize {
        self.0 as usize
    }
}

#[derive(Debug, Clone)]
enum NodeData {
    Element(Element),
    Text(String),
}

#[derive(Debug, Clone)]
struct Element {
    /// Namespace-local tag name as written in the source.
    name: String,
    kind: Option<NodeKind>,
    /// Attributes in document order; keys keep their namespace prefix
    /// (`l:href` stays `l:href`).
    attrs: Vec<(String, String)>,
    children: Vec<NodeId>,
}

/// An immutable FB2 document tree.
#[derive(Debug, Clone)]
pub struct Document {
    nodes: Vec<NodeData>,
}

impl Document {
    /// Parse raw markup into a tree.
    pub fn parse(raw: &str) -> Result<Document> {
        let mut reader = Reader::from_str(raw);

        let mut doc = Document {
            nodes: vec![NodeData::Element(Element {
                name: String::new(),
                kind: None,
                attrs: Vec::new(),
                children: Vec::new(),
            })],
        };
        let mut stack: Vec<NodeId> = vec![NodeId::ROOT];

        loop {
            let parent = *stack.last().unwrap_or(&NodeId::ROOT);
            match reader.read_event()? {
                Event::Start(e) => {
                    let id = doc.push_element(&e);
                    doc.attach(parent, id);
                    stack.push(id);
                }
                Event::Empty(e) => {
                    let id = doc.push_element(&e);
                    doc.attach(parent, id);
                }
                Event::Text(e) => {
                    let text = String::from_utf8_lossy(e.as_ref()).into_owned();
                    doc.append_text(parent, &text);
                }
                Event::CData(e) => {
                    let text = String::from_utf8_lossy(e.as_ref()).into_owned();
                    doc.append_text(parent, &text);
                }
                Event::GeneralRef(e) => {
                    let entity = String::from_utf8_lossy(e.as_ref());
                    if let Some(resolved) = resolve_entity(&entity) {
                        doc.append_text(parent, &resolved);
                    }
                }
                Event::End(_) => {
                    if stack.len() > 1 {
                        stack.pop();
                    }
                }
                Event::Eof => break,
                _ => {}
            }
        }

        Ok(doc)
    }

    /// The element kind, if the node is a recognized element.
    pub fn kind(&self, id: NodeId) -> Option<NodeKind> {
        match &self.nodes[id.index()] {
            NodeData::Element(e) => e.kind,
            NodeData::Text(_) => None,
        }
    }

    /// The raw tag name; `None` for text runs.
    pub fn name(&self, id: NodeId) -> Option<&str> {
        match &self.nodes[id.index()] {
            NodeData::Element(e) => Some(&e.name),
            NodeData::Text(_) => None,
        }
    }

    /// Look up an attribute by its full name.
    pub fn attribute(&self, id: NodeId, name: &str) -> Option<&str> {
        match &self.nodes[id.index()] {
            NodeData::Element(e) => e
                .attrs
                .iter()
                .find(|(k, _)| k == name)
                .map(|(_, v)| v.as_str()),
            NodeData::Text(_) => None,
        }
    }

    /// All attributes in document order.
    pub fn attributes(&self, id: NodeId) -> &[(String, String)] {
        match &self.nodes[id.index()] {
            NodeData::Element(e) => &e.attrs,
            NodeData::Text(_) => &[],
        }
    }

    /// Ordered children; text runs appear as text nodes.
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        match &self.nodes[id.index()] {
            NodeData::Element(e) => &e.children,
            NodeData::Text(_) => &[],
        }
    }

    /// The content of a text run; `None` for elements.
    pub fn text_run(&self, id: NodeId) -> Option<&str> {
        match &self.nodes[id.index()] {
            NodeData::Text(t) => Some(t),
            NodeData::Element(_) => None,
        }
    }

    /// Concatenated text of the node and all its descendants.
    pub fn text(&self, id: NodeId) -> String {
        let mut result = String::new();
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            match &self.nodes[current.index()] {
                NodeData::Text(t) => result.push_str(t),
                NodeData::Element(e) => stack.extend(e.children.iter().rev().copied()),
            }
        }
        result
    }

    /// Trimmed text content, or `None` if empty; the usual test for
    /// "element present with a value".
    pub fn text_value(&self, id: NodeId) -> Option<String> {
        let text = self.text(id);
        let trimmed = text.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    }

    /// First descendant (document order) of the given kind, excluding the
    /// node itself.
    pub fn first_descendant(&self, id: NodeId, kind: NodeKind) -> Option<NodeId> {
        let mut stack: Vec<NodeId> = self.children(id).iter().rev().copied().collect();
        while let Some(current) = stack.pop() {
            if self.kind(current) == Some(kind) {
                return Some(current);
            }
            stack.extend(self.children(current).iter().rev().copied());
        }
        None
    }

    /// All descendants of the given kind, in document order.
    pub fn descendants(&self, id: NodeId, kind: NodeKind) -> Vec<NodeId> {
        let mut found = Vec::new();
        let mut stack: Vec<NodeId> = self.children(id).iter().rev().copied().collect();
        while let Some(current) = stack.pop() {
            if self.kind(current) == Some(kind) {
                found.push(current);
            }
            stack.extend(self.children(current).iter().rev().copied());
        }
        found
    }

    /// Pretty-print the subtree rooted at `id`, including its own tag.
    ///
    /// Tags and text runs each get their own line, indented two spaces per
    /// level; whitespace-only runs are dropped. Used for table pass-through.
    pub fn serialize(&self, id: NodeId) -> String {
        enum Step {
            Enter(NodeId, usize),
            Close(NodeId, usize),
        }

        let mut out = String::new();
        let mut stack = vec![Step::Enter(id, 0)];

        while let Some(step) = stack.pop() {
            match step {
                Step::Enter(current, depth) => match &self.nodes[current.index()] {
                    NodeData::Text(t) => {
                        let trimmed = t.trim();
                        if !trimmed.is_empty() {
                            indent(&mut out, depth);
                            out.push_str(&escape_xml(trimmed));
                            out.push('\n');
                        }
                    }
                    NodeData::Element(e) => {
                        indent(&mut out, depth);
                        out.push('<');
                        out.push_str(&e.name);
                        for (k, v) in &e.attrs {
                            out.push(' ');
                            out.push_str(k);
                            out.push_str("=\"");
                            out.push_str(&escape_xml(v));
                            out.push('"');
                        }
                        if e.children.is_empty() {
                            out.push_str("/>\n");
                        } else {
                            out.push_str(">\n");
                            stack.push(Step::Close(current, depth));
                            for &child in e.children.iter().rev() {
                                stack.push(Step::Enter(child, depth + 1));
                            }
                        }
                    }
                },
                Step::Close(current, depth) => {
                    if let NodeData::Element(e) = &self.nodes[current.index()] {
                        indent(&mut out, depth);
                        out.push_str("</");
                        out.push_str(&e.name);
                        out.push_str(">\n");
                    }
                }
            }
        }

        out.trim_end().to_string()
    }

    fn push_element(&mut self, start: &BytesStart) -> NodeId {
        let raw_name = start.name();
        let name = String::from_utf8_lossy(local_name(raw_name.as_ref())).into_owned();
        let kind = NodeKind::from_tag(&name);

        let mut attrs = Vec::new();
        for attr in start.attributes().flatten() {
            let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
            let value = unescape_attr(&String::from_utf8_lossy(&attr.value));
            attrs.push((key, value));
        }

        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(NodeData::Element(Element {
            name,
            kind,
            attrs,
            children: Vec::new(),
        }));
        id
    }

    fn attach(&mut self, parent: NodeId, child: NodeId) {
        if let NodeData::Element(e) = &mut self.nodes[parent.index()] {
            e.children.push(child);
        }
    }

    /// Append text under `parent`, merging with a trailing text run so that
    /// entity-split content stays one node.
    fn append_text(&mut self, parent: NodeId, text: &str) {
        if text.is_empty() {
            return;
        }
        let last_child = match &self.nodes[parent.index()] {
            NodeData::Element(e) => e.children.last().copied(),
            NodeData::Text(_) => None,
        };
        if let Some(last) = last_child
            && let NodeData::Text(t) = &mut self.nodes[last.index()]
        {
            t.push_str(text);
            return;
        }
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(NodeData::Text(text.to_string()));
        self.attach(parent, id);
    }
}

fn indent(out: &mut String, depth: usize) {
    for _ in 0..depth {
        out.push_str("  ");
    }
}

/// Escape a string for use as XML/HTML text or attribute content.
pub fn escape_xml(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' => result.push_str("&quot;"),
            '\'' => result.push_str("&#39;"),
            _ => result.push(c),
        }
    }
    result
}

/// Extract local name from namespaced XML name (e.g., "l:href" -> "href").
fn local_name(name: &[u8]) -> &[u8] {
    name.iter()
        .rposition(|&b| b == b':')
        .map(|i| &name[i + 1..])
        .unwrap_or(name)
}

/// Resolve XML entity references.
fn resolve_entity(entity: &str) -> Option<String> {
    match entity {
        "apos" => return Some("'".to_string()),
        "quot" => return Some("\"".to_string()),
        "lt" => return Some("<".to_string()),
        "gt" => return Some(">".to_string()),
        "amp" => return Some("&".to_string()),
        _ => {}
    }

    if let Some(hex) = entity.strip_prefix("#x") {
        if let Ok(code) = u32::from_str_radix(hex, 16)
            && let Some(c) = char::from_u32(code)
        {
            return Some(c.to_string());
        }
    } else if let Some(dec) = entity.strip_prefix('#')
        && let Ok(code) = dec.parse::<u32>()
        && let Some(c) = char::from_u32(code)
    {
        return Some(c.to_string());
    }

    None
}

/// Resolve entity references inside an attribute value.
fn unescape_attr(raw: &str) -> String {
    if !raw.contains('&') {
        return raw.to_string();
    }
    let mut result = String::with_capacity(raw.len());
    let mut rest = raw;
    while let Some(start) = rest.find('&') {
        result.push_str(&rest[..start]);
        let tail = &rest[start + 1..];
        match tail.find(';') {
            Some(end) => {
                match resolve_entity(&tail[..end]) {
                    Some(resolved) => result.push_str(&resolved),
                    None => {
                        result.push('&');
                        result.push_str(&tail[..end]);
                        result.push(';');
                    }
                }
                rest = &tail[end + 1..];
            }
            None => {
                result.push('&');
                rest = tail;
            }
        }
    }
    result.push_str(rest);
    result
}
