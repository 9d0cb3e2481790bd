//! schema.org JSON-LD graph embedded in every engine page
//!
//! Graph nodes keep their `@type` and `@id` typed and every other property as
//! raw JSON, so the linter can walk arbitrarily nested schema.org objects
//! without a struct per vocabulary term.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::types::NodeType;

/// Properties whose plain string values are `@id` pointers rather than text
pub const POINTER_PROPERTIES: &[&str] = &["isPartOf", "mainEntityOfPage", "about", "publisher"];

/// `@type` may be a single name or a list of names
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TypeField {
    One(String),
    Many(Vec<String>),
}

impl Default for TypeField {
    fn default() -> Self {
        Self::Many(Vec::new())
    }
}

impl TypeField {
    /// No usable type name at all
    pub fn is_empty(&self) -> bool {
        self.names().iter().all(|name| name.trim().is_empty())
    }

    pub fn names(&self) -> Vec<&str> {
        match self {
            Self::One(name) => vec![name.as_str()],
            Self::Many(names) => names.iter().map(String::as_str).collect(),
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names().contains(&name)
    }
}

/// A top-level entry of `@graph`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphNode {
    /// Empty when the node has no `@type`; the linter reports it
    #[serde(rename = "@type", default, skip_serializing_if = "TypeField::is_empty")]
    pub node_type: TypeField,
    #[serde(rename = "@id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(flatten)]
    pub properties: Map<String, Value>,
}

impl GraphNode {
    pub fn has_type(&self, node_type: NodeType) -> bool {
        self.node_type.contains(node_type.as_str())
    }

    pub fn property(&self, name: &str) -> Option<&Value> {
        self.properties.get(name)
    }

    /// Non-blank string value of a property
    pub fn text(&self, name: &str) -> Option<&str> {
        self.property(name)
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }

    /// The node as a plain JSON object, `@type` and `@id` included
    pub fn to_value(&self) -> Value {
        let mut object = Map::new();
        let node_type = match &self.node_type {
            TypeField::One(name) => Value::String(name.clone()),
            TypeField::Many(names) => names.iter().cloned().map(Value::String).collect(),
        };
        if !self.node_type.is_empty() {
            object.insert("@type".to_string(), node_type);
        }
        if let Some(id) = &self.id {
            object.insert("@id".to_string(), Value::String(id.clone()));
        }
        object.extend(self.properties.clone());
        Value::Object(object)
    }

    /// Display label for messages: first `@type` plus `@id` when present
    pub fn label(&self) -> String {
        let type_name = self.node_type.names().first().copied().unwrap_or("?").to_string();
        match &self.id {
            Some(id) => format!("{} <{}>", type_name, id),
            None => type_name,
        }
    }
}

/// An `@id` pointer found somewhere in the graph
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphReference {
    pub target: String,
    pub path: String,
}

/// An `@id` definition: a node or nested object that carries `@id` plus content
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdDefinition {
    pub id: String,
    pub path: String,
}

/// Question/answer pair read from the FAQPage node
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FaqEntry {
    pub question: String,
    pub answer: Option<String>,
    pub path: String,
}

/// JSON-LD document: `{ "@context": ..., "@graph": [...] }`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchemaGraph {
    /// Kept raw: JSON-LD allows objects and arrays here, the linter wants a URL
    #[serde(rename = "@context", default)]
    pub context: Value,
    #[serde(rename = "@graph")]
    pub graph: Vec<GraphNode>,
}

/// `@type` names of an arbitrary JSON object
pub fn value_types(value: &Value) -> Vec<&str> {
    match value.get("@type") {
        Some(Value::String(name)) => vec![name.as_str()],
        Some(Value::Array(names)) => names.iter().filter_map(Value::as_str).collect(),
        _ => Vec::new(),
    }
}

/// True for `{ "@id": "..." }`, optionally with `@type`, and no other keys
pub fn is_reference(value: &Value) -> bool {
    match value.as_object() {
        Some(object) => {
            object.get("@id").is_some_and(Value::is_string)
                && object.keys().all(|key| key == "@id" || key == "@type")
        }
        None => false,
    }
}

/// String-valued pointer properties of an object, as `(name, target)`
fn pointer_properties(object: &Map<String, Value>) -> impl Iterator<Item = (&'static str, &str)> {
    POINTER_PROPERTIES
        .iter()
        .filter_map(move |name| Some((*name, object.get(*name)?.as_str()?)))
}

/// Path of the `index`-th top-level node
pub fn node_path(index: usize) -> String {
    format!("schema.@graph[{}]", index)
}

/// Depth-first visit of every value below `value`, with its path
pub fn walk<'a>(value: &'a Value, path: &str, visit: &mut impl FnMut(&'a Value, &str)) {
    visit(value, path);
    match value {
        Value::Object(object) => {
            for (key, child) in object {
                walk(child, &format!("{}.{}", path, key), visit);
            }
        }
        Value::Array(items) => {
            for (i, child) in items.iter().enumerate() {
                walk(child, &format!("{}[{}]", path, i), visit);
            }
        }
        _ => {}
    }
}

impl SchemaGraph {
    /// `@context` as a URL string, `None` for objects, arrays or a missing value
    pub fn context_url(&self) -> Option<&str> {
        self.context.as_str()
    }

    /// All nodes of a type with their graph index
    pub fn nodes_of_type(&self, node_type: NodeType) -> Vec<(usize, &GraphNode)> {
        self.graph
            .iter()
            .enumerate()
            .filter(|(_, node)| node.has_type(node_type))
            .collect()
    }

    /// First node of a type
    pub fn node_of_type(&self, node_type: NodeType) -> Option<&GraphNode> {
        self.graph.iter().find(|node| node.has_type(node_type))
    }

    /// Visit every property value of every node, nested values included
    pub fn walk_properties<'a>(&'a self, visit: &mut impl FnMut(&'a Value, &str)) {
        for (i, node) in self.graph.iter().enumerate() {
            let base = node_path(i);
            for (key, value) in &node.properties {
                walk(value, &format!("{}.{}", base, key), visit);
            }
        }
    }

    /// Every `@id` defined in the graph, top-level and nested
    pub fn defined_ids(&self) -> Vec<IdDefinition> {
        let mut ids = Vec::new();
        for (i, node) in self.graph.iter().enumerate() {
            if let Some(id) = node.id.as_deref().filter(|id| !id.trim().is_empty()) {
                ids.push(IdDefinition {
                    id: id.to_string(),
                    path: format!("{}.@id", node_path(i)),
                });
            }
        }
        self.walk_properties(&mut |value, path| {
            if is_reference(value) {
                return;
            }
            if let Some(id) = value.get("@id").and_then(Value::as_str) {
                ids.push(IdDefinition {
                    id: id.to_string(),
                    path: format!("{}.@id", path),
                });
            }
        });
        ids
    }

    /// Every `@id` pointer: reference objects and string pointer properties,
    /// on top-level nodes and nested objects alike
    pub fn references(&self) -> Vec<GraphReference> {
        let mut refs = Vec::new();
        for (i, node) in self.graph.iter().enumerate() {
            for (name, target) in pointer_properties(&node.properties) {
                refs.push(GraphReference {
                    target: target.to_string(),
                    path: format!("{}.{}", node_path(i), name),
                });
            }
        }
        self.walk_properties(&mut |value, path| {
            let Some(object) = value.as_object() else {
                return;
            };
            if is_reference(value) {
                if let Some(target) = object.get("@id").and_then(Value::as_str) {
                    refs.push(GraphReference {
                        target: target.to_string(),
                        path: format!("{}.@id", path),
                    });
                }
                return;
            }
            for (name, target) in pointer_properties(object) {
                refs.push(GraphReference {
                    target: target.to_string(),
                    path: format!("{}.{}", path, name),
                });
            }
        });
        refs
    }

    /// Question/answer pairs of the FAQPage node, in graph order
    pub fn faq_entries(&self) -> Vec<FaqEntry> {
        let Some((index, node)) = self.nodes_of_type(NodeType::FaqPage).into_iter().next() else {
            return Vec::new();
        };
        let Some(Value::Array(questions)) = node.property("mainEntity") else {
            return Vec::new();
        };

        questions
            .iter()
            .enumerate()
            .filter_map(|(i, question)| {
                let name = question.get("name").and_then(Value::as_str)?;
                let answer = question
                    .get("acceptedAnswer")
                    .and_then(|answer| answer.get("text"))
                    .and_then(Value::as_str)
                    .map(str::to_string);
                Some(FaqEntry {
                    question: name.to_string(),
                    answer,
                    path: format!("{}.mainEntity[{}]", node_path(index), i),
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn graph() -> SchemaGraph {
        serde_json::from_value(json!({
            "@context": "https://schema.org",
            "@graph": [
                {
                    "@type": "WebSite",
                    "@id": "https://example.org/#website",
                    "url": "https://example.org/",
                    "name": "Engine Reference"
                },
                {
                    "@type": ["WebPage", "ItemPage"],
                    "@id": "https://example.org/saab/b230ft#webpage",
                    "isPartOf": { "@id": "https://example.org/#website" },
                    "about": "https://example.org/saab/b230ft#engine"
                },
                {
                    "@type": "FAQPage",
                    "@id": "https://example.org/saab/b230ft#faq",
                    "mainEntity": [
                        {
                            "@type": "Question",
                            "name": "Is it reliable?",
                            "acceptedAnswer": { "@type": "Answer", "text": "Mostly." }
                        },
                        { "@type": "Question", "name": "No answer yet" }
                    ]
                }
            ]
        }))
        .unwrap()
    }

    #[test]
    fn test_type_field_one_or_many() {
        let g = graph();
        assert!(g.graph[0].has_type(NodeType::WebSite));
        assert!(g.graph[1].has_type(NodeType::WebPage));
        assert!(g.graph[1].node_type.contains("ItemPage"));
        assert_eq!(g.nodes_of_type(NodeType::Article).len(), 0);
        assert!(g.node_of_type(NodeType::FaqPage).is_some());
    }

    #[test]
    fn test_defined_ids_and_references() {
        let g = graph();
        let ids: Vec<String> = g.defined_ids().into_iter().map(|d| d.id).collect();
        assert_eq!(ids.len(), 3);
        assert!(ids.contains(&"https://example.org/#website".to_string()));

        let refs = g.references();
        assert_eq!(refs.len(), 2);
        assert!(refs.iter().any(|r| r.path == "schema.@graph[1].about"
            && r.target == "https://example.org/saab/b230ft#engine"));
        assert!(refs.iter().any(|r| r.path == "schema.@graph[1].isPartOf.@id"));
    }

    #[test]
    fn test_faq_entries() {
        let entries = graph().faq_entries();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].question, "Is it reliable?");
        assert_eq!(entries[0].answer.as_deref(), Some("Mostly."));
        assert_eq!(entries[1].answer, None);
        assert_eq!(entries[1].path, "schema.@graph[2].mainEntity[1]");
    }

    #[test]
    fn test_is_reference() {
        assert!(is_reference(&json!({ "@id": "#x" })));
        assert!(is_reference(&json!({ "@type": "WebPage", "@id": "#x" })));
        assert!(!is_reference(&json!({ "@id": "#x", "name": "X" })));
        assert!(!is_reference(&json!({ "@type": "WebPage" })));
        assert!(!is_reference(&json!("#x")));
    }

    #[test]
    fn test_typed_reference_is_not_a_definition() {
        let mut g = graph();
        g.graph[1].properties.insert(
            "isPartOf".to_string(),
            json!({ "@type": "WebSite", "@id": "https://example.org/#website" }),
        );
        let ids: Vec<String> = g.defined_ids().into_iter().map(|d| d.id).collect();
        assert_eq!(ids.len(), 3);
        assert!(g
            .references()
            .iter()
            .any(|r| r.path == "schema.@graph[1].isPartOf.@id"));
    }

    #[test]
    fn test_nested_pointer_properties_are_references() {
        let mut g = graph();
        g.graph[0].properties.insert(
            "image".to_string(),
            json!({
                "@type": "ImageObject",
                "url": "https://example.org/logo.png",
                "about": "https://example.org/#nothing"
            }),
        );
        let refs = g.references();
        assert!(refs.iter().any(|r| r.path == "schema.@graph[0].image.about"
            && r.target == "https://example.org/#nothing"));
    }

    #[test]
    fn test_missing_type_and_object_context_still_load() {
        let g: SchemaGraph = serde_json::from_value(json!({
            "@context": { "@vocab": "https://schema.org/" },
            "@graph": [{ "@id": "#untyped", "name": "No type" }]
        }))
        .unwrap();
        assert_eq!(g.context_url(), None);
        assert!(g.graph[0].node_type.is_empty());
        assert_eq!(g.graph[0].label(), "? <#untyped>");
        assert!(g.graph[0].to_value().get("@type").is_none());
    }

    #[test]
    fn test_round_trip_keeps_property_order() {
        let g = graph();
        let text = serde_json::to_string(&g.graph[0]).unwrap();
        assert!(text.starts_with("{\"@type\":\"WebSite\",\"@id\""));
        assert!(text.find("\"url\"").unwrap() < text.find("\"name\"").unwrap());
    }
}
