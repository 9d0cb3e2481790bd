//! JSON-LD graph checks: node set, `@id` integrity and schema.org shapes

use serde_json::Value;
use std::collections::{HashMap, HashSet};
use strum::IntoEnumIterator;
use tracing::warn;

use super::numbers::value_numbers;
use super::{is_http_url, Findings};
use crate::content::jsonld::{is_reference, node_path, value_types, walk};
use crate::content::SchemaGraph;
use crate::types::{NodeType, Rule};

/// Properties holding URLs wherever they appear in the graph
const URL_PROPERTIES: &[&str] = &["url", "item", "logo", "contentUrl"];

/// Required properties for a schema.org type
struct Shape {
    type_name: &'static str,
    required: &'static [&'static str],
}

/// Shapes of the top-level graph nodes. A nested object of the same type is
/// usually an inline pointer and is not held to these.
const NODE_SHAPES: &[Shape] = &[
    Shape { type_name: "WebPage", required: &["url", "name", "isPartOf", "breadcrumb"] },
    Shape { type_name: "WebSite", required: &["url", "name", "publisher"] },
    Shape {
        type_name: "Article",
        required: &["headline", "author", "publisher", "mainEntityOfPage", "image"],
    },
    Shape { type_name: "VehicleEngine", required: &["name"] },
    Shape { type_name: "Dataset", required: &["name", "description", "creator"] },
    Shape { type_name: "FAQPage", required: &["mainEntity"] },
];

/// Shapes that apply wherever an object of the type appears
const OBJECT_SHAPES: &[Shape] = &[
    Shape { type_name: "BreadcrumbList", required: &["itemListElement"] },
    Shape { type_name: "ListItem", required: &["position", "name"] },
    Shape { type_name: "Organization", required: &["name"] },
    Shape { type_name: "Person", required: &["name"] },
    Shape { type_name: "ImageObject", required: &["url"] },
    Shape { type_name: "Vehicle", required: &["name"] },
    Shape { type_name: "Question", required: &["name", "acceptedAnswer"] },
    Shape { type_name: "Answer", required: &["text"] },
    Shape { type_name: "PropertyValue", required: &["name", "value"] },
];

/// Run every graph check for one engine
pub fn check_graph(findings: &mut Findings, code: &str, schema: &SchemaGraph) {
    check_context(findings, schema);
    check_node_set(findings, schema);
    check_ids(findings, schema);
    check_references(findings, schema);
    for (i, node) in schema.graph.iter().enumerate() {
        let base = node_path(i);
        if node.node_type.is_empty() {
            findings.push(
                Rule::NodeShape,
                format!("{}.@type", base),
                format!("{} has no @type", node.label()),
            );
        }
        let value = node.to_value();
        walk(&value, &base, &mut |object, path| {
            check_object(findings, object, path, path == base);
        });
    }
    check_engine_name(findings, code, schema);
}

fn check_context(findings: &mut Findings, schema: &SchemaGraph) {
    let expected = findings.config().expected_context.trim_end_matches('/');
    let Some(actual) = schema.context_url().map(str::trim) else {
        if schema.context.is_null() {
            findings.push(Rule::SchemaContext, "schema.@context", "@context is missing");
        } else {
            findings.push(
                Rule::SchemaContext,
                "schema.@context",
                format!("@context must be the URL '{}', found {}", expected, schema.context),
            );
        }
        return;
    };
    if actual.is_empty() {
        findings.push(Rule::SchemaContext, "schema.@context", "@context must not be empty");
    } else if actual.trim_end_matches('/') != expected {
        findings.push(
            Rule::SchemaContext,
            "schema.@context",
            format!("@context is '{}', expected '{}'", actual, expected),
        );
    }
}

/// Exactly one node of each required type
fn check_node_set(findings: &mut Findings, schema: &SchemaGraph) {
    for node_type in NodeType::iter() {
        let nodes = schema.nodes_of_type(node_type);
        match nodes.len() {
            0 => findings.push(
                Rule::MissingNode,
                "schema.@graph",
                format!("graph has no {} node", node_type),
            ),
            1 => {}
            n => {
                for (index, _) in nodes.iter().skip(1) {
                    findings.push(
                        Rule::DuplicateNode,
                        node_path(*index),
                        format!("graph has {} {} nodes, expected one", n, node_type),
                    );
                }
            }
        }
    }
}

fn check_ids(findings: &mut Findings, schema: &SchemaGraph) {
    for (i, node) in schema.graph.iter().enumerate() {
        if node.id.as_deref().is_none_or(|id| id.trim().is_empty()) {
            findings.push(
                Rule::MissingId,
                format!("{}.@id", node_path(i)),
                format!("{} node has no @id", node.label()),
            );
        }
    }

    let mut first_seen: HashMap<String, String> = HashMap::new();
    for definition in schema.defined_ids() {
        match first_seen.get(&definition.id) {
            Some(first) => findings.push(
                Rule::DuplicateId,
                definition.path,
                format!("@id '{}' is already defined at {}", definition.id, first),
            ),
            None => {
                first_seen.insert(definition.id, definition.path);
            }
        }
    }
}

/// Every pointer must land on an `@id` defined in the same graph
fn check_references(findings: &mut Findings, schema: &SchemaGraph) {
    let defined: HashSet<String> = schema.defined_ids().into_iter().map(|d| d.id).collect();
    for reference in schema.references() {
        if reference.target.trim().is_empty() {
            findings.push(Rule::DanglingReference, reference.path, "reference has an empty @id");
        } else if !defined.contains(&reference.target) {
            let message = format!("'{}' is not defined in this graph", reference.target);
            findings.push(Rule::DanglingReference, reference.path, message);
        }
    }
}

/// Present and not null, blank text or an empty list
fn has_content(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::String(s)) => !s.trim().is_empty(),
        Some(Value::Array(items)) => !items.is_empty(),
        Some(_) => true,
    }
}

/// Shape and URL checks for one object anywhere in the graph
fn check_object(findings: &mut Findings, value: &Value, path: &str, top_level: bool) {
    let Some(object) = value.as_object() else {
        return;
    };
    // Pointers carry no content of their own
    if !top_level && is_reference(value) {
        return;
    }

    for key in URL_PROPERTIES {
        if let Some(Value::String(url)) = object.get(*key) {
            if !is_http_url(url) {
                findings.push(
                    Rule::InvalidUrl,
                    format!("{}.{}", path, key),
                    format!("'{}' is not an absolute http(s) URL", url),
                );
            }
        }
    }

    let node_shapes: &[Shape] = if top_level { NODE_SHAPES } else { &[] };
    for type_name in value_types(value) {
        let shape = node_shapes
            .iter()
            .chain(OBJECT_SHAPES)
            .find(|s| s.type_name == type_name);
        if let Some(shape) = shape {
            for property in shape.required {
                if !has_content(object.get(*property)) {
                    findings.push(
                        Rule::NodeShape,
                        format!("{}.{}", path, property),
                        format!("{} requires '{}'", type_name, property),
                    );
                }
            }
        }

        match type_name {
            "BreadcrumbList" => check_breadcrumbs(findings, value, path),
            "QuantitativeValue" => check_quantity(findings, value, path),
            "FAQPage" if top_level => check_faq_page(findings, value, path),
            _ => {}
        }
    }
}

/// ListItem positions run 1..n in array order
fn check_breadcrumbs(findings: &mut Findings, value: &Value, path: &str) {
    let Some(Value::Array(items)) = value.get("itemListElement") else {
        if value.get("itemListElement").is_some() {
            findings.push(
                Rule::NodeShape,
                format!("{}.itemListElement", path),
                "itemListElement must be an array of ListItem",
            );
        }
        return;
    };

    for (i, item) in items.iter().enumerate() {
        // A missing position is reported by the ListItem shape
        let Some(position) = item.get("position") else {
            continue;
        };
        let expected = i as f64 + 1.0;
        if value_numbers(position) != [expected] {
            findings.push(
                Rule::NodeShape,
                format!("{}.itemListElement[{}].position", path, i),
                format!("breadcrumb position should be {}, found {}", expected, position),
            );
        }
    }
}

fn check_quantity(findings: &mut Findings, value: &Value, path: &str) {
    let numeric = ["value", "minValue", "maxValue"]
        .iter()
        .filter_map(|key| value.get(*key))
        .any(|v| match v {
            Value::Number(_) => true,
            Value::String(s) => s.trim().parse::<f64>().is_ok(),
            _ => false,
        });
    if !numeric {
        findings.push(
            Rule::NodeShape,
            format!("{}.value", path),
            "QuantitativeValue needs a numeric value, minValue or maxValue",
        );
    }

    if !has_content(value.get("unitCode")) && !has_content(value.get("unitText")) {
        findings.push(
            Rule::NodeShape,
            format!("{}.unitCode", path),
            "QuantitativeValue needs unitCode or unitText",
        );
    }
}

fn check_faq_page(findings: &mut Findings, value: &Value, path: &str) {
    match value.get("mainEntity") {
        Some(Value::Array(questions)) => {
            for (i, question) in questions.iter().enumerate() {
                if !value_types(question).contains(&"Question") {
                    findings.push(
                        Rule::NodeShape,
                        format!("{}.mainEntity[{}]", path, i),
                        "FAQPage.mainEntity entries must be Question nodes",
                    );
                }
            }
        }
        Some(Value::Null) | None => {}
        Some(_) => findings.push(
            Rule::NodeShape,
            format!("{}.mainEntity", path),
            "FAQPage.mainEntity must be an array of Question",
        ),
    }
}

/// Lowercase with dashes and spaces removed, for loose code comparison
fn squash(text: &str) -> String {
    text.chars()
        .filter(|c| !matches!(c, '-' | ' '))
        .flat_map(char::to_lowercase)
        .collect()
}

/// The VehicleEngine name should mention the engine code it is filed under
fn check_engine_name(findings: &mut Findings, code: &str, schema: &SchemaGraph) {
    let Some((index, node)) = schema.nodes_of_type(NodeType::VehicleEngine).into_iter().next() else {
        return;
    };
    let Some(name) = node.text("name") else {
        // Missing name is already a node-shape finding
        return;
    };
    if squash(code).is_empty() {
        warn!("Skipping engine name check for blank engine code");
        return;
    }
    if !squash(name).contains(&squash(code)) {
        findings.push(
            Rule::EngineKey,
            format!("{}.name", node_path(index)),
            format!("VehicleEngine name '{}' does not mention engine code '{}'", name, code),
        );
    }
}
