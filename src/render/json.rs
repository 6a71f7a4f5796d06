//! JSON builder — structured output for tooling integration.
//!
//! Emits the accumulated entries instead of formatted text, so editor
//! front ends can lay the block out themselves.

use super::{DocBuilder, Entry};
use crate::model::AnnotationValue;
use serde_json::{json, Value};

#[derive(Debug, Default)]
pub struct JsonBuilder {
    entries: Vec<Entry>,
}

impl DocBuilder for JsonBuilder {
    fn append_annotation(&mut self, key: &str, value: Option<&AnnotationValue>) {
        self.entries.push(Entry::annotation(key, value));
    }

    fn append_line(&mut self, text: Option<&str>) {
        self.entries.push(Entry::line(text));
    }

    fn append_param(&mut self, name: &str, description: Option<&str>) {
        self.entries.push(Entry::param(name, description));
    }

    fn len(&self) -> usize {
        self.entries.len()
    }

    fn build(&self, prefix: &str) -> String {
        if self.entries.is_empty() {
            return String::new();
        }
        let entries: Vec<Value> = self.entries.iter().map(entry_json).collect();
        json!({ "prefix": prefix, "entries": entries }).to_string()
    }
}

fn entry_json(entry: &Entry) -> Value {
    match entry {
        Entry::Annotation { key, value } => {
            json!({ "kind": "annotation", "key": key, "value": value })
        }
        Entry::Line(text) => json!({ "kind": "line", "text": text }),
        Entry::Param { name, description } => {
            json!({ "kind": "param", "name": name, "description": description })
        }
    }
}
