use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::Model;

/// Value of an annotation: `@deprecated` is a flag, `@see Foo` carries text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AnnotationValue {
    Flag(bool),
    Text(String),
}

impl fmt::Display for AnnotationValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnnotationValue::Flag(b) => write!(f, "{}", b),
            AnnotationValue::Text(s) => f.write_str(s),
        }
    }
}

impl From<&str> for AnnotationValue {
    fn from(s: &str) -> Self {
        AnnotationValue::Text(s.to_string())
    }
}

impl From<bool> for AnnotationValue {
    fn from(b: bool) -> Self {
        AnnotationValue::Flag(b)
    }
}

/// Annotations and prose for one documentable element.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocText {
    /// Rendered in insertion order.
    pub annotations: IndexMap<String, AnnotationValue>,
    pub lines: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocTextJson {
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub annotations: IndexMap<String, AnnotationValue>,
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub lines: Vec<String>,
}

impl DocText {
    pub fn is_empty(&self) -> bool {
        self.annotations.is_empty() && self.lines.is_empty()
    }
}

impl Model for DocText {
    type Json = DocTextJson;

    fn load(&mut self, json: &DocTextJson) {
        self.annotations = json.annotations.clone();
        self.lines = json.lines.clone();
    }

    fn save(&self) -> DocTextJson {
        DocTextJson {
            annotations: self.annotations.clone(),
            lines: self.lines.clone(),
        }
    }

    fn clear(&mut self) {
        self.annotations.clear();
        self.lines.clear();
    }
}
