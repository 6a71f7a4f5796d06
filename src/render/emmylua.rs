//! EmmyLua doc-comment builder.
//!
//! Produces the `---@param name description` style understood by the Lua
//! language server. One entry per output line, unless the entry text itself
//! spans several lines.

use super::{DocBuilder, Entry};
use crate::model::AnnotationValue;

#[derive(Debug, Default)]
pub struct EmmyLuaBuilder {
    entries: Vec<Entry>,
}

impl DocBuilder for EmmyLuaBuilder {
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
        let mut out = String::new();
        for entry in &self.entries {
            // Every physical line carries the prefix.
            for piece in render_entry(entry).split('\n') {
                let line = format!("{}{}", prefix, piece);
                out.push_str(line.trim_end());
                out.push('\n');
            }
        }
        out
    }
}

fn render_entry(entry: &Entry) -> String {
    match entry {
        Entry::Annotation { key, value } => match value {
            None | Some(AnnotationValue::Flag(true)) => format!("@{}", key),
            Some(value) => format!("@{} {}", key, value),
        },
        Entry::Line(text) => text.clone().unwrap_or_default(),
        Entry::Param { name, description } => match description {
            Some(desc) => format!("@param {} {}", name, desc),
            None => format!("@param {}", name),
        },
    }
}
