//! Builder module — trait-based format dispatch.
//!
//! A [`DocBuilder`] accumulates annotation, prose and parameter entries in call
//! order and renders them with a per-line prefix.

pub mod emmylua;
pub mod json;

pub use emmylua::EmmyLuaBuilder;
pub use json::JsonBuilder;

use crate::error::{Error, Result};
use crate::model::AnnotationValue;
use std::str::FromStr;

/// Accumulates doc entries and renders them.
pub trait DocBuilder {
    /// `@key` or `@key value`.
    fn append_annotation(&mut self, key: &str, value: Option<&AnnotationValue>);
    /// A prose line, or a blank separator when `text` is `None`.
    fn append_line(&mut self, text: Option<&str>);
    /// A parameter marker with an optional inline description.
    fn append_param(&mut self, name: &str, description: Option<&str>);
    /// Number of entries appended so far.
    fn len(&self) -> usize;
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
    /// Render everything appended so far, `prefix` starting each line.
    fn build(&self, prefix: &str) -> String;
}

/// Output format of a doc block.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Format {
    #[default]
    EmmyLua,
    Json,
}

impl FromStr for Format {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "emmylua" | "lua" => Ok(Format::EmmyLua),
            "json" => Ok(Format::Json),
            _ => Err(Error::UnknownFormat(s.to_string())),
        }
    }
}

/// Create an empty builder for the given format.
pub fn create_builder(format: Format) -> Box<dyn DocBuilder> {
    match format {
        Format::EmmyLua => Box::new(EmmyLuaBuilder::default()),
        Format::Json => Box::new(JsonBuilder::default()),
    }
}

/// One accumulated entry, shared by the builders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Entry {
    Annotation {
        key: String,
        value: Option<AnnotationValue>,
    },
    Line(Option<String>),
    Param {
        name: String,
        description: Option<String>,
    },
}

impl Entry {
    pub(crate) fn annotation(key: &str, value: Option<&AnnotationValue>) -> Self {
        Entry::Annotation {
            key: key.to_string(),
            value: value.cloned(),
        }
    }

    pub(crate) fn line(text: Option<&str>) -> Self {
        Entry::Line(text.map(str::to_string))
    }

    pub(crate) fn param(name: &str, description: Option<&str>) -> Self {
        Entry::Param {
            name: name.to_string(),
            description: description.map(str::to_string),
        }
    }
}
