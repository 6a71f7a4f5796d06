//! A set of method models keyed by name.
//!
//! Library files are JSON objects mapping method names to their payloads.
//! When several files define the same method, the later one wins.

use indexmap::IndexMap;
use std::fs;
use std::path::Path;
use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::model::{DocOutcome, MethodModel, MethodModelJson, Model};
use crate::render::DocBuilder;
use crate::signature::Signature;

pub type LibraryJson = IndexMap<String, MethodModelJson>;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModelLibrary {
    models: IndexMap<String, MethodModel>,
}

impl ModelLibrary {
    pub fn from_json_str(json: &str) -> Result<Self> {
        let json: LibraryJson = serde_json::from_str(json)?;
        let mut library = ModelLibrary::default();
        library.load(&json);
        Ok(library)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let library = Self::from_json_str(&content)?;
        debug!(path = %path.display(), methods = library.len(), "loaded library");
        Ok(library)
    }

    /// Add a model, returning the one it replaced.
    pub fn insert(&mut self, model: MethodModel) -> Option<MethodModel> {
        self.models.insert(model.name().to_string(), model)
    }

    /// Add every model of `other`; its definitions replace ours.
    pub fn merge(&mut self, other: ModelLibrary) {
        for (_, model) in other.models {
            let name = model.name().to_string();
            if self.insert(model).is_some() {
                warn!(method = %name, "duplicate method definition replaced");
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<&MethodModel> {
        self.models.get(name)
    }

    pub fn len(&self) -> usize {
        self.models.len()
    }

    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &MethodModel> {
        self.models.values()
    }

    /// The model documenting `func`, if there is one and it matches.
    pub fn find<S: Signature + ?Sized>(&self, func: &S) -> Option<&MethodModel> {
        self.get(func.name())
            .filter(|model| model.test_signature(func))
    }

    pub fn document<S: Signature + ?Sized>(
        &self,
        builder: &mut dyn DocBuilder,
        prefix: &str,
        func: &S,
    ) -> DocOutcome {
        match self.get(func.name()) {
            Some(model) => model.document_with(builder, prefix, func),
            None => DocOutcome::NotMatched,
        }
    }
}

impl Model for ModelLibrary {
    type Json = LibraryJson;

    fn load(&mut self, json: &LibraryJson) {
        self.clear();
        for (name, method) in json {
            self.insert(MethodModel::new(name.as_str(), Some(method)));
        }
    }

    fn save(&self) -> LibraryJson {
        self.models
            .iter()
            .map(|(name, model)| (name.clone(), model.save()))
            .collect()
    }

    fn clear(&mut self) {
        self.models.clear();
    }
}
