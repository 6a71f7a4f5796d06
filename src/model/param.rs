use serde::{Deserialize, Serialize};
use tracing::warn;

use super::{DocText, DocTextJson, Model};
use crate::signature::SignatureParam;

/// One documented parameter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParamModel {
    name: String,
    pub doc: DocText,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParamModelJson {
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub doc: DocTextJson,
}

impl ParamModel {
    pub fn new(json: &ParamModelJson) -> Self {
        if json.name.is_empty() {
            warn!("parameter without a name; it will not match any signature");
        }
        let mut param = ParamModel {
            name: json.name.clone(),
            doc: DocText::default(),
        };
        param.load(json);
        param
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether `param` is the parameter this model documents.
    ///
    /// Callers pair parameters by position; this only compares names.
    pub fn test_signature<P: SignatureParam + ?Sized>(&self, param: &P) -> bool {
        param.name() == self.name
    }
}

impl Model for ParamModel {
    type Json = ParamModelJson;

    /// Loads the documentation. The name is fixed at construction.
    fn load(&mut self, json: &ParamModelJson) {
        self.clear();
        self.doc.load(&json.doc);
    }

    fn save(&self) -> ParamModelJson {
        ParamModelJson {
            name: self.name.clone(),
            doc: self.doc.save(),
        }
    }

    fn clear(&mut self) {
        self.doc.clear();
    }
}
