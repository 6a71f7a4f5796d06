use serde::{Deserialize, Serialize};

use super::{DocText, DocTextJson, Model};

/// Documented return value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReturnModel {
    /// Lua type name, e.g. `number` or `IsoPlayer`.
    pub kind: Option<String>,
    pub doc: DocText,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReturnModelJson {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub doc: DocTextJson,
}

impl Model for ReturnModel {
    type Json = ReturnModelJson;

    fn load(&mut self, json: &ReturnModelJson) {
        self.clear();
        self.kind = json.kind.clone();
        self.doc.load(&json.doc);
    }

    fn save(&self) -> ReturnModelJson {
        ReturnModelJson {
            kind: self.kind.clone(),
            doc: self.doc.save(),
        }
    }

    fn clear(&mut self) {
        self.kind = None;
        self.doc.clear();
    }
}
