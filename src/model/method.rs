use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{DocText, DocTextJson, Model, ParamModel, ParamModelJson, ReturnModel, ReturnModelJson};
use crate::render::{DocBuilder, EmmyLuaBuilder};
use crate::signature::Signature;

/// Annotation emitted for functions without an implicit `self`.
const NO_SELF: &str = "noSelf";

/// A documented method: the hub that owns doc text, params and return value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodModel {
    name: String,
    pub doc: DocText,
    pub params: Vec<ParamModel>,
    pub returns: ReturnModel,
}

/// Serialized method. The name is not part of it; it is supplied by whoever
/// owns the model (usually the key in a [`ModelLibrary`](crate::ModelLibrary)).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MethodModelJson {
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub doc: DocTextJson,
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub params: Vec<ParamModelJson>,
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub returns: ReturnModelJson,
}

/// Result of documenting a concrete signature.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocOutcome {
    /// The signature is not the one this model documents.
    NotMatched,
    /// Matched, but there was nothing to emit.
    Empty,
    /// Matched and rendered.
    Documented(String),
}

impl DocOutcome {
    /// Rendered text, `""` for the other outcomes.
    pub fn into_text(self) -> String {
        match self {
            DocOutcome::Documented(text) => text,
            DocOutcome::NotMatched | DocOutcome::Empty => String::new(),
        }
    }
}

/// Renderable UI representation. Always empty here; real rendering belongs to
/// the UI layer, which must regenerate after `load`/`clear`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dom {
    pub html: String,
}

impl Dom {
    pub fn is_empty(&self) -> bool {
        self.html.is_empty()
    }
}

impl MethodModel {
    pub fn new(name: impl Into<String>, json: Option<&MethodModelJson>) -> Self {
        let mut model = MethodModel {
            name: name.into(),
            doc: DocText::default(),
            params: Vec::new(),
            returns: ReturnModel::default(),
        };
        if let Some(json) = json {
            model.load(json);
        }
        model
    }

    /// Parse a single method payload.
    pub fn from_json_str(name: impl Into<String>, json: &str) -> crate::Result<Self> {
        let json: MethodModelJson = serde_json::from_str(json)?;
        Ok(MethodModel::new(name, Some(&json)))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether `func` is the function this model documents: same name, same
    /// arity, and every parameter matching the one at the same position.
    pub fn test_signature<S: Signature + ?Sized>(&self, func: &S) -> bool {
        if func.name() != self.name {
            debug!(model = %self.name, found = func.name(), "name mismatch");
            return false;
        }
        if func.params().len() != self.params.len() {
            debug!(
                model = %self.name,
                expected = self.params.len(),
                found = func.params().len(),
                "arity mismatch"
            );
            return false;
        }
        for (index, (param, concrete)) in self.params.iter().zip(func.params()).enumerate() {
            if !param.test_signature(concrete) {
                debug!(model = %self.name, index, param = param.name(), "parameter mismatch");
                return false;
            }
        }
        true
    }

    /// Append this model's documentation for `method` to `doc`, returning the
    /// number of entries appended.
    ///
    /// Returns `None`, leaving `doc` untouched, when `method` does not match.
    pub fn write_doc<S: Signature + ?Sized>(
        &self,
        method: &S,
        doc: &mut dyn DocBuilder,
    ) -> Option<usize> {
        if !self.test_signature(method) {
            return None;
        }
        let start = doc.len();

        let is_static = method.is_static();
        if is_static {
            doc.append_annotation(NO_SELF, None);
        }

        let DocText { annotations, lines } = &self.doc;

        // A stored noSelf is already covered by the marker above.
        let mut annotations = annotations
            .iter()
            .filter(|(key, _)| !(is_static && key.as_str() == NO_SELF))
            .peekable();
        if annotations.peek().is_some() {
            for (key, value) in annotations {
                doc.append_annotation(key, Some(value));
            }
            doc.append_line(None);
        }

        if !lines.is_empty() {
            for line in lines {
                doc.append_line(Some(line.as_str()));
            }
            doc.append_line(None);
        }

        for param in &self.params {
            match param.doc.lines.split_first() {
                None => doc.append_param(param.name(), None),
                Some((first, rest)) => {
                    doc.append_param(param.name(), Some(first.as_str()));
                    for line in rest {
                        doc.append_line(Some(line.as_str()));
                    }
                }
            }
        }

        Some(doc.len() - start)
    }

    /// Render the doc block for `method` with `builder`, or `""` when it does
    /// not match.
    pub fn generate_doc_with<S, B>(&self, mut builder: B, prefix: &str, method: &S) -> String
    where
        S: Signature + ?Sized,
        B: DocBuilder,
    {
        if self.write_doc(method, &mut builder).is_none() {
            return String::new();
        }
        builder.build(prefix)
    }

    /// Render an EmmyLua doc block for `method`, or `""` when it does not match.
    pub fn generate_doc<S: Signature + ?Sized>(&self, prefix: &str, method: &S) -> String {
        self.generate_doc_with(EmmyLuaBuilder::default(), prefix, method)
    }

    /// Like [`generate_doc`](Self::generate_doc), but tells a mismatch apart
    /// from a match with nothing to say.
    pub fn document<S: Signature + ?Sized>(&self, prefix: &str, method: &S) -> DocOutcome {
        self.document_with(&mut EmmyLuaBuilder::default(), prefix, method)
    }

    /// Document `method` into `builder`. Entries already in `builder` are
    /// rendered along with ours, but only what this model appends decides
    /// between `Empty` and `Documented`.
    pub fn document_with<S: Signature + ?Sized>(
        &self,
        builder: &mut dyn DocBuilder,
        prefix: &str,
        method: &S,
    ) -> DocOutcome {
        match self.write_doc(method, builder) {
            None => DocOutcome::NotMatched,
            Some(0) => DocOutcome::Empty,
            Some(_) => DocOutcome::Documented(builder.build(prefix)),
        }
    }

    pub fn generate_dom(&self) -> Dom {
        Dom::default()
    }
}

impl Model for MethodModel {
    type Json = MethodModelJson;

    fn load(&mut self, json: &MethodModelJson) {
        self.clear();
        self.doc.load(&json.doc);
        self.params.extend(json.params.iter().map(ParamModel::new));
        self.returns.load(&json.returns);
    }

    fn save(&self) -> MethodModelJson {
        MethodModelJson {
            doc: self.doc.save(),
            params: self.params.iter().map(Model::save).collect(),
            returns: self.returns.save(),
        }
    }

    fn clear(&mut self) {
        self.doc.clear();
        self.params.clear();
        self.returns.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signature::LuaMethod;
    use serde_json::json;

    fn model(name: &str, json: serde_json::Value) -> MethodModel {
        let json: MethodModelJson = serde_json::from_value(json).unwrap();
        MethodModel::new(name, Some(&json))
    }

    fn two_params() -> MethodModel {
        model("move", json!({"params": [{"name": "a"}, {"name": "b"}]}))
    }

    // -- load / save / clear --

    #[test]
    fn round_trip_preserves_payload() {
        let payload = json!({
            "doc": {"annotations": {"deprecated": true, "see": "Other"}, "lines": ["One.", "Two."]},
            "params": [
                {"name": "x", "doc": {"annotations": {}, "lines": ["X coord."]}},
                {"name": "y", "doc": {"annotations": {}, "lines": []}}
            ],
            "returns": {"type": "boolean", "doc": {"annotations": {}, "lines": ["Moved?"]}}
        });
        let m = model("move", payload.clone());
        assert_eq!(serde_json::to_value(m.save()).unwrap(), payload);
    }

    #[test]
    fn absent_fields_save_as_empty_containers() {
        let m = model("tick", json!({}));
        assert_eq!(
            serde_json::to_value(m.save()).unwrap(),
            json!({
                "doc": {"annotations": {}, "lines": []},
                "params": [],
                "returns": {"doc": {"annotations": {}, "lines": []}}
            })
        );
    }

    #[test]
    fn snapshot_is_independent_of_later_mutation() {
        let mut m = model("tick", json!({"doc": {"lines": ["Ticks."]}}));
        let snapshot = m.save();
        m.clear();
        m.doc.lines.push("changed".into());
        assert_eq!(snapshot.doc.lines, ["Ticks."]);
    }

    #[test]
    fn load_replaces_previous_content() {
        let mut m = two_params();
        m.load(&serde_json::from_value(json!({"params": [{"name": "c"}]})).unwrap());
        assert_eq!(m.params.len(), 1);
        assert_eq!(m.params[0].name(), "c");
        assert_eq!(m.name(), "move");
    }

    #[test]
    fn clear_is_total_and_idempotent() {
        let mut m = model(
            "move",
            json!({"doc": {"lines": ["x"]}, "params": [{"name": "a"}], "returns": {"type": "number"}}),
        );
        m.clear();
        let once = m.save();
        m.clear();
        assert_eq!(m.save(), once);
        assert_eq!(once, MethodModelJson::default());
    }

    #[test]
    fn from_json_str_rejects_invalid_json() {
        assert!(MethodModel::from_json_str("x", "{not json").is_err());
        assert!(MethodModel::from_json_str("x", "{}").is_ok());
    }

    // -- test_signature --

    #[test]
    fn matching_is_arity_strict() {
        let m = two_params();
        assert!(m.test_signature(&LuaMethod::new("move", false, &["a", "b"])));
        assert!(!m.test_signature(&LuaMethod::new("move", false, &["a"])));
        assert!(!m.test_signature(&LuaMethod::new("move", false, &["a", "b", "c"])));
    }

    #[test]
    fn matching_is_order_sensitive() {
        assert!(!two_params().test_signature(&LuaMethod::new("move", false, &["b", "a"])));
    }

    #[test]
    fn matching_is_name_exact() {
        let m = model("Foo", json!({}));
        assert!(m.test_signature(&LuaMethod::new("Foo", false, &[])));
        assert!(!m.test_signature(&LuaMethod::new("foo", false, &[])));
    }

    // -- generate_doc --

    #[test]
    fn non_matching_signature_renders_nothing() {
        let m = model("setHealth", json!({"doc": {"lines": ["Sets health."]}}));
        let other = LuaMethod::new("setHealth", true, &["value"]);
        for prefix in ["", "--- ", "-- "] {
            assert_eq!(m.generate_doc(prefix, &other), "");
        }
        assert_eq!(m.document("--- ", &other), DocOutcome::NotMatched);
    }

    #[test]
    fn static_marker_comes_first_exactly_once() {
        let m = model(
            "create",
            json!({"doc": {"annotations": {"noSelf": true, "deprecated": true}, "lines": ["Creates."]}}),
        );
        let out = m.generate_doc("--- ", &LuaMethod::new("create", true, &[]));
        assert_eq!(out.matches("@noSelf").count(), 1);
        assert!(out.starts_with("--- @noSelf\n"));
    }

    #[test]
    fn stored_no_self_kept_for_instance_methods() {
        let m = model("create", json!({"doc": {"annotations": {"noSelf": true}}}));
        let out = m.generate_doc("--- ", &LuaMethod::new("create", false, &[]));
        assert_eq!(out, "--- @noSelf\n---\n");
    }

    #[test]
    fn multi_line_param() {
        let m = model(
            "say",
            json!({"params": [{"name": "text", "doc": {"lines": ["first", "second", "third"]}}]}),
        );
        let out = m.generate_doc("--- ", &LuaMethod::new("say", false, &["text"]));
        assert_eq!(out, "--- @param text first\n--- second\n--- third\n");
    }

    #[test]
    fn set_health_example() {
        let m = model(
            "setHealth",
            json!({"doc": {"lines": ["Sets health."]}, "params": [{"name": "value"}]}),
        );
        let concrete = LuaMethod::new("setHealth", false, &["value"]);
        assert!(m.test_signature(&concrete));
        assert_eq!(
            m.generate_doc("--- ", &concrete),
            "--- Sets health.\n---\n--- @param value\n"
        );
    }

    #[test]
    fn annotations_then_lines_then_params() {
        let m = model(
            "f",
            json!({
                "doc": {"annotations": {"see": "g"}, "lines": ["Does f."]},
                "params": [{"name": "a", "doc": {"lines": ["The a."]}}]
            }),
        );
        let out = m.generate_doc("-- ", &LuaMethod::new("f", true, &["a"]));
        assert_eq!(
            out,
            "-- @noSelf\n-- @see g\n--\n-- Does f.\n--\n-- @param a The a.\n"
        );
    }

    #[test]
    fn document_distinguishes_empty_match() {
        let m = model("tick", json!({}));
        assert_eq!(m.document("--- ", &LuaMethod::new("tick", false, &[])), DocOutcome::Empty);
        assert_eq!(
            m.document("--- ", &LuaMethod::new("tick", true, &[])),
            DocOutcome::Documented("--- @noSelf\n".into())
        );
    }

    #[test]
    fn document_ignores_entries_already_in_builder() {
        let m = model("tick", json!({}));
        let mut builder = EmmyLuaBuilder::default();
        builder.append_line(Some("Earlier block."));
        let sig = LuaMethod::new("tick", false, &[]);
        assert_eq!(m.document_with(&mut builder, "--- ", &sig), DocOutcome::Empty);
        assert_eq!(m.write_doc(&LuaMethod::new("tick", true, &[]), &mut builder), Some(1));
        assert_eq!(m.write_doc(&LuaMethod::new("tock", true, &[]), &mut builder), None);
        assert_eq!(builder.len(), 2);
    }

    #[test]
    fn null_fields_load_as_empty() {
        for payload in [
            r#"{"doc":null}"#,
            r#"{"params":null}"#,
            r#"{"returns":null}"#,
            r#"{"doc":{"lines":null,"annotations":null}}"#,
            r#"{"params":[{"name":"value","doc":null}],"returns":{"doc":null}}"#,
        ] {
            let m = MethodModel::from_json_str("f", payload).unwrap();
            assert!(m.doc.is_empty(), "{}", payload);
            assert!(m.returns.doc.is_empty(), "{}", payload);
        }
        let m = MethodModel::from_json_str("f", r#"{"params":[{"name":"value","doc":null}]}"#)
            .unwrap();
        assert_eq!(m.params[0].name(), "value");
    }

    #[test]
    fn multi_line_prose_is_prefixed_per_line() {
        let m = model("f", json!({"doc": {"lines": ["a\nb"]}}));
        let out = m.generate_doc("--- ", &LuaMethod::new("f", false, &[]));
        assert_eq!(out, "--- a\n--- b\n---\n");
    }

    #[test]
    fn generate_doc_leaves_model_unchanged() {
        let m = two_params();
        let before = m.clone();
        m.generate_doc("--- ", &LuaMethod::new("move", true, &["a", "b"]));
        assert_eq!(m, before);
    }

    #[test]
    fn dom_is_an_empty_stub() {
        assert!(two_params().generate_dom().is_empty());
    }
}
