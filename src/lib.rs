//! luadoc — documented Lua method models.
//!
//! A [`MethodModel`] describes one documented function (name, parameters,
//! return value, prose and annotations) loaded from JSON. It can:
//!
//! - check whether an introspected function matches it ([`MethodModel::test_signature`]);
//! - render itself as an annotated doc-comment block ([`MethodModel::generate_doc`]).
//!
//! [`ModelLibrary`] groups models by name and picks the one that documents a
//! given signature.

pub mod error;
pub mod library;
pub mod model;
pub mod render;
pub mod signature;

pub use error::{Error, Result};
pub use library::ModelLibrary;
pub use model::{
    AnnotationValue, DocOutcome, DocText, Dom, MethodModel, MethodModelJson, Model, ParamModel,
    ReturnModel,
};
pub use render::{create_builder, DocBuilder, Format};
pub use signature::{LuaMethod, LuaParam, Signature, SignatureParam};
