//! Data model for documented methods — format-agnostic.
//!
//! Every model owns its children outright and round-trips through a plain
//! serde JSON shape via [`Model`].

mod doc;
mod method;
mod param;
mod returns;

pub use doc::{AnnotationValue, DocText, DocTextJson};
pub use method::{DocOutcome, Dom, MethodModel, MethodModelJson};
pub use param::{ParamModel, ParamModelJson};
pub use returns::{ReturnModel, ReturnModelJson};

use serde::{Deserialize, Deserializer};

/// Load/save/clear contract shared by all models.
pub trait Model {
    /// Serialized form consumed by `load` and produced by `save`.
    type Json;

    /// Replace the current content with the payload. Missing fields leave the
    /// corresponding content empty.
    fn load(&mut self, json: &Self::Json);

    /// Owned snapshot of the current state.
    fn save(&self) -> Self::Json;

    /// Reset to the empty state.
    fn clear(&mut self);
}

/// Field deserializer treating an explicit `null` like a missing field.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
