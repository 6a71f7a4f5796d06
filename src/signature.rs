//! Concrete (introspected) function signatures.
//!
//! The introspection layer lives outside this crate. Anything that can report
//! a name, a static flag and ordered parameter names can be matched against a
//! [`MethodModel`](crate::MethodModel) by implementing [`Signature`].

use serde::{Deserialize, Serialize};

/// A parameter of a concrete function.
pub trait SignatureParam {
    fn name(&self) -> &str;
}

/// A concrete function signature.
pub trait Signature {
    type Param: SignatureParam;

    fn name(&self) -> &str;
    /// True when the function takes no implicit `self` receiver.
    fn is_static(&self) -> bool;
    /// Parameters in declaration order.
    fn params(&self) -> &[Self::Param];
}

/// Serializable signature, as produced by the Lua introspection tooling.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LuaMethod {
    pub name: String,
    #[serde(default)]
    pub is_static: bool,
    #[serde(default)]
    pub params: Vec<LuaParam>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LuaParam {
    pub name: String,
}

impl LuaMethod {
    /// Shorthand for building a signature from parameter names.
    pub fn new(name: &str, is_static: bool, params: &[&str]) -> Self {
        LuaMethod {
            name: name.to_string(),
            is_static,
            params: params
                .iter()
                .map(|p| LuaParam {
                    name: p.to_string(),
                })
                .collect(),
        }
    }
}

impl SignatureParam for LuaParam {
    fn name(&self) -> &str {
        &self.name
    }
}

impl Signature for LuaMethod {
    type Param = LuaParam;

    fn name(&self) -> &str {
        &self.name
    }

    fn is_static(&self) -> bool {
        self.is_static
    }

    fn params(&self) -> &[LuaParam] {
        &self.params
    }
}
