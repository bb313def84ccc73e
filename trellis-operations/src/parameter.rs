//! Parameter metadata derived from operation struct fields

use serde::Serialize;

/// JSON-level type of a parameter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ParamType {
    String,
    Integer,
    Boolean,
    Array,
    Object,
}

/// One operation parameter
#[derive(Debug, Clone, Serialize)]
pub struct ParamMeta {
    pub name: &'static str,
    /// Taken from the field's doc comment
    pub description: &'static str,
    pub param_type: ParamType,
    /// False for `Option<_>` fields
    pub required: bool,
}

impl ParamMeta {
    pub const fn new(name: &'static str) -> Self {
        Self {
            name,
            description: "",
            param_type: ParamType::String,
            required: false,
        }
    }

    pub const fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub const fn description(mut self, desc: &'static str) -> Self {
        self.description = desc;
        self
    }

    pub const fn param_type(mut self, t: ParamType) -> Self {
        self.param_type = t;
        self
    }
}
