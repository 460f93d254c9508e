use std::fmt;

use serde::{Deserialize, Serialize};

use super::{ComponentRef, TypeTag};

/// Grammatical gender of a resource type's display name.
///
/// The UI expects `m` or `f`; any other code is carried verbatim in `Other`
/// because registration accepts it without complaint.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Gender {
    Masculine,
    Feminine,
    Other(String),
}

impl Gender {
    pub fn code(&self) -> &str {
        match self {
            Gender::Masculine => "m",
            Gender::Feminine => "f",
            Gender::Other(code) => code,
        }
    }

    /// Whether this is one of the two codes the UI knows how to agree with.
    pub fn is_known(&self) -> bool {
        !matches!(self, Gender::Other(_))
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl From<&str> for Gender {
    fn from(code: &str) -> Self {
        match code {
            "m" => Gender::Masculine,
            "f" => Gender::Feminine,
            other => Gender::Other(other.to_string()),
        }
    }
}

impl From<String> for Gender {
    fn from(code: String) -> Self {
        match code.as_str() {
            "m" => Gender::Masculine,
            "f" => Gender::Feminine,
            _ => Gender::Other(code),
        }
    }
}

impl From<Gender> for String {
    fn from(gender: Gender) -> Self {
        match gender {
            Gender::Other(code) => code,
            known => known.code().to_string(),
        }
    }
}

/// A resource type made creatable from the UI
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceType {
    #[serde(rename = "type")]
    pub type_tag: TypeTag,
    /// Lowercase display label, e.g. `discussion`
    pub name: String,
    pub gender: Gender,
    pub creation_form: ComponentRef,
}
