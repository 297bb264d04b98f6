use std::fmt;

use serde::{Deserialize, Serialize};

/// Closed set of type kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Primitive,
    Record,
    Array,
    Map,
    Union,
    Enum,
}

impl Category {
    pub const ALL: [Category; 6] = [
        Category::Primitive,
        Category::Record,
        Category::Array,
        Category::Map,
        Category::Union,
        Category::Enum,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Category::Primitive => "primitive",
            Category::Record => "record",
            Category::Array => "array",
            Category::Map => "map",
            Category::Union => "union",
            Category::Enum => "enum",
        }
    }

    /// Kinds whose instances are built from other types.
    pub fn is_composite(self) -> bool {
        matches!(
            self,
            Category::Record | Category::Array | Category::Map | Category::Union
        )
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
