//! VoltScript → C++ type names

use rustc_hash::FxHashMap;

/// Built-in VoltScript type names and their C++ spelling
const DEFAULT_TYPES: &[(&str, &str)] = &[
    ("int", "int"),
    ("float", "double"),
    ("string", "std::string"),
    ("bool", "bool"),
    ("void", "void"),
];

/// Lookup table from VoltScript type names to C++ type names.
///
/// Names absent from the table are passed through unchanged, so user-defined
/// type names survive translation.
#[derive(Debug, Clone, PartialEq)]
pub struct TypeMap {
    entries: FxHashMap<String, String>,
}

impl TypeMap {
    pub fn new() -> Self {
        let entries = DEFAULT_TYPES
            .iter()
            .map(|(volt, cpp)| (volt.to_string(), cpp.to_string()))
            .collect();
        Self { entries }
    }

    /// Default table with `overrides` added on top; later entries win.
    pub fn with_overrides<'a, I>(overrides: I) -> Self
    where
        I: IntoIterator<Item = &'a (String, String)>,
    {
        let mut map = Self::new();
        for (volt, cpp) in overrides {
            map.insert(volt.clone(), cpp.clone());
        }
        map
    }

    pub fn insert(&mut self, volt_type: impl Into<String>, cpp_type: impl Into<String>) {
        self.entries.insert(volt_type.into(), cpp_type.into());
    }

    /// C++ spelling of `volt_type`
    pub fn map<'a>(&'a self, volt_type: &'a str) -> &'a str {
        self.entries
            .get(volt_type)
            .map(String::as_str)
            .unwrap_or(volt_type)
    }
}

impl Default for TypeMap {
    fn default() -> Self {
        Self::new()
    }
}
