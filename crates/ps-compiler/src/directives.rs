use std::path::Path;

use indexmap::IndexMap;
use ps_core::{Directive, TranspileError};
use serde::Serialize;

use crate::include::read_include;

/// Directive name to value, in first-definition order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct DirectiveTable {
    entries: IndexMap<String, String>,
}

impl DirectiveTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bare defines record `"true"`. Redefinition overwrites the value and
    /// keeps the first position.
    pub fn define(&mut self, name: impl Into<String>, value: Option<&str>) {
        let value = value.map(strip_quotes).unwrap_or_else(|| "true".to_string());
        self.entries.insert(name.into(), value);
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries.get(name).map(String::as_str)
    }

    /// Conditional blocks are kept only for an exact `"true"`.
    pub fn is_enabled(&self, name: &str) -> bool {
        self.get(name) == Some("true")
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(key, value)| (key.as_str(), value.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>, V: AsRef<str>> FromIterator<(K, V)> for DirectiveTable {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut table = Self::new();
        for (key, value) in iter {
            table.define(key, Some(value.as_ref()));
        }
        table
    }
}

pub fn strip_quotes(value: &str) -> String {
    value.replace('"', "")
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Preprocessed {
    pub directives: DirectiveTable,
    /// Included file contents, in directive order, to be pasted before the script.
    pub includes: Vec<String>,
}

pub fn preprocess(
    directives: &[Directive],
    seed: &IndexMap<String, String>,
    include_root: &Path,
) -> Result<Preprocessed, TranspileError> {
    let mut table = seed.iter().collect::<DirectiveTable>();
    let mut includes = Vec::new();

    for directive in directives {
        match directive {
            Directive::Define { name, value } => table.define(name.clone(), value.as_deref()),
            Directive::Include { path } => includes.push(read_include(include_root, path)?),
        }
    }

    Ok(Preprocessed {
        directives: table,
        includes,
    })
}

#[cfg(test)]
mod directives_tests {
    use super::*;
    use crate::compiler_test_support::temp_dir;
    use std::fs;

    fn define(name: &str, value: Option<&str>) -> Directive {
        Directive::Define {
            name: name.to_string(),
            value: value.map(str::to_string),
        }
    }

    #[test]
    fn bare_and_valued_defines() {
        let result = preprocess(
            &[define("DEBUG", None), define("GREETING", Some("\"hello\""))],
            &IndexMap::new(),
            Path::new("."),
        )
        .expect("preprocess should pass");

        assert_eq!(result.directives.get("DEBUG"), Some("true"));
        assert_eq!(result.directives.get("GREETING"), Some("hello"));
        assert!(result.directives.is_enabled("DEBUG"));
        assert!(!result.directives.is_enabled("GREETING"));
        assert!(!result.directives.is_enabled("MISSING"));
        assert!(result.includes.is_empty());
    }

    #[test]
    fn redefinition_overwrites_in_place() {
        let result = preprocess(
            &[
                define("A", Some("1")),
                define("B", Some("2")),
                define("A", Some("3")),
            ],
            &IndexMap::new(),
            Path::new("."),
        )
        .expect("preprocess should pass");

        let entries = result.directives.iter().collect::<Vec<_>>();
        assert_eq!(entries, vec![("A", "3"), ("B", "2")]);
    }

    #[test]
    fn seeded_defines_come_first_and_can_be_overridden() {
        let mut seed = IndexMap::new();
        seed.insert("DEBUG".to_string(), "true".to_string());
        seed.insert("VERSION".to_string(), "\"1.0\"".to_string());

        let result = preprocess(&[define("DEBUG", Some("false"))], &seed, Path::new("."))
            .expect("preprocess should pass");

        let entries = result.directives.iter().collect::<Vec<_>>();
        assert_eq!(entries, vec![("DEBUG", "false"), ("VERSION", "1.0")]);
    }

    #[test]
    fn includes_are_read_verbatim_in_order() {
        let root = temp_dir("includes-in-order");
        fs::write(root.join("a.psc"), "; first\n#define NOT_EXPANDED\n").expect("write a");
        fs::write(root.join("b.psc"), "; second").expect("write b");

        let result = preprocess(
            &[
                Directive::Include {
                    path: "\"b.psc\"".to_string(),
                },
                Directive::Include {
                    path: "a.psc".to_string(),
                },
            ],
            &IndexMap::new(),
            &root,
        )
        .expect("preprocess should pass");

        assert_eq!(
            result.includes,
            vec!["; second".to_string(), "; first\n#define NOT_EXPANDED\n".to_string()]
        );
        assert!(result.directives.is_empty());
    }

    #[test]
    fn missing_include_fails() {
        let root = temp_dir("missing-include");
        let error = preprocess(
            &[Directive::Include {
                path: "nope.psc".to_string(),
            }],
            &IndexMap::new(),
            &root,
        )
        .expect_err("missing include should fail");
        assert_eq!(error, TranspileError::IncludeNotFound(root.join("nope.psc")));
    }
}
