mod serialisation;

use std::collections::BTreeMap;

pub use serialisation::{GENERATED_HEADER, escape_string_value, unescape_string_value};
use serialisation::*;

use crate::CompileError;

/// One flat `Localizable.strings` table. Keys are kept sorted so output is stable.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct StringsTable {
    values: BTreeMap<String, String>,
}

impl StringsTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert<K: Into<String>, V: Into<String>>(&mut self, key: K, value: V) -> Option<String> {
        self.values.insert(key.into(), value.into())
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Renders the table: header, blank line, then one escaped line per key and a final newline.
    pub fn dump(&self) -> String {
        let lines: Vec<String> = self
            .iter()
            .map(|(key, value)| format_line(key, value))
            .collect();

        let mut out = String::with_capacity(GENERATED_HEADER.len() + 2 + lines.len() * 32);

        out.push_str(GENERATED_HEADER);
        out.push_str("\n\n");
        out.push_str(&lines.join("\n"));
        out.push('\n');

        out
    }

    /// Reads back a table in the format written by [`StringsTable::dump`].
    ///
    /// Blank lines and single-line `/* */` or `//` comments are skipped.
    pub fn parse(s: &str) -> Result<Self, CompileError> {
        let mut table = StringsTable::new();

        for (i, line) in s.lines().enumerate() {
            let trimmed = line.trim();

            if trimmed.is_empty()
                || trimmed.starts_with("//")
                || (trimmed.starts_with("/*") && trimmed.ends_with("*/"))
            {
                continue;
            }

            let (key, value) =
                parse_line(trimmed).ok_or_else(|| CompileError::MalformedStringsLine {
                    line: i + 1,
                    content: line.to_string(),
                })?;

            table.values.insert(key, value);
        }

        Ok(table)
    }
}

impl FromIterator<(String, String)> for StringsTable {
    fn from_iter<T: IntoIterator<Item = (String, String)>>(iter: T) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}
