use std::{
    fs,
    path::{Path, PathBuf},
};

use tracing::info;

use crate::{Catalog, CompileError, StringsTable};

pub const STRINGS_FILE_NAME: &str = "Localizable.strings";

/// `fr` -> `fr.lproj`
pub fn lproj_dir_name(language: &str) -> String {
    format!("{}.lproj", language)
}

/// A table written to disk for one language.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledTable {
    pub language: String,
    pub path: PathBuf,
    pub count: usize,
}

/// Writes `table` to `<output_dir>/<language>.lproj/Localizable.strings`, creating
/// directories as needed and replacing any existing file.
pub fn write_table<P: AsRef<Path>>(
    table: &StringsTable,
    language: &str,
    output_dir: P,
) -> Result<CompiledTable, CompileError> {
    let lproj_dir = output_dir.as_ref().join(lproj_dir_name(language));
    fs::create_dir_all(&lproj_dir).map_err(CompileError::io(&lproj_dir))?;

    let path = lproj_dir.join(STRINGS_FILE_NAME);
    fs::write(&path, table.dump()).map_err(CompileError::io(&path))?;

    info!(language, path = %path.display(), count = table.len(), "Wrote strings table");

    Ok(CompiledTable {
        language: language.to_string(),
        path,
        count: table.len(),
    })
}

/// Writes one table per language in the catalog, in language order.
///
/// Stops at the first table that fails to write. Tables already written are left in place.
pub fn compile_catalog<P: AsRef<Path>>(
    catalog: &Catalog,
    output_dir: P,
) -> Result<Vec<CompiledTable>, CompileError> {
    catalog
        .languages()
        .into_iter()
        .map(|language| write_table(&catalog.table(language), language, &output_dir))
        .collect()
}

pub fn compile_catalog_file<P: AsRef<Path>, Q: AsRef<Path>>(
    catalog_path: P,
    output_dir: Q,
) -> Result<Vec<CompiledTable>, CompileError> {
    let catalog = Catalog::from_path(catalog_path)?;

    compile_catalog(&catalog, output_dir)
}

#[cfg(test)]
mod tests {
    use super::*;

    use ntest::timeout;
    use tempfile::TempDir;

    const HELLO: &str = r#"{"sourceLanguage":"en","strings":{"Hello":{"localizations":{"en":{"stringUnit":{"value":"Hello"}},"fr":{"stringUnit":{"value":"Bonjour"}}}}}}"#;

    fn read_table(root: &Path, language: &str) -> String {
        fs::read_to_string(root.join(lproj_dir_name(language)).join(STRINGS_FILE_NAME)).unwrap()
    }

    fn lproj_dirs(root: &Path) -> Vec<String> {
        let mut dirs: Vec<String> = fs::read_dir(root)
            .unwrap()
            .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        dirs.sort();

        dirs
    }

    #[test]
    fn hello_example() {
        let out = TempDir::new().unwrap();
        let catalog = Catalog::from_slice(HELLO.as_bytes()).unwrap();

        let compiled = compile_catalog(&catalog, out.path()).unwrap();

        assert_eq!(compiled.len(), 2);
        assert_eq!(compiled[0].language, "en");
        assert_eq!(compiled[1].language, "fr");
        assert!(compiled.iter().all(|table| table.count == 1));

        assert_eq!(
            read_table(out.path(), "en"),
            "/* Generated from Localizable.xcstrings */\n\n\"Hello\" = \"Hello\";\n"
        );
        assert_eq!(
            read_table(out.path(), "fr"),
            "/* Generated from Localizable.xcstrings */\n\n\"Hello\" = \"Bonjour\";\n"
        );
    }

    #[test]
    fn one_directory_per_language() {
        let out = TempDir::new().unwrap();
        let catalog = Catalog::from_slice(
            br#"{
                "sourceLanguage": "en",
                "strings": {
                    "Cancel": {"localizations": {}},
                    "OK": {"localizations": {"de": {"stringUnit": {"value": "OK"}}, "zh-Hans": {}}}
                }
            }"#,
        )
        .unwrap();

        compile_catalog(&catalog, out.path()).unwrap();

        assert_eq!(lproj_dirs(out.path()), ["de.lproj", "en.lproj", "zh-Hans.lproj"]);

        for language in ["de", "en", "zh-Hans"] {
            let table = StringsTable::parse(&read_table(out.path(), language)).unwrap();

            assert_eq!(table.len(), 2);
            assert_eq!(table.get("Cancel"), Some("Cancel"));
            assert_eq!(table.get("OK"), Some("OK"));
        }
    }

    #[test]
    fn every_key_appears_once_per_file() {
        let out = TempDir::new().unwrap();
        let catalog = Catalog::from_slice(
            br#"{
                "strings": {
                    "z": {"localizations": {"en": {"stringUnit": {"value": "Zed"}}}},
                    "a": {"localizations": {"fr": {"stringUnit": {"value": "Ah"}}}},
                    "m\"q": {}
                }
            }"#,
        )
        .unwrap();

        compile_catalog(&catalog, out.path()).unwrap();

        for language in ["en", "fr"] {
            let contents = read_table(out.path(), language);
            let lines: Vec<&str> = contents.lines().skip(2).collect();

            assert_eq!(lines.len(), 3);
            assert!(lines[0].starts_with("\"a\" = "));
            assert!(lines[1].starts_with("\"m\\\"q\" = "));
            assert!(lines[2].starts_with("\"z\" = "));
        }

        assert_eq!(
            StringsTable::parse(&read_table(out.path(), "fr")).unwrap().get("z"),
            Some("Zed")
        );
    }

    #[test]
    #[timeout(1000)]
    fn output_is_deterministic_and_overwritten() {
        let out = TempDir::new().unwrap();
        let catalog = Catalog::from_slice(
            r#"{
                "sourceLanguage": "en",
                "strings": {
                    "b": {"localizations": {"en": {"stringUnit": {"value": "B\nB"}}, "ja": {"stringUnit": {"value": "ビ"}}}},
                    "a": {"localizations": {"fr": {"stringUnit": {"value": "\\A"}}, "es": {}}}
                }
            }"#
            .as_bytes(),
        )
        .unwrap();

        let lproj = out.path().join("fr.lproj");
        fs::create_dir_all(&lproj).unwrap();
        fs::write(
            lproj.join(STRINGS_FILE_NAME),
            "stale contents that are much longer than the table",
        )
        .unwrap();

        compile_catalog(&catalog, out.path()).unwrap();
        let first: Vec<String> = ["en", "es", "fr", "ja"]
            .iter()
            .map(|language| read_table(out.path(), language))
            .collect();

        compile_catalog(&catalog, out.path()).unwrap();
        let second: Vec<String> = ["en", "es", "fr", "ja"]
            .iter()
            .map(|language| read_table(out.path(), language))
            .collect();

        assert_eq!(first, second);
        assert!(first[2].contains("\"a\" = \"\\\\A\";"));
        assert!(!first[2].contains("stale"));
    }

    #[test]
    fn non_ascii_keys_sort_by_code_point() {
        let out = TempDir::new().unwrap();
        let catalog = Catalog::from_slice(
            r#"{
                "sourceLanguage": "ja",
                "strings": {
                    "é": {"localizations": {"ja": {"stringUnit": {"value": "エ"}}}},
                    "Z": {"localizations": {"ja": {"stringUnit": {"value": "ゼット"}}}},
                    "k\\n": {}
                }
            }"#
            .as_bytes(),
        )
        .unwrap();

        compile_catalog(&catalog, out.path()).unwrap();

        assert_eq!(
            read_table(out.path(), "ja"),
            concat!(
                "/* Generated from Localizable.xcstrings */\n",
                "\n",
                "\"Z\" = \"ゼット\";\n",
                "\"k\\\\n\" = \"k\\\\n\";\n",
                "\"é\" = \"エ\";\n",
            )
        );
    }

    #[test]
    fn missing_catalog_file() {
        let out = TempDir::new().unwrap();

        let result = compile_catalog_file(out.path().join("missing.xcstrings"), out.path());

        assert!(matches!(result, Err(CompileError::InputNotFound(_))));
    }

    #[test]
    fn unwritable_output_is_an_io_error() {
        let out = TempDir::new().unwrap();
        let blocker = out.path().join("not_a_dir");
        fs::write(&blocker, "").unwrap();

        let catalog = Catalog::from_slice(HELLO.as_bytes()).unwrap();
        let result = compile_catalog(&catalog, &blocker);

        match result {
            Err(CompileError::Io { path, .. }) => assert_eq!(path, blocker.join("en.lproj")),
            other => panic!("Expected IO error, got {:?}", other),
        }
    }

    #[test]
    fn compiles_from_file() {
        let out = TempDir::new().unwrap();
        let catalog_path = out.path().join("Localizable.xcstrings");
        fs::write(&catalog_path, HELLO).unwrap();

        let compiled = compile_catalog_file(&catalog_path, out.path().join("bundle")).unwrap();

        assert_eq!(
            compiled[1].path,
            out.path().join("bundle").join("fr.lproj").join(STRINGS_FILE_NAME)
        );
    }
}
