//! Discovery of the Formex files making up one act.

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::{MainFileConvention, METADATA_FILE_MARKER, TOC_FILE_MARKER, XML_EXTENSION};
use crate::error::Result;

/// The XML files of an act, split into main document and annex candidates.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceFiles {
    /// Main document, if any file follows a main-document convention.
    pub main: Option<PathBuf>,
    /// Convention the main document was found through.
    pub convention: Option<MainFileConvention>,
    /// Remaining XML files, sorted by name, excluding table-of-contents and
    /// metadata files.
    pub annexes: Vec<PathBuf>,
}

impl SourceFiles {
    /// List the XML files of `dir` and classify them.
    ///
    /// # Errors
    /// Returns `Io` if the directory cannot be read.
    pub fn discover(dir: &Path) -> Result<Self> {
        let mut files: Vec<PathBuf> = fs::read_dir(dir)?
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|path| path.is_file() && file_name(path).ends_with(XML_EXTENSION))
            .collect();
        files.sort();

        Ok(Self::classify(files))
    }

    /// Classify an already sorted list of XML paths.
    pub fn classify(files: Vec<PathBuf>) -> Self {
        let found = MainFileConvention::PRIORITY.iter().find_map(|convention| {
            files
                .iter()
                .find(|path| convention.matches(file_name(path)))
                .map(|path| (path.clone(), *convention))
        });
        let (main, convention) = match found {
            Some((path, convention)) => (Some(path), Some(convention)),
            None => (None, None),
        };

        let annexes = files
            .into_iter()
            .filter(|path| Some(path) != main.as_ref())
            .filter(|path| !is_auxiliary(file_name(path)))
            .collect();

        Self {
            main,
            convention,
            annexes,
        }
    }
}

/// Table-of-contents and metadata files never hold act content.
pub fn is_auxiliary(file_name: &str) -> bool {
    file_name.contains(TOC_FILE_MARKER) || file_name.contains(METADATA_FILE_MARKER)
}

fn file_name(path: &Path) -> &str {
    path.file_name().and_then(|n| n.to_str()).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn paths(names: &[&str]) -> Vec<PathBuf> {
        names.iter().map(PathBuf::from).collect()
    }

    #[test]
    fn test_classify_main_and_annexes() {
        let files = SourceFiles::classify(paths(&[
            "L_202401689EN.000101.fmx.xml",
            "L_202401689EN.011301.fmx.xml",
            "L_202401689EN.011401.fmx.xml",
            "L_202401689EN.doc.fmx.xml",
            "L_202401689EN.toc.fmx.xml",
        ]));

        assert_eq!(
            files.main,
            Some(PathBuf::from("L_202401689EN.000101.fmx.xml"))
        );
        assert_eq!(files.convention, Some(MainFileConvention::ActBody));
        assert_eq!(
            files.annexes,
            paths(&["L_202401689EN.011301.fmx.xml", "L_202401689EN.011401.fmx.xml"])
        );
    }

    #[test]
    fn test_classify_convention_priority() {
        let files = SourceFiles::classify(paths(&[
            "L_2016119EN.01000101.xml",
            "L_2016119EN.01008801.xml",
            "L_2024.000101.xml",
        ]));

        assert_eq!(files.main, Some(PathBuf::from("L_2016119EN.01000101.xml")));
        assert_eq!(files.convention, Some(MainFileConvention::LegacyActBody));
        assert_eq!(
            files.annexes,
            paths(&["L_2016119EN.01008801.xml", "L_2024.000101.xml"])
        );
    }

    #[test]
    fn test_classify_no_main_file() {
        let files = SourceFiles::classify(paths(&["L_2024.011301.fmx.xml"]));
        assert!(files.main.is_none());
        assert!(files.convention.is_none());
        assert_eq!(files.annexes.len(), 1);
    }

    #[test]
    fn test_discover_ignores_non_xml_and_directories() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("L_1.000101.fmx.xml"), "<ACT/>").unwrap();
        fs::write(dir.path().join("L_1.011301.fmx.xml"), "<ANNEX/>").unwrap();
        fs::write(dir.path().join("README.txt"), "notes").unwrap();
        fs::create_dir(dir.path().join("nested.xml")).unwrap();

        let files = SourceFiles::discover(dir.path()).unwrap();

        assert_eq!(files.main, Some(dir.path().join("L_1.000101.fmx.xml")));
        assert_eq!(files.annexes, vec![dir.path().join("L_1.011301.fmx.xml")]);
    }

    #[test]
    fn test_discover_missing_directory() {
        let dir = TempDir::new().unwrap();
        assert!(SourceFiles::discover(&dir.path().join("absent")).is_err());
    }
}
