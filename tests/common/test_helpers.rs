use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::TempDir;
use zip::write::SimpleFileOptions;

/// A document in the canonical layout
pub fn document(id: &str, level: &str, objects: &[&str]) -> String {
    let objects: String = objects
        .iter()
        .map(|name| format!(r#"<object name="{}"/>"#, name))
        .collect();
    format!(
        r#"<root><var name="id" value="{}"/><var name="level" value="{}"/><objects>{}</objects></root>"#,
        id, level, objects
    )
}

/// Write a ZIP archive named `name` in `folder` with the given entries
pub fn write_archive(folder: &Path, name: &str, entries: &[(&str, &str)]) -> PathBuf {
    let path = folder.join(name);
    let mut writer = zip::ZipWriter::new(File::create(&path).unwrap());
    for (entry, content) in entries {
        writer
            .start_file(*entry, SimpleFileOptions::default())
            .unwrap();
        writer.write_all(content.as_bytes()).unwrap();
    }
    writer.finish().unwrap();
    path
}

/// A folder of `archives` valid archives, each with `documents` documents.
///
/// Ids are `a<archive>d<document>` so row order can be asserted.
pub fn folder_with_archives(archives: usize, documents: usize) -> TempDir {
    let dir = TempDir::new().unwrap();
    for a in 0..archives {
        let contents: Vec<(String, String)> = (0..documents)
            .map(|d| {
                let id = format!("a{}d{}", a, d);
                let first = format!("{}-first", id);
                let second = format!("{}-second", id);
                (
                    format!("{}.xml", d),
                    document(&id, &(d + 1).to_string(), &[&first, &second]),
                )
            })
            .collect();
        let entries: Vec<(&str, &str)> = contents
            .iter()
            .map(|(name, content)| (name.as_str(), content.as_str()))
            .collect();
        write_archive(dir.path(), &format!("{:03}.zip", a), &entries);
    }
    dir
}

/// Contents of the two reports, if both exist
pub fn read_reports(folder: &Path) -> Option<(String, String)> {
    let vars = fs::read_to_string(folder.join("vars.csv")).ok()?;
    let objects = fs::read_to_string(folder.join("objects.csv")).ok()?;
    Some((vars, objects))
}
