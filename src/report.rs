//! CSV reports produced by the parsing pipeline.
//!
//! Both tables are staged as temporary files in the target folder and only
//! moved into place after both have been written in full.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::{info, warn};
use serde::Serialize;
use tempfile::NamedTempFile;

use crate::error::ParserError;
use crate::model::RecordTables;

pub const VARS_FILE_NAME: &str = "vars.csv";
pub const OBJECTS_FILE_NAME: &str = "objects.csv";

const VARS_HEADER: [&str; 2] = ["id", "level"];
const OBJECTS_HEADER: [&str; 2] = ["id", "object_name"];

/// Locations of the two written reports
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportPaths {
    pub vars: PathBuf,
    pub objects: PathBuf,
}

impl ReportPaths {
    pub fn in_folder(folder: &Path) -> Self {
        Self {
            vars: folder.join(VARS_FILE_NAME),
            objects: folder.join(OBJECTS_FILE_NAME),
        }
    }
}

/// Write `vars.csv` and `objects.csv` into `folder`, replacing existing files
pub fn write_reports(folder: &Path, tables: &RecordTables) -> Result<ReportPaths, ParserError> {
    let paths = ReportPaths::in_folder(folder);

    let vars = stage_table(folder, &paths.vars, VARS_HEADER, &tables.vars)?;
    let objects = stage_table(folder, &paths.objects, OBJECTS_HEADER, &tables.objects)?;

    let previous_vars = back_up(folder, &paths.vars)?;
    persist(vars, &paths.vars)?;
    if let Err(e) = persist(objects, &paths.objects) {
        restore(previous_vars, &paths.vars);
        return Err(e);
    }

    info!(
        "Wrote {} vars rows to {} and {} objects rows to {}",
        tables.vars.len(),
        paths.vars.display(),
        tables.objects.len(),
        paths.objects.display()
    );
    Ok(paths)
}

fn stage_table<T: Serialize>(
    folder: &Path,
    target: &Path,
    header: [&str; 2],
    rows: &[T],
) -> Result<NamedTempFile, ParserError> {
    let write_error = |source| ParserError::ReportWrite {
        path: target.to_path_buf(),
        source,
    };

    let mut staged = NamedTempFile::new_in(folder).map_err(write_error)?;
    {
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .terminator(csv::Terminator::CRLF)
            .from_writer(staged.as_file_mut());

        writer
            .write_record(header)
            .map_err(|e| write_error(io::Error::other(e)))?;
        for row in rows {
            writer
                .serialize(row)
                .map_err(|e| write_error(io::Error::other(e)))?;
        }
        writer.flush().map_err(write_error)?;
    }
    Ok(staged)
}

/// Copy of an existing report, kept until the new pair is in place
fn back_up(folder: &Path, target: &Path) -> Result<Option<NamedTempFile>, ParserError> {
    if !target.is_file() {
        return Ok(None);
    }
    let write_error = |source| ParserError::ReportWrite {
        path: target.to_path_buf(),
        source,
    };

    let backup = NamedTempFile::new_in(folder).map_err(write_error)?;
    fs::copy(target, backup.path()).map_err(write_error)?;
    Ok(Some(backup))
}

/// Put `target` back to its state before the run
fn restore(backup: Option<NamedTempFile>, target: &Path) {
    let restored = match backup {
        Some(backup) => backup.persist(target).map(|_| ()).map_err(|e| e.error),
        None => fs::remove_file(target),
    };
    if let Err(e) = restored {
        warn!("Failed to restore {}: {}", target.display(), e);
    }
}

fn persist(staged: NamedTempFile, target: &Path) -> Result<(), ParserError> {
    staged
        .persist(target)
        .map(|_| ())
        .map_err(|e| ParserError::ReportWrite {
            path: target.to_path_buf(),
            source: e.error,
        })
}
