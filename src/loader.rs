use std::fs::File;
use std::io::Read;
use std::path::{Component, Path};

use log::{debug, info};

use crate::error::{LoadError, LoadResult};
use crate::models::{Dataset, StudentRecord, REQUIRED_COLUMNS};

/// CSV file names in `dir`, sorted. The first entry is the default selection.
pub fn list_sources(dir: &Path) -> LoadResult<Vec<String>> {
    let unreadable = |source| LoadError::Unreadable {
        path: dir.to_path_buf(),
        source,
    };

    let mut files = Vec::new();
    for entry in std::fs::read_dir(dir).map_err(unreadable)? {
        let entry = entry.map_err(unreadable)?;
        // Follows symlinks, unlike `DirEntry::file_type`.
        if !entry.path().is_file() {
            continue;
        }
        let name = entry.file_name().to_string_lossy().into_owned();
        if name.ends_with(".csv") {
            files.push(name);
        }
    }

    files.sort();
    debug!("found {} csv sources in {}", files.len(), dir.display());
    Ok(files)
}

/// Loads the source called `name` from `dir`.
pub fn select(dir: &Path, name: &str) -> LoadResult<Dataset> {
    let mut components = Path::new(name).components();
    let is_bare_name = matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    );
    if !is_bare_name {
        return Err(LoadError::InvalidSource {
            name: name.to_string(),
        });
    }

    let path = dir.join(name);
    debug!("resolved source {name} to {}", path.display());
    let file = File::open(&path).map_err(|source| LoadError::Unreadable {
        path: path.clone(),
        source,
    })?;
    from_reader(name, file)
}

/// Parses a comma separated table with a header row into a [`Dataset`].
pub fn from_reader<R: Read>(source_name: &str, reader: R) -> LoadResult<Dataset> {
    let malformed = |err| csv_error(source_name, err);

    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = reader.headers().map_err(malformed)?.clone();
    for column in REQUIRED_COLUMNS {
        if !headers.iter().any(|h| h == column) {
            return Err(LoadError::MissingColumn {
                source_name: source_name.to_string(),
                column,
            });
        }
    }

    let mut dataset = Dataset::new(source_name, headers.iter().map(str::to_string).collect());
    for (index, result) in reader.records().enumerate() {
        let row = result.map_err(malformed)?;
        let record: StudentRecord = row.deserialize(Some(&headers)).map_err(malformed)?;
        if let Some(column) = record.first_non_finite() {
            return Err(LoadError::NonNumeric {
                source_name: source_name.to_string(),
                column,
                row: index + 1,
            });
        }
        dataset.push(record, row.iter().map(str::to_string).collect());
    }

    if dataset.is_empty() {
        return Err(LoadError::Empty {
            source_name: source_name.to_string(),
        });
    }

    info!("{source_name} loaded successfully ({} records)", dataset.len());
    Ok(dataset)
}

fn csv_error(source_name: &str, err: csv::Error) -> LoadError {
    if err.is_io_error() {
        return LoadError::Unreadable {
            path: source_name.into(),
            source: std::io::Error::from(err),
        };
    }
    LoadError::Malformed {
        source_name: source_name.to_string(),
        source: err,
    }
}
