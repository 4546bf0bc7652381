use std::path::{Path, PathBuf};

use crate::analysis;
use crate::error::LoadResult;
use crate::loader;
use crate::models::{ClassSummary, Dataset};

#[derive(Debug, Clone)]
pub struct Loaded {
    pub dataset: Dataset,
    pub summary: ClassSummary,
}

/// Holds the single live dataset for a data directory.
#[derive(Debug)]
pub struct Session {
    data_dir: PathBuf,
    current: Option<Loaded>,
}

impl Session {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            current: None,
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn sources(&self) -> LoadResult<Vec<String>> {
        loader::list_sources(&self.data_dir)
    }

    /// Loads and analyzes `name`. The previous state is only replaced on success.
    pub fn select(&mut self, name: &str) -> LoadResult<()> {
        let dataset = loader::select(&self.data_dir, name)?;
        let summary = analysis::analyze(&dataset)?;
        self.current = Some(Loaded { dataset, summary });
        Ok(())
    }

    pub fn current(&self) -> Option<&Loaded> {
        self.current.as_ref()
    }
}
