// File: src/persistence.rs
use crate::core::types::KnowledgeBase;
use crate::error::{Error, Result};
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, ErrorKind, Write};
use std::path::Path;
use tempfile::NamedTempFile;

/// On-disk encoding of a knowledge base, chosen by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnapshotFormat {
    /// Pretty-printed JSON; the default, meant to be hand-editable.
    Json,
    /// Compact bincode, used for `*.bin` files.
    Bincode,
}

impl SnapshotFormat {
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("bin") => Self::Bincode,
            _ => Self::Json,
        }
    }
}

fn io_error(path: &Path) -> impl FnOnce(std::io::Error) -> Error + '_ {
    move |source| Error::Io {
        path: path.to_path_buf(),
        source,
    }
}

/// Writes `kb` to `path` atomically: the snapshot goes to a temp file in the
/// same directory which then replaces the target. The derived index is not
/// stored.
pub fn save_to_disk(kb: &KnowledgeBase, path: &Path) -> Result<()> {
    let parent_dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    fs::create_dir_all(parent_dir).map_err(io_error(parent_dir))?;

    let temp_file = NamedTempFile::new_in(parent_dir).map_err(io_error(parent_dir))?;
    {
        let mut writer = BufWriter::new(temp_file.as_file());
        match SnapshotFormat::from_path(path) {
            SnapshotFormat::Json => serde_json::to_writer_pretty(&mut writer, kb)?,
            SnapshotFormat::Bincode => bincode::serialize_into(&mut writer, kb)?,
        }
        writer.flush().map_err(io_error(path))?;
    }

    temp_file.persist(path).map_err(|source| Error::Persist {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::info!(path = %path.display(), records = kb.records().len(), "knowledge base saved");
    Ok(())
}

/// Reads a knowledge base from `path`.
///
/// A missing or empty file yields a fresh default knowledge base. Blank
/// sections are filled with defaults and the index is rebuilt before
/// returning.
pub fn load_from_disk(path: &Path) -> Result<KnowledgeBase> {
    let file = match File::open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            tracing::debug!(path = %path.display(), "no knowledge base yet, starting empty");
            return Ok(KnowledgeBase::new());
        }
        Err(e) => return Err(io_error(path)(e)),
    };
    let len = file.metadata().map_err(io_error(path))?.len();
    if len == 0 {
        return Ok(KnowledgeBase::new());
    }

    let reader = BufReader::new(file);
    let mut kb: KnowledgeBase = match SnapshotFormat::from_path(path) {
        SnapshotFormat::Json => serde_json::from_reader(reader)?,
        SnapshotFormat::Bincode => bincode::deserialize_from(reader)?,
    };
    kb.normalize();

    tracing::info!(path = %path.display(), records = kb.records().len(), "knowledge base loaded");
    Ok(kb)
}
