/// Player data persistence: one JSON array, one record per finished session.
///
/// ## File format:
///
/// ```json
/// [
///   { "player_name": "ash", "pokemons": [ { "id": "25", "name": "Pikachu", ... } ] }
/// ]
/// ```
///
/// Each run reads the array, appends its record and rewrites the file in
/// place. Existing records are carried through as raw JSON values, so
/// fields this client does not know about survive the rewrite.
///
/// The rewrite is not atomic (no temp file, no fsync). A crash mid-write
/// can corrupt the file.

use std::fs::{File, OpenOptions};
use std::io::{self, Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

use crate::domain::creature::{CaughtRecord, Creature};

/// Serialises writers within this process.
static SAVE_LOCK: Mutex<()> = Mutex::new(());

#[derive(Debug, Error)]
pub enum SaveError {
    #[error("failed to open player data file {path}: {source}")]
    Open { path: PathBuf, source: io::Error },
    #[error("failed to read player data: {0}")]
    Read(#[source] io::Error),
    #[error("failed to read player data: {0}")]
    Decode(#[source] serde_json::Error),
    #[error("failed to marshal player data: {0}")]
    Encode(#[source] serde_json::Error),
    #[error("failed to write player data to file: {0}")]
    Write(#[source] io::Error),
}

/// One finished session as stored on disk.
#[derive(Debug, Serialize)]
pub struct PlayerRecord {
    pub player_name: String,
    pub pokemons: Vec<CaughtRecord>,
}

impl PlayerRecord {
    pub fn new(player_name: &str, caught: &[Creature]) -> Self {
        PlayerRecord {
            player_name: player_name.to_string(),
            pokemons: caught.iter().map(CaughtRecord::from).collect(),
        }
    }
}

/// Append this session's catches to the array at `path`.
///
/// The file is created if missing. An empty (or whitespace-only) file counts
/// as an empty array. Any other unreadable content aborts the save and
/// leaves the file as it was. Returns the number of records now stored.
pub fn append_session(path: &Path, player_name: &str, caught: &[Creature]) -> Result<usize, SaveError> {
    // A poisoned lock only means another writer panicked; the file is still ours.
    let _guard = SAVE_LOCK.lock().unwrap_or_else(|e| e.into_inner());

    let mut file = OpenOptions::new()
        .read(true)
        .write(true)
        .create(true)
        .truncate(false)
        .open(path)
        .map_err(|source| SaveError::Open { path: path.to_path_buf(), source })?;

    let mut records = read_records(&mut file)?;

    let record = serde_json::to_value(PlayerRecord::new(player_name, caught))
        .map_err(SaveError::Encode)?;
    records.push(record);

    let data = serde_json::to_vec_pretty(&records).map_err(SaveError::Encode)?;

    file.seek(SeekFrom::Start(0)).map_err(SaveError::Write)?;
    file.write_all(&data).map_err(SaveError::Write)?;
    // Drop stale tail bytes if the re-encoding came out shorter.
    file.set_len(data.len() as u64).map_err(SaveError::Write)?;

    log::info!("saved {} caught for {} to {}", caught.len(), player_name, path.display());
    Ok(records.len())
}

fn read_records(file: &mut File) -> Result<Vec<Value>, SaveError> {
    let mut text = String::new();
    file.read_to_string(&mut text).map_err(SaveError::Read)?;

    if text.trim().is_empty() {
        return Ok(Vec::new());
    }
    let records: Option<Vec<Value>> = serde_json::from_str(&text).map_err(SaveError::Decode)?;
    Ok(records.unwrap_or_default())
}
