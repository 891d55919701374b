//! JSON Lines table files.
//!
//! One JSON object per line. Appends are used for inserts; updates and
//! deletes rewrite the whole file.

use std::fs::{self, File, OpenOptions};
use std::io::{BufRead, BufReader, BufWriter, ErrorKind, Write};
use std::marker::PhantomData;
use std::path::PathBuf;
use std::str::FromStr;

use serde::{de::DeserializeOwned, Serialize};
use tracing::{debug, info, warn};

use super::{StorageConfig, StorageError};

/// The league's tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityType {
    LeagueMember,
    TeamData,
    GameData,
    Champion,
    Transaction,
}

impl EntityType {
    pub const ALL: [EntityType; 5] = [
        EntityType::LeagueMember,
        EntityType::TeamData,
        EntityType::GameData,
        EntityType::Champion,
        EntityType::Transaction,
    ];

    /// Get the filename for this entity type.
    pub fn filename(&self) -> &'static str {
        match self {
            EntityType::LeagueMember => "league_members.jsonl",
            EntityType::TeamData => "team_data.jsonl",
            EntityType::GameData => "game_data.jsonl",
            EntityType::Champion => "champions.jsonl",
            EntityType::Transaction => "transactions.jsonl",
        }
    }

    /// Singular, capitalised name used in "not found" messages.
    pub fn singular(&self) -> &'static str {
        match self {
            EntityType::LeagueMember => "League member",
            EntityType::TeamData => "Team data",
            EntityType::GameData => "Game data",
            EntityType::Champion => "Champion",
            EntityType::Transaction => "Transaction",
        }
    }

    /// Plural, lowercase name used for empty result sets.
    pub fn plural(&self) -> &'static str {
        match self {
            EntityType::LeagueMember => "league members",
            EntityType::TeamData => "team data",
            EntityType::GameData => "game data",
            EntityType::Champion => "champions",
            EntityType::Transaction => "transactions",
        }
    }
}

impl FromStr for EntityType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace(['-', '_'], "").as_str() {
            "leaguemembers" | "leaguemember" | "members" => Ok(EntityType::LeagueMember),
            "teamdata" | "teams" => Ok(EntityType::TeamData),
            "gamedata" | "games" => Ok(EntityType::GameData),
            "champions" | "champion" => Ok(EntityType::Champion),
            "transactions" | "transaction" => Ok(EntityType::Transaction),
            _ => {
                let known: Vec<String> = EntityType::ALL
                    .iter()
                    .map(|e| e.filename().trim_end_matches(".jsonl").replace('_', "-"))
                    .collect();
                Err(format!("unknown table '{}': expected one of {}", s, known.join(", ")))
            }
        }
    }
}

/// Writes rows as JSON Lines.
pub struct JsonlWriter<T> {
    path: PathBuf,
    _marker: PhantomData<T>,
}

impl<T: Serialize> JsonlWriter<T> {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            _marker: PhantomData,
        }
    }

    pub fn for_entity(config: &StorageConfig, entity: EntityType) -> Self {
        Self::new(config.table_path(entity))
    }

    fn open_for_append(&self) -> Result<BufWriter<File>, StorageError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        Ok(BufWriter::new(file))
    }

    /// Append one row.
    pub fn append(&self, row: &T) -> Result<(), StorageError> {
        let mut out = self.open_for_append()?;
        encode_lines(&mut out, std::slice::from_ref(row))?;
        out.flush()?;

        debug!("Appended row to {:?}", self.path);
        Ok(())
    }

    /// Append rows in order. An empty slice leaves the file untouched.
    pub fn append_batch(&self, rows: &[T]) -> Result<usize, StorageError> {
        if rows.is_empty() {
            return Ok(0);
        }

        let mut out = self.open_for_append()?;
        let count = encode_lines(&mut out, rows)?;
        out.flush()?;

        info!("Appended {} rows to {:?}", count, self.path);
        Ok(count)
    }

    /// Replace the file contents with `rows`.
    ///
    /// Rows go to a sibling `.tmp` file first, which is then renamed over the
    /// table, so readers see either the old or the new contents.
    pub fn write_all(&self, rows: &[T]) -> Result<usize, StorageError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let tmp_path = self.path.with_extension("jsonl.tmp");
        let mut out = BufWriter::new(File::create(&tmp_path)?);
        let count = encode_lines(&mut out, rows)?;
        out.into_inner().map_err(|e| e.into_error())?.sync_all()?;
        fs::rename(&tmp_path, &self.path)?;

        debug!("Rewrote {:?} with {} rows", self.path, count);
        Ok(count)
    }
}

fn encode_lines<T: Serialize, W: Write>(out: &mut W, rows: &[T]) -> Result<usize, StorageError> {
    for row in rows {
        serde_json::to_writer(&mut *out, row)?;
        out.write_all(b"\n")?;
    }
    Ok(rows.len())
}

/// Reads JSON Lines rows.
pub struct JsonlReader<T> {
    path: PathBuf,
    _marker: PhantomData<T>,
}

impl<T: DeserializeOwned> JsonlReader<T> {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            _marker: PhantomData,
        }
    }

    pub fn for_entity(config: &StorageConfig, entity: EntityType) -> Self {
        Self::new(config.table_path(entity))
    }

    /// Read every row.
    ///
    /// A missing file reads as empty. Lines that fail to parse are logged and
    /// skipped.
    pub fn read_all(&self) -> Result<Vec<T>, StorageError> {
        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut rows = Vec::new();
        for (index, line) in BufReader::new(file).lines().enumerate() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }

            match serde_json::from_str(&line) {
                Ok(row) => rows.push(row),
                Err(e) => warn!("Skipping line {} of {:?}: {}", index + 1, self.path, e),
            }
        }

        debug!("Read {} rows from {:?}", rows.len(), self.path);
        Ok(rows)
    }

    pub fn read_where<F>(&self, predicate: F) -> Result<Vec<T>, StorageError>
    where
        F: Fn(&T) -> bool,
    {
        Ok(self.read_all()?.into_iter().filter(|row| predicate(row)).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};
    use tempfile::TempDir;

    #[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
    struct Row {
        id: i64,
        name: String,
    }

    fn row(id: i64, name: &str) -> Row {
        Row {
            id,
            name: name.to_string(),
        }
    }

    #[test]
    fn test_jsonl_write_and_read() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("rows.jsonl");

        let rows = vec![row(1, "First"), row(2, "Second")];

        let writer: JsonlWriter<Row> = JsonlWriter::new(path.clone());
        assert_eq!(writer.write_all(&rows).unwrap(), 2);

        let reader: JsonlReader<Row> = JsonlReader::new(path);
        assert_eq!(reader.read_all().unwrap(), rows);
    }

    #[test]
    fn test_jsonl_append_creates_parent_dir() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("append.jsonl");

        let writer: JsonlWriter<Row> = JsonlWriter::new(path.clone());
        writer.append(&row(1, "First")).unwrap();
        writer.append(&row(2, "Second")).unwrap();

        let reader: JsonlReader<Row> = JsonlReader::new(path);
        assert_eq!(reader.read_all().unwrap().len(), 2);
    }

    #[test]
    fn test_jsonl_read_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let reader: JsonlReader<Row> = JsonlReader::new(temp_dir.path().join("missing.jsonl"));
        assert!(reader.read_all().unwrap().is_empty());
    }

    #[test]
    fn test_jsonl_read_where() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("filter.jsonl");

        let writer: JsonlWriter<Row> = JsonlWriter::new(path.clone());
        writer
            .write_all(&[row(1, "A"), row(2, "B"), row(3, "C")])
            .unwrap();

        let reader: JsonlReader<Row> = JsonlReader::new(path);
        let filtered = reader.read_where(|r| r.id >= 2).unwrap();

        assert_eq!(filtered.len(), 2);
        assert_eq!(filtered[0].name, "B");
        assert_eq!(filtered[1].name, "C");
    }

    #[test]
    fn test_append_batch_empty() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("empty_batch.jsonl");

        let writer: JsonlWriter<Row> = JsonlWriter::new(path.clone());
        assert_eq!(writer.append_batch(&[]).unwrap(), 0);
        assert!(!path.exists());
    }

    #[test]
    fn test_write_all_overwrites_existing() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("overwrite.jsonl");

        let writer: JsonlWriter<Row> = JsonlWriter::new(path.clone());
        let reader: JsonlReader<Row> = JsonlReader::new(path);

        writer.write_all(&[row(1, "Old")]).unwrap();
        writer.write_all(&[row(2, "New1"), row(3, "New2")]).unwrap();

        let read = reader.read_all().unwrap();
        assert_eq!(read.len(), 2);
        assert_eq!(read[0].name, "New1");
    }

    #[test]
    fn test_write_all_leaves_no_temp_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("champions.jsonl");

        let writer: JsonlWriter<Row> = JsonlWriter::new(path.clone());
        writer.write_all(&[row(1, "Only")]).unwrap();

        let names: Vec<_> = std::fs::read_dir(temp_dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name())
            .collect();
        assert_eq!(names, vec![std::ffi::OsString::from("champions.jsonl")]);
    }

    #[test]
    fn test_read_all_skips_bad_lines() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("bad_lines.jsonl");

        std::fs::write(
            &path,
            r#"{"id":1,"name":"Good"}
not-valid-json

{"id":2,"name":"Also Good"}
"#,
        )
        .unwrap();

        let reader: JsonlReader<Row> = JsonlReader::new(path);
        let rows = reader.read_all().unwrap();
        assert_eq!(rows, vec![row(1, "Good"), row(2, "Also Good")]);
    }

    #[test]
    fn test_entity_type_filenames() {
        assert_eq!(
            EntityType::LeagueMember.filename(),
            "league_members.jsonl"
        );
        assert_eq!(EntityType::TeamData.filename(), "team_data.jsonl");
        assert_eq!(EntityType::GameData.filename(), "game_data.jsonl");
        assert_eq!(EntityType::Champion.filename(), "champions.jsonl");
        assert_eq!(EntityType::Transaction.filename(), "transactions.jsonl");
    }

    #[test]
    fn test_entity_type_from_str() {
        assert_eq!(
            "league-members".parse::<EntityType>(),
            Ok(EntityType::LeagueMember)
        );
        assert_eq!("game_data".parse::<EntityType>(), Ok(EntityType::GameData));
        assert_eq!("Champions".parse::<EntityType>(), Ok(EntityType::Champion));
        assert_eq!(
            "players".parse::<EntityType>(),
            Err("unknown table 'players': expected one of league-members, team-data, \
                 game-data, champions, transactions"
                .to_string())
        );
    }

    #[test]
    fn test_for_entity_path() {
        let temp_dir = TempDir::new().unwrap();
        let config = StorageConfig::new(temp_dir.path().to_path_buf());

        let writer: JsonlWriter<Row> = JsonlWriter::for_entity(&config, EntityType::Champion);
        assert_eq!(writer.path, config.tables_dir().join("champions.jsonl"));
    }
}
