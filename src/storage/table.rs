//! Typed table access over JSONL files.

use serde::{de::DeserializeOwned, Serialize};
use tracing::info;

use super::{EntityType, JsonlReader, JsonlWriter, StorageConfig, StorageError};
use crate::models::{
    next_row_id, ChampionEntry, GameResult, LeagueMember, MemberId, RowId, Season,
    TeamSeasonEntry, Transaction,
};

/// A row type stored in one of the league tables.
pub trait Record: Serialize + DeserializeOwned + Clone + Send + Sync + 'static {
    /// Which table the row lives in.
    const ENTITY: EntityType;

    fn id(&self) -> RowId;

    /// Fails when `id` does not fit the table's id type.
    fn set_id(&mut self, id: RowId) -> Result<(), StorageError>;

    /// Season the row belongs to, if the table is seasonal.
    fn season(&self) -> Option<Season> {
        None
    }

    /// Member the row belongs to, if any.
    fn member(&self) -> Option<MemberId> {
        None
    }
}

impl Record for LeagueMember {
    const ENTITY: EntityType = EntityType::LeagueMember;

    fn id(&self) -> RowId {
        RowId::from(self.id)
    }

    fn set_id(&mut self, id: RowId) -> Result<(), StorageError> {
        self.id = MemberId::try_from(id).map_err(|_| StorageError::IdOutOfRange {
            table: Self::ENTITY.plural(),
            id,
        })?;
        Ok(())
    }

    fn member(&self) -> Option<MemberId> {
        Some(self.id)
    }
}

impl Record for TeamSeasonEntry {
    const ENTITY: EntityType = EntityType::TeamData;

    fn id(&self) -> RowId {
        self.id
    }

    fn set_id(&mut self, id: RowId) -> Result<(), StorageError> {
        self.id = id;
        Ok(())
    }

    fn season(&self) -> Option<Season> {
        Some(self.year)
    }

    fn member(&self) -> Option<MemberId> {
        Some(self.member_id)
    }
}

impl Record for GameResult {
    const ENTITY: EntityType = EntityType::GameData;

    fn id(&self) -> RowId {
        self.id
    }

    fn set_id(&mut self, id: RowId) -> Result<(), StorageError> {
        self.id = id;
        Ok(())
    }

    fn season(&self) -> Option<Season> {
        Some(self.year)
    }

    fn member(&self) -> Option<MemberId> {
        Some(self.member_id)
    }
}

impl Record for ChampionEntry {
    const ENTITY: EntityType = EntityType::Champion;

    fn id(&self) -> RowId {
        self.id
    }

    fn set_id(&mut self, id: RowId) -> Result<(), StorageError> {
        self.id = id;
        Ok(())
    }

    fn season(&self) -> Option<Season> {
        Some(self.year)
    }

    fn member(&self) -> Option<MemberId> {
        Some(self.member_id)
    }
}

impl Record for Transaction {
    const ENTITY: EntityType = EntityType::Transaction;

    fn id(&self) -> RowId {
        self.id
    }

    fn set_id(&mut self, id: RowId) -> Result<(), StorageError> {
        self.id = id;
        Ok(())
    }

    fn season(&self) -> Option<Season> {
        Some(self.year)
    }

    fn member(&self) -> Option<MemberId> {
        Some(self.member_id)
    }
}

/// CRUD access to one table.
///
/// Every call re-reads the file, so a `Table` holds no row state. Callers that
/// write concurrently must serialize their writes.
pub struct Table<T> {
    reader: JsonlReader<T>,
    writer: JsonlWriter<T>,
}

impl<T: Record> Table<T> {
    pub fn open(config: &StorageConfig) -> Self {
        Self {
            reader: JsonlReader::for_entity(config, T::ENTITY),
            writer: JsonlWriter::for_entity(config, T::ENTITY),
        }
    }

    pub fn list(&self) -> Result<Vec<T>, StorageError> {
        self.reader.read_all()
    }

    pub fn get(&self, id: RowId) -> Result<Option<T>, StorageError> {
        Ok(self.list()?.into_iter().find(|row| row.id() == id))
    }

    pub fn by_year(&self, year: Season) -> Result<Vec<T>, StorageError> {
        self.reader.read_where(|row| row.season() == Some(year))
    }

    pub fn by_member(&self, member_id: MemberId) -> Result<Vec<T>, StorageError> {
        self.reader.read_where(|row| row.member() == Some(member_id))
    }

    /// Store a new row.
    ///
    /// A non-positive id is replaced by the next free one; an explicit id that
    /// is already taken is rejected.
    pub fn insert(&self, mut row: T) -> Result<T, StorageError> {
        let existing = self.list()?;
        if row.id() > 0 {
            if existing.iter().any(|r| r.id() == row.id()) {
                return Err(StorageError::DuplicateId {
                    table: T::ENTITY.plural(),
                    id: row.id(),
                });
            }
        } else {
            row.set_id(next_row_id(existing.iter().map(Record::id)))?;
        }

        self.writer.append(&row)?;
        Ok(row)
    }

    /// Store many new rows, assigning ids the same way as [`Table::insert`].
    pub fn insert_batch(&self, rows: Vec<T>) -> Result<Vec<T>, StorageError> {
        let existing = self.list()?;
        let mut taken: Vec<RowId> = existing.iter().map(Record::id).collect();
        let mut stored = Vec::with_capacity(rows.len());

        for mut row in rows {
            if row.id() > 0 {
                if taken.contains(&row.id()) {
                    return Err(StorageError::DuplicateId {
                        table: T::ENTITY.plural(),
                        id: row.id(),
                    });
                }
            } else {
                row.set_id(next_row_id(taken.iter().copied()))?;
            }
            taken.push(row.id());
            stored.push(row);
        }

        self.writer.append_batch(&stored)?;
        info!("Imported {} rows into {}", stored.len(), T::ENTITY.plural());
        Ok(stored)
    }

    /// Replace every field of an existing row except its id.
    ///
    /// Returns `None` when no row has the id.
    pub fn update(&self, id: RowId, mut row: T) -> Result<Option<T>, StorageError> {
        let mut rows = self.list()?;
        let Some(slot) = rows.iter_mut().find(|r| r.id() == id) else {
            return Ok(None);
        };

        row.set_id(id)?;
        *slot = row.clone();
        self.writer.write_all(&rows)?;
        Ok(Some(row))
    }

    /// Remove a row. Returns whether anything was removed.
    pub fn delete(&self, id: RowId) -> Result<bool, StorageError> {
        let mut rows = self.list()?;
        let before = rows.len();
        rows.retain(|r| r.id() != id);
        if rows.len() == before {
            return Ok(false);
        }

        self.writer.write_all(&rows)?;
        Ok(true)
    }
}

impl Table<GameResult> {
    pub fn by_week(&self, week: &str) -> Result<Vec<GameResult>, StorageError> {
        self.reader
            .read_where(|game| game.week.as_deref() == Some(week))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Outcome;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn setup() -> (TempDir, StorageConfig) {
        let temp_dir = TempDir::new().unwrap();
        let config = StorageConfig::new(temp_dir.path().to_path_buf());
        (temp_dir, config)
    }

    #[test]
    fn test_insert_assigns_next_id() {
        let (_tmp, config) = setup();
        let table = Table::<ChampionEntry>::open(&config);

        let first = table.insert(ChampionEntry::new(1, 2021)).unwrap();
        let second = table.insert(ChampionEntry::new(2, 2022)).unwrap();

        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
        assert_eq!(table.list().unwrap().len(), 2);
    }

    #[test]
    fn test_insert_after_delete_uses_max_plus_one() {
        let (_tmp, config) = setup();
        let table = Table::<ChampionEntry>::open(&config);

        table.insert(ChampionEntry::new(1, 2021)).unwrap();
        table.insert(ChampionEntry::new(2, 2022)).unwrap();
        table.insert(ChampionEntry::new(3, 2023)).unwrap();
        assert!(table.delete(2).unwrap());

        let next = table.insert(ChampionEntry::new(4, 2024)).unwrap();
        assert_eq!(next.id, 4);
    }

    #[test]
    fn test_insert_explicit_id_conflict() {
        let (_tmp, config) = setup();
        let table = Table::<LeagueMember>::open(&config);

        table.insert(LeagueMember::new(7, "Sam", 3)).unwrap();
        let err = table.insert(LeagueMember::new(7, "Alex", 1)).unwrap_err();

        assert!(matches!(err, StorageError::DuplicateId { id: 7, .. }));
    }

    #[test]
    fn test_member_id_space_exhausted() {
        let (_tmp, config) = setup();
        let table = Table::<LeagueMember>::open(&config);
        table.insert(LeagueMember::new(MemberId::MAX, "Last", 1)).unwrap();

        let err = table.insert(LeagueMember::new(0, "Overflow", 1)).unwrap_err();
        assert!(matches!(err, StorageError::IdOutOfRange { .. }));

        let err = table
            .insert_batch(vec![LeagueMember::new(0, "Overflow", 1)])
            .unwrap_err();
        assert!(matches!(err, StorageError::IdOutOfRange { .. }));

        let ids: Vec<MemberId> = table.list().unwrap().into_iter().map(|m| m.id).collect();
        assert_eq!(ids, vec![MemberId::MAX]);
    }

    #[test]
    fn test_get_and_missing() {
        let (_tmp, config) = setup();
        let table = Table::<TeamSeasonEntry>::open(&config);
        let stored = table
            .insert(TeamSeasonEntry::new(2022, 3, "Blitz Brigade"))
            .unwrap();

        assert_eq!(table.get(stored.id).unwrap(), Some(stored));
        assert_eq!(table.get(99).unwrap(), None);
    }

    #[test]
    fn test_filters_by_year_and_member() {
        let (_tmp, config) = setup();
        let table = Table::<TeamSeasonEntry>::open(&config);
        table.insert(TeamSeasonEntry::new(2021, 1, "A")).unwrap();
        table.insert(TeamSeasonEntry::new(2022, 1, "A")).unwrap();
        table.insert(TeamSeasonEntry::new(2022, 2, "B")).unwrap();

        let names = |rows: Vec<TeamSeasonEntry>| -> Vec<(i32, i32)> {
            rows.into_iter().map(|r| (r.year, r.member_id)).collect()
        };

        assert_eq!(names(table.by_year(2022).unwrap()), vec![(2022, 1), (2022, 2)]);
        assert_eq!(names(table.by_member(1).unwrap()), vec![(2021, 1), (2022, 1)]);
        assert!(table.by_year(1999).unwrap().is_empty());
    }

    #[test]
    fn test_games_by_week() {
        let (_tmp, config) = setup();
        let table = Table::<GameResult>::open(&config);
        let game = GameResult::new(1, 2, 100, 90, Outcome::Win, 2023, "Rd1");
        table.insert(game.clone()).unwrap();
        table.insert(game.mirrored()).unwrap();
        table
            .insert(GameResult::new(3, 4, 80, 70, Outcome::Win, 2023, "5"))
            .unwrap();

        assert_eq!(table.by_week("Rd1").unwrap().len(), 2);
        assert_eq!(table.by_week("5").unwrap().len(), 1);
        assert!(table.by_week("6").unwrap().is_empty());
    }

    #[test]
    fn test_update_replaces_fields_keeps_id() {
        let (_tmp, config) = setup();
        let table = Table::<Transaction>::open(&config);
        let stored = table
            .insert(Transaction {
                member_id: 1,
                year: 2023,
                trades: 1,
                ..Default::default()
            })
            .unwrap();

        let updated = table
            .update(
                stored.id,
                Transaction {
                    id: 500,
                    member_id: 1,
                    year: 2023,
                    trades: 4,
                    drops: 2,
                    ..Default::default()
                },
            )
            .unwrap()
            .unwrap();

        assert_eq!(updated.id, stored.id);
        assert_eq!(table.get(stored.id).unwrap().unwrap().trades, 4);
        assert_eq!(table.list().unwrap().len(), 1);
    }

    #[test]
    fn test_update_missing_returns_none() {
        let (_tmp, config) = setup();
        let table = Table::<ChampionEntry>::open(&config);
        assert!(table
            .update(3, ChampionEntry::new(1, 2020))
            .unwrap()
            .is_none());
    }

    #[test]
    fn test_delete_missing_returns_false() {
        let (_tmp, config) = setup();
        let table = Table::<ChampionEntry>::open(&config);
        table.insert(ChampionEntry::new(1, 2020)).unwrap();

        assert!(!table.delete(42).unwrap());
        assert_eq!(table.list().unwrap().len(), 1);
    }

    #[test]
    fn test_insert_batch_assigns_sequential_ids() {
        let (_tmp, config) = setup();
        let table = Table::<ChampionEntry>::open(&config);
        table.insert(ChampionEntry::new(1, 2019)).unwrap();

        let stored = table
            .insert_batch(vec![
                ChampionEntry::new(2, 2020),
                ChampionEntry::new(3, 2021),
            ])
            .unwrap();

        let ids: Vec<RowId> = stored.iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![2, 3]);
        assert_eq!(table.list().unwrap().len(), 3);
    }

    #[test]
    fn test_insert_batch_rejects_duplicate_ids() {
        let (_tmp, config) = setup();
        let table = Table::<LeagueMember>::open(&config);

        let err = table
            .insert_batch(vec![
                LeagueMember::new(1, "Jordan", 2),
                LeagueMember::new(1, "Casey", 5),
            ])
            .unwrap_err();

        assert!(matches!(err, StorageError::DuplicateId { id: 1, .. }));
        assert!(table.list().unwrap().is_empty());
    }
}
