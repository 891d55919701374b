//! Point-in-time copy of every table.

use super::{StorageConfig, StorageError, Table};
use crate::models::{ChampionEntry, GameResult, LeagueMember, TeamSeasonEntry, Transaction};

/// All league rows, read once per request.
#[derive(Debug, Clone, Default)]
pub struct LeagueSnapshot {
    pub members: Vec<LeagueMember>,
    pub team_entries: Vec<TeamSeasonEntry>,
    pub games: Vec<GameResult>,
    pub champions: Vec<ChampionEntry>,
    pub transactions: Vec<Transaction>,
}

impl LeagueSnapshot {
    pub fn load(config: &StorageConfig) -> Result<Self, StorageError> {
        Ok(Self {
            members: Table::open(config).list()?,
            team_entries: Table::open(config).list()?,
            games: Table::open(config).list()?,
            champions: Table::open(config).list()?,
            transactions: Table::open(config).list()?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Outcome;
    use tempfile::TempDir;

    #[test]
    fn test_load_empty_data_dir() {
        let tmp = TempDir::new().unwrap();
        let snapshot = LeagueSnapshot::load(&StorageConfig::new(tmp.path().to_path_buf())).unwrap();

        assert!(snapshot.members.is_empty());
        assert!(snapshot.team_entries.is_empty());
        assert!(snapshot.games.is_empty());
        assert!(snapshot.champions.is_empty());
        assert!(snapshot.transactions.is_empty());
    }

    #[test]
    fn test_load_reads_each_table() {
        let tmp = TempDir::new().unwrap();
        let config = StorageConfig::new(tmp.path().to_path_buf());

        Table::<LeagueMember>::open(&config)
            .insert(LeagueMember::new(1, "Kai", 2))
            .unwrap();
        Table::<TeamSeasonEntry>::open(&config)
            .insert(TeamSeasonEntry::new(2023, 1, "Kai's Crew"))
            .unwrap();
        Table::<GameResult>::open(&config)
            .insert(GameResult::new(1, 2, 99, 98, Outcome::Win, 2023, "1"))
            .unwrap();

        let snapshot = LeagueSnapshot::load(&config).unwrap();
        assert_eq!(snapshot.members.len(), 1);
        assert_eq!(snapshot.team_entries[0].team_name, "Kai's Crew");
        assert_eq!(snapshot.games.len(), 1);
        assert!(snapshot.champions.is_empty());
    }
}
