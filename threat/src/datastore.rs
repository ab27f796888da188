use std::collections::HashMap;

use log::info;
use r2d2::{Pool, PooledConnection};
use r2d2_sqlite::SqliteConnectionManager;

use crate::repositories::{error::RepositoryError, spell_threat::SpellThreatRepository};

use self::data_types::{SpellRecord, SpellThreatEntry};

pub mod data_types;

pub type DbcStore<T> = HashMap<u32, T>;

#[derive(Debug)]
pub enum DataStoreError {
    Repository(RepositoryError),
    Pool(r2d2::Error),
}

impl From<RepositoryError> for DataStoreError {
    fn from(value: RepositoryError) -> Self {
        Self::Repository(value)
    }
}

impl From<r2d2::Error> for DataStoreError {
    fn from(value: r2d2::Error) -> Self {
        Self::Pool(value)
    }
}

#[derive(Default)]
pub struct DataStore {
    spells: DbcStore<SpellRecord>,
    spell_threats: HashMap<u32, SpellThreatEntry>,
}

impl DataStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn load_data(
        conn: &PooledConnection<SqliteConnectionManager>,
    ) -> Result<DataStore, DataStoreError> {
        let spell_threats: HashMap<u32, SpellThreatEntry> = SpellThreatRepository::load_all(conn)?
            .into_iter()
            .map(|record| (record.entry, record.entry()))
            .collect();
        info!("Loaded {} spell threat entries", spell_threats.len());

        Ok(DataStore {
            spells: HashMap::new(),
            spell_threats,
        })
    }

    pub fn load_from_pool(
        pool: &Pool<SqliteConnectionManager>,
    ) -> Result<DataStore, DataStoreError> {
        let conn = pool.get()?;
        Self::load_data(&conn)
    }

    pub fn insert_spell_record(&mut self, record: SpellRecord) {
        self.spells.insert(record.id, record);
    }

    pub fn get_spell_record(&self, id: u32) -> Option<&SpellRecord> {
        self.spells.get(&id)
    }

    pub fn insert_spell_threat_entry(&mut self, spell_id: u32, entry: SpellThreatEntry) {
        self.spell_threats.insert(spell_id, entry);
    }

    pub fn get_spell_threat_entry(&self, spell_id: u32) -> Option<&SpellThreatEntry> {
        self.spell_threats.get(&spell_id)
    }
}
