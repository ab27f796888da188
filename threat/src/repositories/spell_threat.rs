use indicatif::ProgressBar;
use r2d2::PooledConnection;
use r2d2_sqlite::SqliteConnectionManager;

use crate::datastore::data_types::SpellThreatEntry;

use super::error::{RepositoryError, RepositoryResult};

pub struct SpellThreatRepository;

impl SpellThreatRepository {
    pub fn load_all(
        conn: &PooledConnection<SqliteConnectionManager>,
    ) -> RepositoryResult<Vec<SpellThreatDbRecord>> {
        let count: u64 =
            conn.query_row("SELECT COUNT(*) FROM spell_threat", [], |row| row.get(0))?;
        let bar = ProgressBar::new(count);

        let mut stmt =
            conn.prepare("SELECT entry, flat_mod, pct_mod, ap_pct_mod FROM spell_threat")?;

        let result = stmt
            .query_map([], |row| {
                bar.inc(1);
                if bar.position() == count {
                    bar.finish();
                }

                Ok(SpellThreatDbRecord {
                    entry: row.get("entry")?,
                    flat_mod: row.get("flat_mod")?,
                    pct_mod: row.get("pct_mod")?,
                    ap_pct_mod: row.get("ap_pct_mod")?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;

        bar.finish_and_clear();

        // A negative multiplier would turn damage into threat reduction
        if let Some(invalid) = result.iter().find(|r| r.pct_mod < 0.0) {
            return Err(RepositoryError::InvalidRecord {
                table: "spell_threat",
                entry: invalid.entry,
            });
        }

        Ok(result)
    }
}

pub struct SpellThreatDbRecord {
    pub entry: u32,
    pub flat_mod: i32,
    pub pct_mod: f32,
    pub ap_pct_mod: f32,
}

impl SpellThreatDbRecord {
    pub fn entry(&self) -> SpellThreatEntry {
        SpellThreatEntry {
            flat_mod: self.flat_mod,
            pct_mod: self.pct_mod,
            ap_pct_mod: self.ap_pct_mod,
        }
    }
}
