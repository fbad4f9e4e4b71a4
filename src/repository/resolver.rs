//! Position-fallback player resolver.
//!
//! The goal_assist fact table stores only `(oyuncu_id, metric)` pairs;
//! the descriptive attributes live in nine per-position tables, and
//! nothing in the schema says which one holds a given player. The
//! resolver probes every table in the fixed order of
//! [`POSITION_TABLES`](crate::repository::tables::POSITION_TABLES)
//! with one batched `= ANY` query per table, then joins locally with
//! first-table-wins semantics.

use crate::models::player::PlayerRecord;
use crate::repository::database::{Database, StatsError};
use crate::repository::tables::{PositionTable, NOT_APPLICABLE, POSITION_TABLES};
use diesel::sql_types::{Array, Integer};
use diesel_async::RunQueryDsl;
use log::warn;
use std::collections::HashMap;

fn probe_select(pt: &PositionTable) -> String {
    // Tables without a secondary-position column get the marker
    // selected as a literal so every probe yields the same row shape.
    let yan = if pt.has_yan_pozisyon {
        "yan_pozisyon".to_string()
    } else {
        format!("'{NOT_APPLICABLE}' AS yan_pozisyon")
    };
    format!(
        "SELECT oyuncu_id, takim, pozisyon, {yan}, oyuncu_isim, oyuncu_yas, oyuncu_sure \
         FROM {t} WHERE oyuncu_id = ANY($1)",
        t = pt.table
    )
}

/// Folds per-table probe results into one record per player id. Batches
/// must arrive in probe order; the first table that claims an id wins.
/// A player appearing in a second table is a data-quality violation of
/// the one-table-per-player assumption and is logged, not returned.
fn assemble(batches: Vec<(&'static str, Vec<PlayerRecord>)>) -> HashMap<i32, PlayerRecord> {
    let mut resolved: HashMap<i32, PlayerRecord> = HashMap::new();
    let mut claimed_by: HashMap<i32, &'static str> = HashMap::new();
    for (table, rows) in batches {
        for row in rows {
            if let Some(first) = claimed_by.get(&row.oyuncu_id) {
                warn!(
                    "oyuncu {} hem {} hem {} tablosunda kayıtlı; {} kullanılıyor",
                    row.oyuncu_id, first, table, first
                );
                continue;
            }
            claimed_by.insert(row.oyuncu_id, table);
            resolved.insert(row.oyuncu_id, row);
        }
    }
    resolved
}

impl Database {
    /// Resolves descriptive records for a batch of player ids. Ids no
    /// position table knows are simply absent from the result map.
    ///
    /// Every table is probed with the full id set even after a hit, so
    /// that an id sitting in two tables is noticed and logged. The id
    /// sets here are leaderboard- or squad-sized, so the extra probes
    /// cost little.
    pub async fn resolve_players(
        &self,
        ids: &[i32],
    ) -> Result<HashMap<i32, PlayerRecord>, StatsError> {
        if ids.is_empty() {
            return Ok(HashMap::new());
        }
        let mut conn = self.get_db_conn().await?;
        let mut batches = Vec::with_capacity(POSITION_TABLES.len());
        for pt in POSITION_TABLES {
            let rows = diesel::sql_query(probe_select(pt))
                .bind::<Array<Integer>, _>(ids.to_vec())
                .load::<PlayerRecord>(&mut conn)
                .await
                .map_err(StatsError::QueryError)?;
            batches.push((pt.table, rows));
        }
        Ok(assemble(batches))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: i32, isim: &str, pozisyon: &str) -> PlayerRecord {
        PlayerRecord {
            oyuncu_id: id,
            takim: "Karşıyaka SK".to_string(),
            pozisyon: pozisyon.to_string(),
            yan_pozisyon: NOT_APPLICABLE.to_string(),
            oyuncu_isim: isim.to_string(),
            oyuncu_yas: 24,
            oyuncu_sure: 1800,
        }
    }

    fn empty_batches() -> Vec<(&'static str, Vec<PlayerRecord>)> {
        POSITION_TABLES.iter().map(|pt| (pt.table, vec![])).collect()
    }

    #[test]
    fn single_table_match_resolves() {
        let mut batches = empty_batches();
        batches[8].1.push(record(7, "Hakan", "Santrafor"));

        let resolved = assemble(batches);
        assert_eq!(resolved.len(), 1);
        assert_eq!(resolved[&7].oyuncu_isim, "Hakan");
        assert_eq!(resolved[&7].pozisyon, "Santrafor");
    }

    #[test]
    fn unknown_id_stays_absent() {
        let resolved = assemble(empty_batches());
        assert!(resolved.get(&99).is_none());
    }

    #[test]
    fn earliest_table_wins_on_duplicate() {
        // Same id in bek (index 1) and santrafor (index 8); bek comes
        // first in probe order and must win no matter the row content.
        let mut batches = empty_batches();
        batches[1].1.push(record(5, "Burak", "Bek"));
        batches[8].1.push(record(5, "Burak", "Santrafor"));

        let resolved = assemble(batches);
        assert_eq!(resolved.len(), 1);
        assert_eq!(resolved[&5].pozisyon, "Bek");
    }

    #[test]
    fn duplicate_handling_is_deterministic() {
        for _ in 0..20 {
            let mut batches = empty_batches();
            batches[3].1.push(record(2, "Kerem", "Ön Libero"));
            batches[6].1.push(record(2, "Kerem", "Ofansif Orta Saha"));
            assert_eq!(assemble(batches)[&2].pozisyon, "Ön Libero");
        }
    }

    #[test]
    fn goalkeeper_probe_selects_marker_literal() {
        let sql = probe_select(&POSITION_TABLES[0]);
        assert!(sql.contains("'YOK' AS yan_pozisyon"));
        assert!(sql.contains("FROM kaleci"));

        let sql = probe_select(&POSITION_TABLES[2]);
        assert!(sql.contains(", yan_pozisyon,"));
        assert!(sql.contains("FROM stoper"));
    }
}
