//! One-time schema setup: creates the statistic tables when absent and
//! seeds example rows into tables that are still empty. Safe to call
//! any number of times.

use crate::models::player::PlayerRecord;
use crate::repository::database::{Database, StatsError};
use crate::repository::tables::{PositionTable, POSITION_TABLES};
use diesel::sql_types::BigInt;
use diesel::QueryableByName;
use diesel_async::RunQueryDsl;
use log::info;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct SetupReport {
    pub tablolar: usize,
    pub tohumlanan: Vec<&'static str>,
}

#[derive(QueryableByName)]
struct CountRow {
    #[diesel(sql_type = BigInt)]
    toplam: i64,
}

/// Position-specific metric columns, keyed by table name.
fn metric_columns(table: &str) -> &'static str {
    match table {
        "kaleci" => "kurtaris INTEGER NOT NULL DEFAULT 0, gol_yeme INTEGER NOT NULL DEFAULT 0, ceza_sahasi_hakimiyeti INTEGER NOT NULL DEFAULT 0",
        "bek" => "orta INTEGER NOT NULL DEFAULT 0, top_kapma INTEGER NOT NULL DEFAULT 0, bindirme INTEGER NOT NULL DEFAULT 0",
        "stoper" => "top_kapma INTEGER NOT NULL DEFAULT 0, hava_topu INTEGER NOT NULL DEFAULT 0, pas_isabet INTEGER NOT NULL DEFAULT 0",
        "on_libero" => "top_kapma INTEGER NOT NULL DEFAULT 0, pas_isabet INTEGER NOT NULL DEFAULT 0, presing INTEGER NOT NULL DEFAULT 0",
        "kanat" => "orta INTEGER NOT NULL DEFAULT 0, dripling INTEGER NOT NULL DEFAULT 0, gol INTEGER NOT NULL DEFAULT 0",
        "orta_saha" => "pas_isabet INTEGER NOT NULL DEFAULT 0, kilit_pas INTEGER NOT NULL DEFAULT 0, top_kapma INTEGER NOT NULL DEFAULT 0",
        "ofansif_orta_saha" => "kilit_pas INTEGER NOT NULL DEFAULT 0, gol INTEGER NOT NULL DEFAULT 0, asist INTEGER NOT NULL DEFAULT 0",
        "acik_kanat" => "dripling INTEGER NOT NULL DEFAULT 0, sut INTEGER NOT NULL DEFAULT 0, gol INTEGER NOT NULL DEFAULT 0",
        "santrafor" => "gol INTEGER NOT NULL DEFAULT 0, sut_isabet INTEGER NOT NULL DEFAULT 0, hava_topu INTEGER NOT NULL DEFAULT 0",
        _ => "",
    }
}

fn position_table_ddl(pt: &PositionTable) -> String {
    let yan = if pt.has_yan_pozisyon {
        "yan_pozisyon VARCHAR NOT NULL, "
    } else {
        ""
    };
    format!(
        "CREATE TABLE IF NOT EXISTS {t} (\
         id SERIAL PRIMARY KEY, \
         oyuncu_id INTEGER NOT NULL UNIQUE, \
         takim VARCHAR NOT NULL, \
         pozisyon VARCHAR NOT NULL, \
         {yan}\
         oyuncu_isim VARCHAR NOT NULL, \
         oyuncu_yas INTEGER NOT NULL, \
         oyuncu_sure INTEGER NOT NULL, \
         {metrics}, \
         performans_skoru DOUBLE PRECISION NOT NULL DEFAULT 0, \
         kalite_sira_katsayisi DOUBLE PRECISION NOT NULL DEFAULT 0, \
         performans_skor_sirasi INTEGER NOT NULL DEFAULT 0, \
         surdurulebilirlik_sira INTEGER NOT NULL DEFAULT 0, \
         genel_sira INTEGER NOT NULL DEFAULT 0)",
        t = pt.table,
        yan = yan,
        metrics = metric_columns(pt.table)
    )
}

const KADRO_DDL: &str = "CREATE TABLE IF NOT EXISTS kadro (\
    id SERIAL PRIMARY KEY, \
    oyuncu_id INTEGER NOT NULL UNIQUE, \
    oyuncu_isim VARCHAR NOT NULL, \
    gol INTEGER NOT NULL DEFAULT 0, \
    asist INTEGER NOT NULL DEFAULT 0, \
    sari_kart INTEGER NOT NULL DEFAULT 0, \
    kirmizi_kart INTEGER NOT NULL DEFAULT 0, \
    created_at TIMESTAMPTZ DEFAULT NOW())";

const GOAL_ASSIST_DDL: &str = "CREATE TABLE IF NOT EXISTS goal_assist (\
    id SERIAL PRIMARY KEY, \
    oyuncu_id INTEGER NOT NULL UNIQUE, \
    gol INTEGER NOT NULL DEFAULT 0, \
    mac_adami INTEGER NOT NULL DEFAULT 0, \
    created_at TIMESTAMPTZ DEFAULT NOW())";

/// One seed player per position table, ids 1..=9, matching the kadro
/// and goal_assist seeds below.
struct SeedPlayer {
    table: &'static str,
    record: PlayerRecord,
}

fn seed_players() -> Vec<SeedPlayer> {
    let mk = |table: &'static str, id, isim: &str, pozisyon: &str, yan: &str, yas, sure| SeedPlayer {
        table,
        record: PlayerRecord {
            oyuncu_id: id,
            takim: "Yeşilova Gücü".to_string(),
            pozisyon: pozisyon.to_string(),
            yan_pozisyon: yan.to_string(),
            oyuncu_isim: isim.to_string(),
            oyuncu_yas: yas,
            oyuncu_sure: sure,
        },
    };
    vec![
        mk("kaleci", 1, "Emre Çetin", "Kaleci", "YOK", 27, 2160),
        mk("bek", 2, "Burak Aydın", "Bek", "Kanat", 23, 1890),
        mk("stoper", 3, "Mert Koç", "Stoper", "Bek", 29, 2070),
        mk("on_libero", 4, "Kerem Uysal", "Ön Libero", "Stoper", 25, 1740),
        mk("kanat", 5, "Arda Şahin", "Kanat", "Bek", 21, 1520),
        mk("orta_saha", 6, "Can Demirel", "Orta Saha", "Ön Libero", 26, 1980),
        mk("ofansif_orta_saha", 7, "Yusuf Kaya", "Ofansif Orta Saha", "Kanat", 24, 1830),
        mk("acik_kanat", 8, "Efe Doğan", "Açık Kanat", "Santrafor", 22, 1410),
        mk("santrafor", 9, "Hakan Yıldız", "Santrafor", "Açık Kanat", 28, 2010),
    ]
}

fn seed_insert_sql(seed: &SeedPlayer, has_yan_pozisyon: bool) -> String {
    let r = &seed.record;
    if has_yan_pozisyon {
        format!(
            "INSERT INTO {t} (oyuncu_id, takim, pozisyon, yan_pozisyon, oyuncu_isim, oyuncu_yas, oyuncu_sure) \
             VALUES ({id}, '{takim}', '{poz}', '{yan}', '{isim}', {yas}, {sure})",
            t = seed.table,
            id = r.oyuncu_id,
            takim = r.takim,
            poz = r.pozisyon,
            yan = r.yan_pozisyon,
            isim = r.oyuncu_isim,
            yas = r.oyuncu_yas,
            sure = r.oyuncu_sure
        )
    } else {
        format!(
            "INSERT INTO {t} (oyuncu_id, takim, pozisyon, oyuncu_isim, oyuncu_yas, oyuncu_sure) \
             VALUES ({id}, '{takim}', '{poz}', '{isim}', {yas}, {sure})",
            t = seed.table,
            id = r.oyuncu_id,
            takim = r.takim,
            poz = r.pozisyon,
            isim = r.oyuncu_isim,
            yas = r.oyuncu_yas,
            sure = r.oyuncu_sure
        )
    }
}

const KADRO_SEED: &str = "INSERT INTO kadro (oyuncu_id, oyuncu_isim, gol, asist, sari_kart, kirmizi_kart) VALUES \
    (1, 'Emre Çetin', 0, 0, 1, 0), \
    (2, 'Burak Aydın', 1, 3, 4, 0), \
    (3, 'Mert Koç', 2, 0, 5, 1), \
    (4, 'Kerem Uysal', 1, 2, 6, 0), \
    (5, 'Arda Şahin', 4, 5, 2, 0), \
    (6, 'Can Demirel', 3, 6, 3, 0), \
    (7, 'Yusuf Kaya', 6, 7, 2, 0), \
    (8, 'Efe Doğan', 5, 4, 1, 0), \
    (9, 'Hakan Yıldız', 12, 3, 3, 0)";

const GOAL_ASSIST_SEED: &str = "INSERT INTO goal_assist (oyuncu_id, gol, mac_adami) VALUES \
    (1, 0, 2), \
    (2, 1, 0), \
    (3, 2, 1), \
    (4, 1, 0), \
    (5, 4, 2), \
    (6, 3, 1), \
    (7, 6, 3), \
    (8, 5, 2), \
    (9, 12, 5)";

impl Database {
    /// Creates all statistic tables if absent and seeds each one that
    /// is still empty. A table that already holds rows is left alone,
    /// so calling this twice never duplicates seed data.
    pub async fn run_setup(&self) -> Result<SetupReport, StatsError> {
        let mut conn = self.get_db_conn().await?;
        let mut tablolar = 0usize;
        let mut tohumlanan = Vec::new();

        for pt in POSITION_TABLES {
            diesel::sql_query(position_table_ddl(pt))
                .execute(&mut conn)
                .await
                .map_err(StatsError::QueryError)?;
            tablolar += 1;
        }
        for ddl in [KADRO_DDL, GOAL_ASSIST_DDL] {
            diesel::sql_query(ddl)
                .execute(&mut conn)
                .await
                .map_err(StatsError::QueryError)?;
            tablolar += 1;
        }

        for (pt, seed) in POSITION_TABLES.iter().zip(seed_players()) {
            if table_is_empty(&mut conn, seed.table).await? {
                diesel::sql_query(seed_insert_sql(&seed, pt.has_yan_pozisyon))
                    .execute(&mut conn)
                    .await
                    .map_err(StatsError::QueryError)?;
                tohumlanan.push(seed.table);
            }
        }
        if table_is_empty(&mut conn, "kadro").await? {
            diesel::sql_query(KADRO_SEED)
                .execute(&mut conn)
                .await
                .map_err(StatsError::QueryError)?;
            tohumlanan.push("kadro");
        }
        if table_is_empty(&mut conn, "goal_assist").await? {
            diesel::sql_query(GOAL_ASSIST_SEED)
                .execute(&mut conn)
                .await
                .map_err(StatsError::QueryError)?;
            tohumlanan.push("goal_assist");
        }

        info!(
            "kurulum tamamlandı: {} tablo hazır, {} tablo tohumlandı",
            tablolar,
            tohumlanan.len()
        );
        Ok(SetupReport {
            tablolar,
            tohumlanan,
        })
    }
}

async fn table_is_empty(
    conn: &mut crate::repository::database::DBConn,
    table: &str,
) -> Result<bool, StatsError> {
    let count = diesel::sql_query(format!("SELECT COUNT(*) AS toplam FROM {table}"))
        .get_result::<CountRow>(conn)
        .await
        .map_err(StatsError::QueryError)?;
    Ok(count.toplam == 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ddl_is_idempotent_for_every_table() {
        for pt in POSITION_TABLES {
            let ddl = position_table_ddl(pt);
            assert!(ddl.starts_with("CREATE TABLE IF NOT EXISTS"), "{}", pt.table);
            assert!(ddl.contains("oyuncu_id INTEGER NOT NULL UNIQUE"));
            assert!(ddl.contains("genel_sira"));
        }
        assert!(KADRO_DDL.starts_with("CREATE TABLE IF NOT EXISTS"));
        assert!(GOAL_ASSIST_DDL.starts_with("CREATE TABLE IF NOT EXISTS"));
    }

    #[test]
    fn goalkeeper_ddl_has_no_yan_pozisyon() {
        let ddl = position_table_ddl(&POSITION_TABLES[0]);
        assert!(!ddl.contains("yan_pozisyon"));

        let ddl = position_table_ddl(&POSITION_TABLES[1]);
        assert!(ddl.contains("yan_pozisyon VARCHAR NOT NULL"));
    }

    #[test]
    fn every_position_table_has_metric_columns() {
        for pt in POSITION_TABLES {
            assert!(!metric_columns(pt.table).is_empty(), "{}", pt.table);
        }
    }

    #[test]
    fn seeds_cover_every_position_table_once() {
        let seeds = seed_players();
        assert_eq!(seeds.len(), POSITION_TABLES.len());
        for (pt, seed) in POSITION_TABLES.iter().zip(&seeds) {
            assert_eq!(pt.table, seed.table);
        }
    }

    #[test]
    fn seed_columns_follow_the_descriptor_flag() {
        let seeds = seed_players();
        let sql = seed_insert_sql(&seeds[0], POSITION_TABLES[0].has_yan_pozisyon);
        assert!(!sql.contains("yan_pozisyon"));
        let sql = seed_insert_sql(&seeds[1], POSITION_TABLES[1].has_yan_pozisyon);
        assert!(sql.contains("yan_pozisyon"));
    }
}
