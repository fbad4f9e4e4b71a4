use diesel::sql_types::{Integer, Text};
use diesel::{Queryable, QueryableByName};
use serde::{Deserialize, Serialize};

/// Descriptive record of one player, pulled from whichever position table
/// holds them. `yan_pozisyon` carries the "YOK" marker for goalkeepers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, QueryableByName)]
pub struct PlayerRecord {
    #[diesel(sql_type = Integer)]
    pub oyuncu_id: i32,
    #[diesel(sql_type = Text)]
    pub takim: String,
    #[diesel(sql_type = Text)]
    pub pozisyon: String,
    #[diesel(sql_type = Text)]
    pub yan_pozisyon: String,
    #[diesel(sql_type = Text)]
    pub oyuncu_isim: String,
    #[diesel(sql_type = Integer)]
    pub oyuncu_yas: i32,
    #[diesel(sql_type = Integer)]
    pub oyuncu_sure: i32,
}

/// `(oyuncu_id, metric)` pair from the goal_assist fact table.
#[derive(Debug, Clone, Copy, Queryable)]
pub struct FactRow {
    pub oyuncu_id: i32,
    pub deger: i32,
}

#[derive(Debug, Clone, Queryable, Serialize)]
pub struct KadroRow {
    pub id: i32,
    pub oyuncu_id: i32,
    pub oyuncu_isim: String,
    pub gol: i32,
    pub asist: i32,
    pub sari_kart: i32,
    pub kirmizi_kart: i32,
    #[serde(skip_serializing)]
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
}

#[derive(Debug, Serialize)]
pub struct GolKraliEntry {
    #[serde(flatten)]
    pub oyuncu: PlayerRecord,
    pub gol: i32,
}

#[derive(Debug, Serialize)]
pub struct MacAdamiEntry {
    #[serde(flatten)]
    pub oyuncu: PlayerRecord,
    pub mac_adami: i32,
}

/// One denormalized squad-view row: roster totals plus the descriptive
/// attributes of the position table that claimed the player, if any.
#[derive(Debug, Serialize)]
pub struct SquadRow {
    pub oyuncu_id: i32,
    pub oyuncu_isim: String,
    pub gol: i32,
    pub asist: i32,
    pub sari_kart: i32,
    pub kirmizi_kart: i32,
    pub takim: Option<String>,
    pub pozisyon: Option<String>,
    pub yan_pozisyon: Option<String>,
    pub oyuncu_yas: Option<i32>,
    pub oyuncu_sure: Option<i32>,
}

#[derive(Debug, Deserialize)]
pub struct PlayerQuery {
    pub oyuncu_id: Option<String>,
}

// Both parameters arrive as raw strings so that unusable values can be
// coerced to the defaults instead of bouncing the request.
#[derive(Debug, Deserialize)]
pub struct TopQuery {
    #[serde(rename = "sortBy")]
    pub sort_by: Option<String>,
    #[serde(rename = "minSure")]
    pub min_sure: Option<String>,
}
