use crate::models::player::{
    FactRow, GolKraliEntry, KadroRow, MacAdamiEntry, PlayerQuery, PlayerRecord, SquadRow, TopQuery,
};
use crate::models::response::ApiResponse;
use crate::repository::database::{Database, StatsError};
use crate::repository::tables::{find_category, listing_table, sort_key};
use crate::AppState;
use actix_web::web::Data;
use actix_web::{HttpResponse, Responder};
use log::error;
use serde_json::Value;
use std::collections::HashMap;

fn db_failure(context: &str, err: &StatsError) -> HttpResponse {
    error!("{context}: {err}");
    HttpResponse::InternalServerError()
        .json(ApiResponse::<Value>::fail(format!("veritabanı hatası: {err}")))
}

fn unknown_category(kategori: &str) -> HttpResponse {
    HttpResponse::NotFound().json(ApiResponse::<Value>::fail(format!(
        "bilinmeyen kategori: {kategori}"
    )))
}

pub async fn list_category_service(data: Data<AppState>, kategori: &str) -> impl Responder {
    let Some(table) = listing_table(kategori) else {
        return unknown_category(kategori);
    };
    match data.db.list_rows(table).await {
        Ok(rows) => HttpResponse::Ok().json(ApiResponse::ok(rows)),
        Err(err) => db_failure("liste sorgusu başarısız", &err),
    }
}

pub async fn find_player_service(
    data: Data<AppState>,
    kategori: &str,
    query: PlayerQuery,
) -> impl Responder {
    let Some(table) = listing_table(kategori) else {
        return unknown_category(kategori);
    };
    let oyuncu_id = query
        .oyuncu_id
        .as_deref()
        .and_then(|v| v.parse::<i32>().ok())
        .filter(|id| *id > 0);
    let Some(oyuncu_id) = oyuncu_id else {
        return HttpResponse::Ok().json(ApiResponse::<Value>::fail("geçersiz oyuncu_id"));
    };
    match data.db.find_player(table, oyuncu_id).await {
        Ok(Some(row)) => HttpResponse::Ok().json(ApiResponse::ok(row)),
        Ok(None) => HttpResponse::Ok().json(ApiResponse::<Value>::fail("oyuncu bulunamadı")),
        Err(err) => db_failure("oyuncu sorgusu başarısız", &err),
    }
}

/// `minSure` arrives as a raw string; anything that is not an integer
/// (including absence) falls back to 0, which filters nothing out.
fn coerce_min_sure(raw: Option<&str>) -> i32 {
    raw.and_then(|v| v.parse::<i32>().ok()).unwrap_or(0)
}

pub async fn top_of_category_service(
    data: Data<AppState>,
    kategori: &str,
    query: TopQuery,
) -> impl Responder {
    let Some(pt) = find_category(kategori) else {
        return unknown_category(kategori);
    };
    // Out-of-list sort names and unparseable minute filters coerce to
    // the defaults; the request itself never fails on them.
    let sort = sort_key(query.sort_by.as_deref());
    let min_sure = coerce_min_sure(query.min_sure.as_deref());

    match data.db.top_of_table(pt.table, sort, min_sure).await {
        Ok(rows) if rows.is_empty() => HttpResponse::Ok().json(ApiResponse::<Value>::fail(
            format!("{} verisi bulunamadı", pt.label),
        )),
        Ok(rows) => HttpResponse::Ok().json(ApiResponse::ok(rows)),
        Err(err) => db_failure("sıralama sorgusu başarısız", &err),
    }
}

/// Joins fact rows with resolved player records, keeping fact order.
/// Ids the resolver could not place are dropped whole, never emitted
/// as partial rows. The five-entry cap is enforced here as well as in
/// the fact queries, so no caller can widen a leaderboard.
fn merge_leaderboard(
    facts: Vec<FactRow>,
    resolved: &HashMap<i32, PlayerRecord>,
) -> Vec<(PlayerRecord, i32)> {
    facts
        .into_iter()
        .filter_map(|fact| {
            resolved
                .get(&fact.oyuncu_id)
                .cloned()
                .map(|record| (record, fact.deger))
        })
        .take(5)
        .collect()
}

async fn load_gol_kralligi(db: &Database) -> Result<Vec<GolKraliEntry>, StatsError> {
    let facts = db.goal_leaders().await?;
    let ids: Vec<i32> = facts.iter().map(|f| f.oyuncu_id).collect();
    let resolved = db.resolve_players(&ids).await?;
    Ok(merge_leaderboard(facts, &resolved)
        .into_iter()
        .map(|(oyuncu, gol)| GolKraliEntry { oyuncu, gol })
        .collect())
}

async fn load_mac_adami(db: &Database) -> Result<Vec<MacAdamiEntry>, StatsError> {
    let facts = db.motm_leaders().await?;
    let ids: Vec<i32> = facts.iter().map(|f| f.oyuncu_id).collect();
    let resolved = db.resolve_players(&ids).await?;
    Ok(merge_leaderboard(facts, &resolved)
        .into_iter()
        .map(|(oyuncu, mac_adami)| MacAdamiEntry { oyuncu, mac_adami })
        .collect())
}

pub async fn gol_kralligi_service(data: Data<AppState>) -> impl Responder {
    match load_gol_kralligi(&data.db).await {
        Ok(entries) => HttpResponse::Ok().json(ApiResponse::ok(entries)),
        Err(err) => db_failure("gol krallığı sorgusu başarısız", &err),
    }
}

pub async fn mac_adami_service(data: Data<AppState>) -> impl Responder {
    match load_mac_adami(&data.db).await {
        Ok(entries) => HttpResponse::Ok().json(ApiResponse::ok(entries)),
        Err(err) => db_failure("maç adamı sorgusu başarısız", &err),
    }
}

/// Left join of roster totals with resolved descriptive attributes. A
/// roster row whose id no position table knows keeps its totals and
/// carries nulls for the descriptive side.
fn build_squad(rows: Vec<KadroRow>, resolved: &HashMap<i32, PlayerRecord>) -> Vec<SquadRow> {
    rows.into_iter()
        .map(|row| {
            let record = resolved.get(&row.oyuncu_id);
            SquadRow {
                oyuncu_id: row.oyuncu_id,
                oyuncu_isim: row.oyuncu_isim,
                gol: row.gol,
                asist: row.asist,
                sari_kart: row.sari_kart,
                kirmizi_kart: row.kirmizi_kart,
                takim: record.map(|r| r.takim.clone()),
                pozisyon: record.map(|r| r.pozisyon.clone()),
                yan_pozisyon: record.map(|r| r.yan_pozisyon.clone()),
                oyuncu_yas: record.map(|r| r.oyuncu_yas),
                oyuncu_sure: record.map(|r| r.oyuncu_sure),
            }
        })
        .collect()
}

async fn load_squad(db: &Database) -> Result<Vec<SquadRow>, StatsError> {
    let rows = db.kadro_rows().await?;
    let ids: Vec<i32> = rows.iter().map(|r| r.oyuncu_id).collect();
    let resolved = db.resolve_players(&ids).await?;
    Ok(build_squad(rows, &resolved))
}

pub async fn kadro_service(data: Data<AppState>) -> impl Responder {
    match load_squad(&data.db).await {
        Ok(rows) => HttpResponse::Ok().json(ApiResponse::ok(rows)),
        Err(err) => db_failure("kadro sorgusu başarısız", &err),
    }
}

pub async fn watchlist_status_service() -> impl Responder {
    // The watchlist lives entirely in the browser's local storage; the
    // server only confirms the feature is on.
    HttpResponse::Ok().json(ApiResponse::<Value>::ok_message(
        "izleme listesi aktif, veriler istemci tarafında saklanıyor",
    ))
}

pub async fn setup_service(data: Data<AppState>) -> impl Responder {
    match data.db.run_setup().await {
        Ok(report) => HttpResponse::Ok().json(ApiResponse::ok(report)),
        Err(err) => db_failure("kurulum başarısız", &err),
    }
}
