use crate::models::player::{PlayerQuery, TopQuery};
use crate::service::stats::{
    find_player_service, gol_kralligi_service, kadro_service, list_category_service,
    mac_adami_service, setup_service, top_of_category_service, watchlist_status_service,
};
use crate::AppState;
use actix_web::web::{Data, Path, Query};
use actix_web::{get, post, web, Responder};

#[get("/kadro")]
async fn kadro_handler(data: Data<AppState>) -> impl Responder {
    kadro_service(data).await
}

#[get("/gol-kralligi")]
async fn gol_kralligi_handler(data: Data<AppState>) -> impl Responder {
    gol_kralligi_service(data).await
}

#[get("/mac-adami")]
async fn mac_adami_handler(data: Data<AppState>) -> impl Responder {
    mac_adami_service(data).await
}

#[get("/izleme-listesi/durum")]
async fn watchlist_status_handler() -> impl Responder {
    watchlist_status_service().await
}

#[post("/kurulum")]
async fn setup_handler(data: Data<AppState>) -> impl Responder {
    setup_service(data).await
}

#[get("/{kategori}/liste")]
async fn list_category_handler(data: Data<AppState>, path: Path<String>) -> impl Responder {
    list_category_service(data, &path.into_inner()).await
}

#[get("/{kategori}/oyuncu")]
async fn find_player_handler(
    data: Data<AppState>,
    path: Path<String>,
    query: Query<PlayerQuery>,
) -> impl Responder {
    find_player_service(data, &path.into_inner(), query.into_inner()).await
}

#[get("/{kategori}/en-iyiler")]
async fn top_of_category_handler(
    data: Data<AppState>,
    path: Path<String>,
    query: Query<TopQuery>,
) -> impl Responder {
    top_of_category_service(data, &path.into_inner(), query.into_inner()).await
}

pub fn config(conf: &mut web::ServiceConfig) {
    // Fixed routes first so the {kategori} patterns cannot shadow them.
    let scope = web::scope("/api/v1")
        .service(kadro_handler)
        .service(gol_kralligi_handler)
        .service(mac_adami_handler)
        .service(watchlist_status_handler)
        .service(setup_handler)
        .service(list_category_handler)
        .service(find_player_handler)
        .service(top_of_category_handler);

    conf.service(scope);
}
