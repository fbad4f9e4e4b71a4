use crate::config::config::Config;
use crate::models::player::{FactRow, KadroRow};
use crate::repository::tables::SortKey;
use deadpool::managed::Object;
use diesel::sql_types::{Integer, Json};
use diesel::{ExpressionMethods, OptionalExtension, QueryDsl, QueryableByName};
use diesel_async::{
    pooled_connection::{deadpool::Pool, AsyncDieselConnectionManager},
    AsyncPgConnection, RunQueryDsl,
};
use serde_json::Value;
use thiserror::Error;

pub type DBPool = deadpool::managed::Pool<AsyncDieselConnectionManager<AsyncPgConnection>>;
pub type DBConn = Object<AsyncDieselConnectionManager<AsyncPgConnection>>;

const DB_POOL_MAX_SIZE: usize = 16;

pub struct Database {
    pool: DBPool,
}

#[derive(Error, Debug)]
pub enum StatsError {
    #[error("could not get database connection from pool: {0}")]
    PoolError(#[from] diesel_async::pooled_connection::deadpool::PoolError),
    #[error("database query failed: {0}")]
    QueryError(#[from] diesel::result::Error),
}

/// One row of `row_to_json(t)` output, used by the passthrough
/// endpoints that read a whole table without a compile-time row type.
#[derive(QueryableByName)]
struct JsonRow {
    #[diesel(sql_type = Json)]
    satir: Value,
}

/// Query text for the ranking endpoints. A player whose minutes equal
/// the bound stays in (`>=`), and the row count is capped at five.
fn top_select(table: &str, sort: &SortKey) -> String {
    let direction = if sort.descending { "DESC" } else { "ASC" };
    format!(
        "SELECT row_to_json({t}) AS satir FROM {t} \
         WHERE oyuncu_sure >= $1 ORDER BY {col} {dir} LIMIT 5",
        t = table,
        col = sort.column,
        dir = direction
    )
}

impl Database {
    pub fn new(config: &Config) -> Self {
        let manager =
            AsyncDieselConnectionManager::<AsyncPgConnection>::new(config.database_url.clone());
        let pool = Pool::builder(manager)
            .max_size(DB_POOL_MAX_SIZE)
            .build()
            .expect("Failed to create pool.");
        Database { pool }
    }

    pub(crate) async fn get_db_conn(&self) -> Result<DBConn, StatsError> {
        self.pool.get().await.map_err(StatsError::PoolError)
    }

    /// All rows of one allow-listed table, oldest player id first.
    pub async fn list_rows(&self, table: &'static str) -> Result<Vec<Value>, StatsError> {
        let mut conn = self.get_db_conn().await?;
        let sql = format!(
            "SELECT row_to_json({t}) AS satir FROM {t} ORDER BY oyuncu_id",
            t = table
        );
        let rows = diesel::sql_query(sql)
            .load::<JsonRow>(&mut conn)
            .await
            .map_err(StatsError::QueryError)?;
        Ok(rows.into_iter().map(|r| r.satir).collect())
    }

    pub async fn find_player(
        &self,
        table: &'static str,
        oyuncu_id: i32,
    ) -> Result<Option<Value>, StatsError> {
        let mut conn = self.get_db_conn().await?;
        let sql = format!(
            "SELECT row_to_json({t}) AS satir FROM {t} WHERE oyuncu_id = $1",
            t = table
        );
        let row = diesel::sql_query(sql)
            .bind::<Integer, _>(oyuncu_id)
            .get_result::<JsonRow>(&mut conn)
            .await
            .optional()
            .map_err(StatsError::QueryError)?;
        Ok(row.map(|r| r.satir))
    }

    /// Top five rows of one position table. `min_sure` is an inclusive
    /// lower bound on minutes played; the sort key comes from the
    /// allow-list in `tables.rs`.
    pub async fn top_of_table(
        &self,
        table: &'static str,
        sort: &SortKey,
        min_sure: i32,
    ) -> Result<Vec<Value>, StatsError> {
        let mut conn = self.get_db_conn().await?;
        let rows = diesel::sql_query(top_select(table, sort))
            .bind::<Integer, _>(min_sure)
            .load::<JsonRow>(&mut conn)
            .await
            .map_err(StatsError::QueryError)?;
        Ok(rows.into_iter().map(|r| r.satir).collect())
    }

    /// Top five goal scorers from the fact table, zero scorers excluded.
    pub async fn goal_leaders(&self) -> Result<Vec<FactRow>, StatsError> {
        use crate::models::schema::goal_assist::dsl::*;

        let mut conn = self.get_db_conn().await?;
        goal_assist
            .filter(gol.gt(0))
            .order(gol.desc())
            .limit(5)
            .select((oyuncu_id, gol))
            .load::<FactRow>(&mut conn)
            .await
            .map_err(StatsError::QueryError)
    }

    /// Top five by man-of-the-match count, zero counts excluded.
    pub async fn motm_leaders(&self) -> Result<Vec<FactRow>, StatsError> {
        use crate::models::schema::goal_assist::dsl::*;

        let mut conn = self.get_db_conn().await?;
        goal_assist
            .filter(mac_adami.gt(0))
            .order(mac_adami.desc())
            .limit(5)
            .select((oyuncu_id, mac_adami))
            .load::<FactRow>(&mut conn)
            .await
            .map_err(StatsError::QueryError)
    }

    pub async fn kadro_rows(&self) -> Result<Vec<KadroRow>, StatsError> {
        use crate::models::schema::kadro::dsl::*;

        let mut conn = self.get_db_conn().await?;
        kadro
            .order(oyuncu_id.asc())
            .load::<KadroRow>(&mut conn)
            .await
            .map_err(StatsError::QueryError)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::tables::sort_key;

    #[test]
    fn top_select_filter_is_inclusive_and_capped() {
        let sql = top_select("santrafor", sort_key(None));
        assert!(sql.contains("WHERE oyuncu_sure >= $1"));
        assert!(sql.ends_with("LIMIT 5"));
        assert!(sql.contains("FROM santrafor"));
    }

    #[test]
    fn top_select_orders_by_allow_listed_key() {
        let sql = top_select("bek", sort_key(None));
        assert!(sql.contains("ORDER BY genel_sira ASC"));

        let sql = top_select("bek", sort_key(Some("performans_skoru")));
        assert!(sql.contains("ORDER BY performans_skoru DESC"));

        // An out-of-list name produces exactly the default query text.
        assert_eq!(
            top_select("bek", sort_key(Some("oyuncu_isim"))),
            top_select("bek", sort_key(None))
        );
    }
}
