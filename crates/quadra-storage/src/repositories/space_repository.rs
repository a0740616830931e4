//! SQLite implementation of SpaceRepository.
//!
//! Spaces are stored as JSON documents. `name`, `price` and `rating` are
//! projected into columns and `sports` is exploded into `space_sports` so
//! every filter translates to a single SQL constraint.

use std::sync::Arc;

use async_trait::async_trait;
use quadra_core::{
    DecodeError, RepoResult, RepositoryError, SortField, SortOrder, Space, SpaceFilters,
    SpaceRepository, FILTER_PAGE_SIZE, SORTED_PAGE_SIZE,
};
use rusqlite::types::Value as SqlValue;
use rusqlite::{params, params_from_iter, Connection, OptionalExtension};
use tokio::sync::Mutex;
use tracing::{debug, info};

use super::store_error::{is_constraint_violation, space_store_error};
use crate::Database;

/// Translate filters into a `SELECT document` statement and its parameters.
///
/// Absent filters add no constraint. Results are ordered by rating
/// descending (ties in insertion order) and capped at [`FILTER_PAGE_SIZE`].
pub fn filter_query(filters: &SpaceFilters) -> (String, Vec<SqlValue>) {
    let mut clauses: Vec<&str> = Vec::new();
    let mut values = Vec::new();

    if let Some(sport) = &filters.sport {
        clauses.push(
            "EXISTS (SELECT 1 FROM space_sports ss WHERE ss.space_id = spaces.id AND ss.sport = ?)",
        );
        values.push(SqlValue::Text(sport.clone()));
    }
    if let Some(min_price) = filters.min_price {
        clauses.push("price >= ?");
        values.push(SqlValue::Real(min_price));
    }
    if let Some(max_price) = filters.max_price {
        clauses.push("price <= ?");
        values.push(SqlValue::Real(max_price));
    }
    if let Some(rating) = filters.rating {
        clauses.push("rating >= ?");
        values.push(SqlValue::Real(rating));
    }

    let where_clause = if clauses.is_empty() {
        String::new()
    } else {
        format!(" WHERE {}", clauses.join(" AND "))
    };

    let sql = format!(
        "SELECT document FROM spaces{} ORDER BY rating DESC, created_seq ASC LIMIT {}",
        where_clause, FILTER_PAGE_SIZE
    );

    (sql, values)
}

fn sort_column(field: SortField) -> &'static str {
    match field {
        SortField::Name => "name",
        SortField::Price => "price",
        SortField::Rating => "rating",
    }
}

fn sort_direction(order: SortOrder) -> &'static str {
    match order {
        SortOrder::Asc => "ASC",
        SortOrder::Desc => "DESC",
    }
}

fn decode_document(document: &str) -> RepoResult<Space> {
    let raw = serde_json::from_str(document).map_err(|e| DecodeError::Malformed(e.to_string()))?;
    Ok(Space::from_data(raw)?)
}

fn query_documents<P: rusqlite::Params>(
    conn: &Connection,
    sql: &str,
    params: P,
    operation: &'static str,
) -> RepoResult<Vec<Space>> {
    let mut stmt = conn.prepare(sql).map_err(space_store_error(operation))?;

    let documents = stmt
        .query_map(params, |row| row.get::<_, String>(0))
        .map_err(space_store_error(operation))?
        .collect::<Result<Vec<_>, _>>()
        .map_err(space_store_error(operation))?;

    documents.iter().map(|doc| decode_document(doc)).collect()
}

fn insert_sports(conn: &Connection, space: &Space, operation: &'static str) -> RepoResult<()> {
    let mut stmt = conn
        .prepare("INSERT INTO space_sports (space_id, position, sport) VALUES (?1, ?2, ?3)")
        .map_err(space_store_error(operation))?;

    for (position, sport) in space.sports().iter().enumerate() {
        stmt.execute(params![space.id(), position as i64, sport])
            .map_err(space_store_error(operation))?;
    }

    Ok(())
}

/// Reject spaces that would not decode when read back.
///
/// Checks the typed record rather than the JSON form: non-finite numbers
/// serialize as `null`, which would decode to a default and drift from the
/// projection columns.
fn ensure_storable(space: &Space) -> RepoResult<String> {
    Space::from_record(space.to_record())?;
    Ok(space.to_data().to_string())
}

/// SQLite-backed implementation of SpaceRepository.
pub struct SqliteSpaceRepository {
    db: Arc<Mutex<Database>>,
}

impl SqliteSpaceRepository {
    /// Create a new SQLite space repository.
    pub fn new(db: Arc<Mutex<Database>>) -> Self {
        Self { db }
    }

    fn now() -> String {
        chrono::Utc::now().to_rfc3339()
    }
}

#[async_trait]
impl SpaceRepository for SqliteSpaceRepository {
    async fn find_all(&self) -> RepoResult<Vec<Space>> {
        let db = self.db.lock().await;

        let spaces = query_documents(
            db.connection(),
            "SELECT document FROM spaces ORDER BY created_seq ASC",
            [],
            "find_all",
        )?;

        debug!(count = spaces.len(), "[SpaceRepository::find_all] Loaded spaces");
        Ok(spaces)
    }

    async fn find_by_filters(&self, filters: &SpaceFilters) -> RepoResult<Vec<Space>> {
        let (sql, values) = filter_query(filters);
        let db = self.db.lock().await;

        let spaces = query_documents(
            db.connection(),
            &sql,
            params_from_iter(values.iter()),
            "find_by_filters",
        )?;

        debug!(
            filters = ?filters,
            count = spaces.len(),
            "[SpaceRepository::find_by_filters] Query complete"
        );
        Ok(spaces)
    }

    async fn find_by_id(&self, id: &str) -> RepoResult<Option<Space>> {
        let db = self.db.lock().await;

        let document: Option<String> = db
            .connection()
            .query_row(
                "SELECT document FROM spaces WHERE id = ?",
                params![id],
                |row| row.get(0),
            )
            .optional()
            .map_err(space_store_error("find_by_id"))?;

        document.as_deref().map(decode_document).transpose()
    }

    async fn find_nearby(
        &self,
        latitude: f64,
        longitude: f64,
        radius_km: f64,
    ) -> RepoResult<Vec<Space>> {
        // Full scan: no spatial index exists, distance is computed per row.
        let all = self.find_all().await?;
        let scanned = all.len();

        let nearby: Vec<Space> = all
            .into_iter()
            .filter(|space| space.distance_km_to(latitude, longitude) <= radius_km)
            .collect();

        debug!(
            latitude,
            longitude,
            radius_km,
            scanned,
            matched = nearby.len(),
            "[SpaceRepository::find_nearby] Scan complete"
        );
        Ok(nearby)
    }

    async fn find_by_sport(&self, sport: &str) -> RepoResult<Vec<Space>> {
        let db = self.db.lock().await;

        let sql = format!(
            "SELECT document FROM spaces
             WHERE EXISTS (SELECT 1 FROM space_sports ss WHERE ss.space_id = spaces.id AND ss.sport = ?1)
             ORDER BY rating DESC, created_seq ASC
             LIMIT {}",
            FILTER_PAGE_SIZE
        );

        query_documents(db.connection(), &sql, params![sport], "find_by_sport")
    }

    async fn find_all_sorted(&self, field: SortField, order: SortOrder) -> RepoResult<Vec<Space>> {
        let db = self.db.lock().await;

        let sql = format!(
            "SELECT document FROM spaces ORDER BY {} {}, created_seq ASC LIMIT {}",
            sort_column(field),
            sort_direction(order),
            SORTED_PAGE_SIZE
        );

        query_documents(db.connection(), &sql, [], "find_all_sorted")
    }

    async fn create(&self, space: &Space) -> RepoResult<()> {
        let document = ensure_storable(space)?;
        let db = self.db.lock().await;
        let conn = db.connection();
        let now = Self::now();

        let tx = conn
            .unchecked_transaction()
            .map_err(space_store_error("create"))?;

        conn.execute(
            "INSERT INTO spaces (id, document, name, price, rating, created_seq, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, (SELECT COALESCE(MAX(created_seq), 0) + 1 FROM spaces), ?6, ?6)",
            params![
                space.id(),
                document,
                space.name(),
                space.price(),
                space.rating(),
                now,
            ],
        )
        .map_err(|e| {
            if is_constraint_violation(&e) {
                debug!(id = space.id(), "[SpaceRepository::create] Duplicate id rejected");
            }
            space_store_error("create")(e)
        })?;

        insert_sports(conn, space, "create")?;
        tx.commit().map_err(space_store_error("create"))?;

        info!(id = space.id(), name = space.name(), "[SpaceRepository] Created space");
        Ok(())
    }

    async fn update(&self, space: &Space) -> RepoResult<()> {
        let document = ensure_storable(space)?;
        let db = self.db.lock().await;
        let conn = db.connection();

        let tx = conn
            .unchecked_transaction()
            .map_err(space_store_error("update"))?;

        let changed = conn
            .execute(
                "UPDATE spaces SET document = ?2, name = ?3, price = ?4, rating = ?5, updated_at = ?6
                 WHERE id = ?1",
                params![
                    space.id(),
                    document,
                    space.name(),
                    space.price(),
                    space.rating(),
                    Self::now(),
                ],
            )
            .map_err(space_store_error("update"))?;

        if changed == 0 {
            return Err(RepositoryError::not_found(space.id()));
        }

        conn.execute(
            "DELETE FROM space_sports WHERE space_id = ?",
            params![space.id()],
        )
        .map_err(space_store_error("update"))?;
        insert_sports(conn, space, "update")?;

        tx.commit().map_err(space_store_error("update"))?;

        info!(id = space.id(), "[SpaceRepository] Updated space");
        Ok(())
    }

    async fn delete(&self, id: &str) -> RepoResult<()> {
        let db = self.db.lock().await;

        let removed = db
            .connection()
            .execute("DELETE FROM spaces WHERE id = ?", params![id])
            .map_err(space_store_error("delete"))?;

        if removed > 0 {
            info!(id, "[SpaceRepository] Deleted space");
        }
        Ok(())
    }
}
