//! # Equipment Repository
//!
//! Database operations for the equipment catalog.
//!
//! ## Key Operations
//! - Distinct type listing (filter dropdown)
//! - Filtered listing joined with loan status
//! - Provisioning (catalog row + its loan status row)
//! - Replenishment (quantity updates)
//!
//! ## Filter Translation
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                 EquipmentFilter → parameterized SQL                     │
//! │                                                                         │
//! │  SELECT ... FROM equipment e                                           │
//! │  INNER JOIN loan_status l ON l.equipment_id = e.id                     │
//! │       │                                                                 │
//! │       ├── availability restricted? ── WHERE l.availability = ?         │
//! │       │                                                                 │
//! │       ├── type restricted?         ── AND   e.equipment_type = ?       │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ORDER BY e.id                                                         │
//! │                                                                         │
//! │  Values are always bound, never spliced into the SQL text.             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::Utc;
use sqlx::{QueryBuilder, Sqlite, SqlitePool};
use tracing::{debug, info};

use crate::error::{DbError, DbResult};
use equip_core::validation::{validate_new_equipment, validate_quantity};
use equip_core::{
    Equipment, EquipmentFilter, EquipmentId, EquipmentRecord, InventorySummary, NewEquipment,
    TypeSummary,
};

/// Columns of an [`EquipmentRecord`], joined.
const SELECT_RECORDS: &str = r#"
    SELECT
        e.id,
        e.equipment_type,
        e.name,
        e.brand,
        e.quantity,
        e.created_at,
        l.availability,
        l.loan_from
    FROM equipment e
    INNER JOIN loan_status l ON l.equipment_id = e.id
"#;

/// Repository for catalog database operations.
#[derive(Debug, Clone)]
pub struct EquipmentRepository {
    pool: SqlitePool,
}

impl EquipmentRepository {
    /// Creates a new EquipmentRepository.
    pub fn new(pool: SqlitePool) -> Self {
        EquipmentRepository { pool }
    }

    /// Distinct equipment types, alphabetically.
    pub async fn list_types(&self) -> DbResult<Vec<String>> {
        let types: Vec<String> = sqlx::query_scalar(
            r#"
            SELECT DISTINCT equipment_type
            FROM equipment
            ORDER BY equipment_type
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        debug!(count = types.len(), "Listed equipment types");
        Ok(types)
    }

    /// Lists catalog rows joined with their loan status.
    ///
    /// ## Arguments
    /// * `filter` - Availability and type facets, ANDed
    ///
    /// ## Returns
    /// Matching rows ordered by id. A type that matches nothing yields an
    /// empty Vec.
    pub async fn list(&self, filter: &EquipmentFilter) -> DbResult<Vec<EquipmentRecord>> {
        debug!(%filter, "Listing equipment");

        let mut query: QueryBuilder<Sqlite> = QueryBuilder::new(SELECT_RECORDS);
        let mut joiner = " WHERE ";

        if let Some(availability) = filter.availability.restriction() {
            query
                .push(joiner)
                .push("l.availability = ")
                .push_bind(availability);
            joiner = " AND ";
        }

        if let Some(equipment_type) = filter.equipment_type.restriction() {
            query
                .push(joiner)
                .push("e.equipment_type = ")
                .push_bind(equipment_type.to_string());
        }

        query.push(" ORDER BY e.id");

        let records = query
            .build_query_as::<EquipmentRecord>()
            .fetch_all(&self.pool)
            .await?;

        debug!(count = records.len(), "Listing returned rows");
        Ok(records)
    }

    /// Gets one joined row by id.
    ///
    /// ## Returns
    /// * `Ok(Some(EquipmentRecord))` - Found
    /// * `Ok(None)` - No such id
    pub async fn get(&self, id: EquipmentId) -> DbResult<Option<EquipmentRecord>> {
        let sql = format!("{} WHERE e.id = ?1", SELECT_RECORDS);

        let record = sqlx::query_as::<_, EquipmentRecord>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(record)
    }

    /// Provisions a catalog entry together with its loan status row.
    ///
    /// ## What This Does
    /// 1. Validates the input
    /// 2. Inserts the equipment row (id assigned by SQLite)
    /// 3. Inserts its `available` loan status row
    ///
    /// Steps 2 and 3 share one transaction, so the 1:1 join is total.
    pub async fn insert(&self, new: &NewEquipment) -> DbResult<Equipment> {
        validate_new_equipment(new).map_err(|e| DbError::Rejected(e.into()))?;

        debug!(equipment_type = %new.equipment_type, name = %new.name, "Inserting equipment");

        let now = Utc::now();
        let mut tx = self.pool.begin().await?;

        let result = sqlx::query(
            r#"
            INSERT INTO equipment (equipment_type, name, brand, quantity, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
        )
        .bind(new.equipment_type.trim())
        .bind(new.name.trim())
        .bind(new.brand.trim())
        .bind(new.quantity)
        .bind(now)
        .execute(&mut *tx)
        .await?;

        let id = result.last_insert_rowid();

        sqlx::query(
            r#"
            INSERT INTO loan_status (equipment_id, availability, loan_from)
            VALUES (?1, 'available', NULL)
            "#,
        )
        .bind(id)
        .execute(&mut *tx)
        .await?;

        tx.commit()
            .await
            .map_err(|e| DbError::TransactionFailed(e.to_string()))?;

        info!(id, name = %new.name, "Equipment provisioned");

        Ok(Equipment {
            id,
            equipment_type: new.equipment_type.trim().to_string(),
            name: new.name.trim().to_string(),
            brand: new.brand.trim().to_string(),
            quantity: new.quantity,
            created_at: now,
        })
    }

    /// Replenishment: sets the owned quantity of an entry.
    ///
    /// ## Returns
    /// * `Ok(())` - Updated
    /// * `Err(DbError::NotFound)` - No such id
    pub async fn update_quantity(&self, id: EquipmentId, quantity: i64) -> DbResult<()> {
        validate_quantity(quantity).map_err(|e| DbError::Rejected(e.into()))?;

        debug!(id, quantity, "Updating quantity");

        let result = sqlx::query("UPDATE equipment SET quantity = ?2 WHERE id = ?1")
            .bind(id)
            .bind(quantity)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Equipment", id));
        }

        Ok(())
    }

    /// Per-type and total counts for the overview page.
    pub async fn summary(&self) -> DbResult<InventorySummary> {
        let by_type = sqlx::query_as::<_, TypeSummary>(
            r#"
            SELECT
                e.equipment_type AS equipment_type,
                COUNT(*) AS items,
                COALESCE(SUM(e.quantity), 0) AS quantity,
                SUM(CASE WHEN l.availability = 'available' THEN 1 ELSE 0 END) AS available,
                SUM(CASE WHEN l.availability = 'on_loan' THEN 1 ELSE 0 END) AS on_loan
            FROM equipment e
            INNER JOIN loan_status l ON l.equipment_id = e.id
            GROUP BY e.equipment_type
            ORDER BY e.equipment_type
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(InventorySummary::from_types(by_type))
    }

    /// Counts catalog entries (for diagnostics).
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM equipment")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Database, DbConfig};
    use equip_core::{Availability, AvailabilityFilter, CoreError, TypeFilter};

    async fn repo() -> EquipmentRepository {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        db.equipment()
    }

    #[tokio::test]
    async fn test_insert_creates_available_status() {
        let repo = repo().await;
        let camera = repo
            .insert(&NewEquipment::new("Camera", " Canon R5 ", "Canon", 2))
            .await
            .unwrap();

        assert_eq!(camera.id, 1);
        assert_eq!(camera.name, "Canon R5");

        let record = repo.get(camera.id).await.unwrap().unwrap();
        assert_eq!(record.availability, Availability::Available);
        assert_eq!(record.loan_from, None);
        assert_eq!(record.quantity, 2);
    }

    #[tokio::test]
    async fn test_insert_rejects_invalid_input() {
        let repo = repo().await;
        let err = repo
            .insert(&NewEquipment::new("ALL", "Anything", "", 1))
            .await
            .unwrap_err();

        assert!(matches!(err, DbError::Rejected(CoreError::Validation(_))));
        assert_eq!(repo.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_list_types_distinct_and_sorted() {
        let repo = repo().await;
        for (t, n) in [("Tripod", "T1"), ("Camera", "C1"), ("Camera", "C2")] {
            repo.insert(&NewEquipment::new(t, n, "", 1)).await.unwrap();
        }

        assert_eq!(repo.list_types().await.unwrap(), vec!["Camera", "Tripod"]);
    }

    #[tokio::test]
    async fn test_list_filters_by_type() {
        let repo = repo().await;
        repo.insert(&NewEquipment::new("Camera", "C1", "", 1)).await.unwrap();
        repo.insert(&NewEquipment::new("Lens", "L1", "", 1)).await.unwrap();

        let filter = EquipmentFilter::new(
            AvailabilityFilter::All,
            TypeFilter::Exact("Lens".to_string()),
        );
        let rows = repo.list(&filter).await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].name, "L1");

        let filter = EquipmentFilter::all().with_type(TypeFilter::Exact("Drone".to_string()));
        assert!(repo.list(&filter).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_filter_value_is_bound_not_spliced() {
        let repo = repo().await;
        repo.insert(&NewEquipment::new("Camera", "C1", "", 1)).await.unwrap();

        let hostile = TypeFilter::Exact("Camera' OR '1'='1".to_string());
        let rows = repo.list(&EquipmentFilter::all().with_type(hostile)).await.unwrap();
        assert!(rows.is_empty());
    }

    #[tokio::test]
    async fn test_externally_written_type_is_selectable_verbatim() {
        let repo = repo().await;
        sqlx::query(
            "INSERT INTO equipment (id, equipment_type, name) VALUES (7, 'Camera ', 'Legacy')",
        )
        .execute(&repo.pool)
        .await
        .unwrap();
        sqlx::query("INSERT INTO loan_status (equipment_id) VALUES (7)")
            .execute(&repo.pool)
            .await
            .unwrap();

        let padded = EquipmentFilter::parse("all", "Camera ").unwrap();
        let rows = repo.list(&padded).await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].id, 7);

        let exact = EquipmentFilter::parse("all", "Camera").unwrap();
        assert!(repo.list(&exact).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_update_quantity() {
        let repo = repo().await;
        let item = repo.insert(&NewEquipment::new("Tripod", "T1", "", 1)).await.unwrap();

        repo.update_quantity(item.id, 4).await.unwrap();
        assert_eq!(repo.get(item.id).await.unwrap().unwrap().quantity, 4);

        assert!(matches!(
            repo.update_quantity(42, 4).await,
            Err(DbError::NotFound { .. })
        ));
        assert!(matches!(
            repo.update_quantity(item.id, -1).await,
            Err(DbError::Rejected(_))
        ));
    }

    #[tokio::test]
    async fn test_summary_empty_catalog() {
        let repo = repo().await;
        let summary = repo.summary().await.unwrap();
        assert_eq!(summary, InventorySummary::default());
    }
}
