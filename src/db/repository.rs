//! Database repository for people and gifts.
//!
//! Uses prepared statements and transactions for data integrity. Listings are
//! always ordered by `(order_index, id)`.

use sqlx::{Row, SqliteConnection, SqlitePool};

use crate::errors::AppError;
use crate::models::{Gift, GiftFields, Person};
use crate::ordering::{self, Collection, ReorderPlan, Scope};
use crate::service::DUPLICATE_NAME;

/// Takes the write lock up front so read-then-write units wait on
/// `busy_timeout` instead of failing when another writer commits first.
const BEGIN_IMMEDIATE: &str = "BEGIN IMMEDIATE";

/// Database repository for all data operations.
#[derive(Clone)]
pub struct Repository {
    pool: SqlitePool,
}

impl Repository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    // ==================== PERSON OPERATIONS ====================

    /// List all people in display order.
    pub async fn list_people(&self) -> Result<Vec<Person>, AppError> {
        let rows = sqlx::query(
            "SELECT id, name, order_index FROM people ORDER BY order_index ASC, id ASC",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(person_from_row).collect())
    }

    /// Create a person at the end of the list.
    ///
    /// The duplicate check, index assignment and insert share one transaction.
    pub async fn create_person(&self, name: &str) -> Result<Person, AppError> {
        let mut tx = self.pool.begin_with(BEGIN_IMMEDIATE).await?;

        if name_taken(&mut tx, name, None).await? {
            return Err(AppError::Conflict(DUPLICATE_NAME.to_string()));
        }

        let order_index = ordering::next_order_index(&mut tx, Scope::People).await?;

        let result = sqlx::query("INSERT INTO people (name, order_index) VALUES (?, ?)")
            .bind(name)
            .bind(order_index)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(Person {
            id: result.last_insert_rowid(),
            name: name.to_string(),
            order_index,
        })
    }

    /// Rename a person. Only the name changes; an unknown id updates nothing.
    pub async fn rename_person(&self, id: i64, name: &str) -> Result<u64, AppError> {
        let mut tx = self.pool.begin_with(BEGIN_IMMEDIATE).await?;

        if name_taken(&mut tx, name, Some(id)).await? {
            return Err(AppError::Conflict(DUPLICATE_NAME.to_string()));
        }

        let result = sqlx::query("UPDATE people SET name = ? WHERE id = ?")
            .bind(name)
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(result.rows_affected())
    }

    /// Delete a person. Their gifts go with them through the foreign key cascade.
    pub async fn delete_person(&self, id: i64) -> Result<u64, AppError> {
        let result = sqlx::query("DELETE FROM people WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }

    // ==================== GIFT OPERATIONS ====================

    /// List the gifts of one person in display order.
    pub async fn list_gifts(&self, person_id: i64) -> Result<Vec<Gift>, AppError> {
        let rows = sqlx::query(
            r#"SELECT id, person_id, description, link, purchased, order_index
               FROM gifts WHERE person_id = ?
               ORDER BY order_index ASC, id ASC"#,
        )
        .bind(person_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(gift_from_row).collect())
    }

    /// Create a gift at the end of its owner's list.
    pub async fn create_gift(&self, person_id: i64, fields: &GiftFields) -> Result<Gift, AppError> {
        let mut tx = self.pool.begin_with(BEGIN_IMMEDIATE).await?;

        let order_index = ordering::next_order_index(&mut tx, Scope::GiftsOf(person_id)).await?;

        let result = sqlx::query(
            "INSERT INTO gifts (person_id, description, link, purchased, order_index) VALUES (?, ?, ?, ?, ?)",
        )
        .bind(person_id)
        .bind(&fields.description)
        .bind(&fields.link)
        .bind(encode_flag(fields.purchased))
        .bind(order_index)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(Gift {
            id: result.last_insert_rowid(),
            person_id,
            description: fields.description.clone(),
            link: fields.link.clone(),
            purchased: fields.purchased,
            order_index,
        })
    }

    /// Replace a gift's description, link and purchased flag.
    ///
    /// Owner and position are left alone; an unknown id updates nothing.
    pub async fn update_gift(&self, id: i64, fields: &GiftFields) -> Result<u64, AppError> {
        let result =
            sqlx::query("UPDATE gifts SET description = ?, link = ?, purchased = ? WHERE id = ?")
                .bind(&fields.description)
                .bind(&fields.link)
                .bind(encode_flag(fields.purchased))
                .bind(id)
                .execute(&self.pool)
                .await?;

        Ok(result.rows_affected())
    }

    /// Delete a single gift.
    pub async fn delete_gift(&self, id: i64) -> Result<u64, AppError> {
        let result = sqlx::query("DELETE FROM gifts WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }

    // ==================== ORDERING ====================

    /// Apply a reorder plan to a collection atomically.
    pub async fn reorder(
        &self,
        collection: Collection,
        plan: &ReorderPlan,
    ) -> Result<u64, AppError> {
        let mut tx = self.pool.begin().await?;
        let touched = ordering::apply_reorder(&mut tx, collection, plan).await?;
        tx.commit().await?;
        Ok(touched)
    }
}

/// Case-insensitive name lookup, optionally ignoring one person.
async fn name_taken(
    conn: &mut SqliteConnection,
    name: &str,
    exclude_id: Option<i64>,
) -> Result<bool, sqlx::Error> {
    let row = match exclude_id {
        Some(id) => {
            sqlx::query("SELECT id FROM people WHERE LOWER(name) = LOWER(?) AND id != ? LIMIT 1")
                .bind(name)
                .bind(id)
                .fetch_optional(&mut *conn)
                .await?
        }
        None => {
            sqlx::query("SELECT id FROM people WHERE LOWER(name) = LOWER(?) LIMIT 1")
                .bind(name)
                .fetch_optional(&mut *conn)
                .await?
        }
    };
    Ok(row.is_some())
}

// Helper functions for row conversion. `purchased` is stored as 0/1.

fn encode_flag(flag: bool) -> i32 {
    flag as i32
}

fn decode_flag(stored: i64) -> bool {
    stored != 0
}

fn person_from_row(row: &sqlx::sqlite::SqliteRow) -> Person {
    let order_index: Option<i64> = row.get("order_index");
    Person {
        id: row.get("id"),
        name: row.get("name"),
        order_index: order_index.unwrap_or(0),
    }
}

fn gift_from_row(row: &sqlx::sqlite::SqliteRow) -> Gift {
    let purchased: i64 = row.get("purchased");
    let order_index: Option<i64> = row.get("order_index");
    Gift {
        id: row.get("id"),
        person_id: row.get("person_id"),
        description: row.get("description"),
        link: row.get("link"),
        purchased: decode_flag(purchased),
        order_index: order_index.unwrap_or(0),
    }
}
