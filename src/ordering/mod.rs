//! Ordering engine for people and gifts.
//!
//! Every row carries an integer `order_index`. Inserts append to the end of
//! their scope; a reorder overwrites indices with the positions of a
//! client-supplied id list. Reorders are deliberately lenient: ids are not
//! checked for existence or scope, and members left out of the list keep their
//! old (possibly colliding) index. Reads break ties by id.

use serde_json::Value;
use sqlx::{Row, SqliteConnection};

use crate::errors::AppError;
use crate::models::loose;

/// A table whose rows carry an `order_index`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collection {
    People,
    Gifts,
}

impl Collection {
    fn update_sql(self) -> &'static str {
        match self {
            Collection::People => "UPDATE people SET order_index = ? WHERE id = ?",
            Collection::Gifts => "UPDATE gifts SET order_index = ? WHERE id = ?",
        }
    }
}

/// The set of rows an inserted entity is appended to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    /// Every person.
    People,
    /// The gifts of one person.
    GiftsOf(i64),
}

/// Index for a row appended to `scope`: one past the current maximum, or 1 for
/// an empty scope.
pub async fn next_order_index(
    conn: &mut SqliteConnection,
    scope: Scope,
) -> Result<i64, sqlx::Error> {
    let row = match scope {
        Scope::People => {
            sqlx::query("SELECT MAX(order_index) AS max_index FROM people")
                .fetch_one(&mut *conn)
                .await?
        }
        Scope::GiftsOf(person_id) => {
            sqlx::query("SELECT MAX(order_index) AS max_index FROM gifts WHERE person_id = ?")
                .bind(person_id)
                .fetch_one(&mut *conn)
                .await?
        }
    };
    let max_index: Option<i64> = row.get("max_index");
    Ok(max_index.unwrap_or(0) + 1)
}

/// One row's new position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Assignment {
    pub id: i64,
    pub order_index: i64,
}

/// The index rewrites implied by an `orderedIds` list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReorderPlan {
    assignments: Vec<Assignment>,
}

impl ReorderPlan {
    /// Build a plan from the raw `orderedIds` value.
    ///
    /// The value must be an array. Entry `i` moves to index `i`; entries that
    /// are not ids are skipped but still use up their position.
    pub fn from_ordered_ids(ordered_ids: &Value) -> Result<Self, AppError> {
        let Some(entries) = ordered_ids.as_array() else {
            return Err(AppError::BadRequest("Invalid data format".to_string()));
        };

        let assignments = entries
            .iter()
            .enumerate()
            .filter_map(|(position, entry)| {
                loose::value_to_id(entry).map(|id| Assignment {
                    id,
                    order_index: position as i64,
                })
            })
            .collect();

        Ok(Self { assignments })
    }

    pub fn assignments(&self) -> &[Assignment] {
        &self.assignments
    }

    pub fn is_empty(&self) -> bool {
        self.assignments.is_empty()
    }
}

/// Write every assignment of `plan` to `collection`.
///
/// Callers run this inside a transaction so the rewrite lands as a whole.
/// Returns the number of rows updated; unknown ids contribute nothing.
pub async fn apply_reorder(
    conn: &mut SqliteConnection,
    collection: Collection,
    plan: &ReorderPlan,
) -> Result<u64, sqlx::Error> {
    let mut touched = 0;
    for assignment in plan.assignments() {
        let result = sqlx::query(collection.update_sql())
            .bind(assignment.order_index)
            .bind(assignment.id)
            .execute(&mut *conn)
            .await?;
        touched += result.rows_affected();
    }
    Ok(touched)
}
