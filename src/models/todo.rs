use std::borrow::Cow;

use chrono::{DateTime, Utc};
use diesel::{AsChangeset, Insertable, Queryable};
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

/// A persisted task record.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Queryable, Insertable)]
#[diesel(table_name = crate::repository::schema::todos)]
#[serde(rename_all = "camelCase")]
pub struct Todo {
    pub id: String,
    pub title: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
    pub finished_at: Option<DateTime<Utc>>,
}

/// Request body accepted by create and update.
#[derive(Serialize, Deserialize, Debug, Clone, Validate)]
pub struct TodoPayload {
    #[validate(
        length(
            min = 1,
            max = 128,
            message = "title must be between 1 and 128 characters"
        ),
        custom(function = "no_nul_bytes")
    )]
    pub title: String,
    #[validate(
        length(min = 1, message = "description cannot be empty"),
        custom(function = "no_nul_bytes")
    )]
    pub description: String,
}

/// PostgreSQL text columns cannot hold NUL.
fn no_nul_bytes(value: &str) -> Result<(), ValidationError> {
    if value.contains('\0') {
        return Err(
            ValidationError::new("nul_byte").with_message(Cow::from("must not contain NUL bytes")),
        );
    }
    Ok(())
}

/// Columns written by an update. `None` leaves the stored value untouched.
#[derive(Debug, Clone, Default, AsChangeset)]
#[diesel(table_name = crate::repository::schema::todos)]
pub struct TodoChanges {
    pub title: Option<String>,
    pub description: Option<String>,
    pub updated_at: Option<DateTime<Utc>>,
    pub finished_at: Option<DateTime<Utc>>,
}
