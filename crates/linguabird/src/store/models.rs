//! Row types for the `profiles` table.

use chrono::NaiveDateTime;
use derive_getters::Getters;
use derive_new::new;
use diesel::prelude::*;

use crate::store::schema;

/// A stored key-value row.
#[derive(Debug, Clone, Queryable, Selectable, Getters)]
#[diesel(table_name = schema::profiles)]
pub struct ProfileRow {
    key: String,
    value: String,
    updated_at: NaiveDateTime,
}

/// Insertable row; `updated_at` is filled by the column default.
#[derive(Debug, Clone, Insertable, new)]
#[diesel(table_name = schema::profiles)]
pub struct NewProfileRow {
    key: String,
    value: String,
}
