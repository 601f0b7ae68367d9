use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq)]
pub struct User {
    #[sqlx(rename = "rowIdNum")]
    #[serde(rename = "rowIdNum")]
    pub row_id: i64,
    /// Subject id issued by the identity provider.
    pub id: String,
    pub name: String,
}

#[derive(Debug, Serialize)]
pub struct UserProfile {
    pub id: String,
    pub name: String,
}

