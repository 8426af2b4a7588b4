use serde::{Deserialize, Deserializer, Serialize};

/// User as exchanged over the wire: `{"id": .., "name": .., "email": ..}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
}

/// Request body for create and update.
///
/// Missing or `null` fields decode to empty strings, so an update with a
/// partial body replaces the omitted fields instead of keeping the stored
/// values. Any `id` in the body is ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UserPayload {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub email: String,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

impl UserPayload {
    /// Full-replace: every mutable field of `user` takes the payload value.
    pub fn apply_to(self, user: &mut User) {
        user.name = self.name;
        user.email = self.email;
    }
}

/// Row of the `users` table
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct UserRow {
    pub id: i64,
    pub name: String,
    pub email: String,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        User {
            id: row.id,
            name: row.name,
            email: row.email,
        }
    }
}

impl From<&User> for UserRow {
    fn from(user: &User) -> Self {
        UserRow {
            id: user.id,
            name: user.name.clone(),
            email: user.email.clone(),
        }
    }
}
