/// Database row types, mapped straight from SQLite rows.
/// Distinct from hearth-types API payloads to keep the DB layer independent.

#[derive(Debug, Clone, PartialEq)]
pub struct UserRow {
    pub id: i64,
    pub name: String,
    pub initials: String,
    pub status: String,
    pub avatar: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MessageRow {
    pub id: i64,
    pub chat_id: i64,
    pub sender_id: i64,
    pub text: String,
    /// UTC, `YYYY-MM-DD HH:MM:SS`.
    pub created_at: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChatRow {
    pub id: i64,
    pub contact: UserRow,
    pub last_message: Option<String>,
    pub last_created_at: Option<String>,
    pub unread: i64,
}
