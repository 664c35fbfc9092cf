use anyhow::Result;
use hearth_types::models::UserId;
use rusqlite::{Connection, Row};

use crate::models::{ChatRow, MessageRow, UserRow};
use crate::store::ChatStore;
use crate::Database;

/// Window for counting a counterpart's messages as unread. There is no read
/// receipt in the schema, so recency stands in for it.
pub const UNREAD_WINDOW_MINUTES: i64 = 60;

impl Database {
    // -- Chats --

    pub fn get_chats(&self, principal: UserId) -> Result<Vec<ChatRow>> {
        self.with_conn(|conn| query_chats(conn, principal))
    }

    // -- Messages --

    pub fn get_messages(&self, chat_id: i64) -> Result<Vec<MessageRow>> {
        self.with_conn(|conn| query_messages(conn, chat_id))
    }

    pub fn insert_message(&self, chat_id: i64, sender: UserId, text: &str) -> Result<MessageRow> {
        self.with_conn(|conn| {
            let row = conn.query_row(
                "INSERT INTO messages (chat_id, sender_id, text, created_at)
                 VALUES (?1, ?2, ?3, datetime('now'))
                 RETURNING id, chat_id, sender_id, text, created_at",
                rusqlite::params![chat_id, sender.0, text],
                message_from_row,
            )?;
            Ok(row)
        })
    }

    // -- Users --

    pub fn get_contacts(&self, principal: UserId) -> Result<Vec<UserRow>> {
        self.with_conn(|conn| query_contacts(conn, principal))
    }
}

impl ChatStore for Database {
    fn list_chats(&mut self, principal: UserId) -> Result<Vec<ChatRow>> {
        self.get_chats(principal)
    }

    fn list_messages(&mut self, chat_id: i64) -> Result<Vec<MessageRow>> {
        self.get_messages(chat_id)
    }

    fn insert_message(&mut self, chat_id: i64, sender: UserId, text: &str) -> Result<MessageRow> {
        Database::insert_message(self, chat_id, sender, text)
    }

    fn list_contacts(&mut self, principal: UserId) -> Result<Vec<UserRow>> {
        self.get_contacts(principal)
    }

    fn commit(&mut self) -> Result<()> {
        if self.in_transaction() {
            self.conn.execute_batch("COMMIT")?;
        }
        Ok(())
    }

    fn rollback(&mut self) -> Result<()> {
        if self.in_transaction() {
            self.conn.execute_batch("ROLLBACK")?;
        }
        Ok(())
    }
}

fn query_chats(conn: &Connection, principal: UserId) -> Result<Vec<ChatRow>> {
    // The latest message is picked by a correlated subquery in the join so a
    // chat without messages still yields one row.
    let mut stmt = conn.prepare(
        "SELECT c.id, u.id, u.name, u.initials, u.status, u.avatar,
                m.text, m.created_at,
                (SELECT COUNT(*) FROM messages r
                  WHERE r.chat_id = c.id
                    AND r.sender_id != ?1
                    AND r.created_at > datetime('now', ?2)) AS unread
         FROM chats c
         JOIN users u
           ON (u.id = c.user2_id AND c.user1_id = ?1)
           OR (u.id = c.user1_id AND c.user2_id = ?1)
         LEFT JOIN messages m ON m.id = (
             SELECT l.id FROM messages l
              WHERE l.chat_id = c.id
              ORDER BY l.created_at DESC, l.id DESC
              LIMIT 1)
         WHERE u.id != ?1
         ORDER BY m.created_at DESC NULLS LAST, c.id ASC",
    )?;

    let window = format!("-{} minutes", UNREAD_WINDOW_MINUTES);
    let rows = stmt
        .query_map(rusqlite::params![principal.0, window], |row| {
            Ok(ChatRow {
                id: row.get(0)?,
                contact: UserRow {
                    id: row.get(1)?,
                    name: row.get(2)?,
                    initials: row.get(3)?,
                    status: row.get(4)?,
                    avatar: row.get(5)?,
                },
                last_message: row.get(6)?,
                last_created_at: row.get(7)?,
                unread: row.get(8)?,
            })
        })?
        .collect::<std::result::Result<Vec<_>, _>>()?;

    Ok(rows)
}

fn query_messages(conn: &Connection, chat_id: i64) -> Result<Vec<MessageRow>> {
    let mut stmt = conn.prepare(
        "SELECT id, chat_id, sender_id, text, created_at
         FROM messages
         WHERE chat_id = ?1
         ORDER BY created_at ASC, id ASC",
    )?;

    let rows = stmt
        .query_map([chat_id], message_from_row)?
        .collect::<std::result::Result<Vec<_>, _>>()?;

    Ok(rows)
}

fn query_contacts(conn: &Connection, principal: UserId) -> Result<Vec<UserRow>> {
    let mut stmt = conn.prepare(
        "SELECT id, name, initials, status, avatar
         FROM users
         WHERE id != ?1
         ORDER BY name",
    )?;

    let rows = stmt
        .query_map([principal.0], |row| {
            Ok(UserRow {
                id: row.get(0)?,
                name: row.get(1)?,
                initials: row.get(2)?,
                status: row.get(3)?,
                avatar: row.get(4)?,
            })
        })?
        .collect::<std::result::Result<Vec<_>, _>>()?;

    Ok(rows)
}

fn message_from_row(row: &Row<'_>) -> rusqlite::Result<MessageRow> {
    Ok(MessageRow {
        id: row.get(0)?,
        chat_id: row.get(1)?,
        sender_id: row.get(2)?,
        text: row.get(3)?,
        created_at: row.get(4)?,
    })
}
