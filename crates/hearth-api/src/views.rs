//! Conversions from storage rows to the JSON payloads the web client reads.

use chrono::{DateTime, NaiveDateTime, Utc};
use hearth_db::models::{ChatRow, MessageRow, UserRow};
use hearth_types::api::{ChatSummary, Contact, MessageView};
use hearth_types::models::UserId;
use tracing::warn;

/// `HH:MM` of a stored timestamp, or an empty string if it cannot be read.
pub fn clock_time(created_at: &str) -> String {
    created_at
        .parse::<DateTime<Utc>>()
        .or_else(|_| {
            // SQLite stores "YYYY-MM-DD HH:MM:SS" without a zone; it is UTC.
            NaiveDateTime::parse_from_str(created_at, "%Y-%m-%d %H:%M:%S%.f").map(|ndt| ndt.and_utc())
        })
        .map(|ts| ts.format("%H:%M").to_string())
        .unwrap_or_else(|e| {
            warn!("Unreadable created_at '{}': {}", created_at, e);
            String::new()
        })
}

pub fn contact(row: UserRow) -> Contact {
    Contact {
        id: row.id,
        name: row.name,
        initials: row.initials,
        status: row.status,
        avatar: row.avatar.unwrap_or_default(),
    }
}

pub fn chat_summary(row: ChatRow) -> ChatSummary {
    ChatSummary {
        id: row.id,
        contact: contact(row.contact),
        last_message: row.last_message.unwrap_or_default(),
        time: row.last_created_at.as_deref().map(clock_time).unwrap_or_default(),
        unread: row.unread.max(0),
    }
}

pub fn message(row: MessageRow, principal: UserId) -> MessageView {
    MessageView {
        id: row.id,
        sent: row.sender_id == principal.0,
        time: clock_time(&row.created_at),
        text: row.text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(avatar: Option<&str>) -> UserRow {
        UserRow {
            id: 2,
            name: "Mom".into(),
            initials: "MO".into(),
            status: "online".into(),
            avatar: avatar.map(String::from),
        }
    }

    #[test]
    fn clock_time_formats() {
        assert_eq!(clock_time("2024-03-01 09:05:59"), "09:05");
        assert_eq!(clock_time("2024-03-01 23:40:00.123"), "23:40");
        assert_eq!(clock_time("2024-03-01T18:30:00Z"), "18:30");
        assert_eq!(clock_time("yesterday"), "");
    }

    #[test]
    fn missing_avatar_is_empty_string() {
        assert_eq!(contact(user(None)).avatar, "");
        assert_eq!(contact(user(Some("a.png"))).avatar, "a.png");
    }

    #[test]
    fn empty_chat_renders_blank_preview() {
        let summary = chat_summary(ChatRow {
            id: 9,
            contact: user(None),
            last_message: None,
            last_created_at: None,
            unread: 0,
        });
        assert_eq!(summary.last_message, "");
        assert_eq!(summary.time, "");
        assert_eq!(summary.unread, 0);

        let value = serde_json::to_value(&summary).unwrap();
        assert_eq!(value["lastMessage"], "");
        assert_eq!(value["contact"]["avatar"], "");
    }

    #[test]
    fn sent_follows_principal() {
        let row = MessageRow {
            id: 1,
            chat_id: 1,
            sender_id: 7,
            text: "hi".into(),
            created_at: "2024-03-01 12:00:00".into(),
        };
        assert!(message(row.clone(), UserId(7)).sent);
        assert!(!message(row, UserId(1)).sent);
    }
}
