use anyhow::Result;
use hearth_types::models::UserId;

use crate::models::{ChatRow, MessageRow, UserRow};

/// Data access for the messenger, one method per API action.
///
/// Statements run inside an implicit transaction that starts with the first
/// statement. Read-only callers may simply drop the store; writers must call
/// [`ChatStore::commit`] or the insert is discarded.
pub trait ChatStore {
    /// Every chat the principal takes part in, with the counterpart user,
    /// the latest message and the count of recent messages from the other side.
    /// Most recently active chats first, empty chats last.
    fn list_chats(&mut self, principal: UserId) -> Result<Vec<ChatRow>>;

    /// All messages of a chat, oldest first.
    fn list_messages(&mut self, chat_id: i64) -> Result<Vec<MessageRow>>;

    /// Insert a message stamped with the server clock and return the stored row.
    fn insert_message(&mut self, chat_id: i64, sender: UserId, text: &str) -> Result<MessageRow>;

    /// Every user except the principal, ordered by name.
    fn list_contacts(&mut self, principal: UserId) -> Result<Vec<UserRow>>;

    fn commit(&mut self) -> Result<()>;

    fn rollback(&mut self) -> Result<()>;
}

/// Opens a fresh store for a single request.
pub trait StoreConnector {
    type Store: ChatStore;

    fn connect(&self, database_url: &str) -> Result<Self::Store>;
}
