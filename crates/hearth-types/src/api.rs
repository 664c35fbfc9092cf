use serde::{Deserialize, Serialize};

// -- Chats --

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contact {
    pub id: i64,
    pub name: String,
    pub initials: String,
    pub status: String,
    /// Empty string when the user has no avatar, never null.
    pub avatar: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatSummary {
    pub id: i64,
    pub contact: Contact,
    #[serde(rename = "lastMessage")]
    pub last_message: String,
    /// `HH:MM` of the latest message, empty for a chat with no messages.
    pub time: String,
    pub unread: i64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ChatsResponse {
    pub chats: Vec<ChatSummary>,
}

// -- Messages --

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessageView {
    pub id: i64,
    pub text: String,
    /// True when the principal wrote the message.
    pub sent: bool,
    pub time: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MessagesResponse {
    pub messages: Vec<MessageView>,
}

/// `chat_id` arrives as a number from the web client but as a string from
/// hand-written callers; both are accepted.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum ChatIdInput {
    Number(i64),
    Text(String),
}

impl ChatIdInput {
    /// `0` and `""` count as a missing id.
    pub fn is_blank(&self) -> bool {
        match self {
            ChatIdInput::Number(n) => *n == 0,
            ChatIdInput::Text(s) => s.is_empty(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct SendMessageRequest {
    #[serde(default)]
    pub chat_id: Option<ChatIdInput>,
    #[serde(default)]
    pub text: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SentMessageResponse {
    pub message: MessageView,
}

// -- Contacts --

#[derive(Debug, Serialize, Deserialize)]
pub struct ContactsResponse {
    pub contacts: Vec<Contact>,
}

// -- Errors --

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

impl ErrorBody {
    pub fn new(error: impl Into<String>) -> Self {
        Self { error: error.into() }
    }
}
