use std::fmt;
use std::str::FromStr;

use crate::error::ApiError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    GetChats,
    GetMessages,
    SendMessage,
    GetContacts,
}

impl Action {
    pub const DEFAULT: Action = Action::GetChats;

    pub fn as_str(&self) -> &'static str {
        match self {
            Action::GetChats => "get_chats",
            Action::GetMessages => "get_messages",
            Action::SendMessage => "send_message",
            Action::GetContacts => "get_contacts",
        }
    }

    /// Only `send_message` is tied to a method; reads answer any verb.
    pub fn requires_post(&self) -> bool {
        matches!(self, Action::SendMessage)
    }
}

impl FromStr for Action {
    type Err = ApiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "get_chats" => Ok(Action::GetChats),
            "get_messages" => Ok(Action::GetMessages),
            "send_message" => Ok(Action::SendMessage),
            "get_contacts" => Ok(Action::GetContacts),
            _ => Err(ApiError::UnknownAction),
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_actions() {
        for action in [
            Action::GetChats,
            Action::GetMessages,
            Action::SendMessage,
            Action::GetContacts,
        ] {
            assert_eq!(action.as_str().parse::<Action>().unwrap(), action);
        }
    }

    #[test]
    fn rejects_unknown_and_case_variants() {
        assert!(matches!("delete_chat".parse::<Action>(), Err(ApiError::UnknownAction)));
        assert!("GET_CHATS".parse::<Action>().is_err());
        assert!("".parse::<Action>().is_err());
    }
}
