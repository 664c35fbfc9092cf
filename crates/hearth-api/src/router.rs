//! The single request entry point: preflight, configuration check, input
//! validation, then one storage round-trip behind a recovery boundary.

use anyhow::anyhow;
use hearth_db::{ChatStore, StoreConnector};
use hearth_types::api::{
    ChatIdInput, ChatsResponse, ContactsResponse, MessagesResponse, SendMessageRequest,
    SentMessageResponse,
};
use hearth_types::invocation::{ApiRequest, ApiResponse};
use hearth_types::models::UserId;
use tracing::{debug, error, info, warn};

use crate::action::Action;
use crate::config::Config;
use crate::error::ApiError;
use crate::views;

/// A validated request, ready to run against storage.
#[derive(Debug, Clone, PartialEq)]
enum Command {
    GetChats,
    GetMessages { chat_id: String },
    SendMessage { chat_id: ChatIdInput, text: String },
    GetContacts,
}

/// Handle one request to completion. Every outcome, including storage
/// failures, is turned into a response; the connection opened here is closed
/// before returning.
pub fn handle<C: StoreConnector>(connector: &C, config: &Config, request: &ApiRequest) -> ApiResponse {
    if request.is_preflight() {
        return ApiResponse::preflight();
    }

    let Some(database_url) = config.database_url.as_deref() else {
        warn!("Rejecting request: DATABASE_URL not configured");
        return ApiError::NotConfigured.into_response();
    };

    let command = match parse_command(request) {
        Ok(command) => command,
        Err(e) => {
            debug!("Rejected {} request: {}", request.http_method, e);
            return e.into_response();
        }
    };

    let mut store = match connector.connect(database_url) {
        Ok(store) => store,
        Err(e) => {
            error!("Database connection failed: {:#}", e);
            return ApiError::Execution(e).into_response();
        }
    };

    match execute(&mut store, config.principal, command) {
        Ok(response) => response,
        Err(e) => {
            error!("Request failed: {:#}", e);
            if let Err(rb) = store.rollback() {
                warn!("Rollback failed: {:#}", rb);
            }
            ApiError::Execution(e).into_response()
        }
    }
}

fn parse_command(request: &ApiRequest) -> Result<Command, ApiError> {
    let action = match request.query_param("action") {
        Some(name) => name.parse::<Action>()?,
        None => Action::DEFAULT,
    };

    if action.requires_post() && !request.is_post() {
        return Err(ApiError::UnknownAction);
    }

    match action {
        Action::GetChats => Ok(Command::GetChats),
        Action::GetMessages => {
            let chat_id = request
                .query_param("chat_id")
                .filter(|id| !id.is_empty())
                .ok_or(ApiError::Validation("chat_id required"))?;
            Ok(Command::GetMessages {
                chat_id: chat_id.to_string(),
            })
        }
        Action::SendMessage => {
            let raw = request
                .body
                .as_deref()
                .filter(|b| !b.trim().is_empty())
                .unwrap_or("{}");
            let body: SendMessageRequest =
                serde_json::from_str(raw).map_err(|e| ApiError::Execution(e.into()))?;

            let text = body.text.as_deref().unwrap_or_default().trim();
            match body.chat_id {
                Some(chat_id) if !chat_id.is_blank() && !text.is_empty() => Ok(Command::SendMessage {
                    chat_id,
                    text: text.to_string(),
                }),
                _ => Err(ApiError::Validation("chat_id and text required")),
            }
        }
        Action::GetContacts => Ok(Command::GetContacts),
    }
}

fn execute<S: ChatStore>(store: &mut S, principal: UserId, command: Command) -> anyhow::Result<ApiResponse> {
    match command {
        Command::GetChats => {
            let chats = store
                .list_chats(principal)?
                .into_iter()
                .map(views::chat_summary)
                .collect();
            Ok(ApiResponse::json(200, &ChatsResponse { chats }))
        }
        Command::GetMessages { chat_id } => {
            let chat_id = parse_chat_id(&chat_id)?;
            let messages = store
                .list_messages(chat_id)?
                .into_iter()
                .map(|row| views::message(row, principal))
                .collect();
            Ok(ApiResponse::json(200, &MessagesResponse { messages }))
        }
        Command::SendMessage { chat_id, text } => {
            let chat_id = match chat_id {
                ChatIdInput::Number(id) => id,
                ChatIdInput::Text(raw) => parse_chat_id(&raw)?,
            };
            let row = store.insert_message(chat_id, principal, &text)?;
            store.commit()?;
            info!("Message {} sent to chat {}", row.id, chat_id);

            let message = views::message(row, principal);
            Ok(ApiResponse::json(200, &SentMessageResponse { message }))
        }
        Command::GetContacts => {
            let contacts = store
                .list_contacts(principal)?
                .into_iter()
                .map(views::contact)
                .collect();
            Ok(ApiResponse::json(200, &ContactsResponse { contacts }))
        }
    }
}

fn parse_chat_id(raw: &str) -> anyhow::Result<i64> {
    raw.trim()
        .parse::<i64>()
        .map_err(|_| anyhow!("invalid chat_id: \"{}\"", raw))
}
