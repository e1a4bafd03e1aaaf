//! Flavor-parameterized chat message service.
//!
//! One instance serves the global room, another the language rooms; both
//! share the same validation, persistence, and broadcast orchestration.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;
use tracing::{error, info};
use uuid::Uuid;

use linguahub_core::config::chat::ChatConfig;
use linguahub_core::error::AppError;
use linguahub_core::result::AppResult;
use linguahub_core::traits::RoomBroadcaster;
use linguahub_core::types::pagination::PageRequest;
use linguahub_entity::chat::{
    ChatMessage, ChatMessageStore, ChatMessageView, NewChatMessage, RoomFlavor, RoomId,
};
use linguahub_entity::user::{UserDirectory, UserRef};

use crate::context::RequestContext;

use super::policy::{self, ChatOp};

/// One page of room history, oldest message first.
#[derive(Debug, Clone)]
pub struct MessagePage {
    /// Messages in ascending `created_at` order.
    pub messages: Vec<ChatMessageView>,
    /// Whether an earlier page (older messages) likely exists. Computed as
    /// `returned_count == limit`, so an exactly-full final page reports
    /// `true`.
    pub has_more: bool,
    /// The caller's learning language (language flavor only, original
    /// profile casing).
    pub language: Option<String>,
}

/// Validates, persists, paginates, and soft-deletes chat messages for one
/// room flavor, broadcasting an event after every successful mutation.
#[derive(Clone)]
pub struct ChatService {
    /// Which room flavor this instance serves.
    flavor: RoomFlavor,
    /// Persistent message store.
    store: Arc<dyn ChatMessageStore>,
    /// Identity provider lookup for sender profiles.
    users: Arc<dyn UserDirectory>,
    /// Room-scoped event fan-out.
    broadcaster: Arc<dyn RoomBroadcaster>,
    /// Message limits.
    config: ChatConfig,
}

impl ChatService {
    /// Creates a new chat service for one room flavor.
    pub fn new(
        flavor: RoomFlavor,
        store: Arc<dyn ChatMessageStore>,
        users: Arc<dyn UserDirectory>,
        broadcaster: Arc<dyn RoomBroadcaster>,
        config: ChatConfig,
    ) -> Self {
        Self {
            flavor,
            store,
            users,
            broadcaster,
            config,
        }
    }

    /// The room flavor this instance serves.
    pub fn flavor(&self) -> RoomFlavor {
        self.flavor
    }

    /// Lists one page of room history for the caller, oldest first.
    ///
    /// For the language flavor the query is scoped to the caller's own
    /// current learning language; there is no way to read another
    /// language's room.
    pub async fn list_messages(
        &self,
        ctx: &RequestContext,
        page: PageRequest,
    ) -> AppResult<MessagePage> {
        let language = match self.flavor {
            RoomFlavor::Global => None,
            RoomFlavor::Language => Some(policy::require_language(&ctx.user, ChatOp::List)?),
        };

        let mut rows = self
            .store
            .find_page(self.flavor, language.as_deref(), &page)
            .await?;

        let has_more = rows.len() as u64 == page.limit();
        rows.reverse();

        let messages = self.resolve_views(rows).await?;

        Ok(MessagePage {
            messages,
            has_more,
            language: match self.flavor {
                RoomFlavor::Language => ctx.user.learning_language.clone(),
                RoomFlavor::Global => None,
            },
        })
    }

    /// Validates and persists a message, then broadcasts it to the room —
    /// the sender's own connections included, so the sender sees the echo
    /// with server-assigned id and timestamp.
    pub async fn send_message(
        &self,
        ctx: &RequestContext,
        body: &str,
    ) -> AppResult<ChatMessageView> {
        let body = body.trim();
        if body.is_empty() {
            return Err(AppError::validation("Message content is required"));
        }
        if body.chars().count() > self.config.max_message_length {
            return Err(AppError::validation(format!(
                "Message must be {} characters or fewer",
                self.config.max_message_length
            )));
        }

        let language = match self.flavor {
            RoomFlavor::Global => None,
            RoomFlavor::Language => Some(policy::require_language(&ctx.user, ChatOp::Send)?),
        };
        let room = policy::resolve_room(self.flavor, &ctx.user, ChatOp::Send)?;

        let message = self
            .store
            .insert(NewChatMessage {
                sender_id: ctx.user.id,
                flavor: self.flavor,
                language,
                body: body.to_string(),
            })
            .await?;

        info!(
            message_id = %message.id,
            sender_id = %ctx.user.id,
            room = %room,
            "Chat message sent"
        );

        let view = message.into_view(&ctx.user);
        self.broadcast(&room, self.created_event(), &view);

        Ok(view)
    }

    /// Soft-deletes an own message and broadcasts the deletion.
    ///
    /// The deletion flag is set exactly once; the row is never removed.
    pub async fn delete_message(&self, ctx: &RequestContext, message_id: Uuid) -> AppResult<()> {
        if self.flavor == RoomFlavor::Language {
            policy::require_language(&ctx.user, ChatOp::Delete)?;
        }

        let message = self
            .store
            .find_by_id(message_id)
            .await?
            .filter(|m| m.flavor == self.flavor)
            .ok_or_else(|| AppError::not_found("Message not found"))?;

        policy::authorize_delete(self.flavor, &ctx.user, &message)?;

        self.store.mark_deleted(message.id, Utc::now()).await?;

        let room = message.room();
        info!(
            message_id = %message.id,
            sender_id = %ctx.user.id,
            room = %room,
            "Chat message deleted"
        );

        self.broadcast(
            &room,
            self.deleted_event(),
            &serde_json::json!({ "messageId": message.id }),
        );

        Ok(())
    }

    /// Event name for new-message broadcasts.
    fn created_event(&self) -> &'static str {
        match self.flavor {
            RoomFlavor::Global => "newGlobalMessage",
            RoomFlavor::Language => "newLanguageMessage",
        }
    }

    /// Event name for deletion broadcasts.
    fn deleted_event(&self) -> &'static str {
        match self.flavor {
            RoomFlavor::Global => "messageDeleted",
            RoomFlavor::Language => "languageMessageDeleted",
        }
    }

    /// Fan a payload out to the room. Best-effort: serialization or
    /// delivery problems never fail the originating write.
    fn broadcast<T: serde::Serialize>(&self, room: &RoomId, event: &str, payload: &T) {
        match serde_json::to_value(payload) {
            Ok(payload) => self.broadcaster.broadcast(room.as_str(), event, payload),
            Err(e) => error!(error = %e, event, "Failed to serialize broadcast payload"),
        }
    }

    /// Resolve sender profiles for a page of messages, de-duplicating
    /// lookups per sender.
    async fn resolve_views(&self, rows: Vec<ChatMessage>) -> AppResult<Vec<ChatMessageView>> {
        let mut senders: HashMap<Uuid, UserRef> = HashMap::new();
        let mut views = Vec::with_capacity(rows.len());

        for message in rows {
            if !senders.contains_key(&message.sender_id) {
                let sender = self
                    .users
                    .find_ref(message.sender_id)
                    .await?
                    .unwrap_or_else(|| UserRef {
                        id: message.sender_id,
                        full_name: "unknown".to_string(),
                        avatar_url: None,
                        learning_language: None,
                    });
                senders.insert(message.sender_id, sender);
            }
            let sender = &senders[&message.sender_id];
            views.push(message.into_view(sender));
        }

        Ok(views)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::Mutex;
    use std::sync::atomic::{AtomicI64, Ordering};

    use async_trait::async_trait;
    use chrono::DateTime;
    use linguahub_core::error::ErrorKind;

    /// In-memory stand-in for the persistent message store. Assigns
    /// strictly increasing timestamps so ordering assertions are
    /// deterministic.
    struct MemoryStore {
        rows: Mutex<Vec<ChatMessage>>,
        clock: AtomicI64,
    }

    impl MemoryStore {
        fn new() -> Self {
            Self {
                rows: Mutex::new(Vec::new()),
                clock: AtomicI64::new(0),
            }
        }

        fn raw(&self, id: Uuid) -> Option<ChatMessage> {
            self.rows.lock().unwrap().iter().find(|m| m.id == id).cloned()
        }
    }

    #[async_trait]
    impl ChatMessageStore for MemoryStore {
        async fn insert(&self, new: NewChatMessage) -> AppResult<ChatMessage> {
            let tick = self.clock.fetch_add(1, Ordering::SeqCst);
            let message = ChatMessage {
                id: Uuid::new_v4(),
                sender_id: new.sender_id,
                flavor: new.flavor,
                language: new.language,
                body: new.body,
                is_deleted: false,
                deleted_at: None,
                created_at: DateTime::from_timestamp(1_700_000_000 + tick, 0).unwrap(),
            };
            self.rows.lock().unwrap().push(message.clone());
            Ok(message)
        }

        async fn find_by_id(&self, id: Uuid) -> AppResult<Option<ChatMessage>> {
            Ok(self.raw(id))
        }

        async fn find_page(
            &self,
            flavor: RoomFlavor,
            language: Option<&str>,
            page: &PageRequest,
        ) -> AppResult<Vec<ChatMessage>> {
            let mut rows: Vec<ChatMessage> = self
                .rows
                .lock()
                .unwrap()
                .iter()
                .filter(|m| {
                    m.flavor == flavor
                        && !m.is_deleted
                        && (language.is_none() || m.language.as_deref() == language)
                })
                .cloned()
                .collect();
            rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
            Ok(rows
                .into_iter()
                .skip(page.offset() as usize)
                .take(page.limit() as usize)
                .collect())
        }

        async fn mark_deleted(
            &self,
            id: Uuid,
            deleted_at: chrono::DateTime<Utc>,
        ) -> AppResult<()> {
            let mut rows = self.rows.lock().unwrap();
            if let Some(row) = rows.iter_mut().find(|m| m.id == id) {
                row.is_deleted = true;
                row.deleted_at = Some(deleted_at);
            }
            Ok(())
        }
    }

    /// Records broadcasts for assertions.
    #[derive(Default)]
    struct RecordingBroadcaster {
        events: Mutex<Vec<(String, String, serde_json::Value)>>,
    }

    impl RoomBroadcaster for RecordingBroadcaster {
        fn broadcast(&self, room: &str, event: &str, payload: serde_json::Value) {
            self.events
                .lock()
                .unwrap()
                .push((room.to_string(), event.to_string(), payload));
        }
    }

    struct MemoryDirectory {
        users: Mutex<HashMap<Uuid, UserRef>>,
    }

    #[async_trait]
    impl UserDirectory for MemoryDirectory {
        async fn find_ref(&self, id: Uuid) -> AppResult<Option<UserRef>> {
            Ok(self.users.lock().unwrap().get(&id).cloned())
        }
    }

    struct Fixture {
        store: Arc<MemoryStore>,
        directory: Arc<MemoryDirectory>,
        broadcaster: Arc<RecordingBroadcaster>,
    }

    impl Fixture {
        fn new() -> Self {
            Self {
                store: Arc::new(MemoryStore::new()),
                directory: Arc::new(MemoryDirectory {
                    users: Mutex::new(HashMap::new()),
                }),
                broadcaster: Arc::new(RecordingBroadcaster::default()),
            }
        }

        fn service(&self, flavor: RoomFlavor) -> ChatService {
            ChatService::new(
                flavor,
                self.store.clone(),
                self.directory.clone(),
                self.broadcaster.clone(),
                ChatConfig::default(),
            )
        }

        fn user(&self, name: &str, language: Option<&str>) -> RequestContext {
            let user = UserRef {
                id: Uuid::new_v4(),
                full_name: name.to_string(),
                avatar_url: None,
                learning_language: language.map(str::to_string),
            };
            self.directory
                .users
                .lock()
                .unwrap()
                .insert(user.id, user.clone());
            RequestContext::new(user)
        }

        fn broadcasts(&self) -> Vec<(String, String, serde_json::Value)> {
            self.broadcaster.events.lock().unwrap().clone()
        }
    }

    #[tokio::test]
    async fn test_send_then_list_returns_oldest_first() {
        let fx = Fixture::new();
        let service = fx.service(RoomFlavor::Global);
        let ctx = fx.user("Alice", None);

        for body in ["first", "second", "third"] {
            service.send_message(&ctx, body).await.unwrap();
        }

        let page = service
            .list_messages(&ctx, PageRequest::new(1, 50))
            .await
            .unwrap();
        let bodies: Vec<&str> = page.messages.iter().map(|m| m.body.as_str()).collect();
        assert_eq!(bodies, vec!["first", "second", "third"]);
        assert!(!page.has_more);
    }

    #[tokio::test]
    async fn test_send_rejects_blank_and_oversized_bodies() {
        let fx = Fixture::new();
        let service = fx.service(RoomFlavor::Global);
        let ctx = fx.user("Alice", None);

        let err = service.send_message(&ctx, "   ").await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);

        let long = "x".repeat(1001);
        let err = service.send_message(&ctx, &long).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);

        // Exactly at the limit is accepted.
        let max = "x".repeat(1000);
        assert!(service.send_message(&ctx, &max).await.is_ok());
    }

    #[tokio::test]
    async fn test_send_trims_body_and_echoes_to_room() {
        let fx = Fixture::new();
        let service = fx.service(RoomFlavor::Global);
        let ctx = fx.user("Alice", None);

        let view = service.send_message(&ctx, "  hello  ").await.unwrap();
        assert_eq!(view.body, "hello");

        let broadcasts = fx.broadcasts();
        assert_eq!(broadcasts.len(), 1);
        let (room, event, payload) = &broadcasts[0];
        assert_eq!(room, "global-chat");
        assert_eq!(event, "newGlobalMessage");
        assert_eq!(payload["body"], "hello");
        assert_eq!(payload["sender"]["fullName"], "Alice");
    }

    #[tokio::test]
    async fn test_language_operations_require_learning_language() {
        let fx = Fixture::new();
        let service = fx.service(RoomFlavor::Language);
        let ctx = fx.user("Alice", None);

        let err = service
            .list_messages(&ctx, PageRequest::default())
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);

        let err = service.send_message(&ctx, "hola").await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);

        let err = service.delete_message(&ctx, Uuid::new_v4()).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
    }

    #[tokio::test]
    async fn test_language_room_scoped_to_callers_current_language() {
        let fx = Fixture::new();
        let service = fx.service(RoomFlavor::Language);
        let spanish = fx.user("Maria", Some("Spanish"));
        let french = fx.user("Pierre", Some("French"));

        service.send_message(&spanish, "hola").await.unwrap();
        service.send_message(&french, "bonjour").await.unwrap();

        let page = service
            .list_messages(&spanish, PageRequest::default())
            .await
            .unwrap();
        assert_eq!(page.messages.len(), 1);
        assert_eq!(page.messages[0].body, "hola");
        assert_eq!(page.messages[0].language.as_deref(), Some("spanish"));
        assert_eq!(page.language.as_deref(), Some("Spanish"));

        let broadcasts = fx.broadcasts();
        assert_eq!(broadcasts[0].0, "spanish-chat");
        assert_eq!(broadcasts[0].1, "newLanguageMessage");
        assert_eq!(broadcasts[1].0, "french-chat");
    }

    #[tokio::test]
    async fn test_shared_language_room_and_soft_delete_scenario() {
        let fx = Fixture::new();
        let service = fx.service(RoomFlavor::Language);
        let u1 = fx.user("Maria", Some("Spanish"));
        let u2 = fx.user("Diego", Some("Spanish"));

        let sent = service.send_message(&u1, "Hola").await.unwrap();
        assert_eq!(sent.language.as_deref(), Some("spanish"));

        let page = service
            .list_messages(&u2, PageRequest::default())
            .await
            .unwrap();
        assert_eq!(page.messages.len(), 1);
        assert_eq!(page.messages[0].body, "Hola");

        service.delete_message(&u1, sent.id).await.unwrap();

        let page = service
            .list_messages(&u2, PageRequest::default())
            .await
            .unwrap();
        assert!(page.messages.is_empty());

        // The row survives in the store with the deletion flag set.
        let raw = fx.store.raw(sent.id).unwrap();
        assert!(raw.is_deleted);
        assert!(raw.deleted_at.is_some());

        let broadcasts = fx.broadcasts();
        let (room, event, payload) = broadcasts.last().unwrap();
        assert_eq!(room, "spanish-chat");
        assert_eq!(event, "languageMessageDeleted");
        assert_eq!(payload["messageId"], serde_json::json!(sent.id));
    }

    #[tokio::test]
    async fn test_delete_rejects_non_owner_and_unknown_ids() {
        let fx = Fixture::new();
        let service = fx.service(RoomFlavor::Global);
        let alice = fx.user("Alice", None);
        let bob = fx.user("Bob", None);

        let err = service.delete_message(&alice, Uuid::new_v4()).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotFound);

        let sent = service.send_message(&alice, "mine").await.unwrap();
        let err = service.delete_message(&bob, sent.id).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Forbidden);

        service.delete_message(&alice, sent.id).await.unwrap();
    }

    #[tokio::test]
    async fn test_delete_forbidden_after_language_change() {
        let fx = Fixture::new();
        let service = fx.service(RoomFlavor::Language);
        let mut ctx = fx.user("Maria", Some("Spanish"));

        let sent = service.send_message(&ctx, "hola").await.unwrap();

        ctx.user.learning_language = Some("French".to_string());
        let err = service.delete_message(&ctx, sent.id).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Forbidden);
    }

    #[tokio::test]
    async fn test_flavors_do_not_see_each_other() {
        let fx = Fixture::new();
        let global = fx.service(RoomFlavor::Global);
        let language = fx.service(RoomFlavor::Language);
        let ctx = fx.user("Maria", Some("Spanish"));

        let sent = global.send_message(&ctx, "global hello").await.unwrap();

        let page = language
            .list_messages(&ctx, PageRequest::default())
            .await
            .unwrap();
        assert!(page.messages.is_empty());

        // A global message is not addressable through the language service.
        let err = language.delete_message(&ctx, sent.id).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn test_has_more_true_on_exactly_full_page() {
        let fx = Fixture::new();
        let service = fx.service(RoomFlavor::Global);
        let ctx = fx.user("Alice", None);

        for i in 0..50 {
            service.send_message(&ctx, &format!("msg {i}")).await.unwrap();
        }

        // Exactly 50 rows exist; a full first page still reports more.
        let page = service
            .list_messages(&ctx, PageRequest::new(1, 50))
            .await
            .unwrap();
        assert_eq!(page.messages.len(), 50);
        assert!(page.has_more);

        let page = service
            .list_messages(&ctx, PageRequest::new(2, 50))
            .await
            .unwrap();
        assert!(page.messages.is_empty());
        assert!(!page.has_more);
    }

    #[tokio::test]
    async fn test_pagination_pages_do_not_overlap() {
        let fx = Fixture::new();
        let service = fx.service(RoomFlavor::Global);
        let ctx = fx.user("Alice", None);

        for i in 0..5 {
            service.send_message(&ctx, &format!("msg {i}")).await.unwrap();
        }

        // Page 1 holds the two newest, page 2 the two before them.
        let first = service
            .list_messages(&ctx, PageRequest::new(1, 2))
            .await
            .unwrap();
        let bodies: Vec<&str> = first.messages.iter().map(|m| m.body.as_str()).collect();
        assert_eq!(bodies, vec!["msg 3", "msg 4"]);
        assert!(first.has_more);

        let second = service
            .list_messages(&ctx, PageRequest::new(2, 2))
            .await
            .unwrap();
        let bodies: Vec<&str> = second.messages.iter().map(|m| m.body.as_str()).collect();
        assert_eq!(bodies, vec!["msg 1", "msg 2"]);
    }
}
