use crate::core::collection::Collection;
use crate::domain::model::{Conversation, Message, NewConversation, Role};
use crate::domain::ports::Storage;
use crate::utils::error::Result;
use crate::utils::ids::generate_id;
use chrono::Utc;

/// 對話與訊息兩個集合共用同一個後端
pub struct MessageStore<S: Storage + Clone> {
    conversations: Collection<S, Conversation>,
    messages: Collection<S, Message>,
}

impl<S: Storage + Clone> MessageStore<S> {
    pub fn new(storage: S) -> Self {
        Self {
            conversations: Collection::new(storage.clone()),
            messages: Collection::new(storage),
        }
    }

    pub async fn save_conversation(&self, conversation: &Conversation) -> Result<()> {
        self.conversations.insert(conversation).await.inspect_err(|e| {
            tracing::error!("Failed to save conversation {}: {}", conversation.id, e)
        })
    }

    pub async fn list_conversations(&self) -> Result<Vec<Conversation>> {
        self.conversations
            .all()
            .await
            .inspect_err(|e| tracing::error!("Failed to retrieve conversations: {}", e))
    }

    /// 使用者身為房客或房東的所有對話
    pub async fn conversations_by_user(&self, user_id: &str) -> Result<Vec<Conversation>> {
        self.conversations
            .filter(|c| c.guest_id == user_id || c.host_id == user_id)
            .await
            .inspect_err(|e| {
                tracing::error!("Failed to retrieve conversations for {}: {}", user_id, e)
            })
    }

    pub async fn get_conversation(&self, conversation_id: &str) -> Result<Option<Conversation>> {
        self.conversations.get(conversation_id).await.inspect_err(|e| {
            tracing::error!("Failed to retrieve conversation {}: {}", conversation_id, e)
        })
    }

    /// 同一房源、同一房客只應有一個對話
    pub async fn find_conversation(
        &self,
        property_id: &str,
        guest_id: &str,
    ) -> Result<Option<Conversation>> {
        self.conversations
            .find(|c| c.property_id == property_id && c.guest_id == guest_id)
            .await
    }

    pub async fn create_conversation(&self, new: NewConversation) -> Result<Conversation> {
        let now = Utc::now();
        let conversation = Conversation {
            id: generate_id(),
            property_id: new.property_id,
            property_title: new.property_title,
            property_image: new.property_image,
            guest_id: new.guest_id,
            guest_name: new.guest_name,
            host_id: new.host_id,
            host_name: new.host_name,
            booking_id: new.booking_id,
            last_message: None,
            unread_count: 0,
            created_at: now,
            updated_at: now,
        };

        self.save_conversation(&conversation).await?;
        tracing::debug!(
            "Created conversation {} for property {}",
            conversation.id,
            conversation.property_id
        );
        Ok(conversation)
    }

    pub async fn find_or_create_conversation(&self, new: NewConversation) -> Result<Conversation> {
        if let Some(existing) = self.find_conversation(&new.property_id, &new.guest_id).await? {
            return Ok(existing);
        }
        self.create_conversation(new).await
    }

    pub async fn save_message(&self, message: &Message) -> Result<()> {
        self.messages
            .insert(message)
            .await
            .inspect_err(|e| tracing::error!("Failed to save message {}: {}", message.id, e))
    }

    pub async fn list_messages(&self) -> Result<Vec<Message>> {
        self.messages
            .all()
            .await
            .inspect_err(|e| tracing::error!("Failed to retrieve messages: {}", e))
    }

    /// 依時間先後排序
    pub async fn messages_by_conversation(&self, conversation_id: &str) -> Result<Vec<Message>> {
        self.messages
            .filter(|m| m.conversation_id == conversation_id)
            .await
            .inspect_err(|e| {
                tracing::error!(
                    "Failed to retrieve messages for conversation {}: {}",
                    conversation_id,
                    e
                )
            })
    }

    /// 先寫入訊息，再更新對話的 last_message / unread_count。
    /// 兩次寫入之間沒有交易保護。對話不存在時訊息照樣保存。
    pub async fn send_message(
        &self,
        conversation_id: &str,
        sender_id: &str,
        sender_name: &str,
        sender_role: Role,
        content: &str,
    ) -> Result<Message> {
        let message = Message {
            id: generate_id(),
            conversation_id: conversation_id.to_string(),
            sender_id: sender_id.to_string(),
            sender_name: sender_name.to_string(),
            sender_role,
            content: content.to_string(),
            timestamp: Utc::now(),
            is_read: false,
        };

        self.save_message(&message).await?;

        match self.get_conversation(conversation_id).await? {
            Some(mut conversation) => {
                conversation.last_message = Some(message.clone());
                conversation.unread_count += 1;
                conversation.updated_at = Utc::now();
                self.conversations.put(&conversation).await.inspect_err(|e| {
                    tracing::error!(
                        "Message {} saved but conversation {} was not updated: {}",
                        message.id,
                        conversation_id,
                        e
                    )
                })?;
            }
            None => {
                tracing::warn!(
                    "Message {} sent to unknown conversation {}",
                    message.id,
                    conversation_id
                );
            }
        }

        Ok(message)
    }

    pub async fn export_conversations_json(&self) -> Result<String> {
        self.conversations.export_json().await
    }

    pub async fn export_messages_json(&self) -> Result<String> {
        self.messages.export_json().await
    }

    pub async fn import_conversations_json(&self, json: &str) -> Result<usize> {
        self.conversations.import_json(json).await
    }

    pub async fn import_messages_json(&self, json: &str) -> Result<usize> {
        self.messages.import_json(json).await
    }
}
