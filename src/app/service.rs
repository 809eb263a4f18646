use crate::core::auth::{authenticate, user_by_id};
use crate::core::booking_store::BookingStore;
use crate::core::catalog::property_by_id;
use crate::core::message_store::MessageStore;
use crate::core::pricing::calculate_with_optional_fee;
use crate::domain::model::{
    AuthenticatedUser, Booking, BookingCalculation, BookingRequest, Conversation, Message,
    NewConversation, Property,
};
use crate::domain::ports::{Entity, Storage};
use crate::utils::error::{Result, StayError};
use crate::utils::validation::validate_non_empty_string;
use chrono::NaiveDate;
use std::path::Path;

/// 三個集合各自的 JSON 陣列
#[derive(Debug, Clone, PartialEq)]
pub struct ExportBundle {
    pub bookings: String,
    pub conversations: String,
    pub messages: String,
}

impl ExportBundle {
    fn files(&self) -> [(&'static str, &str); 3] {
        [
            (Booking::COLLECTION, self.bookings.as_str()),
            (Conversation::COLLECTION, self.conversations.as_str()),
            (Message::COLLECTION, self.messages.as_str()),
        ]
    }
}

/// 對外的應用服務：把目錄、登入、訂房與訊息組合在一起
pub struct Staybook<S: Storage + Clone> {
    bookings: BookingStore<S>,
    messages: MessageStore<S>,
}

impl<S: Storage + Clone> Staybook<S> {
    pub fn new(storage: S) -> Self {
        Self {
            bookings: BookingStore::new(storage.clone()),
            messages: MessageStore::new(storage),
        }
    }

    pub fn bookings(&self) -> &BookingStore<S> {
        &self.bookings
    }

    pub fn messages(&self) -> &MessageStore<S> {
        &self.messages
    }

    pub fn login(&self, email: &str, password: &str) -> Result<AuthenticatedUser> {
        authenticate(email, password).ok_or_else(|| StayError::AuthenticationError {
            email: email.to_string(),
        })
    }

    pub fn property(&self, property_id: &str) -> Result<&'static Property> {
        property_by_id(property_id).ok_or_else(|| StayError::NotFound {
            entity: "property",
            id: property_id.to_string(),
        })
    }

    pub fn quote(
        &self,
        property_id: &str,
        check_in: &str,
        check_out: &str,
    ) -> Result<(&'static Property, BookingCalculation)> {
        let property = self.property(property_id)?;
        let calculation = calculate_with_optional_fee(
            check_in,
            check_out,
            property.pricing.base_price,
            property.pricing.cleaning_fee,
        )?;
        Ok((property, calculation))
    }

    pub async fn book(
        &self,
        guest: &AuthenticatedUser,
        request: &BookingRequest,
        today: NaiveDate,
    ) -> Result<Booking> {
        let property = self.property(&request.property_id)?;
        self.bookings
            .create_booking(request, property, guest, today)
            .await
    }

    /// 房客的訂房，最新的排在前面
    pub async fn my_bookings(&self, guest: &AuthenticatedUser) -> Result<Vec<Booking>> {
        let mut bookings = self.bookings.list_by_guest(&guest.email).await?;
        bookings.reverse();
        Ok(bookings)
    }

    pub async fn contact_host(
        &self,
        guest: &AuthenticatedUser,
        property_id: &str,
        booking_id: Option<String>,
    ) -> Result<Conversation> {
        let property = self.property(property_id)?;
        let host = user_by_id(&property.host_id).ok_or_else(|| StayError::NotFound {
            entity: "host",
            id: property.host_id.clone(),
        })?;

        self.messages
            .find_or_create_conversation(NewConversation {
                property_id: property.id.clone(),
                property_title: property.title.clone(),
                property_image: property.primary_image().to_string(),
                guest_id: guest.id.clone(),
                guest_name: guest.name.clone(),
                host_id: host.id,
                host_name: host.name,
                booking_id,
            })
            .await
    }

    /// 使用者的對話，最近有動靜的排在前面
    pub async fn my_conversations(&self, user: &AuthenticatedUser) -> Result<Vec<Conversation>> {
        let mut conversations = self.messages.conversations_by_user(&user.id).await?;
        conversations.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        Ok(conversations)
    }

    /// 取得對話；使用者必須是該對話的房客或房東
    pub async fn conversation_for(
        &self,
        user: &AuthenticatedUser,
        conversation_id: &str,
    ) -> Result<Conversation> {
        let conversation = self
            .messages
            .get_conversation(conversation_id)
            .await?
            .ok_or_else(|| StayError::NotFound {
                entity: "conversation",
                id: conversation_id.to_string(),
            })?;

        if conversation.guest_id != user.id && conversation.host_id != user.id {
            tracing::warn!(
                "User {} tried to access conversation {}",
                user.id,
                conversation_id
            );
            return Err(StayError::NotParticipant {
                user_id: user.id.clone(),
                conversation_id: conversation_id.to_string(),
            });
        }

        Ok(conversation)
    }

    pub async fn conversation_messages(
        &self,
        user: &AuthenticatedUser,
        conversation_id: &str,
    ) -> Result<Vec<Message>> {
        self.conversation_for(user, conversation_id).await?;
        self.messages.messages_by_conversation(conversation_id).await
    }

    pub async fn send(
        &self,
        sender: &AuthenticatedUser,
        conversation_id: &str,
        content: &str,
    ) -> Result<Message> {
        validate_non_empty_string("content", content)?;
        self.conversation_for(sender, conversation_id).await?;
        self.messages
            .send_message(
                conversation_id,
                &sender.id,
                &sender.name,
                sender.role,
                content.trim(),
            )
            .await
    }

    pub async fn export_all(&self) -> Result<ExportBundle> {
        Ok(ExportBundle {
            bookings: self.bookings.export_json().await?,
            conversations: self.messages.export_conversations_json().await?,
            messages: self.messages.export_messages_json().await?,
        })
    }

    /// 寫出 `<collection>.json` 三個檔案
    pub async fn export_to_dir(&self, dir: &Path) -> Result<ExportBundle> {
        let bundle = self.export_all().await?;
        tokio::fs::create_dir_all(dir).await?;
        for (collection, json) in bundle.files() {
            tokio::fs::write(dir.join(format!("{}.json", collection)), json).await?;
        }
        tracing::info!("Exported collections to {}", dir.display());
        Ok(bundle)
    }

    /// 讀回 `export_to_dir` 的輸出；缺少的檔案略過。回傳匯入總筆數。
    pub async fn import_from_dir(&self, dir: &Path) -> Result<usize> {
        let mut imported = 0;

        if let Some(json) = read_export_file(dir, Booking::COLLECTION).await? {
            imported += self.bookings.import_json(&json).await?;
        }
        if let Some(json) = read_export_file(dir, Conversation::COLLECTION).await? {
            imported += self.messages.import_conversations_json(&json).await?;
        }
        if let Some(json) = read_export_file(dir, Message::COLLECTION).await? {
            imported += self.messages.import_messages_json(&json).await?;
        }

        tracing::info!("Imported {} records from {}", imported, dir.display());
        Ok(imported)
    }
}

async fn read_export_file(dir: &Path, collection: &str) -> Result<Option<String>> {
    let path = dir.join(format!("{}.json", collection));
    match tokio::fs::read_to_string(&path).await {
        Ok(json) => Ok(Some(json)),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            tracing::warn!("Skipping {}: file not found", path.display());
            Ok(None)
        }
        Err(e) => Err(e.into()),
    }
}
