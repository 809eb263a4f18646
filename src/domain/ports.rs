use crate::domain::model::{Booking, Conversation, Message};
use crate::utils::error::Result;
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::Serialize;

/// 以 collection 名稱 + 紀錄 id 為鍵的持久化後端
pub trait Storage: Send + Sync {
    fn get(
        &self,
        collection: &str,
        id: &str,
    ) -> impl std::future::Future<Output = Result<Option<Vec<u8>>>> + Send;

    fn put(
        &self,
        collection: &str,
        id: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;

    /// 回傳是否真的刪除了一筆紀錄
    fn remove(
        &self,
        collection: &str,
        id: &str,
    ) -> impl std::future::Future<Output = Result<bool>> + Send;

    fn scan(&self, collection: &str)
        -> impl std::future::Future<Output = Result<Vec<Vec<u8>>>> + Send;
}

/// 可存入 collection 的紀錄
pub trait Entity: Serialize + DeserializeOwned + Clone + Send + Sync {
    /// 儲存鍵，沿用瀏覽器版本的 key
    const COLLECTION: &'static str;
    /// 錯誤訊息中使用的名稱
    const KIND: &'static str;

    fn id(&self) -> &str;
    fn created(&self) -> DateTime<Utc>;
}

impl Entity for Booking {
    const COLLECTION: &'static str = "user_bookings";
    const KIND: &'static str = "booking";

    fn id(&self) -> &str {
        &self.id
    }

    fn created(&self) -> DateTime<Utc> {
        self.created_at
    }
}

impl Entity for Conversation {
    const COLLECTION: &'static str = "user_conversations";
    const KIND: &'static str = "conversation";

    fn id(&self) -> &str {
        &self.id
    }

    fn created(&self) -> DateTime<Utc> {
        self.created_at
    }
}

impl Entity for Message {
    const COLLECTION: &'static str = "conversation_messages";
    const KIND: &'static str = "message";

    fn id(&self) -> &str {
        &self.id
    }

    fn created(&self) -> DateTime<Utc> {
        self.timestamp
    }
}
