use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    Pending,
    Confirmed,
    Cancelled,
    Completed,
}

impl BookingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Pending => "pending",
            BookingStatus::Confirmed => "confirmed",
            BookingStatus::Cancelled => "cancelled",
            BookingStatus::Completed => "completed",
        }
    }
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BookingStatus {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "pending" => Ok(BookingStatus::Pending),
            "confirmed" => Ok(BookingStatus::Confirmed),
            "cancelled" => Ok(BookingStatus::Cancelled),
            "completed" => Ok(BookingStatus::Completed),
            other => Err(format!("unknown booking status: {}", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub id: String,
    pub property_id: String,
    pub property_title: String,
    pub property_image: String,
    pub property_location: String,
    pub guest_id: String,
    pub guest_name: String,
    pub guest_email: String,
    pub check_in_date: NaiveDate,
    pub check_out_date: NaiveDate,
    pub guest_count: u32,
    pub nights: i64,
    /// nights × 每晚價格
    pub base_price: f64,
    pub cleaning_fee: f64,
    pub total_price: f64,
    pub status: BookingStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// 價格試算結果
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingCalculation {
    pub nights: i64,
    pub base_price: f64,
    pub cleaning_fee: f64,
    pub total: f64,
}

/// 房客送出、尚未確認的訂房請求
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingRequest {
    pub property_id: String,
    pub check_in_date: String,
    pub check_out_date: String,
    pub guest_count: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Guest,
    Host,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Guest => f.write_str("guest"),
            Role::Host => f.write_str("host"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub id: String,
    pub conversation_id: String,
    pub sender_id: String,
    pub sender_name: String,
    pub sender_role: Role,
    pub content: String,
    pub timestamp: DateTime<Utc>,
    pub is_read: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Conversation {
    pub id: String,
    pub property_id: String,
    pub property_title: String,
    pub property_image: String,
    pub guest_id: String,
    pub guest_name: String,
    pub host_id: String,
    pub host_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub booking_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_message: Option<Message>,
    pub unread_count: u32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// 建立對話所需的欄位
#[derive(Debug, Clone, PartialEq)]
pub struct NewConversation {
    pub property_id: String,
    pub property_title: String,
    pub property_image: String,
    pub guest_id: String,
    pub guest_name: String,
    pub host_id: String,
    pub host_name: String,
    pub booking_id: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PropertyType {
    House,
    Apartment,
    Condo,
    Villa,
    Cabin,
    Cottage,
    Loft,
    Other,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    pub address: String,
    pub city: String,
    pub state: String,
    pub country: String,
    pub zip_code: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pricing {
    pub base_price: f64,
    pub currency: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cleaning_fee: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyDetails {
    pub bedrooms: u32,
    pub bathrooms: u32,
    pub max_guests: u32,
    pub property_type: PropertyType,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Property {
    pub id: String,
    pub title: String,
    pub description: String,
    pub location: Location,
    pub pricing: Pricing,
    pub details: PropertyDetails,
    pub amenities: Vec<String>,
    pub images: Vec<String>,
    pub host_id: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Property {
    /// 訂房紀錄使用的地點字串，例如 `New York, NY`
    pub fn location_label(&self) -> String {
        format!("{}, {}", self.location.city, self.location.state)
    }

    pub fn primary_image(&self) -> &str {
        self.images.first().map(String::as_str).unwrap_or_default()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthenticatedUser {
    pub id: String,
    pub email: String,
    pub name: String,
    pub role: Role,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_booking_status_wire_format() {
        let json = serde_json::to_string(&BookingStatus::Cancelled).unwrap();
        assert_eq!(json, "\"cancelled\"");
        assert_eq!("Confirmed".parse::<BookingStatus>(), Ok(BookingStatus::Confirmed));
        assert!("archived".parse::<BookingStatus>().is_err());
    }

    #[test]
    fn test_conversation_omits_absent_optionals() {
        let now = Utc::now();
        let conversation = Conversation {
            id: "c1".to_string(),
            property_id: "1".to_string(),
            property_title: "Cozy Downtown Apartment".to_string(),
            property_image: String::new(),
            guest_id: "1".to_string(),
            guest_name: "John Doe".to_string(),
            host_id: "2".to_string(),
            host_name: "Jane Smith".to_string(),
            booking_id: None,
            last_message: None,
            unread_count: 0,
            created_at: now,
            updated_at: now,
        };

        let value = serde_json::to_value(&conversation).unwrap();
        assert!(value.get("bookingId").is_none());
        assert!(value.get("lastMessage").is_none());
        assert_eq!(value["unreadCount"], 0);
        assert_eq!(value["guestId"], "1");
    }

    #[test]
    fn test_booking_dates_serialize_as_calendar_days() {
        let now = Utc::now();
        let booking = Booking {
            id: "booking_1_abc".to_string(),
            property_id: "1".to_string(),
            property_title: "t".to_string(),
            property_image: "i".to_string(),
            property_location: "l".to_string(),
            guest_id: "user@example.com".to_string(),
            guest_name: "John Doe".to_string(),
            guest_email: "user@example.com".to_string(),
            check_in_date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            check_out_date: NaiveDate::from_ymd_opt(2024, 3, 4).unwrap(),
            guest_count: 2,
            nights: 3,
            base_price: 450.0,
            cleaning_fee: 25.0,
            total_price: 475.0,
            status: BookingStatus::Confirmed,
            created_at: now,
            updated_at: now,
        };

        let value = serde_json::to_value(&booking).unwrap();
        assert_eq!(value["checkInDate"], "2024-03-01");
        assert_eq!(value["checkOutDate"], "2024-03-04");
        assert_eq!(value["status"], "confirmed");
    }
}
