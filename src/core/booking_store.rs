use crate::core::collection::Collection;
use crate::core::pricing::{is_valid_date_range, parse_date_input, price_for_range};
use crate::domain::model::{AuthenticatedUser, Booking, BookingRequest, BookingStatus, Property};
use crate::domain::ports::Storage;
use crate::utils::error::{Result, StayError};
use crate::utils::ids::generate_booking_id;
use crate::utils::validation::validate_range;
use chrono::{NaiveDate, Utc};

pub struct BookingStore<S: Storage> {
    bookings: Collection<S, Booking>,
}

impl<S: Storage> BookingStore<S> {
    pub fn new(storage: S) -> Self {
        Self {
            bookings: Collection::new(storage),
        }
    }

    /// 新增訂房；相同 id 已存在時回傳 `DuplicateId`
    pub async fn save(&self, booking: &Booking) -> Result<()> {
        self.bookings
            .insert(booking)
            .await
            .inspect_err(|e| tracing::error!("Failed to save booking {}: {}", booking.id, e))
    }

    pub async fn list_all(&self) -> Result<Vec<Booking>> {
        self.bookings
            .all()
            .await
            .inspect_err(|e| tracing::error!("Failed to retrieve bookings: {}", e))
    }

    pub async fn list_by_guest(&self, guest_id: &str) -> Result<Vec<Booking>> {
        self.bookings
            .filter(|booking| booking.guest_id == guest_id)
            .await
            .inspect_err(|e| tracing::error!("Failed to retrieve bookings for {}: {}", guest_id, e))
    }

    pub async fn get_by_id(&self, booking_id: &str) -> Result<Option<Booking>> {
        self.bookings
            .get(booking_id)
            .await
            .inspect_err(|e| tracing::error!("Failed to retrieve booking {}: {}", booking_id, e))
    }

    /// 找不到時回傳 `Ok(false)`
    pub async fn update_status(&self, booking_id: &str, status: BookingStatus) -> Result<bool> {
        let Some(mut booking) = self.get_by_id(booking_id).await? else {
            return Ok(false);
        };

        booking.status = status;
        booking.updated_at = Utc::now();

        self.bookings
            .put(&booking)
            .await
            .inspect_err(|e| tracing::error!("Failed to update booking {}: {}", booking_id, e))?;

        tracing::info!("Booking {} is now {}", booking_id, status);
        Ok(true)
    }

    /// 回傳是否真的刪除；重複呼叫回傳 `Ok(false)`
    pub async fn delete(&self, booking_id: &str) -> Result<bool> {
        self.bookings
            .remove(booking_id)
            .await
            .inspect_err(|e| tracing::error!("Failed to delete booking {}: {}", booking_id, e))
    }

    /// 確認訂房：驗證日期與人數、計價、產生 id，狀態設為 `confirmed` 後儲存
    pub async fn create_booking(
        &self,
        request: &BookingRequest,
        property: &Property,
        guest: &AuthenticatedUser,
        today: NaiveDate,
    ) -> Result<Booking> {
        if request.property_id != property.id {
            return Err(StayError::ValidationError {
                message: format!(
                    "booking request is for property {} but {} was given",
                    request.property_id, property.id
                ),
            });
        }

        if !is_valid_date_range(&request.check_in_date, &request.check_out_date, today) {
            return Err(StayError::ValidationError {
                message: format!(
                    "invalid stay {} -> {}: check-in must not be in the past and check-out must follow check-in",
                    request.check_in_date, request.check_out_date
                ),
            });
        }

        validate_range(
            "guest_count",
            request.guest_count,
            1,
            property.details.max_guests,
        )?;

        let check_in = parse_date_input(&request.check_in_date)?;
        let check_out = parse_date_input(&request.check_out_date)?;
        let calculation = price_for_range(
            check_in,
            check_out,
            property.pricing.base_price,
            property.pricing.cleaning_fee.unwrap_or(0.0),
        );

        let now = Utc::now();
        let booking = Booking {
            id: generate_booking_id(),
            property_id: property.id.clone(),
            property_title: property.title.clone(),
            property_image: property.primary_image().to_string(),
            property_location: property.location_label(),
            // 訂房以 email 作為房客 id
            guest_id: guest.email.clone(),
            guest_name: guest.name.clone(),
            guest_email: guest.email.clone(),
            check_in_date: check_in.date_naive(),
            check_out_date: check_out.date_naive(),
            guest_count: request.guest_count,
            nights: calculation.nights,
            base_price: calculation.base_price,
            cleaning_fee: calculation.cleaning_fee,
            total_price: calculation.total,
            status: BookingStatus::Confirmed,
            created_at: now,
            updated_at: now,
        };

        self.save(&booking).await?;
        tracing::info!(
            "Booked {} for {} ({} nights, total {})",
            property.title,
            guest.email,
            booking.nights,
            booking.total_price
        );
        Ok(booking)
    }

    pub async fn export_json(&self) -> Result<String> {
        self.bookings.export_json().await
    }

    pub async fn import_json(&self, json: &str) -> Result<usize> {
        self.bookings.import_json(json).await
    }
}
