pub mod auth;
pub mod booking_store;
pub mod catalog;
pub mod collection;
pub mod message_store;
pub mod pricing;

pub use crate::domain::model::{Booking, BookingCalculation, Conversation, Message, Property};
pub use crate::domain::ports::{Entity, Storage};
pub use crate::utils::error::Result;
