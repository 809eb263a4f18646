use crate::domain::model::{Location, Pricing, Property, PropertyDetails, PropertyType};
use crate::utils::error::{Result, StayError};
use crate::utils::validation::{validate_non_empty_string, Validate};
use chrono::{DateTime, TimeZone, Utc};
use std::collections::BTreeMap;
use std::sync::OnceLock;

pub const PROPERTY_TYPES: [(PropertyType, &str); 8] = [
    (PropertyType::House, "House"),
    (PropertyType::Apartment, "Apartment"),
    (PropertyType::Condo, "Condo"),
    (PropertyType::Villa, "Villa"),
    (PropertyType::Cabin, "Cabin"),
    (PropertyType::Cottage, "Cottage"),
    (PropertyType::Loft, "Loft"),
    (PropertyType::Other, "Other"),
];

pub const COMMON_AMENITIES: [&str; 15] = [
    "WiFi",
    "Kitchen",
    "Washing machine",
    "Air conditioning",
    "Heating",
    "TV",
    "Hot tub",
    "Pool",
    "Gym",
    "Parking",
    "Balcony",
    "Garden",
    "Fireplace",
    "BBQ grill",
    "Pets allowed",
];

impl PropertyType {
    pub fn label(&self) -> &'static str {
        PROPERTY_TYPES
            .iter()
            .find(|(kind, _)| kind == self)
            .map(|(_, label)| *label)
            .unwrap_or("Other")
    }
}

fn listed_on(year: i32, month: u32, day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, 0, 0, 0)
        .single()
        .unwrap_or_default()
}

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

struct Listing<'a> {
    id: &'a str,
    title: &'a str,
    description: &'a str,
    location: [&'a str; 5],
    base_price: f64,
    cleaning_fee: f64,
    rooms: (u32, u32, u32),
    property_type: PropertyType,
    amenities: &'a [&'a str],
    images: &'a [&'a str],
    listed: (i32, u32, u32),
}

impl Listing<'_> {
    fn into_property(self) -> Property {
        let [address, city, state, country, zip_code] = self.location;
        let listed = listed_on(self.listed.0, self.listed.1, self.listed.2);
        Property {
            id: self.id.to_string(),
            title: self.title.to_string(),
            description: self.description.to_string(),
            location: Location {
                address: address.to_string(),
                city: city.to_string(),
                state: state.to_string(),
                country: country.to_string(),
                zip_code: zip_code.to_string(),
            },
            pricing: Pricing {
                base_price: self.base_price,
                currency: "USD".to_string(),
                cleaning_fee: Some(self.cleaning_fee),
            },
            details: PropertyDetails {
                bedrooms: self.rooms.0,
                bathrooms: self.rooms.1,
                max_guests: self.rooms.2,
                property_type: self.property_type,
            },
            amenities: strings(self.amenities),
            images: strings(self.images),
            host_id: "2".to_string(),
            created_at: listed,
            updated_at: listed,
        }
    }
}

fn build_catalog() -> Vec<Property> {
    vec![
        Listing {
            id: "1",
            title: "Cozy Downtown Apartment",
            description: "Beautiful 2-bedroom apartment in the heart of downtown. Walking distance to restaurants, shops, and public transportation. Perfect for business travelers or vacation stays.",
            location: ["123 Main Street", "New York", "NY", "United States", "10001"],
            base_price: 150.0,
            cleaning_fee: 25.0,
            rooms: (2, 1, 4),
            property_type: PropertyType::Apartment,
            amenities: &["WiFi", "Kitchen", "Air conditioning", "TV", "Heating"],
            images: &[
                "https://images.unsplash.com/photo-1522708323590-d24dbb6b0267?w=800&q=80",
                "https://images.unsplash.com/photo-1560448204-e02f11c3d0e2?w=800&q=80",
                "https://images.unsplash.com/photo-1586023492125-27b2c045efd7?w=800&q=80",
            ],
            listed: (2024, 1, 15),
        },
        Listing {
            id: "2",
            title: "Luxury Oceanview Villa",
            description: "Stunning 4-bedroom villa with panoramic ocean views. Private pool, large deck, and direct beach access. The perfect retreat for families or groups looking for luxury and privacy.",
            location: ["456 Ocean Drive", "Miami", "FL", "United States", "33139"],
            base_price: 450.0,
            cleaning_fee: 75.0,
            rooms: (4, 3, 8),
            property_type: PropertyType::Villa,
            amenities: &[
                "WiFi", "Kitchen", "Pool", "Air conditioning", "TV", "Balcony", "BBQ grill", "Parking",
            ],
            images: &[
                "https://images.unsplash.com/photo-1613490493576-7fde63acd811?w=800&q=80",
                "https://images.unsplash.com/photo-1512917774080-9991f1c4c750?w=800&q=80",
                "https://images.unsplash.com/photo-1571896349842-33c89424de2d?w=800&q=80",
            ],
            listed: (2024, 1, 10),
        },
        Listing {
            id: "3",
            title: "Rustic Mountain Cabin",
            description: "Charming 3-bedroom log cabin nestled in the mountains. Fireplace, hot tub, and breathtaking views. Perfect for a peaceful getaway from city life.",
            location: ["789 Pine Ridge Road", "Aspen", "CO", "United States", "81611"],
            base_price: 275.0,
            cleaning_fee: 50.0,
            rooms: (3, 2, 6),
            property_type: PropertyType::Cabin,
            amenities: &["WiFi", "Kitchen", "Fireplace", "Hot tub", "Heating", "TV", "Parking"],
            images: &[
                "https://images.unsplash.com/photo-1449824913935-59a10b8d2000?w=800&q=80",
                "https://images.unsplash.com/photo-1518780664697-55e3ad937233?w=800&q=80",
                "https://images.unsplash.com/photo-1441974231531-c6227db76b6e?w=800&q=80",
            ],
            listed: (2024, 1, 5),
        },
        Listing {
            id: "4",
            title: "Modern City Loft",
            description: "Stylish industrial loft in trendy neighborhood. High ceilings, exposed brick, and modern amenities. Close to art galleries, cafes, and nightlife.",
            location: ["321 Industrial Blvd", "San Francisco", "CA", "United States", "94107"],
            base_price: 200.0,
            cleaning_fee: 35.0,
            rooms: (1, 1, 2),
            property_type: PropertyType::Loft,
            amenities: &["WiFi", "Kitchen", "Air conditioning", "TV", "Gym", "Parking"],
            images: &[
                "https://images.unsplash.com/photo-1502672260266-1c1ef2d93688?w=800&q=80",
                "https://images.unsplash.com/photo-1493809842364-78817add7ffb?w=800&q=80",
                "https://images.unsplash.com/photo-1524813686514-a57563d77965?w=800&q=80",
            ],
            listed: (2024, 1, 20),
        },
        Listing {
            id: "5",
            title: "Charming Countryside Cottage",
            description: "Quaint 2-bedroom cottage surrounded by rolling hills and gardens. Perfect for a romantic getaway or peaceful retreat. Farm-to-table breakfast available.",
            location: ["567 Country Lane", "Napa", "CA", "United States", "94558"],
            base_price: 185.0,
            cleaning_fee: 30.0,
            rooms: (2, 1, 4),
            property_type: PropertyType::Cottage,
            amenities: &["WiFi", "Kitchen", "Garden", "Fireplace", "Heating", "TV"],
            images: &[
                "https://images.unsplash.com/photo-1551033406-611cf9a28f67?w=800&q=80",
                "https://images.unsplash.com/photo-1505142468610-359e7d316be0?w=800&q=80",
                "https://images.unsplash.com/photo-1597047084993-bf337f6e3fbc?w=800&q=80",
            ],
            listed: (2024, 1, 12),
        },
    ]
    .into_iter()
    .map(Listing::into_property)
    .collect()
}

/// 固定的房源目錄
pub fn properties() -> &'static [Property] {
    static CATALOG: OnceLock<Vec<Property>> = OnceLock::new();
    CATALOG.get_or_init(build_catalog)
}

pub fn property_by_id(id: &str) -> Option<&'static Property> {
    properties().iter().find(|property| property.id == id)
}

pub fn properties_by_host(host_id: &str) -> Vec<&'static Property> {
    properties()
        .iter()
        .filter(|property| property.host_id == host_id)
        .collect()
}

/// 「新增房源」表單內容，欄位皆為原始字串
#[derive(Debug, Clone, Default)]
pub struct ListingDraft {
    pub title: String,
    pub description: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub country: String,
    pub zip_code: String,
    pub base_price: String,
    pub property_type: Option<PropertyType>,
    pub amenities: Vec<String>,
}

impl ListingDraft {
    /// 加入或移除一項設施
    pub fn toggle_amenity(&mut self, amenity: &str) {
        if let Some(pos) = self.amenities.iter().position(|a| a == amenity) {
            self.amenities.remove(pos);
        } else {
            self.amenities.push(amenity.to_string());
        }
    }

    pub fn field_errors(&self) -> BTreeMap<&'static str, String> {
        let mut errors = BTreeMap::new();

        let required = [
            ("title", &self.title, "Title is required"),
            ("description", &self.description, "Description is required"),
            ("address", &self.address, "Address is required"),
            ("city", &self.city, "City is required"),
            ("country", &self.country, "Country is required"),
        ];
        for (field, value, message) in required {
            if validate_non_empty_string(field, value).is_err() {
                errors.insert(field, message.to_string());
            }
        }

        // 整個欄位必須是數字，"120 USD" 這類帶單位的輸入不接受
        let price_ok = self
            .base_price
            .trim()
            .parse::<f64>()
            .map(|price| price.is_finite() && price > 0.0)
            .unwrap_or(false);
        if !price_ok {
            errors.insert("basePrice", "Base price must be greater than 0".to_string());
        }

        errors
    }
}

impl Validate for ListingDraft {
    fn validate(&self) -> Result<()> {
        let errors = self.field_errors();
        if errors.is_empty() {
            return Ok(());
        }
        Err(StayError::ValidationError {
            message: errors.into_values().collect::<Vec<_>>().join("; "),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_has_five_properties_hosted_by_demo_host() {
        assert_eq!(properties().len(), 5);
        assert_eq!(properties_by_host("2").len(), 5);
        assert!(properties_by_host("1").is_empty());
    }

    #[test]
    fn test_property_by_id() {
        let apartment = property_by_id("1").unwrap();
        assert_eq!(apartment.title, "Cozy Downtown Apartment");
        assert_eq!(apartment.pricing.base_price, 150.0);
        assert_eq!(apartment.pricing.cleaning_fee, Some(25.0));
        assert_eq!(apartment.details.max_guests, 4);
        assert_eq!(apartment.location_label(), "New York, NY");
        assert!(property_by_id("99").is_none());
    }

    #[test]
    fn test_property_type_labels() {
        assert_eq!(PropertyType::Villa.label(), "Villa");
        assert_eq!(property_by_id("4").unwrap().details.property_type.label(), "Loft");
    }

    #[test]
    fn test_listing_draft_reports_every_missing_field() {
        let draft = ListingDraft {
            title: "  ".to_string(),
            base_price: "0".to_string(),
            ..Default::default()
        };

        let errors = draft.field_errors();
        assert_eq!(errors.len(), 6);
        assert_eq!(errors["title"], "Title is required");
        assert_eq!(errors["basePrice"], "Base price must be greater than 0");
        assert!(draft.validate().is_err());
    }

    #[test]
    fn test_valid_listing_draft() {
        let mut draft = ListingDraft {
            title: "Lake House".to_string(),
            description: "Quiet place by the lake".to_string(),
            address: "1 Shore Rd".to_string(),
            city: "Tahoe".to_string(),
            country: "United States".to_string(),
            base_price: "220".to_string(),
            ..Default::default()
        };
        draft.toggle_amenity("WiFi");
        draft.toggle_amenity("Pool");
        draft.toggle_amenity("WiFi");

        assert!(draft.validate().is_ok());
        assert_eq!(draft.amenities, vec!["Pool".to_string()]);
    }

    #[test]
    fn test_base_price_must_be_a_finite_number() {
        for price in ["inf", "NaN", "-5", "120 USD", ""] {
            let draft = ListingDraft {
                base_price: price.to_string(),
                ..Default::default()
            };
            assert!(draft.field_errors().contains_key("basePrice"), "{}", price);
        }

        let draft = ListingDraft {
            base_price: " 99.5 ".to_string(),
            ..Default::default()
        };
        assert!(!draft.field_errors().contains_key("basePrice"));
    }
}
