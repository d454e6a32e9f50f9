//! Record types shared by the synthesis integration tests

use chrono::{DateTime, TimeZone, Utc};

sqlmocker_core::record! {
    #[derive(Debug, Clone)]
    pub struct Hotel {
        pub ID: i64,
        pub Name: String,
        pub City: String,
        pub Rating: f64,
        pub PricePerNight: f64,
        pub Description: String,
        pub Facilities: String,
        pub ContactEmail: String,
        pub Phone: String,
        pub Website: String,
        pub CreatedAt: DateTime<Utc>,
    }
}

#[allow(clippy::too_many_arguments)]
fn hotel(
    id: i64,
    name: &str,
    city: &str,
    rating: f64,
    price: f64,
    description: &str,
    facilities: &str,
    slug: &str,
    phone: &str,
    created_at: DateTime<Utc>,
) -> Hotel {
    Hotel {
        ID: id,
        Name: name.to_string(),
        City: city.to_string(),
        Rating: rating,
        PricePerNight: price,
        Description: description.to_string(),
        Facilities: facilities.to_string(),
        ContactEmail: format!("info@{}.com", slug),
        Phone: phone.to_string(),
        Website: format!("https://www.{}.com", slug),
        CreatedAt: created_at,
    }
}

/// A handful of hotels with varied ratings and timestamps
pub fn hotels() -> Vec<Hotel> {
    vec![
        hotel(1, "Luxury Resort", "Miami", 4.5, 250.0, "A luxurious beachside resort",
            "Pool, Spa, Private Beach", "luxuryresort", "+1-123-456-7890",
            Utc.with_ymd_and_hms(2025, 3, 14, 9, 23, 45).unwrap()),
        hotel(2, "Cozy Inn", "New York", 3.8, 120.0, "A charming inn in the heart of the city",
            "Free Wi-Fi, Breakfast, Lounge", "cozyinn", "+1-987-654-3210",
            Utc.with_ymd_and_hms(1984, 7, 9, 9, 12, 32).unwrap()),
        hotel(3, "Seaside Lodge", "Los Angeles", 4.2, 180.0, "A cozy lodge with ocean views",
            "Ocean View, Fireplace, Restaurant", "seasidelodge", "+1-555-123-4567",
            Utc.with_ymd_and_hms(2012, 2, 27, 9, 56, 8).unwrap()),
        hotel(4, "Mountain Retreat", "Denver", 4.0, 150.0, "A retreat in the mountains",
            "Hiking Trails, Spa, Scenic Views", "mountainretreat", "+1-888-567-8901",
            Utc.with_ymd_and_hms(2001, 11, 2, 9, 34, 17).unwrap()),
        hotel(5, "Urban Hotel", "Chicago", 3.7, 200.0, "A modern hotel in the city center",
            "Fitness Center, Rooftop Bar", "urbanhotel", "+1-333-456-7890",
            Utc.with_ymd_and_hms(1993, 10, 15, 10, 42, 19).unwrap()),
    ]
}

sqlmocker_core::record! {
    #[derive(Debug, Clone)]
    pub struct Listing {
        pub ID: i64,
        pub Name: String,
        pub Rating: f64,
        pub CreatedAt: DateTime<Utc>,
    }
}
