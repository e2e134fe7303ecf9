//! Demo data for local development.

use roost_core::booking::types::{Listing, ListingType, User};
use roost_core::calendar::BookingCalendar;
use roost_shared::types::{Currency, ListingId, Money, UserId};
use tracing::info;

use crate::store::MemoryStore;

fn demo_user(token: &str, name: &str, contact: &str, wallet: Option<&str>) -> User {
    User {
        id: UserId::new(),
        token: token.to_string(),
        name: name.to_string(),
        avatar: format!("https://avatars.example.com/{token}.png"),
        contact: contact.to_string(),
        wallet_id: wallet.map(ToString::to_string),
        income: Money::zero(Currency::Usd),
        bookings: vec![],
        listings: vec![],
    }
}

#[allow(clippy::too_many_arguments)]
fn demo_listing(
    host: UserId,
    title: &str,
    description: &str,
    listing_type: ListingType,
    address: &str,
    city: &str,
    admin: &str,
    country: &str,
    price_minor: i64,
    num_of_guests: u32,
) -> Listing {
    Listing {
        id: ListingId::new(),
        host,
        title: title.to_string(),
        description: description.to_string(),
        image: format!(
            "https://images.example.com/{}.jpg",
            title.to_lowercase().replace(' ', "-")
        ),
        listing_type,
        address: address.to_string(),
        city: city.to_string(),
        admin: admin.to_string(),
        country: country.to_string(),
        price: Money::new(price_minor, Currency::Usd),
        num_of_guests,
        calendar: BookingCalendar::new(),
        calendar_version: 0,
        bookings: vec![],
    }
}

/// Seeds the store with demo hosts, a tenant, and their listings.
///
/// The fixed tokens (`host-anna`, `host-ben`, `tenant-cleo`) make it easy
/// to exercise the API by hand.
pub fn seed(store: &MemoryStore) {
    let mut anna = demo_user(
        "host-anna",
        "Anna Hart",
        "anna@example.com",
        Some("acct_anna"),
    );
    let mut ben = demo_user("host-ben", "Ben Okafor", "ben@example.com", Some("acct_ben"));
    let cleo = demo_user("tenant-cleo", "Cleo Marsh", "cleo@example.com", None);

    let listings = vec![
        demo_listing(
            anna.id,
            "Harbourside Loft",
            "Bright loft a short walk from the ferry terminal.",
            ListingType::Apartment,
            "18 Quay Street",
            "Halifax",
            "Nova Scotia",
            "Canada",
            12_500,
            2,
        ),
        demo_listing(
            anna.id,
            "Orchard Cottage",
            "Two-bedroom cottage at the edge of a working orchard.",
            ListingType::House,
            "4 Blossom Lane",
            "Kelowna",
            "British Columbia",
            "Canada",
            18_900,
            5,
        ),
        demo_listing(
            ben.id,
            "Canal View Studio",
            "Compact studio overlooking the old canal ring.",
            ListingType::Apartment,
            "77 Brouwersgracht",
            "Amsterdam",
            "North Holland",
            "Netherlands",
            9_900,
            2,
        ),
        demo_listing(
            ben.id,
            "Juniper Farmhouse",
            "Restored farmhouse with a wood stove and mountain views.",
            ListingType::House,
            "2 Juniper Trail",
            "Bozeman",
            "Montana",
            "United States",
            24_000,
            6,
        ),
    ];

    for listing in &listings {
        if listing.host == anna.id {
            anna.listings.push(listing.id);
        } else {
            ben.listings.push(listing.id);
        }
    }

    store.upsert_user(anna);
    store.upsert_user(ben);
    store.upsert_user(cleo);
    for listing in listings {
        store.upsert_listing(listing);
    }

    info!(
        listings = store.listing_count(),
        users = store.user_count(),
        "Seeded demo data"
    );
}
