//! The booking transaction coordinator.
//!
//! Creating a booking is an ordered pipeline of validations and external
//! calls: resolve the viewer, snapshot the listing, check the dates
//! against its calendar, charge the tenant, then persist the booking and
//! its three ledger updates. The steps run strictly in order, each at
//! most once, and any failure aborts the remainder.

use std::sync::Arc;

use chrono::Utc;

use roost_shared::types::BookingId;

use super::error::BookingError;
use super::store::BookingStore;
use super::types::{Booking, CreateBookingInput, Viewer};
use crate::calendar::{day_span, nights};
use crate::payment::{ChargeRequest, PaymentGateway, platform_fee};

/// Coordinates the booking-creation workflow.
pub struct BookingService<S: BookingStore, P: PaymentGateway> {
    store: Arc<S>,
    payments: Arc<P>,
    fee_basis_points: u32,
}

impl<S: BookingStore, P: PaymentGateway> BookingService<S, P> {
    /// Creates a new booking service.
    #[must_use]
    pub fn new(store: Arc<S>, payments: Arc<P>, fee_basis_points: u32) -> Self {
        Self {
            store,
            payments,
            fee_basis_points,
        }
    }

    /// Creates a booking for the viewer against the given listing.
    ///
    /// The pipeline, in order: viewer check, listing fetch, self-booking
    /// check, date-range validation, calendar conflict check against the
    /// listing snapshot, price calculation, host payability check,
    /// payment charge, booking insert, host income increment, tenant
    /// booking append, and finally the listing calendar commit. The
    /// commit is conditional on the calendar version read with the
    /// snapshot; a concurrent booking of the same listing fails it with
    /// `ConcurrentModification`.
    ///
    /// There is no compensation: a failure after the charge (a store
    /// error or a version conflict) leaves the charge in place with no
    /// booking recorded, and no refund is attempted.
    pub async fn create_booking(
        &self,
        viewer: Option<Viewer>,
        input: CreateBookingInput,
    ) -> Result<Booking, BookingError> {
        // 1. A logged-in viewer must be making the request.
        let viewer = viewer.ok_or(BookingError::Unauthenticated)?;

        // 2. Snapshot the listing being booked.
        let listing = self
            .store
            .find_listing(input.listing_id)
            .await?
            .ok_or(BookingError::ListingNotFound(input.listing_id))?;

        // 3. A host cannot book their own listing.
        if listing.host == viewer.id {
            return Err(BookingError::SelfBookingForbidden);
        }

        // 4. Check-out must not precede check-in.
        if input.check_out < input.check_in {
            return Err(BookingError::InvalidDateRange {
                check_in: input.check_in,
                check_out: input.check_out,
            });
        }

        // 5. Mark the stay's days against the snapshot calendar.
        let days = day_span(input.check_in, input.check_out);
        let calendar = listing.calendar.with_days(&days)?;

        // 6. Total price: nightly price times the inclusive day count.
        let total = listing.price.times(nights(input.check_in, input.check_out));

        // 7. The host must exist and be able to receive payouts.
        let host = self
            .store
            .find_user(listing.host)
            .await?
            .ok_or(BookingError::HostNotPayable(listing.host))?;
        let Some(wallet_id) = host.wallet_id.clone() else {
            return Err(BookingError::HostNotPayable(listing.host));
        };

        // 8. Charge the tenant's payment source on behalf of the host.
        let fee = platform_fee(total, self.fee_basis_points);
        self.payments
            .charge(ChargeRequest {
                amount: total,
                source: input.source,
                destination: wallet_id,
                application_fee: fee,
            })
            .await?;

        // 9. Insert the booking document.
        let booking = self
            .store
            .insert_booking(Booking {
                id: BookingId::new(),
                listing: listing.id,
                tenant: viewer.id,
                check_in: input.check_in,
                check_out: input.check_out,
                created_at: Utc::now(),
            })
            .await?;

        // 10. Credit the host's income.
        self.store.add_income(host.id, total).await?;

        // 11. Record the booking on the tenant.
        self.store.push_tenant_booking(viewer.id, booking.id).await?;

        // 12. Commit the updated calendar and booking to the listing,
        // conditional on the version read in step 2.
        self.store
            .commit_listing_booking(listing.id, listing.calendar_version, calendar, booking.id)
            .await?;

        // 13. Hand the inserted booking back.
        Ok(booking)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;

    use chrono::NaiveDate;

    use roost_shared::types::{Currency, ListingId, Money, PageRequest, UserId};

    use crate::booking::store::StoreError;
    use crate::booking::types::{Listing, ListingType, ListingsPage, ListingsSort, User};
    use crate::calendar::{BookingCalendar, CalendarError, DayKey};
    use crate::payment::{ChargeReceipt, PaymentError};

    /// One observable side effect, in the order it happened.
    #[derive(Debug, Clone, PartialEq, Eq)]
    enum Effect {
        Charge {
            amount: i64,
            fee: i64,
            destination: String,
        },
        InsertBooking,
        AddIncome {
            amount: i64,
        },
        PushTenantBooking,
        CommitListing {
            expected_version: u64,
        },
    }

    type EffectLog = Arc<Mutex<Vec<Effect>>>;

    /// Recording store fake shared with the gateway fake through one log.
    struct RecordingStore {
        listings: Mutex<HashMap<ListingId, Listing>>,
        users: Mutex<HashMap<UserId, User>>,
        log: EffectLog,
        insert_fails: bool,
        commit_conflicts: bool,
    }

    impl RecordingStore {
        fn new(log: EffectLog) -> Self {
            Self {
                listings: Mutex::new(HashMap::new()),
                users: Mutex::new(HashMap::new()),
                log,
                insert_fails: false,
                commit_conflicts: false,
            }
        }

        fn add_listing(&self, listing: Listing) {
            self.listings.lock().unwrap().insert(listing.id, listing);
        }

        fn add_user(&self, user: User) {
            self.users.lock().unwrap().insert(user.id, user);
        }
    }

    impl BookingStore for RecordingStore {
        async fn find_listing(&self, id: ListingId) -> Result<Option<Listing>, StoreError> {
            Ok(self.listings.lock().unwrap().get(&id).cloned())
        }

        async fn find_user(&self, id: UserId) -> Result<Option<User>, StoreError> {
            Ok(self.users.lock().unwrap().get(&id).cloned())
        }

        async fn find_user_by_token(&self, token: &str) -> Result<Option<User>, StoreError> {
            Ok(self
                .users
                .lock()
                .unwrap()
                .values()
                .find(|u| u.token == token)
                .cloned())
        }

        async fn insert_booking(&self, booking: Booking) -> Result<Booking, StoreError> {
            if self.insert_fails {
                return Err(StoreError::Backend("insert failed".into()));
            }
            self.log.lock().unwrap().push(Effect::InsertBooking);
            Ok(booking)
        }

        async fn add_income(&self, _user: UserId, amount: Money) -> Result<(), StoreError> {
            self.log.lock().unwrap().push(Effect::AddIncome {
                amount: amount.minor,
            });
            Ok(())
        }

        async fn push_tenant_booking(
            &self,
            _user: UserId,
            _booking: BookingId,
        ) -> Result<(), StoreError> {
            self.log.lock().unwrap().push(Effect::PushTenantBooking);
            Ok(())
        }

        async fn commit_listing_booking(
            &self,
            _listing: ListingId,
            expected_version: u64,
            _calendar: BookingCalendar,
            _booking: BookingId,
        ) -> Result<(), StoreError> {
            if self.commit_conflicts {
                return Err(StoreError::VersionConflict {
                    expected: expected_version,
                    actual: expected_version + 1,
                });
            }
            self.log
                .lock()
                .unwrap()
                .push(Effect::CommitListing { expected_version });
            Ok(())
        }

        async fn list_listings(
            &self,
            _sort: Option<ListingsSort>,
            _page: PageRequest,
        ) -> Result<ListingsPage, StoreError> {
            Ok(ListingsPage {
                total: 0,
                result: vec![],
            })
        }

        async fn find_bookings(&self, _ids: &[BookingId]) -> Result<Vec<Booking>, StoreError> {
            Ok(vec![])
        }
    }

    struct RecordingGateway {
        log: EffectLog,
        declines: bool,
    }

    impl PaymentGateway for RecordingGateway {
        async fn charge(&self, request: ChargeRequest) -> Result<ChargeReceipt, PaymentError> {
            if self.declines {
                return Err(PaymentError::Declined("card declined".into()));
            }
            self.log.lock().unwrap().push(Effect::Charge {
                amount: request.amount.minor,
                fee: request.application_fee.minor,
                destination: request.destination,
            });
            Ok(ChargeReceipt {
                charge_id: "ch_test".into(),
                amount: request.amount,
            })
        }
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn make_user(wallet: Option<&str>) -> User {
        User {
            id: UserId::new(),
            token: "token".into(),
            name: "Test User".into(),
            avatar: "https://example.com/avatar.png".into(),
            contact: "user@example.com".into(),
            wallet_id: wallet.map(Into::into),
            income: Money::zero(Currency::Usd),
            bookings: vec![],
            listings: vec![],
        }
    }

    fn make_listing(host: UserId, price_minor: i64) -> Listing {
        Listing {
            id: ListingId::new(),
            host,
            title: "Cozy cabin".into(),
            description: "A cabin in the woods".into(),
            image: "https://example.com/cabin.png".into(),
            listing_type: ListingType::House,
            address: "1 Forest Way".into(),
            city: "Asheville".into(),
            admin: "North Carolina".into(),
            country: "United States".into(),
            price: Money::new(price_minor, Currency::Usd),
            num_of_guests: 4,
            calendar: BookingCalendar::new(),
            calendar_version: 0,
            bookings: vec![],
        }
    }

    struct Fixture {
        service: BookingService<RecordingStore, RecordingGateway>,
        log: EffectLog,
        listing: Listing,
        tenant: User,
        host: User,
    }

    fn fixture() -> Fixture {
        fixture_with(|_, _| {})
    }

    fn fixture_with(tweak: impl FnOnce(&mut RecordingStore, &mut RecordingGateway)) -> Fixture {
        let log: EffectLog = Arc::new(Mutex::new(Vec::new()));
        let mut store = RecordingStore::new(Arc::clone(&log));
        let mut gateway = RecordingGateway {
            log: Arc::clone(&log),
            declines: false,
        };
        tweak(&mut store, &mut gateway);

        let host = make_user(Some("acct_host"));
        let tenant = make_user(None);
        let listing = make_listing(host.id, 100);
        store.add_user(host.clone());
        store.add_user(tenant.clone());
        store.add_listing(listing.clone());

        Fixture {
            service: BookingService::new(Arc::new(store), Arc::new(gateway), 500),
            log,
            listing,
            tenant,
            host,
        }
    }

    fn input(listing: ListingId, check_in: NaiveDate, check_out: NaiveDate) -> CreateBookingInput {
        CreateBookingInput {
            listing_id: listing,
            source: "tok_visa".into(),
            check_in,
            check_out,
        }
    }

    #[tokio::test]
    async fn test_successful_booking_runs_all_effects_in_order() {
        let fx = fixture();

        let booking = fx
            .service
            .create_booking(
                Some(fx.tenant.as_viewer()),
                input(fx.listing.id, date(2024, 1, 1), date(2024, 1, 3)),
            )
            .await
            .unwrap();

        assert_eq!(booking.listing, fx.listing.id);
        assert_eq!(booking.tenant, fx.tenant.id);
        assert_eq!(booking.check_in, date(2024, 1, 1));
        assert_eq!(booking.check_out, date(2024, 1, 3));

        // price 100 x 3 inclusive days = 300, fee = round(300 * 0.05) = 15
        let effects = fx.log.lock().unwrap().clone();
        assert_eq!(
            effects,
            vec![
                Effect::Charge {
                    amount: 300,
                    fee: 15,
                    destination: "acct_host".into(),
                },
                Effect::InsertBooking,
                Effect::AddIncome { amount: 300 },
                Effect::PushTenantBooking,
                Effect::CommitListing {
                    expected_version: 0,
                },
            ]
        );
    }

    #[tokio::test]
    async fn test_same_day_stay_charges_one_night() {
        let fx = fixture();

        fx.service
            .create_booking(
                Some(fx.tenant.as_viewer()),
                input(fx.listing.id, date(2024, 1, 1), date(2024, 1, 1)),
            )
            .await
            .unwrap();

        let effects = fx.log.lock().unwrap().clone();
        assert!(matches!(
            effects.first(),
            Some(Effect::Charge { amount: 100, fee: 5, .. })
        ));
    }

    #[tokio::test]
    async fn test_missing_viewer_is_unauthenticated() {
        let fx = fixture();

        let result = fx
            .service
            .create_booking(None, input(fx.listing.id, date(2024, 1, 1), date(2024, 1, 3)))
            .await;

        assert!(matches!(result, Err(BookingError::Unauthenticated)));
        assert!(fx.log.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_unknown_listing_is_not_found() {
        let fx = fixture();

        let result = fx
            .service
            .create_booking(
                Some(fx.tenant.as_viewer()),
                input(ListingId::new(), date(2024, 1, 1), date(2024, 1, 3)),
            )
            .await;

        assert!(matches!(result, Err(BookingError::ListingNotFound(_))));
        assert!(fx.log.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_host_cannot_book_own_listing() {
        let fx = fixture();

        let result = fx
            .service
            .create_booking(
                Some(fx.host.as_viewer()),
                input(fx.listing.id, date(2024, 1, 1), date(2024, 1, 3)),
            )
            .await;

        assert!(matches!(result, Err(BookingError::SelfBookingForbidden)));
        assert!(fx.log.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_check_out_before_check_in_is_rejected() {
        let fx = fixture();

        let result = fx
            .service
            .create_booking(
                Some(fx.tenant.as_viewer()),
                input(fx.listing.id, date(2024, 1, 3), date(2024, 1, 1)),
            )
            .await;

        assert!(matches!(result, Err(BookingError::InvalidDateRange { .. })));
        assert!(fx.log.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_overlapping_range_conflicts_without_charging() {
        let fx = fixture();
        // Re-seed the listing with 2024-01-02 already booked.
        let mut listing = fx.listing.clone();
        listing.calendar = [DayKey {
            year: 2024,
            month: 0,
            day: 2,
        }]
        .into_iter()
        .collect();
        fx.service.store.add_listing(listing);

        let result = fx
            .service
            .create_booking(
                Some(fx.tenant.as_viewer()),
                input(fx.listing.id, date(2024, 1, 1), date(2024, 1, 3)),
            )
            .await;

        assert!(matches!(
            result,
            Err(BookingError::DateConflict(CalendarError::DateConflict(
                DayKey {
                    year: 2024,
                    month: 0,
                    day: 2
                }
            )))
        ));
        assert!(fx.log.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_host_without_wallet_is_not_payable() {
        let fx = fixture();
        let mut host = fx.host.clone();
        host.wallet_id = None;
        fx.service.store.add_user(host);

        let result = fx
            .service
            .create_booking(
                Some(fx.tenant.as_viewer()),
                input(fx.listing.id, date(2024, 1, 1), date(2024, 1, 3)),
            )
            .await;

        assert!(matches!(result, Err(BookingError::HostNotPayable(_))));
        assert!(fx.log.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_declined_charge_aborts_before_any_write() {
        let fx = fixture_with(|_, gateway| {
            gateway.declines = true;
        });

        let result = fx
            .service
            .create_booking(
                Some(fx.tenant.as_viewer()),
                input(fx.listing.id, date(2024, 1, 1), date(2024, 1, 3)),
            )
            .await;

        assert!(matches!(
            result,
            Err(BookingError::PaymentFailed(PaymentError::Declined(_)))
        ));
        assert!(fx.log.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_insert_failure_after_charge_leaves_charge_in_place() {
        let fx = fixture_with(|store, _| {
            store.insert_fails = true;
        });

        let result = fx
            .service
            .create_booking(
                Some(fx.tenant.as_viewer()),
                input(fx.listing.id, date(2024, 1, 1), date(2024, 1, 3)),
            )
            .await;

        assert!(matches!(result, Err(BookingError::Store(_))));
        // The charge happened; nothing after it did. No compensation.
        let effects = fx.log.lock().unwrap().clone();
        assert_eq!(effects.len(), 1);
        assert!(matches!(effects[0], Effect::Charge { .. }));
    }

    #[tokio::test]
    async fn test_version_conflict_surfaces_as_concurrent_modification() {
        let fx = fixture_with(|store, _| {
            store.commit_conflicts = true;
        });

        let result = fx
            .service
            .create_booking(
                Some(fx.tenant.as_viewer()),
                input(fx.listing.id, date(2024, 1, 1), date(2024, 1, 3)),
            )
            .await;

        assert!(matches!(result, Err(BookingError::ConcurrentModification)));
        // Everything up to the commit ran; the commit itself did not land.
        let effects = fx.log.lock().unwrap().clone();
        assert_eq!(effects.len(), 4);
        assert!(matches!(effects[0], Effect::Charge { .. }));
        assert!(!effects.iter().any(|e| matches!(e, Effect::CommitListing { .. })));
    }
}
