//! Test helpers.

use std::sync::Arc;

use jiff::Timestamp;
use salvo::{affix_state::inject, prelude::*};
use uuid::Uuid;

use kusuri_app::{
    auth::MockAuthService,
    context::AppContext,
    domain::{
        contact::MockContactService,
        feedback::MockFeedbackService,
        orders::MockOrdersService,
        products::MockProductsService,
        users::{Requester, Role, UserRecord, UserUuid},
    },
};

use crate::state::{NotificationChannel, State};

pub(crate) const CUSTOMER_UUID: UserUuid =
    UserUuid::from_uuid(Uuid::from_u128(0x0000_0000_0000_7000_8000_0000_0000_0001));

pub(crate) const ADMIN_UUID: UserUuid =
    UserUuid::from_uuid(Uuid::from_u128(0x0000_0000_0000_7000_8000_0000_0000_00ad));

/// One mock per service. Any call without an expectation fails the test.
#[derive(Default)]
pub(crate) struct Mocks {
    pub products: MockProductsService,
    pub orders: MockOrdersService,
    pub feedback: MockFeedbackService,
    pub contact: MockContactService,
    pub auth: MockAuthService,
}

impl Mocks {
    fn into_state(self) -> Arc<State> {
        State::shared(
            AppContext {
                products: Arc::new(self.products),
                orders: Arc::new(self.orders),
                feedback: Arc::new(self.feedback),
                contact: Arc::new(self.contact),
                auth: Arc::new(self.auth),
            },
            NotificationChannel::Log,
        )
    }
}

pub(crate) fn customer() -> Requester {
    Requester {
        uuid: CUSTOMER_UUID,
        name: "Asha Rao".to_string(),
        email: "asha@example.com".to_string(),
        phone: "9876543210".to_string(),
        role: Role::Customer,
    }
}

pub(crate) fn admin() -> Requester {
    Requester {
        uuid: ADMIN_UUID,
        name: "Store Admin".to_string(),
        email: "admin@example.com".to_string(),
        phone: "9000000000".to_string(),
        role: Role::Admin,
    }
}

fn record(requester: Requester) -> UserRecord {
    UserRecord {
        uuid: requester.uuid,
        name: requester.name,
        email: requester.email,
        phone: requester.phone,
        role: requester.role,
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
    }
}

pub(crate) fn customer_record() -> UserRecord {
    record(customer())
}

pub(crate) fn admin_record() -> UserRecord {
    record(admin())
}

/// Serve `route` with the mocked services and no signed-in user.
pub(crate) fn service(mocks: Mocks, route: Router) -> Service {
    Service::new(Router::new().hoop(inject(mocks.into_state())).push(route))
}

/// Serve `route` as if the auth middleware had resolved `requester`.
pub(crate) fn as_requester(requester: Requester, mocks: Mocks, route: Router) -> Service {
    Service::new(
        Router::new()
            .hoop(inject(mocks.into_state()))
            .hoop(inject(requester))
            .push(route),
    )
}
