//! Test helpers.

use std::sync::Arc;

use rust_decimal::Decimal;
use salvo::{affix_state::inject, prelude::*};
use uuid::Uuid;

use shopease::{
    cart::{CartSummary, MemoryCartStore, ShoppingCart},
    products::ProductSnapshot,
};
use shopease_app::{
    auth::{Identity, MockSessionProvider, Role, UserUuid},
    context::AppContext,
    domain::{
        carts::MockCartsService, catalog::MockCatalogService, orders::MockOrdersService,
        reviews::MockReviewsService,
    },
};

use crate::{extensions::*, state::State};

pub(crate) const TEST_USER_UUID: UserUuid = UserUuid::from_uuid(Uuid::nil());

pub(crate) fn test_identity(role: Role) -> Identity {
    Identity {
        user_id: TEST_USER_UUID,
        email: "zainab@example.pk".to_string(),
        name: "Zainab".to_string(),
        role,
    }
}

#[salvo::handler]
pub(crate) async fn inject_customer(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    depot.insert_identity(test_identity(Role::Customer));
    ctrl.call_next(req, depot, res).await;
}

#[salvo::handler]
pub(crate) async fn inject_admin(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    let mut admin = test_identity(Role::Admin);
    admin.user_id = UserUuid::new();

    depot.insert_identity(admin);
    ctrl.call_next(req, depot, res).await;
}

/// Builds an [`AppContext`] from mocks; services left unset fail any call.
#[derive(Debug)]
pub(crate) struct TestState {
    catalog: MockCatalogService,
    carts: MockCartsService,
    orders: MockOrdersService,
    reviews: MockReviewsService,
    sessions: MockSessionProvider,
}

impl TestState {
    pub(crate) fn new() -> Self {
        Self {
            catalog: MockCatalogService::new(),
            carts: MockCartsService::new(),
            orders: MockOrdersService::new(),
            reviews: MockReviewsService::new(),
            sessions: MockSessionProvider::new(),
        }
    }

    pub(crate) fn catalog(mut self, catalog: MockCatalogService) -> Self {
        self.catalog = catalog;
        self
    }

    pub(crate) fn carts(mut self, carts: MockCartsService) -> Self {
        self.carts = carts;
        self
    }

    pub(crate) fn orders(mut self, orders: MockOrdersService) -> Self {
        self.orders = orders;
        self
    }

    pub(crate) fn reviews(mut self, reviews: MockReviewsService) -> Self {
        self.reviews = reviews;
        self
    }

    pub(crate) fn sessions(mut self, sessions: MockSessionProvider) -> Self {
        self.sessions = sessions;
        self
    }

    pub(crate) fn build(self) -> Arc<State> {
        State::from_app_context(AppContext {
            catalog: Arc::new(self.catalog),
            carts: Arc::new(self.carts),
            orders: Arc::new(self.orders),
            reviews: Arc::new(self.reviews),
            sessions: Arc::new(self.sessions),
        })
    }
}

/// Route served to an anonymous caller.
pub(crate) fn anonymous_service(state: TestState, route: Router) -> Service {
    Service::new(Router::new().hoop(inject(state.build())).push(route))
}

/// Route served to a signed-in customer ([`TEST_USER_UUID`]).
pub(crate) fn customer_service(state: TestState, route: Router) -> Service {
    Service::new(
        Router::new()
            .hoop(inject(state.build()))
            .hoop(inject_customer)
            .push(route),
    )
}

/// Route served to a signed-in admin.
pub(crate) fn admin_service(state: TestState, route: Router) -> Service {
    Service::new(
        Router::new()
            .hoop(inject(state.build()))
            .hoop(inject_admin)
            .push(route),
    )
}

pub(crate) fn make_product(id: &str) -> ProductSnapshot {
    ProductSnapshot::new(id, "Lawn Suit", Decimal::from(2_400)).with_discount(Decimal::TEN)
}

/// A priced cart holding `quantity` of [`make_product`].
pub(crate) async fn make_summary(product: &str, quantity: i64) -> CartSummary {
    let mut cart = ShoppingCart::new("cart:test", MemoryCartStore::new());

    if quantity > 0 {
        let _outcome = cart.add_item(make_product(product), quantity).await;
    }

    cart.summary()
}
