use std::sync::Arc;

use crate::config::{ApiConfig, JwtConfig};
use crate::database::models::{
    Cart, Category, Location, Order, OrderItem, Otp, Payment, Product, Refund, Review, Role, User,
};
use crate::database::{Domains, Repository};
use crate::services::Usecases;
use crate::testing::{MemoryRepository, TEST_KEY};

pub fn jwt_config() -> JwtConfig {
    JwtConfig {
        token_key: TEST_KEY.to_string(),
        dashboard_expiry_minutes: 60,
    }
}

pub fn api_config() -> ApiConfig {
    ApiConfig {
        port: 0,
        default_page_size: 10,
        enable_request_logging: false,
    }
}

/// Role 1 is `admin`, role 2 is `staff`.
pub async fn seed_roles(roles: &MemoryRepository<Role>) {
    for name in ["admin", "staff"] {
        roles
            .create(Role { name: name.into(), ..Default::default() })
            .await
            .unwrap();
    }
}

/// `a@x`/`pw` is an admin, `b@x`/`pw2` is staff.
pub async fn seed_users(users: &MemoryRepository<User>) {
    let accounts = [("alice", "a@x", "pw", 1), ("bob", "b@x", "pw2", 2)];
    for (username, email, password, role_id) in accounts {
        users
            .create(User {
                username: username.into(),
                email: email.into(),
                password: password.into(),
                role_id,
                is_active: 1,
                ..Default::default()
            })
            .await
            .unwrap();
    }
}

/// Anchor at (-6.2, 106.8), 50 m radius, secret `s1`.
pub async fn seed_location(locations: &MemoryRepository<Location>) {
    locations
        .create(Location {
            lat: "-6.2".into(),
            long: "106.8".into(),
            distance: 50,
            secret: "s1".into(),
            ..Default::default()
        })
        .await
        .unwrap();
}

/// Seeded in-memory domains plus the usecases wired over them.
pub async fn usecases() -> (Domains, Usecases) {
    let users = Arc::new(MemoryRepository::<User>::new());
    let roles = Arc::new(MemoryRepository::<Role>::new());
    let location = Arc::new(MemoryRepository::<Location>::new());
    seed_users(&users).await;
    seed_roles(&roles).await;
    seed_location(&location).await;

    let domains = Domains {
        users,
        role: roles,
        location,
        categories: Arc::new(MemoryRepository::<Category>::new()),
        products: Arc::new(MemoryRepository::<Product>::new()),
        cart: Arc::new(MemoryRepository::<Cart>::new()),
        orders: Arc::new(MemoryRepository::<Order>::new()),
        order_items: Arc::new(MemoryRepository::<OrderItem>::new()),
        payments: Arc::new(MemoryRepository::<Payment>::new()),
        refund: Arc::new(MemoryRepository::<Refund>::new()),
        reviews: Arc::new(MemoryRepository::<Review>::new()),
        otp: Arc::new(MemoryRepository::<Otp>::new()),
    };
    let usecases = Usecases::new(&domains, &jwt_config());
    (domains, usecases)
}
