use std::sync::Arc;

use crate::database::manager::DatabaseManager;
use crate::database::models::{
    Cart, Category, Location, Order, OrderItem, Otp, Payment, Product, Refund, Review, Role, User,
};
use crate::database::repository::{Repository, SqlRepository};

/// One repository per table, shared by the usecases.
#[derive(Clone)]
pub struct Domains {
    pub users: Arc<dyn Repository<User>>,
    pub role: Arc<dyn Repository<Role>>,
    pub location: Arc<dyn Repository<Location>>,
    pub categories: Arc<dyn Repository<Category>>,
    pub products: Arc<dyn Repository<Product>>,
    pub cart: Arc<dyn Repository<Cart>>,
    pub orders: Arc<dyn Repository<Order>>,
    pub order_items: Arc<dyn Repository<OrderItem>>,
    pub payments: Arc<dyn Repository<Payment>>,
    pub refund: Arc<dyn Repository<Refund>>,
    pub reviews: Arc<dyn Repository<Review>>,
    pub otp: Arc<dyn Repository<Otp>>,
}

impl Domains {
    pub fn new(db: &DatabaseManager) -> Self {
        Self {
            users: Arc::new(SqlRepository::<User>::new(db.clone())),
            role: Arc::new(SqlRepository::<Role>::new(db.clone())),
            location: Arc::new(SqlRepository::<Location>::new(db.clone())),
            categories: Arc::new(SqlRepository::<Category>::new(db.clone())),
            products: Arc::new(SqlRepository::<Product>::new(db.clone())),
            cart: Arc::new(SqlRepository::<Cart>::new(db.clone())),
            orders: Arc::new(SqlRepository::<Order>::new(db.clone())),
            order_items: Arc::new(SqlRepository::<OrderItem>::new(db.clone())),
            payments: Arc::new(SqlRepository::<Payment>::new(db.clone())),
            refund: Arc::new(SqlRepository::<Refund>::new(db.clone())),
            reviews: Arc::new(SqlRepository::<Review>::new(db.clone())),
            otp: Arc::new(SqlRepository::<Otp>::new(db.clone())),
        }
    }
}
