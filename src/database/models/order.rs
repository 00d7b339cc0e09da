entity! {
    Cart => "cart" {
        user_id: i64,
        product_id: i64,
        quantity: i64,
    }
}

entity! {
    Order => "orders" {
        user_id: i64,
        total_price: f64,
        status: String,
    }
}

entity! {
    OrderItem => "order_items" {
        order_id: i64,
        product_id: i64,
        quantity: i64,
        price: f64,
    }
}

entity! {
    Payment => "payments" {
        order_id: i64,
        payment_method: String,
        payment_status: String,
        transaction_id: String,
    }
}

entity! {
    Refund => "refund" {
        user_id: i64,
        order_id: i64,
        reason: String,
    }
}
