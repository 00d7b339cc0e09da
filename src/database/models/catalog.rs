entity! {
    Category => "categories" {
        name: String,
    }
}

entity! {
    Product => "products" {
        category_id: i64,
        name: String,
        description: String,
        price: f64,
        discount_price: f64,
        stock: i64,
        image_url: String,
    }
}

entity! {
    Review => "reviews" {
        user_id: i64,
        product_id: i64,
        rating: i64,
        comment: String,
    }
}
