entity! {
    /// Dashboard and storefront account. `password` is compared verbatim.
    User => "users" {
        username: String,
        email: String,
        password: String,
        pincode: String,
        role_id: i64,
        is_active: i64,
    }
}

entity! {
    Role => "role" {
        name: String,
    }
}

entity! {
    /// One-time code issued to a user.
    Otp => "otp" {
        user_id: i64,
        code: String,
    }
}
