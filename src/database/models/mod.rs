//! Table models. Each one is declared through [`entity!`], which derives the
//! row mapping and the [`Entity`](crate::database::entity::Entity) descriptor
//! from a single field list.

macro_rules! entity {
    (
        $(#[$meta:meta])*
        $name:ident => $table:literal {
            $( $field:ident : $ty:ty ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize, sqlx::FromRow)]
        #[serde(default)]
        pub struct $name {
            pub id: i64,
            $( pub $field: $ty, )*
            #[serde(flatten)]
            #[sqlx(flatten)]
            pub audit: $crate::database::entity::Audit,
        }

        impl $crate::database::entity::Entity for $name {
            const TABLE: &'static str = $table;
            const FIELDS: &'static [&'static str] = &[$( stringify!($field) ),*];

            fn id(&self) -> i64 {
                self.id
            }

            fn set_id(&mut self, id: i64) {
                self.id = id;
            }

            fn audit(&self) -> &$crate::database::entity::Audit {
                &self.audit
            }

            fn audit_mut(&mut self) -> &mut $crate::database::entity::Audit {
                &mut self.audit
            }

            fn field_values(&self) -> Vec<$crate::filter::SqlValue> {
                vec![$( $crate::filter::SqlValue::from(self.$field.clone()) ),*]
            }
        }
    };
}

pub mod catalog;
pub mod location;
pub mod order;
pub mod user;

pub use catalog::{Category, Product, Review};
pub use location::Location;
pub use order::{Cart, Order, OrderItem, Payment, Refund};
pub use user::{Otp, Role, User};
