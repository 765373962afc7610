pub mod order;
pub mod payment;
pub mod product;
pub mod subscriber;
pub mod tenant;
pub mod user;

pub use order::{Order, OrderItem, OrderStatus};
pub use payment::{Payment, PaymentStatus};
pub use product::Product;
pub use subscriber::Subscriber;
pub use tenant::Tenant;
pub use user::{Role, User};
