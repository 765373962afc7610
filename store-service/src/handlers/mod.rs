pub mod auth;
pub mod debug;
pub mod orders;
pub mod payments;
pub mod products;
pub mod subscribe;
pub mod tenants;
pub mod users;
