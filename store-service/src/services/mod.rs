pub mod database;
pub mod jwt;

pub use database::Database;
pub use jwt::JwtService;
