pub mod auth;
pub mod filter;
pub mod links;
pub mod plan;
pub mod schools;
