pub mod encrypt;
pub mod jwt;
