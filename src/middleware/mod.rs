pub mod cookies;
pub mod flash;
pub mod session;
