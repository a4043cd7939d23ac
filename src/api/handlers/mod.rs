//! API handlers and shared helpers for Monujo.
//!
//! This module organizes the service's route handlers and the common pieces
//! they share: validation, password hashing, session storage, and handler
//! state.

pub mod health;
pub use self::health::health;

pub mod register;
pub use self::register::register;

pub mod login;
pub use self::login::login;

pub mod session;
pub use self::session::{logout, session};

pub mod password;
pub mod state;
pub mod storage;
pub mod types;
pub mod utils;
