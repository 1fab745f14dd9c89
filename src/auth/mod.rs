//! Registration, login, and bearer-token identity resolution.

pub mod flow;
pub mod password;
pub mod token;

pub use flow::{AuthFlow, LoginOutcome, RegisterOutcome};
pub use token::TokenCodec;
