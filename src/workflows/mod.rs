//! Operation workflows
//!
//! Free async functions generic over the API and signer traits. Each
//! workflow awaits its steps strictly in sequence: every step's output (a
//! hash, an address, a balance) feeds the next.

pub mod balance;
pub mod deposit;
pub mod registration;
pub mod trading;
pub mod transfer;
pub mod withdrawal;
