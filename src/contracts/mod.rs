//! Contract bindings for the Immutable X on-chain surface

pub mod core;
pub mod erc20;
pub mod erc721;
pub mod registration;

pub use self::core::*;
pub use self::erc20::*;
pub use self::erc721::*;
pub use self::registration::*;
