pub mod assets;
pub mod digest;
pub mod nonces;
pub mod transfer;
