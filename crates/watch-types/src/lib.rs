pub mod conversation;
pub mod config;
pub mod error;
pub mod state;

#[cfg(test)]
mod tests;

pub use error::WatchError;
pub type Result<T> = std::result::Result<T, WatchError>;
