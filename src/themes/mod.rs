pub mod document;
pub mod interface;
pub mod service;
pub mod store;
pub mod validator;

#[cfg(test)]
mod tests;

pub use interface::{FileType, StorageError, Theme, ThemeDocument, ThemeError, ThemeStore};
pub use service::ThemeRepository;
pub use store::{JsonFileStore, MemoryStore};
pub use validator::{invalid_codes, is_valid_code, normalize_code};
