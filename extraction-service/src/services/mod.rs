pub mod classifier;
pub mod mime;
pub mod providers;
pub mod validation;

pub use classifier::{classify, Classification};
pub use mime::{file_extension, resolve_mime};
pub use validation::{validate, FileRejection, MAX_FILE_SIZE_BYTES};
