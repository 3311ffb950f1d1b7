pub mod extraction;

pub use extraction::{DocumentMetadata, ErrorCode, ExtractionResponse, UploadedDocument};
