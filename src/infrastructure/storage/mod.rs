//! Object storage implementations.

pub mod s3_storage;

pub use s3_storage::S3ObjectStorage;
