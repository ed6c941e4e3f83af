//! Storage module for photo objects
//!
//! Provides a MinIO/S3-compatible client for photo uploads, deletion,
//! and presigned URL generation.

mod minio_client;

pub use minio_client::{ObjectVisibility, StorageClient};
