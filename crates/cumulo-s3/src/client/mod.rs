//! S3 client construction and configuration.
//!
//! This module provides the client interface for S3 operations,
//! encapsulating credential resolution, region selection, and bucket
//! verification.

mod s3_client;
mod s3_config;

pub use s3_client::S3Client;
pub use s3_config::S3Config;
