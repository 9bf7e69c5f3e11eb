//! Data types for S3 buckets, objects, and batch transfers.

mod bucket_info;
mod delete_summary;
mod transfer;

pub use bucket_info::BucketInfo;
pub use delete_summary::{ChunkDeletion, DeleteSummary};
pub use transfer::TransferPair;
