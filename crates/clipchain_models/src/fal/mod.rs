//! fal.ai text-to-video queue.

mod client;
mod dto;

pub use client::FalVideoClient;
pub use dto::{
    FalFile, FalQueueStatus, FalQueueSubmission, FalSubmitRequest, FalVideoResult,
    parse_validation_details,
};
