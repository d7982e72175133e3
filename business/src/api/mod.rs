//! Typed access to the resource backend.

mod client;
mod envelope;

pub use client::{AUTHENTICATE_PATH, ApiClient};
pub use envelope::{
    AuthTokens, Envelope, EnvelopeData, ErrorDetails, OperationSummary, PageData, Pageable,
    decode_as, decode_data,
};
