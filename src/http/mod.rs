//! The resilient request pipeline: dispatch, retry, and normalization.

mod dispatch;
mod normalize;
mod retry;

pub use dispatch::{Dispatch, Dispatcher, RawFailure, RawResponse, RequestDescriptor};
pub use normalize::{Envelope, PaginationInfo, classify_failure, normalize, normalize_response};
pub use retry::{RetryPolicy, execute};
