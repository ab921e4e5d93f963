//! Engine crate: the service object tying store, model, and ranking
//! together behind the four boundary operations.

pub mod error;
pub mod responses;
pub mod service;

pub use error::{EngineError, ErrorPayload, Result};
pub use responses::{RatingAck, RetrainReport};
pub use service::EngineService;
