//! # Services Module
//!
//! Network access: the resource clients, the transports they run on and
//! the dispatcher that runs operations in the background.

pub mod dispatcher;
pub mod http;
pub mod memory;

pub use dispatcher::{Operation, OperationDispatcher, OperationOutcome};
pub use http::{
    ApiEndpoint, ApiRequest, ApiResponse, HttpMethod, HttpTransport, ReqwestTransport,
    ResourceClient,
};
pub use memory::{BackendMode, MemoryBackend};
