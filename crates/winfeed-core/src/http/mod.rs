//! Minimal HTTP/1.1 server for the latest frame and its viewer page.
//!
//! One request per connection: the handler reads the request head, answers
//! with either the current frame or the control page, and closes. Request
//! bodies, keep-alive, and chunked encoding are not supported.

pub mod errors;
pub mod handler;
pub mod page;
pub mod request;
pub mod response;
pub mod server;
pub mod types;

pub use errors::{RequestError, ServerError};
pub use handler::{dispatch, handle_connection};
pub use page::ControlPage;
pub use request::{RequestHead, read_request_head};
pub use response::Response;
pub use server::HttpServer;
pub use types::ServeContext;
