//! API middleware components

pub mod logging;
pub mod panic;
pub mod request_scope;

pub use logging::logging_middleware;
pub use panic::handle_panic;
pub use request_scope::{REQUEST_ID_HEADER, RequestScope};
