//! Tower middleware for [`crate::HttpTransport`].
//!
//! - [`LoggingLayer`] - logs each exchange using `tracing`
//!
//! Any other `tower::Layer` over [`crate::BoxedService`] can be installed with
//! [`crate::HttpTransportBuilder::layer`]. The request types assume each exchange reaches the
//! server at most once, so retrying layers do not belong here.

mod logging;

pub use logging::{LogLevel, Logging, LoggingLayer};

pub use tower::{Layer, ServiceBuilder};
