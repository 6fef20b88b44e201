//! Publish invocation for the Nitro fusion workflow.
//!
//! Builds the `fusion publish` argument list from step configuration,
//! executes the provisioned tool with a scoped credential, and interprets
//! the captured output into a [`PublishResult`].

pub mod invoke;
pub mod request;

pub use invoke::{PublishResult, extract_schema_id, invoke};
pub use request::PublishRequest;
