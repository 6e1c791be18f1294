//! Tool system: catalog, reply parsing, argument binding and invocation.

pub mod binder;
pub mod catalog;
pub mod constants;
pub mod descriptor;
pub mod invoker;
pub mod parser;

use crate::error::TransportError;
use async_trait::async_trait;

/// The external process exposing callable tools.
///
/// Any backend that can list tools and call one by name is interchangeable.
#[async_trait]
pub trait ToolHost: Send + Sync {
    /// Enumerates the tools the host offers, in discovery order.
    ///
    /// # Errors
    ///
    /// Returns an error if the request cannot complete.
    async fn list_tools(&self) -> Result<Vec<ToolSpec>, TransportError>;

    /// Invokes a named tool with bound arguments.
    ///
    /// # Errors
    ///
    /// Returns an error only when the call itself fails; tool-level failures
    /// are reported inside the result.
    async fn call_tool(
        &self,
        name: &str,
        arguments: &BoundArguments,
    ) -> Result<ToolCallResult, TransportError>;
}

pub use binder::ArgumentBinder;
pub use catalog::ToolCatalog;
pub use descriptor::{
    BoundArguments, ContentItem, ParamType, ToolCallResult, ToolDescriptor, ToolParameter,
    ToolSpec,
};
pub use invoker::ToolInvoker;
pub use parser::{FunctionCall, ParsedResponse, ResponseParser};
