use async_trait::async_trait;
use serde_json::Value;

use crate::error::Result;
use crate::operation::Operation;
use crate::params::RequestParams;

/// Remote procedure invoker.
///
/// Sends one operation with its parameters and hands back the raw JSON body. Envelope
/// unwrapping happens above this layer, in [`crate::responses`].
#[async_trait]
pub trait RemoteInvoker: Send + Sync {
    /// Invoke `operation` once. Implementations never retry.
    async fn invoke(&self, operation: Operation, params: &RequestParams) -> Result<Value>;
}
