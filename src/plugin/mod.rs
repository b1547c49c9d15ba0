//! Host-facing plugin surface: JSON-RPC envelope and result items

pub mod result;
pub mod rpc;

pub use result::{ResultItem, RpcAction};
pub use rpc::{PluginHandler, RpcRequest, RpcResponse};
