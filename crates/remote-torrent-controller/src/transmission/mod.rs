//! Transmission backend.

mod adapter;
mod transport;

pub use adapter::TransmissionAdapter;
#[cfg(test)]
pub(crate) use transport::MockTransmissionRpc;
pub use transport::{
    RpcMethod, RpcRequest, RpcResponse, SESSION_ID_HEADER, TransmissionRpc, TransmissionTransport,
};
