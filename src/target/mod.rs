//! Proxy target lifecycle and the interception fast path.

mod proxy;

pub use proxy::ProxyTarget;
