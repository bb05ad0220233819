//! HTTP/JSON adapter for the people and transactions gateway.
//!
//! Provides the reqwest-backed implementation of the `LedgerGateway` port.

mod dto;
mod http_gateway;

pub use http_gateway::HttpLedgerGateway;
