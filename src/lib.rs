//! momo-ledger - a durable, credential-guarded HTTP store for mobile-money
//! transaction records
//!
//! Layers, leaves first:
//! - [`record`]: the transaction value type and its field rules
//! - [`persistence`]: whole-set load/save to a JSON file
//! - [`store`]: id assignment, keyed lookup, range listing, write-through
//! - [`auth`]: pluggable credential verification
//! - [`http_server`]: the REST surface
//! - [`cli`]: config loading and process lifecycle

pub mod auth;
pub mod cli;
pub mod http_server;
pub mod observability;
pub mod persistence;
pub mod record;
pub mod store;
