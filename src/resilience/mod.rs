//! Resilience helpers.
//!
//! Every RPC call has a deadline (see `blockchain::client`). Receipt polling
//! spaces its attempts with `backoff.rs` so a slow chain is not hammered.

pub mod backoff;
