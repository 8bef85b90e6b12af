//! Types shared between the `rubrika` server, its database layer
//! and any API clients (e.g. the end-to-end test utilities).

pub mod api_models;
pub mod ids;
