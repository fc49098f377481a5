//! Query layer: free async functions over the pool, one module per entity
//! cluster. Raw SQL with positional binds; multi-statement writes run in a
//! single transaction.

pub mod academic;
pub mod account;
pub mod council;
pub mod score;
pub mod thesis;
