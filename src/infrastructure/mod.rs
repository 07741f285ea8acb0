//! Compute > Infrastructure area of the console.

pub mod resource_pool;
