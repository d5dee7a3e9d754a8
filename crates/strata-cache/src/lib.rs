//! Recency-ordered containers: a hashed doubly linked key list and the LRU cache built on it.

mod lru;
mod ordered_index;

pub use lru::{LruCache, PutResult};
pub use ordered_index::{Iter, OrderedKeyIndex};
