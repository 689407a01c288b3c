mod hash_route;

pub use hash_route::{read_hash, use_hash_route};
