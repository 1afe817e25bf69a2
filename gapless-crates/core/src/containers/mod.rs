//! Index-keyed containers used throughout the engine.
mod key_value_heap;
mod keyed_vec;

use fnv::FnvBuildHasher;
pub use key_value_heap::KeyValueHeap;
pub use keyed_vec::KeyedVec;
pub use keyed_vec::StorageKey;

/// [`std::collections::HashMap`] with the FNV hasher, which is faster for the small keys used
/// here.
pub type HashMap<K, V, Hasher = FnvBuildHasher> = std::collections::HashMap<K, V, Hasher>;
