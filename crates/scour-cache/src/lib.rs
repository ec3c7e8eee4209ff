mod dedup;
mod result_cache;
mod semantic;
mod ttl;
mod url_cache;

pub use dedup::{LinkDedup, QueryDedup};
pub use result_cache::{ResultCache, ResultCacheStats};
pub use semantic::SemanticCache;
pub use ttl::{CacheStats, EvictionPolicy, TtlCache};
pub use url_cache::UrlCache;
