// Service exports
pub mod cache;
pub mod memory;
pub mod postgres;
pub mod profile_search;
pub mod store;

pub use cache::{CacheError, CacheKey, CacheManager};
pub use memory::InMemoryUserStore;
pub use postgres::PostgresUserStore;
pub use profile_search::{ProfileSearchError, ProfileSearchProvider, SerpApiClient};
pub use store::{StoreError, UserStore};
