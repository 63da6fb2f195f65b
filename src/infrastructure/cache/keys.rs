//! Canonical cache key construction.
//!
//! Every cache key in the system is produced by [`cache_key`]. Population,
//! invalidation, warm-up, and tests all derive keys through this one
//! function, so the singular and collection key families can never drift
//! apart between code paths.

/// Cached resource families.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    User,
    Passenger,
}

impl Resource {
    pub fn as_str(&self) -> &'static str {
        match self {
            Resource::User => "user",
            Resource::Passenger => "passenger",
        }
    }
}

impl std::fmt::Display for Resource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Builds the canonical cache key for a resource.
///
/// - `cache_key(Resource::User, Some(5))` -> `"user_5"`
/// - `cache_key(Resource::User, None)` -> `"user_list"`
///
/// Pure and deterministic; identical inputs always yield the identical
/// string.
pub fn cache_key(resource: Resource, id: Option<i64>) -> String {
    match id {
        Some(id) => format!("{}_{}", resource.as_str(), id),
        None => format!("{}_list", resource.as_str()),
    }
}
