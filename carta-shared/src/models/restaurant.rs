/// Restaurant row, consumed for ownership checks
///
/// The admin API only ever reads restaurants to decide whether a user may be
/// deleted: a user who owns at least one restaurant is never deleted. The
/// fields mirror the columns the ownership query selects.
use serde::{Deserialize, Serialize};

/// A restaurant owned by some user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Restaurant {
    /// Row identifier
    pub id: String,

    /// Display name shown to operators
    pub name: String,

    /// Custom domain, if the restaurant has one configured
    #[serde(default)]
    pub domain: Option<String>,

    /// URL slug, always present for restaurants without a custom domain
    #[serde(default)]
    pub slug: Option<String>,
}

impl Restaurant {
    /// The address a restaurant is reachable under: its custom domain when
    /// configured, otherwise its slug.
    pub fn domain_or_slug(&self) -> Option<&str> {
        self.domain.as_deref().or(self.slug.as_deref())
    }
}
