//! Identifiers.
//!
//! Players are keyed by random UUIDs. Matches are keyed by a digest of when
//! they were played and who played, so submitting the same match twice
//! yields the same ID.

use std::fmt;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use uuid::Uuid;

/// Hex characters kept from a match digest.
const DIGEST_LEN: usize = 16;

/// Opaque string identifier shared by players and matches.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityId(String);

impl EntityId {
    pub fn random() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Content-derived ID: a truncated SHA-256 over `parts`, each part
    /// NUL-terminated so `["ab", "c"]` and `["a", "bc"]` differ.
    pub fn digest<'a, I>(parts: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let hasher = parts
            .into_iter()
            .fold(Sha256::new(), |h, part| h.chain_update(part).chain_update([0u8]));
        let mut id = hex::encode(hasher.finalize());
        id.truncate(DIGEST_LEN);
        Self(id)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for EntityId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<&str> for EntityId {
    fn from(id: &str) -> Self {
        Self(id.to_owned())
    }
}

pub type PlayerId = EntityId;
pub type MatchId = EntityId;

/// Order-independent key for a doubles pairing: the two IDs sorted and
/// joined with `-`.
pub fn team_key(a: &PlayerId, b: &PlayerId) -> String {
    let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
    format!("{}-{}", lo, hi)
}

#[cfg(test)]
mod tests {
    use super::*;

    const PLAYED_AT: &str = "2025-06-15T10:00:00.000Z";

    #[test]
    fn test_digest_is_stable() {
        let first = EntityId::digest([PLAYED_AT, "larry", "zach", "dustin", "phil"]);
        let again = EntityId::digest([PLAYED_AT, "larry", "zach", "dustin", "phil"]);

        assert_eq!(first, again);
        assert_eq!(first.as_str().len(), 16);
        assert!(first.as_str().chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_digest_depends_on_slot_order() {
        let a = EntityId::digest([PLAYED_AT, "larry", "zach", "dustin", "phil"]);
        let b = EntityId::digest([PLAYED_AT, "larry", "zach", "phil", "dustin"]);
        assert_ne!(a, b);
    }

    #[test]
    fn test_digest_separates_parts() {
        assert_ne!(EntityId::digest(["ab", "c"]), EntityId::digest(["a", "bc"]));
    }

    #[test]
    fn test_random_ids_differ() {
        let id = EntityId::random();
        assert_ne!(id, EntityId::random());
        assert!(Uuid::parse_str(id.as_str()).is_ok());
    }

    #[test]
    fn test_serializes_as_bare_string() {
        let id = EntityId::from("player-1");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"player-1\"");
        assert_eq!(serde_json::from_str::<EntityId>("\"player-1\"").unwrap(), id);
        assert_eq!(id.to_string(), "player-1");
    }

    #[test]
    fn test_team_key_ignores_order() {
        let jill = EntityId::from("jill");
        let joseph = EntityId::from("joseph");

        assert_eq!(team_key(&jill, &joseph), "jill-joseph");
        assert_eq!(team_key(&joseph, &jill), "jill-joseph");
    }
}
