//! Authorized operator identifiers.

use serde::{Deserialize, Serialize};

use super::events::ChatId;

/// Maximum number of operators the whitelist can hold.
pub const MAX_OPERATORS: usize = 8;

/// Immutable set of operators allowed to command the alarm and to receive
/// breach notifications. Loaded once with the configuration.
///
/// Serialized as a plain array. Deserializing goes through
/// [`from_ids`](Self::from_ids), so repeated ids collapse to one entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "IdList", into = "IdList")]
pub struct Whitelist {
    ids: IdList,
}

type IdList = heapless::Vec<ChatId, MAX_OPERATORS>;

impl Whitelist {
    /// Build from a slice. Duplicates are dropped; entries beyond
    /// [`MAX_OPERATORS`] are rejected with `None`.
    pub fn from_ids(ids: &[ChatId]) -> Option<Self> {
        let mut list = Self::default();
        for &id in ids {
            if !list.contains(id) {
                list.ids.push(id).ok()?;
            }
        }
        Some(list)
    }

    pub fn contains(&self, id: ChatId) -> bool {
        self.ids.contains(&id)
    }

    pub fn iter(&self) -> impl Iterator<Item = ChatId> + '_ {
        self.ids.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

impl TryFrom<IdList> for Whitelist {
    type Error = &'static str;

    fn try_from(ids: IdList) -> Result<Self, Self::Error> {
        Self::from_ids(&ids).ok_or("too many operators")
    }
}

impl From<Whitelist> for IdList {
    fn from(list: Whitelist) -> Self {
        list.ids
    }
}
