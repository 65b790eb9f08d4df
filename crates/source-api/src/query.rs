use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::item::ItemId;

/// Host query object the picker writes its selected item into.
///
/// Only `itemID` is owned by the picker; every other field is carried through
/// untouched so hosts can round-trip their own query format.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Query {
    #[serde(rename = "refId", default)]
    pub ref_id: String,
    #[serde(
        rename = "itemID",
        default,
        with = "item_id_field",
        skip_serializing_if = "Option::is_none"
    )]
    pub item_id: Option<ItemId>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Query {
    #[must_use]
    pub fn new(ref_id: impl Into<String>) -> Self {
        Self {
            ref_id: ref_id.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_item_id(mut self, id: impl Into<ItemId>) -> Self {
        self.item_id = Some(id.into());
        self
    }
}

/// Callbacks the picker invokes after committing a new item id.
pub trait QueryHost {
    /// The query changed; `updated` is a snapshot of the new state.
    fn on_change(&mut self, updated: &Query);

    /// The downstream data fetch should run again.
    fn on_run_query(&mut self);
}

/// `itemID` is stored as a string by the backend query model, but hosts also
/// hand it over as a plain number. Anything that is not a canonical id reads
/// as absent.
mod item_id_field {
    use serde::{Deserialize, Deserializer, Serializer};
    use serde_json::Value;

    use crate::item::ItemId;

    pub(super) fn serialize<S>(id: &Option<ItemId>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match id {
            Some(id) => serializer.serialize_str(&id.to_string()),
            None => serializer.serialize_none(),
        }
    }

    pub(super) fn deserialize<'de, D>(deserializer: D) -> Result<Option<ItemId>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match Value::deserialize(deserializer)? {
            Value::Number(number) => number.as_u64().map(ItemId::new),
            Value::String(text) => ItemId::parse_canonical(&text),
            _ => None,
        })
    }
}
