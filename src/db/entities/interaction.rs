//! Interaction entity: one plant-compound-effects relationship extracted
//! from one article, attributed to one source.
//!
//! `effects` and `plant_parts` are stored as UTF-8 JSON arrays of strings;
//! encoding and decoding happen at this boundary only.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "interactions")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,

    pub plant_id: i64,

    pub compound_id: i64,

    /// JSON array of effect strings, possibly empty
    #[sea_orm(column_type = "Text")]
    pub effects: String,

    /// JSON array of plant-part strings, absent when not extracted
    #[sea_orm(column_type = "Text", nullable)]
    pub plant_parts: Option<String>,

    pub source_id: i64,
}

impl Model {
    pub fn effects_list(&self) -> Vec<String> {
        decode_list(&self.effects)
    }

    pub fn plant_parts_list(&self) -> Option<Vec<String>> {
        self.plant_parts.as_deref().map(decode_list)
    }
}

/// Serialize an ordered string sequence for storage.
pub fn encode_list(items: &[String]) -> String {
    serde_json::to_string(items).unwrap_or_else(|_| "[]".to_string())
}

/// Decode a stored JSON array; malformed stored text reads as empty.
pub fn decode_list(text: &str) -> Vec<String> {
    serde_json::from_str(text).unwrap_or_default()
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::plant::Entity",
        from = "Column::PlantId",
        to = "super::plant::Column::Id"
    )]
    Plant,

    #[sea_orm(
        belongs_to = "super::compound::Entity",
        from = "Column::CompoundId",
        to = "super::compound::Column::Id"
    )]
    Compound,

    #[sea_orm(
        belongs_to = "super::source::Entity",
        from = "Column::SourceId",
        to = "super::source::Column::Id"
    )]
    Source,
}

impl Related<super::plant::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Plant.def()
    }
}

impl Related<super::compound::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Compound.def()
    }
}

impl Related<super::source::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Source.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn list_encoding_preserves_order() {
        let effects = vec!["anti-inflammatory".to_string(), "inhibits COX-2".to_string()];
        let encoded = encode_list(&effects);
        assert_eq!(decode_list(&encoded), effects);
    }

    #[test]
    fn empty_list_round_trips() {
        assert_eq!(encode_list(&[]), "[]");
        assert!(decode_list("[]").is_empty());
    }

    #[test]
    fn malformed_stored_text_reads_empty() {
        assert!(decode_list("not json").is_empty());
    }
}
