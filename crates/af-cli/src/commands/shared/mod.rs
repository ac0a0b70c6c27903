use af_core::enums::EntityType;
use af_core::responses::DeleteResponse;

pub mod limit;
pub mod parse;

/// Response printed by every `afl <entity> delete`.
#[must_use]
pub fn deleted(entity_type: EntityType, id: &str) -> DeleteResponse {
    DeleteResponse {
        entity_type,
        id: id.to_string(),
        deleted: true,
    }
}
