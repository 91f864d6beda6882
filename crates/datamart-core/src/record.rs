//! Data record entities owned by the Data Registry.

use serde::{Deserialize, Serialize};

use crate::types::{DataId, Principal, Timestamp};

/// The canonical metadata entry for a registered dataset.
///
/// Records are created once and mutated in place (price, quality score).
/// They are never deleted; every id ever issued maps to exactly one record
/// for the lifetime of the system. The data payload itself lives out of
/// band; the registry stores metadata only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataRecord {
    /// Unique sequential identifier, immutable.
    pub id: DataId,

    /// The principal that registered the record. Immutable; there is no
    /// ownership transfer operation.
    pub owner: Principal,

    /// Free-form classification string, immutable.
    pub data_type: String,

    /// Free-form description, immutable.
    pub description: String,

    /// Asking price. Mutable by the owner only.
    pub price: u64,

    /// Quality score, initialized to 0. Mutable by the scoring authority.
    pub quality_score: u64,

    /// When the record was registered (clock reading at registration).
    pub created_at: Timestamp,
}

/// The caller-supplied fields of a record about to be registered.
///
/// The store allocates the id; the registry stamps `created_at` from its
/// clock and fixes the quality score at zero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewRecord {
    pub owner: Principal,
    pub data_type: String,
    pub description: String,
    pub price: u64,
    pub created_at: Timestamp,
}

impl NewRecord {
    /// Materialize the full record once the store has allocated an id.
    pub fn into_record(self, id: DataId) -> DataRecord {
        DataRecord {
            id,
            owner: self.owner,
            data_type: self.data_type,
            description: self.description,
            price: self.price,
            quality_score: 0,
            created_at: self.created_at,
        }
    }
}

/// A single-field mutation applied to an existing record.
///
/// Updates are expressed as data rather than closures so the store can
/// apply them inside its own lock or transaction, keeping each
/// read-modify-write atomic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RecordUpdate {
    /// Replace the asking price.
    Price(u64),
    /// Replace the quality score.
    QualityScore(u64),
}

impl RecordUpdate {
    /// Apply this update to a record in place.
    pub fn apply(&self, record: &mut DataRecord) {
        match self {
            RecordUpdate::Price(p) => record.price = *p,
            RecordUpdate::QualityScore(s) => record.quality_score = *s,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_new_record() -> NewRecord {
        NewRecord {
            owner: Principal::from("user1"),
            data_type: "genomic".to_string(),
            description: "My genomic data".to_string(),
            price: 100,
            created_at: 1_700_000_000_000,
        }
    }

    #[test]
    fn test_into_record_zeroes_quality_score() {
        let record = sample_new_record().into_record(DataId::FIRST);
        assert_eq!(record.id, DataId::from_u64(0));
        assert_eq!(record.quality_score, 0);
        assert_eq!(record.price, 100);
        assert_eq!(record.owner, Principal::from("user1"));
    }

    #[test]
    fn test_update_price_leaves_other_fields() {
        let mut record = sample_new_record().into_record(DataId::FIRST);
        RecordUpdate::Price(200).apply(&mut record);
        assert_eq!(record.price, 200);
        assert_eq!(record.quality_score, 0);
        assert_eq!(record.description, "My genomic data");
    }

    #[test]
    fn test_update_quality_score() {
        let mut record = sample_new_record().into_record(DataId::FIRST);
        RecordUpdate::QualityScore(85).apply(&mut record);
        assert_eq!(record.quality_score, 85);
        assert_eq!(record.price, 100);
    }
}
