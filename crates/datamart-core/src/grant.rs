//! Access grants and purchase intents, owned by the Access & Purchase Ledger.

use serde::{Deserialize, Serialize};

use crate::types::{DataId, Principal, Timestamp};

/// Milliseconds per second, for duration conversion at grant issuance.
const MILLIS_PER_SEC: i64 = 1000;

/// A time-bounded authorization for one principal to access one record.
///
/// Keyed by `(data_id, grantee)`, so there is at most one live grant per
/// pair. A new
/// grant for the same pair overwrites the prior one; there is no grant
/// history and no explicit revocation. Expired grants stay stored and
/// become logically inert.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessGrant {
    /// The record this grant covers.
    pub data_id: DataId,

    /// The principal granted access.
    pub grantee: Principal,

    /// Always true while the grant row exists; absence of the row is the
    /// "no grant" state.
    pub granted: bool,

    /// When the grant was issued (clock reading at issuance).
    pub issued_at: Timestamp,

    /// When the grant expires. Fixed at issuance: `issued_at + duration`.
    pub expires_at: Timestamp,
}

impl AccessGrant {
    /// Issue a grant lasting `duration_secs` seconds from `now`.
    ///
    /// A zero duration yields a grant that is already expired at its own
    /// issuance instant. Pathologically large durations saturate instead
    /// of wrapping.
    pub fn issue(
        data_id: DataId,
        grantee: Principal,
        now: Timestamp,
        duration_secs: u64,
    ) -> Self {
        let duration_ms = i64::try_from(duration_secs)
            .unwrap_or(i64::MAX)
            .saturating_mul(MILLIS_PER_SEC);
        Self {
            data_id,
            grantee,
            granted: true,
            issued_at: now,
            expires_at: now.saturating_add(duration_ms),
        }
    }

    /// Whether the grant has expired as of `now`.
    ///
    /// The boundary is inclusive: a grant is expired at the exact instant
    /// of its expiration timestamp.
    pub fn is_expired(&self, now: Timestamp) -> bool {
        now >= self.expires_at
    }
}

/// The outcome of a successful purchase validation.
///
/// Purchase validation is stateless: it neither moves funds nor creates a
/// grant. This intent is what the core emits for a composing system to
/// settle and, separately, to grant access.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PurchaseIntent {
    /// Who offered the payment.
    pub buyer: Principal,

    /// The record being purchased.
    pub data_id: DataId,

    /// The record's owner, to receive the transfer.
    pub seller: Principal,

    /// The record's price at validation time. Settlement should move this
    /// amount; the buyer's excess offer is not captured here.
    pub amount: u64,

    /// When the validation happened.
    pub validated_at: Timestamp,
}
