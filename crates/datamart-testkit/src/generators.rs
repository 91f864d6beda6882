//! Proptest strategies for property-based testing.

use proptest::prelude::*;

use datamart_core::Principal;

/// Parameters for registering a record, generated as a unit so properties
/// can relate the inputs to the stored record.
#[derive(Debug, Clone)]
pub struct RecordParams {
    pub owner: Principal,
    pub data_type: String,
    pub description: String,
    pub price: u64,
}

/// A non-empty lowercase identity string.
pub fn principal() -> impl Strategy<Value = Principal> {
    "[a-z][a-z0-9]{0,11}".prop_map(Principal::from)
}

/// A record classification drawn from a small realistic set.
pub fn data_type() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("genomic".to_string()),
        Just("clinical".to_string()),
        Just("imaging".to_string()),
        Just("sensor".to_string()),
    ]
}

/// Arbitrary registration parameters.
pub fn record_params() -> impl Strategy<Value = RecordParams> {
    (principal(), data_type(), ".{0,64}", 0..=1_000_000u64).prop_map(
        |(owner, data_type, description, price)| RecordParams {
            owner,
            data_type,
            description,
            price,
        },
    )
}

/// Grant durations from born-expired up to about a year, in seconds.
pub fn duration_secs() -> impl Strategy<Value = u64> {
    0..=31_536_000u64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::TestFixture;
    use datamart::{DataId, LedgerError, MarketError, RegistryError};

    fn block_on<F: std::future::Future>(future: F) -> F::Output {
        tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .expect("runtime")
            .block_on(future)
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        #[test]
        fn registered_records_get_sequential_ids(batch in prop::collection::vec(record_params(), 1..16)) {
            block_on(async {
                let fixture = TestFixture::new();
                for (i, params) in batch.iter().enumerate() {
                    let id = fixture
                        .market
                        .register(
                            params.owner.clone(),
                            params.data_type.clone(),
                            params.description.clone(),
                            params.price,
                        )
                        .await
                        .unwrap();
                    prop_assert_eq!(id, DataId::from_u64(i as u64));

                    let record = fixture.market.get(id).await.unwrap();
                    prop_assert_eq!(&record.owner, &params.owner);
                    prop_assert_eq!(record.price, params.price);
                    prop_assert_eq!(record.quality_score, 0);
                }
                Ok(())
            })?;
        }

        #[test]
        fn non_owner_price_updates_never_change_state(
            params in record_params(),
            intruder in principal(),
            attempted_price in 0..=1_000_000u64,
        ) {
            prop_assume!(intruder != params.owner);
            block_on(async {
                let fixture = TestFixture::new();
                let id = fixture
                    .market
                    .register(
                        params.owner.clone(),
                        params.data_type.clone(),
                        params.description.clone(),
                        params.price,
                    )
                    .await
                    .unwrap();

                let result = fixture.market.update_price(&intruder, id, attempted_price).await;
                let rejected = matches!(
                    &result,
                    Err(MarketError::Registry(RegistryError::Unauthorized { .. }))
                );
                prop_assert!(rejected, "unexpected result: {:?}", result);
                prop_assert_eq!(fixture.market.get(id).await.unwrap().price, params.price);
                Ok(())
            })?;
        }

        #[test]
        fn grants_expire_exactly_at_issuance_plus_duration(
            params in record_params(),
            grantee in principal(),
            duration in duration_secs(),
        ) {
            block_on(async {
                let fixture = TestFixture::new();
                let id = fixture
                    .market
                    .register(
                        params.owner.clone(),
                        params.data_type.clone(),
                        params.description.clone(),
                        params.price,
                    )
                    .await
                    .unwrap();

                fixture
                    .market
                    .grant_access(&params.owner, id, grantee.clone(), duration)
                    .await
                    .unwrap();

                if duration > 0 {
                    // Valid up to the last millisecond before expiry.
                    prop_assert!(fixture.market.check_access(id, &grantee).await.is_ok());
                    fixture.clock.advance_millis(duration as i64 * 1000 - 1);
                    prop_assert!(fixture.market.check_access(id, &grantee).await.is_ok());
                    fixture.clock.advance_millis(1);
                }

                let expired = fixture.market.check_access(id, &grantee).await;
                let denied = matches!(
                    &expired,
                    Err(MarketError::Ledger(LedgerError::Expired { .. }))
                );
                prop_assert!(denied, "unexpected result: {:?}", expired);
                Ok(())
            })?;
        }

        #[test]
        fn purchase_succeeds_iff_payment_meets_current_price(
            params in record_params(),
            buyer in principal(),
            payment in 0..=2_000_000u64,
        ) {
            block_on(async {
                let fixture = TestFixture::new();
                let id = fixture
                    .market
                    .register(
                        params.owner.clone(),
                        params.data_type.clone(),
                        params.description.clone(),
                        params.price,
                    )
                    .await
                    .unwrap();

                let result = fixture.market.purchase(buyer.clone(), id, payment).await;
                if payment >= params.price {
                    let intent = result.unwrap();
                    prop_assert_eq!(intent.amount, params.price);
                    prop_assert_eq!(&intent.seller, &params.owner);
                } else {
                    let refused = matches!(
                        &result,
                        Err(MarketError::Ledger(LedgerError::InsufficientFunds { .. }))
                    );
                    prop_assert!(refused, "unexpected result: {:?}", result);
                }
                Ok(())
            })?;
        }
    }
}
