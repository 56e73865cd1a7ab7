//! # Window Edge Policies
//!
//! The same swap under both edge interpretations. Only the exact boundary
//! seconds differ; everything strictly inside a window behaves the same.
//!
//! | Time | StartInclusive | StartExclusive |
//! |------|----------------|----------------|
//! | T+10 withdraw | open | closed |
//! | T+121 withdraw | closed | open (public) |
//! | T+121 cancel | open | closed |
//! | T+86400 rescue | open | closed |

#[cfg(test)]
mod tests {
    use crate::integration::fixtures::*;
    use escrow_engine::{EscrowApi, EscrowError, Stage, SwapId, WindowEdges};
    use proptest::prelude::*;

    fn funded_source(edges: WindowEdges, order: u8) -> (Deployment, SwapId) {
        let origin = origin_deployment(edges);
        origin.sign_as(on_origin(user()));
        let id = origin
            .engine
            .create_src_escrow(src_immutables(order, &secret(order), AMOUNT))
            .unwrap();
        origin
            .engine
            .fund_escrow(&id, on_origin(user()), AMOUNT + DEPOSIT)
            .unwrap();
        (origin, id)
    }

    #[test]
    fn test_scenario_withdraw_times() {
        let (origin, id) = funded_source(WindowEdges::StartInclusive, 1);
        origin.sign_as(on_origin(resolver()));

        origin.ledger.set_time(T + 5);
        assert_eq!(origin.engine.withdraw(&id, secret(1)), Err(EscrowError::InvalidTime));
        origin.ledger.set_time(T + 11);
        origin.engine.withdraw(&id, secret(1)).unwrap();
        origin.ledger.set_time(T + 12);
        assert_eq!(
            origin.engine.withdraw(&id, secret(1)),
            Err(EscrowError::InvalidImmutables)
        );
    }

    #[test]
    fn test_scenario_cancel_times() {
        let (origin, id) = funded_source(WindowEdges::StartInclusive, 2);

        origin.ledger.set_time(T + 50);
        assert_eq!(origin.engine.cancel(&id), Err(EscrowError::InvalidTime));
        origin.ledger.set_time(T + 122);
        origin.engine.cancel(&id).unwrap();
        assert_eq!(origin.balance(on_origin(user())), USER_BALANCE);
    }

    #[test]
    fn test_inclusive_boundaries() {
        let (origin, id) = funded_source(WindowEdges::StartInclusive, 3);
        origin.sign_as(on_origin(resolver()));

        origin.ledger.set_time(T + 121);
        assert_eq!(origin.engine.withdraw(&id, secret(3)), Err(EscrowError::InvalidTime));

        origin.ledger.set_time(T + 10);
        origin.engine.withdraw(&id, secret(3)).unwrap();
    }

    #[test]
    fn test_exclusive_boundaries() {
        let (origin, id) = funded_source(WindowEdges::StartExclusive, 4);
        origin.sign_as(on_origin(resolver()));

        origin.ledger.set_time(T + 10);
        assert_eq!(origin.engine.withdraw(&id, secret(4)), Err(EscrowError::InvalidTime));

        origin.ledger.set_time(T + 121);
        origin.sign_as(on_origin(user()));
        assert_eq!(origin.engine.cancel(&id), Err(EscrowError::InvalidTime));

        // Last second of the withdrawal window, public by then.
        origin.engine.withdraw(&id, secret(4)).unwrap();
        assert_eq!(origin.balance(on_origin(resolver())), USER_BALANCE + AMOUNT + DEPOSIT);
    }

    #[test]
    fn test_rescue_edge_per_policy() {
        let (inclusive, a) = funded_source(WindowEdges::StartInclusive, 5);
        let (exclusive, b) = funded_source(WindowEdges::StartExclusive, 6);

        for d in [&inclusive, &exclusive] {
            d.sign_as(on_origin(resolver()));
            d.ledger.set_time(T + 86_400);
        }
        inclusive.engine.rescue_funds(&a, AMOUNT + DEPOSIT).unwrap();
        assert_eq!(
            exclusive.engine.rescue_funds(&b, AMOUNT + DEPOSIT),
            Err(EscrowError::InvalidTime)
        );

        exclusive.ledger.advance_time(1);
        exclusive.engine.rescue_funds(&b, AMOUNT + DEPOSIT).unwrap();
        assert_eq!(exclusive.engine.get_escrow_stage(&b), Ok(Stage::Rescued));
    }

    #[test]
    fn test_rescue_must_empty_custody() {
        let (origin, id) = funded_source(WindowEdges::StartInclusive, 9);
        origin.sign_as(on_origin(resolver()));
        origin.ledger.set_time(T + 86_400);

        assert!(matches!(
            origin.engine.rescue_funds(&id, 1),
            Err(EscrowError::InvalidAmount { .. })
        ));
        assert_eq!(origin.balance(origin.contract), AMOUNT + DEPOSIT);

        origin.engine.rescue_funds(&id, AMOUNT + DEPOSIT).unwrap();
        assert_eq!(origin.balance(origin.contract), 0);
        assert_eq!(origin.balance(on_origin(resolver())), USER_BALANCE + AMOUNT + DEPOSIT);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        /// Withdraw succeeds iff the secret matches, the time is inside the
        /// window and the caller is the taker or the window is public.
        #[test]
        fn prop_withdraw_rule(offset in 0u64..250, by_taker in any::<bool>(), right_secret in any::<bool>()) {
            let (origin, id) = funded_source(WindowEdges::StartInclusive, 7);
            origin.ledger.set_time(T + offset);
            let caller = if by_taker { resolver() } else { user() };
            origin.sign_as(on_origin(caller));
            let presented = if right_secret { secret(7) } else { secret(8) };

            let in_window = (10..121).contains(&offset);
            let allowed = by_taker || offset >= 60;
            let result = origin.engine.withdraw(&id, presented);

            prop_assert_eq!(result.is_ok(), right_secret && in_window && allowed);
            let expected = if result.is_ok() { Stage::Withdrawn } else { Stage::Created };
            prop_assert_eq!(origin.engine.get_escrow_stage(&id), Ok(expected));
        }
    }
}
