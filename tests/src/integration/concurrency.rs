//! # Concurrent Swaps on One Deployment
//!
//! Many swaps share one record store. Operations on one swap never touch
//! another, and racing creations of the same swap id admit exactly one.

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::thread;

    use crate::integration::fixtures::*;
    use escrow_engine::{EscrowApi, EscrowError, Stage, WindowEdges};

    #[test]
    fn test_two_swaps_funded_concurrently_stay_isolated() {
        let origin = origin_deployment(WindowEdges::StartInclusive);
        origin.sign_as(on_origin(user()));
        let s1 = secret(0xA0);
        let s2 = secret(0xB0);
        let id1 = origin
            .engine
            .create_src_escrow(src_immutables(1, &s1, 100))
            .unwrap();
        let id2 = origin
            .engine
            .create_src_escrow(src_immutables(2, &s2, 50))
            .unwrap();

        let handles: Vec<_> = [(id1, 100 + DEPOSIT), (id2, 50 + DEPOSIT)]
            .into_iter()
            .map(|(id, amount)| {
                let engine = Arc::clone(&origin.engine);
                thread::spawn(move || engine.fund_escrow(&id, on_origin(user()), amount))
            })
            .collect();
        for handle in handles {
            handle.join().unwrap().unwrap();
        }

        assert_eq!(origin.engine.get_escrow_funded(&id1), Ok(110));
        assert_eq!(origin.engine.get_escrow_funded(&id2), Ok(60));
        assert_eq!(origin.balance(origin.contract), 170);

        // Completing one leaves the other untouched.
        origin.ledger.advance_time(60);
        origin.engine.withdraw(&id1, s1).unwrap();
        assert_eq!(origin.engine.get_escrow_stage(&id1), Ok(Stage::Withdrawn));
        assert_eq!(origin.engine.get_escrow_stage(&id2), Ok(Stage::Created));
        let (_, immutables) = origin.engine.get_escrow_state(&id2).unwrap();
        assert_eq!(immutables.amount, 50);
        assert_eq!(origin.balance(origin.contract), 60);
    }

    #[test]
    fn test_racing_creates_admit_one() {
        let origin = origin_deployment(WindowEdges::StartInclusive);
        origin.sign_as(on_origin(resolver()));
        let s = secret(0xC0);
        let successes = Arc::new(AtomicUsize::new(0));

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let engine = Arc::clone(&origin.engine);
                let successes = Arc::clone(&successes);
                let immutables = src_immutables(9, &s, AMOUNT);
                thread::spawn(move || match engine.create_src_escrow(immutables) {
                    Ok(_) => {
                        successes.fetch_add(1, Ordering::SeqCst);
                    }
                    Err(e) => assert_eq!(e, EscrowError::InvalidImmutables),
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(successes.load(Ordering::SeqCst), 1);
        assert_eq!(origin.engine.stats().created, 1);
        assert_eq!(origin.engine.stats().rejected, 7);
    }

    #[test]
    fn test_racing_funders_never_exceed_cap() {
        let origin = origin_deployment(WindowEdges::StartInclusive);
        origin.sign_as(on_origin(user()));
        let id = origin
            .engine
            .create_src_escrow(src_immutables(3, &secret(0xD0), AMOUNT))
            .unwrap();

        // 20 chunks of 10 against a cap of 110: exactly 11 fit.
        let handles: Vec<_> = (0..20)
            .map(|_| {
                let engine = Arc::clone(&origin.engine);
                thread::spawn(move || engine.fund_escrow(&id, on_origin(user()), 10).is_ok())
            })
            .collect();
        let accepted = handles
            .into_iter()
            .filter_map(|h| h.join().ok())
            .filter(|ok| *ok)
            .count();

        assert_eq!(accepted, 11);
        assert_eq!(origin.engine.get_escrow_funded(&id), Ok(AMOUNT + DEPOSIT));
        assert_eq!(origin.balance(origin.contract), AMOUNT + DEPOSIT);
    }
}
