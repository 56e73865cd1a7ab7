//! # Telemetry Wiring
//!
//! Engine operations show up in the Prometheus registry.

#[cfg(test)]
mod tests {
    use crate::integration::fixtures::*;
    use escrow_engine::{EscrowApi, EscrowError, WindowEdges};
    use escrow_telemetry::{
        encode_metrics, init_telemetry, TelemetryConfig, ESCROW_COMPLETED, ESCROW_CREATED,
        ESCROW_ERRORS,
    };

    #[test]
    fn test_engine_operations_reach_registry() {
        let config = TelemetryConfig {
            console_output: false,
            ..TelemetryConfig::default()
        };
        // Another test may have installed telemetry first.
        let _ = init_telemetry(&config);

        let origin = origin_deployment(WindowEdges::StartInclusive);
        let s = secret(0x77);
        origin.sign_as(on_origin(user()));
        let id = origin
            .engine
            .create_src_escrow(src_immutables(0x77, &s, AMOUNT))
            .unwrap();
        origin
            .engine
            .fund_escrow(&id, on_origin(user()), AMOUNT + DEPOSIT)
            .unwrap();
        assert_eq!(origin.engine.cancel(&id), Err(EscrowError::InvalidTime));
        origin.ledger.advance_time(60);
        origin.engine.withdraw(&id, s).unwrap();

        assert!(ESCROW_CREATED.with_label_values(&["source"]).get() >= 1.0);
        assert!(ESCROW_COMPLETED.with_label_values(&["source", "withdrawn"]).get() >= 1.0);
        assert!(ESCROW_ERRORS.with_label_values(&["cancel", "invalid_time"]).get() >= 1.0);

        let text = encode_metrics().unwrap();
        assert!(text.contains("escrow_created_total"));
        assert!(text.contains("escrow_operation_duration_seconds"));
    }
}
