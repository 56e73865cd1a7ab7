//! # Engine Operation Benchmarks
//!
//! Full create, fund and withdraw cycles against in-memory adapters, and
//! lookups against a store holding many live swaps.

use criterion::{black_box, BenchmarkId, Criterion};
use escrow_engine::{
    create_hash_lock, pack, DualAddress, EngineDeps, EscrowApi, EscrowConfig, EscrowEngine,
    HashScheme, Identity, Immutables, InMemoryAddressBridge, InMemoryEscrowStore,
    InMemoryEventLog, InMemoryTokenLedger, MockLedger, OriginAddress, SecureSecret,
    TimelockFields, TransferCustody,
};
use std::sync::Arc;
use std::time::Duration;

const MAKER: DualAddress = DualAddress {
    origin: OriginAddress([0x11; 20]),
    destination: escrow_engine::DestinationAddress([0xA1; 32]),
};
const TAKER: DualAddress = DualAddress {
    origin: OriginAddress([0x22; 20]),
    destination: escrow_engine::DestinationAddress([0xA2; 32]),
};
const TOKEN: DualAddress = DualAddress {
    origin: OriginAddress([0x33; 20]),
    destination: escrow_engine::DestinationAddress([0xA3; 32]),
};

struct Bench {
    engine: EscrowEngine,
    ledger: Arc<MockLedger>,
    secret: SecureSecret,
}

fn setup() -> Bench {
    let contract = Identity::Origin(OriginAddress([0xEC; 20]));
    let ledger = Arc::new(MockLedger::new(contract));
    let tokens = Arc::new(InMemoryTokenLedger::new());
    tokens.credit(
        Identity::Origin(TOKEN.origin),
        Identity::Origin(MAKER.origin),
        u128::MAX / 2,
    );
    let engine = EscrowEngine::new(
        Identity::Origin(OriginAddress([0xAD; 20])),
        EscrowConfig::origin(),
        EngineDeps {
            ledger: ledger.clone(),
            store: Arc::new(InMemoryEscrowStore::new()),
            bridge: Arc::new(InMemoryAddressBridge::new()),
            custody: Arc::new(TransferCustody::new(tokens, contract)),
            events: Arc::new(InMemoryEventLog::new()),
        },
    );
    let engine = match engine {
        Ok(engine) => engine,
        Err(e) => panic!("engine setup failed: {}", e),
    };
    Bench {
        engine,
        ledger,
        secret: SecureSecret::new([0x5E; 32]),
    }
}

fn immutables(n: u64, secret: &SecureSecret) -> Immutables {
    let mut order_hash = [0u8; 32];
    order_hash[..8].copy_from_slice(&n.to_be_bytes());
    let fields = TimelockFields {
        deployed_at: 0,
        src_withdrawal: 10,
        src_public_withdrawal: 60,
        src_cancellation: 121,
        src_public_cancellation: 200,
        dst_withdrawal: 5,
        dst_public_withdrawal: 50,
        dst_cancellation: 100,
    };
    Immutables {
        order_hash,
        hashlock: create_hash_lock(HashScheme::Keccak256, secret),
        maker: MAKER,
        taker: TAKER,
        token: TOKEN,
        amount: 100,
        safety_deposit: 10,
        timelocks: pack(&fields, 86_400).unwrap_or_default(),
    }
}

pub fn bench_swap_cycle(c: &mut Criterion) {
    let mut group = c.benchmark_group("escrow/engine/swap_cycle");
    group.measurement_time(Duration::from_secs(10));

    let bench = setup();
    let maker = Identity::Origin(MAKER.origin);
    let mut n = 0u64;

    group.bench_function("create_fund_withdraw", |b| {
        b.iter(|| {
            n += 1;
            bench.ledger.set_time(1_700_000_000);
            bench.ledger.set_invoker(Some(maker));
            let id = bench
                .engine
                .create_src_escrow(immutables(n, &bench.secret))
                .ok();
            if let Some(id) = id {
                let _ = bench.engine.fund_escrow(&id, maker, 110);
                bench.ledger.advance_time(60);
                black_box(bench.engine.withdraw(&id, bench.secret.clone()).is_ok());
            }
        })
    });

    group.finish();
}

pub fn bench_lookup_under_load(c: &mut Criterion) {
    let mut group = c.benchmark_group("escrow/engine/lookup");

    for live in [100u64, 1_000, 10_000] {
        let bench = setup();
        bench.ledger.set_invoker(Some(Identity::Origin(MAKER.origin)));
        let ids: Vec<_> = (0..live)
            .filter_map(|n| bench.engine.create_src_escrow(immutables(n, &bench.secret)).ok())
            .collect();
        let probe = ids[ids.len() / 2];

        group.bench_with_input(BenchmarkId::new("get_escrow_stage", live), &probe, |b, id| {
            b.iter(|| black_box(bench.engine.get_escrow_stage(id)))
        });
    }

    group.finish();
}

pub fn register_benchmarks(c: &mut Criterion) {
    bench_swap_cycle(c);
    bench_lookup_under_load(c);
}
