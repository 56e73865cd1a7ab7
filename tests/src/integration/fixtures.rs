//! # Two-Ledger Fixtures
//!
//! An origin deployment with transfer custody and a destination deployment
//! whose token ledger gates receipt behind trustlines. The engine on the
//! destination side holds value through the issuer's mint grant.

use std::sync::Arc;

use escrow_engine::{
    create_hash_lock, pack, DestinationAddress, DualAddress, EngineDeps, EscrowConfig,
    EscrowEngine, HashScheme, Identity, Immutables, InMemoryAddressBridge, InMemoryEscrowStore,
    InMemoryEventLog, InMemoryTokenLedger, IssuerGrant, MintCustody, MockLedger, OriginAddress,
    SecureSecret, TimelockFields, TransferCustody, WindowEdges,
};

/// Ledger time both deployments start at.
pub const T: u64 = 1_700_000_000;

/// Swap amount used by the scenarios.
pub const AMOUNT: u128 = 100;

/// Safety deposit used by the scenarios.
pub const DEPOSIT: u128 = 10;

/// Starting origin-token balance of the user.
pub const USER_BALANCE: u128 = 1_000;

/// Swap initiator. Locks origin tokens, receives destination tokens.
pub fn user() -> DualAddress {
    DualAddress::new([0x11; 20], [0xA1; 32])
}

/// Counterparty. Fronts destination tokens, receives origin tokens.
pub fn resolver() -> DualAddress {
    DualAddress::new([0x22; 20], [0xA2; 32])
}

/// The bridged asset.
pub fn token() -> DualAddress {
    DualAddress::new([0x33; 20], [0xA3; 32])
}

/// Issuer of the destination asset.
pub fn issuer() -> Identity {
    Identity::Destination(DestinationAddress([0x1E; 32]))
}

/// Deployment administrator.
pub fn admin() -> Identity {
    Identity::Origin(OriginAddress([0xAD; 20]))
}

/// Origin-ledger identity of a participant.
pub fn on_origin(who: DualAddress) -> Identity {
    Identity::Origin(who.origin)
}

/// Destination-ledger identity of a participant.
pub fn on_destination(who: DualAddress) -> Identity {
    Identity::Destination(who.destination)
}

/// Secret shared by both escrows of a swap.
pub fn secret(seed: u8) -> SecureSecret {
    SecureSecret::new([seed; 32])
}

/// Offsets from the scenario table; `deployed_at` is stamped by `create`.
pub fn scenario_fields() -> TimelockFields {
    TimelockFields {
        deployed_at: 0,
        src_withdrawal: 10,
        src_public_withdrawal: 60,
        src_cancellation: 121,
        src_public_cancellation: 200,
        dst_withdrawal: 5,
        dst_public_withdrawal: 50,
        dst_cancellation: 100,
    }
}

/// Immutables for the source escrow: the user locks, the resolver withdraws.
pub fn src_immutables(order: u8, secret: &SecureSecret, amount: u128) -> Immutables {
    Immutables {
        order_hash: [order; 32],
        hashlock: create_hash_lock(HashScheme::Keccak256, secret),
        maker: user(),
        taker: resolver(),
        token: token(),
        amount,
        safety_deposit: DEPOSIT,
        timelocks: pack(&scenario_fields(), 86_400).unwrap(),
    }
}

/// Immutables for the destination escrow: the resolver locks, the user withdraws.
pub fn dst_immutables(order: u8, secret: &SecureSecret, amount: u128) -> Immutables {
    Immutables {
        maker: resolver(),
        taker: user(),
        ..src_immutables(order, secret, amount)
    }
}

/// One deployment and the adapters behind it.
pub struct Deployment {
    /// The engine under test.
    pub engine: Arc<EscrowEngine>,
    /// Its clock and signer.
    pub ledger: Arc<MockLedger>,
    /// Asset balances on this ledger.
    pub tokens: Arc<InMemoryTokenLedger>,
    /// Published events.
    pub events: Arc<InMemoryEventLog>,
    /// The engine's own identity.
    pub contract: Identity,
}

impl Deployment {
    /// Local identity of the bridged asset.
    pub fn token(&self) -> Identity {
        match self.contract {
            Identity::Origin(_) => on_origin(token()),
            Identity::Destination(_) => on_destination(token()),
        }
    }

    /// Balance of `holder` in the bridged asset.
    pub fn balance(&self, holder: Identity) -> u128 {
        use escrow_engine::TokenLedger;
        self.tokens.balance(&self.token(), &holder)
    }

    /// Sign the next calls as `who`.
    pub fn sign_as(&self, who: Identity) {
        self.ledger.set_invoker(Some(who));
    }
}

/// Origin deployment: plain transfers, user pre-funded.
pub fn origin_deployment(edges: WindowEdges) -> Deployment {
    let contract = Identity::Origin(OriginAddress([0xEC; 20]));
    let ledger = Arc::new(MockLedger::new(contract));
    ledger.set_time(T);

    let tokens = Arc::new(InMemoryTokenLedger::new());
    tokens.credit(on_origin(token()), on_origin(user()), USER_BALANCE);
    tokens.credit(on_origin(token()), on_origin(resolver()), USER_BALANCE);

    let events = Arc::new(InMemoryEventLog::new());
    let config = EscrowConfig {
        window_edges: edges,
        ..EscrowConfig::origin()
    };
    let engine = EscrowEngine::new(
        admin(),
        config,
        EngineDeps {
            ledger: ledger.clone(),
            store: Arc::new(InMemoryEscrowStore::new()),
            bridge: Arc::new(InMemoryAddressBridge::new()),
            custody: Arc::new(TransferCustody::new(tokens.clone(), contract)),
            events: events.clone(),
        },
    )
    .unwrap();

    Deployment {
        engine: Arc::new(engine),
        ledger,
        tokens,
        events,
        contract,
    }
}

/// Destination deployment: trustline-gated asset, engine holds the issuer's grant.
pub fn destination_deployment(edges: WindowEdges) -> Deployment {
    let contract = Identity::Destination(DestinationAddress([0xEC; 32]));
    let ledger = Arc::new(MockLedger::new(contract));
    ledger.set_time(T);

    let tokens = Arc::new(InMemoryTokenLedger::with_trustlines());
    let asset = on_destination(token());
    tokens.register_asset(asset, issuer());
    tokens.set_admin(&asset, &issuer(), contract).unwrap();

    let events = Arc::new(InMemoryEventLog::new());
    let config = EscrowConfig {
        window_edges: edges,
        ..EscrowConfig::destination()
    };
    let grant = Arc::new(IssuerGrant::new(tokens.clone(), contract));
    let engine = EscrowEngine::new(
        admin(),
        config,
        EngineDeps {
            ledger: ledger.clone(),
            store: Arc::new(InMemoryEscrowStore::new()),
            bridge: Arc::new(InMemoryAddressBridge::new()),
            custody: Arc::new(MintCustody::new(grant, contract)),
            events: events.clone(),
        },
    )
    .unwrap();

    Deployment {
        engine: Arc::new(engine),
        ledger,
        tokens,
        events,
        contract,
    }
}
