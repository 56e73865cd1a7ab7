//! # Escrow Lifecycle Engine
//!
//! One engine per ledger deployment. It owns every stage transition and
//! is the only caller of the record store, the address bridge and custody.
//!
//! ## Atomicity
//!
//! State-changing operations run one at a time under `op_lock`, the way a
//! ledger executes transactions serially. Each operation validates
//! everything first, then moves value, then records the transition. The
//! post-validation writes cannot fail while the lock is held.

use crate::adapters::{InMemoryAddressBridge, InMemoryEscrowStore, InMemoryEventLog, MockLedger};
use crate::algorithms::{cancellation_access, rescue_open, verify_secret, withdrawal_access, Access};
use crate::domain::{
    invariant_active, invariant_amounts_valid, invariant_fully_funded, invariant_rescue_amount,
    ChainSide, DestinationAddress, DualAddress, EscrowConfig, EscrowError, EscrowEvent,
    EscrowRecord, Identity, Immutables, OriginAddress, Role, SecureSecret, Stage, SwapId,
};
use crate::ports::inbound::EscrowApi;
use crate::ports::outbound::{AddressBridge, Custody, EscrowStore, EventSink, LedgerEnv};

use escrow_telemetry::{
    log_escrow_event, metric_add, metric_inc, time_operation, ESCROW_ACTIVE, ESCROW_COMPLETED,
    ESCROW_CREATED, ESCROW_CUSTODY_VOLUME, ESCROW_ERRORS, ESCROW_FUNDED,
};
use parking_lot::{Mutex, RwLock};
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

/// Counters for one engine instance.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct EngineStats {
    /// Escrows created.
    pub created: u64,
    /// Funding calls accepted.
    pub funded: u64,
    /// Escrows withdrawn.
    pub withdrawn: u64,
    /// Escrows cancelled.
    pub cancelled: u64,
    /// Escrows rescued.
    pub rescued: u64,
    /// Operations rejected with an error.
    pub rejected: u64,
}

/// Outbound adapters an engine is wired to.
pub struct EngineDeps<L, S, B, E> {
    /// Clock and signer.
    pub ledger: Arc<L>,
    /// Record store.
    pub store: Arc<S>,
    /// Address bridge.
    pub bridge: Arc<B>,
    /// Custody strategy.
    pub custody: Arc<dyn Custody>,
    /// Event sink.
    pub events: Arc<E>,
}

/// The escrow lifecycle engine.
pub struct EscrowEngine<
    L = MockLedger,
    S = InMemoryEscrowStore,
    B = InMemoryAddressBridge,
    E = InMemoryEventLog,
> where
    L: LedgerEnv,
    S: EscrowStore,
    B: AddressBridge,
    E: EventSink,
{
    admin: Identity,
    config: EscrowConfig,
    ledger: Arc<L>,
    store: Arc<S>,
    bridge: Arc<B>,
    custody: Arc<dyn Custody>,
    events: Arc<E>,
    stats: RwLock<EngineStats>,
    op_lock: Mutex<()>,
}

impl<L, S, B, E> EscrowEngine<L, S, B, E>
where
    L: LedgerEnv,
    S: EscrowStore,
    B: AddressBridge,
    E: EventSink,
{
    /// Deploy an engine administered by `admin`.
    ///
    /// The rescue delay must fit the 32-bit timestamp width.
    pub fn new(
        admin: Identity,
        config: EscrowConfig,
        deps: EngineDeps<L, S, B, E>,
    ) -> Result<Self, EscrowError> {
        if config.rescue_delay_secs > u64::from(u32::MAX) {
            return Err(crate::domain::TimeLockError::RescueStartOverflow.into());
        }
        if deps.custody.mode() != config.custody_mode {
            warn!(
                configured = ?config.custody_mode,
                actual = ?deps.custody.mode(),
                "[escrow] Custody adapter differs from configured mode"
            );
        }
        info!(
            "[escrow] Engine deployed on {:?} ledger, rescue delay {}s",
            config.chain_side, config.rescue_delay_secs
        );
        Ok(Self {
            admin,
            config,
            ledger: deps.ledger,
            store: deps.store,
            bridge: deps.bridge,
            custody: deps.custody,
            events: deps.events,
            stats: RwLock::new(EngineStats::default()),
            op_lock: Mutex::new(()),
        })
    }

    /// Deployment configuration.
    pub fn config(&self) -> &EscrowConfig {
        &self.config
    }

    /// Snapshot of this engine's counters.
    pub fn stats(&self) -> EngineStats {
        self.stats.read().clone()
    }

    /// Ledger-local identity of a dual address.
    ///
    /// On the destination ledger the origin identifier is translated
    /// through the bridge; a missing mapping aborts the operation.
    fn local(&self, who: &DualAddress) -> Result<Identity, EscrowError> {
        match self.config.chain_side {
            ChainSide::Origin => Ok(Identity::Origin(who.origin)),
            ChainSide::Destination => Ok(Identity::Destination(
                self.bridge.resolve_to_destination(&who.origin)?,
            )),
        }
    }

    fn observe<T>(&self, operation: &str, result: Result<T, EscrowError>) -> Result<T, EscrowError> {
        if let Err(e) = &result {
            metric_inc!(ESCROW_ERRORS, &[operation, e.kind()]);
            self.stats.write().rejected += 1;
            warn!(operation, code = e.code(), "[escrow] Rejected: {}", e);
        }
        result
    }

    fn complete(&self, role: Role, stage: Stage) {
        metric_inc!(ESCROW_COMPLETED, &[role.label(), stage.label()]);
        ESCROW_ACTIVE.dec();
        let mut stats = self.stats.write();
        match stage {
            Stage::Withdrawn => stats.withdrawn += 1,
            Stage::Cancelled => stats.cancelled += 1,
            Stage::Rescued => stats.rescued += 1,
            Stage::Created => {}
        }
    }

    fn create(&self, role: Role, mut immutables: Immutables) -> Result<SwapId, EscrowError> {
        let _guard = self.op_lock.lock();

        let creator = self.ledger.invoker().ok_or(EscrowError::InvalidCaller)?;
        let swap_id = immutables.swap_id();
        if self.store.get(&swap_id).is_ok() {
            return Err(EscrowError::InvalidImmutables);
        }
        invariant_amounts_valid(&immutables)?;

        let now = self.ledger.timestamp();
        immutables.timelocks = immutables
            .timelocks
            .with_deployed_at(now, self.config.rescue_delay_secs)?;

        self.bridge.map_all(&[
            (immutables.maker.origin, immutables.maker.destination),
            (immutables.taker.origin, immutables.taker.destination),
            (immutables.token.origin, immutables.token.destination),
        ])?;

        let hashlock = immutables.hashlock;
        self.store
            .put_if_absent(swap_id, EscrowRecord::new(role, immutables))?;

        self.events.publish(EscrowEvent::EscrowCreated {
            swap_id,
            role,
            hashlock,
            deployed_at: now,
        });
        metric_inc!(ESCROW_CREATED, &[role.label()]);
        ESCROW_ACTIVE.inc();
        self.stats.write().created += 1;
        log_escrow_event!(info, "create", "[escrow] Escrow created", swap_id.short(),
            role = ?role, creator = %creator, deployed_at = now);
        Ok(swap_id)
    }

    fn fund(&self, swap_id: &SwapId, from: Identity, amount: u128) -> Result<(), EscrowError> {
        let _guard = self.op_lock.lock();

        self.ledger.require_auth(&from)?;
        let record = self.store.get(swap_id)?;
        invariant_active(&record)?;

        // Dry run of the funding cap before any value moves.
        let total_funded = record.clone().add_funding(amount)?;
        let token = self.local(&record.immutables.token)?;

        self.custody.lock(&token, &from, amount)?;
        self.store.add_funding(swap_id, amount)?;

        self.events.publish(EscrowEvent::EscrowFunded {
            swap_id: *swap_id,
            from,
            amount,
            total_funded,
        });
        metric_inc!(ESCROW_FUNDED, &[record.role.label()]);
        metric_add!(ESCROW_CUSTODY_VOLUME, &["lock"], amount as f64);
        self.stats.write().funded += 1;
        log_escrow_event!(info, "fund", "[escrow] Escrow funded", swap_id.short(),
            from = %from, amount = %amount, total_funded = %total_funded);
        Ok(())
    }

    fn try_withdraw(&self, swap_id: &SwapId, secret: SecureSecret) -> Result<(), EscrowError> {
        let _guard = self.op_lock.lock();

        let record = self.store.get(swap_id)?;
        invariant_active(&record)?;
        let immutables = &record.immutables;

        if !verify_secret(self.config.hash_scheme, &secret, &immutables.hashlock) {
            return Err(EscrowError::InvalidSecret);
        }

        let now = self.ledger.timestamp();
        let access = withdrawal_access(record.role, &immutables.timelocks, now, self.config.window_edges)?;
        let taker = self.local(&immutables.taker)?;
        if access == Access::Private {
            self.ledger.require_auth(&taker)?;
        }

        let payout = invariant_fully_funded(&record)?;
        let token = self.local(&immutables.token)?;

        self.custody.release(&token, &taker, payout)?;
        self.store.set_stage(swap_id, Stage::Withdrawn)?;

        self.events.publish(EscrowEvent::Withdrawal {
            swap_id: *swap_id,
            secret,
            recipient: taker,
            amount: payout,
        });
        metric_add!(ESCROW_CUSTODY_VOLUME, &["release"], payout as f64);
        self.complete(record.role, Stage::Withdrawn);
        log_escrow_event!(info, "withdraw", "[escrow] Secret revealed, escrow withdrawn", swap_id.short(),
            access = ?access, recipient = %taker, amount = %payout);
        Ok(())
    }

    fn try_cancel(&self, swap_id: &SwapId) -> Result<(), EscrowError> {
        let _guard = self.op_lock.lock();

        let record = self.store.get(swap_id)?;
        invariant_active(&record)?;
        let immutables = &record.immutables;

        let now = self.ledger.timestamp();
        let access =
            cancellation_access(record.role, &immutables.timelocks, now, self.config.window_edges)?;
        let maker = self.local(&immutables.maker)?;
        if access == Access::Private {
            self.ledger.require_auth(&maker)?;
        }

        // Refund whatever custody holds; fully funded swaps return amount + deposit.
        if record.funded == 0 {
            return Err(EscrowError::InsufficientFunding {
                funded: 0,
                required: immutables.total()?,
            });
        }
        let refund = record.funded;
        let token = self.local(&immutables.token)?;

        self.custody.release(&token, &maker, refund)?;
        self.store.set_stage(swap_id, Stage::Cancelled)?;

        self.events.publish(EscrowEvent::EscrowCancelled {
            swap_id: *swap_id,
            recipient: maker,
            amount: refund,
        });
        metric_add!(ESCROW_CUSTODY_VOLUME, &["release"], refund as f64);
        self.complete(record.role, Stage::Cancelled);
        log_escrow_event!(info, "cancel", "[escrow] Escrow cancelled", swap_id.short(),
            access = ?access, recipient = %maker, amount = %refund);
        Ok(())
    }

    fn try_rescue(&self, swap_id: &SwapId, amount: u128) -> Result<(), EscrowError> {
        let _guard = self.op_lock.lock();

        let record = self.store.get(swap_id)?;
        invariant_active(&record)?;
        let immutables = &record.immutables;

        let taker = self.local(&immutables.taker)?;
        self.ledger.require_auth(&taker)?;

        let now = self.ledger.timestamp();
        rescue_open(
            &immutables.timelocks,
            self.config.rescue_delay_secs,
            now,
            self.config.window_edges,
        )?;
        invariant_rescue_amount(&record, amount)?;
        let token = self.local(&immutables.token)?;

        self.custody.release(&token, &taker, amount)?;
        self.store.set_stage(swap_id, Stage::Rescued)?;

        self.events.publish(EscrowEvent::FundsRescued {
            swap_id: *swap_id,
            recipient: taker,
            amount,
        });
        metric_add!(ESCROW_CUSTODY_VOLUME, &["release"], amount as f64);
        self.complete(record.role, Stage::Rescued);
        log_escrow_event!(warn, "rescue", "[escrow] Funds rescued", swap_id.short(),
            recipient = %taker, amount = %amount);
        Ok(())
    }
}

impl<L, S, B, E> EscrowApi for EscrowEngine<L, S, B, E>
where
    L: LedgerEnv,
    S: EscrowStore,
    B: AddressBridge,
    E: EventSink,
{
    fn create_src_escrow(&self, immutables: Immutables) -> Result<SwapId, EscrowError> {
        let _timer = time_operation("create");
        self.observe("create", self.create(Role::Source, immutables))
    }

    fn create_dst_escrow(&self, immutables: Immutables) -> Result<SwapId, EscrowError> {
        let _timer = time_operation("create");
        self.observe("create", self.create(Role::Destination, immutables))
    }

    fn fund_escrow(
        &self,
        swap_id: &SwapId,
        from: Identity,
        amount: u128,
    ) -> Result<(), EscrowError> {
        let _timer = time_operation("fund");
        self.observe("fund", self.fund(swap_id, from, amount))
    }

    fn withdraw(&self, swap_id: &SwapId, secret: SecureSecret) -> Result<(), EscrowError> {
        let _timer = time_operation("withdraw");
        self.observe("withdraw", self.try_withdraw(swap_id, secret))
    }

    fn cancel(&self, swap_id: &SwapId) -> Result<(), EscrowError> {
        let _timer = time_operation("cancel");
        self.observe("cancel", self.try_cancel(swap_id))
    }

    fn rescue_funds(&self, swap_id: &SwapId, amount: u128) -> Result<(), EscrowError> {
        let _timer = time_operation("rescue");
        self.observe("rescue", self.try_rescue(swap_id, amount))
    }

    fn get_escrow_state(&self, swap_id: &SwapId) -> Result<(Role, Immutables), EscrowError> {
        let record = self.store.get(swap_id)?;
        Ok((record.role, record.immutables))
    }

    fn get_escrow_stage(&self, swap_id: &SwapId) -> Result<Stage, EscrowError> {
        Ok(self.store.get(swap_id)?.stage)
    }

    fn get_escrow_funded(&self, swap_id: &SwapId) -> Result<u128, EscrowError> {
        Ok(self.store.get(swap_id)?.funded)
    }

    fn get_admin(&self) -> Identity {
        self.admin
    }

    fn get_rescue_delay(&self) -> Duration {
        Duration::from_secs(self.config.rescue_delay_secs)
    }

    fn get_custodian(&self) -> Identity {
        self.ledger.current_contract()
    }

    fn map_address(
        &self,
        origin: OriginAddress,
        destination: DestinationAddress,
    ) -> Result<(), EscrowError> {
        let result = self
            .ledger
            .require_auth(&self.admin)
            .and_then(|_| self.bridge.map(origin, destination));
        self.observe("map_address", result)
    }
}
