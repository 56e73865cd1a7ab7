//! # Time Windows
//!
//! Which stage of a swap is open at a given ledger time, per role.
//!
//! ```text
//! Source:       withdrawal -> public_withdrawal -> cancellation -> public_cancellation
//! Destination:  withdrawal -> public_withdrawal -> cancellation
//! ```
//!
//! Withdrawal closes when cancellation opens. Cancellation never closes.

use crate::algorithms::timelock::Timelocks;
use crate::domain::{EscrowError, Role, TimelockStage, WindowEdges};

/// Who may act in the currently open window.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Access {
    /// Only the designated participant.
    Private,
    /// Anyone.
    Public,
}

struct Window {
    private: TimelockStage,
    public: Option<TimelockStage>,
    close: Option<TimelockStage>,
}

fn withdrawal_window(role: Role) -> Window {
    match role {
        Role::Source => Window {
            private: TimelockStage::SrcWithdrawal,
            public: Some(TimelockStage::SrcPublicWithdrawal),
            close: Some(TimelockStage::SrcCancellation),
        },
        Role::Destination => Window {
            private: TimelockStage::DstWithdrawal,
            public: Some(TimelockStage::DstPublicWithdrawal),
            close: Some(TimelockStage::DstCancellation),
        },
    }
}

fn cancellation_window(role: Role) -> Window {
    match role {
        Role::Source => Window {
            private: TimelockStage::SrcCancellation,
            public: Some(TimelockStage::SrcPublicCancellation),
            close: None,
        },
        Role::Destination => Window {
            private: TimelockStage::DstCancellation,
            public: None,
            close: None,
        },
    }
}

fn evaluate(
    window: Window,
    timelocks: &Timelocks,
    now: u64,
    edges: WindowEdges,
) -> Result<Access, EscrowError> {
    let reached = |stage: TimelockStage| -> Result<bool, EscrowError> {
        Ok(edges.reached(now, timelocks.stage_start(stage)?))
    };

    if !reached(window.private)? {
        return Err(EscrowError::InvalidTime);
    }
    if let Some(close) = window.close {
        if reached(close)? {
            return Err(EscrowError::InvalidTime);
        }
    }
    match window.public {
        Some(public) if reached(public)? => Ok(Access::Public),
        _ => Ok(Access::Private),
    }
}

/// Access level for `withdraw` at `now`, or `InvalidTime`.
pub fn withdrawal_access(
    role: Role,
    timelocks: &Timelocks,
    now: u64,
    edges: WindowEdges,
) -> Result<Access, EscrowError> {
    evaluate(withdrawal_window(role), timelocks, now, edges)
}

/// Access level for `cancel` at `now`, or `InvalidTime`.
pub fn cancellation_access(
    role: Role,
    timelocks: &Timelocks,
    now: u64,
    edges: WindowEdges,
) -> Result<Access, EscrowError> {
    evaluate(cancellation_window(role), timelocks, now, edges)
}

/// `Ok` once the rescue delay has passed.
pub fn rescue_open(
    timelocks: &Timelocks,
    rescue_delay: u64,
    now: u64,
    edges: WindowEdges,
) -> Result<(), EscrowError> {
    let start = timelocks.rescue_start(rescue_delay)?;
    if !edges.reached(now, start) {
        return Err(EscrowError::InvalidTime);
    }
    Ok(())
}
