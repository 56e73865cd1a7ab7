//! # Timelock Codec
//!
//! Eight 32-bit sub-fields packed into one `U256`:
//!
//! ```text
//! bits [0, 32)     src_withdrawal
//! bits [32, 64)    src_public_withdrawal
//! bits [64, 96)    src_cancellation
//! bits [96, 128)   src_public_cancellation
//! bits [128, 160)  dst_withdrawal
//! bits [160, 192)  dst_public_withdrawal
//! bits [192, 224)  dst_cancellation
//! bits [224, 256)  deployed_at (absolute)
//! ```
//!
//! Every stage value is an offset from `deployed_at`. All arithmetic is
//! checked and overflow is an error.

use crate::domain::{TimeLockError, TimelockStage, WindowEdges};
use primitive_types::U256;
use serde::{Deserialize, Serialize};

const DEPLOYED_AT_OFFSET: usize = 224;

/// Unpacked timelock values.
///
/// Held as `u64` so out-of-range inputs are detected instead of truncated.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimelockFields {
    /// Absolute deployment timestamp (0 until stamped).
    pub deployed_at: u64,
    /// Offset of the private withdrawal stage on the source ledger.
    pub src_withdrawal: u64,
    /// Offset of the public withdrawal stage on the source ledger.
    pub src_public_withdrawal: u64,
    /// Offset of the private cancellation stage on the source ledger.
    pub src_cancellation: u64,
    /// Offset of the public cancellation stage on the source ledger.
    pub src_public_cancellation: u64,
    /// Offset of the private withdrawal stage on the destination ledger.
    pub dst_withdrawal: u64,
    /// Offset of the public withdrawal stage on the destination ledger.
    pub dst_public_withdrawal: u64,
    /// Offset of the cancellation stage on the destination ledger.
    pub dst_cancellation: u64,
}

impl TimelockFields {
    /// Offset for one stage.
    pub fn offset(&self, stage: TimelockStage) -> u64 {
        match stage {
            TimelockStage::SrcWithdrawal => self.src_withdrawal,
            TimelockStage::SrcPublicWithdrawal => self.src_public_withdrawal,
            TimelockStage::SrcCancellation => self.src_cancellation,
            TimelockStage::SrcPublicCancellation => self.src_public_cancellation,
            TimelockStage::DstWithdrawal => self.dst_withdrawal,
            TimelockStage::DstPublicWithdrawal => self.dst_public_withdrawal,
            TimelockStage::DstCancellation => self.dst_cancellation,
        }
    }

    fn set_offset(&mut self, stage: TimelockStage, value: u64) {
        match stage {
            TimelockStage::SrcWithdrawal => self.src_withdrawal = value,
            TimelockStage::SrcPublicWithdrawal => self.src_public_withdrawal = value,
            TimelockStage::SrcCancellation => self.src_cancellation = value,
            TimelockStage::SrcPublicCancellation => self.src_public_cancellation = value,
            TimelockStage::DstWithdrawal => self.dst_withdrawal = value,
            TimelockStage::DstPublicWithdrawal => self.dst_public_withdrawal = value,
            TimelockStage::DstCancellation => self.dst_cancellation = value,
        }
    }
}

/// Packed timelocks, shared verbatim across both ledgers.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Timelocks(U256);

/// Pack and validate.
///
/// `rescue_delay` is the deployment-wide delay; `deployed_at + rescue_delay`
/// must fit the 32-bit timestamp field.
pub fn pack(fields: &TimelockFields, rescue_delay: u64) -> Result<Timelocks, TimeLockError> {
    let max = u64::from(u32::MAX);

    if fields.deployed_at > max {
        return Err(TimeLockError::TimelockValueOverflow);
    }
    for stage in TimelockStage::ALL {
        let offset = fields.offset(stage);
        if offset > max {
            return Err(TimeLockError::TimelockValueOverflow);
        }
        // Absolute stage times share the 32-bit width once stamped.
        if fields.deployed_at != 0 && fields.deployed_at + offset > max {
            return Err(TimeLockError::TimelockValueOverflow);
        }
    }

    if !(fields.src_withdrawal < fields.src_public_withdrawal
        && fields.src_public_withdrawal < fields.src_cancellation
        && fields.src_cancellation < fields.src_public_cancellation)
    {
        return Err(TimeLockError::InvalidSourceChainTimelockOrdering);
    }
    if !(fields.dst_withdrawal < fields.dst_public_withdrawal
        && fields.dst_public_withdrawal < fields.dst_cancellation)
    {
        return Err(TimeLockError::InvalidDestinationChainTimelockOrdering);
    }

    match fields.deployed_at.checked_add(rescue_delay) {
        Some(start) if start <= max => {}
        _ => return Err(TimeLockError::RescueStartOverflow),
    }

    let mut packed = U256::from(fields.deployed_at) << DEPLOYED_AT_OFFSET;
    for stage in TimelockStage::ALL {
        packed = packed | (U256::from(fields.offset(stage)) << stage.bit_offset() as usize);
    }
    Ok(Timelocks(packed))
}

/// Unpack into the eight fields. Never fails.
pub fn unpack(timelocks: &Timelocks) -> TimelockFields {
    let mut fields = TimelockFields {
        deployed_at: u64::from(timelocks.deployed_at()),
        ..TimelockFields::default()
    };
    for stage in TimelockStage::ALL {
        fields.set_offset(stage, u64::from(timelocks.offset(stage)));
    }
    fields
}

/// Has `stage` begun at ledger time `now`?
pub fn elapsed(
    timelocks: &Timelocks,
    stage: TimelockStage,
    now: u64,
    edges: WindowEdges,
) -> Result<bool, TimeLockError> {
    let start = timelocks.stage_start(stage)?;
    Ok(edges.reached(now, start))
}

impl Timelocks {
    fn field(&self, bit_offset: usize) -> u32 {
        (self.0 >> bit_offset).low_u32()
    }

    /// Raw packed value.
    pub fn as_u256(&self) -> U256 {
        self.0
    }

    /// Wrap a raw packed value without validation.
    pub fn from_u256(value: U256) -> Self {
        Self(value)
    }

    /// Absolute deployment timestamp.
    pub fn deployed_at(&self) -> u32 {
        self.field(DEPLOYED_AT_OFFSET)
    }

    /// Relative offset of a stage.
    pub fn offset(&self, stage: TimelockStage) -> u32 {
        self.field(stage.bit_offset() as usize)
    }

    /// Absolute start time of a stage.
    pub fn stage_start(&self, stage: TimelockStage) -> Result<u64, TimeLockError> {
        let deployed_at = self.deployed_at();
        if deployed_at == 0 {
            return Err(TimeLockError::DeploymentTimestampNotSet);
        }
        deployed_at
            .checked_add(self.offset(stage))
            .map(u64::from)
            .ok_or(TimeLockError::TimelockValueOverflow)
    }

    /// Earliest time at which funds may be rescued.
    pub fn rescue_start(&self, rescue_delay: u64) -> Result<u64, TimeLockError> {
        let deployed_at = u64::from(self.deployed_at());
        if deployed_at == 0 {
            return Err(TimeLockError::DeploymentTimestampNotSet);
        }
        match deployed_at.checked_add(rescue_delay) {
            Some(start) if start <= u64::from(u32::MAX) => Ok(start),
            _ => Err(TimeLockError::RescueStartOverflow),
        }
    }

    /// Stamp the deployment time, re-validating every bound against it.
    pub fn with_deployed_at(&self, now: u64, rescue_delay: u64) -> Result<Self, TimeLockError> {
        if now == 0 {
            return Err(TimeLockError::DeploymentTimestampNotSet);
        }
        let mut fields = unpack(self);
        fields.deployed_at = now;
        pack(&fields, rescue_delay)
    }

    /// 32-byte big-endian form.
    pub fn to_be_bytes(&self) -> [u8; 32] {
        let mut bytes = [0u8; 32];
        self.0.to_big_endian(&mut bytes);
        bytes
    }

    /// Parse the 32-byte big-endian form.
    pub fn from_be_bytes(bytes: &[u8; 32]) -> Self {
        Self(U256::from_big_endian(bytes))
    }
}
