//! Read-only view over the oracle's circular price history.
//!
//! The buffer is a fixed arena of 28-byte slots owned by the oracle program.
//! The oracle advances `insertion_idx` on every append and overwrites the
//! oldest slot once the arena is full; slots not yet written are all zero
//! bytes. Lookups map a logical position (0 = oldest) onto the arena so
//! the rows can be binary searched without copying.

use anchor_lang::prelude::*;
use bytemuck::{Pod, Zeroable};

use crate::{errors::VolError, state::Decimal};

/// A single history slot: `{ timestamp: i64, value: Decimal }`, packed.
#[repr(C, packed)]
#[derive(Clone, Copy, Default, Pod, Zeroable)]
pub struct HistoryRow {
    timestamp: i64,
    mantissa: i128,
    scale: u32,
}

impl HistoryRow {
    pub const SIZE: usize = 8 + Decimal::SIZE;

    pub fn new(timestamp: i64, price: Decimal) -> Self {
        Self {
            timestamp,
            mantissa: price.mantissa,
            scale: price.scale,
        }
    }

    pub fn timestamp(&self) -> i64 {
        self.timestamp
    }

    pub fn price(&self) -> Decimal {
        Decimal::new(self.mantissa, self.scale)
    }

    /// A row at `t = 0` with a non-zero price still counts as written.
    fn is_written(&self) -> bool {
        bytemuck::bytes_of(self).iter().any(|&byte| byte != 0)
    }
}

impl std::fmt::Debug for HistoryRow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HistoryRow")
            .field("timestamp", &self.timestamp())
            .field("price", &self.price())
            .finish()
    }
}

#[derive(Clone, Copy, Debug)]
pub struct HistoryBuffer<'a> {
    rows: &'a [HistoryRow],
    /// Arena slot holding the oldest row
    head: usize,
    len: usize,
}

impl<'a> HistoryBuffer<'a> {
    pub const DISCRIMINATOR: [u8; 8] = *b"BUFFERxx";
    pub const HEADER_LEN: usize = 8 + // discriminator
        4; // insertion_idx

    /// `insertion_idx` is the arena slot the oracle will write next.
    pub fn new(rows: &'a [HistoryRow], insertion_idx: usize) -> Result<Self> {
        require!(!rows.is_empty(), VolError::InvalidHistoryBuffer);
        require_gt!(rows.len(), insertion_idx, VolError::InvalidHistoryBuffer);

        // The last slot is written only once the arena has filled up, after
        // which the next slot to overwrite is the oldest one
        let (head, len) = if rows[rows.len() - 1].is_written() {
            (insertion_idx, rows.len())
        } else {
            (0, insertion_idx)
        };

        Ok(Self { rows, head, len })
    }

    pub fn from_account_data(data: &'a [u8]) -> Result<Self> {
        require_gte!(data.len(), Self::HEADER_LEN, VolError::InvalidHistoryBuffer);
        require!(
            data[..8] == Self::DISCRIMINATOR,
            VolError::InvalidHistoryBuffer
        );

        let insertion_idx = data[8..Self::HEADER_LEN]
            .try_into()
            .map(u32::from_le_bytes)
            .map_err(|_| error!(VolError::InvalidHistoryBuffer))?;

        let body = &data[Self::HEADER_LEN..];
        let capacity = body.len() / HistoryRow::SIZE;
        let rows: &[HistoryRow] = bytemuck::try_cast_slice(&body[..capacity * HistoryRow::SIZE])
            .map_err(|_| error!(VolError::InvalidHistoryBuffer))?;

        Self::new(rows, insertion_idx as usize)
    }

    pub fn capacity(&self) -> usize {
        self.rows.len()
    }

    /// Number of written rows.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Row at logical position `index`, 0 being the oldest.
    pub fn get(&self, index: usize) -> Option<HistoryRow> {
        (index < self.len).then(|| self.rows[(self.head + index) % self.rows.len()])
    }

    pub fn oldest(&self) -> Option<HistoryRow> {
        self.get(0)
    }

    pub fn latest(&self) -> Option<HistoryRow> {
        self.len.checked_sub(1).and_then(|index| self.get(index))
    }

    pub fn iter(&self) -> impl Iterator<Item = HistoryRow> + '_ {
        (0..self.len).filter_map(move |index| self.get(index))
    }

    /// Most recent row with `timestamp <= at`.
    pub fn latest_at_or_before(&self, at: i64) -> Option<HistoryRow> {
        let (mut low, mut high) = (0, self.len);
        while low < high {
            let mid = low + (high - low) / 2;
            match self.get(mid) {
                Some(row) if row.timestamp() <= at => low = mid + 1,
                _ => high = mid,
            }
        }
        low.checked_sub(1).and_then(|index| self.get(index))
    }
}
