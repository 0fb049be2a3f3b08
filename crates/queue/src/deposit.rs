use crate::DepositQueueError;

use alloy_primitives::{Address, B256};
use settlement_primitives::DepositData;

/// The queue of deposits waiting to be analyzed and relayed.
///
/// Deposit ids start at 1. The queue keeps `front <= last_analyzed_deposit_id + 1 <= rear`:
/// `front` only advances on collection and `last_analyzed_deposit_id` only on analysis.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DepositQueue {
    deposit_data: Vec<DepositData>,
    front: u64,
    last_analyzed_deposit_id: u64,
}

impl Default for DepositQueue {
    fn default() -> Self {
        Self::new()
    }
}

impl DepositQueue {
    /// Returns an empty deposit queue.
    pub fn new() -> Self {
        Self { deposit_data: vec![DepositData::default()], front: 1, last_analyzed_deposit_id: 0 }
    }

    /// Appends a deposit and returns its id.
    pub fn enqueue(&mut self, deposit_hash: B256, sender: Address) -> u64 {
        let deposit_id = self.rear();
        self.deposit_data.push(DepositData::new(deposit_hash, sender));
        deposit_id
    }

    /// Marks every deposit up to `up_to_deposit_id` as analyzed, rejecting the given ids.
    pub fn analyze(
        &mut self,
        up_to_deposit_id: u64,
        rejected_deposit_ids: &[u64],
    ) -> Result<(), DepositQueueError> {
        let rear = self.rear();
        let last_analyzed = self.last_analyzed_deposit_id;
        if up_to_deposit_id >= rear {
            return Err(DepositQueueError::TriedAnalyzeNotExists { up_to: up_to_deposit_id, rear });
        }
        if up_to_deposit_id <= last_analyzed {
            return Err(DepositQueueError::UpToDepositIdIsTooOld {
                up_to: up_to_deposit_id,
                last_analyzed,
            });
        }
        if let Some(&rejected_id) = rejected_deposit_ids
            .iter()
            .find(|&&id| id <= last_analyzed || id > up_to_deposit_id)
        {
            return Err(DepositQueueError::TriedToRejectOutOfRange {
                rejected_id,
                up_to: up_to_deposit_id,
                last_analyzed,
            });
        }

        for &id in rejected_deposit_ids {
            self.deposit_data[id as usize].is_rejected = true;
        }
        self.last_analyzed_deposit_id = up_to_deposit_id;

        tracing::trace!(
            target: "settlement::queue",
            up_to_deposit_id,
            rejected = rejected_deposit_ids.len(),
            "analyzed deposits"
        );
        Ok(())
    }

    /// Collects the hashes of the accepted deposits between the front of the queue and
    /// `up_to_deposit_id`, deleting their entries. Rejected entries are kept for reclaim.
    pub fn collect_accepted_deposits(
        &mut self,
        up_to_deposit_id: u64,
    ) -> Result<Vec<B256>, DepositQueueError> {
        if up_to_deposit_id > self.last_analyzed_deposit_id {
            return Err(DepositQueueError::TriedCollectDepositsNotAnalyzedYet {
                up_to: up_to_deposit_id,
                last_analyzed: self.last_analyzed_deposit_id,
            });
        }
        if up_to_deposit_id < self.front {
            return Ok(Vec::new());
        }

        let mut accepted = Vec::new();
        for data in &mut self.deposit_data[self.front as usize..=up_to_deposit_id as usize] {
            if data.is_rejected || data.is_empty() {
                continue;
            }
            accepted.push(data.deposit_hash);
            *data = DepositData::default();
        }
        self.front = up_to_deposit_id + 1;

        Ok(accepted)
    }

    /// Deletes the entry of a deposit and returns its previous content. Deleting an unknown or
    /// already deleted deposit returns an empty entry.
    pub fn delete_deposit(&mut self, deposit_id: u64) -> DepositData {
        if deposit_id == 0 {
            return DepositData::default();
        }
        self.deposit_data
            .get_mut(deposit_id as usize)
            .map(std::mem::take)
            .unwrap_or_default()
    }

    /// Returns the entry of a deposit.
    pub fn get(&self, deposit_id: u64) -> Option<&DepositData> {
        if deposit_id == 0 {
            return None;
        }
        self.deposit_data.get(deposit_id as usize)
    }

    /// Returns the id of the first deposit not yet collected.
    pub const fn front(&self) -> u64 {
        self.front
    }

    /// Returns the id the next deposit will get.
    pub fn rear(&self) -> u64 {
        self.deposit_data.len() as u64
    }

    /// Returns the id of the last analyzed deposit.
    pub const fn last_analyzed_deposit_id(&self) -> u64 {
        self.last_analyzed_deposit_id
    }

    /// Returns the id of the last enqueued deposit.
    pub fn last_deposit_id(&self) -> u64 {
        self.rear() - 1
    }
}
