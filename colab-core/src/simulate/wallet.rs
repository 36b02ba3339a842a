//! In-memory wallet fed by simulated upload rewards.

use chrono::{DateTime, Utc};

use super::UploadReceipt;

/// One credited reward.
#[derive(Debug, Clone, PartialEq)]
pub struct RewardEntry {
    pub file_name: String,
    pub cid: String,
    pub amount: f64,
    pub credited_at: DateTime<Utc>,
}

/// Rewards earned this session, newest first.
#[derive(Debug, Clone, Default)]
pub struct Wallet {
    entries: Vec<RewardEntry>,
}

impl Wallet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Credit the reward of a finished upload.
    pub fn credit(&mut self, receipt: &UploadReceipt) {
        self.entries.insert(
            0,
            RewardEntry {
                file_name: receipt.file_name.clone(),
                cid: receipt.cid.clone(),
                amount: receipt.reward,
                credited_at: Utc::now(),
            },
        );
    }

    pub fn balance(&self) -> f64 {
        self.entries.iter().map(|e| e.amount).sum()
    }

    pub fn entries(&self) -> &[RewardEntry] {
        &self.entries
    }
}
