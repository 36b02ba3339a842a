//! Simulated file upload.
//!
//! Validation mirrors what a real upload endpoint would demand: a file, a
//! description and at least one tag. The "upload" then completes after a
//! fixed delay with a fake content id and a size-proportional reward.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::task::JoinHandle;

use super::{EventSender, SimEvent};

/// Reward per megabyte uploaded, in COLAB.
const REWARD_PER_MB: f64 = 0.01;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UploadError {
    #[error("Please select a file.")]
    MissingFile,
    #[error("Description and at least one tag are required.")]
    MissingMetadata,
}

/// A file picked for upload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadFile {
    pub name: String,
    pub size: u64,
}

/// Split a comma-separated tag list, trimming and dropping empties.
pub fn parse_tags(csv: &str) -> Vec<String> {
    csv.split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

/// A validated upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadRequest {
    pub file: UploadFile,
    pub description: String,
    pub tags: Vec<String>,
}

impl UploadRequest {
    /// Validate raw form input.
    pub fn validate(
        file: Option<UploadFile>,
        description: &str,
        tags_csv: &str,
    ) -> Result<Self, UploadError> {
        let file = file.ok_or(UploadError::MissingFile)?;
        let description = description.trim();
        let tags = parse_tags(tags_csv);
        if description.is_empty() || tags.is_empty() {
            return Err(UploadError::MissingMetadata);
        }
        Ok(Self {
            file,
            description: description.to_string(),
            tags,
        })
    }
}

/// Outcome of a simulated upload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UploadReceipt {
    pub file_name: String,
    pub cid: String,
    pub reward: f64,
}

impl UploadReceipt {
    pub fn for_file(file: &UploadFile) -> Self {
        let prefix: String = file.name.chars().take(5).collect();
        Self {
            file_name: file.name.clone(),
            cid: format!("FAKE_CID_{prefix}"),
            reward: file.size as f64 / 1_000_000.0 * REWARD_PER_MB,
        }
    }

    /// Status line shown once the upload is done.
    pub fn status_line(&self) -> String {
        format!(
            "Success! File uploaded. CID: {}. Reward: {:.4} COLAB.",
            self.cid, self.reward
        )
    }
}

/// Complete `request` after `delay`. Must be called within a tokio runtime.
pub fn simulate_upload(
    request: UploadRequest,
    delay: Duration,
    tx: EventSender,
) -> JoinHandle<()> {
    tracing::info!(
        file = %request.file.name,
        size = request.file.size,
        tags = ?request.tags,
        "Uploading"
    );
    tokio::spawn(async move {
        tokio::time::sleep(delay).await;
        let receipt = UploadReceipt::for_file(&request.file);
        tracing::debug!(cid = %receipt.cid, "Simulated upload complete");
        if tx.send(SimEvent::UploadComplete(receipt)).is_err() {
            tracing::debug!("Event receiver gone, upload receipt dropped");
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulate::{event_channel, UPLOAD_DELAY};

    fn file(name: &str, size: u64) -> Option<UploadFile> {
        Some(UploadFile {
            name: name.to_string(),
            size,
        })
    }

    #[test]
    fn test_parse_tags() {
        assert_eq!(parse_tags(" ai, ,data ,, ml "), vec!["ai", "data", "ml"]);
        assert!(parse_tags(" , ,").is_empty());
    }

    #[test]
    fn test_validate_requires_file() {
        let err = UploadRequest::validate(None, "desc", "tag").unwrap_err();
        assert_eq!(err, UploadError::MissingFile);
        assert_eq!(err.to_string(), "Please select a file.");
    }

    #[test]
    fn test_validate_requires_description_and_tags() {
        assert_eq!(
            UploadRequest::validate(file("a.csv", 1), "  ", "tag"),
            Err(UploadError::MissingMetadata)
        );
        assert_eq!(
            UploadRequest::validate(file("a.csv", 1), "desc", " , "),
            Err(UploadError::MissingMetadata)
        );
    }

    #[test]
    fn test_validate_accepts_complete_input() {
        let req =
            UploadRequest::validate(file("a.csv", 1), " Survey data ", "survey, 2024").unwrap();
        assert_eq!(req.description, "Survey data");
        assert_eq!(req.tags, vec!["survey", "2024"]);
    }

    #[test]
    fn test_receipt_for_file() {
        let receipt = UploadReceipt::for_file(&UploadFile {
            name: "dataset.parquet".to_string(),
            size: 2_500_000,
        });
        assert_eq!(receipt.cid, "FAKE_CID_datas");
        assert_eq!(
            receipt.status_line(),
            "Success! File uploaded. CID: FAKE_CID_datas. Reward: 0.0250 COLAB."
        );
    }

    #[test]
    fn test_receipt_short_name() {
        let receipt = UploadReceipt::for_file(&UploadFile {
            name: "a.md".to_string(),
            size: 0,
        });
        assert_eq!(receipt.cid, "FAKE_CID_a.md");
        assert_eq!(receipt.reward, 0.0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_upload_completes_after_delay() {
        let (tx, mut rx) = event_channel();
        let req = UploadRequest::validate(file("notes.txt", 1_000_000), "notes", "misc").unwrap();
        let handle = simulate_upload(req, UPLOAD_DELAY, tx);

        assert!(rx.try_recv().is_err());
        handle.await.unwrap();

        match rx.recv().await.unwrap() {
            SimEvent::UploadComplete(receipt) => {
                assert_eq!(receipt.cid, "FAKE_CID_notes");
                assert!((receipt.reward - 0.01).abs() < 1e-12);
            }
            other => panic!("unexpected event: {other:?}"),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_upload_task_finishes_when_receiver_dropped() {
        let (tx, rx) = event_channel();
        drop(rx);
        let req = UploadRequest::validate(file("notes.txt", 10), "notes", "misc").unwrap();
        simulate_upload(req, UPLOAD_DELAY, tx).await.unwrap();
    }
}
