use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{Result, StudioError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VideoJobStatus {
    Generating,
    Complete,
    Failed,
}

/// A queued video generation. Status is set once by whoever receives the
/// response; there is no polling or persistence behind it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoJob {
    pub id: String,
    pub prompt: String,
    pub status: VideoJobStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub video_url: Option<String>,
}

impl VideoJob {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            prompt: prompt.into(),
            status: VideoJobStatus::Generating,
            video_url: None,
        }
    }

    pub fn complete(&mut self, video_url: impl Into<String>) -> Result<()> {
        self.ensure_generating()?;
        self.status = VideoJobStatus::Complete;
        self.video_url = Some(video_url.into());
        Ok(())
    }

    pub fn fail(&mut self) -> Result<()> {
        self.ensure_generating()?;
        self.status = VideoJobStatus::Failed;
        Ok(())
    }

    pub fn is_finished(&self) -> bool {
        self.status != VideoJobStatus::Generating
    }

    /// Only completed jobs with a video can be downloaded.
    pub fn download_filename(&self) -> Option<String> {
        match (self.status, &self.video_url) {
            (VideoJobStatus::Complete, Some(_)) => Some(format!("ai-video-{}.mp4", self.id)),
            _ => None,
        }
    }

    fn ensure_generating(&self) -> Result<()> {
        if self.status != VideoJobStatus::Generating {
            return Err(StudioError::InternalError(format!(
                "video job {} already finished as {:?}",
                self.id, self.status
            )));
        }
        Ok(())
    }
}
