//! Audio sink that writes each clip to a numbered file.
//!
//! Stands in for a speaker in terminal sessions: "playback" is complete once
//! the file is on disk.

use std::path::{Path, PathBuf};

use brandkit_core::service::speech::AudioSink;
use brandkit_types::error::VoiceError;
use brandkit_types::media::AudioClip;

#[derive(Debug)]
pub struct FileAudioSink {
    dir: PathBuf,
    written: Vec<PathBuf>,
}

impl FileAudioSink {
    /// Create the sink, creating `dir` if needed.
    pub async fn create(dir: impl Into<PathBuf>) -> Result<Self, VoiceError> {
        let dir = dir.into();
        tokio::fs::create_dir_all(&dir)
            .await
            .map_err(|e| VoiceError::Playback(format!("{}: {e}", dir.display())))?;
        Ok(Self {
            dir,
            written: Vec::new(),
        })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Files written so far, oldest first.
    pub fn written(&self) -> &[PathBuf] {
        &self.written
    }
}

impl AudioSink for FileAudioSink {
    async fn play(&mut self, clip: &AudioClip) -> Result<(), VoiceError> {
        let path = self.dir.join(format!(
            "reply-{:03}.{}",
            self.written.len() + 1,
            clip.extension()
        ));
        tokio::fs::write(&path, &clip.bytes)
            .await
            .map_err(|e| VoiceError::Playback(format!("{}: {e}", path.display())))?;
        tracing::debug!(path = %path.display(), "wrote reply audio");
        self.written.push(path);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn writes_numbered_files() {
        let tmp = TempDir::new().unwrap();
        let mut sink = FileAudioSink::create(tmp.path().join("voice")).await.unwrap();

        sink.play(&AudioClip::mpeg(vec![1, 2])).await.unwrap();
        sink.play(&AudioClip::mpeg(vec![3])).await.unwrap();

        assert_eq!(sink.written().len(), 2);
        assert!(sink.written()[1].ends_with("reply-002.mp3"));
        let bytes = tokio::fs::read(&sink.written()[0]).await.unwrap();
        assert_eq!(bytes, vec![1, 2]);
    }
}
