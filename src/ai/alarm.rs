use super::AiError;
use log::warn;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlarmRequest {
    pub task_description: String,
}

/// A spoken motivational alarm: the text and its audio as a base64 data URI
/// (mono 24 kHz 16-bit PCM wrapped in WAV)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskAlarm {
    pub message: String,
    pub audio_data_uri: String,
}

impl TaskAlarm {
    /// MIME type of the audio payload, e.g. `audio/wav`
    pub fn media_type(&self) -> Option<&str> {
        let rest = self.audio_data_uri.strip_prefix("data:")?;
        let (media, payload) = rest.split_once(";base64,")?;
        if media.starts_with("audio/") && !payload.is_empty() {
            Some(media)
        } else {
            None
        }
    }
}

pub trait AlarmGenerator {
    fn generate_task_alarm(&self, request: &AlarmRequest) -> Result<TaskAlarm, AiError>;
}

/// Generate an alarm for a task, failing when no usable audio came back.
///
/// The caller decides what to show on failure; nothing is retried.
pub fn request_alarm<G: AlarmGenerator + ?Sized>(
    generator: &G,
    description: &str,
) -> Result<TaskAlarm, AiError> {
    let request = AlarmRequest {
        task_description: description.to_string(),
    };
    let alarm = generator.generate_task_alarm(&request).map_err(|e| {
        warn!("Alarm generation failed: {}", e);
        e
    })?;

    if alarm.media_type().is_none() {
        warn!("Alarm response carried no audio for {:?}", description);
        return Err(AiError::MissingAudio);
    }
    Ok(alarm)
}
