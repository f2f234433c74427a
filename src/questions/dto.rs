use serde::{Deserialize, Deserializer, Serialize};

use crate::questions::repo_types::QuestionAnswer;

/// Body of `start_interview` and `more_questions`.
#[derive(Debug, Deserialize)]
pub struct AssignRequest {
    pub user_id: i64,
    pub interview_id: i64,
}

/// Partial update of a QuestionAnswer.
///
/// Nullable columns are tri-state: `None` leaves the column alone, `Some(None)`
/// clears it, `Some(Some(v))` sets it. `status` cannot be cleared, so a JSON
/// `null` there is treated the same as an absent key.
#[derive(Debug, Default, Deserialize)]
pub struct QuestionAnswerPatch {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default, deserialize_with = "present")]
    pub answer_text: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub camera_recording_path: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub screen_recording_path: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub audio_recording_path: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub combined_recording_path: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub ai_answer: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub ai_remark: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub candidate_score: Option<Option<f64>>,
    #[serde(default, deserialize_with = "present")]
    pub candidate_grade: Option<Option<String>>,
}

/// Only called when the key is present, so the outer `Some` marks presence.
fn present<'de, T, D>(de: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(de).map(Some)
}

fn set<T>(target: &mut T, value: Option<T>) {
    if let Some(v) = value {
        *target = v;
    }
}

impl QuestionAnswerPatch {
    /// Names of the fields this patch touches, for logging.
    pub fn touched(&self) -> Vec<&'static str> {
        let flags = [
            ("status", self.status.is_some()),
            ("answer_text", self.answer_text.is_some()),
            ("camera_recording_path", self.camera_recording_path.is_some()),
            ("screen_recording_path", self.screen_recording_path.is_some()),
            ("audio_recording_path", self.audio_recording_path.is_some()),
            ("combined_recording_path", self.combined_recording_path.is_some()),
            ("ai_answer", self.ai_answer.is_some()),
            ("ai_remark", self.ai_remark.is_some()),
            ("candidate_score", self.candidate_score.is_some()),
            ("candidate_grade", self.candidate_grade.is_some()),
        ];
        flags
            .into_iter()
            .filter_map(|(name, on)| on.then_some(name))
            .collect()
    }

    pub fn apply(self, qa: &mut QuestionAnswer) {
        set(&mut qa.status, self.status);
        set(&mut qa.answer_text, self.answer_text);
        set(&mut qa.camera_recording_path, self.camera_recording_path);
        set(&mut qa.screen_recording_path, self.screen_recording_path);
        set(&mut qa.audio_recording_path, self.audio_recording_path);
        set(&mut qa.combined_recording_path, self.combined_recording_path);
        set(&mut qa.ai_answer, self.ai_answer);
        set(&mut qa.ai_remark, self.ai_remark);
        set(&mut qa.candidate_score, self.candidate_score);
        set(&mut qa.candidate_grade, self.candidate_grade);
    }
}

#[derive(Debug, Serialize)]
pub struct RecordingUploaded {
    pub path: String,
}
