use crate::classification::domain::labels::argmax;

/// Emotion classes in the order the FER+ model emits its scores.
pub const EMOTION_LABELS: &[&str] = &[
    "neutral", "happy", "surprise", "sad", "angry", "disgust", "fear", "contempt",
];

/// Highest-scoring emotion, or `None` when the scores don't match the label set.
pub fn dominant_emotion(scores: &[f32]) -> Option<&'static str> {
    if scores.len() != EMOTION_LABELS.len() {
        return None;
    }
    argmax(scores).map(|i| EMOTION_LABELS[i])
}
