pub mod emotion;
pub mod emotion_recognizer;
pub mod face_analyzer;
pub mod face_detector;
pub mod face_emotion_analyzer;
