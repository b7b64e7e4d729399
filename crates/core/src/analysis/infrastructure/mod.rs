pub mod math;
pub mod model_resolver;
pub mod onnx_emotion_recognizer;
pub mod onnx_face_detector;
pub mod session;
