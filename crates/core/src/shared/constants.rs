pub const FACE_MODEL_NAME: &str = "yolo11n-pose_widerface.onnx";
pub const FACE_MODEL_URL: &str =
    "https://github.com/neutrinographics/faceguard/releases/download/v0.1.0/yolo11n-pose_widerface.onnx";

pub const EMOTION_MODEL_NAME: &str = "emotion-ferplus-8.onnx";
pub const EMOTION_MODEL_URL: &str =
    "https://github.com/onnx/models/raw/main/validated/vision/body_analysis/emotion_ferplus/model/emotion-ferplus-8.onnx";

pub const DEFAULT_MODEL_DIR: &str = "model";
pub const GENDER_PROTOTXT: &str = "gender_deploy.prototxt";
pub const GENDER_WEIGHTS: &str = "gender_net.caffemodel";
pub const AGE_PROTOTXT: &str = "age_deploy.prototxt";
pub const AGE_WEIGHTS: &str = "age_net.caffemodel";

pub const GENDER_LABELS: &[&str] = &["Pria", "Wanita"];
pub const AGE_BRACKETS: &[&str] = &[
    "(0-2)", "(4-6)", "(8-12)", "(15-20)", "(25-32)", "(38-43)", "(48-53)", "(60-100)",
];

/// Classifier input side length in pixels.
pub const BLOB_SIZE: usize = 227;

/// Per-channel mean subtracted from the crop, in the frame's own (BGR) order.
pub const BLOB_MEAN: [f32; 3] = [78.426, 87.769, 114.896];

/// Shown when the analyzer reports no dominant emotion for a face.
pub const UNKNOWN_EMOTION: &str = "Tidak diketahui";

pub const DEFAULT_CAMERA_INDEX: i32 = 0;
pub const WINDOW_TITLE: &str = "Deteksi Wajah";
pub const QUIT_KEY: char = 'q';
pub const KEY_POLL_DELAY_MS: i32 = 1;

/// BGR green.
pub const ANNOTATION_COLOR: [u8; 3] = [0, 255, 0];
pub const BOX_THICKNESS: i32 = 2;
pub const LABEL_FONT_SCALE: f64 = 0.7;
pub const LABEL_THICKNESS: i32 = 2;
/// Label baseline sits this many pixels above the box's top edge.
pub const LABEL_OFFSET_Y: i32 = 10;
