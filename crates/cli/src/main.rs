use std::path::{Path, PathBuf};
use std::process;

use clap::Parser;

use face_insight_core::analysis::domain::face_analyzer::{DetectionMode, FaceAnalyzer};
use face_insight_core::analysis::domain::face_emotion_analyzer::FaceEmotionAnalyzer;
use face_insight_core::analysis::infrastructure::model_resolver::{
    self, ModelSource, EMOTION_MODEL, FACE_MODEL,
};
use face_insight_core::analysis::infrastructure::onnx_emotion_recognizer::OnnxEmotionRecognizer;
use face_insight_core::analysis::infrastructure::onnx_face_detector::{
    OnnxFaceDetector, DEFAULT_CONFIDENCE,
};
use face_insight_core::annotation::infrastructure::opencv_annotator::OpencvAnnotator;
use face_insight_core::capture::infrastructure::opencv_camera::OpencvCameraSource;
use face_insight_core::classification::domain::age_gender_predictor::AgeGenderPredictor;
use face_insight_core::classification::infrastructure::caffe_classifier::CaffeClassifier;
use face_insight_core::classification::infrastructure::model_files;
use face_insight_core::classification::infrastructure::opencv_blob_builder::OpencvBlobBuilder;
use face_insight_core::display::infrastructure::highgui_display::HighguiDisplay;
use face_insight_core::pipeline::annotate_faces_use_case::{AnnotateFacesUseCase, StopReason};
use face_insight_core::pipeline::pipeline_logger::StdoutPipelineLogger;
use face_insight_core::shared::constants::{
    DEFAULT_CAMERA_INDEX, DEFAULT_MODEL_DIR, WINDOW_TITLE,
};

/// Live webcam annotation with gender, age bracket and emotion.
#[derive(Parser, Debug)]
#[command(name = "face-insight")]
struct Cli {
    /// Camera device index.
    #[arg(long, default_value_t = DEFAULT_CAMERA_INDEX)]
    camera: i32,

    /// Directory holding the gender and age Caffe models.
    #[arg(long, default_value = DEFAULT_MODEL_DIR)]
    model_dir: PathBuf,

    /// Directory checked for the face and emotion ONNX models before downloading.
    #[arg(long)]
    analyzer_model_dir: Option<PathBuf>,

    /// Face detection confidence threshold (0.0-1.0).
    #[arg(long, default_value_t = DEFAULT_CONFIDENCE)]
    confidence: f64,

    /// Treat frames without a detected face as analysis errors instead of
    /// analysing the whole frame.
    #[arg(long)]
    strict: bool,

    /// Display window title.
    #[arg(long, default_value = WINDOW_TITLE)]
    window_title: String,

    /// Log progress every N frames.
    #[arg(long, default_value = "100")]
    summary_every: usize,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    if let Err(e) = run() {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    validate(&cli)?;

    let files = model_files::locate(&cli.model_dir)?;
    let predictor = AgeGenderPredictor::new(
        Box::new(OpencvBlobBuilder),
        Box::new(CaffeClassifier::load("gender", &files.gender)?),
        Box::new(CaffeClassifier::load("age", &files.age)?),
    );
    let analyzer = build_analyzer(&cli)?;

    let source = OpencvCameraSource::open(cli.camera)?;
    let display = HighguiDisplay::open(&cli.window_title)?;
    log::info!("Press 'q' in the window to quit");

    let mut use_case = AnnotateFacesUseCase::new(
        Box::new(source),
        analyzer,
        predictor,
        Box::new(OpencvAnnotator::new()),
        Box::new(display),
        Box::new(StdoutPipelineLogger::new(cli.summary_every)),
    );
    let summary = use_case.run()?;

    let reason = match summary.stop_reason {
        StopReason::QuitKey => "quit key pressed",
        StopReason::EndOfStream => "camera returned no frame",
        StopReason::ReadFailed => "camera read failed",
    };
    log::info!(
        "Stopped after {} frames ({} faces annotated): {reason}",
        summary.frames,
        summary.faces_annotated
    );
    Ok(())
}

fn build_analyzer(cli: &Cli) -> Result<Box<dyn FaceAnalyzer>, Box<dyn std::error::Error>> {
    let bundled = cli.analyzer_model_dir.as_deref();
    let face_model = resolve_model(&FACE_MODEL, bundled)?;
    let emotion_model = resolve_model(&EMOTION_MODEL, bundled)?;

    let mode = if cli.strict {
        DetectionMode::Strict
    } else {
        DetectionMode::Permissive
    };
    Ok(Box::new(FaceEmotionAnalyzer::new(
        Box::new(OnnxFaceDetector::new(&face_model, cli.confidence)?),
        Box::new(OnnxEmotionRecognizer::new(&emotion_model)?),
        mode,
    )))
}

fn resolve_model(
    source: &ModelSource,
    bundled: Option<&Path>,
) -> Result<PathBuf, Box<dyn std::error::Error>> {
    log::info!("Resolving model: {}", source.name);
    let name = source.name;
    let path = model_resolver::resolve(
        source,
        bundled,
        Some(Box::new(move |downloaded, total| {
            download_progress(name, downloaded, total)
        })),
    )?;
    Ok(path)
}

fn validate(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    if !(0.0..=1.0).contains(&cli.confidence) {
        return Err(format!(
            "Confidence must be between 0.0 and 1.0, got {}",
            cli.confidence
        )
        .into());
    }
    if cli.summary_every == 0 {
        return Err("Summary interval must be at least 1 frame".into());
    }
    if let Some(dir) = &cli.analyzer_model_dir {
        if !dir.is_dir() {
            return Err(format!("Analyzer model directory not found: {}", dir.display()).into());
        }
    }
    Ok(())
}

fn download_progress(name: &str, downloaded: u64, total: u64) {
    if total > 0 {
        let pct = (downloaded as f64 / total as f64 * 100.0) as u32;
        eprint!("\rDownloading {name}... {pct}%");
        if downloaded >= total {
            eprintln!();
        }
    } else {
        eprint!("\rDownloading {name}... {downloaded} bytes");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn parse(args: &[&str]) -> Cli {
        let mut argv = vec!["face-insight"];
        argv.extend_from_slice(args);
        Cli::try_parse_from(argv).unwrap()
    }

    fn existing_dir() -> String {
        env!("CARGO_MANIFEST_DIR").to_string()
    }

    #[test]
    fn test_defaults() {
        let cli = parse(&[]);
        assert_eq!(cli.camera, 0);
        assert_eq!(cli.model_dir, PathBuf::from("model"));
        assert_eq!(cli.analyzer_model_dir, None);
        assert_eq!(cli.confidence, 0.5);
        assert!(!cli.strict);
        assert_eq!(cli.window_title, "Deteksi Wajah");
        assert_eq!(cli.summary_every, 100);
    }

    #[test]
    fn test_valid_arguments_pass() {
        let dir = existing_dir();
        let cli = parse(&["--model-dir", &dir, "--confidence", "0.7", "--strict"]);
        assert!(validate(&cli).is_ok());
        assert!(cli.strict);
    }

    #[rstest]
    #[case::too_high("1.5")]
    #[case::negative("-0.1")]
    fn test_confidence_out_of_range(#[case] confidence: &str) {
        let dir = existing_dir();
        let flag = format!("--confidence={confidence}");
        let cli = parse(&["--model-dir", &dir, &flag]);
        let err = validate(&cli).unwrap_err();
        assert!(err.to_string().contains("Confidence"));
    }

    #[test]
    fn test_zero_summary_interval_rejected() {
        let dir = existing_dir();
        let cli = parse(&["--model-dir", &dir, "--summary-every", "0"]);
        assert!(validate(&cli).is_err());
    }

    #[test]
    fn test_missing_model_dir_left_to_model_lookup() {
        let cli = parse(&["--model-dir", "/nonexistent/face-insight/models"]);
        assert!(validate(&cli).is_ok());

        let err = model_files::locate(&cli.model_dir).unwrap_err();
        assert!(err.to_string().contains("gender_deploy.prototxt"));
        assert!(err.to_string().contains("gender_net.caffemodel"));
    }

    #[test]
    fn test_missing_analyzer_model_dir_rejected() {
        let dir = existing_dir();
        let cli = parse(&[
            "--model-dir",
            &dir,
            "--analyzer-model-dir",
            "/nonexistent/onnx",
        ]);
        assert!(validate(&cli).is_err());
    }
}
