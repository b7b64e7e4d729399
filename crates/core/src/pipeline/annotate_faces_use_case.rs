use std::time::Instant;

use crate::analysis::domain::face_analyzer::{FaceAnalysis, FaceAnalyzer};
use crate::annotation::domain::annotation::{Annotation, FaceLabel};
use crate::annotation::domain::frame_annotator::FrameAnnotator;
use crate::capture::domain::frame_source::FrameSource;
use crate::classification::domain::age_gender_predictor::AgeGenderPredictor;
use crate::display::domain::frame_display::FrameDisplay;
use crate::pipeline::pipeline_logger::{
    PipelineLogger, METRIC_FACES, STAGE_ANALYZE, STAGE_CLASSIFY, STAGE_DISPLAY,
};
use crate::shared::constants::{KEY_POLL_DELAY_MS, QUIT_KEY};
use crate::shared::frame::Frame;

/// Why the capture loop ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StopReason {
    QuitKey,
    /// The source returned no frame.
    EndOfStream,
    /// The source reported an error while grabbing a frame.
    ReadFailed,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RunSummary {
    pub frames: usize,
    pub faces_annotated: usize,
    pub stop_reason: StopReason,
}

/// Live loop: capture, analyze, classify, annotate, display.
///
/// Each frame is converted to RGB for the analyzer while crops, drawing and
/// display use the BGR original. Failures for one frame or one face are
/// logged and skipped. The source and display are released when the loop
/// ends, whether it ends normally or with an error.
pub struct AnnotateFacesUseCase {
    source: Box<dyn FrameSource>,
    analyzer: Box<dyn FaceAnalyzer>,
    predictor: AgeGenderPredictor,
    annotator: Box<dyn FrameAnnotator>,
    display: Box<dyn FrameDisplay>,
    logger: Box<dyn PipelineLogger>,
}

impl AnnotateFacesUseCase {
    pub fn new(
        source: Box<dyn FrameSource>,
        analyzer: Box<dyn FaceAnalyzer>,
        predictor: AgeGenderPredictor,
        annotator: Box<dyn FrameAnnotator>,
        display: Box<dyn FrameDisplay>,
        logger: Box<dyn PipelineLogger>,
    ) -> Self {
        Self {
            source,
            analyzer,
            predictor,
            annotator,
            display,
            logger,
        }
    }

    pub fn run(&mut self) -> Result<RunSummary, Box<dyn std::error::Error>> {
        let result = self.run_loop();

        self.source.release();
        self.display.close();
        self.logger.summary();

        result
    }

    fn run_loop(&mut self) -> Result<RunSummary, Box<dyn std::error::Error>> {
        let mut frames = 0;
        let mut faces_annotated = 0;

        let stop_reason = loop {
            let mut frame = match self.source.read() {
                Ok(Some(frame)) => frame,
                Ok(None) => {
                    log::warn!("Camera returned no frame, stopping");
                    break StopReason::EndOfStream;
                }
                Err(e) => {
                    log::warn!("Failed to read frame: {e}");
                    break StopReason::ReadFailed;
                }
            };
            frames += 1;

            let annotated = self.annotate_frame(&mut frame);
            faces_annotated += annotated;
            self.logger.metric(METRIC_FACES, annotated as f64);

            let t0 = Instant::now();
            self.display.show(&frame)?;
            let key = self.display.poll_key(KEY_POLL_DELAY_MS)?;
            self.logger
                .timing(STAGE_DISPLAY, t0.elapsed().as_secs_f64() * 1000.0);
            self.logger.progress(frames);

            if key == Some(QUIT_KEY) {
                self.logger.info("Quit key pressed");
                break StopReason::QuitKey;
            }
        };

        Ok(RunSummary {
            frames,
            faces_annotated,
            stop_reason,
        })
    }

    /// Draw every valid face onto `frame`. Returns how many were drawn.
    fn annotate_frame(&mut self, frame: &mut Frame) -> usize {
        let t0 = Instant::now();
        let rgb = frame.to_rgb();
        let faces = match self.analyzer.analyze(&rgb) {
            Ok(faces) => faces,
            Err(e) => {
                log::warn!("Analysis failed for frame {}: {e}", frame.index());
                Vec::new()
            }
        };
        self.logger
            .timing(STAGE_ANALYZE, t0.elapsed().as_secs_f64() * 1000.0);

        if faces.is_empty() {
            return 0;
        }

        let t0 = Instant::now();
        let mut annotations = Vec::with_capacity(faces.len());
        for face in &faces {
            match self.classify_face(frame, face) {
                Ok(Some(annotation)) => annotations.push(annotation),
                Ok(None) => {}
                Err(e) => log::warn!(
                    "Skipping face {:?} in frame {}: {e}",
                    face.region,
                    frame.index()
                ),
            }
        }
        self.logger
            .timing(STAGE_CLASSIFY, t0.elapsed().as_secs_f64() * 1000.0);

        if annotations.is_empty() {
            return 0;
        }
        match self.annotator.annotate(frame, &annotations) {
            Ok(drawn) => drawn,
            Err(e) => {
                log::warn!("Failed to annotate frame {}: {e}", frame.index());
                0
            }
        }
    }

    /// Returns `Ok(None)` when the region has no pixels inside the frame.
    fn classify_face(
        &mut self,
        frame: &Frame,
        face: &FaceAnalysis,
    ) -> Result<Option<Annotation>, Box<dyn std::error::Error>> {
        let Some(rect) = face.region.crop_rect(frame.width(), frame.height()) else {
            return Ok(None);
        };

        let prediction = self.predictor.predict_face(frame, &rect)?;

        let label = FaceLabel {
            gender: prediction.gender,
            age: prediction.age,
            emotion: face.emotion_label(),
        };
        let annotation = Annotation::for_region(&face.region, &label);
        log::debug!("Frame {}: {}", frame.index(), annotation.label);
        Ok(Some(annotation))
    }
}
