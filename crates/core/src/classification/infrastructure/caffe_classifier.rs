/// Caffe classifier run through OpenCV's dnn module.
use std::path::Path;

use opencv::core::{Mat, Scalar, CV_32F};
use opencv::dnn::{self, Net};
use opencv::prelude::*;

use crate::classification::domain::blob::Blob;
use crate::classification::domain::classifier::Classifier;
use crate::classification::infrastructure::model_files::ModelPair;

pub struct CaffeClassifier {
    net: Net,
    name: &'static str,
}

// Safety: the network is owned by one pipeline and only driven from the
// thread running it.
unsafe impl Send for CaffeClassifier {}

impl CaffeClassifier {
    /// Load a network from its prototxt definition and caffemodel weights.
    pub fn load(name: &'static str, pair: &ModelPair) -> Result<Self, Box<dyn std::error::Error>> {
        let prototxt = path_str(&pair.prototxt)?;
        let weights = path_str(&pair.weights)?;
        let net = dnn::read_net_from_caffe(prototxt, weights)?;
        if net.empty()? {
            return Err(format!("{name} network loaded from {prototxt} has no layers").into());
        }
        log::info!("Loaded {name} classifier from {weights}");
        Ok(Self { net, name })
    }
}

impl Classifier for CaffeClassifier {
    fn predict(&mut self, blob: &Blob) -> Result<Vec<f32>, Box<dyn std::error::Error>> {
        let dims: Vec<i32> = blob.shape().iter().map(|&d| d as i32).collect();
        let mut input = Mat::new_nd_with_default(&dims, CV_32F, Scalar::all(0.0))?;
        input.data_typed_mut::<f32>()?.copy_from_slice(blob.values());

        self.net.set_input(&input, "", 1.0, Scalar::default())?;
        let output = self.net.forward_single("")?;
        let scores = output.data_typed::<f32>()?.to_vec();
        log::debug!("{} scores: {scores:?}", self.name);
        Ok(scores)
    }
}

fn path_str(path: &Path) -> Result<&str, Box<dyn std::error::Error>> {
    path.to_str()
        .ok_or_else(|| format!("Model path is not valid UTF-8: {}", path.display()).into())
}
