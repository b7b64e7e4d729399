use crate::classification::domain::blob::Blob;
use crate::classification::domain::blob_builder::BlobBuilder;
use crate::classification::domain::classifier::Classifier;
use crate::classification::domain::labels::select_label;
use crate::shared::constants::{AGE_BRACKETS, GENDER_LABELS};
use crate::shared::frame::Frame;
use crate::shared::region::CropRect;

/// Gender and age bracket predicted for one face.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AgeGender {
    pub gender: &'static str,
    pub age: &'static str,
}

/// Runs the gender and age classifiers independently on the same blob.
pub struct AgeGenderPredictor {
    blob_builder: Box<dyn BlobBuilder>,
    gender: Box<dyn Classifier>,
    age: Box<dyn Classifier>,
}

impl AgeGenderPredictor {
    pub fn new(
        blob_builder: Box<dyn BlobBuilder>,
        gender: Box<dyn Classifier>,
        age: Box<dyn Classifier>,
    ) -> Self {
        Self {
            blob_builder,
            gender,
            age,
        }
    }

    /// Build the blob for `rect` of a BGR `frame` and classify it.
    pub fn predict_face(
        &mut self,
        frame: &Frame,
        rect: &CropRect,
    ) -> Result<AgeGender, Box<dyn std::error::Error>> {
        let blob = self.blob_builder.build(frame, rect)?;
        self.predict(&blob)
    }

    pub fn predict(&mut self, blob: &Blob) -> Result<AgeGender, Box<dyn std::error::Error>> {
        let gender_scores = self.gender.predict(blob)?;
        let gender = select_label(GENDER_LABELS, &gender_scores)?;

        let age_scores = self.age.predict(blob)?;
        let age = select_label(AGE_BRACKETS, &age_scores)?;

        Ok(AgeGender { gender, age })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classification::domain::blob_builder::BilinearBlobBuilder;
    use std::sync::{Arc, Mutex};

    struct FixedClassifier {
        scores: Vec<f32>,
        seen: Arc<Mutex<Vec<Vec<usize>>>>,
    }

    impl FixedClassifier {
        fn new(scores: Vec<f32>) -> Self {
            Self {
                scores,
                seen: Arc::new(Mutex::new(Vec::new())),
            }
        }
    }

    impl Classifier for FixedClassifier {
        fn predict(&mut self, blob: &Blob) -> Result<Vec<f32>, Box<dyn std::error::Error>> {
            self.seen.lock().unwrap().push(blob.shape().to_vec());
            Ok(self.scores.clone())
        }
    }

    struct FailingClassifier;

    impl Classifier for FailingClassifier {
        fn predict(&mut self, _blob: &Blob) -> Result<Vec<f32>, Box<dyn std::error::Error>> {
            Err("forward pass failed".into())
        }
    }

    fn blob() -> Blob {
        let frame = Frame::new(vec![90; 20 * 20 * 3], 20, 20, 3, 0);
        Blob::from_crop(
            &frame,
            &CropRect {
                x: 0,
                y: 0,
                width: 20,
                height: 20,
            },
        )
    }

    fn one_hot(len: usize, index: usize) -> Vec<f32> {
        let mut v = vec![0.0; len];
        v[index] = 1.0;
        v
    }

    #[test]
    fn test_maps_argmax_to_labels() {
        let mut predictor = AgeGenderPredictor::new(
            Box::new(BilinearBlobBuilder),
            Box::new(FixedClassifier::new(one_hot(2, 1))),
            Box::new(FixedClassifier::new(one_hot(8, 7))),
        );
        let result = predictor.predict(&blob()).unwrap();
        assert_eq!(
            result,
            AgeGender {
                gender: "Wanita",
                age: "(60-100)"
            }
        );
    }

    #[test]
    fn test_both_classifiers_see_the_same_blob() {
        let gender = FixedClassifier::new(one_hot(2, 0));
        let age = FixedClassifier::new(one_hot(8, 0));
        let gender_seen = gender.seen.clone();
        let age_seen = age.seen.clone();

        let mut predictor =
            AgeGenderPredictor::new(Box::new(BilinearBlobBuilder), Box::new(gender), Box::new(age));
        predictor.predict(&blob()).unwrap();

        assert_eq!(*gender_seen.lock().unwrap(), vec![vec![1usize, 3, 227, 227]]);
        assert_eq!(*age_seen.lock().unwrap(), vec![vec![1usize, 3, 227, 227]]);
    }

    #[test]
    fn test_classifier_error_propagates() {
        let mut predictor = AgeGenderPredictor::new(
            Box::new(BilinearBlobBuilder),
            Box::new(FixedClassifier::new(one_hot(2, 0))),
            Box::new(FailingClassifier),
        );
        let err = predictor.predict(&blob()).unwrap_err();
        assert_eq!(err.to_string(), "forward pass failed");
    }

    struct FailingBlobBuilder;

    impl BlobBuilder for FailingBlobBuilder {
        fn build(
            &self,
            _frame: &Frame,
            _rect: &CropRect,
        ) -> Result<Blob, Box<dyn std::error::Error>> {
            Err("resize failed".into())
        }
    }

    #[test]
    fn test_predict_face_builds_blob_for_crop() {
        let gender = FixedClassifier::new(one_hot(2, 0));
        let seen = gender.seen.clone();
        let mut predictor = AgeGenderPredictor::new(
            Box::new(BilinearBlobBuilder),
            Box::new(gender),
            Box::new(FixedClassifier::new(one_hot(8, 4))),
        );
        let frame = Frame::new(vec![90; 60 * 40 * 3], 60, 40, 3, 0);
        let rect = CropRect {
            x: 10,
            y: 5,
            width: 30,
            height: 30,
        };

        let result = predictor.predict_face(&frame, &rect).unwrap();

        assert_eq!(
            result,
            AgeGender {
                gender: "Pria",
                age: "(25-32)"
            }
        );
        assert_eq!(*seen.lock().unwrap(), vec![vec![1usize, 3, 227, 227]]);
    }

    #[test]
    fn test_blob_builder_error_skips_classifiers() {
        let gender = FixedClassifier::new(one_hot(2, 0));
        let seen = gender.seen.clone();
        let mut predictor = AgeGenderPredictor::new(
            Box::new(FailingBlobBuilder),
            Box::new(gender),
            Box::new(FixedClassifier::new(one_hot(8, 0))),
        );
        let frame = Frame::new(vec![0; 10 * 10 * 3], 10, 10, 3, 0);
        let rect = CropRect {
            x: 0,
            y: 0,
            width: 10,
            height: 10,
        };

        assert!(predictor.predict_face(&frame, &rect).is_err());
        assert!(seen.lock().unwrap().is_empty());
    }

    #[test]
    fn test_oversized_gender_output_is_error() {
        let mut predictor = AgeGenderPredictor::new(
            Box::new(BilinearBlobBuilder),
            Box::new(FixedClassifier::new(one_hot(3, 2))),
            Box::new(FixedClassifier::new(one_hot(8, 0))),
        );
        assert!(predictor.predict(&blob()).is_err());
    }
}
