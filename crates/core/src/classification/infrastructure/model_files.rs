use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::shared::constants::{AGE_PROTOTXT, AGE_WEIGHTS, GENDER_PROTOTXT, GENDER_WEIGHTS};

#[derive(Error, Debug)]
pub enum ModelFilesError {
    #[error(
        "model file {} or {} not found",
        .prototxt.display(),
        .weights.display()
    )]
    Missing { prototxt: PathBuf, weights: PathBuf },
}

/// A Caffe network definition and its trained weights.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ModelPair {
    pub prototxt: PathBuf,
    pub weights: PathBuf,
}

impl ModelPair {
    pub fn in_dir(dir: &Path, prototxt: &str, weights: &str) -> Self {
        Self {
            prototxt: dir.join(prototxt),
            weights: dir.join(weights),
        }
    }

    /// Fails naming both files if either one is absent.
    pub fn ensure_exists(&self) -> Result<(), ModelFilesError> {
        if self.prototxt.exists() && self.weights.exists() {
            Ok(())
        } else {
            Err(ModelFilesError::Missing {
                prototxt: self.prototxt.clone(),
                weights: self.weights.clone(),
            })
        }
    }
}

/// Locations of the gender and age classifiers, verified to exist.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AgeGenderModelFiles {
    pub gender: ModelPair,
    pub age: ModelPair,
}

/// Check `model_dir` for both Caffe model pairs, gender first.
pub fn locate(model_dir: &Path) -> Result<AgeGenderModelFiles, ModelFilesError> {
    let gender = ModelPair::in_dir(model_dir, GENDER_PROTOTXT, GENDER_WEIGHTS);
    let age = ModelPair::in_dir(model_dir, AGE_PROTOTXT, AGE_WEIGHTS);

    for pair in [&gender, &age] {
        pair.ensure_exists()?;
    }

    Ok(AgeGenderModelFiles { gender, age })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn touch(dir: &Path, names: &[&str]) {
        for name in names {
            fs::write(dir.join(name), b"stub").unwrap();
        }
    }

    #[test]
    fn test_locate_all_present() {
        let tmp = TempDir::new().unwrap();
        touch(
            tmp.path(),
            &[GENDER_PROTOTXT, GENDER_WEIGHTS, AGE_PROTOTXT, AGE_WEIGHTS],
        );

        let files = locate(tmp.path()).unwrap();
        assert_eq!(files.gender.prototxt, tmp.path().join("gender_deploy.prototxt"));
        assert_eq!(files.gender.weights, tmp.path().join("gender_net.caffemodel"));
        assert_eq!(files.age.prototxt, tmp.path().join("age_deploy.prototxt"));
        assert_eq!(files.age.weights, tmp.path().join("age_net.caffemodel"));
    }

    #[test]
    fn test_missing_gender_weights_names_gender_pair() {
        let tmp = TempDir::new().unwrap();
        touch(tmp.path(), &[GENDER_PROTOTXT, AGE_PROTOTXT, AGE_WEIGHTS]);

        let message = locate(tmp.path()).unwrap_err().to_string();
        assert!(message.contains("gender_deploy.prototxt"));
        assert!(message.contains("gender_net.caffemodel"));
        assert!(!message.contains("age_net"));
    }

    #[test]
    fn test_missing_age_prototxt_names_age_pair() {
        let tmp = TempDir::new().unwrap();
        touch(tmp.path(), &[GENDER_PROTOTXT, GENDER_WEIGHTS, AGE_WEIGHTS]);

        let err = locate(tmp.path()).unwrap_err();
        let ModelFilesError::Missing { prototxt, weights } = err;
        assert_eq!(prototxt, tmp.path().join(AGE_PROTOTXT));
        assert_eq!(weights, tmp.path().join(AGE_WEIGHTS));
    }

    #[test]
    fn test_empty_dir_reports_gender_first() {
        let tmp = TempDir::new().unwrap();
        let message = locate(tmp.path()).unwrap_err().to_string();
        assert!(message.contains("gender_deploy.prototxt"));
    }

    #[test]
    fn test_nonexistent_dir_is_missing() {
        let tmp = TempDir::new().unwrap();
        assert!(locate(&tmp.path().join("nope")).is_err());
    }
}
