use crate::classification::domain::classifier::ClassificationError;

/// Index of the largest value; the lowest index wins ties.
///
/// Returns `None` for an empty slice.
pub fn argmax(values: &[f32]) -> Option<usize> {
    let mut iter = values.iter().enumerate();
    let (mut best, mut best_value) = iter.next().map(|(i, v)| (i, *v))?;
    for (i, &v) in iter {
        if v > best_value {
            best = i;
            best_value = v;
        }
    }
    Some(best)
}

/// Map a classifier's output vector to the label at its arg-max index.
pub fn select_label(
    labels: &'static [&'static str],
    scores: &[f32],
) -> Result<&'static str, ClassificationError> {
    let index = argmax(scores).ok_or(ClassificationError::EmptyOutput)?;
    labels
        .get(index)
        .copied()
        .ok_or(ClassificationError::IndexOutOfRange {
            index,
            labels: labels.len(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::constants::{AGE_BRACKETS, GENDER_LABELS};
    use rstest::rstest;

    #[rstest]
    #[case::single(&[0.3], 0)]
    #[case::first(&[0.9, 0.1], 0)]
    #[case::last(&[0.1, 0.2, 0.7], 2)]
    #[case::tie_prefers_lowest(&[0.2, 0.4, 0.4], 1)]
    #[case::all_equal(&[0.5, 0.5, 0.5, 0.5], 0)]
    #[case::negative_values(&[-3.0, -1.0, -2.0], 1)]
    fn test_argmax(#[case] values: &[f32], #[case] expected: usize) {
        assert_eq!(argmax(values), Some(expected));
    }

    #[test]
    fn test_argmax_empty() {
        assert_eq!(argmax(&[]), None);
    }

    #[test]
    fn test_argmax_is_deterministic() {
        let scores = [0.1, 0.45, 0.45, 0.0];
        let first = argmax(&scores);
        for _ in 0..10 {
            assert_eq!(argmax(&scores), first);
        }
    }

    #[test]
    fn test_select_gender_label() {
        assert_eq!(select_label(GENDER_LABELS, &[0.8, 0.2]).unwrap(), "Pria");
        assert_eq!(select_label(GENDER_LABELS, &[0.3, 0.7]).unwrap(), "Wanita");
    }

    #[test]
    fn test_select_age_bracket() {
        let mut scores = [0.0f32; 8];
        scores[4] = 1.0;
        assert_eq!(select_label(AGE_BRACKETS, &scores).unwrap(), "(25-32)");
    }

    #[test]
    fn test_select_label_out_of_range() {
        let err = select_label(GENDER_LABELS, &[0.1, 0.2, 0.7]).unwrap_err();
        assert!(matches!(
            err,
            ClassificationError::IndexOutOfRange {
                index: 2,
                labels: 2
            }
        ));
    }

    #[test]
    fn test_select_label_empty_output() {
        let err = select_label(AGE_BRACKETS, &[]).unwrap_err();
        assert!(matches!(err, ClassificationError::EmptyOutput));
    }
}
