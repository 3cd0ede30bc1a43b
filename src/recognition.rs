//! Seam for the handwriting recognition service.
//!
//! Recognition itself is platform work and lives outside this crate. What
//! the calculator needs is the shape of its output: text regions in
//! detection order, each with candidate strings ranked by confidence.

use serde::{Deserialize, Serialize};

/// A captured image handed to a [`Recognizer`].
#[derive(Clone, Debug, Default)]
pub struct InputImage {
    pub width: u32,
    pub height: u32,
    /// Row-major grayscale pixels.
    pub pixels: Vec<u8>,
}

/// One candidate reading of a text region.
#[derive(Clone, Debug, PartialEq)]
pub struct Candidate {
    pub text: String,
    pub confidence: f32,
}

/// A detected text region with its candidate readings.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TextRegion {
    pub candidates: Vec<Candidate>,
}

impl TextRegion {
    /// A region with a single, fully confident reading.
    pub fn single(text: impl Into<String>) -> Self {
        Self {
            candidates: vec![Candidate {
                text: text.into(),
                confidence: 1.0,
            }],
        }
    }

    /// The most confident candidate. Earlier candidates win ties.
    pub fn top_candidate(&self) -> Option<&Candidate> {
        self.candidates.iter().reduce(|best, c| {
            if c.confidence > best.confidence {
                c
            } else {
                best
            }
        })
    }
}

/// How multiple detected regions become one string.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RecognitionJoin {
    /// Concatenate the top candidate of every region, in detection order.
    #[default]
    AllRegions,
    /// Use only the top candidate of the first region.
    FirstRegion,
}

/// Join recognized regions into the text passed to the engine.
///
/// Returns `None` if no region produced a candidate.
pub fn join_regions(regions: &[TextRegion], join: RecognitionJoin) -> Option<String> {
    let mut tops = regions.iter().filter_map(TextRegion::top_candidate);

    match join {
        RecognitionJoin::FirstRegion => tops.next().map(|c| c.text.clone()),
        RecognitionJoin::AllRegions => {
            let joined: String = tops.map(|c| c.text.as_str()).collect();
            (!joined.is_empty()).then_some(joined)
        }
    }
}

/// A text recognition backend.
///
/// Implementations may block; callers run them off the event thread (see
/// [`crate::session::spawn_recognition`]).
pub trait Recognizer: Send {
    fn recognize(&self, image: &InputImage) -> anyhow::Result<Vec<TextRegion>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn region(candidates: &[(&str, f32)]) -> TextRegion {
        TextRegion {
            candidates: candidates
                .iter()
                .map(|&(text, confidence)| Candidate {
                    text: text.to_string(),
                    confidence,
                })
                .collect(),
        }
    }

    #[test]
    fn test_top_candidate() {
        let r = region(&[("7", 0.4), ("1", 0.9), ("l", 0.9)]);
        assert_eq!(r.top_candidate().unwrap().text, "1");
        assert!(TextRegion::default().top_candidate().is_none());
    }

    #[test]
    fn test_join_all_regions() {
        let regions = vec![
            region(&[("3", 0.9)]),
            region(&[("x", 0.8), ("+", 0.1)]),
            TextRegion::default(),
            region(&[("4", 0.7)]),
        ];
        assert_eq!(
            join_regions(&regions, RecognitionJoin::AllRegions).as_deref(),
            Some("3x4")
        );
    }

    #[test]
    fn test_join_first_region() {
        let regions = vec![TextRegion::single("12"), TextRegion::single("+")];
        assert_eq!(
            join_regions(&regions, RecognitionJoin::FirstRegion).as_deref(),
            Some("12")
        );
    }

    #[test]
    fn test_join_nothing() {
        assert_eq!(join_regions(&[], RecognitionJoin::AllRegions), None);
        assert_eq!(
            join_regions(&[TextRegion::default()], RecognitionJoin::FirstRegion),
            None
        );
    }
}
