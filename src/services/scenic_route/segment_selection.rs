use super::segment_scoring::SegmentScorer;
use crate::error::{AppError, Result};
use crate::models::{CandidatePath, ScoredPath};

/// Picks the most scenic of a leg's alternative paths
pub struct SegmentSelector {
    scorer: SegmentScorer,
}

impl SegmentSelector {
    pub fn new(scorer: SegmentScorer) -> Self {
        Self { scorer }
    }

    /// Scores alternatives in provider order and returns the best one
    pub async fn select_best(&self, alternatives: Vec<CandidatePath>) -> Result<CandidatePath> {
        let mut scored = Vec::with_capacity(alternatives.len());
        for path in alternatives {
            let score = self.scorer.score(&path).await?;
            scored.push(ScoredPath { score, path });
        }

        let count = scored.len();
        let best = highest_scoring(scored)
            .ok_or_else(|| AppError::NoRouteFound("no alternative paths to score".to_string()))?;

        tracing::debug!(
            alternatives = count,
            score = best.score,
            "Selected scenic alternative"
        );
        Ok(best.path)
    }
}

/// Strict maximum; the earliest path wins a tie
fn highest_scoring(scored: Vec<ScoredPath>) -> Option<ScoredPath> {
    scored.into_iter().fold(None, |best, candidate| match best {
        Some(current) if current.score >= candidate.score => Some(current),
        _ => Some(candidate),
    })
}
