//! Part-of-speech tagging with a bigram HMM decoded by a modified Viterbi
//! search. Unseen emissions and transitions are smoothed to a small epsilon,
//! so tagging never fails on unknown words.

use crate::error::LoadError;
use crate::tag::Tag;
use crate::text;
use crate::token::Token;
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use tracing::info;

/// Stand-in probability for unseen emissions and transitions.
const EPSILON: f64 = 1e-6;

/// On-disk HMM parameter schema. `start_prob`'s key set is the tag
/// universe; `emission` and `transition` may be sparse over it.
#[derive(Debug, Deserialize)]
pub struct HmmParams {
    pub start_prob: HashMap<String, f64>,
    pub emission: HashMap<String, HashMap<String, f64>>,
    pub transition: HashMap<String, HashMap<String, f64>>,
}

/// Owns the probability tables; immutable after construction.
#[derive(Debug)]
pub struct Tagger {
    tags: Vec<Tag>,
    start: HashMap<String, f64>,
    emission: HashMap<String, HashMap<String, f64>>,
    transition: HashMap<String, HashMap<String, f64>>,
}

impl Tagger {
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|source| LoadError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let params: HmmParams = serde_json::from_str(&raw).map_err(|source| LoadError::Json {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_params(params)
    }

    pub fn from_params(params: HmmParams) -> Result<Self, LoadError> {
        if params.start_prob.is_empty() {
            return Err(LoadError::EmptyTagUniverse);
        }
        // Sorted order keeps argmax tie-breaking stable across runs.
        let mut tags: Vec<Tag> = params.start_prob.keys().map(|t| Tag::new(t.as_str())).collect();
        tags.sort_by(|a, b| a.as_str().cmp(b.as_str()));
        info!(tags = tags.len(), "tagger loaded");
        Ok(Self {
            tags,
            start: params.start_prob,
            emission: params.emission,
            transition: params.transition,
        })
    }

    fn emit(&self, tag: &str, word: &str) -> f64 {
        self.emission
            .get(tag)
            .and_then(|words| words.get(word))
            .copied()
            .unwrap_or(EPSILON)
    }

    fn transit(&self, prev: &str, next: &str) -> f64 {
        self.transition
            .get(prev)
            .and_then(|nexts| nexts.get(next))
            .copied()
            .unwrap_or(EPSILON)
    }

    /// Assigns a tag to every token of `sentence` in place. An empty
    /// sentence is a no-op.
    pub fn tag(&self, sentence: &mut [Token]) {
        if sentence.is_empty() {
            return;
        }
        let n = sentence.len();
        let states = self.tags.len();

        // v[t][s]: best path probability ending in state s at position t.
        let mut v = vec![vec![0.0f64; states]; n];
        let mut back = vec![vec![0usize; states]; n];

        // Initialization. The first word of a sentence is often
        // capitalized, so its emission is also probed with the first
        // letter lowered and the larger value kept.
        let first = &sentence[0].text;
        let lowered = first
            .chars()
            .next()
            .filter(|c| c.is_ascii_alphabetic())
            .map(|_| text::lower_first(first));
        for (s, tag) in self.tags.iter().enumerate() {
            let start_p = self.start.get(tag.as_str()).copied().unwrap_or(EPSILON);
            let mut best = start_p * self.emit(tag.as_str(), first);
            if let Some(lowered) = &lowered {
                best = best.max(start_p * self.emit(tag.as_str(), lowered));
            }
            v[0][s] = best;
        }

        // Recursion over the rest of the sentence.
        for t in 1..n {
            let word = &sentence[t].text;
            for (s, tag) in self.tags.iter().enumerate() {
                let emit_p = self.emit(tag.as_str(), word);
                let mut max_prob = -1.0f64;
                let mut best_prev = 0usize;
                for (p, prev) in self.tags.iter().enumerate() {
                    let prob = v[t - 1][p] * self.transit(prev.as_str(), tag.as_str()) * emit_p;
                    if prob > max_prob {
                        max_prob = prob;
                        best_prev = p;
                    }
                }
                v[t][s] = max_prob;
                back[t][s] = best_prev;
            }
        }

        // Termination: pick the best final state, then walk the
        // back-pointers to recover the path.
        let last = n - 1;
        let mut best = 0usize;
        for s in 1..states {
            if v[last][s] > v[last][best] {
                best = s;
            }
        }
        sentence[last].tag = Some(self.tags[best].clone());
        let mut state = best;
        for t in (1..=last).rev() {
            state = back[t][state];
            sentence[t - 1].tag = Some(self.tags[state].clone());
        }
    }
}
