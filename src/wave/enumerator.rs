//! Exhaustive wave enumeration and ranking.
//!
//! # Algorithm
//!
//! 1. Generate candidate order selections (per [`EnumerationStrategy`])
//! 2. Run the goal test on each; keep accepted waves with their best cover
//! 3. Stable-sort by efficiency, descending
//! 4. Assign competition ranks; every wave at the top score is flagged best
//!
//! Both strategies report the same set of waves. `BoundedSubsets` skips the
//! coverage search for selections outside the item bounds, which the
//! evaluator would reject anyway.

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use itertools::Itertools;
use log::{debug, info};

use crate::csp::Assignment;
use crate::error::WaveError;

use super::config::{EnumerationConfig, EnumerationStrategy};
use super::evaluator::{WaveEvaluator, WaveSolution};

/// An accepted wave and its position in the ranking.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RankedWave {
    /// 1-based competition rank; waves with equal efficiency share a rank.
    pub rank: usize,
    /// Whether the wave reaches the maximum efficiency.
    pub is_best: bool,
    /// The wave.
    pub solution: WaveSolution,
}

/// All accepted waves, best first.
#[derive(Debug, Clone)]
pub struct WaveRanking {
    /// Ranked waves, efficiency descending. Never empty.
    pub entries: Vec<RankedWave>,
    /// Number of candidate selections handed to the goal test.
    pub evaluated: usize,
    /// False when the run stopped early (budget or cancellation).
    pub complete: bool,
}

impl WaveRanking {
    /// The first best wave in enumeration order.
    pub fn best(&self) -> &WaveSolution {
        &self.entries[0].solution
    }

    /// Every co-optimal wave.
    pub fn best_waves(&self) -> impl Iterator<Item = &WaveSolution> {
        self.entries
            .iter()
            .take_while(|e| e.is_best)
            .map(|e| &e.solution)
    }

    /// Number of accepted waves.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always false; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Result of an enumeration run.
#[derive(Debug, Clone)]
pub enum WaveOutcome {
    /// At least one wave was accepted.
    Feasible(WaveRanking),
    /// No candidate passed the goal test.
    NoFeasibleWave {
        /// Number of candidate selections handed to the goal test.
        evaluated: usize,
        /// False when the run stopped early (budget or cancellation).
        complete: bool,
    },
}

impl WaveOutcome {
    /// Whether a feasible wave was found.
    pub fn is_feasible(&self) -> bool {
        matches!(self, WaveOutcome::Feasible(_))
    }

    /// The ranking, if any wave was accepted.
    pub fn ranking(&self) -> Option<&WaveRanking> {
        match self {
            WaveOutcome::Feasible(ranking) => Some(ranking),
            WaveOutcome::NoFeasibleWave { .. } => None,
        }
    }

    /// The best wave, if any.
    pub fn best(&self) -> Option<&WaveSolution> {
        self.ranking().map(WaveRanking::best)
    }

    /// Number of candidates evaluated.
    pub fn evaluated(&self) -> usize {
        match self {
            WaveOutcome::Feasible(ranking) => ranking.evaluated,
            WaveOutcome::NoFeasibleWave { evaluated, .. } => *evaluated,
        }
    }

    /// Whether the whole candidate space was examined.
    pub fn is_complete(&self) -> bool {
        match self {
            WaveOutcome::Feasible(ranking) => ranking.complete,
            WaveOutcome::NoFeasibleWave { complete, .. } => *complete,
        }
    }
}

impl fmt::Display for WaveOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WaveOutcome::Feasible(ranking) => {
                for entry in &ranking.entries {
                    let marker = if entry.is_best { " *" } else { "" };
                    writeln!(f, "#{} {}{}", entry.rank, entry.solution, marker)?;
                }
                Ok(())
            }
            WaveOutcome::NoFeasibleWave { evaluated, .. } => {
                writeln!(f, "no feasible wave ({evaluated} candidates evaluated)")
            }
        }
    }
}

/// Enumerates every order selection and ranks the feasible waves.
#[derive(Debug, Clone, Copy)]
pub struct WaveEnumerator<'a> {
    evaluator: WaveEvaluator<'a>,
}

impl<'a> WaveEnumerator<'a> {
    /// Creates an enumerator over an evaluator.
    pub fn new(evaluator: WaveEvaluator<'a>) -> Self {
        Self { evaluator }
    }

    /// Runs the enumeration.
    pub fn run(&self, config: &EnumerationConfig) -> Result<WaveOutcome, WaveError> {
        self.run_with_cancel(config, None)
    }

    /// Runs the enumeration with an optional cancellation token, checked
    /// before each candidate.
    pub fn run_with_cancel(
        &self,
        config: &EnumerationConfig,
        cancel: Option<Arc<AtomicBool>>,
    ) -> Result<WaveOutcome, WaveError> {
        config.validate()?;

        let mut accepted = Vec::new();
        let mut evaluated = 0usize;
        let mut complete = true;

        for assignment in self.candidates(config.strategy) {
            if cancel.as_ref().is_some_and(|c| c.load(Ordering::Relaxed)) {
                debug!("enumeration cancelled after {evaluated} candidates");
                complete = false;
                break;
            }
            if config.max_candidates.is_some_and(|limit| evaluated >= limit) {
                debug!("enumeration budget of {evaluated} candidates exhausted");
                complete = false;
                break;
            }
            evaluated += 1;

            if let Some(solution) = self.evaluator.evaluate(&assignment) {
                debug!("feasible wave: {solution}");
                accepted.push(solution);
            }
        }

        info!(
            "enumerated {} candidates ({:?}): {} feasible waves",
            evaluated,
            config.strategy,
            accepted.len()
        );

        if accepted.is_empty() {
            return Ok(WaveOutcome::NoFeasibleWave {
                evaluated,
                complete,
            });
        }

        Ok(WaveOutcome::Feasible(WaveRanking {
            entries: rank(accepted),
            evaluated,
            complete,
        }))
    }

    fn candidates(
        &self,
        strategy: EnumerationStrategy,
    ) -> Box<dyn Iterator<Item = Assignment<bool>> + 'a> {
        let orders = self.evaluator.instance().orders();
        let n = orders.len();

        match strategy {
            EnumerationStrategy::CartesianProduct => Box::new(
                (0..n)
                    .map(|_| [false, true])
                    .multi_cartesian_product()
                    .map(Assignment::complete),
            ),
            EnumerationStrategy::BoundedSubsets => {
                let bounds = self.evaluator.bounds();
                Box::new((1..=n).flat_map(move |size| {
                    (0..n)
                        .combinations(size)
                        .filter(move |combo| {
                            bounds.contains(
                                combo
                                    .iter()
                                    .fold(0u64, |acc, &p| acc.saturating_add(orders[p].total_items())),
                            )
                        })
                        .map(move |combo| {
                            let mut picked = vec![false; n];
                            for p in combo {
                                picked[p] = true;
                            }
                            Assignment::complete(picked)
                        })
                }))
            }
        }
    }
}

/// Sorts by efficiency (descending, stable) and assigns competition ranks.
fn rank(mut waves: Vec<WaveSolution>) -> Vec<RankedWave> {
    waves.sort_by(|a, b| b.efficiency().total_cmp(&a.efficiency()));
    let top = waves.first().map_or(f64::NEG_INFINITY, WaveSolution::efficiency);

    let mut ranked: Vec<RankedWave> = Vec::with_capacity(waves.len());
    for (i, solution) in waves.into_iter().enumerate() {
        let rank = match ranked.last() {
            Some(prev) if prev.solution.efficiency() == solution.efficiency() => prev.rank,
            _ => i + 1,
        };
        ranked.push(RankedWave {
            rank,
            is_best: solution.efficiency() == top,
            solution,
        });
    }
    ranked
}
