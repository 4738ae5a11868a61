//! Bagged decision-tree forest
//!
//! Thin bagging layer over `linfa-trees`: every tree is a Gini
//! `DecisionTree` fitted on its own bootstrap draw of the training dataset.
//! Trees are fitted in parallel with rayon, each with an RNG derived from the
//! forest seed and the tree index, so the fitted forest does not depend on
//! scheduling. Prediction is a majority vote.

use linfa::prelude::*;
use linfa_trees::{DecisionTree, SplitQuality};
use ndarray::{Array1, Array2, Ix1};
use rand::rngs::StdRng;
use rand::SeedableRng;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Forest hyper-parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ForestParams {
    pub n_trees: usize,
    pub seed: u64,
}

impl Default for ForestParams {
    fn default() -> Self {
        Self {
            n_trees: 100,
            seed: 42,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RandomForest {
    trees: Vec<DecisionTree<f64, usize>>,
    n_classes: usize,
    params: ForestParams,
}

impl RandomForest {
    /// Fit `params.n_trees` trees on bootstrap samples of `dataset`.
    ///
    /// Targets must be class codes in `0..n_classes`.
    pub fn fit(dataset: &Dataset<f64, usize, Ix1>, n_classes: usize, params: ForestParams) -> Result<Self> {
        if params.n_trees == 0 {
            return Err(Error::classifier("forest needs at least one tree"));
        }
        if dataset.nsamples() == 0 {
            return Err(Error::classifier("cannot fit a forest on an empty dataset"));
        }
        if let Some(label) = dataset.targets().iter().find(|&&label| label >= n_classes) {
            return Err(Error::classifier(format!(
                "class code {} outside 0..{}",
                label, n_classes
            )));
        }

        let trees = (0..params.n_trees)
            .into_par_iter()
            .map(|index| {
                let mut rng = StdRng::seed_from_u64(tree_seed(params.seed, index));
                let sample = dataset
                    .bootstrap_samples(dataset.nsamples(), &mut rng)
                    .next()
                    .ok_or_else(|| Error::classifier("bootstrap produced no sample"))?;
                DecisionTree::params()
                    .split_quality(SplitQuality::Gini)
                    .fit(&sample)
                    .map_err(|e| Error::classifier(format!("tree {} failed to fit: {}", index, e)))
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            trees,
            n_classes,
            params,
        })
    }

    pub fn n_trees(&self) -> usize {
        self.trees.len()
    }

    pub fn params(&self) -> ForestParams {
        self.params
    }

    /// Per-class vote counts for one feature row
    pub fn votes(&self, features: &[f64]) -> Result<Vec<usize>> {
        let row = Array2::from_shape_vec((1, features.len()), features.to_vec())
            .map_err(|e| Error::classifier(format!("bad feature row: {}", e)))?;

        let mut votes = vec![0; self.n_classes];
        for tree in &self.trees {
            let predicted: Array1<usize> = tree.predict(&row);
            let label = predicted
                .first()
                .copied()
                .ok_or_else(|| Error::classifier("tree returned no prediction"))?;
            let slot = votes
                .get_mut(label)
                .ok_or_else(|| Error::classifier(format!("tree predicted unknown class {}", label)))?;
            *slot += 1;
        }
        Ok(votes)
    }

    /// Majority class; ties go to the lowest class code
    pub fn predict(&self, features: &[f64]) -> Result<usize> {
        let votes = self.votes(features)?;
        let mut best = 0;
        for (class, &count) in votes.iter().enumerate() {
            if count > votes[best] {
                best = class;
            }
        }
        Ok(best)
    }
}

fn tree_seed(seed: u64, index: usize) -> u64 {
    seed ^ (index as u64 + 1).wrapping_mul(0x9E37_79B9_7F4A_7C15)
}
