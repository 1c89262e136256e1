use rand::{rngs::StdRng, Rng, SeedableRng};

use crate::core::error::PredictorError;

/// Hyperparameters for the random forest regressor
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ForestParams {
    pub n_trees: usize,
    /// `None` grows trees until leaves are pure or too small to split
    pub max_depth: Option<usize>,
    pub min_samples_split: usize,
    pub min_samples_leaf: usize,
    /// Features considered per split; `None` considers all of them
    pub max_features: Option<usize>,
    pub seed: u64,
}

impl Default for ForestParams {
    fn default() -> Self {
        Self {
            n_trees: 100,
            max_depth: None,
            min_samples_split: 2,
            min_samples_leaf: 1,
            max_features: None,
            seed: 42,
        }
    }
}

impl ForestParams {
    pub fn validate(&self) -> Result<(), PredictorError> {
        if self.n_trees == 0 {
            return Err(PredictorError::InvalidParams("n_trees must be at least 1".into()));
        }
        if self.min_samples_split < 2 {
            return Err(PredictorError::InvalidParams(
                "min_samples_split must be at least 2".into(),
            ));
        }
        if self.min_samples_leaf == 0 {
            return Err(PredictorError::InvalidParams(
                "min_samples_leaf must be at least 1".into(),
            ));
        }
        if self.max_features == Some(0) {
            return Err(PredictorError::InvalidParams("max_features must be at least 1".into()));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq)]
enum Node {
    Leaf {
        value: f64,
    },
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
}

#[derive(Debug, Clone, Copy)]
struct SplitCandidate {
    feature: usize,
    threshold: f64,
    /// sum_l^2 / n_l + sum_r^2 / n_r, larger means lower squared error
    score: f64,
}

/// Borrowed training matrix and targets
struct TrainingView<'a> {
    rows: &'a [Vec<f64>],
    targets: &'a [f64],
    n_features: usize,
}

/// CART regression tree minimising squared error, stored as a flat node arena
#[derive(Debug, Clone, PartialEq)]
pub struct RegressionTree {
    nodes: Vec<Node>,
}

impl RegressionTree {
    fn fit(
        data: &TrainingView<'_>,
        sample: Vec<usize>,
        params: &ForestParams,
        rng: &mut StdRng,
    ) -> Self {
        let mut tree = Self { nodes: Vec::new() };
        tree.grow(data, sample, 0, params, rng);
        tree
    }

    fn grow(
        &mut self,
        data: &TrainingView<'_>,
        sample: Vec<usize>,
        depth: usize,
        params: &ForestParams,
        rng: &mut StdRng,
    ) -> usize {
        let value = mean(sample.iter().map(|&i| data.targets[i]));
        let splittable = sample.len() >= params.min_samples_split
            && params.max_depth.map_or(true, |max| depth < max)
            && !is_constant(sample.iter().map(|&i| data.targets[i]));

        let split = if splittable {
            let features = candidate_features(data.n_features, params.max_features, rng);
            best_split(data, &sample, &features, params.min_samples_leaf)
        } else {
            None
        };

        let id = self.nodes.len();
        self.nodes.push(Node::Leaf { value });

        if let Some(split) = split {
            let (left_sample, right_sample): (Vec<usize>, Vec<usize>) = sample
                .iter()
                .partition(|&&i| data.rows[i][split.feature] <= split.threshold);

            let left = self.grow(data, left_sample, depth + 1, params, rng);
            let right = self.grow(data, right_sample, depth + 1, params, rng);
            self.nodes[id] = Node::Split {
                feature: split.feature,
                threshold: split.threshold,
                left,
                right,
            };
        }

        id
    }

    pub fn predict(&self, row: &[f64]) -> f64 {
        let mut id = 0;
        loop {
            match self.nodes.get(id) {
                Some(Node::Leaf { value }) => return *value,
                Some(Node::Split {
                    feature,
                    threshold,
                    left,
                    right,
                }) => {
                    id = if row[*feature] <= *threshold { *left } else { *right };
                }
                None => return f64::NAN,
            }
        }
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn depth(&self) -> usize {
        fn walk(nodes: &[Node], id: usize) -> usize {
            match nodes.get(id) {
                Some(Node::Split { left, right, .. }) => 1 + walk(nodes, *left).max(walk(nodes, *right)),
                _ => 0,
            }
        }
        walk(&self.nodes, 0)
    }
}

/// Bagged ensemble of regression trees
#[derive(Debug, Clone, PartialEq)]
pub struct RandomForest {
    trees: Vec<RegressionTree>,
    n_features: usize,
}

impl RandomForest {
    /// Fit on `rows` (one feature vector per sample) against `targets`
    ///
    /// Each tree is trained on a bootstrap sample drawn from an RNG seeded with
    /// `params.seed + tree_index`, so fitting is reproducible.
    pub fn fit(rows: &[Vec<f64>], targets: &[f64], params: &ForestParams) -> Result<Self, PredictorError> {
        params.validate()?;

        let n_features = match rows.first() {
            Some(row) => row.len(),
            None => return Err(PredictorError::EmptyTrainingSet),
        };
        if rows.len() != targets.len() {
            return Err(PredictorError::InvalidParams(format!(
                "{} rows but {} targets",
                rows.len(),
                targets.len()
            )));
        }
        if let Some(row) = rows.iter().find(|r| r.len() != n_features) {
            return Err(PredictorError::FeatureCount {
                expected: n_features,
                actual: row.len(),
            });
        }

        let data = TrainingView {
            rows,
            targets,
            n_features,
        };
        let n = rows.len();

        let trees = (0..params.n_trees)
            .map(|t| {
                let mut rng = StdRng::seed_from_u64(params.seed.wrapping_add(t as u64));
                let bootstrap: Vec<usize> = (0..n).map(|_| rng.random_range(0..n)).collect();
                RegressionTree::fit(&data, bootstrap, params, &mut rng)
            })
            .collect();

        Ok(Self { trees, n_features })
    }

    /// Mean prediction across all trees
    pub fn predict(&self, row: &[f64]) -> Result<f64, PredictorError> {
        if self.trees.is_empty() {
            return Err(PredictorError::NotFitted("random forest"));
        }
        if row.len() != self.n_features {
            return Err(PredictorError::FeatureCount {
                expected: self.n_features,
                actual: row.len(),
            });
        }
        Ok(mean(self.trees.iter().map(|tree| tree.predict(row))))
    }

    pub fn n_trees(&self) -> usize {
        self.trees.len()
    }

    pub fn n_features(&self) -> usize {
        self.n_features
    }

    pub fn trees(&self) -> &[RegressionTree] {
        &self.trees
    }
}

fn candidate_features(n_features: usize, max_features: Option<usize>, rng: &mut StdRng) -> Vec<usize> {
    match max_features {
        Some(k) if k < n_features => {
            let mut features = rand::seq::index::sample(rng, n_features, k).into_vec();
            features.sort_unstable();
            features
        }
        _ => (0..n_features).collect(),
    }
}

/// Exhaustive threshold search over the candidate features
fn best_split(
    data: &TrainingView<'_>,
    sample: &[usize],
    features: &[usize],
    min_samples_leaf: usize,
) -> Option<SplitCandidate> {
    let n = sample.len();
    let total: f64 = sample.iter().map(|&i| data.targets[i]).sum();
    let parent_score = total * total / n as f64;

    let mut best: Option<SplitCandidate> = None;
    let mut order = sample.to_vec();

    for &feature in features {
        order.sort_by(|&a, &b| data.rows[a][feature].total_cmp(&data.rows[b][feature]));

        let mut left_sum = 0.0;
        for (i, pair) in order.windows(2).enumerate() {
            let (current, next) = (pair[0], pair[1]);
            left_sum += data.targets[current];

            let n_left = i + 1;
            let n_right = n - n_left;
            if n_left < min_samples_leaf || n_right < min_samples_leaf {
                continue;
            }

            let x = data.rows[current][feature];
            let x_next = data.rows[next][feature];
            if x >= x_next {
                continue;
            }

            let right_sum = total - left_sum;
            let score = left_sum * left_sum / n_left as f64 + right_sum * right_sum / n_right as f64;

            if best.map_or(true, |b| score > b.score) {
                let mid = x + (x_next - x) / 2.0;
                // Midpoint can round up to x_next for adjacent floats
                let threshold = if mid < x_next { mid } else { x };
                best = Some(SplitCandidate {
                    feature,
                    threshold,
                    score,
                });
            }
        }
    }

    best.filter(|b| b.score > parent_score + parent_score.abs() * 1e-12)
}

fn mean(values: impl Iterator<Item = f64>) -> f64 {
    let (sum, count) = values.fold((0.0, 0usize), |(s, c), v| (s + v, c + 1));
    if count == 0 {
        0.0
    } else {
        sum / count as f64
    }
}

fn is_constant(mut values: impl Iterator<Item = f64>) -> bool {
    match values.next() {
        Some(first) => values.all(|v| v == first),
        None => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn step_data() -> (Vec<Vec<f64>>, Vec<f64>) {
        let rows: Vec<Vec<f64>> = (0..40).map(|i| vec![i as f64, (i % 3) as f64]).collect();
        let targets = rows.iter().map(|r| if r[0] < 20.0 { 10.0 } else { 90.0 }).collect();
        (rows, targets)
    }

    #[test]
    fn test_single_tree_learns_step() {
        let (rows, targets) = step_data();
        let params = ForestParams {
            n_trees: 1,
            ..ForestParams::default()
        };
        let data = TrainingView {
            rows: &rows,
            targets: &targets,
            n_features: 2,
        };
        let mut rng = StdRng::seed_from_u64(7);
        let tree = RegressionTree::fit(&data, (0..rows.len()).collect(), &params, &mut rng);

        assert_eq!(tree.node_count(), 3);
        assert_eq!(tree.depth(), 1);
        assert_eq!(tree.predict(&[5.0, 0.0]), 10.0);
        assert_eq!(tree.predict(&[35.0, 0.0]), 90.0);
    }

    #[test]
    fn test_forest_is_reproducible() {
        let (rows, targets) = step_data();
        let params = ForestParams {
            n_trees: 10,
            ..ForestParams::default()
        };
        let a = RandomForest::fit(&rows, &targets, &params).unwrap();
        let b = RandomForest::fit(&rows, &targets, &params).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.n_trees(), 10);
    }

    #[test]
    fn test_forest_prediction_within_target_range() {
        let (rows, targets) = step_data();
        let forest = RandomForest::fit(&rows, &targets, &ForestParams::default()).unwrap();
        for x in [0.0, 19.0, 20.0, 39.0, 1000.0] {
            let p = forest.predict(&[x, 1.0]).unwrap();
            assert!((10.0..=90.0).contains(&p));
        }
        assert!(forest.predict(&[2.0, 1.0]).unwrap() < forest.predict(&[38.0, 1.0]).unwrap());
    }

    #[test]
    fn test_max_depth_limits_growth() {
        let rows: Vec<Vec<f64>> = (0..64).map(|i| vec![i as f64]).collect();
        let targets: Vec<f64> = (0..64).map(|i| i as f64).collect();
        let params = ForestParams {
            n_trees: 3,
            max_depth: Some(2),
            ..ForestParams::default()
        };
        let forest = RandomForest::fit(&rows, &targets, &params).unwrap();
        assert!(forest.trees().iter().all(|t| t.depth() <= 2));
    }

    #[test]
    fn test_feature_count_mismatch() {
        let (rows, targets) = step_data();
        let forest = RandomForest::fit(&rows, &targets, &ForestParams { n_trees: 2, ..ForestParams::default() }).unwrap();
        assert_eq!(
            forest.predict(&[1.0]),
            Err(PredictorError::FeatureCount { expected: 2, actual: 1 })
        );
    }

    #[test]
    fn test_empty_training_set() {
        let result = RandomForest::fit(&[], &[], &ForestParams::default());
        assert_eq!(result, Err(PredictorError::EmptyTrainingSet));
    }

    #[test]
    fn test_invalid_params() {
        let params = ForestParams {
            n_trees: 0,
            ..ForestParams::default()
        };
        assert!(matches!(params.validate(), Err(PredictorError::InvalidParams(_))));
    }
}
