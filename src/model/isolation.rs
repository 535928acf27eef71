//! Isolation forest over a dense feature matrix.
//! Shorter average path to isolate a row = more anomalous.

use ndarray::{ArrayView1, ArrayView2};
use rand::seq::{index, SliceRandom};
use rand::Rng;

const EULER_GAMMA: f64 = 0.577_215_664_901_532_9;

/// Average path length of an unsuccessful BST search over `n` points.
pub fn average_path_length(n: usize) -> f64 {
    match n {
        0 | 1 => 0.0,
        2 => 1.0,
        _ => {
            let n = n as f64;
            2.0 * ((n - 1.0).ln() + EULER_GAMMA) - 2.0 * (n - 1.0) / n
        }
    }
}

#[derive(Debug, Clone)]
enum Node {
    Leaf {
        size: usize,
    },
    Split {
        feature: usize,
        threshold: f64,
        left: Box<Node>,
        right: Box<Node>,
    },
}

#[derive(Debug, Clone)]
pub struct IsolationTree {
    root: Node,
}

impl IsolationTree {
    fn grow<R: Rng>(x: ArrayView2<'_, f64>, rows: Vec<usize>, max_depth: usize, rng: &mut R) -> Self {
        Self {
            root: grow_node(x, rows, 0, max_depth, rng),
        }
    }

    /// Depth at which `row` lands, plus the expected remaining depth of its leaf.
    pub fn path_length(&self, row: ArrayView1<'_, f64>) -> f64 {
        let mut node = &self.root;
        let mut depth = 0.0;
        loop {
            match node {
                Node::Leaf { size } => return depth + average_path_length(*size),
                Node::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    node = if row[*feature] <= *threshold { &**left } else { &**right };
                    depth += 1.0;
                }
            }
        }
    }
}

fn grow_node<R: Rng>(
    x: ArrayView2<'_, f64>,
    rows: Vec<usize>,
    depth: usize,
    max_depth: usize,
    rng: &mut R,
) -> Node {
    if depth >= max_depth || rows.len() <= 1 {
        return Node::Leaf { size: rows.len() };
    }

    // (feature, min, max) for every feature that still varies in this node
    let splittable: Vec<(usize, f64, f64)> = (0..x.ncols())
        .filter_map(|f| {
            let (lo, hi) = rows.iter().fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &r| {
                let v = x[[r, f]];
                (lo.min(v), hi.max(v))
            });
            (hi > lo).then_some((f, lo, hi))
        })
        .collect();

    let Some(&(feature, lo, hi)) = splittable.choose(rng) else {
        // All rows identical on every feature.
        return Node::Leaf { size: rows.len() };
    };

    let threshold = rng.gen_range(lo..hi);
    let (left, right): (Vec<usize>, Vec<usize>) = rows.into_iter().partition(|&r| x[[r, feature]] <= threshold);

    Node::Split {
        feature,
        threshold,
        left: Box::new(grow_node(x, left, depth + 1, max_depth, rng)),
        right: Box::new(grow_node(x, right, depth + 1, max_depth, rng)),
    }
}

#[derive(Debug, Clone)]
pub struct IsolationForest {
    trees: Vec<IsolationTree>,
    subsample: usize,
}

impl IsolationForest {
    /// Grow `n_trees` trees, each on `min(max_samples, rows)` rows drawn without replacement.
    pub fn fit<R: Rng>(x: ArrayView2<'_, f64>, n_trees: usize, max_samples: usize, rng: &mut R) -> Self {
        let n = x.nrows();
        let subsample = max_samples.min(n);
        let max_depth = (subsample.max(2) as f64).log2().ceil() as usize;
        let trees = (0..n_trees)
            .map(|_| {
                let rows = index::sample(rng, n, subsample).into_vec();
                IsolationTree::grow(x, rows, max_depth, rng)
            })
            .collect();
        Self { trees, subsample }
    }

    pub fn n_trees(&self) -> usize {
        self.trees.len()
    }

    /// Anomaly score in (0, 1] per row: `2^(-E[h(x)] / c(subsample))`.
    /// A forest grown on a single row has no scale and scores every row 0.5.
    pub fn score(&self, x: ArrayView2<'_, f64>) -> Vec<f64> {
        let norm = average_path_length(self.subsample);
        x.rows()
            .into_iter()
            .map(|row| {
                if norm == 0.0 || self.trees.is_empty() {
                    return 0.5;
                }
                let mean_depth = self.trees.iter().map(|t| t.path_length(row)).sum::<f64>()
                    / self.trees.len() as f64;
                2f64.powf(-mean_depth / norm)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{array, Array2};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn path_length_constants() {
        assert_eq!(average_path_length(1), 0.0);
        assert_eq!(average_path_length(2), 1.0);
        assert!((average_path_length(256) - 10.2448).abs() < 1e-3);
    }

    #[test]
    fn isolated_point_scores_highest() {
        let mut x = Array2::zeros((40, 2));
        for i in 0..39 {
            x[[i, 0]] = (i % 5) as f64 * 0.01;
            x[[i, 1]] = (i % 3) as f64 * 0.01;
        }
        x[[39, 0]] = 10.0;
        x[[39, 1]] = -10.0;
        let mut rng = StdRng::seed_from_u64(3);
        let forest = IsolationForest::fit(x.view(), 100, 256, &mut rng);
        let scores = forest.score(x.view());
        let max_idx = scores
            .iter()
            .enumerate()
            .max_by(|a, b| a.1.total_cmp(b.1))
            .map(|(i, _)| i)
            .unwrap();
        assert_eq!(max_idx, 39);
    }

    #[test]
    fn constant_matrix_gives_equal_scores() {
        let x = array![[1.0, 0.5], [1.0, 0.5], [1.0, 0.5], [1.0, 0.5]];
        let mut rng = StdRng::seed_from_u64(0);
        let forest = IsolationForest::fit(x.view(), 10, 256, &mut rng);
        let scores = forest.score(x.view());
        assert!(scores.iter().all(|s| *s == scores[0]));
    }

    #[test]
    fn single_row_scores_half() {
        let x = array![[2.0, 1.0]];
        let mut rng = StdRng::seed_from_u64(0);
        let forest = IsolationForest::fit(x.view(), 5, 256, &mut rng);
        assert_eq!(forest.score(x.view()), vec![0.5]);
    }
}
