//! Pathogenicity classification of CNVs from their feature vectors.
//!
//! [`Classifier`] wraps any [`BinaryClassifier`] (by default the built-in
//! [`LogisticRegression`]), trains it with stratified k-fold
//! cross-validation and evaluates it on a held-out set.
//!
//! Labels are `0` (non-pathogenic) and `1` (pathogenic).

use std::fmt::{
    self,
    Display,
};

use anyhow::{
    bail,
    ensure,
    Context,
};
use itertools::Itertools;
use log::{
    debug,
    info,
    warn,
};
use ndarray::{
    Array1,
    Array2,
    ArrayView1,
    ArrayView2,
    Axis,
};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde::{
    Deserialize,
    Serialize,
};
use statrs::statistics::Statistics;

use super::features::{
    FeatureSet,
    FeatureTable,
};
use crate::data_structs::collection::IntervalCollection;
use crate::data_structs::entities::Cnv;
use crate::with_field_fn;

pub const CLASS_NAMES: [&str; 2] = ["non-pathogenic", "pathogenic"];

pub trait BinaryClassifier {
    fn fit(
        &mut self,
        x: ArrayView2<f64>,
        y: ArrayView1<u8>,
    ) -> anyhow::Result<()>;

    /// Probability of class `1` for every row of `x`.
    fn predict_proba(
        &self,
        x: ArrayView2<f64>,
    ) -> anyhow::Result<Array1<f64>>;

    fn predict(
        &self,
        x: ArrayView2<f64>,
    ) -> anyhow::Result<Array1<u8>> {
        Ok(self
            .predict_proba(x)?
            .mapv(|p| u8::from(p > 0.5)))
    }
}

fn sigmoid(z: f64) -> f64 {
    1.0 / (1.0 + (-z).exp())
}

/// L2-regularised logistic regression fitted by batch gradient descent.
///
/// Features are standardised with the training mean and standard
/// deviation; constant features are only centred. `c` is the inverse
/// regularisation strength.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogisticRegression {
    learning_rate: f64,
    max_iter:      usize,
    c:             f64,
    tolerance:     f64,
    coef:          Option<Array1<f64>>,
    intercept:     f64,
    mean:          Array1<f64>,
    scale:         Array1<f64>,
}

impl Default for LogisticRegression {
    fn default() -> Self {
        Self {
            learning_rate: 0.1,
            max_iter:      1000,
            c:             1.0,
            tolerance:     1e-6,
            coef:          None,
            intercept:     0.0,
            mean:          Array1::zeros(0),
            scale:         Array1::ones(0),
        }
    }
}

impl LogisticRegression {
    pub fn new() -> Self {
        Self::default()
    }

    with_field_fn!(learning_rate, f64);

    with_field_fn!(max_iter, usize);

    with_field_fn!(c, f64);

    with_field_fn!(tolerance, f64);

    /// Coefficients on the standardised features, `None` before fitting.
    pub fn coefficients(&self) -> Option<&Array1<f64>> {
        self.coef.as_ref()
    }

    pub fn intercept(&self) -> f64 {
        self.intercept
    }

    fn standardise(
        &self,
        x: ArrayView2<f64>,
    ) -> Array2<f64> {
        (&x - &self.mean) / &self.scale
    }
}

impl BinaryClassifier for LogisticRegression {
    fn fit(
        &mut self,
        x: ArrayView2<f64>,
        y: ArrayView1<u8>,
    ) -> anyhow::Result<()> {
        let (n_rows, n_features) = x.dim();
        ensure!(
            n_rows == y.len(),
            "Feature matrix has {} rows but {} labels were given",
            n_rows,
            y.len()
        );
        ensure!(n_rows > 0, "Cannot fit on an empty training set");

        self.mean = x
            .mean_axis(Axis(0))
            .context("Cannot fit on an empty training set")?;
        self.scale = x
            .std_axis(Axis(0), 0.0)
            .mapv(|s| if s > 0.0 { s } else { 1.0 });

        let xs = self.standardise(x);
        let yf = y.mapv(f64::from);
        let n = n_rows as f64;
        let penalty = 1.0 / (self.c * n);

        let mut coef = Array1::<f64>::zeros(n_features);
        let mut intercept = 0.0;
        for iter in 0..self.max_iter {
            let proba = (xs.dot(&coef) + intercept).mapv(sigmoid);
            let residual = &proba - &yf;
            let grad_coef = xs.t().dot(&residual) / n + &coef * penalty;
            let grad_intercept = residual.sum() / n;

            coef.scaled_add(-self.learning_rate, &grad_coef);
            intercept -= self.learning_rate * grad_intercept;

            let max_grad = grad_coef
                .iter()
                .fold(grad_intercept.abs(), |acc, g| acc.max(g.abs()));
            if max_grad < self.tolerance {
                debug!("Logistic regression converged after {} iterations", iter + 1);
                break;
            }
        }

        self.coef = Some(coef);
        self.intercept = intercept;
        Ok(())
    }

    fn predict_proba(
        &self,
        x: ArrayView2<f64>,
    ) -> anyhow::Result<Array1<f64>> {
        let coef = match self.coef.as_ref() {
            Some(coef) => coef,
            None => bail!("Logistic regression has not been fitted"),
        };
        ensure!(
            x.ncols() == coef.len(),
            "Expected {} features, got {}",
            coef.len(),
            x.ncols()
        );
        Ok((self.standardise(x).dot(coef) + self.intercept).mapv(sigmoid))
    }
}

/// Receiver operating characteristic. Points are ordered by decreasing
/// threshold; the first point is `(0, 0)` with an infinite threshold.
#[derive(Debug, Clone, PartialEq)]
pub struct RocCurve {
    pub fpr:        Vec<f64>,
    pub tpr:        Vec<f64>,
    pub thresholds: Vec<f64>,
}

impl RocCurve {
    /// Area under the curve (trapezoidal rule).
    pub fn auc(&self) -> f64 {
        self.fpr
            .iter()
            .zip(self.tpr.iter())
            .tuple_windows()
            .map(|((x0, y0), (x1, y1))| (x1 - x0) * (y0 + y1) / 2.0)
            .sum()
    }
}

pub fn roc_curve(
    y_true: &[u8],
    scores: &[f64],
) -> anyhow::Result<RocCurve> {
    ensure!(
        y_true.len() == scores.len(),
        "Got {} labels but {} scores",
        y_true.len(),
        scores.len()
    );
    let n_pos = y_true.iter().filter(|y| **y > 0).count();
    let n_neg = y_true.len() - n_pos;
    ensure!(
        n_pos > 0 && n_neg > 0,
        "ROC is undefined when only one class is present"
    );

    let order = (0..scores.len())
        .sorted_by(|a, b| scores[*b].total_cmp(&scores[*a]))
        .collect_vec();

    let mut curve = RocCurve {
        fpr:        vec![0.0],
        tpr:        vec![0.0],
        thresholds: vec![f64::INFINITY],
    };
    let (mut tp, mut fp) = (0usize, 0usize);
    for (pos, idx) in order.iter().enumerate() {
        if y_true[*idx] > 0 {
            tp += 1;
        }
        else {
            fp += 1;
        }
        let last_of_tie = order
            .get(pos + 1)
            .map_or(true, |next| scores[*next] != scores[*idx]);
        if last_of_tie {
            curve.fpr.push(fp as f64 / n_neg as f64);
            curve.tpr.push(tp as f64 / n_pos as f64);
            curve.thresholds.push(scores[*idx]);
        }
    }
    Ok(curve)
}

pub fn roc_auc_score(
    y_true: &[u8],
    scores: &[f64],
) -> anyhow::Result<f64> {
    Ok(roc_curve(y_true, scores)?.auc())
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ClassMetrics {
    pub precision: f64,
    pub recall:    f64,
    pub f1:        f64,
    pub support:   usize,
}

/// Per-class precision, recall and F1 plus overall accuracy. Ratios with a
/// zero denominator are reported as 0.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassificationReport {
    pub labels:   [String; 2],
    pub classes:  [ClassMetrics; 2],
    pub accuracy: f64,
}

impl ClassificationReport {
    pub fn new(
        y_true: &[u8],
        y_pred: &[u8],
        labels: [String; 2],
    ) -> anyhow::Result<Self> {
        ensure!(
            y_true.len() == y_pred.len(),
            "Got {} labels but {} predictions",
            y_true.len(),
            y_pred.len()
        );
        let ratio = |num: usize, den: usize| {
            if den == 0 {
                0.0
            }
            else {
                num as f64 / den as f64
            }
        };

        let classes = [0u8, 1u8].map(|class| {
            let pairs = || y_true.iter().zip(y_pred.iter());
            let tp = pairs()
                .filter(|(t, p)| **t == class && **p == class)
                .count();
            let predicted = y_pred.iter().filter(|p| **p == class).count();
            let support = y_true.iter().filter(|t| **t == class).count();

            let precision = ratio(tp, predicted);
            let recall = ratio(tp, support);
            let f1 = if precision + recall > 0.0 {
                2.0 * precision * recall / (precision + recall)
            }
            else {
                0.0
            };
            ClassMetrics {
                precision,
                recall,
                f1,
                support,
            }
        });
        let correct = y_true
            .iter()
            .zip(y_pred.iter())
            .filter(|(t, p)| t == p)
            .count();

        Ok(Self {
            labels,
            classes,
            accuracy: ratio(correct, y_true.len()),
        })
    }
}

impl Display for ClassificationReport {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        let width = self
            .labels
            .iter()
            .map(String::len)
            .max()
            .unwrap_or(0)
            .max("accuracy".len());
        writeln!(
            f,
            "{:>width$} {:>10} {:>10} {:>10} {:>10}",
            "", "precision", "recall", "f1-score", "support"
        )?;
        for (label, metrics) in self.labels.iter().zip(self.classes.iter()) {
            writeln!(
                f,
                "{:>width$} {:>10.2} {:>10.2} {:>10.2} {:>10}",
                label, metrics.precision, metrics.recall, metrics.f1, metrics.support
            )?;
        }
        let total: usize = self.classes.iter().map(|c| c.support).sum();
        write!(
            f,
            "\n{:>width$} {:>10} {:>10} {:>10.2} {:>10}",
            "accuracy", "", "", self.accuracy, total
        )
    }
}

/// Train/test index pairs of a stratified k-fold split.
///
/// Every class is spread round-robin over the folds, continuing where the
/// previous class stopped, so fold sizes differ by at most one. With a
/// `seed` the samples of each class are shuffled first.
pub fn stratified_k_fold(
    y: &[u8],
    n_splits: usize,
    seed: Option<u64>,
) -> anyhow::Result<Vec<(Vec<usize>, Vec<usize>)>> {
    ensure!(n_splits >= 2, "At least 2 folds are required, got {}", n_splits);
    ensure!(
        n_splits <= y.len(),
        "Cannot split {} samples into {} folds",
        y.len(),
        n_splits
    );

    let mut rng = seed.map(StdRng::seed_from_u64);
    let mut fold_of = vec![0usize; y.len()];
    let mut counter = 0usize;
    for class in y.iter().copied().unique().sorted() {
        let mut members = (0..y.len())
            .filter(|idx| y[*idx] == class)
            .collect_vec();
        if members.len() < n_splits {
            warn!(
                "Class {} has only {} members, fewer than {} folds",
                class,
                members.len(),
                n_splits
            );
        }
        if let Some(rng) = rng.as_mut() {
            members.shuffle(rng);
        }
        for idx in members {
            fold_of[idx] = counter % n_splits;
            counter += 1;
        }
    }

    Ok((0..n_splits)
        .map(|fold| {
            (0..y.len()).partition(|idx| fold_of[*idx] != fold)
        })
        .collect())
}

/// Rows of a stratified train/test split.
#[derive(Debug, Clone)]
pub struct DataSplit {
    pub x_train: Array2<f64>,
    pub y_train: Array1<u8>,
    pub x_test:  Array2<f64>,
    pub y_test:  Array1<u8>,
}

/// Holds out `test_fraction` of every class (rounded up) as the test set.
pub fn train_test_split(
    x: ArrayView2<f64>,
    y: ArrayView1<u8>,
    test_fraction: f64,
    seed: u64,
) -> anyhow::Result<DataSplit> {
    ensure!(
        (0.0..1.0).contains(&test_fraction) && test_fraction > 0.0,
        "Test fraction must be in (0, 1), got {}",
        test_fraction
    );
    ensure!(x.nrows() == y.len(), "Features and labels differ in length");

    let mut rng = StdRng::seed_from_u64(seed);
    let mut train_idx = Vec::new();
    let mut test_idx = Vec::new();
    for class in y.iter().copied().unique().sorted() {
        let mut members = (0..y.len())
            .filter(|idx| y[*idx] == class)
            .collect_vec();
        members.shuffle(&mut rng);
        let n_test = (members.len() as f64 * test_fraction).ceil() as usize;
        test_idx.extend_from_slice(&members[..n_test]);
        train_idx.extend_from_slice(&members[n_test..]);
    }
    train_idx.sort_unstable();
    test_idx.sort_unstable();

    Ok(DataSplit {
        x_train: x.select(Axis(0), &train_idx),
        y_train: y.select(Axis(0), &train_idx),
        x_test:  x.select(Axis(0), &test_idx),
        y_test:  y.select(Axis(0), &test_idx),
    })
}

/// Outcome of [`Classifier::test`].
#[derive(Debug, Clone)]
pub struct TestResult {
    pub report: ClassificationReport,
    pub roc:    RocCurve,
    pub auc:    f64,
}

/// Named classifier with cross-validated training.
#[derive(Debug, Clone)]
pub struct Classifier<C = LogisticRegression> {
    name:     String,
    model:    C,
    classes:  [String; 2],
    n_splits: usize,
    seed:     Option<u64>,
    trained:  bool,
}

impl Default for Classifier<LogisticRegression> {
    fn default() -> Self {
        Self::new("lr", LogisticRegression::default())
    }
}

impl<C: BinaryClassifier + Clone> Classifier<C> {
    pub fn new(
        name: &str,
        model: C,
    ) -> Self {
        Self {
            name: name.to_string(),
            model,
            classes: CLASS_NAMES.map(String::from),
            n_splits: 10,
            seed: None,
            trained: false,
        }
    }

    with_field_fn!(n_splits, usize);

    with_field_fn!(seed, Option<u64>);

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn model(&self) -> &C {
        &self.model
    }

    pub fn is_trained(&self) -> bool {
        self.trained
    }

    /// Cross-validates on `(x, y)` and returns the AUC of every fold, then
    /// fits the model on all rows. Folds whose test part holds a single
    /// class have no AUC and are skipped.
    pub fn train(
        &mut self,
        x: ArrayView2<f64>,
        y: ArrayView1<u8>,
    ) -> anyhow::Result<Vec<f64>> {
        info!("Training {} with {}-fold CV", self.name, self.n_splits);
        let labels = y.to_vec();
        let folds = stratified_k_fold(&labels, self.n_splits, self.seed)?;

        let mut aucs = Vec::with_capacity(folds.len());
        for (fold, (train_idx, test_idx)) in folds.iter().enumerate() {
            let mut model = self.model.clone();
            model.fit(
                x.select(Axis(0), train_idx).view(),
                y.select(Axis(0), train_idx).view(),
            )?;
            let scores = model.predict_proba(x.select(Axis(0), test_idx).view())?;
            let y_test = y.select(Axis(0), test_idx);
            match roc_auc_score(&y_test.to_vec(), &scores.to_vec()) {
                Ok(auc) => {
                    info!("Fold {}: AUC {:.4}", fold + 1, auc);
                    aucs.push(auc);
                },
                Err(e) => warn!("Fold {}: {}", fold + 1, e),
            }
        }

        self.model.fit(x, y)?;
        self.trained = true;
        Ok(aucs)
    }

    pub fn test(
        &self,
        x: ArrayView2<f64>,
        y: ArrayView1<u8>,
    ) -> anyhow::Result<TestResult> {
        ensure!(self.trained, "Classifier {} has not been trained", self.name);
        info!("Testing {} on {} samples", self.name, y.len());

        let labels = y.to_vec();
        let predicted = self.model.predict(x)?.to_vec();
        let scores = self.model.predict_proba(x)?.to_vec();

        let report = ClassificationReport::new(&labels, &predicted, self.classes.clone())?;
        let roc = roc_curve(&labels, &scores)?;
        let auc = roc.auc();
        Ok(TestResult { report, roc, auc })
    }
}

/// Stacks the features of pathogenic (label `1`) and benign (label `0`)
/// CNVs into one matrix.
pub fn build_training_set(
    pathogenic: &IntervalCollection<Cnv>,
    benign: &IntervalCollection<Cnv>,
    feature_set: FeatureSet,
) -> anyhow::Result<(Array2<f64>, Array1<u8>)> {
    ensure!(
        !pathogenic.is_empty() && !benign.is_empty(),
        "Both the pathogenic and the benign set need at least one CNV"
    );
    let table = FeatureTable::from_cnvs(pathogenic.values().chain(benign.values()), feature_set);
    let labels = std::iter::repeat(1u8)
        .take(pathogenic.len())
        .chain(std::iter::repeat(0u8).take(benign.len()))
        .collect::<Array1<u8>>();
    Ok((table.to_matrix()?, labels))
}

/// Pearson correlation of every feature column with the label (the phi
/// coefficient for binary features). Constant columns get 0.
pub fn label_correlations(
    x: ArrayView2<f64>,
    y: ArrayView1<u8>,
) -> Vec<f64> {
    let labels = y.iter().map(|v| f64::from(*v)).collect_vec();
    let label_sd = labels.iter().std_dev();
    x.columns()
        .into_iter()
        .map(|column| {
            let values = column.to_vec();
            let sd = values.iter().std_dev();
            if sd > 0.0 && label_sd > 0.0 {
                values.iter().covariance(labels.iter()) / (sd * label_sd)
            }
            else {
                0.0
            }
        })
        .collect()
}
