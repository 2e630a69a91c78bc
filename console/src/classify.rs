use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

use clap::Args;
use cnvtad::exports::polars::prelude::{
    Column,
    CsvWriter,
    DataFrame,
    SerWriter,
};
use cnvtad::prelude::*;
use console::style;
use itertools::Itertools;

use crate::strings::classify as strings;
use crate::utils::{
    finish,
    step,
    validate_output,
    UtilsArgs,
};

#[derive(Args, Debug, Clone)]
pub(crate) struct ClassifyArgs {
    #[arg(short, long, required = true, help = strings::PATHOGENIC)]
    pathogenic:    PathBuf,
    #[arg(short, long, required = true, help = strings::BENIGN)]
    benign:        PathBuf,
    #[arg(short, long, default_value = "extended_continuous", help = strings::FEATURES)]
    features:      String,
    #[arg(long, default_value_t = 10, help = strings::FOLDS)]
    folds:         usize,
    #[arg(long, default_value_t = 0.2, help = strings::TEST_FRACTION)]
    test_fraction: f64,
    #[arg(long, default_value_t = 42, help = strings::SEED)]
    seed:          u64,
    #[arg(long, default_value_t = 0.5, help = strings::CORRELATION)]
    correlation:   f64,
    #[arg(long, help = strings::ROC)]
    roc:           Option<PathBuf>,
}

impl ClassifyArgs {
    pub fn run(
        &self,
        utils: &UtilsArgs,
    ) -> anyhow::Result<()> {
        let feature_set: FeatureSet = self.features.parse()?;
        let roc_path = self
            .roc
            .as_deref()
            .map(validate_output)
            .transpose()?;
        let pbar = utils.stages(4)?;

        let pathogenic: IntervalCollection<Cnv> = load_from_path(&self.pathogenic)?;
        let benign: IntervalCollection<Cnv> = load_from_path(&self.benign)?;
        step(&pbar, "Loaded CNVs");
        let (x, y) = build_training_set(&pathogenic, &benign, feature_set)?;
        let split = train_test_split(x.view(), y.view(), self.test_fraction, self.seed)?;
        step(&pbar, "Split data");

        let mut classifier = Classifier::default()
            .with_n_splits(self.folds)
            .with_seed(Some(self.seed));
        let aucs = classifier.train(split.x_train.view(), split.y_train.view())?;
        step(&pbar, "Trained");
        let result = classifier.test(split.x_test.view(), split.y_test.view())?;
        step(&pbar, "Tested");
        finish(pbar);

        println!(
            "{} training samples, {} test samples, {} features",
            split.y_train.len(),
            split.y_test.len(),
            style(feature_set).green()
        );
        println!(
            "Cross-validation AUC: {}",
            aucs.iter()
                .map(|auc| format!("{:.3}", auc))
                .join(", ")
        );
        println!("{}", result.report);
        println!("Test AUC: {}", style(format!("{:.3}", result.auc)).green());

        let correlated = label_correlations(x.view(), y.view())
            .into_iter()
            .zip(feature_set.columns())
            .filter(|(corr, _)| corr.abs() > self.correlation)
            .collect_vec();
        if correlated.is_empty() {
            println!("No feature correlates with the label above {}", self.correlation);
        }
        for (corr, name) in correlated {
            println!(
                "{} correlates with the label: {:.3}",
                style(name).yellow(),
                corr
            );
        }

        if let Some(path) = roc_path {
            let mut df = DataFrame::new(vec![
                Column::new("fpr".into(), result.roc.fpr.clone()),
                Column::new("tpr".into(), result.roc.tpr.clone()),
                Column::new("threshold".into(), result.roc.thresholds.clone()),
            ])?;
            CsvWriter::new(BufWriter::new(File::create(&path)?))
                .include_header(true)
                .with_separator(b'\t')
                .finish(&mut df)?;
            println!("Saved ROC curve to {}", style(path.display()).green());
        }
        Ok(())
    }
}
