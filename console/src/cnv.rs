use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

use anyhow::bail;
use clap::Args;
use cnvtad::prelude::*;
use console::style;
use log::info;

use crate::strings::cnv as strings;
use crate::utils::{
    finish,
    load_config,
    step,
    validate_output,
    UtilsArgs,
};

#[derive(Args, Debug, Clone)]
pub(crate) struct AnnotateCnvsArgs {
    #[arg(short, long, default_value = "annotated_TADs.bin", help = strings::TADS)]
    tads:        PathBuf,
    #[arg(short, long, required = true, help = strings::CNVS)]
    cnvs:        PathBuf,
    #[arg(long, default_value_t = false, help = strings::VCF)]
    vcf:         bool,
    #[arg(long, default_value_t = false, help = strings::NO_PICKLE)]
    no_pickle:   bool,
    #[arg(long, default_value_t = false, help = strings::CSV)]
    csv:         bool,
    #[arg(short, long, default_value = "extended_continuous", help = strings::FEATURES)]
    features:    String,
    #[arg(long, value_delimiter = ',', help = strings::CNV_COLUMNS)]
    cnv_columns: Vec<String>,
    #[arg(long, help = strings::CONFIG)]
    config:      Option<PathBuf>,
    #[arg(short, long, default_value = "annotated_CNVs.bin", help = strings::OUTPUT)]
    output:      PathBuf,
}

impl AnnotateCnvsArgs {
    pub fn run(
        &self,
        utils: &UtilsArgs,
    ) -> anyhow::Result<()> {
        if self.no_pickle && !self.csv {
            eprintln!(
                "{}",
                style("--no-pickle without --csv would not write anything.").red()
            );
            bail!("Nothing to write");
        }
        let feature_set: FeatureSet = self.features.parse()?;
        let config = load_config(self.config.as_deref())?;
        let output = validate_output(&self.output)?;
        let format = if self.vcf {
            InputFormat::Vcf
        }
        else {
            InputFormat::Bed
        };
        let pbar = utils.stages(4)?;

        let tads: IntervalCollection<Tad> = load_from_path(&self.tads)?;
        step(&pbar, "Loaded TADs");
        let cnvs: IntervalCollection<Cnv> =
            load_collection(&self.cnvs, &self.cnv_columns[..], format, &config)?;
        step(&pbar, "Loaded CNVs");

        let (annotated, stats) = CnvAnnotator::new(tads.into_shared(), config).annotate(cnvs);
        step(&pbar, "Annotated CNVs");
        info!(
            "{} CNV-TAD links, {} CNVs on chromosomes without TADs",
            stats.links, stats.dropped
        );

        if !self.no_pickle {
            save_to_path(&annotated, &output)?;
            println!(
                "Saved {} annotated CNVs to {}",
                style(annotated.len()).green(),
                style(output.display()).green()
            );
        }
        if self.csv {
            let csv_path = output.with_extension("csv");
            let table = create_feature_df(&annotated, feature_set.name())?;
            table.write_tsv(BufWriter::new(File::create(&csv_path)?))?;
            println!(
                "Saved {} features of {} CNVs to {}",
                style(feature_set).green(),
                table.n_rows(),
                style(csv_path.display()).green()
            );
        }
        step(&pbar, "Saved");
        finish(pbar);
        Ok(())
    }
}
