use std::path::PathBuf;

use clap::Args;
use cnvtad::prelude::*;
use console::style;
use log::info;

use crate::strings::annotate as strings;
use crate::utils::{
    finish,
    load_config,
    step,
    validate_output,
    UtilsArgs,
};

#[derive(Args, Debug, Clone)]
pub(crate) struct AnnotateTadsArgs {
    #[arg(short, long, required = true, help = strings::TADS)]
    tads:             PathBuf,
    #[arg(short, long, required = true, help = strings::GENES)]
    genes:            PathBuf,
    #[arg(short, long, required = true, help = strings::ENHANCERS)]
    enhancers:        PathBuf,
    #[arg(
        long,
        value_delimiter = ',',
        default_values_t = ["name".to_string(), "pLI".to_string()],
        help = strings::GENE_COLUMNS
    )]
    gene_columns:     Vec<String>,
    #[arg(
        long,
        value_delimiter = ',',
        default_values_t = ["ID".to_string(), "Phastcon".to_string()],
        help = strings::ENHANCER_COLUMNS
    )]
    enhancer_columns: Vec<String>,
    #[arg(long, help = strings::CONFIG)]
    config:           Option<PathBuf>,
    #[arg(short, long, default_value = "annotated_TADs.bin", help = strings::OUTPUT)]
    output:           PathBuf,
}

impl AnnotateTadsArgs {
    pub fn run(
        &self,
        utils: &UtilsArgs,
    ) -> anyhow::Result<()> {
        let config = load_config(self.config.as_deref())?;
        let output = validate_output(&self.output)?;
        let pbar = utils.stages(5)?;

        let tads: IntervalCollection<Tad> =
            load_collection(&self.tads, &[] as &[&str], InputFormat::Bed, &config)?;
        step(&pbar, "Loaded TADs");
        let genes: IntervalCollection<Gene> =
            load_collection(&self.genes, &self.gene_columns[..], InputFormat::Bed, &config)?;
        step(&pbar, "Loaded genes");
        let enhancers: IntervalCollection<Enhancer> = load_collection(
            &self.enhancers,
            &self.enhancer_columns[..],
            InputFormat::Bed,
            &config,
        )?;
        step(&pbar, "Loaded enhancers");

        let (annotated, stats) = TadAnnotator::new(config).annotate(tads, genes, enhancers);
        step(&pbar, "Annotated TADs");
        save_to_path(&annotated, &output)?;
        step(&pbar, "Saved");
        finish(pbar);

        info!(
            "Genes: {} linked, {} dropped. Enhancers: {} linked, {} dropped",
            stats.genes.links, stats.genes.dropped, stats.enhancers.links, stats.enhancers.dropped
        );
        println!(
            "Annotated {} TADs on {} chromosomes, saved to {}",
            style(annotated.len()).green(),
            annotated.n_chr(),
            style(output.display()).green()
        );
        Ok(())
    }
}
