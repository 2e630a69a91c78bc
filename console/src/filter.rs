use std::path::PathBuf;

use clap::Args;
use cnvtad::prelude::*;
use console::style;

use crate::strings::filter as strings;
use crate::utils::{
    validate_dir,
    UtilsArgs,
};

#[derive(Args, Debug, Clone)]
pub(crate) struct FilterTadsArgs {
    #[arg(short, long, default_value = "annotated_TADs.bin", help = strings::TADS)]
    tads:   PathBuf,
    #[arg(short, long, default_value = ".", help = strings::OUTPUT)]
    output: PathBuf,
    #[arg(long, default_value_t = false, help = strings::BED)]
    bed:    bool,
    #[arg(long, default_value_t = false, help = strings::LIST)]
    list:   bool,
}

impl FilterTadsArgs {
    pub fn run(
        &self,
        _utils: &UtilsArgs,
    ) -> anyhow::Result<()> {
        let tads: IntervalCollection<Tad> = load_from_path(&self.tads)?;
        let report = filter_tads(&tads, &SCORE_THRESHOLDS);
        println!("{}", report);

        if self.list {
            for tad in report.without_elements.iter() {
                println!("{}", tad.interval());
            }
        }
        if self.bed {
            let dir = validate_dir(&self.output)?;
            let written = report.write_beds(&dir)?;
            println!(
                "Wrote {} BED files to {}",
                style(written.len()).green(),
                style(dir.display()).green()
            );
        }
        Ok(())
    }
}
