mod common;

use cnvtad::prelude::*;
use common::*;
use rstest::{
    fixture,
    rstest,
};
use tempfile::TempDir;

#[fixture]
fn config() -> AnnotationConfig {
    AnnotationConfig::default()
}

fn gene_names(tad: &Tad) -> Vec<&str> {
    tad.genes()
        .iter()
        .filter_map(|g| g.name())
        .collect()
}

#[rstest]
fn tads_get_their_elements(config: AnnotationConfig) -> anyhow::Result<()> {
    let (tads, stats) = annotated_tads(&config)?;

    assert_eq!(tads.chromosomes().collect::<Vec<_>>(), vec!["chr1", "chr2"]);
    let chr1 = tads.get("chr1").unwrap();
    assert_eq!(gene_names(&chr1[0]), vec!["GENE1", "GENE2"]);
    assert_eq!(gene_names(&chr1[1]), vec!["GENE3"]);
    assert_eq!(gene_names(&chr1[2]), vec!["GENE3", "GENE4"]);
    assert_eq!(chr1[1].enhancers()[0].id(), Some("ENH2"));

    assert!(chr1[0].high_constraint());
    assert!(!chr1[0].high_conservation());
    assert!(chr1[1].high_conservation());
    assert!(!chr1[2].high_constraint());

    let chr2 = tads.get("chr2").unwrap();
    assert_eq!(chr2[0].count_genes(), 0);
    assert_eq!(chr2[0].count_enhancers(), 1);
    assert_eq!(gene_names(&chr2[1]), vec!["GENE5"]);

    assert_eq!(stats.genes.dropped, 1);
    assert_eq!(stats.genes.consumed + stats.genes.leftover + stats.genes.dropped, 6);
    Ok(())
}

#[rstest]
fn cnvs_are_linked_to_tads(config: AnnotationConfig) -> anyhow::Result<()> {
    let cnvs = annotated_cnvs(&config)?;

    assert_eq!(cnvs.get("chr2").unwrap()[0].tads().len(), 1);
    assert_eq!(cnvs.get("chr1").unwrap()[0].tads()[0].count_genes(), 2);

    let chr1 = cnvs.get("chr1").unwrap();
    assert!(!chr1[0].boundary_spanning());
    assert!(chr1[1].boundary_spanning());
    assert_eq!(chr1[1].get_genes().count(), 3);

    assert_eq!(chr1[0].get_features(), [true, true, true, false]);
    assert_eq!(chr1[1].get_features(), [true, false, false, true]);
    assert_eq!(cnvs.get("chr2").unwrap()[0].get_features(), [true, false, true, false]);

    let orphan = &cnvs.get("chrX").unwrap()[0];
    assert!(orphan.tads().is_empty());
    Ok(())
}

#[rstest]
fn vcf_cnvs_match_bed_cnvs(config: AnnotationConfig) -> anyhow::Result<()> {
    let cnvs: IntervalCollection<Cnv> =
        load_collection(data_path("test_cnv.vcf"), &["ID"], InputFormat::Vcf, &config)?;
    let spans = cnvs
        .values()
        .map(|cnv| cnv.span())
        .collect::<Vec<_>>();
    assert_eq!(spans, vec![(100, 250), (1800, 2200)]);
    assert_eq!(cnvs.values().next().unwrap().interval().field("ID"), Some("del1"));

    let res = load_collection::<Cnv, _, _>(data_path("test_cnv.vcf"), &NO_COLUMNS, InputFormat::Bed, &config);
    assert!(matches!(res, Err(AnnotError::InvalidPath { .. })));
    Ok(())
}

#[rstest]
fn annotated_structures_round_trip(config: AnnotationConfig) -> anyhow::Result<()> {
    let (tads, _) = annotated_tads(&config)?;
    let cnvs = annotated_cnvs(&config)?;
    let dir = TempDir::new()?;

    let tad_path = dir.path().join("annotated_TADs.bin");
    save_to_path(&tads, &tad_path)?;
    let restored_tads: IntervalCollection<Tad> = load_from_path(&tad_path)?;
    assert_eq!(restored_tads, tads);

    let cnv_path = dir.path().join("annotated_CNVs.bin");
    save_to_path(&cnvs, &cnv_path)?;
    let restored_cnvs: IntervalCollection<Cnv> = load_from_path(&cnv_path)?;
    assert_eq!(restored_cnvs, cnvs);
    assert_eq!(
        restored_cnvs.chromosomes().collect::<Vec<_>>(),
        cnvs.chromosomes().collect::<Vec<_>>()
    );
    Ok(())
}

#[rstest]
#[case::binary(FeatureSet::Binary)]
#[case::extended(FeatureSet::Extended)]
#[case::extended_continuous(FeatureSet::ExtendedContinuous)]
fn feature_tsv_has_one_row_per_cnv(
    config: AnnotationConfig,
    #[case] feature_set: FeatureSet,
) -> anyhow::Result<()> {
    let cnvs = annotated_cnvs(&config)?;
    let table = create_feature_df(&cnvs, feature_set.name())?;

    let dir = TempDir::new()?;
    let path = dir.path().join("annotated_CNVs.csv");
    table.write_tsv(std::fs::File::create(&path)?)?;

    let text = std::fs::read_to_string(&path)?;
    let mut lines = text.lines();
    let header = lines.next().unwrap().split('\t').collect::<Vec<_>>();
    assert_eq!(header.len(), feature_set.n_features() + 3);
    assert_eq!(header[..3], ["chr", "start", "end"]);
    assert_eq!(lines.count(), cnvs.len());
    Ok(())
}

#[rstest]
fn filter_report_counts(config: AnnotationConfig) -> anyhow::Result<()> {
    let (tads, _) = annotated_tads(&config)?;
    let report = filter_tads(&tads, &SCORE_THRESHOLDS);

    let constrained = report
        .constrained
        .iter()
        .map(|bin| bin.tads.len())
        .collect::<Vec<_>>();
    assert_eq!(constrained, vec![0, 2, 2, 3, 4]);
    assert!(report.without_elements.is_empty());
    Ok(())
}
