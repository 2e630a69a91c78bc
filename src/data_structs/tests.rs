use std::sync::Arc;

use rstest::rstest;

use super::*;
use crate::config::{
    AnnotationConfig,
    DistanceMetric,
};
use crate::error::AnnotError;

fn iv(
    chrom: &str,
    start: u32,
    end: u32,
) -> GenomicInterval {
    GenomicInterval::new(chrom, start, end)
}

#[test]
fn test_parse_line_with_schema() {
    let interval =
        GenomicInterval::parse_line("chr1\t10\t20\tG1\t0.95\textra", &["name", "pLI"])
            .unwrap();
    assert_eq!(interval.chrom(), "chr1");
    assert_eq!(interval.span(), (10, 20));
    assert_eq!(interval.field("name"), Some("G1"));
    assert_eq!(interval.field("pLI"), Some("0.95"));
    assert_eq!(interval.fields().len(), 2);
    assert_eq!(
        interval.fields().keys().collect::<Vec<_>>(),
        vec!["name", "pLI"]
    );
}

#[test]
fn test_parse_line_whitespace_and_short_schema() {
    let interval = GenomicInterval::parse_line("chr2   5 9", &["name"]).unwrap();
    assert_eq!(interval.span(), (5, 9));
    assert!(interval.fields().is_empty());
}

#[rstest]
#[case::too_few_columns("chr1\t10")]
#[case::non_numeric_start("chr1\tten\t20")]
#[case::non_numeric_end("chr1\t10\t2O")]
#[case::negative("chr1\t-5\t20")]
#[case::empty_interval("chr1\t20\t20")]
#[case::reversed("chr1\t30\t20")]
fn test_parse_line_malformed(#[case] line: &str) {
    let res = GenomicInterval::parse_line::<&str>(line, &[]);
    assert!(matches!(res, Err(AnnotError::MalformedRecord { .. })));
}

#[rstest]
#[case::info_end("chr1\t101\tcnv1\tN\t<DEL>\t.\tPASS\tSVTYPE=DEL;END=500", (100, 500))]
#[case::svlen("chr1\t101\tcnv1\tN\t<DEL>\t.\tPASS\tSVTYPE=DEL;SVLEN=-50", (100, 150))]
#[case::single_base("chr1\t101\tsnv1\tA\tT", (100, 101))]
fn test_parse_vcf_line(
    #[case] line: &str,
    #[case] expected: (u32, u32),
) {
    let interval = GenomicInterval::parse_vcf_line(line, &["ID"]).unwrap();
    assert_eq!(interval.span(), expected);
    assert_eq!(interval.chrom(), "chr1");
    assert!(interval.field("ID").is_some());
}

#[test]
fn test_parse_vcf_line_zero_position() {
    let res = GenomicInterval::parse_vcf_line::<&str>("chr1\t0\t.", &[]);
    assert!(matches!(res, Err(AnnotError::MalformedRecord { .. })));
}

#[test]
fn test_collection_groups_and_sorts_stably() {
    let items = vec![
        iv("chr2", 50, 60).with_field("name", "b"),
        iv("chr1", 30, 40).with_field("name", "first"),
        iv("chr1", 10, 20),
        iv("chr1", 30, 40).with_field("name", "second"),
        iv("chr1", 10, 15),
    ];
    let collection = create_chr_dictionary_from_beds(items);

    assert_eq!(collection.n_chr(), 2);
    assert_eq!(collection.len(), 5);
    assert_eq!(collection.chromosomes().collect::<Vec<_>>(), vec!["chr2", "chr1"]);
    assert!(collection.is_sorted());

    let chr1 = collection.get("chr1").unwrap();
    assert_eq!(
        chr1.iter().map(|i| i.span()).collect::<Vec<_>>(),
        vec![(10, 15), (10, 20), (30, 40), (30, 40)]
    );
    assert_eq!(chr1[2].field("name"), Some("first"));
    assert_eq!(chr1[3].field("name"), Some("second"));
}

#[test]
fn test_collection_insert_keeps_order() {
    let mut collection = IntervalCollection::from_intervals(vec![iv("chr1", 0, 10), iv("chr1", 20, 30)]);
    collection.insert(iv("chr1", 5, 8));
    collection.insert(iv("chrX", 1, 2));
    assert!(collection.is_sorted());
    assert_eq!(collection.get("chr1").unwrap()[1].span(), (5, 8));
    assert!(collection.contains_chr("chrX"));
}

#[test]
fn test_reduce_to() {
    let collection = IntervalCollection::from_intervals(vec![
        iv("chr1", 0, 10),
        iv("chr2", 0, 10),
        iv("chr3", 0, 10),
    ]);
    let reduced = collection.reduce_to(["chr3", "chr1", "chrY"]);
    assert_eq!(reduced.chromosomes().collect::<Vec<_>>(), vec!["chr3", "chr1", "chrY"]);
    assert_eq!(reduced.len(), 2);
    assert!(reduced.get("chrY").unwrap().is_empty());
    assert!(reduced.get("chr2").is_none());
}

#[test]
fn test_registry_resolves_case_insensitive() {
    let registry = EntityRegistry::default();
    assert_eq!(registry.resolve("TAD").unwrap(), EntityKind::Tad);
    assert_eq!(registry.resolve("cnv").unwrap(), EntityKind::Cnv);
    assert_eq!(registry.resolve("Enhancer").unwrap(), EntityKind::Enhancer);
    assert!(matches!(
        registry.resolve("exon"),
        Err(AnnotError::UnknownEntityType(name)) if name == "exon"
    ));
}

#[test]
fn test_registry_aliases_and_build() {
    let mut registry = EntityRegistry::empty();
    assert!(registry.resolve("gene").is_err());
    registry.register("domain", EntityKind::Tad);

    let config = AnnotationConfig::default();
    let kind = registry.resolve("DOMAIN").unwrap();
    let entity = kind.build(iv("chr1", 0, 100), &config).unwrap();
    assert_eq!(entity.kind(), EntityKind::Tad);
    assert_eq!(entity.chrom(), "chr1");

    let tad = Tad::try_from(entity.clone()).unwrap();
    assert_eq!(tad.span(), (0, 100));
    assert!(Gene::try_from(entity).is_err());
}

#[rstest]
#[case::numeric("0.97", Some(0.97))]
#[case::na("NA", None)]
#[case::none("None", None)]
#[case::dot(".", None)]
fn test_gene_constraint_parsing(
    #[case] value: &str,
    #[case] expected: Option<f64>,
) {
    let config = AnnotationConfig::default();
    let interval = iv("chr1", 0, 10).with_field("pLI", value);
    let gene = Gene::from_interval(interval, &config).unwrap();
    assert_eq!(gene.constraint(), expected);
}

#[test]
fn test_gene_constraint_non_numeric() {
    let config = AnnotationConfig::default();
    let interval = iv("chr1", 0, 10).with_field("pLI", "high");
    assert!(matches!(
        Gene::from_interval(interval, &config),
        Err(AnnotError::MalformedRecord { .. })
    ));
}

#[test]
fn test_enhancer_uses_configured_column() {
    let config = AnnotationConfig::default().with_conservation_field("phyloP".to_string());
    let interval = iv("chr1", 0, 10)
        .with_field("ID", "E1")
        .with_field("phyloP", "0.5");
    let enhancer = Enhancer::from_interval(interval, &config).unwrap();
    assert_eq!(enhancer.conservation(), Some(0.5));
    assert_eq!(enhancer.id(), Some("E1"));
}

#[test]
fn test_tad_finalize_flags() {
    let config = AnnotationConfig::default();
    let mut tad = Tad::new(iv("chr1", 0, 100));
    tad.push_gene(Arc::new(Gene::new(iv("chr1", 10, 20), Some(0.2))));
    tad.push_gene(Arc::new(Gene::new(iv("chr1", 30, 40), None)));
    tad.push_enhancer(Arc::new(Enhancer::new(iv("chr1", 50, 60), Some(0.95))));
    tad.finalize(&config);

    assert!(!tad.high_constraint());
    assert!(tad.high_conservation());
    assert_eq!(tad.max_constraint(), Some(0.2));
    assert_eq!(tad.max_conservation(), Some(0.95));
    assert!(tad.has_functional_elements());

    tad.finalize(&config.with_constraint_threshold(0.1));
    assert!(tad.high_constraint());
}

#[test]
fn test_cnv_overlaps_without_tads() {
    let mut cnv = Cnv::new(iv("chr1", 5, 60));
    cnv.calculate_overlap_and_distances(DistanceMetric::Binary);
    assert!(cnv.gene_overlaps().is_empty());
    assert!(cnv.gene_distances().is_empty());
    assert!(cnv.enhancer_distances().is_empty());
    assert_eq!(cnv.get_features(), [false; 4]);
}

#[test]
fn test_cnv_indicators_are_sorted() {
    let mut tad = Tad::new(iv("chr1", 0, 100));
    tad.push_gene(Arc::new(Gene::new(iv("chr1", 10, 20), None)));
    tad.push_gene(Arc::new(Gene::new(iv("chr1", 70, 80), None)));
    tad.push_gene(Arc::new(Gene::new(iv("chr1", 50, 55), None)));
    tad.finalize(&AnnotationConfig::default());

    let mut cnv = Cnv::new(iv("chr1", 5, 60));
    cnv.link_tad(Arc::new(tad));
    cnv.calculate_overlap_and_distances(DistanceMetric::Binary);
    assert_eq!(cnv.gene_overlaps(), &[0, 1, 1]);
    assert_eq!(cnv.gene_distances(), &[0, 1, 1]);
    assert!(!cnv.boundary_spanning());

    cnv.calculate_overlap_and_distances(DistanceMetric::Genomic);
    assert_eq!(cnv.gene_overlaps(), &[0, 1, 1]);
    assert_eq!(cnv.gene_distances(), &[0, 0, 10]);
    assert_eq!(cnv.get_features(), [true, false, false, false]);
}
