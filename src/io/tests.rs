use std::fs;
use std::io::Write;
use std::path::{
    Path,
    PathBuf,
};
use std::sync::Arc;

use rstest::rstest;
use tempfile::TempDir;

use super::bed::*;
use super::store::*;
use crate::config::AnnotationConfig;
use crate::data_structs::{
    Cnv,
    Entity,
    EntityKind,
    EntityRegistry,
    Gene,
    GenomicInterval,
    GenomicRegion,
    IntervalCollection,
    Span,
    Tad,
};
use crate::error::AnnotError;
use crate::tools::tad_annot::find_tad;
use crate::tools::{
    annotate_cnvs,
    TadAnnotator,
};

fn write_file(
    dir: &Path,
    name: &str,
    content: &str,
) -> PathBuf {
    let path = dir.join(name);
    let mut file = fs::File::create(&path).unwrap();
    file.write_all(content.as_bytes()).unwrap();
    path
}

#[rstest]
#[case::bed("regions.bed", InputFormat::Bed, true)]
#[case::txt("regions.TXT", InputFormat::Bed, true)]
#[case::vcf_in_bed_mode("regions.vcf", InputFormat::Bed, false)]
#[case::vcf("regions.vcf", InputFormat::Vcf, true)]
#[case::csv("regions.csv", InputFormat::Bed, false)]
#[case::no_extension("regions", InputFormat::Vcf, false)]
fn test_validate_extension(
    #[case] name: &str,
    #[case] format: InputFormat,
    #[case] valid: bool,
) {
    let dir = TempDir::new().unwrap();
    let path = write_file(dir.path(), name, "chr1\t0\t10\n");
    let res = validate_file(&path, format);
    assert_eq!(res.is_ok(), valid);
    if !valid {
        assert!(matches!(res, Err(AnnotError::InvalidPath { .. })));
    }
}

#[test]
fn test_validate_missing_file() {
    let res = validate_file("/definitely/not/here.bed", InputFormat::Bed);
    assert!(matches!(res, Err(AnnotError::InvalidPath { .. })));
}

#[test]
fn test_read_skips_comments_and_reports_lines() {
    let content = "# header\ntrack name=x\n\nchr1\t0\t10\tG1\t0.5\nchr1\t20\tbad\n";
    let res = read_intervals(
        content.as_bytes(),
        &["name", "pLI"],
        InputFormat::Bed,
        Path::new("genes.bed"),
    );
    match res {
        Err(AnnotError::MalformedRecord { path, line, .. }) => {
            assert_eq!(path, PathBuf::from("genes.bed"));
            assert_eq!(line, 5);
        },
        other => panic!("expected malformed record, got {:?}", other),
    }

    let ok = read_intervals(
        "# header\nchr1\t0\t10\tG1\t0.5\n".as_bytes(),
        &["name", "pLI"],
        InputFormat::Bed,
        Path::new("genes.bed"),
    )
    .unwrap();
    assert_eq!(ok.len(), 1);
    assert_eq!(ok[0].field("name"), Some("G1"));
}

#[test]
fn test_load_collection_genes() {
    let dir = TempDir::new().unwrap();
    let path = write_file(
        dir.path(),
        "genes.bed",
        "chr2\t5\t9\tB\tNA\nchr1\t30\t40\tA\t0.99\nchr1\t10\t20\tC\t0.1\n",
    );
    let genes: IntervalCollection<Gene> = load_collection(
        &path,
        &["name", "pLI"],
        InputFormat::Bed,
        &AnnotationConfig::default(),
    )
    .unwrap();

    assert_eq!(genes.chromosomes().collect::<Vec<_>>(), vec!["chr2", "chr1"]);
    let chr1 = genes.get("chr1").unwrap();
    assert_eq!(chr1[0].name(), Some("C"));
    assert_eq!(chr1[1].constraint(), Some(0.99));
    assert_eq!(genes.get("chr2").unwrap()[0].constraint(), None);
}

#[test]
fn test_bad_score_reports_file_and_line() {
    let dir = TempDir::new().unwrap();
    let path = write_file(dir.path(), "genes.bed", "chr1\t10\t20\tG1\t0.5\nchr1\t30\t40\tG2\tabc\n");
    let config = AnnotationConfig::default();

    let res = load_collection::<Gene, _, _>(&path, &["name", "pLI"], InputFormat::Bed, &config);
    match res {
        Err(err @ AnnotError::MalformedRecord { .. }) => {
            let message = err.to_string();
            assert!(message.contains(&path.display().to_string()), "{}", message);
            assert!(message.contains(":2:"), "{}", message);
            assert!(message.contains("pLI"), "{}", message);
        },
        other => panic!("expected malformed record, got {:?}", other),
    }

    let registry = EntityRegistry::default();
    let res = objects_from_file(&path, "gene", &registry, &["name", "pLI"], InputFormat::Bed, &config);
    match res {
        Err(AnnotError::MalformedRecord { path: source, line, .. }) => {
            assert_eq!(source, path);
            assert_eq!(line, 2);
        },
        other => panic!("expected malformed record, got {:?}", other),
    }
}

#[test]
fn test_objects_from_file_dispatches_by_name() {
    let dir = TempDir::new().unwrap();
    let path = write_file(dir.path(), "cnvs.vcf", "chr1\t11\tcnv1\tN\t<DEL>\t.\tPASS\tEND=50\n");
    let registry = EntityRegistry::default();
    let config = AnnotationConfig::default();

    let entities =
        objects_from_file(&path, "CNV", &registry, &["ID"], InputFormat::Vcf, &config).unwrap();
    assert_eq!(entities.len(), 1);
    assert_eq!(entities[0].kind(), EntityKind::Cnv);
    assert_eq!(entities[0].span(), (10, 50));
    assert!(matches!(&entities[0], Entity::Cnv(_)));

    let res = objects_from_file(&path, "exon", &registry, &["ID"], InputFormat::Vcf, &config);
    assert!(matches!(res, Err(AnnotError::UnknownEntityType(_))));
}

#[test]
fn test_write_bed_labels() {
    let tads = vec![
        Tad::new(GenomicInterval::new("chr1", 0, 100)),
        Tad::new(GenomicInterval::new("chr2", 5, 50)),
    ];
    let mut buffer = Vec::new();
    write_bed(&mut buffer, tads.iter(), "label").unwrap();
    let text = String::from_utf8(buffer).unwrap();
    assert_eq!(text, "chr1\t0\t100\tlabel\nchr2\t5\t50\tlabel\n");
}

#[test]
fn test_store_round_trip() {
    let tads = IntervalCollection::from_intervals(vec![
        Tad::new(GenomicInterval::new("chr1", 0, 100)),
        Tad::new(GenomicInterval::new("chr1", 100, 200)),
        Tad::new(GenomicInterval::new("chr3", 0, 50)),
    ]);
    let genes = IntervalCollection::from_intervals(vec![
        Gene::new(GenomicInterval::new("chr1", 50, 150).with_field("name", "G"), Some(0.9)),
        Gene::new(GenomicInterval::new("chr3", 10, 20), None),
    ]);
    let (annotated, _) =
        TadAnnotator::default().annotate(tads, genes, IntervalCollection::new());

    let dir = TempDir::new().unwrap();
    let path = dir.path().join("tads.bin");
    save_to_path(&annotated, &path).unwrap();
    let restored: IntervalCollection<Tad> = load_from_path(&path).unwrap();

    assert_eq!(restored, annotated);
    assert_eq!(restored.chromosomes().collect::<Vec<_>>(), vec!["chr1", "chr3"]);
    let chr1 = restored.get("chr1").unwrap();
    assert_eq!(chr1[1].genes()[0].chrom(), "chr1");
    assert!(chr1[0].high_constraint());
}

#[test]
fn test_cnv_store_keeps_tad_contents_per_cnv() {
    let config = AnnotationConfig::default();
    let tads = IntervalCollection::from_intervals(vec![Tad::new(GenomicInterval::new("chr1", 0, 100))]);
    let genes = IntervalCollection::from_intervals(vec![Gene::new(
        GenomicInterval::new("chr1", 10, 20).with_field("name", "G"),
        Some(0.95),
    )]);
    let (tads, _) = TadAnnotator::new(config.clone()).annotate(tads, genes, IntervalCollection::new());
    let cnvs = IntervalCollection::from_intervals(vec![
        Cnv::new(GenomicInterval::new("chr1", 5, 15)),
        Cnv::new(GenomicInterval::new("chr1", 50, 60)),
    ]);
    let cnvs = annotate_cnvs(tads.clone().into_shared(), cnvs, &config);
    assert!(Arc::ptr_eq(&cnvs.get("chr1").unwrap()[0].tads()[0], &cnvs.get("chr1").unwrap()[1].tads()[0]));

    let mut buffer = Vec::new();
    save(&cnvs, &mut buffer).unwrap();
    let restored: IntervalCollection<Cnv> = load(buffer.as_slice()).unwrap();
    assert_eq!(restored, cnvs);

    let chr1 = restored.get("chr1").unwrap();
    assert!(!Arc::ptr_eq(&chr1[0].tads()[0], &chr1[1].tads()[0]));
    for cnv in chr1 {
        assert_eq!(cnv.tads()[0].genes()[0].name(), Some("G"));
        let tad = find_tad(&tads, cnv.tads()[0].as_ref()).unwrap();
        assert_eq!(tad, cnv.tads()[0].as_ref());
    }
}

#[test]
fn test_load_garbage_is_persist_error() {
    let res: Result<IntervalCollection<Tad>, _> = load(&[1u8, 2, 3][..]);
    assert!(matches!(res, Err(AnnotError::Persist(_))));
}
