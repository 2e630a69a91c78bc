macro_rules! define_strings {
    (
        $($name:ident = $value:literal);*$(;)?
    ) => {
        $(
            pub const $name: &str = $value;
        )*
    };
}

pub mod utils {
    define_strings! {
        THREADS =
            "Number of threads to use. Defaults to all available cores.";
        VERBOSE =
            "Increase logging verbosity (-v debug, -vv trace). RUST_LOG \
            overrides this flag.";
        PROGRESS =
            "Display a progress bar.";
    }
}

pub mod annotate {
    define_strings! {
        TADS =
            "Path to the TAD file (BED: chrom, start, end).";
        GENES =
            "Path to the gene file (BED with extra columns named by \
            --gene-columns).";
        ENHANCERS =
            "Path to the enhancer file (BED with extra columns named by \
            --enhancer-columns).";
        GENE_COLUMNS =
            "Names of the extra gene columns, in file order. The constraint \
            score column is selected by the config (default: pLI).";
        ENHANCER_COLUMNS =
            "Names of the extra enhancer columns, in file order. The \
            conservation score column is selected by the config (default: \
            Phastcon).";
        CONFIG =
            "Path to a JSON annotation config. Missing keys take their \
            default values.";
        OUTPUT =
            "Path for the annotated TADs.";
    }
}

pub mod cnv {
    define_strings! {
        TADS =
            "Path to the annotated TAD file created with annotate-tads.";
        CNVS =
            "Path to the CNV file.";
        VCF =
            "Read the CNV file as VCF, with the position in the second \
            column and the end in INFO/END or INFO/SVLEN.";
        NO_PICKLE =
            "Do not save the annotated CNV objects.";
        CSV =
            "Save the feature table as a tab separated file next to the \
            output, in addition to the annotated objects.";
        FEATURES =
            "Feature set of the table: binary, extended or \
            extended_continuous.";
        CNV_COLUMNS =
            "Names of the extra CNV columns, in file order.";
        CONFIG =
            "Path to a JSON annotation config used for the overlap and \
            distance indicators.";
        OUTPUT =
            "Path for the annotated CNVs.";
    }
}

pub mod filter {
    define_strings! {
        TADS =
            "Path to the annotated TAD file.";
        OUTPUT =
            "Directory for the BED files.";
        BED =
            "Write every TAD group as a BED file.";
        LIST =
            "Print the TADs without any gene or enhancer.";
    }
}

pub mod classify {
    define_strings! {
        PATHOGENIC =
            "Path to the annotated pathogenic CNVs.";
        BENIGN =
            "Path to the annotated non-pathogenic CNVs.";
        FEATURES =
            "Feature set used for training and testing.";
        FOLDS =
            "Number of stratified cross-validation folds.";
        TEST_FRACTION =
            "Fraction of every class held out for testing.";
        SEED =
            "Seed for the train/test split and the fold shuffling.";
        CORRELATION =
            "Report features whose correlation with the label exceeds \
            this value.";
        ROC =
            "Write the ROC curve of the test set as a tab separated file.";
    }
}
