mod annotate;
mod classify;
mod cnv;
mod filter;
mod strings;
mod utils;

use annotate::AnnotateTadsArgs;
use clap::{
    Parser,
    Subcommand,
};
use classify::ClassifyArgs;
use cnv::AnnotateCnvsArgs;
use filter::FilterTadsArgs;
use utils::UtilsArgs;
use wild::ArgsOs;

#[derive(Parser, Debug)]
#[command(
    author = env!("CARGO_PKG_AUTHORS"),
    version = env!("CARGO_PKG_VERSION"),
    about = env!("CARGO_PKG_DESCRIPTION"),
    long_about = None,)]
struct Cli {
    #[command(subcommand)]
    command: MainMenu,
}

#[derive(Subcommand, Debug)]
enum MainMenu {
    #[command(name = "annotate-tads")]
    AnnotateTads {
        #[clap(flatten)]
        utils: UtilsArgs,
        #[clap(flatten)]
        args:  AnnotateTadsArgs,
    },

    #[command(name = "annotate-cnvs")]
    AnnotateCnvs {
        #[clap(flatten)]
        utils: UtilsArgs,
        #[clap(flatten)]
        args:  AnnotateCnvsArgs,
    },

    #[command(name = "filter-tads")]
    FilterTads {
        #[clap(flatten)]
        utils: UtilsArgs,
        #[clap(flatten)]
        args:  FilterTadsArgs,
    },

    Classify {
        #[clap(flatten)]
        utils: UtilsArgs,
        #[clap(flatten)]
        args:  ClassifyArgs,
    },
}

fn main() -> anyhow::Result<()> {
    let args: ArgsOs = wild::args_os();
    let cli = Cli::parse_from(args);

    match cli.command {
        MainMenu::AnnotateTads { utils, args } => {
            utils.setup()?;
            args.run(&utils)?;
        },
        MainMenu::AnnotateCnvs { utils, args } => {
            utils.setup()?;
            args.run(&utils)?;
        },
        MainMenu::FilterTads { utils, args } => {
            utils.setup()?;
            args.run(&utils)?;
        },
        MainMenu::Classify { utils, args } => {
            utils.setup()?;
            args.run(&utils)?;
        },
    }
    Ok(())
}
