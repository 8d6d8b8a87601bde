extern crate env_logger;
#[macro_use]
extern crate log;

use anyhow::Result;
use clap::Parser;

mod barcode;
mod cli;
mod io;
mod options_xml;
mod reader;

use barcode::{add_barcode, Prefix};
use cli::{Cli, Commands};

fn try_main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_target(false)
        .init();

    let cli = Cli::parse();

    info!("freqseq v{}", cli::VERSION);

    match &cli.command {
        Commands::AddBarcode {
            input,
            output,
            barcode,
            adapter,
            quality_char,
            strict,
        } => {
            let prefix = Prefix::new(barcode, adapter, *quality_char);
            info!("Prepending {} ({} bases) to each read", prefix.seq, prefix.len());
            debug!("Quality prefix: {}", prefix.qual);

            let reader = io::get_reader(input)?;
            let mut writer = io::get_writer(Some(output.as_str()))?;

            let summary = add_barcode(reader, &mut writer, &prefix, *strict)?;

            if summary.mismatched > 0 {
                warn!(
                    "{} reads had differing sequence and quality lengths",
                    summary.mismatched
                );
            }
            info!(
                "Wrote {} reads ({} bases added) to {}",
                summary.records,
                summary.bases_added,
                io::output_name(output)
            );
        }
        Commands::OptionsXml {
            input,
            output,
            wrap,
        } => {
            let mut writer = io::get_writer(output.as_deref())?;

            let n = options_xml::emit(input.as_deref(), &mut writer, *wrap)?;
            info!("Wrote {n} option elements");
        }
    };
    Ok(())
}

fn main() {
    if let Err(err) = try_main() {
        error!("{}", err);

        // report any errors that are produced
        err.chain()
            .skip(1)
            .for_each(|cause| error!("  because: {}", cause));

        std::process::exit(1);
    }
}
