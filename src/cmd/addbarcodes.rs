use anyhow::Result;

use clap::Args;
use log::warn;
use std::{fs::File, path::PathBuf};

pub const DEFAULT_CB_BASES: usize = 12;

use crate::command::addbarcodes::AddBarcodes;
use crate::command::addbarcodes::AddBarcodesParams;
use crate::runtime::Error;

#[derive(Args)]
pub struct AddBarcodesCMD {
    // FASTQ containing the cell barcode sequences
    #[arg(long = "fq1", value_parser)]
    pub path_barcode_read: PathBuf,

    // FASTQ to add cell barcodes to
    #[arg(long = "fq2", value_parser)]
    pub path_read2: PathBuf,

    // Optional: second FASTQ to add cell barcodes to
    #[arg(long = "fq3", value_parser)]
    pub path_read3: Option<PathBuf>,

    // Number of bases containing cell barcode information
    #[arg(short = 'b', long = "bases", value_parser, default_value_t = DEFAULT_CB_BASES)]
    pub bases: usize,

    // Optional: prefix to prepend to each cell barcode
    #[arg(long = "prefix", value_parser, default_value = "")]
    pub prefix: String,

    // Optional: suffix to append to each cell barcode
    #[arg(long = "suffix", value_parser, default_value = "")]
    pub suffix: String,

    // Optional: whitelist with one valid barcode per line
    #[arg(long = "whitelist", value_parser)]
    pub path_whitelist: Option<PathBuf>,
}

impl AddBarcodesCMD {
    pub fn try_execute(&mut self) -> Result<()> {
        verify_input_fq_file(&self.path_barcode_read)?;
        verify_input_fq_file(&self.path_read2)?;
        if let Some(path_read3) = &self.path_read3 {
            verify_input_fq_file(path_read3)?;
        }

        let mut path_targets = vec![self.path_read2.clone()];
        if let Some(path_read3) = &self.path_read3 {
            path_targets.push(path_read3.clone());
        }

        let params = AddBarcodesParams {
            bases: self.bases,
            path_barcode_read: self.path_barcode_read.clone(),
            path_targets,
            prefix: self.prefix.clone(),
            suffix: self.suffix.clone(),
            path_whitelist: self.path_whitelist.clone(),
        };

        AddBarcodes::addbarcodes(&params)
    }
}

/////// Check that the specified file is a fastq file
fn verify_input_fq_file(path_in: &PathBuf) -> anyhow::Result<()> {
    if !path_in.is_file() {
        return Err(Error::file_not_found(path_in).into());
    }
    if File::open(path_in)?.metadata()?.len() == 0 {
        warn!("Input file {} is empty", path_in.display());
    }

    let filename = path_in.file_name().unwrap().to_str().unwrap();

    if filename.ends_with("fq")
        | filename.ends_with("fq.gz")
        | filename.ends_with("fastq")
        | filename.ends_with("fastq.gz")
    {
        //ok
    } else {
        anyhow::bail!("Input file must be a fastq file")
    }

    Ok(())
}
