use anyhow::Context;
use log::info;
use std::path::PathBuf;

use seq_io::fastq::Record as FastqRecord;

use crate::barcode::correct_barcodes;
use crate::barcode::Whitelist;
use crate::fileformat::{barcoded_output_path, open_fastq, FastqRawReader, FastqWriter};
use crate::runtime::Error;

pub struct AddBarcodesParams {
    // Number of bases at the start of each barcode read holding the cell barcode
    pub bases: usize,

    // FASTQ with the cell barcode sequences
    pub path_barcode_read: PathBuf,

    // FASTQ files to tag with the extracted barcodes
    pub path_targets: Vec<PathBuf>,

    // Wrapped around each extracted barcode
    pub prefix: String,
    pub suffix: String,

    // Optional whitelist of valid barcodes to correct against
    pub path_whitelist: Option<PathBuf>,
}

pub struct AddBarcodes {}

impl AddBarcodes {
    ///////////////////////////////
    /// Extract barcodes from the barcode read, correct them against the
    /// whitelist if one is given, then tag every target file
    pub fn addbarcodes(params: &AddBarcodesParams) -> anyhow::Result<()> {
        info!("Running command: addbarcodes");

        let mut barcodes = extract_barcodes(
            &params.path_barcode_read,
            params.bases,
            &params.prefix,
            &params.suffix,
        )?;

        if let Some(path_whitelist) = &params.path_whitelist {
            let whitelist = Whitelist::from_path(path_whitelist)?;
            if whitelist.is_empty() {
                info!(
                    "Whitelist {} is empty, keeping barcodes as observed",
                    path_whitelist.display()
                );
            } else {
                barcodes = correct_barcodes(&barcodes, &whitelist);
            }
        }

        for path_target in &params.path_targets {
            let path_out = tag_reads(path_target, &barcodes)?;
            info!(
                "Tagged {} -> {}",
                path_target.display(),
                path_out.display()
            );
        }

        Ok(())
    }
}

///////////////////////////////
/// Stream the barcode read and take the first `bases` symbols of every
/// sequence line, in record order. Reads shorter than `bases` contribute
/// what they have
pub fn extract_barcodes(
    path: &PathBuf,
    bases: usize,
    prefix: &str,
    suffix: &str,
) -> anyhow::Result<Vec<String>> {
    let mut reader = open_fastq(path)?;

    let mut barcodes: Vec<String> = Vec::new();
    while let Some(record) = reader.next() {
        let record = record
            .with_context(|| format!("Failed reading barcode record from {}", path.display()))?;
        let seq = record.seq();
        let bc = &seq[..bases.min(seq.len())];
        barcodes.push(format!(
            "{}{}{}",
            prefix,
            String::from_utf8_lossy(bc),
            suffix
        ));
    }

    info!(
        "Extracted {} barcodes from {}",
        barcodes.len(),
        path.display()
    );
    Ok(barcodes)
}

///////////////////////////////
/// Stream one target file and prepend the positionally matching barcode
/// to each identifier line. The barcode list and the file must agree on
/// the record count
pub fn tag_reads(path_target: &PathBuf, barcodes: &[String]) -> Result<PathBuf, Error> {
    let mut reader = FastqRawReader::from_path(path_target)?;
    let path_out = barcoded_output_path(path_target);
    let mut writer = FastqWriter::create(&path_out)?;

    let mut k = 0;
    while let Some(record) = reader.next_record()? {
        let Some(barcode) = barcodes.get(k) else {
            return Err(Error::barcode_count_mismatch(
                path_target,
                k + 1,
                barcodes.len(),
            ));
        };
        record.write_tagged(&mut writer, barcode)?;
        k += 1;
    }
    if k != barcodes.len() {
        return Err(Error::barcode_count_mismatch(path_target, k, barcodes.len()));
    }

    writer.finish()?;
    Ok(path_out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_fastq(path: &PathBuf, records: &[(&str, &str)]) {
        let mut file = std::fs::File::create(path).unwrap();
        for (id, seq) in records {
            write!(file, "@{}\n{}\n+\n{}\n", id, seq, "I".repeat(seq.len())).unwrap();
        }
    }

    #[test]
    fn test_extract_barcodes_slices_and_wraps() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cb.fastq");
        write_fastq(&path, &[("r1", "ACGTAAAA"), ("r2", "TTTTCCCC")]);

        let barcodes = extract_barcodes(&path, 4, "P-", "-S").unwrap();
        assert_eq!(barcodes, vec!["P-ACGT-S", "P-TTTT-S"]);
    }

    #[test]
    fn test_extract_barcodes_short_read() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cb.fastq");
        write_fastq(&path, &[("r1", "ACG")]);

        let barcodes = extract_barcodes(&path, 12, "", "").unwrap();
        assert_eq!(barcodes, vec!["ACG"]);
    }

    #[test]
    fn test_tag_reads_prepends_barcodes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("reads.fastq");
        write_fastq(&path, &[("read1", "ACGT"), ("read2", "TTTT")]);

        let barcodes = vec!["AAAA".to_string(), "CCCC".to_string()];
        let path_out = tag_reads(&path, &barcodes).unwrap();
        assert_eq!(path_out, dir.path().join("reads.barcoded.fastq"));

        let content = std::fs::read_to_string(&path_out).unwrap();
        assert_eq!(
            content,
            "@AAAA:read1\nACGT\n+\nIIII\n@CCCC:read2\nTTTT\n+\nIIII\n"
        );
    }

    #[test]
    fn test_tag_reads_too_few_barcodes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("reads.fastq");
        write_fastq(&path, &[("read1", "ACGT"), ("read2", "TTTT")]);

        let barcodes = vec!["AAAA".to_string()];
        let result = tag_reads(&path, &barcodes);
        assert!(matches!(
            result,
            Err(Error::BarcodeCountMismatch { barcodes: 1, .. })
        ));
    }

    #[test]
    fn test_tag_reads_too_many_barcodes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("reads.fastq");
        write_fastq(&path, &[("read1", "ACGT")]);

        let barcodes = vec!["AAAA".to_string(), "CCCC".to_string()];
        let result = tag_reads(&path, &barcodes);
        assert!(matches!(
            result,
            Err(Error::BarcodeCountMismatch {
                records: 1,
                barcodes: 2,
                ..
            })
        ));
    }
}
