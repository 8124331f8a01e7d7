use log::info;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::PathBuf;

use crate::runtime::Error;

///////////////////////////////
/// The set of valid barcodes. Entries are deduplicated, entries with an
/// ambiguity base are discarded, and the survivors are kept sorted so
/// that "first match at the minimum distance" means the same thing on
/// every run
#[derive(Clone, Debug)]
pub struct Whitelist {
    entries: Vec<String>,
    barcode_len: usize,
}

impl Whitelist {
    ///////////////////////////////
    /// Read a whitelist, one barcode per line. Only the first
    /// whitespace-delimited field of each line is used; blank lines are
    /// skipped
    pub fn from_reader(src: impl BufRead) -> Result<Whitelist, Error> {
        let mut entries: Vec<String> = Vec::new();
        for line in src.lines() {
            let line = line?;
            let Some(token) = line.split_whitespace().next() else {
                continue;
            };
            if token.contains('N') {
                // barcodes with undetermined bases cannot be corrected against
                continue;
            }
            entries.push(token.to_string());
        }

        entries.sort();
        entries.dedup();

        // All entries must share one length, or distance comparison is meaningless
        let barcode_len = entries.first().map_or(0, |bc| bc.len());
        for bc in &entries {
            if bc.len() != barcode_len {
                return Err(Error::WhitelistNotUniform {
                    expected: barcode_len,
                    found: bc.len(),
                    barcode: bc.clone(),
                });
            }
        }

        Ok(Whitelist {
            entries,
            barcode_len,
        })
    }

    pub fn from_path(path: &PathBuf) -> Result<Whitelist, Error> {
        if !path.is_file() {
            return Err(Error::file_not_found(path));
        }
        let file = File::open(path)?;
        let whitelist = Whitelist::from_reader(BufReader::new(file))?;
        info!(
            "Read {} whitelist barcodes from {}",
            whitelist.len(),
            path.display()
        );
        Ok(whitelist)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, String> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn barcode_len(&self) -> usize {
        self.barcode_len
    }
}
