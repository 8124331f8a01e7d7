use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("File at {:?} not found.", path)]
    FileNotFound { path: std::path::PathBuf },

    #[error(
        "Truncated record in {:?}: end of file inside record {} (records are 4 lines).",
        path,
        record
    )]
    TruncatedRecord {
        path: std::path::PathBuf,
        record: usize,
    },

    #[error(
        "Barcode count mismatch for {:?}: {} records vs {} barcodes.",
        path,
        records,
        barcodes
    )]
    BarcodeCountMismatch {
        path: std::path::PathBuf,
        records: usize,
        barcodes: usize,
    },

    #[error(
        "Whitelist barcodes must all share one length: expected {}, but {:?} has length {}.",
        expected,
        barcode,
        found
    )]
    WhitelistNotUniform {
        expected: usize,
        found: usize,
        barcode: String,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Failed to detect input compression: {0}")]
    Compression(#[from] niffler::Error),
}

impl Error {
    #[cold]
    pub fn file_not_found<P: AsRef<std::path::Path>>(path: P) -> Self {
        Error::FileNotFound {
            path: path.as_ref().to_path_buf(),
        }
    }

    #[cold]
    pub fn truncated_record<P: AsRef<std::path::Path>>(path: P, record: usize) -> Self {
        Error::TruncatedRecord {
            path: path.as_ref().to_path_buf(),
            record,
        }
    }

    #[cold]
    pub fn barcode_count_mismatch<P: AsRef<std::path::Path>>(
        path: P,
        records: usize,
        barcodes: usize,
    ) -> Self {
        Error::BarcodeCountMismatch {
            path: path.as_ref().to_path_buf(),
            records,
            barcodes,
        }
    }
}
