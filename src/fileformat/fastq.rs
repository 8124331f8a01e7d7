use flate2::write::GzEncoder;
use flate2::Compression;
use log::debug;
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::runtime::Error;

use seq_io::fastq::Reader as FastqReader;

///////////////////////////////
/// Open a FASTQ file for record-wise reading, decompressing
/// transparently if needed
pub fn open_fastq(path: &PathBuf) -> Result<FastqReader<Box<dyn std::io::Read>>, Error> {
    if !path.is_file() {
        return Err(Error::file_not_found(path));
    }
    let opened_handle = File::open(path)?;

    let (reader, compression) = niffler::get_reader(Box::new(opened_handle))?;
    debug!(
        "Opened file {} with compression {:?}",
        &path.display(),
        &compression
    );
    Ok(FastqReader::new(reader))
}

///////////////////////////////
/// One FASTQ record as its four raw lines, line endings included.
/// Everything except the identifier line is passed through untouched
#[derive(Debug)]
pub struct FastqRawRecord {
    pub head: Vec<u8>,
    pub seq: Vec<u8>,
    pub sep: Vec<u8>,
    pub qual: Vec<u8>,
}

impl FastqRawRecord {
    ///////////////////////////////
    /// Write the record with the barcode spliced into the identifier
    /// line, directly after its leading marker symbol
    pub fn write_tagged<W: Write>(&self, writer: &mut W, barcode: &str) -> std::io::Result<()> {
        writer.write_all(&self.head[..1])?;
        writer.write_all(barcode.as_bytes())?;
        writer.write_all(b":")?;
        writer.write_all(&self.head[1..])?;
        writer.write_all(&self.seq)?;
        writer.write_all(&self.sep)?;
        writer.write_all(&self.qual)?;
        Ok(())
    }
}

///////////////////////////////
/// Reads FASTQ records as groups of four raw lines, without
/// interpreting them. The cycle position decides which line is which;
/// hitting end of file mid-record is an error rather than a silent
/// misalignment
pub struct FastqRawReader<R: BufRead> {
    reader: R,
    path: PathBuf,
    n_records: usize,
}

impl FastqRawReader<BufReader<Box<dyn std::io::Read>>> {
    pub fn from_path(path: &PathBuf) -> Result<Self, Error> {
        if !path.is_file() {
            return Err(Error::file_not_found(path));
        }
        let opened_handle = File::open(path)?;
        let (reader, compression) = niffler::get_reader(Box::new(opened_handle))?;
        debug!(
            "Opened file {} with compression {:?}",
            &path.display(),
            &compression
        );
        Ok(FastqRawReader {
            reader: BufReader::new(reader),
            path: path.clone(),
            n_records: 0,
        })
    }
}

impl<R: BufRead> FastqRawReader<R> {
    pub fn new(reader: R, path: &Path) -> FastqRawReader<R> {
        FastqRawReader {
            reader,
            path: path.to_path_buf(),
            n_records: 0,
        }
    }

    ///////////////////////////////
    /// Next 4-line record, or None at a clean end of file
    pub fn next_record(&mut self) -> Result<Option<FastqRawRecord>, Error> {
        let mut head = Vec::new();
        if self.reader.read_until(b'\n', &mut head)? == 0 {
            return Ok(None);
        }

        let mut seq = Vec::new();
        let mut sep = Vec::new();
        let mut qual = Vec::new();
        for line in [&mut seq, &mut sep, &mut qual] {
            if self.reader.read_until(b'\n', line)? == 0 {
                return Err(Error::truncated_record(&self.path, self.n_records));
            }
        }

        self.n_records += 1;
        Ok(Some(FastqRawRecord {
            head,
            seq,
            sep,
            qual,
        }))
    }

    pub fn n_records(&self) -> usize {
        self.n_records
    }
}

///////////////////////////////
/// Output sink for tagged records. Whether the stream is gzipped is
/// decided by the file name, mirroring the input convention
pub enum FastqWriter {
    Plain(BufWriter<File>),
    Gzip(GzEncoder<BufWriter<File>>),
}

impl FastqWriter {
    pub fn create(path: &PathBuf) -> std::io::Result<FastqWriter> {
        let file = File::create(path)?;
        if path.extension().is_some_and(|ext| ext == "gz") {
            Ok(FastqWriter::Gzip(GzEncoder::new(
                BufWriter::new(file),
                Compression::default(),
            )))
        } else {
            Ok(FastqWriter::Plain(BufWriter::new(file)))
        }
    }

    ///////////////////////////////
    /// Flush buffered output and, for gzip, write the stream trailer
    pub fn finish(self) -> std::io::Result<()> {
        match self {
            FastqWriter::Plain(mut writer) => writer.flush(),
            FastqWriter::Gzip(writer) => writer.finish()?.flush(),
        }
    }
}

impl Write for FastqWriter {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        match self {
            FastqWriter::Plain(writer) => writer.write(buf),
            FastqWriter::Gzip(writer) => writer.write(buf),
        }
    }

    fn flush(&mut self) -> std::io::Result<()> {
        match self {
            FastqWriter::Plain(writer) => writer.flush(),
            FastqWriter::Gzip(writer) => writer.flush(),
        }
    }
}

///////////////////////////////
/// Derive the output name for a tagged copy of `path`:
/// x.fastq[.gz] / x.fq[.gz] -> x.barcoded.fastq[.gz]
pub fn barcoded_output_path(path: &Path) -> PathBuf {
    let name = path.file_name().unwrap_or_default().to_string_lossy();
    for (suffix, replacement) in [
        (".fastq.gz", ".barcoded.fastq.gz"),
        (".fq.gz", ".barcoded.fastq.gz"),
        (".fastq", ".barcoded.fastq"),
        (".fq", ".barcoded.fastq"),
    ] {
        if let Some(stem) = name.strip_suffix(suffix) {
            return path.with_file_name(format!("{}{}", stem, replacement));
        }
    }
    path.with_file_name(format!("{}.barcoded.fastq", name))
}
