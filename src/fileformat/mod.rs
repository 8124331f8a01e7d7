pub mod fastq;

pub use fastq::barcoded_output_path;
pub use fastq::open_fastq;
pub use fastq::FastqRawReader;
pub use fastq::FastqRawRecord;
pub use fastq::FastqWriter;
