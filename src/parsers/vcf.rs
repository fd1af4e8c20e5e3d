// ==============================================================================
// parsers/vcf.rs - Tandem-Repeat VCF Reader
// ==============================================================================
// Description: Streams allele-length annotations from TRGT-style VCF files
// Author: Matt Barham
// Created: 2025-11-03
// Modified: 2026-10-18
// Version: 2.0.0
// ==============================================================================
// References:
// - VCF 4.2 Spec: https://samtools.github.io/hts-specs/VCFv4.2.pdf
// - noodles-vcf: https://docs.rs/noodles-vcf/0.81.0/noodles_vcf/
// ==============================================================================

use noodles_vcf as vcf;
use noodles_vcf::variant::record::samples::series::value::Array;
use noodles_vcf::variant::record::samples::series::Value;
use noodles_vcf::variant::record::samples::Sample as _;
use std::io::{self, BufRead};
use std::path::Path;
use thiserror::Error;

use crate::models::VariantRecord;

/// FORMAT key holding per-allele lengths in TRGT output
pub const DEFAULT_ALLELE_FIELD: &str = "AL";

/// VCF parsing errors
#[derive(Error, Debug)]
pub enum VCFParseError {
    #[error("Failed to open VCF file: {0}")]
    FileOpenError(String),

    #[error("Failed to read VCF header: {0}")]
    HeaderError(String),

    #[error("Failed to parse VCF record {record}: {details}")]
    RecordError { record: usize, details: String },

    #[error("Missing required field: {0}")]
    MissingField(String),

    #[error("Unexpected value type for FORMAT/{0} (expected Integer)")]
    InvalidFieldType(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Streaming VCF reader yielding one `VariantRecord` per data line
///
/// Records are read one at a time; the file is never buffered in full.
pub struct VariantReader<R> {
    reader: vcf::io::Reader<R>,
    header: vcf::Header,
    record: vcf::Record,
    allele_field: String,
    record_count: usize,
}

impl VariantReader<Box<dyn BufRead>> {
    /// Open a VCF file (`.vcf` or BGZF-compressed `.vcf.gz`)
    ///
    /// # Example
    /// ```no_run
    /// use genetics_plots::parsers::VariantReader;
    ///
    /// let reader = VariantReader::open("calls.vcf.gz", "AL")?;
    /// for record in reader {
    ///     let record = record?;
    ///     println!("{}:{}", record.chrom, record.position);
    /// }
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn open(path: impl AsRef<Path>, allele_field: &str) -> Result<Self, VCFParseError> {
        let path = path.as_ref();

        let reader = vcf::io::reader::Builder::default()
            .build_from_path(path)
            .map_err(|e| VCFParseError::FileOpenError(format!("{}: {}", path.display(), e)))?;

        Self::with_reader(reader, allele_field)
    }
}

impl<R: BufRead> VariantReader<R> {
    /// Wrap an already decompressed VCF stream
    pub fn new(inner: R, allele_field: &str) -> Result<Self, VCFParseError> {
        Self::with_reader(vcf::io::Reader::new(inner), allele_field)
    }

    fn with_reader(mut reader: vcf::io::Reader<R>, allele_field: &str) -> Result<Self, VCFParseError> {
        let header = reader
            .read_header()
            .map_err(|e| VCFParseError::HeaderError(e.to_string()))?;

        Ok(Self {
            reader,
            header,
            record: vcf::Record::default(),
            allele_field: allele_field.to_string(),
            record_count: 0,
        })
    }

    pub fn header(&self) -> &vcf::Header {
        &self.header
    }

    /// Number of data records read so far
    pub fn record_count(&self) -> usize {
        self.record_count
    }

    fn convert_record(&self) -> Result<VariantRecord, VCFParseError> {
        let chrom = self.record.reference_sequence_name().to_string();

        let position = match self.record.variant_start() {
            Some(Ok(pos)) => usize::from(pos) as u64,
            Some(Err(e)) => return Err(self.record_error(format!("Failed to get position: {}", e))),
            None => return Err(VCFParseError::MissingField("Position".to_string())),
        };

        let allele_lengths = self
            .allele_lengths()
            .map_err(|e| self.record_error(format!("{}:{}: {}", chrom, position, e)))?;

        Ok(VariantRecord {
            chrom,
            position,
            allele_lengths,
        })
    }

    /// Extract the allele-length list of every sample
    ///
    /// A sample without the field (or with a missing value) yields an empty
    /// list; missing entries inside a list are kept as `None`.
    fn allele_lengths(&self) -> Result<Vec<Vec<Option<i32>>>, VCFParseError> {
        let samples = self.record.samples();
        let mut per_sample = Vec::new();

        for sample in samples.iter() {
            let lengths = match sample.get(&self.header, &self.allele_field) {
                None | Some(Ok(None)) => Vec::new(),
                Some(Ok(Some(Value::Integer(n)))) => vec![Some(n)],
                Some(Ok(Some(Value::Array(Array::Integer(values))))) => {
                    values.iter().collect::<io::Result<Vec<_>>>()?
                }
                Some(Ok(Some(_))) => {
                    return Err(VCFParseError::InvalidFieldType(self.allele_field.clone()))
                }
                Some(Err(e)) => return Err(VCFParseError::IoError(e)),
            };
            per_sample.push(lengths);
        }

        Ok(per_sample)
    }

    fn record_error(&self, details: String) -> VCFParseError {
        VCFParseError::RecordError {
            record: self.record_count,
            details,
        }
    }
}

impl<R: BufRead> Iterator for VariantReader<R> {
    type Item = Result<VariantRecord, VCFParseError>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.reader.read_record(&mut self.record) {
            Ok(0) => None,
            Ok(_) => {
                self.record_count += 1;
                Some(self.convert_record())
            }
            Err(e) => {
                self.record_count += 1;
                Some(Err(self.record_error(format!("Failed to read record: {}", e))))
            }
        }
    }
}
