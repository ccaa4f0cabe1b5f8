//! Copiers move a file's bytes between its stored form and the form a user
//! edits.
//!
//! `copy_in` reads the stored form and writes the editable form; `copy_out`
//! goes the other way. Every copier consumes its source. `copy_out` also
//! consumes and closes its destination, while `copy_in` leaves the
//! destination open for the caller.

use std::io::{self, Cursor, Read, Write};

use flate2::Compression;
use flate2::read::MultiGzDecoder;
use flate2::write::GzEncoder;

use tabedit_result::Result;

use crate::codec::{CodecOptions, ParquetCodec};
use crate::names::FileKind;

pub trait Copier {
    fn copy_in(&mut self, dst: &mut dyn Write, src: Box<dyn Read>) -> Result<()>;
    fn copy_out(&mut self, dst: Box<dyn Write>, src: Box<dyn Read>) -> Result<()>;
}

/// Byte-for-byte copy in both directions.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainCopier;

impl Copier for PlainCopier {
    fn copy_in(&mut self, dst: &mut dyn Write, mut src: Box<dyn Read>) -> Result<()> {
        io::copy(&mut src, dst)?;
        Ok(())
    }

    fn copy_out(&mut self, mut dst: Box<dyn Write>, mut src: Box<dyn Read>) -> Result<()> {
        io::copy(&mut src, &mut dst)?;
        dst.flush()?;
        Ok(())
    }
}

/// Gunzips on the way in, gzips on the way out.
#[derive(Debug, Clone, Copy, Default)]
pub struct GzipCopier;

impl Copier for GzipCopier {
    fn copy_in(&mut self, dst: &mut dyn Write, src: Box<dyn Read>) -> Result<()> {
        let mut decoder = MultiGzDecoder::new(src);
        io::copy(&mut decoder, dst)?;
        Ok(())
    }

    fn copy_out(&mut self, dst: Box<dyn Write>, mut src: Box<dyn Read>) -> Result<()> {
        let mut encoder = GzEncoder::new(dst, Compression::default());
        io::copy(&mut src, &mut encoder)?;
        let mut dst = encoder.finish()?;
        dst.flush()?;
        Ok(())
    }
}

/// Picks plain, gzip and Parquet handling per side from the file kinds.
///
/// A Parquet source keeps its codec session between `copy_in` and
/// `copy_out`, so writing back to a Parquet destination reuses the captured
/// schema and footer metadata.
#[derive(Debug, Clone)]
pub struct MultiCopier {
    source: FileKind,
    destination: FileKind,
    options: CodecOptions,
    codec: Option<ParquetCodec>,
}

impl MultiCopier {
    pub fn new(source: FileKind, destination: FileKind) -> Self {
        Self::with_options(source, destination, CodecOptions::default())
    }

    pub fn with_options(source: FileKind, destination: FileKind, options: CodecOptions) -> Self {
        Self {
            source,
            destination,
            options,
            codec: None,
        }
    }

    pub fn source(&self) -> FileKind {
        self.source
    }

    pub fn destination(&self) -> FileKind {
        self.destination
    }

    /// The Parquet session, once one has been started.
    pub fn codec(&self) -> Option<&ParquetCodec> {
        self.codec.as_ref()
    }

    fn session(&mut self) -> &mut ParquetCodec {
        let options = &self.options;
        self.codec
            .get_or_insert_with(|| ParquetCodec::new(options.clone()))
    }
}

impl Copier for MultiCopier {
    fn copy_in(&mut self, dst: &mut dyn Write, src: Box<dyn Read>) -> Result<()> {
        let src: Box<dyn Read> = if self.source.compressed {
            Box::new(MultiGzDecoder::new(src))
        } else {
            src
        };

        if self.source.parquet {
            self.session().copy_in(dst, src)
        } else {
            PlainCopier.copy_in(dst, src)
        }
    }

    fn copy_out(&mut self, dst: Box<dyn Write>, src: Box<dyn Read>) -> Result<()> {
        let src: Box<dyn Read> = if self.destination.parquet {
            let bytes = self.session().encode(src)?;
            Box::new(Cursor::new(bytes))
        } else {
            src
        };

        if self.destination.compressed {
            GzipCopier.copy_out(dst, src)
        } else {
            PlainCopier.copy_out(dst, src)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_copies_bytes() {
        let mut out = Vec::new();
        PlainCopier
            .copy_in(&mut out, Box::new(Cursor::new(b"a,b\n".to_vec())))
            .unwrap();
        assert_eq!(out, b"a,b\n");
    }

    #[test]
    fn gzip_round_trips() {
        let mut compressed = GzEncoder::new(Vec::new(), Compression::default());
        compressed.write_all(b"hello\n").unwrap();
        let compressed = compressed.finish().unwrap();

        let mut out = Vec::new();
        GzipCopier
            .copy_in(&mut out, Box::new(Cursor::new(compressed)))
            .unwrap();
        assert_eq!(out, b"hello\n");
    }

    #[test]
    fn gzip_rejects_plain_input() {
        let mut out = Vec::new();
        let result = GzipCopier.copy_in(&mut out, Box::new(Cursor::new(b"not gzip".to_vec())));
        assert!(result.is_err());
    }

    #[test]
    fn plain_kinds_never_start_a_session() {
        let kind = FileKind::from_name("notes.txt");
        let mut copier = MultiCopier::new(kind, kind);
        let mut out = Vec::new();
        copier
            .copy_in(&mut out, Box::new(Cursor::new(b"x".to_vec())))
            .unwrap();
        assert!(copier.codec().is_none());
    }
}
