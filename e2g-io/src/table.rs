use std::fs::File;
use std::path::Path;

use flate2::write::GzEncoder;
use flate2::Compression;
use std::io::{BufWriter, Write};

use e2g_core::models::PairTable;

pub trait TableWrite {
    ///
    /// Write the table to disk as a tab-delimited file
    ///
    /// # Arguments
    /// - path: the path to the file to dump to
    fn write_tsv<T: AsRef<Path>>(&self, path: T) -> std::io::Result<()>;

    ///
    /// Write the table to disk as a gzip-compressed tab-delimited file
    ///
    /// # Arguments
    /// - path: the path to the file to dump to
    fn write_tsv_gz<T: AsRef<Path>>(&self, path: T) -> std::io::Result<()>;

    /// Dispatch on the output extension: `.gz` paths get compressed output.
    fn write_auto<T: AsRef<Path>>(&self, path: T) -> std::io::Result<()> {
        let path = path.as_ref();
        match path.extension().and_then(|e| e.to_str()) {
            Some("gz") => self.write_tsv_gz(path),
            _ => self.write_tsv(path),
        }
    }
}

impl TableWrite for PairTable {
    fn write_tsv<T: AsRef<Path>>(&self, path: T) -> std::io::Result<()> {
        let path = path.as_ref();

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let mut writer = BufWriter::new(File::create(path)?);

        writeln!(writer, "{}", self.header.join("\t"))?;
        for row in &self.rows {
            writeln!(writer, "{}", row.join("\t"))?;
        }
        writer.flush()?;
        Ok(())
    }

    fn write_tsv_gz<T: AsRef<Path>>(&self, path: T) -> std::io::Result<()> {
        let path = path.as_ref();

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let file = File::create(path)?;
        let mut encoder = GzEncoder::new(BufWriter::new(file), Compression::default());

        writeln!(encoder, "{}", self.header.join("\t"))?;
        for row in &self.rows {
            writeln!(encoder, "{}", row.join("\t"))?;
        }

        encoder.finish()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {

    use super::*;

    use pretty_assertions::assert_eq;
    use rstest::*;
    use std::io::Write as _;

    fn small_table() -> PairTable {
        let mut file = tempfile::Builder::new().suffix(".tsv").tempfile().unwrap();
        writeln!(
            file,
            "ElementChr\tElementStart\tElementEnd\tElementName\tGeneEnsemblID\tGeneSymbol\tGeneTSS"
        )
        .unwrap();
        writeln!(file, "chr1\t100\t300\telem_a\tENSG01\tGENE1\t500").unwrap();
        writeln!(file, "chr2\t10\t20\telem_b\tENSG02\tGENE2\t40").unwrap();
        file.flush().unwrap();
        PairTable::try_from(file.path()).unwrap()
    }

    #[rstest]
    fn test_write_tsv_round_trip() {
        let table = small_table();

        let tempdir = tempfile::tempdir().unwrap();
        let out = tempdir.path().join("out.tsv");
        table.write_tsv(&out).unwrap();

        let reread = PairTable::try_from(out.as_path()).unwrap();
        assert_eq!(reread.header, table.header);
        assert_eq!(reread.rows, table.rows);
    }

    #[rstest]
    fn test_write_tsv_gz_round_trip() {
        let table = small_table();

        let tempdir = tempfile::tempdir().unwrap();
        let out = tempdir.path().join("out.tsv.gz");
        table.write_tsv_gz(&out).unwrap();

        let reread = PairTable::try_from(out.as_path()).unwrap();
        assert_eq!(reread.header, table.header);
        assert_eq!(reread.rows, table.rows);
    }

    #[rstest]
    fn test_write_auto_picks_compression_by_extension() {
        let table = small_table();

        let tempdir = tempfile::tempdir().unwrap();
        let gz_out = tempdir.path().join("out.tsv.gz");
        table.write_auto(&gz_out).unwrap();

        // gzip magic bytes
        let bytes = std::fs::read(&gz_out).unwrap();
        assert_eq!(&bytes[..2], &[0x1f, 0x8b]);

        let plain_out = tempdir.path().join("out.tsv");
        table.write_auto(&plain_out).unwrap();
        let bytes = std::fs::read(&plain_out).unwrap();
        assert!(bytes.starts_with(b"ElementChr"));
    }
}
