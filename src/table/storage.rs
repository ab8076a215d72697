//! Binary persistence for feedback tables
//!
//! Layout (big-endian header):
//! - magic `b"WFBT"`
//! - `u16` format version
//! - `u32` guess count, `u32` answer count
//! - `u64` fingerprint of the word lists
//! - one byte per cell, row-major

use super::{FeedbackTable, TableError};
use byteorder::{BE, ReadBytesExt, WriteBytesExt};
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

const MAGIC: &[u8; 4] = b"WFBT";
const VERSION: u16 = 2;

impl FeedbackTable {
    /// Write the table to `path`
    ///
    /// # Errors
    /// Returns `TableError::Io` if the file cannot be written.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), TableError> {
        let path = path.as_ref();
        log::info!("{:<32}{}", "saving feedback table", path.display());
        let mut writer = BufWriter::new(File::create(path)?);
        self.write_to(&mut writer)?;
        writer.flush()?;
        Ok(())
    }

    /// Read a table previously written with [`FeedbackTable::save`]
    ///
    /// # Errors
    /// Returns `TableError` on I/O failure or a malformed file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, TableError> {
        let path = path.as_ref();
        log::info!("{:<32}{}", "loading feedback table", path.display());
        let mut reader = BufReader::new(File::open(path)?);
        Self::read_from(&mut reader)
    }

    /// Serialize into any writer
    ///
    /// # Errors
    /// Returns `TableError::Io` if writing fails.
    pub fn write_to<W: Write>(&self, writer: &mut W) -> Result<(), TableError> {
        writer.write_all(MAGIC)?;
        writer.write_u16::<BE>(VERSION)?;
        writer.write_u32::<BE>(self.num_guesses as u32)?;
        writer.write_u32::<BE>(self.num_answers as u32)?;
        writer.write_u64::<BE>(self.vocabulary)?;
        let raw: Vec<u8> = self.codes.iter().map(|code| code.value()).collect();
        writer.write_all(&raw)?;
        Ok(())
    }

    /// Deserialize from any reader
    ///
    /// # Errors
    /// Returns `TableError` on I/O failure or a malformed stream.
    pub fn read_from<R: Read>(reader: &mut R) -> Result<Self, TableError> {
        let mut magic = [0u8; 4];
        reader.read_exact(&mut magic)?;
        if &magic != MAGIC {
            return Err(TableError::BadMagic);
        }
        let version = reader.read_u16::<BE>()?;
        if version != VERSION {
            return Err(TableError::UnsupportedVersion(version));
        }
        let num_guesses = reader.read_u32::<BE>()? as usize;
        let num_answers = reader.read_u32::<BE>()? as usize;
        let vocabulary = reader.read_u64::<BE>()?;

        // header counts are unchecked until from_raw
        let mut raw = Vec::new();
        reader.read_to_end(&mut raw)?;
        Ok(Self::from_raw(num_guesses, num_answers, &raw)?.with_vocabulary(vocabulary))
    }
}
