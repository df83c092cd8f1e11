use crate::types::Document;
use anyhow::{Context, Result};
use std::io::Write;

/// Writes documents as JSON Lines, one document per line
pub struct DocumentWriter<W: Write> {
    writer: W,
    written: usize,
}

impl<W: Write> DocumentWriter<W> {
    pub fn new(writer: W) -> Self {
        DocumentWriter { writer, written: 0 }
    }

    pub fn write_document(&mut self, document: &Document) -> Result<()> {
        let json = serde_json::to_string(document).context("Failed to serialize document")?;
        writeln!(self.writer, "{}", json).context("Failed to write document")?;
        self.written += 1;
        Ok(())
    }

    /// Drain a document stream into the output, returning how many were written
    pub fn write_documents<I>(&mut self, documents: I) -> Result<usize>
    where
        I: IntoIterator<Item = Document>,
    {
        let before = self.written;
        for document in documents {
            self.write_document(&document)?;
        }
        Ok(self.written - before)
    }

    /// Documents written so far
    pub fn written(&self) -> usize {
        self.written
    }

    pub fn flush(&mut self) -> Result<()> {
        self.writer.flush().context("Failed to flush writer")
    }
}
