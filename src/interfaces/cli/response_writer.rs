use crate::domain::operation::GatewayResponse;
use crate::error::Result;
use std::io::Write;

/// Writes gateway responses as pretty-printed JSON documents, one per call.
pub struct ResponseWriter<W: Write> {
    writer: W,
}

impl<W: Write> ResponseWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn write_response(&mut self, response: &GatewayResponse) -> Result<()> {
        serde_json::to_writer_pretty(&mut self.writer, response)?;
        writeln!(self.writer)?;
        self.writer.flush()?;
        Ok(())
    }

    pub fn write_gateway_ids(&mut self, ids: &[&str]) -> Result<()> {
        for id in ids {
            writeln!(self.writer, "{id}")?;
        }
        self.writer.flush()?;
        Ok(())
    }
}
