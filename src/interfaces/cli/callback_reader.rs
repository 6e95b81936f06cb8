use crate::domain::payment::CallbackParams;
use crate::error::Result;
use std::io::Read;

/// Reads vendor callback parameters from a url-encoded source, such as a
/// captured IPN body piped on stdin.
pub struct CallbackReader<R: Read> {
    source: R,
}

impl<R: Read> CallbackReader<R> {
    pub fn new(source: R) -> Self {
        Self { source }
    }

    /// Consumes the source. Line breaks are treated as separators so a body
    /// saved with one parameter per line reads the same as a query string.
    pub fn params(mut self) -> Result<CallbackParams> {
        let mut raw = String::new();
        self.source.read_to_string(&mut raw)?;
        let query = raw
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect::<Vec<_>>()
            .join("&");
        Ok(CallbackParams::from_query(&query))
    }
}
