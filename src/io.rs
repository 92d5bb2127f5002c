use std::fs::File;
use std::io::{BufRead, BufReader, Lines};
use std::path::Path;

use crate::error::{Result, VmError};
use crate::translation::LogicalAddress;

/// Yields one logical address per non-blank line of a text source.
///
/// Lines are trimmed before parsing. A line that is not a non-negative
/// decimal integer fitting in `u32` is `InvalidInput`; a value that parses
/// but lies outside the 16-bit address space is `InvalidAddress`.
pub struct AddressReader<R> {
    lines: Lines<R>,
    line_no: usize,
}

impl AddressReader<BufReader<File>> {
    /// Open an address list file
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| VmError::OpenAddressList {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::new(BufReader::new(file)))
    }
}

impl<R: BufRead> AddressReader<R> {
    pub fn new(reader: R) -> Self {
        AddressReader {
            lines: reader.lines(),
            line_no: 0,
        }
    }

    /// 1-based number of the last line read
    pub fn line_number(&self) -> usize {
        self.line_no
    }
}

impl<R: BufRead> Iterator for AddressReader<R> {
    type Item = Result<LogicalAddress>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let line = match self.lines.next()? {
                Ok(line) => line,
                Err(e) => return Some(Err(e.into())),
            };
            self.line_no += 1;

            let token = line.trim();
            if token.is_empty() {
                continue;
            }
            return Some(parse_address(token, self.line_no));
        }
    }
}

fn parse_address(token: &str, line: usize) -> Result<LogicalAddress> {
    let raw: u32 = token.parse().map_err(|_| VmError::InvalidInput {
        line,
        content: token.to_string(),
    })?;
    LogicalAddress::new(raw)
}

/// Read every logical address of a file
pub fn read_logical_addresses<P: AsRef<Path>>(path: P) -> Result<Vec<LogicalAddress>> {
    AddressReader::open(path)?.collect()
}
