use std::{
    fs,
    io::{self, Read},
};

use anyhow::{Context, Result, bail};
use clap::ValueEnum;
use csv::{ReaderBuilder, StringRecord};

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, ValueEnum)]
pub enum Encoding {
    /// BOM first, then a UTF-16LE sniff, else UTF-8
    #[default]
    Auto,
    Utf8,
    Utf16le,
}

const DELIMITER_CANDIDATES: [u8; 4] = [b'\t', b';', b',', b'|'];

/// Reads the whole input: the file at `path`, or stdin when `None`.
pub fn read_input(path: Option<&str>) -> Result<Vec<u8>> {
    match path {
        Some(path) => {
            let path = shellexpand::tilde(path);
            fs::read(&*path)
                .with_context(|| format!("Failed to read input file at path: {}", path))
        }
        None => {
            let mut buffer = Vec::new();
            io::stdin()
                .read_to_end(&mut buffer)
                .context("Failed to read standard input")?;
            Ok(buffer)
        }
    }
}

pub fn decode(bytes: &[u8], encoding: Encoding) -> Result<String> {
    let encoding = match encoding {
        Encoding::Auto => detect_encoding(bytes),
        other => other,
    };

    match encoding {
        Encoding::Utf16le => {
            let body = bytes.strip_prefix(&[0xFF, 0xFE]).unwrap_or(bytes);
            if body.len() % 2 != 0 {
                bail!("UTF-16LE input has an odd number of bytes");
            }
            let units: Vec<u16> = body
                .chunks_exact(2)
                .map(|pair| u16::from_le_bytes([pair[0], pair[1]]))
                .collect();
            String::from_utf16(&units).context("Input is not valid UTF-16LE")
        }
        _ => {
            let body = bytes.strip_prefix(&[0xEF, 0xBB, 0xBF]).unwrap_or(bytes);
            String::from_utf8(body.to_vec()).context("Input is not valid UTF-8")
        }
    }
}

fn detect_encoding(bytes: &[u8]) -> Encoding {
    if bytes.starts_with(&[0xFF, 0xFE]) {
        return Encoding::Utf16le;
    }
    if bytes.starts_with(&[0xEF, 0xBB, 0xBF]) {
        return Encoding::Utf8;
    }
    // ASCII-heavy UTF-16LE text has a NUL in most odd positions.
    let sample = &bytes[..bytes.len().min(512)];
    let odd = sample.len() / 2;
    let nuls = sample.iter().skip(1).step_by(2).filter(|b| **b == 0).count();
    if odd > 0 && sample.len() % 2 == 0 && nuls * 2 > odd {
        Encoding::Utf16le
    } else {
        Encoding::Utf8
    }
}

/// Picks the most frequent candidate delimiter on the header line.
pub fn detect_delimiter(text: &str) -> u8 {
    let header = text.lines().next().unwrap_or("");
    DELIMITER_CANDIDATES
        .iter()
        .copied()
        .map(|candidate| {
            let count = header.bytes().filter(|b| *b == candidate).count();
            (candidate, count)
        })
        .filter(|(_, count)| *count > 0)
        .fold(None, |best: Option<(u8, usize)>, current| match best {
            Some(best) if best.1 >= current.1 => Some(best),
            _ => Some(current),
        })
        .map_or(b',', |(candidate, _)| candidate)
}

/// Splits decoded text into its header and data records. Each record comes
/// with its 1-based data row number; blank rows are dropped.
pub fn read_records(text: &str, delimiter: u8) -> Result<(StringRecord, Vec<(usize, StringRecord)>)> {
    let mut reader = ReaderBuilder::new()
        .delimiter(delimiter)
        .flexible(true)
        .from_reader(text.as_bytes());

    let headers = reader
        .headers()
        .context("Failed to read CSV header")?
        .clone();

    let mut records = Vec::new();
    for (row_idx, record) in reader.records().enumerate() {
        let rec = record
            .with_context(|| format!("Failed to read CSV record at row {}", row_idx + 1))?;
        if rec.iter().all(|field| field.trim().is_empty()) {
            continue;
        }
        records.push((row_idx + 1, rec));
    }

    Ok((headers, records))
}
