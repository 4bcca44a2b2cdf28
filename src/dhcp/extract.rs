use std::str::FromStr;

use thiserror::Error;

use super::lease::{Lease, LeaseTable, FIELDS_PER_RECORD};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ExtractError {
    /// The page doesn't contain `table = new Array(...)`, which usually means
    /// the wrong page (or a login page) was returned.
    #[error("lease table not found in the DHCP client page")]
    NotFound,
}

/// Marks the start of the lease array in the page's script.
const ARRAY_START: &str = "table = new Array(";

/// Everything between the first `table = new Array(` and the first `)` outside
/// of a quoted literal. A malformed first array is not skipped over.
fn find_array(html: &str) -> Option<&str> {
    let start = html.find(ARRAY_START)?;
    let rest = &html[start..];
    lazy_regex::regex_captures!(r#"^table = new Array\(((?:'[^']*'|[^')])*)\)"#, rest)
        .map(|(_, inner)| inner)
}

/// Single-quoted literals in order of appearance, without the quotes.
fn literals(array: &str) -> Vec<String> {
    lazy_regex::regex!(r#"'([^']*)'"#)
        .captures_iter(array)
        .map(|caps| caps[1].to_string())
        .collect()
}

impl LeaseTable {
    /// Parse the leases out of the router's `DHCPTable.asp` page.
    ///
    /// Leftover literals that don't make up a whole client are dropped.
    pub fn from_html(html: &str) -> Result<LeaseTable, ExtractError> {
        let array = find_array(html).ok_or(ExtractError::NotFound)?;
        let tokens = literals(array);

        let dropped = tokens.len() % FIELDS_PER_RECORD;
        if dropped != 0 {
            log::debug!("dropping {} trailing lease table fields", dropped);
        }

        Ok(tokens
            .chunks_exact(FIELDS_PER_RECORD)
            .map(|chunk| {
                let fields: [String; FIELDS_PER_RECORD] =
                    std::array::from_fn(|i| chunk[i].clone());
                Lease::from(fields)
            })
            .collect())
    }

    /// Same as [`LeaseTable::from_html`], invalid utf-8 is replaced.
    pub fn from_html_bytes(html: &[u8]) -> Result<LeaseTable, ExtractError> {
        Self::from_html(&String::from_utf8_lossy(html))
    }
}

impl FromStr for LeaseTable {
    type Err = ExtractError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_html(s)
    }
}
