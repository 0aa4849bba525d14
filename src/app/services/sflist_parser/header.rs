//! Column header detection for report blocks
//!
//! Finds the `STN ... TIME ... TMP` header line and decides whether the block
//! carries a wind gust column. The resulting layout is fixed for the block.

use crate::app::models::ColumnLayout;
use crate::constants::{GUST_MARKER, HEADER_MARKERS};
use tracing::debug;

/// Header information for one report block
#[derive(Debug, Clone, PartialEq)]
pub struct HeaderInfo {
    /// Whether the header announces a gust column
    pub has_gust: bool,

    /// Index of the header line within the block, if one was found
    pub header_line: Option<usize>,

    /// Layout applied to every data line of the block
    pub layout: ColumnLayout,
}

impl HeaderInfo {
    /// Scan block lines for the column header
    ///
    /// Blocks without a recognisable header fall back to the layout without
    /// a gust column.
    pub fn detect<S: AsRef<str>>(lines: &[S]) -> Self {
        let header = lines
            .iter()
            .enumerate()
            .map(|(index, line)| (index, line.as_ref().to_uppercase()))
            .find(|(_, upper)| is_header_line(upper));

        match header {
            Some((index, upper)) => {
                let has_gust = upper.contains(GUST_MARKER);
                debug!("Header found at line {}: has_gust={}", index, has_gust);
                Self {
                    has_gust,
                    header_line: Some(index),
                    layout: ColumnLayout::for_gust(has_gust),
                }
            }
            None => Self::default(),
        }
    }

    /// Whether a header line was present
    pub fn header_found(&self) -> bool {
        self.header_line.is_some()
    }
}

impl Default for HeaderInfo {
    fn default() -> Self {
        Self {
            has_gust: false,
            header_line: None,
            layout: ColumnLayout::without_gust(),
        }
    }
}

/// Check an uppercased line for all header markers
fn is_header_line(upper: &str) -> bool {
    HEADER_MARKERS.iter().all(|marker| upper.contains(marker))
}
