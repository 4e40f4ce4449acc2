//! JSON-lines input traces.
//!
//! One [`PanelInput`] per line. Blank lines and lines starting with `#` are
//! skipped so traces can carry comments.

use std::io::BufRead;

use panelctl_core::PanelInput;

use crate::error::{ReplayError, Result};

pub fn parse_trace(reader: impl BufRead) -> Result<Vec<PanelInput>> {
    let mut inputs = Vec::new();
    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        let input = serde_json::from_str(trimmed).map_err(|source| ReplayError::TraceLine {
            line: index + 1,
            source,
        })?;
        inputs.push(input);
    }
    tracing::debug!(inputs = inputs.len(), "trace parsed");
    Ok(inputs)
}
