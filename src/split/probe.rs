// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! MCAP header probe.
//!
//! Recovers the profile string declared in a log's header record so split
//! outputs can be opened with the same profile. Only the leading magic and
//! the header record (opcode 0x01) are parsed; everything else is left to
//! the `mcap` crate.
//!
//! Record layout per the [MCAP specification](https://mcap.dev/spec):
//! opcode (1 byte), record length (u64 LE), then for the header record two
//! length-prefixed strings: profile, library.

use std::io::{Cursor, Read};
use std::path::Path;

use byteorder::{LittleEndian, ReadBytesExt};

use crate::core::{Result, SplitError};

/// MCAP file magic bytes (at start and end of file).
pub const MCAP_MAGIC: [u8; 8] = [0x89, 0x4D, 0x43, 0x41, 0x50, 0x30, 0x0D, 0x0A];

/// Header record - must be first record after magic.
const OP_HEADER: u8 = 0x01;

/// Read the profile string from a log's header record.
pub fn read_profile(path: &Path, data: &[u8]) -> Result<String> {
    let display = path.display().to_string();

    if data.len() < MCAP_MAGIC.len() || data[..MCAP_MAGIC.len()] != MCAP_MAGIC {
        return Err(SplitError::invalid_log(display, "missing MCAP magic"));
    }

    let mut cursor = Cursor::new(&data[MCAP_MAGIC.len()..]);

    let opcode = cursor
        .read_u8()
        .map_err(|e| SplitError::invalid_log(display.clone(), format!("truncated record: {e}")))?;
    if opcode != OP_HEADER {
        return Err(SplitError::invalid_log(
            display,
            format!("first record has opcode 0x{opcode:02x}, expected header"),
        ));
    }

    let record_len = cursor
        .read_u64::<LittleEndian>()
        .map_err(|e| SplitError::invalid_log(display.clone(), format!("truncated record: {e}")))?;
    let profile_len = cursor
        .read_u32::<LittleEndian>()
        .map_err(|e| SplitError::invalid_log(display.clone(), format!("truncated record: {e}")))?;

    if u64::from(profile_len) + 4 > record_len {
        return Err(SplitError::invalid_log(
            display,
            "header record shorter than its profile string",
        ));
    }

    let mut profile = vec![0u8; profile_len as usize];
    cursor
        .read_exact(&mut profile)
        .map_err(|e| SplitError::invalid_log(display, format!("truncated header record: {e}")))?;

    Ok(String::from_utf8_lossy(&profile).into_owned())
}
