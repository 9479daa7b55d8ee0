// Copyright (c) 2020-present, UMD Database Group.
//
// This program is free software: you can use, redistribute, and/or modify
// it under the terms of the GNU Affero General Public License, version 3
// or later ("AGPL"), as published by the Free Software Foundation.
//
// This program is distributed in the hope that it will be useful, but WITHOUT
// ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or
// FITNESS FOR A PARTICULAR PURPOSE.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program. If not, see <http://www.gnu.org/licenses/>.


//! Destination key derivation.

use crate::configs::FILTER_OUTPUT_SEGMENT;

/// Builds the destination key of a source object by inserting the output
/// segment immediately above the file name.
///
/// | source key       | output key                |
/// |------------------|---------------------------|
/// | `data/input.csv` | `data/filtered/input.csv` |
/// | `input.csv`      | `filtered/input.csv`      |
///
/// Trailing slashes on the source key are ignored. The rest of the parent path
/// is kept as written: an empty parent (`/input.csv`) yields
/// `filtered/input.csv`, while `data//input.csv` and `./input.csv` keep their
/// doubled slash and `.` segment (`data//filtered/input.csv`,
/// `./filtered/input.csv`).
pub fn build_output_key(source_key: &str) -> String {
    let source_key = source_key.trim_end_matches('/');
    match source_key.rsplit_once('/') {
        Some((parent, filename)) if !parent.is_empty() => {
            format!("{}/{}/{}", parent, *FILTER_OUTPUT_SEGMENT, filename)
        }
        Some((_, filename)) => format!("{}/{}", *FILTER_OUTPUT_SEGMENT, filename),
        None => format!("{}/{}", *FILTER_OUTPUT_SEGMENT, source_key),
    }
}
