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


//! Decoding of uploaded document bodies into text.

use crate::error::{Result, SalaryFilterError};
use encoding_rs::Encoding;
use log::warn;

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Decodes a document body.
///
/// UTF-8 is expected and a leading byte order mark is dropped. Any other
/// encoding is detected with `chardet` and decoded with `encoding_rs`.
pub fn decode_body(bytes: &[u8]) -> Result<String> {
    let bytes = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
    match std::str::from_utf8(bytes) {
        Ok(text) => Ok(text.to_owned()),
        Err(utf8_error) => {
            let (charset, confidence, _) = chardet::detect(bytes);
            let label = chardet::charset2encoding(&charset);
            let encoding = Encoding::for_label(label.as_bytes()).ok_or_else(|| {
                SalaryFilterError::Encoding(format!(
                    "the document is not UTF-8 ({}) and its encoding could not be detected",
                    utf8_error
                ))
            })?;

            let (text, _, had_errors) = encoding.decode(bytes);
            if had_errors {
                return Err(SalaryFilterError::Encoding(format!(
                    "the document is not valid {}",
                    encoding.name()
                )));
            }
            warn!(
                "The document is not UTF-8; decoded as {} (confidence {:.2}).",
                encoding.name(),
                confidence
            );
            Ok(text.into_owned())
        }
    }
}
