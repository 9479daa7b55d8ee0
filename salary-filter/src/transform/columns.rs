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


//! Column detection by header name.
//!
//! A document carries a salary-role column and, optionally, a name-role
//! column. Both are found by comparing each trimmed, lower-cased header to a
//! fixed list of synonyms. There is no fuzzy or partial matching.

use crate::error::{Result, SalaryFilterError};
use log::{debug, warn};

/// Header labels recognized as the salary-role column.
pub const SALARY_SYNONYMS: &[&str] = &["salary", "salario", "income", "sueldos", "wage"];

/// Header labels recognized as the name-role column.
pub const NAME_SYNONYMS: &[&str] = &["name", "nombre", "employee", "persona"];

/// Returns the position of the first header whose normalized form is one of
/// `synonyms`.
///
/// When that exact header appears more than once, the position of its last
/// occurrence is returned: rows are read as a mapping from header name to
/// cell, so a repeated name holds the value of its rightmost column.
pub fn detect_column_index<S: AsRef<str>>(headers: &[S], synonyms: &[&str]) -> Option<usize> {
    let first = headers.iter().position(|header| {
        let label = header.as_ref().trim().to_lowercase();
        !label.is_empty() && synonyms.contains(&label.as_str())
    })?;
    let name = headers[first].as_ref();
    headers.iter().rposition(|header| header.as_ref() == name)
}

/// Returns the first header, in its original casing, whose trimmed,
/// lower-cased form equals one of `synonyms`.
pub fn detect_column<'a, S: AsRef<str>>(headers: &'a [S], synonyms: &[&str]) -> Option<&'a str> {
    detect_column_index(headers, synonyms).map(|i| headers[i].as_ref())
}

/// The header positions of the salary and name roles in one document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnRoles {
    /// Position of the salary-role column.
    pub salary: usize,
    /// Position of the name-role column, if the document has one.
    pub name:   Option<usize>,
}

impl ColumnRoles {
    /// Resolves both roles against the header row.
    ///
    /// A missing salary column is fatal; a missing name column only drops the
    /// `name` field from the output.
    pub fn detect<S: AsRef<str>>(headers: &[S]) -> Result<Self> {
        let salary = detect_column_index(headers, SALARY_SYNONYMS).ok_or_else(|| {
            let observed = headers
                .iter()
                .map(|h| format!("{:?}", h.as_ref()))
                .collect::<Vec<_>>()
                .join(", ");
            SalaryFilterError::Schema(format!(
                "The uploaded CSV does not contain a salary column (headers: [{}]).",
                observed
            ))
        })?;
        debug!("Salary column: {:?}", headers[salary].as_ref());

        let name = detect_column_index(headers, NAME_SYNONYMS);
        match name {
            Some(i) => debug!("Name column: {:?}", headers[i].as_ref()),
            None => warn!("No name column detected; the output only contains salaries."),
        }

        Ok(Self { salary, name })
    }

    /// The header row of the output document.
    pub fn output_headers(&self) -> &'static [&'static str] {
        if self.name.is_some() {
            &["name", "salary"]
        } else {
            &["salary"]
        }
    }
}
