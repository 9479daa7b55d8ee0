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


//! Salary cell parsing and rendering.

use crate::configs::FILTER_SALARY_THRESHOLD;

/// The outcome of parsing one salary cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ParsedSalary {
    /// The cell holds a number.
    Value(f64),
    /// The cell is absent or blank. The row is dropped without a warning.
    Missing,
    /// The cell holds text that is not a number after cleanup. The row is
    /// dropped and the caller logs a warning.
    Unparseable,
}

/// Parses a salary cell.
///
/// Leading and trailing whitespace is stripped and every `,` is removed as a
/// thousands separator before conversion.
pub fn parse_salary(raw: Option<&str>) -> ParsedSalary {
    let cleaned = match raw {
        Some(raw) => raw.trim().replace(',', ""),
        None => return ParsedSalary::Missing,
    };
    if cleaned.is_empty() {
        return ParsedSalary::Missing;
    }
    match cleaned.parse::<f64>() {
        Ok(v) => ParsedSalary::Value(v),
        Err(_) => ParsedSalary::Unparseable,
    }
}

/// Whether a salary passes the filter. The comparison is strict.
pub fn exceeds_threshold(salary: f64) -> bool {
    salary > *FILTER_SALARY_THRESHOLD
}

/// Renders a salary in plain decimal notation.
///
/// Whole numbers keep one fractional digit (`2000.0`), other values use the
/// shortest representation that reads back to the same number.
pub fn format_salary(salary: f64) -> String {
    if salary.is_finite() && salary.fract() == 0.0 {
        format!("{:.1}", salary)
    } else {
        salary.to_string()
    }
}
