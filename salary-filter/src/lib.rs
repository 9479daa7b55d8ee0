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


#![warn(missing_docs, clippy::needless_borrow)]
// Clippy lints, some should be disabled incrementally
#![allow(clippy::float_cmp, clippy::upper_case_acronyms)]

//! `salary-filter` turns an uploaded CSV document into a reduced document that
//! only holds the rows whose salary is above a fixed threshold. It is driven by
//! S3 object-creation notifications on AWS Lambda.

pub mod aws;
pub mod configs;
pub mod error;
pub mod event;
pub mod prelude;
pub mod storage;
pub mod test_util;
pub mod transform;

#[cfg(test)]
mod tests;
