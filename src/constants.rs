// Copyright 2021, Collabora, Ltd.
// SPDX-License-Identifier: BSL-1.0
// Author: Ryan A. Pavlik <ryan.pavlik@collabora.com>

//! Constants shared by the stream and its diagnostics.

/// Number of bytes rendered on each line of a hex dump.
pub const DUMP_BYTES_PER_LINE: usize = 16;

/// Context label reported in diagnostics when no accounting window has named the operation.
pub const UNLABELED_CONTEXT: &str = "<unlabeled>";
