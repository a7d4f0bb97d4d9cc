// Copyright 2018-2021, Collabora, Ltd.
// SPDX-License-Identifier: BSL-1.0
// Author: Ryan A. Pavlik <ryan.pavlik@collabora.com>

//! A bounds-checked cursor over a caller-owned byte buffer, used to build and parse
//! fixed-layout network packets.
//!
//! The central type is [`Stream`]: it tracks a position in a borrowed buffer, copies bytes in and
//! out with all-or-nothing bounds checks, and can verify that a packet routine moved exactly the
//! number of bytes it declared (see [`Stream::debug_start`]).

pub mod accounting;
mod buf;
pub mod constants;
pub mod dump;
pub mod error;
pub mod handle;
mod primitives;
pub mod size;
pub mod stream;

#[doc(inline)]
pub use crate::{
    accounting::SizeAccounting,
    dump::HexDump,
    error::{EmptyResult, StreamError, StreamResult},
    handle::StreamHandle,
    size::{ConstantStreamSize, StreamValue},
    stream::Stream,
};
