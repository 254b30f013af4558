// Copyright 2026 the Svgtext Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

mod context;
pub(crate) mod layout;
pub(crate) mod outline;

pub use context::Context;
