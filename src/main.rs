// Copyright 2025 the Glyphforge Authors
// SPDX-License-Identifier: Apache-2.0

//! Glyphforge: compile and import glyph maps from the command line

fn main() -> anyhow::Result<()> {
    glyphforge::run()
}
