// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 Tobias Sarnowski

//! In-memory flattened device tree builder.
//!
//! Produces version 17 blobs with an empty memory reservation map. Nodes are
//! opened and closed explicitly; [`DtbBuilder::finish`] closes whatever is
//! still open, including the root.

const FDT_MAGIC: u32 = 0xd00d_feed;
const FDT_BEGIN_NODE: u32 = 0x1;
const FDT_END_NODE: u32 = 0x2;
const FDT_PROP: u32 = 0x3;
const FDT_END: u32 = 0x9;

const HEADER_SIZE: usize = 40;
const RESERVE_MAP_SIZE: usize = 16;

/// Builds a flattened device tree blob.
#[derive(Debug)]
pub struct DtbBuilder {
    structs: Vec<u8>,
    strings: Vec<u8>,
    names: Vec<(String, u32)>,
    depth: usize,
}

impl Default for DtbBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl DtbBuilder {
    /// Starts a tree with the root node open.
    #[must_use]
    pub fn new() -> Self {
        let builder = Self {
            structs: Vec::new(),
            strings: Vec::new(),
            names: Vec::new(),
            depth: 0,
        };
        builder.begin_node("")
    }

    /// Opens a child of the current node.
    #[must_use]
    pub fn begin_node(mut self, name: &str) -> Self {
        self.token(FDT_BEGIN_NODE);
        self.structs.extend_from_slice(name.as_bytes());
        self.structs.push(0);
        self.pad();
        self.depth += 1;
        self
    }

    /// Closes the current node.
    #[must_use]
    pub fn end_node(mut self) -> Self {
        if self.depth > 0 {
            self.token(FDT_END_NODE);
            self.depth -= 1;
        }
        self
    }

    /// Adds a raw property to the current node.
    #[must_use]
    pub fn prop(mut self, name: &str, value: &[u8]) -> Self {
        let name_offset = self.string_offset(name);
        let len = u32::try_from(value.len()).unwrap_or(u32::MAX);
        self.token(FDT_PROP);
        self.structs.extend_from_slice(&len.to_be_bytes());
        self.structs.extend_from_slice(&name_offset.to_be_bytes());
        self.structs.extend_from_slice(value);
        self.pad();
        self
    }

    /// Adds a property of 32-bit cells.
    #[must_use]
    pub fn prop_cells(self, name: &str, cells: &[u32]) -> Self {
        let value: Vec<u8> = cells.iter().flat_map(|c| c.to_be_bytes()).collect();
        self.prop(name, &value)
    }

    /// Adds a string-list property.
    #[must_use]
    pub fn prop_strings(self, name: &str, strings: &[&str]) -> Self {
        let mut value = Vec::new();
        for s in strings {
            value.extend_from_slice(s.as_bytes());
            value.push(0);
        }
        self.prop(name, &value)
    }

    /// Sets `#address-cells` and `#size-cells` of the current node.
    #[must_use]
    pub fn cell_sizes(self, address_cells: u32, size_cells: u32) -> Self {
        self.prop_cells("#address-cells", &[address_cells])
            .prop_cells("#size-cells", &[size_cells])
    }

    /// Adds a closed child node with `compatible` and a two-cell `reg`.
    ///
    /// The current node must declare `#address-cells = <2>` and
    /// `#size-cells = <2>`.
    #[must_use]
    pub fn device(self, name: &str, compatible: &[&str], base: u64, len: u64) -> Self {
        self.begin_node(name)
            .prop_strings("compatible", compatible)
            .prop_cells("reg", &split(&[base, len]))
            .end_node()
    }

    /// Closes all open nodes and serializes the blob.
    #[must_use]
    pub fn finish(mut self) -> Vec<u8> {
        while self.depth > 0 {
            self = self.end_node();
        }
        self.token(FDT_END);

        let off_mem_rsvmap = HEADER_SIZE;
        let off_dt_struct = off_mem_rsvmap + RESERVE_MAP_SIZE;
        let off_dt_strings = off_dt_struct + self.structs.len();
        let total_size = off_dt_strings + self.strings.len();

        let header = [
            FDT_MAGIC,
            be_len(total_size),
            be_len(off_dt_struct),
            be_len(off_dt_strings),
            be_len(off_mem_rsvmap),
            17,
            16,
            0,
            be_len(self.strings.len()),
            be_len(self.structs.len()),
        ];

        let mut blob = Vec::with_capacity(total_size);
        for word in header {
            blob.extend_from_slice(&word.to_be_bytes());
        }
        blob.extend_from_slice(&[0u8; RESERVE_MAP_SIZE]);
        blob.extend_from_slice(&self.structs);
        blob.extend_from_slice(&self.strings);
        blob
    }

    fn token(&mut self, token: u32) {
        self.structs.extend_from_slice(&token.to_be_bytes());
    }

    fn pad(&mut self) {
        while self.structs.len() % 4 != 0 {
            self.structs.push(0);
        }
    }

    fn string_offset(&mut self, name: &str) -> u32 {
        if let Some((_, offset)) = self.names.iter().find(|(n, _)| n == name) {
            return *offset;
        }
        let offset = be_len(self.strings.len());
        self.strings.extend_from_slice(name.as_bytes());
        self.strings.push(0);
        self.names.push((name.to_owned(), offset));
        offset
    }
}

/// Splits 64-bit values into big-endian cell pairs.
#[must_use]
pub fn split(values: &[u64]) -> Vec<u32> {
    values
        .iter()
        .flat_map(|v| {
            let high = u32::try_from(v >> 32).unwrap_or(u32::MAX);
            let low = u32::try_from(v & 0xFFFF_FFFF).unwrap_or(u32::MAX);
            [high, low]
        })
        .collect()
}

fn be_len(len: usize) -> u32 {
    u32::try_from(len).unwrap_or(u32::MAX)
}
