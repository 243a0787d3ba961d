// lzw.rs
//
// Copyright (c) 2020-2023  Douglas Lau
//
//! Lempel-Ziv-Welch compression for GIF
use std::cmp::Ordering;
use std::ops::AddAssign;

/// Code Bits
#[derive(Clone, Copy, Debug, PartialEq)]
struct Bits(u8);

impl From<u8> for Bits {
    fn from(bits: u8) -> Self {
        Bits(bits.min(Self::MAX.0))
    }
}

impl From<Bits> for u8 {
    fn from(bits: Bits) -> Self {
        bits.0
    }
}

impl AddAssign<u8> for Bits {
    fn add_assign(&mut self, rhs: u8) {
        self.0 = (self.0 + rhs).min(Self::MAX.0)
    }
}

impl Bits {
    /// Maximum code bits allowed for GIF
    const MAX: Self = Bits(12);

    /// Get the number of entries
    fn entries(self) -> u16 {
        1 << (self.0 as u16)
    }
}

/// Code type
pub type Code = u16;

/// Node for code dictionary
#[derive(Clone, Copy, Debug)]
struct Node {
    /// Next node code
    next: Option<Code>,
    /// Left node code
    left: Option<Code>,
    /// Right node code
    right: Option<Code>,
    /// Index value
    index: u8,
}

impl Node {
    /// Create a new node
    fn new(index: u8) -> Self {
        Node {
            next: None,
            left: None,
            right: None,
            index,
        }
    }

    /// Get a link code
    fn link(&self, ordering: Ordering) -> Option<Code> {
        match ordering {
            Ordering::Less => self.left,
            Ordering::Equal => self.next,
            Ordering::Greater => self.right,
        }
    }

    /// Set a link code
    fn set_link(&mut self, ordering: Ordering, code: Code) {
        match ordering {
            Ordering::Less => self.left = Some(code),
            Ordering::Equal => self.next = Some(code),
            Ordering::Greater => self.right = Some(code),
        }
    }
}

/// Code table, stored as a trie.
///
/// Each node is one index sequence; `next` points to the first extension
/// of the sequence, and `left` / `right` link extensions sharing a prefix
/// into a binary search tree ordered by their last index.
#[derive(Debug)]
struct Trie {
    /// Table of codes
    table: Vec<Node>,
    /// Minimum code bits
    min_code_bits: u8,
}

impl Trie {
    /// Create a new code table
    fn new(min_code_bits: u8) -> Self {
        let mut trie = Trie {
            table: Vec::with_capacity(Bits::MAX.entries().into()),
            min_code_bits,
        };
        trie.reset();
        trie
    }

    /// Get the clear code
    fn clear_code(&self) -> Code {
        1 << self.min_code_bits
    }

    /// Get the end code
    fn end_code(&self) -> Code {
        self.clear_code() + 1
    }

    /// Get the next available code (table size)
    fn next_code(&self) -> Code {
        self.table.len() as Code
    }

    /// Reset to singleton entries plus clear and end codes
    fn reset(&mut self) {
        self.table.clear();
        for index in 0..self.clear_code() {
            self.table.push(Node::new(index as u8));
        }
        self.table.push(Node::new(0)); // clear code
        self.table.push(Node::new(0)); // end code
    }

    /// Get a mutable node
    fn node_mut(&mut self, code: Code) -> &mut Node {
        debug_assert!(code < self.next_code());
        &mut self.table[code as usize]
    }

    /// Find the code for a sequence extended by one index.
    ///
    /// If the extended sequence is not in the table, it is inserted and
    /// `None` is returned.
    fn search_insert(&mut self, code: Code, index: u8) -> Option<Code> {
        let next_code = self.next_code();
        let mut node = self.node_mut(code);
        let mut ordering = Ordering::Equal;
        while let Some(code) = node.link(ordering) {
            node = self.node_mut(code);
            ordering = index.cmp(&node.index);
            if ordering == Ordering::Equal {
                return Some(code);
            }
        }
        node.set_link(ordering, next_code);
        self.table.push(Node::new(index));
        None
    }
}

/// LZW index stream compressor.
///
/// Produces `(code, bits)` pairs, where `bits` is the code width in effect
/// when the code was emitted.
pub struct Compressor {
    /// Code dictionary
    trie: Trie,
    /// Minimum code bits
    min_code_bits: u8,
    /// Current code bits
    code_bits: Bits,
    /// Emitted codes
    codes: Vec<(Code, u8)>,
}

impl Compressor {
    /// Create a new compressor
    pub fn new(min_code_bits: u8) -> Self {
        let min_code_bits = min_code_bits.max(2).min(Bits::MAX.0 - 1);
        Compressor {
            trie: Trie::new(min_code_bits),
            min_code_bits,
            code_bits: Bits::from(min_code_bits + 1),
            codes: vec![],
        }
    }

    /// Get the clear code
    pub fn clear_code(&self) -> Code {
        self.trie.clear_code()
    }

    /// Get the end code
    pub fn end_code(&self) -> Code {
        self.trie.end_code()
    }

    /// Emit one code at the current width
    fn emit(&mut self, code: Code) {
        self.codes.push((code, self.code_bits.into()));
    }

    /// Reset code table and width
    fn reset(&mut self) {
        self.trie.reset();
        self.code_bits = Bits::from(self.min_code_bits + 1);
    }

    /// Compress an index stream.
    ///
    /// Output starts with a clear code and ends with the end code.
    pub fn compress(&mut self, indices: &[u8]) -> Vec<(Code, u8)> {
        self.reset();
        self.codes.clear();
        self.emit(self.clear_code());
        let mut buffer: Option<Code> = None;
        for index in indices {
            debug_assert!(Code::from(*index) < self.clear_code());
            let code = match buffer {
                Some(code) => code,
                None => {
                    buffer = Some(Code::from(*index));
                    continue;
                }
            };
            if let Some(extended) = self.trie.search_insert(code, *index) {
                buffer = Some(extended);
                continue;
            }
            self.emit(code);
            let next_code = self.trie.next_code();
            if next_code == Bits::MAX.entries() {
                trace!("code table full, emitting clear code");
                self.emit(self.clear_code());
                self.reset();
            } else if next_code - 1 == self.code_bits.entries() {
                self.code_bits += 1;
            }
            buffer = Some(Code::from(*index));
        }
        if let Some(code) = buffer {
            self.emit(code);
        }
        self.emit(self.end_code());
        std::mem::take(&mut self.codes)
    }
}

/// Plain table decoder, independent of the trie
#[cfg(any(test, feature = "fuzzing"))]
pub fn decompress(bytes: &[u8], min_code_bits: u8) -> Vec<u8> {
    let clear = 1usize << min_code_bits;
    let end = clear + 1;
    let initial = || -> Vec<Vec<u8>> {
        let mut t: Vec<Vec<u8>> = (0..clear).map(|i| vec![i as u8]).collect();
        t.push(vec![]);
        t.push(vec![]);
        t
    };
    let mut table = initial();
    let mut bits = min_code_bits + 1;
    let mut prev: Option<Vec<u8>> = None;
    let mut out = vec![];
    let mut pos = 0;
    loop {
        let mut code = 0usize;
        for b in 0..bits as usize {
            let bit = (bytes[(pos + b) / 8] >> ((pos + b) % 8)) & 1;
            code |= (bit as usize) << b;
        }
        pos += bits as usize;
        if code == clear {
            table = initial();
            bits = min_code_bits + 1;
            prev = None;
            continue;
        }
        if code == end {
            break;
        }
        let entry = if code < table.len() {
            table[code].clone()
        } else {
            assert_eq!(code, table.len(), "invalid code");
            let mut e = prev.clone().expect("code before first entry");
            e.push(e[0]);
            e
        };
        out.extend_from_slice(&entry);
        if let Some(mut p) = prev.take() {
            p.push(entry[0]);
            table.push(p);
            if table.len() == 1 << bits && bits < 12 {
                bits += 1;
            }
        }
        prev = Some(entry);
    }
    out
}
