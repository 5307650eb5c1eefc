//! EWAH Compressed Bitmap
//!
//! The buffer is a sequence of machine words.  Run-Length Words (headers)
//! alternate with blocks of literal words: each header encodes a run of
//! uniform words followed by the count of literals stored after it.  Long
//! stretches of zeros or ones therefore cost a single word, while mixed
//! words are stored verbatim.
//!
//! Construction is append-only.  Bits are set in strictly increasing order,
//! either one at a time with `set`, or a word at a time with the `add_*`
//! family.  Appends that complete a uniform word are folded into the tail
//! run, so the buffer never stores an all-zero or all-one literal.
//!
//! The persistence format is fixed and big-endian:
//!
//! `| bit_size (u32) | word_count (u32) | words (u64 x N) | tail_index (u32) |`

use std::io::{Read,Write};
use crate::tools::rlw;
use crate::{Word,BITS_IN_WORD,FULL,DYNERR};

/// Compressed bitmap.  The `rlw` cursor is the buffer index of the header
/// currently being extended; it is an index rather than a pointer so that
/// buffer growth can never invalidate it.
#[derive(Clone,Debug,PartialEq,Eq)]
pub struct EwahBitmap {
    pub(crate) buffer: Vec<Word>,
    pub(crate) rlw: usize,
    pub(crate) bit_size: usize
}

impl EwahBitmap {
    /// Empty bitmap, pre-seeded with one empty header.
    pub fn new() -> Self {
        let mut buffer = Vec::with_capacity(32);
        buffer.push(0);
        Self {
            buffer,
            rlw: 0,
            bit_size: 0
        }
    }
    /// Reset to the empty state, keeping the allocation.
    pub fn clear(&mut self) {
        self.buffer.truncate(1);
        self.buffer[0] = 0;
        self.rlw = 0;
        self.bit_size = 0;
    }
    /// number of logical bits represented
    pub fn size_in_bits(&self) -> usize {
        self.bit_size
    }
    /// number of words in the compressed buffer, informational
    pub fn buffer_len(&self) -> usize {
        self.buffer.len()
    }
    /// grow by half when full, the `rlw` index survives reallocation
    fn buffer_push(&mut self,value: Word) {
        if self.buffer.len() == self.buffer.capacity() {
            self.buffer.reserve_exact(usize::max(self.buffer.len() / 2,1));
        }
        self.buffer.push(value);
    }
    fn buffer_push_rlw(&mut self,value: Word) {
        self.buffer_push(value);
        self.rlw = self.buffer.len() - 1;
    }
    /// Append one uniform word of value `v`, extending the tail run when the
    /// tail has no literals and the run bit agrees (or is still free).
    /// Returns the number of buffer words consumed.
    fn add_empty_word(&mut self,v: bool) -> usize {
        let no_literal = rlw::get_literal_words(self.buffer[self.rlw]) == 0;
        let run_len = rlw::get_running_len(self.buffer[self.rlw]);

        if no_literal && run_len == 0 {
            rlw::set_run_bit(&mut self.buffer[self.rlw],v);
        }

        if no_literal && rlw::get_run_bit(self.buffer[self.rlw]) == v
            && run_len < rlw::LARGEST_RUNNING_COUNT as usize {
            rlw::set_running_len(&mut self.buffer[self.rlw],run_len + 1);
            return 0;
        }

        self.buffer_push_rlw(0);
        rlw::set_run_bit(&mut self.buffer[self.rlw],v);
        rlw::set_running_len(&mut self.buffer[self.rlw],1);
        1
    }
    /// Append one literal word, opening a fresh header if the tail's literal
    /// count is saturated.  Returns the number of buffer words consumed.
    fn add_literal(&mut self,new_data: Word) -> usize {
        let current_num = rlw::get_literal_words(self.buffer[self.rlw]);

        if current_num >= rlw::LARGEST_LITERAL_COUNT as usize {
            self.buffer_push_rlw(0);
            rlw::set_literal_words(&mut self.buffer[self.rlw],1);
            self.buffer_push(new_data);
            return 2;
        }

        rlw::set_literal_words(&mut self.buffer[self.rlw],current_num + 1);
        debug_assert!(rlw::get_literal_words(self.buffer[self.rlw]) == current_num + 1);
        self.buffer_push(new_data);
        1
    }
    /// run-splitting workhorse behind `add_empty_run`, does not touch `bit_size`
    fn add_empty_word_stream(&mut self,v: bool,mut number: usize) -> usize {
        let mut added = 0;

        if rlw::get_run_bit(self.buffer[self.rlw]) != v && rlw::size(self.buffer[self.rlw]) == 0 {
            rlw::set_run_bit(&mut self.buffer[self.rlw],v);
        } else if rlw::get_literal_words(self.buffer[self.rlw]) != 0
            || rlw::get_run_bit(self.buffer[self.rlw]) != v {
            self.buffer_push_rlw(0);
            if v {
                rlw::set_run_bit(&mut self.buffer[self.rlw],v);
            }
            added += 1;
        }

        let run_len = rlw::get_running_len(self.buffer[self.rlw]);
        let can_add = usize::min(number,rlw::LARGEST_RUNNING_COUNT as usize - run_len);
        rlw::set_running_len(&mut self.buffer[self.rlw],run_len + can_add);
        number -= can_add;

        while number >= rlw::LARGEST_RUNNING_COUNT as usize {
            self.buffer_push_rlw(0);
            added += 1;
            if v {
                rlw::set_run_bit(&mut self.buffer[self.rlw],v);
            }
            rlw::set_running_len(&mut self.buffer[self.rlw],rlw::LARGEST_RUNNING_COUNT as usize);
            number -= rlw::LARGEST_RUNNING_COUNT as usize;
        }

        if number > 0 {
            self.buffer_push_rlw(0);
            added += 1;
            if v {
                rlw::set_run_bit(&mut self.buffer[self.rlw],v);
            }
            rlw::set_running_len(&mut self.buffer[self.rlw],number);
        }

        added
    }
    /// Append `number` uniform words of value `v`.  Returns the number of
    /// buffer words consumed.
    pub fn add_empty_run(&mut self,v: bool,number: usize) -> usize {
        if number == 0 {
            return 0;
        }
        self.bit_size += number * BITS_IN_WORD;
        self.add_empty_word_stream(v,number)
    }
    /// Append literal words verbatim, or complemented if `negate` is set,
    /// splitting across headers as the literal count saturates.  The payload
    /// is not canonicalised; callers that may pass uniform words and want
    /// them folded must go through `add_word` instead.
    pub fn add_dirty_run(&mut self,words: &[Word],negate: bool) {
        let mut offset = 0;
        loop {
            let literals = rlw::get_literal_words(self.buffer[self.rlw]);
            let can_add = usize::min(words.len() - offset,rlw::LARGEST_LITERAL_COUNT as usize - literals);

            rlw::set_literal_words(&mut self.buffer[self.rlw],literals + can_add);
            for k in 0..can_add {
                let word = words[offset + k];
                self.buffer_push(if negate { !word } else { word });
            }
            self.bit_size += can_add * BITS_IN_WORD;
            offset += can_add;

            if offset == words.len() {
                return;
            }
            self.buffer_push_rlw(0);
        }
    }
    /// Append one uncompressed word.  All-zero and all-one words are folded
    /// into runs; anything else is stored as a literal.  Returns the number
    /// of buffer words consumed.
    pub fn add_word(&mut self,word: Word) -> usize {
        self.bit_size += BITS_IN_WORD;

        if word == 0 {
            return self.add_empty_word(false);
        }
        if word == FULL {
            return self.add_empty_word(true);
        }
        self.add_literal(word)
    }
    /// Set the bit at position `i`.  The encoder is streaming: `i` must not
    /// precede any position already set, and a set bit cannot be cleared.
    /// Calling out of order is a contract violation caught in debug builds.
    pub fn set(&mut self,i: usize) {
        debug_assert!(i >= self.bit_size,"bits must be set in increasing order");

        let dist = (i + BITS_IN_WORD) / BITS_IN_WORD
            - (self.bit_size + BITS_IN_WORD - 1) / BITS_IN_WORD;

        self.bit_size = i + 1;

        // the bit falls in a word past the current tail
        if dist > 0 {
            if dist > 1 {
                self.add_empty_word_stream(false,dist - 1);
            }
            self.add_literal((1 as Word) << (i % BITS_IN_WORD));
            return;
        }

        // the bit falls in the last run word: split one word off the run
        if rlw::get_literal_words(self.buffer[self.rlw]) == 0 {
            let run_len = rlw::get_running_len(self.buffer[self.rlw]);
            rlw::set_running_len(&mut self.buffer[self.rlw],run_len - 1);
            self.add_literal((1 as Word) << (i % BITS_IN_WORD));
            return;
        }

        let last = self.buffer.len() - 1;
        self.buffer[last] |= (1 as Word) << (i % BITS_IN_WORD);

        // check if we just completed a stream of 1s
        if self.buffer[last] == FULL {
            self.buffer.pop();
            let literals = rlw::get_literal_words(self.buffer[self.rlw]);
            rlw::set_literal_words(&mut self.buffer[self.rlw],literals - 1);
            self.add_empty_word(true);
        }
    }
    /// Bitwise complement in place: every run bit is flipped and every
    /// literal inverted.  Linear in the compressed length.
    pub fn negate(&mut self) {
        let mut pointer = 0;
        while pointer < self.buffer.len() {
            rlw::xor_run_bit(&mut self.buffer[pointer]);
            let literals = rlw::get_literal_words(self.buffer[pointer]);
            pointer += 1;
            for _k in 0..literals {
                self.buffer[pointer] = !self.buffer[pointer];
                pointer += 1;
            }
        }
    }
    /// Iterator decompressing the bitmap one machine word at a time.
    pub fn words(&self) -> Words {
        Words::new(self)
    }
    /// Lazy iterator over the positions of set bits, in increasing order.
    /// Runs of zeros are skipped without decompression.
    pub fn ones(&self) -> Ones {
        Ones {
            buffer: &self.buffer,
            pointer: 0,
            literals_left: 0,
            next_pos: 0,
            ones_left: 0,
            current: 0,
            word_base: 0
        }
    }
    /// Call `callback` with the position of every set bit, in increasing
    /// order.  Same order and content as `ones`.
    pub fn each_bit<F: FnMut(usize)>(&self,mut callback: F) {
        for pos in self.ones() {
            callback(pos);
        }
    }
    /// Dump the bitmap in compressed form.  Returns the number of bytes
    /// written.  Counts that cannot be framed in 32 bits are an error.
    pub fn serialize<W: Write>(&self,writer: &mut W) -> Result<usize,DYNERR> {
        if self.bit_size > u32::MAX as usize || self.buffer.len() > u32::MAX as usize {
            return Err(Box::new(crate::Error::TooLarge));
        }
        log::debug!("serialize {} words, {} bits",self.buffer.len(),self.bit_size);

        writer.write_all(&(self.bit_size as u32).to_be_bytes())?;
        writer.write_all(&(self.buffer.len() as u32).to_be_bytes())?;
        for word in &self.buffer {
            writer.write_all(&word.to_be_bytes())?;
        }
        writer.write_all(&(self.rlw as u32).to_be_bytes())?;

        Ok(4 + 4 + self.buffer.len() * 8 + 4)
    }
    /// Load a bitmap dumped by `serialize`, replacing the contents of `self`
    /// and reusing its allocation.  On failure the buffer is left in an
    /// unspecified but safe state; `clear` restores it to empty.
    pub fn deserialize<R: Read>(&mut self,reader: &mut R) -> Result<(),DYNERR> {
        let mut quad = [0u8;4];
        let mut octet = [0u8;8];

        reader.read_exact(&mut quad)?;
        self.bit_size = u32::from_be_bytes(quad) as usize;

        reader.read_exact(&mut quad)?;
        let word_count = u32::from_be_bytes(quad) as usize;
        log::debug!("deserialize {} words, {} bits",word_count,self.bit_size);

        self.buffer.clear();
        self.buffer.reserve(word_count);
        for _i in 0..word_count {
            reader.read_exact(&mut octet)?;
            self.buffer.push(Word::from_be_bytes(octet));
        }

        reader.read_exact(&mut quad)?;
        let rlw_pos = u32::from_be_bytes(quad) as usize;
        if rlw_pos >= self.buffer.len() {
            log::error!("tail index {} points past {} buffer words",rlw_pos,self.buffer.len());
            return Err(Box::new(crate::Error::FormatMismatch));
        }
        self.rlw = rlw_pos;
        Ok(())
    }
}

/// Decompressing word iterator.  Yields the bitmap as consecutive machine
/// words: run words are synthesized, literals are read from the buffer.
pub struct Words<'a> {
    buffer: &'a [Word],
    pointer: usize,
    run_bit: bool,
    running_len: usize,
    literal_words: usize,
    compressed: usize,
    literals: usize
}

impl <'a> Words<'a> {
    fn new(parent: &'a EwahBitmap) -> Self {
        let mut ans = Self {
            buffer: &parent.buffer,
            pointer: 0,
            run_bit: false,
            running_len: 0,
            literal_words: 0,
            compressed: 0,
            literals: 0
        };
        if ans.pointer < ans.buffer.len() {
            ans.read_new_rlw();
        }
        ans
    }
    /// decode the header under the pointer, skipping degenerate empty headers
    fn read_new_rlw(&mut self) {
        self.compressed = 0;
        self.literals = 0;
        loop {
            let word = self.buffer[self.pointer];
            self.running_len = rlw::get_running_len(word);
            self.literal_words = rlw::get_literal_words(word);
            self.run_bit = rlw::get_run_bit(word);
            if self.running_len > 0 || self.literal_words > 0 {
                return;
            }
            if self.pointer < self.buffer.len() - 1 {
                self.pointer += 1;
            } else {
                self.pointer = self.buffer.len();
                return;
            }
        }
    }
}

impl Iterator for Words<'_> {
    type Item = Word;
    fn next(&mut self) -> Option<Word> {
        if self.pointer >= self.buffer.len() {
            return None;
        }
        let next: Word;
        if self.compressed < self.running_len {
            self.compressed += 1;
            next = match self.run_bit {
                true => FULL,
                false => 0
            };
        } else {
            debug_assert!(self.literals < self.literal_words);
            self.literals += 1;
            self.pointer += 1;
            next = self.buffer[self.pointer];
        }
        if self.compressed == self.running_len && self.literals == self.literal_words {
            self.pointer += 1;
            if self.pointer < self.buffer.len() {
                self.read_new_rlw();
            }
        }
        Some(next)
    }
}

/// Iterator over set bit positions.  Walks the header chain directly so a
/// run of zeros costs one step no matter how long it is.
pub struct Ones<'a> {
    buffer: &'a [Word],
    pointer: usize,
    literals_left: usize,
    next_pos: usize,
    ones_left: usize,
    current: Word,
    word_base: usize
}

impl Iterator for Ones<'_> {
    type Item = usize;
    fn next(&mut self) -> Option<usize> {
        loop {
            if self.ones_left > 0 {
                self.ones_left -= 1;
                self.next_pos += 1;
                return Some(self.next_pos - 1);
            }
            if self.current != 0 {
                let bit = self.current.trailing_zeros() as usize;
                self.current &= self.current - 1;
                return Some(self.word_base + bit);
            }
            if self.literals_left > 0 {
                self.literals_left -= 1;
                self.current = self.buffer[self.pointer];
                self.pointer += 1;
                self.word_base = self.next_pos;
                self.next_pos += BITS_IN_WORD;
                continue;
            }
            if self.pointer >= self.buffer.len() {
                return None;
            }
            let word = self.buffer[self.pointer];
            self.pointer += 1;
            let run_len = rlw::get_running_len(word);
            self.literals_left = rlw::get_literal_words(word);
            if rlw::get_run_bit(word) {
                self.ones_left = run_len * BITS_IN_WORD;
            } else {
                self.next_pos += run_len * BITS_IN_WORD;
            }
        }
    }
}

#[cfg(test)]
use crate::tools::rlw::LARGEST_RUNNING_COUNT;

#[cfg(test)]
fn walk_headers(e: &EwahBitmap) -> Vec<usize> {
    let mut headers = Vec::new();
    let mut pointer = 0;
    while pointer < e.buffer.len() {
        headers.push(pointer);
        pointer += 1 + rlw::get_literal_words(e.buffer[pointer]);
    }
    assert_eq!(pointer,e.buffer.len(),"header chain must cover the buffer exactly");
    headers
}

#[test]
fn sparse_singletons() {
    let expected = vec![3,24,42,4242,12345,99999,42424242];
    let mut e = EwahBitmap::new();
    for i in &expected {
        e.set(*i);
    }
    assert_eq!(e.size_in_bits(),42424243);
    assert_eq!(e.ones().collect::<Vec<usize>>(),expected);
    let mut reported = Vec::new();
    e.each_bit(|pos| reported.push(pos));
    assert_eq!(reported,expected);
    assert!(walk_headers(&e).contains(&e.rlw));
}

#[test]
fn all_ones_canonical() {
    let mut e = EwahBitmap::new();
    assert_eq!(e.add_word(FULL),0);
    assert_eq!(e.add_word(FULL),0);
    // one header carrying a run of two, no literals
    assert_eq!(e.buffer,vec![0b101]);
    assert_eq!(e.size_in_bits(),2 * BITS_IN_WORD);
    assert_eq!(e.ones().collect::<Vec<usize>>(),(0..128).collect::<Vec<usize>>());
}

#[test]
fn long_zero_run() {
    let run = LARGEST_RUNNING_COUNT as usize + 5;
    let mut e = EwahBitmap::new();
    e.add_empty_run(false,run);
    e.add_word(FULL);
    // one saturated header, one header for the leftover, one for the ones
    assert_eq!(e.buffer_len(),3);
    assert_eq!(e.size_in_bits(),(run + 1) * BITS_IN_WORD);
    let first = run * BITS_IN_WORD;
    assert_eq!(e.ones().collect::<Vec<usize>>(),(first..first + BITS_IN_WORD).collect::<Vec<usize>>());
}

#[test]
fn literal_collapses_to_run() {
    let mut e = EwahBitmap::new();
    for i in 0..BITS_IN_WORD {
        e.set(i);
    }
    // the literal filled up and must have been folded into a run of ones
    assert_eq!(e.buffer,vec![0b11]);
    assert_eq!(e.size_in_bits(),BITS_IN_WORD);
}

#[test]
fn run_split_by_set() {
    let mut e = EwahBitmap::new();
    e.add_word(FULL);
    e.add_word(FULL);
    // bit 128 falls just past the run of ones: fresh literal
    e.set(128);
    assert_eq!(e.ones().count(),129);
    // bit 191 lands inside the tail literal
    e.set(191);
    let ones: Vec<usize> = e.ones().collect();
    assert_eq!(ones.len(),130);
    assert_eq!(ones[128],128);
    assert_eq!(ones[129],191);
    assert!(walk_headers(&e).contains(&e.rlw));
}

#[test]
fn set_into_run_tail() {
    // a deserialized bitmap can leave the tail as a run of ones with an
    // unaligned bit count; the next set must split one word off the run
    let image = "00 00 00 64 00 00 00 01 00 00 00 00 00 00 00 05 00 00 00 00";
    let raw = hex::decode(image.replace(" ","")).unwrap();
    let mut e = EwahBitmap::new();
    e.deserialize(&mut std::io::Cursor::new(&raw)).expect("deserialization failed");
    assert_eq!(e.size_in_bits(),100);
    e.set(100);
    assert_eq!(e.size_in_bits(),101);
    let mut expected: Vec<usize> = (0..64).collect();
    expected.push(100);
    assert_eq!(e.ones().collect::<Vec<usize>>(),expected);
    assert!(walk_headers(&e).contains(&e.rlw));
}

#[test]
fn empty_run_splitting() {
    let mut e = EwahBitmap::new();
    let added = e.add_empty_run(true,2 * LARGEST_RUNNING_COUNT as usize + 9);
    assert_eq!(added,2);
    assert_eq!(e.buffer_len(),3);
    assert_eq!(e.size_in_bits(),(2 * LARGEST_RUNNING_COUNT as usize + 9) * BITS_IN_WORD);
    let headers = walk_headers(&e);
    assert_eq!(headers,vec![0,1,2]);
    assert_eq!(rlw::get_running_len(e.buffer[0]),LARGEST_RUNNING_COUNT as usize);
    assert_eq!(rlw::get_running_len(e.buffer[1]),LARGEST_RUNNING_COUNT as usize);
    assert_eq!(rlw::get_running_len(e.buffer[2]),9);
}

#[test]
fn dirty_run_is_verbatim() {
    let mut e = EwahBitmap::new();
    // a dirty run may legally carry uniform words, they stay literal
    e.add_dirty_run(&[0,FULL,0xdeadbeef],false);
    assert_eq!(e.buffer_len(),4);
    assert_eq!(e.words().collect::<Vec<Word>>(),vec![0,FULL,0xdeadbeef]);
    let mut f = EwahBitmap::new();
    f.add_dirty_run(&[0,FULL,0xdeadbeef],true);
    assert_eq!(f.words().collect::<Vec<Word>>(),vec![FULL,0,!0xdeadbeef_u64]);
}

#[test]
fn words_round_trip() {
    let mut e = EwahBitmap::new();
    e.add_empty_run(false,3);
    e.add_word(0x8000_0000_0000_0001);
    e.add_empty_run(true,2);
    e.add_word(0x00ff_00ff_00ff_00ff);
    let blowup: Vec<Word> = e.words().collect();
    assert_eq!(blowup,vec![0,0,0,0x8000_0000_0000_0001,FULL,FULL,0x00ff_00ff_00ff_00ff]);
    // feeding the words back in reproduces the exact structure
    let mut f = EwahBitmap::new();
    for word in blowup {
        f.add_word(word);
    }
    assert_eq!(e,f);
}

#[test]
fn negate_involution() {
    let mut e = EwahBitmap::new();
    e.set(0);
    e.set(100);
    e.set(4242);
    let before = e.clone();
    e.negate();
    // the complement covers whole words, 67 of them here
    assert_eq!(e.ones().count(),67 * BITS_IN_WORD - 3);
    e.negate();
    assert_eq!(e,before);
}

#[test]
fn clear_keeps_allocation() {
    let mut e = EwahBitmap::new();
    for i in 0..1000 {
        e.set(i * 3);
    }
    e.clear();
    assert_eq!(e.size_in_bits(),0);
    assert_eq!(e.buffer_len(),1);
    assert_eq!(e.ones().count(),0);
    e.set(7);
    assert_eq!(e.ones().collect::<Vec<usize>>(),vec![7]);
}

#[test]
fn ones_against_bit_vec() {
    let positions = [0,1,63,64,65,127,1000,1001,4095,4097,70000];
    let mut e = EwahBitmap::new();
    let mut oracle = bit_vec::BitVec::from_elem(70001,false);
    for p in positions {
        e.set(p);
        oracle.set(p,true);
    }
    let from_oracle: Vec<usize> = oracle.iter().enumerate()
        .filter(|(_i,b)| *b).map(|(i,_b)| i).collect();
    assert_eq!(e.ones().collect::<Vec<usize>>(),from_oracle);
}

#[test]
fn serialize_golden() {
    let mut e = EwahBitmap::new();
    let mut dump: Vec<u8> = Vec::new();
    // empty bitmap: one empty header
    e.serialize(&mut dump).expect("serialization failed");
    let golden = "00 00 00 00 00 00 00 01 00 00 00 00 00 00 00 00 00 00 00 00";
    assert_eq!(dump,hex::decode(golden.replace(" ","")).unwrap());

    // two full words collapse to a single run header
    e.add_word(FULL);
    e.add_word(FULL);
    dump.clear();
    e.serialize(&mut dump).expect("serialization failed");
    let golden = "00 00 00 80 00 00 00 01 00 00 00 00 00 00 00 05 00 00 00 00";
    assert_eq!(dump,hex::decode(golden.replace(" ","")).unwrap());

    // sparse singletons within one literal
    let mut e = EwahBitmap::new();
    e.set(3);
    e.set(24);
    e.set(42);
    dump.clear();
    e.serialize(&mut dump).expect("serialization failed");
    let golden = "00 00 00 2b 00 00 00 02 00 00 00 02 00 00 00 00 00 00 04 00 01 00 00 08 00 00 00 00";
    assert_eq!(dump,hex::decode(golden.replace(" ","")).unwrap());
}

#[test]
fn serialize_round_trip() {
    let mut e = EwahBitmap::new();
    e.add_empty_run(false,1000);
    e.add_word(0x1234_5678_9abc_def0);
    e.add_empty_run(true,3);
    e.set(70000);
    let mut dump: Vec<u8> = Vec::new();
    let bytes = e.serialize(&mut dump).expect("serialization failed");
    assert_eq!(bytes,dump.len());

    let mut f = EwahBitmap::new();
    f.deserialize(&mut std::io::Cursor::new(&dump)).expect("deserialization failed");
    assert_eq!(e,f);
}

#[test]
fn deserialize_rejects_bad_tail() {
    // tail index equal to the word count must be refused
    let image = "00 00 00 00 00 00 00 01 00 00 00 00 00 00 00 00 00 00 00 01";
    let raw = hex::decode(image.replace(" ","")).unwrap();
    let mut e = EwahBitmap::new();
    assert!(e.deserialize(&mut std::io::Cursor::new(&raw)).is_err());
}

#[test]
fn deserialize_rejects_truncation() {
    let mut e = EwahBitmap::new();
    e.set(12345);
    let mut dump: Vec<u8> = Vec::new();
    e.serialize(&mut dump).expect("serialization failed");
    let mut f = EwahBitmap::new();
    assert!(f.deserialize(&mut std::io::Cursor::new(&dump[0..dump.len()-2])).is_err());
}
