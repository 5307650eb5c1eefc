//! Plain uncompressed bitmap
//!
//! An old-school auto-growing word array.  Unlike the compressed form it
//! supports random set and clear, which makes it useful as a staging buffer
//! that is compressed once it stabilizes, and as a correctness oracle for
//! the compressed operations.  Any position outside the allocation reads
//! as zero.

use crate::ewah::EwahBitmap;
use crate::{Word,BITS_IN_WORD};

pub struct Bitmap {
    words: Vec<Word>
}

impl Bitmap {
    pub fn new() -> Self {
        Self {
            words: vec![0;32]
        }
    }
    /// set the bit at `pos`, growing the word array by doubling as needed
    pub fn set(&mut self,pos: usize) {
        let block = pos / BITS_IN_WORD;
        if block >= self.words.len() {
            self.words.resize(block * 2,0);
        }
        self.words[block] |= (1 as Word) << (pos % BITS_IN_WORD);
    }
    /// clear the bit at `pos`, a no-op past the end of the allocation
    pub fn clear(&mut self,pos: usize) {
        let block = pos / BITS_IN_WORD;
        if block < self.words.len() {
            self.words[block] &= !((1 as Word) << (pos % BITS_IN_WORD));
        }
    }
    pub fn get(&self,pos: usize) -> bool {
        let block = pos / BITS_IN_WORD;
        block < self.words.len() && self.words[block] & ((1 as Word) << (pos % BITS_IN_WORD)) != 0
    }
    /// the backing words, trailing zero words included
    pub fn words(&self) -> &[Word] {
        &self.words
    }
    /// Compress into an EWAH bitmap: zero runs collapse, uniform words fold
    /// into runs, mixed words go in verbatim.  Trailing zero words are not
    /// represented in the output.
    pub fn compress(&self) -> EwahBitmap {
        let mut ewah = EwahBitmap::new();
        let mut running_empty_words: usize = 0;
        let mut last_word: Word = 0;

        for word in &self.words {
            if *word == 0 {
                running_empty_words += 1;
                continue;
            }
            if last_word != 0 {
                ewah.add_word(last_word);
            }
            if running_empty_words > 0 {
                ewah.add_empty_run(false,running_empty_words);
                running_empty_words = 0;
            }
            last_word = *word;
        }
        ewah.add_word(last_word);

        log::debug!("compressed {} words into {}",self.words.len(),ewah.buffer_len());
        ewah
    }
    /// Inflate a compressed bitmap into plain words.
    pub fn from_ewah(ewah: &EwahBitmap) -> Self {
        Self {
            words: ewah.words().collect()
        }
    }
}

#[test]
fn set_get_clear() {
    let mut bm = Bitmap::new();
    bm.set(0);
    bm.set(63);
    bm.set(64);
    bm.set(12345);
    assert_eq!(bm.get(0),true);
    assert_eq!(bm.get(1),false);
    assert_eq!(bm.get(63),true);
    assert_eq!(bm.get(64),true);
    assert_eq!(bm.get(12345),true);
    // reads past the allocation are zero
    assert_eq!(bm.get(1 << 30),false);
    bm.clear(64);
    assert_eq!(bm.get(64),false);
    // clearing past the allocation is a no-op
    bm.clear(1 << 30);
    assert_eq!(bm.get(1 << 30),false);
}

#[test]
fn growth_preserves_bits() {
    let mut bm = Bitmap::new();
    bm.set(5);
    for i in 0..20 {
        bm.set(1 << i);
    }
    for i in 0..20 {
        assert_eq!(bm.get(1 << i),true);
    }
    assert_eq!(bm.get(5),true);
    assert_eq!(bm.get(6),false);
}

#[test]
fn compress_round_trip() {
    let mut bm = Bitmap::new();
    for pos in [0,2,64,65,130,1000,1001,1002,5000] {
        bm.set(pos);
    }
    let ewah = bm.compress();
    let back = Bitmap::from_ewah(&ewah);
    for pos in 0..6000 {
        assert_eq!(back.get(pos),bm.get(pos),"mismatch at {}",pos);
    }
    // the inflated copy stops at the last set word
    assert!(back.words().len() <= bm.words().len());
}

#[test]
fn compress_canonicalises_uniform_words() {
    let mut bm = Bitmap::new();
    for pos in 0..256 {
        bm.set(pos);
    }
    bm.set(512);
    let ewah = bm.compress();
    // four full words and a gap: a run of ones, a run of zeros, one literal
    assert_eq!(ewah.buffer_len(),3);
    assert_eq!(ewah.ones().count(),257);
}

#[test]
fn compress_drops_trailing_zeros() {
    let mut bm = Bitmap::new();
    bm.set(3);
    bm.set(2000);
    bm.clear(2000);
    let ewah = bm.compress();
    assert_eq!(ewah.ones().collect::<Vec<usize>>(),vec![3]);
    assert!(ewah.size_in_bits() <= 2 * BITS_IN_WORD);
}
