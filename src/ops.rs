//! Logical combiners over the compressed form.
//!
//! Each operator walks the two operands with a pair of RLW cursors and
//! writes a fresh compressed bitmap, without decompressing either side.
//! Runs are raced against each other: whichever cursor holds the longer run
//! (the predator) dictates how many words of the other (the prey) resolve
//! at once.  The shorter operand is treated as extended with zero words.

use crate::tools::rlw::RlwIter;
use crate::ewah::EwahBitmap;

impl EwahBitmap {
    /// Bitwise exclusive-or, producing a new bitmap.
    pub fn xor(&self,other: &EwahBitmap) -> EwahBitmap {
        let mut out = EwahBitmap::new();
        let mut i = RlwIter::new(self);
        let mut j = RlwIter::new(other);

        while i.word_size() > 0 && j.word_size() > 0 {
            while i.running_len > 0 || j.running_len > 0 {
                let (prey,predator) = match i.running_len < j.running_len {
                    true => (&mut i,&mut j),
                    false => (&mut j,&mut i)
                };
                // a zero run passes the prey through, a ones run complements it
                let negate = predator.run_bit;
                let pl = predator.running_len;
                let index = prey.discharge(&mut out,pl,negate);
                out.add_empty_run(negate,pl - index);
                predator.discard_first_words(pl);
            }
            let literals = usize::min(i.literal_words,j.literal_words);
            if literals > 0 {
                for k in 0..literals {
                    out.add_word(i.literal(k) ^ j.literal(k));
                }
                i.discard_first_words(literals);
                j.discard_first_words(literals);
            }
        }

        if i.word_size() > 0 {
            i.discharge(&mut out,usize::MAX,false);
        } else {
            j.discharge(&mut out,usize::MAX,false);
        }

        out.bit_size = usize::max(self.bit_size,other.bit_size);
        out
    }
    /// Bitwise or, producing a new bitmap.
    pub fn or(&self,other: &EwahBitmap) -> EwahBitmap {
        let mut out = EwahBitmap::new();
        let mut i = RlwIter::new(self);
        let mut j = RlwIter::new(other);

        while i.word_size() > 0 && j.word_size() > 0 {
            while i.running_len > 0 || j.running_len > 0 {
                let (prey,predator) = match i.running_len < j.running_len {
                    true => (&mut i,&mut j),
                    false => (&mut j,&mut i)
                };
                let pl = predator.running_len;
                if predator.run_bit {
                    // a ones run saturates the result outright
                    out.add_empty_run(true,pl);
                    prey.discard_first_words(pl);
                    predator.discard_first_words(pl);
                } else {
                    let index = prey.discharge(&mut out,pl,false);
                    out.add_empty_run(false,pl - index);
                    predator.discard_first_words(pl);
                }
            }
            let literals = usize::min(i.literal_words,j.literal_words);
            if literals > 0 {
                for k in 0..literals {
                    out.add_word(i.literal(k) | j.literal(k));
                }
                i.discard_first_words(literals);
                j.discard_first_words(literals);
            }
        }

        if i.word_size() > 0 {
            i.discharge(&mut out,usize::MAX,false);
        } else {
            j.discharge(&mut out,usize::MAX,false);
        }

        out.bit_size = usize::max(self.bit_size,other.bit_size);
        out
    }
    /// Bitwise and, producing a new bitmap.
    pub fn and(&self,other: &EwahBitmap) -> EwahBitmap {
        let mut out = EwahBitmap::new();
        let mut i = RlwIter::new(self);
        let mut j = RlwIter::new(other);

        while i.word_size() > 0 && j.word_size() > 0 {
            while i.running_len > 0 || j.running_len > 0 {
                let (prey,predator) = match i.running_len < j.running_len {
                    true => (&mut i,&mut j),
                    false => (&mut j,&mut i)
                };
                let pl = predator.running_len;
                if !predator.run_bit {
                    // a zero run annihilates the result outright
                    out.add_empty_run(false,pl);
                    prey.discard_first_words(pl);
                    predator.discard_first_words(pl);
                } else {
                    let index = prey.discharge(&mut out,pl,false);
                    out.add_empty_run(false,pl - index);
                    predator.discard_first_words(pl);
                }
            }
            let literals = usize::min(i.literal_words,j.literal_words);
            if literals > 0 {
                for k in 0..literals {
                    out.add_word(i.literal(k) & j.literal(k));
                }
                i.discard_first_words(literals);
                j.discard_first_words(literals);
            }
        }

        // the leftover of the longer operand meets only zero extension
        if i.word_size() > 0 {
            i.discharge_empty(&mut out);
        } else {
            j.discharge_empty(&mut out);
        }

        out.bit_size = usize::max(self.bit_size,other.bit_size);
        out
    }
    /// Bitwise difference `self AND NOT other`, producing a new bitmap.
    pub fn and_not(&self,other: &EwahBitmap) -> EwahBitmap {
        let mut out = EwahBitmap::new();
        let mut i = RlwIter::new(self);
        let mut j = RlwIter::new(other);

        while i.word_size() > 0 && j.word_size() > 0 {
            while i.running_len > 0 || j.running_len > 0 {
                let prey_is_left = i.running_len < j.running_len;
                let (prey,predator) = match prey_is_left {
                    true => (&mut i,&mut j),
                    false => (&mut j,&mut i)
                };
                let pl = predator.running_len;
                // a zero run on the left or a ones run on the right annihilates
                let annihilates = match prey_is_left {
                    true => predator.run_bit,
                    false => !predator.run_bit
                };
                if annihilates {
                    out.add_empty_run(false,pl);
                    prey.discard_first_words(pl);
                    predator.discard_first_words(pl);
                } else {
                    // the right operand enters complemented
                    let negate = !prey_is_left;
                    let index = prey.discharge(&mut out,pl,negate);
                    out.add_empty_run(negate,pl - index);
                    predator.discard_first_words(pl);
                }
            }
            let literals = usize::min(i.literal_words,j.literal_words);
            if literals > 0 {
                for k in 0..literals {
                    out.add_word(i.literal(k) & !j.literal(k));
                }
                i.discard_first_words(literals);
                j.discard_first_words(literals);
            }
        }

        if i.word_size() > 0 {
            i.discharge(&mut out,usize::MAX,false);
        } else {
            j.discharge_empty(&mut out);
        }

        out.bit_size = usize::max(self.bit_size,other.bit_size);
        out
    }
}

#[cfg(test)]
use crate::{Word,FULL};
#[cfg(test)]
use crate::bitmap::Bitmap;
#[cfg(test)]
use crate::tools::rlw;
#[cfg(test)]
use rand::{Rng,SeedableRng};

/// literals in a well-formed buffer are never uniform
#[cfg(test)]
fn assert_canonical(e: &EwahBitmap) {
    let mut pointer = 0;
    while pointer < e.buffer.len() {
        let literals = rlw::get_literal_words(e.buffer[pointer]);
        for k in 1..=literals {
            assert!(e.buffer[pointer + k] != 0 && e.buffer[pointer + k] != FULL);
        }
        pointer += 1 + literals;
    }
    assert_eq!(pointer,e.buffer.len());
}

#[cfg(test)]
fn sample_bitmap() -> EwahBitmap {
    let mut e = EwahBitmap::new();
    for i in [1,5,64,300,9000,9001,100000] {
        e.set(i);
    }
    e
}

#[test]
fn laws_with_self() {
    let e = sample_bitmap();
    let x = e.xor(&e);
    assert_eq!(x.ones().count(),0);
    assert_eq!(x.size_in_bits(),e.size_in_bits());
    let o = e.or(&e);
    assert_eq!(o.ones().collect::<Vec<usize>>(),e.ones().collect::<Vec<usize>>());
    let a = e.and(&e);
    assert_eq!(a.ones().collect::<Vec<usize>>(),e.ones().collect::<Vec<usize>>());
    let d = e.and_not(&e);
    assert_eq!(d.ones().count(),0);
    for result in [&x,&o,&a,&d] {
        assert_canonical(result);
    }
}

#[test]
fn combine_with_empty() {
    let e = sample_bitmap();
    let empty = EwahBitmap::new();
    assert_eq!(e.and(&empty).ones().count(),0);
    assert_eq!(e.or(&empty).ones().collect::<Vec<usize>>(),e.ones().collect::<Vec<usize>>());
    assert_eq!(e.xor(&empty).ones().collect::<Vec<usize>>(),e.ones().collect::<Vec<usize>>());
    assert_eq!(e.and_not(&empty).ones().collect::<Vec<usize>>(),e.ones().collect::<Vec<usize>>());
    assert_eq!(empty.and_not(&e).ones().count(),0);
    assert_eq!(e.or(&empty).size_in_bits(),e.size_in_bits());
}

#[test]
fn and_not_is_asymmetric() {
    let mut a = EwahBitmap::new();
    let mut b = EwahBitmap::new();
    for i in [1,2,3,1000] {
        a.set(i);
    }
    for i in [2,3,4,2000] {
        b.set(i);
    }
    assert_eq!(a.and_not(&b).ones().collect::<Vec<usize>>(),vec![1,1000]);
    assert_eq!(b.and_not(&a).ones().collect::<Vec<usize>>(),vec![4,2000]);
    assert_eq!(a.and(&b).ones().collect::<Vec<usize>>(),vec![2,3]);
    assert_eq!(a.or(&b).ones().collect::<Vec<usize>>(),vec![1,2,3,4,1000,2000]);
    assert_eq!(a.xor(&b).ones().collect::<Vec<usize>>(),vec![1,4,1000,2000]);
}

#[test]
fn runs_meet_literals() {
    // a: long ones run then a literal; b: literals only
    let mut a = EwahBitmap::new();
    a.add_empty_run(true,100);
    a.add_word(0x0f0f_0f0f_0f0f_0f0f);
    let mut b = EwahBitmap::new();
    for _k in 0..101 {
        b.add_word(0x3333_3333_3333_3333);
    }
    let anded: Vec<Word> = a.and(&b).words().collect();
    assert_eq!(anded.len(),101);
    for word in &anded[0..100] {
        assert_eq!(*word,0x3333_3333_3333_3333);
    }
    assert_eq!(anded[100],0x0303_0303_0303_0303);
    let ored: Vec<Word> = a.or(&b).words().collect();
    for word in &ored[0..100] {
        assert_eq!(*word,FULL);
    }
    assert_eq!(ored[100],0x3f3f_3f3f_3f3f_3f3f);
}

#[cfg(test)]
fn mixed_word(rng: &mut impl Rng) -> Word {
    let word: Word = rng.gen();
    match word {
        0 | FULL => 0x0123_4567_89ab_cdef,
        _ => word
    }
}

#[cfg(test)]
fn random_bitmap(rng: &mut impl Rng,segments: usize) -> (EwahBitmap,Vec<Word>) {
    let mut e = EwahBitmap::new();
    let mut words: Vec<Word> = Vec::new();
    for _s in 0..segments {
        match rng.gen_range(0..3) {
            0 => {
                let v = rng.gen_bool(0.5);
                let len = rng.gen_range(1..50);
                e.add_empty_run(v,len);
                words.extend(std::iter::repeat(if v { FULL } else { 0 }).take(len));
            },
            1 => {
                let word = mixed_word(rng);
                e.add_word(word);
                words.push(word);
            },
            _ => {
                let count = rng.gen_range(1..20);
                let dirty: Vec<Word> = (0..count).map(|_k| mixed_word(rng)).collect();
                e.add_dirty_run(&dirty,false);
                words.extend(dirty);
            }
        }
    }
    (e,words)
}

/// randomized word-wise verification against the plain form, the way the
/// original logical test drove its operators against a blown-up oracle
#[test]
fn random_operator_oracle() {
    let tests: [(fn(&EwahBitmap,&EwahBitmap) -> EwahBitmap,fn(Word,Word) -> Word);4] = [
        (|a,b| a.or(b),|x,y| x | y),
        (|a,b| a.xor(b),|x,y| x ^ y),
        (|a,b| a.and(b),|x,y| x & y),
        (|a,b| a.and_not(b),|x,y| x & !y)
    ];
    let mut rng = rand::rngs::StdRng::seed_from_u64(4242);
    for _round in 0..20 {
        let (a,aw) = random_bitmap(&mut rng,30);
        let (b,bw) = random_bitmap(&mut rng,30);
        let max_len = usize::max(aw.len(),bw.len());
        for (combine,op) in &tests {
            let result = combine(&a,&b);
            let expect: Vec<Word> = (0..max_len).map(|k| {
                let x = aw.get(k).copied().unwrap_or(0);
                let y = bw.get(k).copied().unwrap_or(0);
                op(x,y)
            }).collect();
            assert_eq!(result.words().collect::<Vec<Word>>(),expect);
            assert_eq!(result.size_in_bits(),usize::max(a.size_in_bits(),b.size_in_bits()));
            assert_canonical(&result);
        }
    }
}

/// combiner results agree with the plain-bitmap rendition of the operands
#[test]
fn random_set_oracle() {
    let mut rng = rand::rngs::StdRng::seed_from_u64(99);
    let size = 4096;
    let mut a = EwahBitmap::new();
    let mut b = EwahBitmap::new();
    let mut pa = Bitmap::new();
    let mut pb = Bitmap::new();
    for i in 0..size {
        if rng.gen_bool(0.5) {
            a.set(i);
            pa.set(i);
        }
        if rng.gen_bool(0.1) {
            b.set(i);
            pb.set(i);
        }
    }
    let anded = Bitmap::from_ewah(&a.and(&b));
    let ored = Bitmap::from_ewah(&a.or(&b));
    let xored = Bitmap::from_ewah(&a.xor(&b));
    let diffed = Bitmap::from_ewah(&a.and_not(&b));
    for i in 0..size {
        assert_eq!(anded.get(i),pa.get(i) && pb.get(i));
        assert_eq!(ored.get(i),pa.get(i) || pb.get(i));
        assert_eq!(xored.get(i),pa.get(i) != pb.get(i));
        assert_eq!(diffed.get(i),pa.get(i) && !pb.get(i));
    }
}
