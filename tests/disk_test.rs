use std::io::{Seek,SeekFrom,BufReader,BufWriter,Write};
use rand::{Rng,SeedableRng};
use ewah::ewah::EwahBitmap;
type STDRESULT = Result<(),Box<dyn std::error::Error>>;

/// around a million random bits spread over [0, 10^9), through a real file
#[test]
fn large_disk_round_trip() -> STDRESULT {
    let mut rng = rand::rngs::StdRng::seed_from_u64(20240621);
    let mut e = EwahBitmap::new();
    let mut pos: usize = 0;
    let mut count: usize = 0;
    while count < 1_000_000 {
        pos += rng.gen_range(1..=1000);
        e.set(pos);
        count += 1;
    }
    assert!(e.size_in_bits() < 1_000_000_000);

    let mut file = tempfile::tempfile()?;
    {
        let mut writer = BufWriter::new(&mut file);
        e.serialize(&mut writer)?;
        writer.flush()?;
    }
    file.seek(SeekFrom::Start(0))?;

    let mut e2 = EwahBitmap::new();
    e2.deserialize(&mut BufReader::new(&mut file))?;
    assert_eq!(e,e2);
    assert_eq!(e2.ones().count(),1_000_000);
    Ok(())
}

/// deserializing over a dirty bitmap must fully replace it
#[test]
fn deserialize_replaces_contents() -> STDRESULT {
    let mut small = EwahBitmap::new();
    small.set(1);
    small.set(1000);

    let mut file = tempfile::tempfile()?;
    small.serialize(&mut file)?;
    file.seek(SeekFrom::Start(0))?;

    let mut dirty = EwahBitmap::new();
    for i in 0..10000 {
        dirty.set(i * 7);
    }
    dirty.deserialize(&mut BufReader::new(&mut file))?;
    assert_eq!(dirty,small);
    Ok(())
}
