use assert_cmd::prelude::*; // Add methods on commands
use std::path::Path;
use std::process::Command; // Run programs
use tempfile;
type STDRESULT = Result<(),Box<dyn std::error::Error>>;

/// compress a fixture list of positions into `out_path`
fn build(fixture: &str,out_path: &Path) -> STDRESULT {
    let mut cmd = Command::cargo_bin("ewah")?;
    let in_path = Path::new("tests").join([fixture,".txt"].concat());
    cmd.arg("build")
        .arg("-i").arg(&in_path)
        .arg("-o").arg(out_path)
        .assert()
        .success();
    Ok(())
}

/// dumping a bitmap must reproduce the position list it was built from
fn dump_test(bitmap_path: &Path,fixture: &str) -> STDRESULT {
    let mut cmd = Command::cargo_bin("ewah")?;
    let cmp_path = Path::new("tests").join([fixture,".txt"].concat());
    let expected = std::fs::read_to_string(cmp_path)?;
    cmd.arg("dump")
        .arg("-i").arg(bitmap_path)
        .assert()
        .success()
        .stdout(expected);
    Ok(())
}

#[test]
fn build_and_dump() -> STDRESULT {
    let temp_dir = tempfile::tempdir()?;
    let a_path = temp_dir.path().join("a.ewah");
    build("sparse_a",&a_path)?;
    dump_test(&a_path,"sparse_a")?;
    let b_path = temp_dir.path().join("b.ewah");
    build("sparse_b",&b_path)?;
    dump_test(&b_path,"sparse_b")
}

#[test]
fn combine_or() -> STDRESULT {
    let temp_dir = tempfile::tempdir()?;
    let a_path = temp_dir.path().join("a.ewah");
    let b_path = temp_dir.path().join("b.ewah");
    let out_path = temp_dir.path().join("union.ewah");
    build("sparse_a",&a_path)?;
    build("sparse_b",&b_path)?;
    let mut cmd = Command::cargo_bin("ewah")?;
    cmd.arg("combine")
        .arg("-m").arg("or")
        .arg("-a").arg(&a_path)
        .arg("-b").arg(&b_path)
        .arg("-o").arg(&out_path)
        .assert()
        .success();
    dump_test(&out_path,"sparse_union")
}

#[test]
fn combine_and() -> STDRESULT {
    let temp_dir = tempfile::tempdir()?;
    let a_path = temp_dir.path().join("a.ewah");
    let b_path = temp_dir.path().join("b.ewah");
    let out_path = temp_dir.path().join("common.ewah");
    build("sparse_a",&a_path)?;
    build("sparse_b",&b_path)?;
    let mut cmd = Command::cargo_bin("ewah")?;
    cmd.arg("combine")
        .arg("-m").arg("and")
        .arg("-a").arg(&a_path)
        .arg("-b").arg(&b_path)
        .arg("-o").arg(&out_path)
        .assert()
        .success();
    dump_test(&out_path,"sparse_common")
}

#[test]
fn info_reports_counts() -> STDRESULT {
    let temp_dir = tempfile::tempdir()?;
    let a_path = temp_dir.path().join("a.ewah");
    build("sparse_a",&a_path)?;
    let mut cmd = Command::cargo_bin("ewah")?;
    cmd.arg("info")
        .arg("-i").arg(&a_path)
        .assert()
        .success()
        .stdout(predicates::str::contains("set bits: 7"))
        .stdout(predicates::str::contains("bits: 42424243"));
    Ok(())
}

#[test]
fn unsorted_input_is_rejected() -> STDRESULT {
    let temp_dir = tempfile::tempdir()?;
    let out_path = temp_dir.path().join("bad.ewah");
    let mut cmd = Command::cargo_bin("ewah")?;
    let in_path = Path::new("tests").join("unsorted.txt");
    cmd.arg("build")
        .arg("-i").arg(&in_path)
        .arg("-o").arg(&out_path)
        .assert()
        .failure();
    Ok(())
}
