use clap::{arg,crate_version,Command};
use std::io::Write;
use ewah::ewah::EwahBitmap;

const RCH: &str = "unreachable was reached";

fn load(path: &str) -> Result<EwahBitmap,Box<dyn std::error::Error>> {
    let in_file = std::fs::File::open(path)?;
    let mut reader = std::io::BufReader::new(in_file);
    let mut e = EwahBitmap::new();
    e.deserialize(&mut reader)?;
    Ok(e)
}

fn main() -> Result<(),Box<dyn std::error::Error>>
{
    env_logger::init();

    let long_help =
"Examples:
---------
Build:         `ewah build -i positions.txt -o my_bitmap`
List:          `ewah dump -i my_bitmap`
Intersect:     `ewah combine -m and -a my_bitmap -b other_bitmap -o result`";

    let methods = ["and","or","xor","and-not"];

    let mut main_cmd = Command::new("ewah")
        .about("Build, inspect, and combine compressed bitmaps")
        .after_long_help(long_help)
        .version(crate_version!());
    main_cmd = main_cmd.subcommand(Command::new("build")
        .arg(arg!(-i --input <PATH> "text file of ascending bit positions, one per line").required(true))
        .arg(arg!(-o --output <PATH> "output path").required(true))
        .about("compress a list of bit positions"));

    main_cmd = main_cmd.subcommand(Command::new("dump")
        .arg(arg!(-i --input <PATH> "input path").required(true))
        .about("list the set bits of a compressed bitmap"));

    main_cmd = main_cmd.subcommand(Command::new("combine")
        .arg(arg!(-m --method <METHOD> "logical operation").value_parser(methods)
            .required(true))
        .arg(arg!(-a --lhs <PATH> "left operand").required(true))
        .arg(arg!(-b --rhs <PATH> "right operand").required(true))
        .arg(arg!(-o --output <PATH> "output path").required(true))
        .about("combine two compressed bitmaps"));

    main_cmd = main_cmd.subcommand(Command::new("info")
        .arg(arg!(-i --input <PATH> "input path").required(true))
        .about("show size statistics of a compressed bitmap"));

    let matches = main_cmd.get_matches();

    if let Some(cmd) = matches.subcommand_matches("build") {
        let path_in = cmd.get_one::<String>("input").expect(RCH);
        let path_out = cmd.get_one::<String>("output").expect(RCH);
        let mut e = EwahBitmap::new();
        for line in std::fs::read_to_string(path_in)?.lines() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            let pos = line.parse::<usize>()?;
            if pos < e.size_in_bits() {
                eprintln!("positions must be strictly increasing");
                return Err(Box::new(std::fmt::Error));
            }
            e.set(pos);
        }
        let mut out_file = std::fs::File::create(path_out)?;
        let bytes = e.serialize(&mut out_file)?;
        log::info!("wrote {} bytes",bytes);
    }

    if let Some(cmd) = matches.subcommand_matches("dump") {
        let path_in = cmd.get_one::<String>("input").expect(RCH);
        let e = load(path_in)?;
        let stdout = std::io::stdout();
        let mut writer = std::io::BufWriter::new(stdout.lock());
        for pos in e.ones() {
            writeln!(writer,"{}",pos)?;
        }
        writer.flush()?;
    }

    if let Some(cmd) = matches.subcommand_matches("combine") {
        let method = cmd.get_one::<String>("method").expect(RCH);
        let path_a = cmd.get_one::<String>("lhs").expect(RCH);
        let path_b = cmd.get_one::<String>("rhs").expect(RCH);
        let path_out = cmd.get_one::<String>("output").expect(RCH);
        let a = load(path_a)?;
        let b = load(path_b)?;
        let result = match method.as_str() {
            "and" => a.and(&b),
            "or" => a.or(&b),
            "xor" => a.xor(&b),
            "and-not" => a.and_not(&b),
            _ => {
                eprintln!("{} not supported",method);
                return Err(Box::new(std::fmt::Error));
            }
        };
        let mut out_file = std::fs::File::create(path_out)?;
        result.serialize(&mut out_file)?;
    }

    if let Some(cmd) = matches.subcommand_matches("info") {
        let path_in = cmd.get_one::<String>("input").expect(RCH);
        let e = load(path_in)?;
        println!("bits: {}",e.size_in_bits());
        println!("compressed words: {}",e.buffer_len());
        println!("set bits: {}",e.ones().count());
    }

    Ok(())
}
