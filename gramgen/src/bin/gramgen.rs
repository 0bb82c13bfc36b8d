use gramgen::build_generator;
use std::path::PathBuf;
use std::{env, fs};

fn main() {
    let mut args = env::args();

    args.next();

    let filename = args.next().unwrap_or_else(|| {
        eprintln!("usage: gramgen GRAMMAR");
        std::process::exit(2);
    });

    let src = fs::read_to_string(&filename).expect("failed to read input");

    let path = PathBuf::from(filename);

    match build_generator(&src, path.file_stem().unwrap().to_str().unwrap()) {
        Ok(out) => println!("{}", out),
        Err(err) => {
            eprintln!("{}: {}", path.display(), err);
            std::process::exit(1);
        }
    }
}
