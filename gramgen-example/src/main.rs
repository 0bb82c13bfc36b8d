include!(concat!(env!("OUT_DIR"), "/toy.rs"));

fn main() {
    println!("{}", toy::Gen::new().generate());
}
