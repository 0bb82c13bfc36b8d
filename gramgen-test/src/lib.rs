#![cfg_attr(not(test), allow(dead_code, unused_imports))]

include!(concat!(env!("OUT_DIR"), "/block.rs"));
include!(concat!(env!("OUT_DIR"), "/choice.rs"));
include!(concat!(env!("OUT_DIR"), "/repeat.rs"));

#[test]
fn choice_picks_exactly_one_alternative() {
    let mut seen_heads = false;
    let mut seen_tails = false;

    for _ in 0..64 {
        let out = choice::Gen::new().generate();

        match out.trim_end() {
            "heads" => seen_heads = true,
            "tails" => seen_tails = true,
            other => panic!("unexpected program: {:?}", other),
        }
    }

    assert!(seen_heads);
    assert!(seen_tails);
}

#[test]
fn repetition_respects_its_bounds() {
    for _ in 0..64 {
        let out = repeat::Gen::new().generate();

        let xs = out.matches('x').count();
        let ys = out.matches('y').count();

        assert!((1..=3).contains(&xs), "{:?}", out);
        assert!(ys <= 2, "{:?}", out);
        assert!(out.ends_with("end "), "{:?}", out);
    }
}

#[test]
fn blocks_indent_their_bodies() {
    let mut seen_number = false;
    let mut seen_string = false;

    for _ in 0..64 {
        let out = block::Gen::new().generate();

        // the leading conditional guarantees a keyword, an assignment and
        // one indented line
        assert!(out.starts_with("if "), "{:?}", out);
        assert!(out.contains('='), "{:?}", out);
        assert!(out.contains("\n    "), "{:?}", out);

        if out.chars().any(|ch| ch.is_ascii_digit()) {
            seen_number = true;
        }
        if out.contains('"') {
            seen_string = true;
        }
    }

    assert!(seen_number);
    assert!(seen_string);
}
