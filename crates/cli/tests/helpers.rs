use tether_cli::{hexdump, html_escape, parse_address, sha256_bytes};

#[test]
fn parse_address_accepts_hex_and_decimal() {
    assert_eq!(parse_address("0x1000").expect("hex"), 0x1000);
    assert_eq!(parse_address("0").expect("decimal"), 0);
    assert_eq!(parse_address("4096").expect("decimal"), 4096);
    assert!(parse_address("not-an-address").is_err());
    assert!(parse_address("").is_err());
}

#[test]
fn sha256_bytes_matches_known_vectors() {
    assert_eq!(
        sha256_bytes(b""),
        "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
    );
    assert_eq!(
        sha256_bytes(b"abc"),
        "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
    );
}

#[test]
fn html_escape_covers_markup_characters() {
    assert_eq!(html_escape("a < b && c > d"), "a &lt; b &amp;&amp; c &gt; d");
    assert_eq!(html_escape("plain"), "plain");
}

#[test]
fn hexdump_renders_offset_hex_and_glyph_columns() {
    let bytes: Vec<u8> = (0..16).collect();
    assert_eq!(
        hexdump(0, &bytes, false, false),
        "0x00000000  00 01 02 03 04 05 06 07 08 09 0a 0b 0c 0d 0e 0f  ................"
    );
}

#[test]
fn hexdump_shows_printable_text_and_row_addresses() {
    let mut bytes = b"Hello, tether!!!".to_vec();
    bytes.extend_from_slice(&[0u8; 4]);

    let dump = hexdump(0x1000, &bytes, false, false);
    let lines: Vec<&str> = dump.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].starts_with("0x00001000  "));
    assert!(lines[0].ends_with("Hello, tether!!!"));
    assert!(lines[1].starts_with("0x00001010  "));
    assert!(lines[1].ends_with("...."));
}

#[test]
fn hexdump_substitute_glyph_follows_utf8_flag() {
    let dump = hexdump(0, &[0x00], true, false);
    assert!(dump.ends_with('·'));

    let dump = hexdump(0, &[0x00], false, false);
    assert!(dump.ends_with('.'));
}

#[test]
fn hexdump_colors_only_the_address_column() {
    let dump = hexdump(0, &[0x41], false, true);
    assert!(dump.starts_with("\x1b[33m0x00000000\x1b[0m"));
    assert!(dump.contains("41"));
}
