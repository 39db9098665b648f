use fontconf::constants::{WEIGHT_BOLD, WEIGHT_REGULAR};
use fontconf::scan::add_fullname;
use fontconf::{
    lang_compare, Config, Directive, Edit, EditOp, Expr, FontSet, LangResult, MatchKind, Object,
    Opcode, Pattern, RuleSet, Scanner, Test,
};

fn be(values: &[u16]) -> Vec<u8> {
    values.iter().flat_map(|v| v.to_be_bytes()).collect()
}

/// Assembles an sfnt from `(tag, data)` pairs.
fn sfnt(mut tables: Vec<(&[u8; 4], Vec<u8>)>) -> Vec<u8> {
    tables.sort_by(|a, b| a.0.cmp(b.0));
    let mut out = 0x0001_0000u32.to_be_bytes().to_vec();
    out.extend(be(&[tables.len() as u16, 0, 0, 0]));
    let mut offset = 12 + 16 * tables.len();
    for (tag, data) in &tables {
        out.extend_from_slice(*tag);
        out.extend_from_slice(&0u32.to_be_bytes());
        out.extend_from_slice(&(offset as u32).to_be_bytes());
        out.extend_from_slice(&(data.len() as u32).to_be_bytes());
        offset += (data.len() + 3) & !3;
    }
    for (_, data) in &tables {
        out.extend_from_slice(data);
        out.resize((out.len() + 3) & !3, 0);
    }
    out
}

/// Windows cmap with one format 4 segment mapping `start..=end`.
fn cmap(encoding: u16, start: u16, end: u16) -> Vec<u8> {
    let mut out = be(&[0, 1, 3, encoding]);
    out.extend_from_slice(&12u32.to_be_bytes());
    out.extend(be(&[4, 32, 0, 4, 0, 0, 0]));
    out.extend(be(&[end, 0xFFFF, 0, start, 0xFFFF, 1u16.wrapping_sub(start), 1, 0, 0]));
    out
}

/// English Windows name table with family and subfamily names.
fn name(family: &str, style: &str) -> Vec<u8> {
    let strings: Vec<Vec<u8>> = [family, style]
        .iter()
        .map(|s| s.encode_utf16().flat_map(|u| u.to_be_bytes()).collect())
        .collect();
    let mut out = be(&[0, 2, 6 + 2 * 12]);
    let mut offset = 0;
    for (id, bytes) in strings.iter().enumerate() {
        out.extend(be(&[3, 1, 0x409, id as u16 + 1, bytes.len() as u16, offset]));
        offset += bytes.len() as u16;
    }
    out.extend(strings.concat());
    out
}

fn os2(weight_class: u16) -> Vec<u8> {
    let mut data = vec![0; 96];
    data[..2].copy_from_slice(&4u16.to_be_bytes());
    data[4..6].copy_from_slice(&weight_class.to_be_bytes());
    data[6..8].copy_from_slice(&5u16.to_be_bytes());
    data
}

#[test]
fn language_territories() {
    assert_eq!(lang_compare("ku-am", "ku-iq"), LangResult::DifferentCountry);
    assert_eq!(lang_compare("pap-an", "pap-aw"), LangResult::DifferentCountry);
    assert_eq!(lang_compare("en", "fr"), LangResult::DifferentLang);
}

#[test]
fn cache_preserves_hash() {
    let mut pat = Pattern::new();
    pat.add(Object::FAMILY, "Foo\0", true);
    pat.add(Object::FAMILY, "Bar\0", true);
    pat.add(Object::SIZE, 0, true);
    pat.add(Object::WEIGHT, 0, true);
    let mut set = FontSet::new();
    set.push(pat.clone());

    let mut buf = Vec::new();
    set.dump(&mut buf).unwrap();
    let loaded = FontSet::load(&buf[..]).unwrap();
    assert_eq!(loaded.len(), 1);
    assert_eq!(loaded.get(0).unwrap().hash(), pat.hash());
}

#[test_log::test]
fn weight_from_os2() {
    let data = sfnt(vec![
        (b"cmap", cmap(1, 0x20, 0x7E)),
        (b"name", name("Test Sans", "Regular")),
        (b"OS/2", os2(700)),
    ]);
    let fonts = Scanner::new().scan(&data, "test.ttf");
    assert_eq!(fonts.len(), 1);
    let font = &fonts[0];
    assert_eq!(font.get_float(Object::WEIGHT, 0), Ok(WEIGHT_BOLD as f64));
    assert_eq!(font.get_string(Object::FAMILY, 0), Ok("Test Sans"));
    assert_eq!(font.get_string(Object::FONT_FORMAT, 0), Ok("TrueType"));

    let data = sfnt(vec![
        (b"cmap", cmap(1, 0x20, 0x7E)),
        (b"name", name("Test Sans", "Regular")),
    ]);
    let fonts = Scanner::new().scan(&data, "test.ttf");
    assert_eq!(fonts[0].get_float(Object::WEIGHT, 0), Ok(WEIGHT_REGULAR as f64));
}

#[test_log::test]
fn append_family() {
    let mut rules = RuleSet::new("generic");
    rules
        .add(
            Directive::new(MatchKind::Query)
                .test(Test::new(Object::FAMILY, Opcode::Equal, Expr::value("sans-serif")))
                .edit(Edit::new(Object::FAMILY, EditOp::Append, Expr::value("DejaVu Sans"))),
        )
        .unwrap();
    let mut config = Config::new().with_default_langs(["en"]).with_prgname(None);
    config.add_rule_set(rules);

    let mut pat = Pattern::new();
    pat.add(Object::FAMILY, "sans-serif", true);
    config.substitute(&mut pat, None, MatchKind::Query);
    let families: Vec<_> = pat
        .get(Object::FAMILY)
        .unwrap()
        .values()
        .filter_map(|v| v.as_str())
        .collect();
    assert_eq!(families, ["sans-serif", "DejaVu Sans"]);
}

#[test]
fn symbol_font_coverage() {
    let data = sfnt(vec![
        (b"cmap", cmap(0, 0xF041, 0xF05A)),
        (b"name", name("Symbols", "Regular")),
    ]);
    let fonts = Scanner::new().scan(&data, "symbol.ttf");
    let charset = fonts[0].get_charset(Object::CHARSET, 0).unwrap();
    assert!(charset.has_char(0xF041));
    assert!(charset.has_char(0x41));
    assert!(!charset.has_char(0x61));
}

#[test]
fn synthesized_full_names() {
    for (style, expected) in [("Regular", "Arial"), ("Bold", "Arial Bold")] {
        let mut pat = Pattern::new();
        pat.add(Object::FAMILY, "Arial", true);
        pat.add(Object::STYLE, style, true);
        assert!(add_fullname(&mut pat));
        assert_eq!(pat.get_string(Object::FULLNAME, 0), Ok(expected));
    }
}
