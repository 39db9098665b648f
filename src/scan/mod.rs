//! Extraction of patterns from font files.

mod face;
mod heuristics;
mod names;
mod sfnt;

pub use face::{
    BdfProperty, Charmap, Encoding, Face, FaceSummary, Loader, NameRecord, NamedInstance, Os2,
    StringId, Tag, VariationAxis, Variations,
};
pub use sfnt::{CffLoader, SfntFace, TrueTypeLoader};

use super::charset::Charset;
use super::constants::*;
use super::error::Result;
use super::lang::{Langset, CODE_PAGE_LANGS};
use super::object::Object;
use super::pattern::Pattern;
use super::text::eq_ignore_blanks_and_case;
use super::value::Range;
use names::*;
use std::path::Path;

/// Value of the upper 16 bits of a face id that selects the variable font
/// as a whole rather than a named instance.
pub const VARIABLE_FONT: u32 = 0x8000;

const WGHT: Tag = Tag::new(b"wght");
const WDTH: Tag = Tag::new(b"wdth");
const OPSZ: Tag = Tag::new(b"opsz");

/// Characters replaced by `-` when deriving a PostScript name.
const POSTSCRIPT_INVALID: &[char] = &[
    '\x04', '(', ')', '/', '<', '>', '[', ']', '{', '}', '\t', '\x0c', '\r', '\n', ' ',
];

/// Turns font files into patterns using a list of format loaders.
pub struct Scanner {
    loaders: Vec<Box<dyn Loader>>,
}

impl Default for Scanner {
    fn default() -> Self {
        Self::new()
    }
}

impl Scanner {
    /// Creates a scanner for sfnt fonts with TrueType or CFF outlines.
    pub fn new() -> Self {
        Self::with_loaders(vec![Box::new(TrueTypeLoader), Box::new(CffLoader)])
    }

    /// Creates a scanner that tries `loaders` in order.
    pub fn with_loaders(loaders: Vec<Box<dyn Loader>>) -> Self {
        Self { loaders }
    }

    /// Returns patterns for every face, named instance and variable font in
    /// `data`.
    ///
    /// Data that no loader recognizes yields no patterns.
    pub fn scan(&self, data: &[u8], file: &str) -> Vec<Pattern> {
        for loader in &self.loaders {
            let faces = match loader.load(data) {
                Ok(faces) => faces,
                Err(e) => {
                    log::trace!("{file}: {} loader: {e}", loader.format());
                    continue;
                }
            };
            let mut patterns = Vec::new();
            for (face_num, face) in faces.iter().enumerate() {
                scan_face(face.as_ref(), file, face_num as u32, loader.format(), &mut patterns);
            }
            return patterns;
        }
        log::debug!("{file}: not recognized by any loader");
        Vec::new()
    }

    /// Memory maps the file at `path` and scans it.
    pub fn scan_file(&self, path: impl AsRef<Path>) -> Result<Vec<Pattern>> {
        let path = path.as_ref();
        let file = std::fs::File::open(path)?;
        // SAFETY: the mapping is only read during this call. Concurrent
        // truncation of the file is not guarded against.
        let data = unsafe { memmap2::Mmap::map(&file)? };
        Ok(self.scan(&data, &path.to_string_lossy()))
    }
}

fn scan_face(face: &dyn Face, file: &str, face_num: u32, format: &str, out: &mut Vec<Pattern>) {
    out.extend(query_face(face, file, face_num, format));
    let vars = face.variations();
    for (i, instance) in vars.instances.iter().enumerate() {
        let is_default = vars
            .axes
            .iter()
            .zip(&instance.coords)
            .all(|(axis, coord)| axis.default == *coord);
        if is_default {
            continue;
        }
        let id = ((i as u32 + 1) << 16) | face_num;
        out.extend(query_face(face, file, id, format));
    }
    if !vars.is_empty() {
        out.extend(query_face(face, file, (VARIABLE_FONT << 16) | face_num, format));
    }
}

/// Builds the pattern for one face, named instance or variable font.
///
/// The low 16 bits of `id` select the face and the upper bits the named
/// instance plus one, or [`VARIABLE_FONT`]. Returns `None` for faces
/// without usable coverage and for ids that select nothing.
pub fn query_face(face: &dyn Face, file: &str, id: u32, format: &str) -> Option<Pattern> {
    let instance_num = id >> 16;
    let vars = face.variations();
    let variable = instance_num == VARIABLE_FONT;
    let instance = match instance_num {
        0 | VARIABLE_FONT => None,
        n => Some(vars.instances.get(n as usize - 1)?),
    };
    let summary = face.summary();
    let mut pat = Pattern::new();

    let mut weight: Option<f64> = None;
    let mut width: Option<f64> = None;
    let mut has_weight = false;
    let mut has_width = false;
    let mut has_size = false;
    let mut weight_mult = 1.0;
    let mut width_mult = 1.0;
    if variable {
        for axis in &vars.axes {
            if !(axis.min <= axis.default && axis.default <= axis.max && axis.min != axis.max) {
                continue;
            }
            if axis.tag == WGHT {
                let (Some(min), Some(max)) =
                    (weight_from_opentype(axis.min), weight_from_opentype(axis.max))
                else {
                    continue;
                };
                pat.add(Object::WEIGHT, Range::new(min, max), true);
                has_weight = true;
            } else if axis.tag == WDTH {
                pat.add(Object::WIDTH, Range::new(axis.min, axis.max), true);
                has_width = true;
            } else if axis.tag == OPSZ {
                pat.add(Object::SIZE, Range::new(axis.min, axis.max), true);
                has_size = true;
            }
        }
        if !(has_weight || has_width || has_size) {
            log::debug!("{file}: variable font {id:#x} has no usable axes");
            return None;
        }
    } else if let Some(instance) = instance {
        for (axis, coord) in vars.axes.iter().zip(&instance.coords) {
            if axis.tag == WGHT && axis.default != 0.0 {
                weight_mult = coord / axis.default;
            } else if axis.tag == WDTH && axis.default != 0.0 {
                width_mult = coord / axis.default;
            } else if axis.tag == OPSZ {
                pat.add(Object::SIZE, *coord, true);
                has_size = true;
            }
        }
    }

    let names = Names::new(face.names());
    let mut notice = None;
    for platform in PLATFORM_ORDER {
        for name_id in NAME_ORDER {
            let lookup_id = match name_id {
                NAME_FULL | NAME_MAC_FULL if variable || instance.is_some() => continue,
                NAME_WWS_SUBFAMILY | NAME_TYPOGRAPHIC_SUBFAMILY | NAME_SUBFAMILY if variable => {
                    continue
                }
                NAME_WWS_SUBFAMILY | NAME_TYPOGRAPHIC_SUBFAMILY if instance.is_some() => continue,
                NAME_SUBFAMILY => match instance {
                    Some(instance) => instance.subfamily_name_id.0,
                    None => name_id,
                },
                _ => name_id,
            };
            for record in names.find(platform, lookup_id) {
                let Some(text) = decode(record) else {
                    continue;
                };
                let lang = language(record);
                match name_id {
                    NAME_WWS_FAMILY | NAME_TYPOGRAPHIC_FAMILY | NAME_FAMILY => {
                        add_name(&mut pat, Object::FAMILY, Object::FAMILY_LANG, text, lang)
                    }
                    NAME_MAC_FULL | NAME_FULL => {
                        add_name(&mut pat, Object::FULLNAME, Object::FULLNAME_LANG, text, lang)
                    }
                    NAME_WWS_SUBFAMILY | NAME_TYPOGRAPHIC_SUBFAMILY | NAME_SUBFAMILY => {
                        add_name(&mut pat, Object::STYLE, Object::STYLE_LANG, text, lang)
                    }
                    _ => {
                        if notice.is_none() {
                            notice = notice_foundry(&text);
                        }
                    }
                }
            }
        }
    }

    if !pat.contains(Object::FAMILY) {
        let family = summary.family.clone().or_else(|| {
            Path::new(file)
                .file_stem()
                .and_then(|stem| stem.to_str())
                .map(str::to_owned)
        });
        if let Some(family) = family {
            add_name(&mut pat, Object::FAMILY, Object::FAMILY_LANG, family, "en");
        }
    }
    if !variable && !pat.contains(Object::STYLE) {
        if let Some(style) = summary.style.clone() {
            add_name(&mut pat, Object::STYLE, Object::STYLE_LANG, style, "en");
        }
    }
    if !variable && !pat.contains(Object::FULLNAME) {
        add_fullname(&mut pat);
    }

    pat.add(Object::FILE, file, true);
    pat.add(Object::INDEX, id as i32, true);

    let postscript = match instance {
        Some(instance) => instance
            .postscript_name_id
            .and_then(|name_id| names.first(name_id.0)),
        None => names.first(NAME_POSTSCRIPT).or_else(|| face.postscript_name()),
    }
    .or_else(|| derive_postscript_name(&pat));
    if let Some(postscript) = postscript {
        pat.add(Object::POSTSCRIPT_NAME, postscript, true);
    }

    let os2 = face.os2();
    let mut foundry = os2
        .filter(|os2| os2.version >= 1)
        .and_then(|os2| vendor_foundry(&os2.vendor_id))
        .or_else(|| notice.map(str::to_owned));
    let mut exclusive_lang = None;
    if let Some(os2) = &os2 {
        if os2.version >= 1 {
            exclusive_lang = code_page_lang(os2.code_page_range[0]);
        }
        if !has_weight && os2.weight_class != 0 {
            weight = weight_from_opentype(os2.weight_class as f64 * weight_mult);
        }
        if !has_width {
            width = width_from_class(os2.width_class).map(|w| w as f64 * width_mult);
        }
        let has_opsz_axis = vars.axis(OPSZ).is_some();
        if !has_size && !has_opsz_axis {
            if let Some((lower, upper)) = os2.optical_point_size.filter(|(_, upper)| *upper != 0) {
                let (lower, upper) = (lower as f64 / 20.0, upper as f64 / 20.0);
                if lower == upper {
                    pat.add(Object::SIZE, lower, true);
                } else {
                    pat.add(Object::SIZE, Range::new(lower, upper), true);
                }
            }
        }
    }

    let styles: Vec<String> = pat
        .get(Object::STYLE)
        .map(|list| list.values().filter_map(|v| v.as_str()).map(str::to_owned).collect())
        .unwrap_or_default();
    let mut slant = None;
    let mut decorative = false;
    for style in &styles {
        if weight.is_none() {
            weight = heuristics::weight(style).map(f64::from);
        }
        if width.is_none() {
            width = heuristics::width(style).map(f64::from);
        }
        if slant.is_none() {
            slant = heuristics::slant(style);
        }
        decorative |= heuristics::is_decorative(style);
    }

    if foundry.is_none() {
        foundry = face
            .bdf_property("FOUNDRY")
            .and_then(|p| p.as_atom().map(str::to_owned));
    }
    if width.is_none() {
        width = match face.bdf_property("RELATIVE_SETWIDTH").and_then(|p| p.as_integer()) {
            Some(value) => Some(heuristics::relative_setwidth(value) as f64),
            None => face
                .bdf_property("SETWIDTH_NAME")
                .and_then(|p| p.as_atom().and_then(heuristics::width))
                .map(f64::from),
        };
    }

    let slant = slant.unwrap_or(if summary.italic { SLANT_ITALIC } else { SLANT_ROMAN });
    pat.add(Object::SLANT, slant, true);
    if !has_weight {
        let default = if summary.bold { WEIGHT_BOLD } else { WEIGHT_MEDIUM };
        pat.add(Object::WEIGHT, weight.unwrap_or(default as f64), true);
    }
    if !has_width {
        pat.add(Object::WIDTH, width.unwrap_or(WIDTH_NORMAL as f64), true);
    }
    pat.add(Object::FOUNDRY, foundry.as_deref().unwrap_or("unknown"), true);

    let Some(charmap) = face.charmap() else {
        log::debug!("{file}: face {id:#x} has no usable character map");
        return None;
    };
    let symbol = charmap.encoding == Encoding::Symbol;
    let mut charset = Charset::new();
    for &(ch, _) in &charmap.mappings {
        charset.add_char(ch);
        if symbol && (0xF000..=0xF0FF).contains(&ch) {
            charset.add_char(ch - 0xF000);
        }
    }
    if charset.is_empty() {
        log::debug!("{file}: face {id:#x} maps no characters");
        return None;
    }

    let spacing = match face.bdf_property("SPACING").as_ref().and_then(BdfProperty::as_atom) {
        Some("C" | "c") => CHARCELL,
        Some("M" | "m") => MONO,
        Some("P" | "p") => PROPORTIONAL,
        _ => {
            let mut advances = charmap
                .mappings
                .iter()
                .filter_map(|&(_, glyph)| face.advance(glyph))
                .peekable();
            if advances.peek().is_some() {
                heuristics::spacing(advances)
            } else {
                PROPORTIONAL
            }
        }
    };
    if spacing != PROPORTIONAL {
        pat.add(Object::SPACING, spacing, true);
    }

    let mut langs = Langset::from_charset(&charset, exclusive_lang);
    if summary.color && langs.is_empty() {
        langs.add("und-zsye");
    }
    pat.add(Object::CHARSET, charset, true);
    pat.add(Object::LANG, langs, true);

    pat.add(Object::OUTLINE, summary.outline, true);
    pat.add(Object::SCALABLE, summary.scalable, true);
    pat.add(Object::COLOR, summary.color, true);
    pat.add(Object::SYMBOL, symbol, true);
    pat.add(Object::VARIABLE, variable, true);
    pat.add(Object::DECORATIVE, decorative, true);
    pat.add(Object::FONT_HAS_HINT, face.has_table(b"prep"), true);
    if let Some(revision) = face.font_revision() {
        pat.add(Object::FONT_VERSION, revision, true);
    }
    if let Some(capability) = capability(face) {
        pat.add(Object::CAPABILITY, capability, true);
    }
    pat.add(Object::FONT_FORMAT, format, true);
    if !summary.scalable {
        for size in &summary.strikes {
            pat.add(Object::PIXEL_SIZE, *size, true);
        }
    }
    Some(pat)
}

/// Adds a name and its language, keeping the language list aligned with
/// the names. Names already present, ignoring case and blanks, are
/// dropped.
fn add_name(pat: &mut Pattern, object: Object, lang_object: Object, name: String, lang: &str) {
    let count = match pat.get(object) {
        Some(list) => {
            let duplicate = list
                .values()
                .filter_map(|v| v.as_str())
                .any(|v| eq_ignore_blanks_and_case(v, &name));
            if duplicate {
                return;
            }
            list.len()
        }
        None => 0,
    };
    let langs = pat.get(lang_object).map_or(0, |list| list.len());
    for _ in langs..count {
        pat.add(lang_object, "und", true);
    }
    pat.add(object, name, true);
    pat.add(lang_object, lang, true);
}

/// Returns the English value of a name object, or the first one.
fn english_name(pat: &Pattern, object: Object, lang_object: Object) -> Option<String> {
    let list = pat.get(object)?;
    let index = pat
        .get(lang_object)
        .and_then(|langs| langs.values().position(|v| v.as_str() == Some("en")))
        .unwrap_or(0);
    let elt = list.get(index).or_else(|| list.first())?;
    elt.value.as_str().map(|s| s.trim().to_owned())
}

/// Replaces `FULLNAME` with the English family followed by the English
/// style, omitting a `Regular` style.
///
/// Returns false if the pattern has no family.
pub fn add_fullname(pat: &mut Pattern) -> bool {
    let Some(family) = english_name(pat, Object::FAMILY, Object::FAMILY_LANG) else {
        return false;
    };
    let full = match english_name(pat, Object::STYLE, Object::STYLE_LANG) {
        Some(style) if !style.is_empty() && !eq_ignore_blanks_and_case(&style, "Regular") => {
            format!("{family} {style}")
        }
        _ => family,
    };
    pat.del(Object::FULLNAME);
    pat.del(Object::FULLNAME_LANG);
    pat.add(Object::FULLNAME, full, true);
    pat.add(Object::FULLNAME_LANG, "en", true);
    true
}

fn derive_postscript_name(pat: &Pattern) -> Option<String> {
    let family = english_name(pat, Object::FAMILY, Object::FAMILY_LANG)?;
    Some(family.replace(POSTSCRIPT_INVALID, "-"))
}

/// Returns the language of the single code page bit set, if any.
fn code_page_lang(range: u32) -> Option<&'static str> {
    let mut langs = CODE_PAGE_LANGS
        .iter()
        .filter(|(bit, _)| range & (1 << *bit) != 0)
        .map(|(_, lang)| *lang);
    match (langs.next(), langs.next()) {
        (Some(lang), None) => Some(lang),
        _ => None,
    }
}

fn capability(face: &dyn Face) -> Option<String> {
    let mut caps = Vec::new();
    if face.has_table(b"Silf") {
        caps.push("ttable:Silf".to_owned());
    }
    caps.extend(face.script_tags().iter().map(|tag| format!("otlayout:{tag}")));
    (!caps.is_empty()).then(|| caps.join(" "))
}
