use regex::{Captures, Regex};
use std::ops::Range;
use std::path::Path;
use std::sync::LazyLock;

use crate::extraction::ScannedDocument;
use crate::model::DocumentMetadata;

static SHEET_KIT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(\d+(?:\.\d+)?)\s*Sheet\(s\)\s*=\s*(\d+(?:\.\d+)?)\s*Kit\(s\)")
        .expect("sheet/kit pattern is valid")
});

static THICKNESS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)Thickness:\s*(\d+(?:\.\d+)?)\s*MM").expect("thickness pattern is valid")
});

static SCRAP: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)Scrap:\s*(\d+(?:\.\d+)?)\s*%").expect("scrap pattern is valid")
});

/// Material codes keyed by exact sheet thickness in millimetres.
const MATERIAL_CODES: [(f64, &str); 4] = [
    (15.0, "280040WNK"),
    (18.0, "280045WNK"),
    (12.0, "280090WNK"),
    (9.0, "280062"),
];

/// A value parsed out of free text, with the byte span it was read from.
#[derive(Debug, Clone, PartialEq)]
pub struct Matched<T> {
    pub value: T,
    pub span: Range<usize>,
}

/// Program identifier of a document: its file name without the extension.
pub fn program_name(filename: &str) -> String {
    Path::new(filename)
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| filename.to_string())
}

fn capture_f64(caps: &Captures<'_>, group: usize) -> Option<f64> {
    caps.get(group)?.as_str().parse().ok()
}

fn sheet_kit_from(caps: &Captures<'_>) -> Option<Matched<(f64, f64)>> {
    let whole = caps.get(0)?;
    Some(Matched {
        value: (capture_f64(caps, 1)?, capture_f64(caps, 2)?),
        span: whole.range(),
    })
}

/// Every "<n> Sheet(s) = <m> Kit(s)" statement, in document order.
pub fn find_all_sheet_kit(text: &str) -> Vec<Matched<(f64, f64)>> {
    SHEET_KIT
        .captures_iter(text)
        .filter_map(|caps| sheet_kit_from(&caps))
        .collect()
}

/// The first "<n> Sheet(s) = <m> Kit(s)" statement in the text.
pub fn find_sheet_kit(text: &str) -> Option<Matched<(f64, f64)>> {
    SHEET_KIT.captures(text).and_then(|caps| sheet_kit_from(&caps))
}

/// Sheet and kit counts of a document, both `None` when the text has no ratio.
pub fn extract_sheet_kit(full_text: &str) -> (Option<f64>, Option<f64>) {
    match find_sheet_kit(full_text) {
        Some(m) => (Some(m.value.0), Some(m.value.1)),
        None => (None, None),
    }
}

/// "Thickness: <n> MM" on a page.
pub fn find_thickness(page_text: &str) -> Option<Matched<f64>> {
    let caps = THICKNESS.captures(page_text)?;
    Some(Matched {
        value: capture_f64(&caps, 1)?,
        span: caps.get(0)?.range(),
    })
}

/// "Scrap: <n>%" on a page, kept as display text such as "12.5%".
pub fn find_scrap(page_text: &str) -> Option<Matched<String>> {
    let caps = SCRAP.captures(page_text)?;
    Some(Matched {
        value: format!("{}%", caps.get(1)?.as_str()),
        span: caps.get(0)?.range(),
    })
}

pub fn extract_thickness_scrap(page_text: &str) -> (Option<f64>, Option<String>) {
    (
        find_thickness(page_text).map(|m| m.value),
        find_scrap(page_text).map(|m| m.value),
    )
}

/// Material code for a sheet thickness. Only exact thicknesses match, so
/// 15.5 or 15.0000001 yield an empty code.
pub fn material_code(thickness: Option<f64>) -> &'static str {
    let Some(t) = thickness else {
        return "";
    };
    MATERIAL_CODES
        .iter()
        .find(|(mm, _)| *mm == t)
        .map(|(_, code)| *code)
        .unwrap_or("")
}

/// Derive the document-wide scalars of one scanned document.
///
/// Thickness comes from the first page that states one. Scrap is read from
/// pages 1 and 2 only.
pub fn extract_metadata(filename: &str, doc: &ScannedDocument) -> DocumentMetadata {
    let (sheet, kit) = extract_sheet_kit(&doc.full_text());

    let mut metadata = DocumentMetadata {
        program: program_name(filename),
        sheet,
        kit,
        page_count: doc.page_count(),
        ..Default::default()
    };

    for (idx, page) in doc.pages.iter().enumerate() {
        let (thickness, scrap) = extract_thickness_scrap(&page.text);
        if metadata.thickness.is_none() {
            metadata.thickness = thickness;
        }
        match idx {
            0 => metadata.scrap_sheet1 = scrap,
            1 => metadata.scrap_sheet2 = scrap,
            _ => {}
        }
    }

    metadata
}
