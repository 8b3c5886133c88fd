use std::fmt;
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipArchive, ZipWriter};

use occufill_grid::{Cell, Row, Sheet, Workbook};

pub const ODS_MIMETYPE: &str = "application/vnd.oasis.opendocument.spreadsheet";

#[derive(Debug)]
pub enum OdsError {
    Io(String),
    /// The zip container is unreadable or misses a required entry.
    Container(String),
    Xml(String),
}

impl fmt::Display for OdsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OdsError::Io(msg) => write!(f, "i/o error: {msg}"),
            OdsError::Container(msg) => write!(f, "bad ods container: {msg}"),
            OdsError::Xml(msg) => write!(f, "bad content.xml: {msg}"),
        }
    }
}

impl std::error::Error for OdsError {}

/// Load a workbook's cell text from an `.ods` file.
///
/// Only text content is read: the first `text:p` paragraph of each cell,
/// with `table:number-columns-repeated` carried through into
/// [`Cell::repeat`] rather than expanded. Styles, formulas and typed
/// values are ignored. Covered cells of merged ranges are kept as empty
/// cells so column positions stay accurate.
pub fn read_ods(path: &Path) -> Result<Workbook, OdsError> {
    let file = File::open(path)
        .map_err(|e| OdsError::Io(format!("cannot open {}: {e}", path.display())))?;
    let mut archive =
        ZipArchive::new(file).map_err(|e| OdsError::Container(e.to_string()))?;
    let mut content = String::new();
    archive
        .by_name("content.xml")
        .map_err(|e| OdsError::Container(format!("content.xml: {e}")))?
        .read_to_string(&mut content)
        .map_err(|e| OdsError::Io(e.to_string()))?;
    parse_content(&content)
}

/// Write `workbook` as a fresh minimal `.ods` file.
///
/// The `mimetype` entry comes first and uncompressed, as the container
/// format requires. Cells with `repeat > 1` are re-encoded as
/// `table:number-columns-repeated`, so an unexpanded workbook round-trips.
pub fn write_ods(path: &Path, workbook: &Workbook) -> Result<(), OdsError> {
    let file = File::create(path)
        .map_err(|e| OdsError::Io(format!("cannot create {}: {e}", path.display())))?;
    let mut zip = ZipWriter::new(file);

    let stored = SimpleFileOptions::default().compression_method(CompressionMethod::Stored);
    zip.start_file("mimetype", stored)
        .map_err(|e| OdsError::Container(e.to_string()))?;
    zip.write_all(ODS_MIMETYPE.as_bytes())
        .map_err(|e| OdsError::Io(e.to_string()))?;

    let deflated = SimpleFileOptions::default();
    zip.start_file("META-INF/manifest.xml", deflated)
        .map_err(|e| OdsError::Container(e.to_string()))?;
    zip.write_all(MANIFEST.as_bytes())
        .map_err(|e| OdsError::Io(e.to_string()))?;

    zip.start_file("content.xml", deflated)
        .map_err(|e| OdsError::Container(e.to_string()))?;
    zip.write_all(render_content(workbook).as_bytes())
        .map_err(|e| OdsError::Io(e.to_string()))?;

    zip.finish().map_err(|e| OdsError::Container(e.to_string()))?;
    Ok(())
}

const MANIFEST: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<manifest:manifest xmlns:manifest="urn:oasis:names:tc:opendocument:xmlns:manifest:1.0" manifest:version="1.2">
 <manifest:file-entry manifest:full-path="/" manifest:media-type="application/vnd.oasis.opendocument.spreadsheet"/>
 <manifest:file-entry manifest:full-path="content.xml" manifest:media-type="text/xml"/>
</manifest:manifest>
"#;

pub(crate) fn parse_content(xml: &str) -> Result<Workbook, OdsError> {
    let mut reader = Reader::from_reader(xml.as_bytes());
    let mut buf = Vec::new();

    let mut workbook = Workbook::new();
    let mut sheet: Option<Sheet> = None;
    let mut row: Option<Row> = None;
    // In-progress cell, when between a cell start and its end tag.
    let mut cell: Option<(String, usize)> = None;
    // Paragraph count inside the current cell; only the first one's text
    // is kept, matching how the workbook stores a plain value.
    let mut paragraphs = 0usize;

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => match e.name().as_ref() {
                b"table:table" => {
                    sheet = Some(Sheet::new(attr_string(e, b"table:name")));
                }
                b"table:table-row" => {
                    row = Some(Row::default());
                }
                b"table:table-cell" | b"table:covered-table-cell" => {
                    cell = Some((String::new(), repeat_attr(e)));
                    paragraphs = 0;
                }
                b"text:p" => {
                    if cell.is_some() {
                        paragraphs += 1;
                    }
                }
                _ => {}
            },
            Ok(Event::Empty(ref e)) => match e.name().as_ref() {
                b"table:table-cell" | b"table:covered-table-cell" => {
                    if let Some(row) = row.as_mut() {
                        row.cells.push(Cell::repeated("", repeat_attr(e)));
                    }
                }
                b"table:table-row" => {
                    if let Some(sheet) = sheet.as_mut() {
                        sheet.rows.push(Row::default());
                    }
                }
                b"text:p" => {
                    if cell.is_some() {
                        paragraphs += 1;
                    }
                }
                b"text:s" => {
                    if let Some((text, _)) = cell.as_mut() {
                        if paragraphs == 1 {
                            let count = attr_usize(e, b"text:c").unwrap_or(1);
                            text.extend(std::iter::repeat(' ').take(count));
                        }
                    }
                }
                b"text:tab" => {
                    if let Some((text, _)) = cell.as_mut() {
                        if paragraphs == 1 {
                            text.push('\t');
                        }
                    }
                }
                _ => {}
            },
            Ok(Event::Text(ref t)) => {
                if let Some((text, _)) = cell.as_mut() {
                    if paragraphs == 1 {
                        let piece = t.decode().map_err(|e| OdsError::Xml(e.to_string()))?;
                        text.push_str(&piece);
                    }
                }
            }
            // Entity and character references in text arrive as their own
            // events since quick-xml 0.37.
            Ok(Event::GeneralRef(ref r)) => {
                if let Some((text, _)) = cell.as_mut() {
                    if paragraphs == 1 {
                        let resolved = r
                            .resolve_char_ref()
                            .map_err(|e| OdsError::Xml(e.to_string()))?;
                        if let Some(c) = resolved {
                            text.push(c);
                        } else {
                            let name: &[u8] = r;
                            match name {
                                b"amp" => text.push('&'),
                                b"lt" => text.push('<'),
                                b"gt" => text.push('>'),
                                b"quot" => text.push('"'),
                                b"apos" => text.push('\''),
                                _ => {}
                            }
                        }
                    }
                }
            }
            Ok(Event::End(ref e)) => match e.name().as_ref() {
                b"table:table-cell" | b"table:covered-table-cell" => {
                    if let (Some(row), Some((text, repeat))) = (row.as_mut(), cell.take()) {
                        row.cells.push(Cell::repeated(text, repeat));
                    }
                }
                b"table:table-row" => {
                    if let (Some(sheet), Some(row)) = (sheet.as_mut(), row.take()) {
                        sheet.rows.push(row);
                    }
                }
                b"table:table" => {
                    if let Some(sheet) = sheet.take() {
                        workbook.sheets.push(sheet);
                    }
                }
                _ => {}
            },
            Ok(Event::Eof) => break,
            Err(e) => return Err(OdsError::Xml(e.to_string())),
            _ => {}
        }
        buf.clear();
    }

    Ok(workbook)
}

fn attr_string(e: &BytesStart<'_>, key: &[u8]) -> String {
    for attr in e.attributes().flatten() {
        if attr.key.as_ref() == key {
            if let Ok(value) = attr.unescape_value() {
                return value.into_owned();
            }
        }
    }
    String::new()
}

fn attr_usize(e: &BytesStart<'_>, key: &[u8]) -> Option<usize> {
    for attr in e.attributes().flatten() {
        if attr.key.as_ref() == key {
            return std::str::from_utf8(&attr.value).ok()?.parse().ok();
        }
    }
    None
}

fn repeat_attr(e: &BytesStart<'_>) -> usize {
    attr_usize(e, b"table:number-columns-repeated")
        .unwrap_or(1)
        .max(1)
}

pub(crate) fn render_content(workbook: &Workbook) -> String {
    let mut out = String::new();
    out.push_str(r#"<?xml version="1.0" encoding="UTF-8"?>"#);
    out.push('\n');
    out.push_str(concat!(
        r#"<office:document-content"#,
        r#" xmlns:office="urn:oasis:names:tc:opendocument:xmlns:office:1.0""#,
        r#" xmlns:table="urn:oasis:names:tc:opendocument:xmlns:table:1.0""#,
        r#" xmlns:text="urn:oasis:names:tc:opendocument:xmlns:text:1.0""#,
        r#" office:version="1.2">"#,
        r#"<office:body><office:spreadsheet>"#,
    ));
    for sheet in &workbook.sheets {
        out.push_str(&format!(
            r#"<table:table table:name="{}">"#,
            escape_xml(&sheet.name)
        ));
        for row in &sheet.rows {
            out.push_str("<table:table-row>");
            for cell in &row.cells {
                let repeat = if cell.repeat > 1 {
                    format!(r#" table:number-columns-repeated="{}""#, cell.repeat)
                } else {
                    String::new()
                };
                if cell.text.is_empty() {
                    out.push_str(&format!("<table:table-cell{repeat}/>"));
                } else {
                    out.push_str(&format!(
                        r#"<table:table-cell{repeat} office:value-type="string"><text:p>{}</text:p></table:table-cell>"#,
                        escape_xml(&cell.text)
                    ));
                }
            }
            out.push_str("</table:table-row>");
        }
        out.push_str("</table:table>");
    }
    out.push_str("</office:spreadsheet></office:body></office:document-content>");
    out
}

fn escape_xml(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}
