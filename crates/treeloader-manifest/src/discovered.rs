//! Script discovery in a mod's `index.html`.
//!
//! Tags are found by HTML rules, not XML ones: a `<` opens a tag only when a
//! letter (or `/` and a letter) follows, so template text like
//! `{{ points < 10 }}` stays text. Comments, doctypes and the bodies of raw
//! text elements are skipped. Attributes go through `quick-xml`'s HTML
//! attribute rules, which accept unquoted and valueless attributes.

use std::collections::HashSet;

use quick_xml::events::BytesStart;
use tracing::{debug, trace};

const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param", "source",
    "track", "wbr",
];

/// Elements whose content is text up to their own end tag.
const RAW_TEXT_ELEMENTS: &[&str] = &["script", "style", "textarea", "title"];

/// Closing one of these also closes an unterminated content region.
const REGION_BOUNDARIES: &[&str] = &["body", "html"];

/// What a discovered document declares.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DiscoveredDocument {
    /// Script sources before the sentinel, in document order.
    pub before: Vec<String>,
    /// Script sources after the sentinel, in document order.
    pub after: Vec<String>,
    /// Whether the sentinel declaration was present.
    pub sentinel_found: bool,
    /// Inner markup of the content region, verbatim.
    pub content: Option<String>,
}

impl DiscoveredDocument {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.before.is_empty() && self.after.is_empty()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum TagKind {
    Open,
    Close,
}

/// One tag; `start` is the offset of its `<`, `end` the offset past its `>`.
struct Tag<'a> {
    kind: TagKind,
    name: &'a str,
    element: BytesStart<'a>,
    self_closing: bool,
    start: usize,
    end: usize,
}

impl Tag<'_> {
    fn is(&self, name: &str) -> bool {
        self.name.eq_ignore_ascii_case(name)
    }

    fn is_open(&self) -> bool {
        self.kind == TagKind::Open
    }

    /// Whether the element has no content and no end tag.
    fn is_void(&self) -> bool {
        self.self_closing || VOID_ELEMENTS.iter().any(|void| self.is(void))
    }

    fn attribute(&self, name: &str) -> Option<String> {
        self.element
            .html_attributes()
            .flatten()
            .find(|attr| attr.key.as_ref().eq_ignore_ascii_case(name.as_bytes()))
            .map(|attr| String::from_utf8_lossy(&attr.value).into_owned())
    }
}

/// The tags of an HTML document, in order.
struct Tags<'a> {
    html: &'a str,
    position: usize,
}

impl<'a> Tags<'a> {
    fn new(html: &'a str) -> Self {
        Self { html, position: 0 }
    }

    /// Move past the first `terminator` at or after `start`, or to the end.
    fn skip_past(&mut self, start: usize, terminator: &str) {
        self.position = self.html[start..]
            .find(terminator)
            .map_or(self.html.len(), |offset| start + offset + terminator.len());
    }
}

impl<'a> Iterator for Tags<'a> {
    type Item = Tag<'a>;

    fn next(&mut self) -> Option<Tag<'a>> {
        let html = self.html;
        loop {
            let start = self.position + html.get(self.position..)?.find('<')?;
            let rest = &html[start..];

            if rest.starts_with("<!--") {
                self.skip_past(start + 4, "-->");
                continue;
            }
            if rest.starts_with("<!") || rest.starts_with("<?") {
                self.skip_past(start, ">");
                continue;
            }

            let (kind, name_start) = if rest.starts_with("</") {
                (TagKind::Close, start + 2)
            } else {
                (TagKind::Open, start + 1)
            };
            if !html
                .as_bytes()
                .get(name_start)
                .is_some_and(u8::is_ascii_alphabetic)
            {
                // A stray `<` is text.
                self.position = start + 1;
                continue;
            }

            let name_len = html[name_start..]
                .find(|c: char| c.is_ascii_whitespace() || c == '/' || c == '>')
                .unwrap_or(html.len() - name_start);
            let Some(close) = tag_end(html, name_start + name_len) else {
                self.position = html.len();
                return None;
            };

            let inner = &html[name_start..close];
            let self_closing = inner.ends_with('/');
            let content = inner.strip_suffix('/').unwrap_or(inner);
            let tag = Tag {
                kind,
                name: &html[name_start..name_start + name_len],
                element: BytesStart::from_content(content, name_len.min(content.len())),
                self_closing,
                start,
                end: close + 1,
            };

            self.position = tag.end;
            if tag.is_open() && !self_closing && RAW_TEXT_ELEMENTS.iter().any(|raw| tag.is(raw)) {
                self.position = raw_text_end(html, tag.end, tag.name);
            }
            return Some(tag);
        }
    }
}

/// Offset of the `>` ending a tag whose attributes start at `from`.
fn tag_end(html: &str, from: usize) -> Option<usize> {
    let mut quote = None;
    for (offset, &byte) in html.as_bytes().get(from..)?.iter().enumerate() {
        match (quote, byte) {
            (None, b'"' | b'\'') => quote = Some(byte),
            (Some(open), _) if open == byte => quote = None,
            (None, b'>') => return Some(from + offset),
            _ => {}
        }
    }
    None
}

/// Offset of the end tag closing raw text `name` that starts at `from`.
fn raw_text_end(html: &str, from: usize, name: &str) -> usize {
    let needle = format!("</{}", name.to_ascii_lowercase());
    html.get(from..)
        .and_then(|rest| rest.to_ascii_lowercase().find(&needle))
        .map_or(html.len(), |offset| from + offset)
}

struct RegionScan<'a> {
    name: &'a str,
    start: usize,
    depth: usize,
}

/// Extract the script declarations and content region of `html`.
///
/// Only `<script src>` values below `prefix` are kept (a leading `./` is
/// ignored). The `sentinel` source splits them into `before` and `after` and
/// is itself dropped; repeated sources keep their first position.
///
/// The content region ends at the end tag matching its own element. End tags
/// the markup leaves out are implied the way a browser implies them: the
/// region closes with `</body>`, or at the end of the document.
#[must_use]
pub fn parse_document(
    html: &str,
    prefix: &str,
    sentinel: &str,
    content_region: &str,
) -> DiscoveredDocument {
    let mut document = DiscoveredDocument::default();
    let mut seen = HashSet::new();
    let mut region: Option<RegionScan<'_>> = None;

    for tag in Tags::new(html) {
        if let Some(scan) = region.as_mut() {
            match tag.kind {
                TagKind::Open if tag.is(scan.name) && !tag.is_void() => scan.depth += 1,
                TagKind::Close if tag.is(scan.name) => scan.depth -= 1,
                TagKind::Close if REGION_BOUNDARIES.iter().any(|name| tag.is(name)) => {
                    scan.depth = 0;
                }
                _ => {}
            }
            if scan.depth == 0 {
                document.content = html.get(scan.start..tag.start).map(ToString::to_string);
                region = None;
            }
        } else if tag.is_open()
            && document.content.is_none()
            && tag.attribute("id").as_deref() == Some(content_region)
        {
            if tag.is_void() {
                document.content = Some(String::new());
            } else {
                region = Some(RegionScan {
                    name: tag.name,
                    start: tag.end,
                    depth: 1,
                });
            }
        }

        if tag.is_open() && tag.is("script") {
            declare(&tag, prefix, sentinel, &mut seen, &mut document);
        }
    }

    if let Some(scan) = region {
        debug!(content_region, "content region runs to the end of the document");
        document.content = html.get(scan.start..).map(ToString::to_string);
    }
    document
}

fn declare(
    tag: &Tag<'_>,
    prefix: &str,
    sentinel: &str,
    seen: &mut HashSet<String>,
    document: &mut DiscoveredDocument,
) {
    let Some(src) = tag.attribute("src") else {
        return;
    };
    let src = src.trim();
    let src = src.strip_prefix("./").unwrap_or(src);
    if !src.starts_with(prefix) {
        trace!(src, "script outside resource root, skipping");
        return;
    }

    if src == sentinel {
        document.sentinel_found = true;
    } else if seen.insert(src.to_string()) {
        if document.sentinel_found {
            document.after.push(src.to_string());
        } else {
            document.before.push(src.to_string());
        }
    }
}
