//! XML markup recognition.
//!
//! Entered when the tokenizer sees `<`. The constructs of XML 1.0 (Fifth
//! Edition) are recognised as far as is useful for indexing, without
//! building a parser:
//!
//! | Input                  | Kind                          | Token text              |
//! |------------------------|-------------------------------|-------------------------|
//! | `<name a="v">`         | `XmlStartTag`                 | `name`                  |
//! | `<name a="v"/>`        | `XmlEmptyTag`                 | `name`                  |
//! | `</name>`              | `XmlEndTag`                   | `name`                  |
//! | `<?target data?>`      | `XmlProcessingInstruction`    | `target data`           |
//! | `<!-- text -->`        | `XmlComment`                  | ` text `                |
//! | `<!DOCTYPE ...>`       | `XmlDefinition`               | `DOCTYPE ...`           |
//! | `<![CDATA[ text ]]>`   | `XmlCdata`                    | ` text `                |
//! | `<![ INCLUDE [`        | `XmlConditional`              | ` INCLUDE `             |
//!
//! Attributes are skipped, not validated. Quoted attribute values are
//! stepped over so a `>` inside quotes does not end the tag.
//!
//! A conditional section only yields its head: everything after the inner
//! `[`, including the closing `]]>`, is left for the tokenizer to read as
//! ordinary content. An `IGNORE` section ends at the first `]]>` but an
//! `INCLUDE` section can span the rest of the document, and matching them
//! properly needs the DTD grammar.
//!
//! Anything that is not one of the above emits the `<` alone as `Other` and
//! the tokenizer re-reads the following byte on the next call. When a
//! terminator is missing the body runs to the end of the document.

use memchr::{memchr, memchr3, memmem};
use quire_types::TokenKind;

use super::ascii;
use super::buffer::TokenBuffer;
use super::unicode;

/// The construct that follows a `<`, decided from at most the next few
/// bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum MarkupKind {
    /// `<` NameStartChar
    Tag,
    /// `</` NameStartChar
    EndTag,
    /// `<?`
    ProcessingInstruction,
    /// `<!--`
    Comment,
    /// `<!` followed by an upper-case letter
    Definition,
    /// `<![CDATA[`
    Cdata,
    /// `<![`
    Conditional,
    /// A bare `<`.
    NotMarkup,
}

/// Decides what `<` at `lt` introduces. Order matters for the `<!` forms.
pub(crate) fn markup_kind(source: &[u8], lt: usize) -> MarkupKind {
    let after = lt + 1;
    let (codepoint, len) = unicode::decode_utf8(source, after);

    if len > 0 && unicode::is_xml_name_start(codepoint) {
        return MarkupKind::Tag;
    }

    match codepoint {
        0x2f => {
            let (next, next_len) = unicode::decode_utf8(source, after + 1);
            if next_len > 0 && unicode::is_xml_name_start(next) {
                MarkupKind::EndTag
            } else {
                MarkupKind::NotMarkup
            }
        }
        0x3f => MarkupKind::ProcessingInstruction,
        0x21 => {
            let rest = source.get(after + 1..).unwrap_or_default();
            if rest.starts_with(b"--") {
                MarkupKind::Comment
            } else if rest.first().is_some_and(|&b| ascii::is_upper(b)) {
                MarkupKind::Definition
            } else if rest.starts_with(b"[CDATA[") {
                MarkupKind::Cdata
            } else if rest.starts_with(b"[") {
                MarkupKind::Conditional
            } else {
                MarkupKind::NotMarkup
            }
        }
        _ => MarkupKind::NotMarkup,
    }
}

/// Reads the markup starting with the `<` at `lt`, writing the token text
/// to `out`. Returns the token kind and the cursor just past the construct
/// (never beyond `source.len()`, always beyond `lt`).
pub(crate) fn scan(source: &[u8], lt: usize, out: &mut TokenBuffer) -> (TokenKind, usize) {
    debug_assert_eq!(source.get(lt), Some(&b'<'));

    let after = lt + 1;
    match markup_kind(source, lt) {
        MarkupKind::Tag => tag(source, after, out),
        MarkupKind::EndTag => {
            let body = after + 1;
            let close = memchr(b'>', &source[body..]).map_or(source.len(), |i| body + i);
            (TokenKind::XmlEndTag, capture(source, body, close, 1, out))
        }
        MarkupKind::ProcessingInstruction => {
            let cursor = delimited(source, after + 1, b"?>", out);
            (TokenKind::XmlProcessingInstruction, cursor)
        }
        MarkupKind::Comment => {
            let cursor = delimited(source, after + 3, b"-->", out);
            (TokenKind::XmlComment, cursor)
        }
        MarkupKind::Definition => {
            let body = after + 1;
            let close = find_unquoted(source, body, b'>');
            (TokenKind::XmlDefinition, capture(source, body, close, 1, out))
        }
        MarkupKind::Cdata => {
            let cursor = delimited(source, after + 1 + b"[CDATA[".len(), b"]]>", out);
            (TokenKind::XmlCdata, cursor)
        }
        MarkupKind::Conditional => {
            let body = after + 2;
            let open = memchr(b'[', &source[body..]).map_or(source.len(), |i| body + i);
            (TokenKind::XmlConditional, capture(source, body, open, 1, out))
        }
        MarkupKind::NotMarkup => {
            out.push_byte(b'<');
            (TokenKind::Other, after)
        }
    }
}

/// `<name attr="..." ...>` or `<name .../>`, name starting at `name_start`.
fn tag(source: &[u8], name_start: usize, out: &mut TokenBuffer) -> (TokenKind, usize) {
    let (_, first_len) = unicode::decode_utf8(source, name_start);
    let mut name_end = name_start + first_len;
    loop {
        let (codepoint, len) = unicode::decode_utf8(source, name_end);
        if len == 0 || !unicode::is_xml_name_char(codepoint) {
            break;
        }
        name_end += len;
    }

    let close = find_unquoted(source, name_end, b'>');
    let kind = if close > 0 && source[close - 1] == b'/' {
        TokenKind::XmlEmptyTag
    } else {
        TokenKind::XmlStartTag
    };

    out.write_if_room(&source[name_start..name_end]);
    (kind, (close + 1).min(source.len()))
}

/// Body from `body` up to `terminator`; cursor lands past the terminator.
fn delimited(source: &[u8], body: usize, terminator: &[u8], out: &mut TokenBuffer) -> usize {
    let body = body.min(source.len());
    let close = memmem::find(&source[body..], terminator).map_or(source.len(), |i| body + i);
    capture(source, body, close, terminator.len(), out)
}

/// Copies `source[body..close]` and returns the cursor past a terminator of
/// `skip` bytes at `close`, clamped to the end of the document.
#[inline]
fn capture(source: &[u8], body: usize, close: usize, skip: usize, out: &mut TokenBuffer) -> usize {
    out.write_if_room(&source[body..close]);
    (close + skip).min(source.len())
}

/// Position of the first `target` at or after `pos` that is not inside a
/// `"`- or `'`-quoted span, or `source.len()` if there is none.
fn find_unquoted(source: &[u8], mut pos: usize, target: u8) -> usize {
    while let Some(offset) = memchr3(target, b'"', b'\'', &source[pos..]) {
        let at = pos + offset;
        let quote = source[at];
        if quote == target {
            return at;
        }
        match memchr(quote, &source[at + 1..]) {
            Some(close) => pos = at + 1 + close + 1,
            None => return source.len(),
        }
    }
    source.len()
}
