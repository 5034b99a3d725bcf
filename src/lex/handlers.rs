//! Mode handlers.
//!
//! Each handler consumes input in one [`Mode`], appends the tokens it finds to the buffer, and
//! returns the state the lexer is in afterwards. A handler which detects malformed input returns
//! a [`Fault`] instead; the driver then recovers. Every handler call either advances the cursor
//! or faults, so the driver always terminates.
use tracing::trace;
use unicase::Ascii;

use super::cursor::{Cursor, Delimiters};
use super::state::{Fault, LexerState, Mode, ObjectKind};
use crate::ErrorKind;
use crate::token::{NAME_ALLOWED, Span, Token, TokenBuffer, TokenKind, is_number};

pub(crate) type Step = Result<LexerState, Fault>;

#[inline]
fn token(kind: TokenKind, text: &str, start: usize) -> Token {
    Token::new(kind, text, Span::new(start, start + text.len()))
}

/// Consume one char as an unexpected token. An `@` is not consumed since it starts the next
/// object.
fn unexpected(cursor: &mut Cursor<'_>) -> Fault {
    let offset = cursor.position();
    if cursor.peek() == Some(b'@') {
        return Fault::at_object(offset);
    }
    match cursor.bump_char() {
        Some(ch) => Fault::new(ErrorKind::UnexpectedToken, ch, offset),
        None => Fault::at_end(ErrorKind::UnexpectedToken, offset),
    }
}

/// Lex free text up to the start of the next object.
pub(crate) fn free_text(
    cursor: &mut Cursor<'_>,
    buffer: &mut TokenBuffer,
    strict: bool,
) -> Step {
    let start = cursor.position();
    let object = cursor.scan_to_object(strict);

    if !object.meta.is_empty() {
        buffer.push_meta(token(TokenKind::MetaContent, object.meta, start));
    }

    match object.at {
        Some(at) => enter_object(cursor, buffer, at),
        None => Ok(LexerState::default()),
    }
}

/// Lex the name following the `@` at `at`.
fn enter_object(cursor: &mut Cursor<'_>, buffer: &mut TokenBuffer, at: usize) -> Step {
    buffer.push(token(TokenKind::At, "@", at));
    cursor.skip_whitespace();

    let start = cursor.position();
    let Some(name) = cursor.try_match(&NAME_ALLOWED) else {
        return Err(unexpected(cursor));
    };

    let (kind, object) = classify_object(name);
    trace!(?object, object_name = name, offset = at, "entering object");
    buffer.push(token(kind, name, start));
    Ok(LexerState::enter(object))
}

/// Determine the kind of object from its name. The special object names are case-insensitive.
fn classify_object(name: &str) -> (TokenKind, ObjectKind) {
    let name = Ascii::new(name);
    if name == Ascii::new("string") {
        (TokenKind::StringKeyword, ObjectKind::StringDef)
    } else if name == Ascii::new("preamble") {
        (TokenKind::PreambleKeyword, ObjectKind::Preamble)
    } else if name == Ascii::new("comment") {
        (TokenKind::CommentKeyword, ObjectKind::Comment)
    } else {
        (TokenKind::Name, ObjectKind::Entry)
    }
}

/// Lex a single punctuation token, name, or number inside an object.
pub(crate) fn header(
    cursor: &mut Cursor<'_>,
    buffer: &mut TokenBuffer,
    state: LexerState,
) -> Step {
    if cursor.skip_whitespace() {
        return Ok(state);
    }

    let start = cursor.position();
    let Some(byte) = cursor.peek() else {
        return Ok(state);
    };

    // the object body has not been opened yet
    if state.depth == 0 && !matches!(byte, b'{' | b'}') {
        return Err(unexpected(cursor));
    }

    let punctuation = match byte {
        b'{' => Some(TokenKind::LBrace),
        b'}' => Some(TokenKind::RBrace),
        b'=' => Some(TokenKind::Equals),
        b',' => Some(TokenKind::Comma),
        b'#' => Some(TokenKind::Sharp),
        _ => None,
    };

    if let Some(kind) = punctuation {
        cursor.try_match(byte);
        return match kind {
            TokenKind::LBrace => {
                buffer.push(token(kind, "{", start));
                let next = state.open();
                if next.depth > 1 || next.object == ObjectKind::Comment {
                    Ok(next.with_mode(Mode::Content))
                } else {
                    Ok(next)
                }
            }
            TokenKind::RBrace => {
                let next = state.close();
                if next.depth < 0 {
                    return Err(Fault::new(ErrorKind::UnbalancedBraces, "}", start));
                }
                buffer.push(token(kind, "}", start));
                if next.depth == 0 {
                    trace!(object = ?state.object, offset = start, "leaving object");
                    Ok(LexerState::default())
                } else {
                    Ok(next)
                }
            }
            _ => {
                buffer.push(token(kind, &cursor.source()[start..start + 1], start));
                Ok(state)
            }
        };
    }

    if byte == b'"' {
        cursor.try_match(byte);
        return Ok(state.with_mode(Mode::StringLiteral));
    }

    match cursor.try_match(&NAME_ALLOWED) {
        Some(name) if is_number(name) => {
            buffer.push(token(TokenKind::Number, name, start));
            Ok(state)
        }
        Some(name) => {
            buffer.push(token(TokenKind::Name, name, start));
            Ok(state)
        }
        None => Err(unexpected(cursor)),
    }
}

/// Lex brace-delimited text up to the next brace.
pub(crate) fn content(
    cursor: &mut Cursor<'_>,
    buffer: &mut TokenBuffer,
    state: LexerState,
) -> Step {
    let scanned = cursor.scan_until(Delimiters::Braces);

    match scanned.delimiter {
        Some(b'{') => {
            buffer.push(token(TokenKind::Content, scanned.text, scanned.start));
            Ok(state.open())
        }
        Some(_) => {
            let next = state.close();
            let closing = scanned.delimiter_offset();

            if next.depth == 0 {
                buffer.push(token(TokenKind::Content, scanned.body(), scanned.start));
                buffer.push(token(TokenKind::RBrace, "}", closing));
                trace!(object = ?state.object, offset = closing, "leaving object");
                Ok(LexerState::default())
            } else if next.depth == 1 && next.object != ObjectKind::Comment {
                buffer.push(token(TokenKind::Content, scanned.body(), scanned.start));
                buffer.push(token(TokenKind::RBrace, "}", closing));
                Ok(next.with_mode(Mode::Header))
            } else if next.depth < 0 {
                buffer.push(token(TokenKind::Content, scanned.body(), scanned.start));
                Err(Fault::new(ErrorKind::UnbalancedBraces, "}", closing))
            } else {
                buffer.push(token(TokenKind::Content, scanned.text, scanned.start));
                Ok(next)
            }
        }
        None => {
            if !scanned.text.is_empty() {
                buffer.push(token(TokenKind::Content, scanned.text, scanned.start));
            }
            Err(Fault::at_end(ErrorKind::UnterminatedContent, cursor.position()))
        }
    }
}

/// Lex quoted text up to the next brace, quote, or line break.
pub(crate) fn literal(
    cursor: &mut Cursor<'_>,
    buffer: &mut TokenBuffer,
    state: LexerState,
) -> Step {
    let scanned = cursor.scan_until(Delimiters::Quoted);
    let kind = TokenKind::StringLiteralText;
    let offset = scanned.delimiter_offset();

    match scanned.delimiter {
        Some(b'{') => {
            buffer.push(token(kind, scanned.text, scanned.start));
            Ok(state.open())
        }
        Some(b'}') => {
            let next = state.close();
            if next.depth < 1 {
                // reached the end of the object before the closing quote
                buffer.push(token(kind, scanned.body(), scanned.start));
                Err(Fault::new(ErrorKind::UnterminatedString, "}", offset))
            } else {
                buffer.push(token(kind, scanned.text, scanned.start));
                Ok(next)
            }
        }
        Some(b'"') if state.depth == 1 => {
            buffer.push(token(kind, scanned.body(), scanned.start));
            Ok(state.with_mode(Mode::Header))
        }
        Some(b'\n') if state.depth == 1 => {
            let body = scanned.body();
            buffer.push(token(kind, body.strip_suffix('\r').unwrap_or(body), scanned.start));
            Err(Fault::new(ErrorKind::UnterminatedString, "\n", offset))
        }
        // quotes and line breaks nested in braces are literal text
        Some(_) => {
            buffer.push(token(kind, scanned.text, scanned.start));
            Ok(state)
        }
        None => {
            if !scanned.text.is_empty() {
                buffer.push(token(kind, scanned.text, scanned.start));
            }
            Err(Fault::at_end(ErrorKind::UnterminatedString, offset))
        }
    }
}

/// Check that the input may end in `state`.
pub(crate) fn end_of_input(state: LexerState, offset: usize) -> Result<(), Fault> {
    let kind = match state.mode {
        Mode::FreeText => return Ok(()),
        Mode::Header if state.depth == 0 => ErrorKind::UnexpectedToken,
        Mode::Header | Mode::Content => ErrorKind::UnterminatedContent,
        Mode::StringLiteral => ErrorKind::UnterminatedString,
    };
    Err(Fault::at_end(kind, offset))
}
