use bibtex_lexer::{LexerConfig, TokenKind, tokenize};
use proptest::prelude::*;

fn configs() -> impl Strategy<Value = LexerConfig> {
    (any::<bool>(), any::<bool>(), any::<bool>()).prop_map(|(errors, meta, strict)| {
        LexerConfig::default()
            .with_errors(errors)
            .with_meta_content(meta)
            .with_strict(strict)
    })
}

fn value() -> impl Strategy<Value = String> {
    prop_oneof![
        "[0-9]{1,4}",
        "[a-z][a-z0-9_]{0,6}",
        "[a-zA-Z .,]{0,12}".prop_map(|text| format!("{{{text}}}")),
        "[a-zA-Z .,]{0,6}\\{[a-z ]{0,6}\\}[a-z]{0,3}".prop_map(|text| format!("{{{text}}}")),
        "[a-zA-Z .,]{0,12}".prop_map(|text| format!("\"{text}\"")),
    ]
}

/// Text with balanced, arbitrarily nested braces.
fn balanced() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9 .,:]{0,6}".prop_recursive(4, 32, 4, |inner| {
        prop::collection::vec(
            prop_oneof![inner.clone(), inner.prop_map(|text| format!("{{{text}}}"))],
            1..4,
        )
        .prop_map(|parts| parts.concat())
    })
}

fn field() -> impl Strategy<Value = String> {
    ("[a-z]{1,8}", prop::collection::vec(value(), 1..3))
        .prop_map(|(name, parts)| format!("{name} = {}", parts.join(" # ")))
}

/// A well-formed regular entry.
fn entry() -> impl Strategy<Value = String> {
    (
        "[a-zA-Z]{1,12}",
        "[a-zA-Z0-9:_-]{1,10}",
        prop::collection::vec(field(), 0..5),
        any::<bool>(),
    )
        .prop_map(|(kind, key, fields, trailing)| {
            let mut body = key;
            for field in fields {
                body.push_str(",\n  ");
                body.push_str(&field);
            }
            if trailing {
                body.push(',');
            }
            format!("@{kind}{{{body}\n}}")
        })
}

proptest! {
    #[test]
    fn no_panic(s in "\\PC*", config in configs()) {
        let _ = tokenize(&s, config);
    }

    #[test]
    fn single_trailing_end_of_input(s in "\\PC*", config in configs()) {
        let tokens = tokenize(&s, config);
        let ends = tokens.iter().filter(|token| token.kind == TokenKind::EndOfInput).count();
        prop_assert_eq!(ends, 1);
        prop_assert_eq!(tokens.last().map(|token| token.kind), Some(TokenKind::EndOfInput));
        prop_assert_eq!(tokens.last().map(|token| token.span.start), Some(s.len()));
    }

    #[test]
    fn spans_within_source(s in "[@{}\"=,#a-z0-9 \n\\\\]*", config in configs()) {
        let tokens = tokenize(&s, config);
        let mut previous = 0;
        for token in &tokens {
            prop_assert!(token.span.start <= token.span.end);
            prop_assert!(token.span.end <= s.len());
            prop_assert!(previous <= token.span.start);
            previous = token.span.start;

            if !matches!(token.kind, TokenKind::StringLiteralText | TokenKind::EndOfInput) {
                prop_assert_eq!(s.get(token.span.range()), Some(token.text.as_str()));
            }
        }
    }

    #[test]
    fn well_formed_entries(entries in prop::collection::vec(entry(), 1..4)) {
        let input = entries.join("\n\n");
        let tokens = tokenize(&input, LexerConfig::default());

        prop_assert!(tokens.iter().all(|token| token.kind != TokenKind::Error));
        let objects = tokens.iter().filter(|token| token.kind == TokenKind::At).count();
        prop_assert_eq!(objects, entries.len());
    }

    #[test]
    fn nested_content_is_one_token(value in balanced()) {
        let head = "@misc{k, title = {";
        let input = format!("{head}{value}}}}}");
        let tokens = tokenize(&input, LexerConfig::default());

        let content: Vec<_> = tokens
            .iter()
            .filter(|token| token.kind == TokenKind::Content)
            .collect();
        prop_assert_eq!(content.len(), 1);
        prop_assert_eq!(&content[0].text, &value);
        prop_assert_eq!(
            content[0].span.range(),
            head.len()..head.len() + value.len()
        );
        prop_assert!(tokens.iter().all(|token| token.kind != TokenKind::Error));
    }

    #[test]
    fn comment_body_is_one_token(value in balanced()) {
        let input = format!("@comment{{{value}}}");
        let tokens = tokenize(&input, LexerConfig::default());

        let content: Vec<_> = tokens
            .iter()
            .filter(|token| token.kind == TokenKind::Content)
            .collect();
        prop_assert_eq!(content.len(), 1);
        prop_assert_eq!(&content[0].text, &value);
        prop_assert_eq!(content[0].span.range(), 9..9 + value.len());
    }

    #[test]
    fn malformed_object_is_isolated(
        junk in "[a-z ,=#]{0,10}",
        good in entry(),
    ) {
        let broken = format!("@misc{{k, title = \"{junk}}}");
        let input = format!("{broken}\n{good}");

        let tokens = tokenize(&input, LexerConfig::default().with_errors(false));
        let expected = tokenize(&good, LexerConfig::default());
        let shift = input.len() - good.len();

        let kinds: Vec<_> = tokens.iter().map(|token| token.kind).collect();
        let expected_kinds: Vec<_> = expected.iter().map(|token| token.kind).collect();
        prop_assert_eq!(kinds, expected_kinds);
        for (token, expected) in tokens.iter().zip(&expected) {
            prop_assert_eq!(&token.text, &expected.text);
            prop_assert_eq!(token.span.start, expected.span.start + shift);
        }
    }
}
