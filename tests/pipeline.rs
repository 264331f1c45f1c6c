//! End-to-end highlighting through the public API

use highlight_within::highlight::{self, build, reduce, resolve, BoundaryKind, Range};
use highlight_within::{Config, HighlightSpec, Highlighter, TextSurface};
use regex::Regex;

fn markup(text: &str, spec: HighlightSpec) -> String {
    highlight::highlight(text, &spec, None).unwrap()
}

/// Count tags and check a naive stack never underflows
fn tag_balance(markup: &str) -> (usize, usize) {
    let mut opens = 0;
    let mut closes = 0;
    let mut depth: i64 = 0;
    let mut rest = markup;
    while let Some(idx) = rest.find('<') {
        rest = &rest[idx..];
        if rest.starts_with("</mark>") {
            closes += 1;
            depth -= 1;
            assert!(depth >= 0, "close tag without open tag in {:?}", markup);
        } else if rest.starts_with("<mark") {
            opens += 1;
            depth += 1;
        } else if !rest.starts_with("<wbr>") {
            panic!("unescaped '<' in {:?}", markup);
        }
        rest = &rest[1..];
    }
    (opens, closes)
}

#[test]
fn scenario_literal_matches() {
    let ranges = resolve("cat dog cat", &HighlightSpec::literal("cat")).unwrap();
    assert_eq!(ranges, vec![Range::new(0, 3), Range::new(8, 11)]);
    assert_eq!(
        markup("cat dog cat", HighlightSpec::literal("cat")),
        "<mark>cat</mark> dog <mark>cat</mark>"
    );
}

#[test]
fn scenario_staggered_ranges() {
    let spec = HighlightSpec::list(vec![HighlightSpec::range(0, 3), HighlightSpec::range(2, 5)]);
    assert_eq!(markup("abcdef", spec), "<mark>abc</mark>def");
}

#[test]
fn scenario_styled_literal() {
    let spec = HighlightSpec::styled(HighlightSpec::literal("hello"), "warn");
    assert_eq!(markup("hello", spec), r#"<mark class="warn">hello</mark>"#);
}

#[test]
fn scenario_escaped_content() {
    assert_eq!(markup("a<b", HighlightSpec::range(0, 3)), "<mark>a&lt;b</mark>");
}

#[test]
fn scenario_trailing_line_break() {
    assert_eq!(markup("one\n", HighlightSpec::literal("one")), "<mark>one</mark>\n\n");
    assert_eq!(markup("one\n", HighlightSpec::range(2, 4)), "on<mark>e\n\n</mark>");
    assert_eq!(markup("one\ntwo", HighlightSpec::Empty), "one\ntwo");
}

#[test]
fn first_seen_priority() {
    let a = Range::new(1, 4);
    let b = Range::new(3, 6);
    let reduced = reduce(vec![a.clone(), b.clone()]);
    assert!(reduced.contains(&a));
    assert!(!reduced.contains(&b));
}

#[test]
fn boundary_parity() {
    let spec = HighlightSpec::list(vec![
        HighlightSpec::literal("a"),
        HighlightSpec::pattern(Regex::new("[a-c]+").unwrap(), true),
        HighlightSpec::range(0, 7),
        HighlightSpec::range(3, 9),
    ]);
    let text = "abc cab bca";
    let kept = highlight::ranges(text, &spec).unwrap();
    let boundaries = build(kept.clone());
    assert_eq!(boundaries.len(), kept.len() * 2);
    let starts = boundaries
        .iter()
        .filter(|b| b.kind == BoundaryKind::Start)
        .count();
    assert_eq!(starts, kept.len());
}

#[test]
fn tag_balance_holds_for_awkward_input() {
    let text = "<<a>> bb\n  <c>\n";
    let specs = vec![
        HighlightSpec::list((0..text.len() + 2).flat_map(|s| {
            (0..4).map(move |len| HighlightSpec::range(s, s + len))
        })),
        HighlightSpec::list((0..8).map(|s| HighlightSpec::range(s + 3, s))),
        HighlightSpec::pattern(Regex::new("b*").unwrap(), true),
        HighlightSpec::styled(HighlightSpec::literal(">"), "gt"),
        HighlightSpec::list(vec![HighlightSpec::range(0, 2), HighlightSpec::range(0, 2)]),
    ];
    for spec in specs {
        let out = markup(text, spec);
        let (opens, closes) = tag_balance(&out);
        assert_eq!(opens, closes, "{:?}", out);
    }
}

#[test]
fn escaping_safety_with_whitespace_wrap() {
    let out = highlight::highlight(
        "a <b> c",
        &HighlightSpec::literal("b"),
        Some(&highlight::WhitespaceWrap),
    )
    .unwrap();
    assert_eq!(out, "a <wbr>&lt;<mark>b</mark>&gt; <wbr>c");
    let (opens, closes) = tag_balance(&out);
    assert_eq!((opens, closes), (1, 1));
}

#[test]
fn identical_ranges_both_kept() {
    let spec = HighlightSpec::list(vec![HighlightSpec::range(1, 3), HighlightSpec::range(1, 3)]);
    assert_eq!(markup("abcd", spec), "a<mark><mark>bc</mark></mark>d");
}

#[test]
fn computed_spec_composes() {
    let spec = HighlightSpec::computed(|text| {
        let words = text
            .split_whitespace()
            .filter(|w| w.len() > 3)
            .map(|w| HighlightSpec::styled(HighlightSpec::literal(w), "long"))
            .collect::<Vec<_>>();
        Ok(HighlightSpec::list(words))
    });
    assert_eq!(
        markup("a quick fox", spec),
        r#"a <mark class="long">quick</mark> fox"#
    );
}

#[test]
fn highlighter_from_config_file() {
    let config = Config::parse(
        r#"
highlight = [
    { highlight = { pattern = "\\d+", global = true }, class_name = "num" },
    "todo",
]
"#,
    )
    .unwrap();

    let mut highlighter = Highlighter::from_config(TextSurface::new("TODO: 2 of 10"), &config);
    assert_eq!(
        highlighter.overlay().markup(),
        r#"<mark>TODO</mark>: <mark class="num">2</mark> of <mark class="num">10</mark>"#
    );

    highlighter.surface_mut().set_text("nothing");
    assert_eq!(highlighter.handle_input().unwrap(), "nothing");

    let surface = highlighter.destroy();
    assert_eq!(surface.as_str(), "nothing");
}
