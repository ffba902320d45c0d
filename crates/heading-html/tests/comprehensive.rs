//! Comprehensive tests for heading-html
//!
//! Document structure, attributes and declarative shadow trees.

use heading_dom::{NodeData, ShadowRootMode};
use heading_html::{parse, parse_fragment, HtmlParser};

#[test]
fn test_parse_empty_document() {
    let tree = parse("").unwrap();
    assert!(tree.len() > 1, "html, head and body are always created");
}

#[test]
fn test_attribute_names_are_lowercased() {
    let tree = parse(r#"<SECTION HeadingOffset="3" HEADINGRESET id="s"></SECTION>"#).unwrap();
    let section = tree.element_by_id(tree.root(), "s").unwrap();
    assert_eq!(tree.tag_name(section), Some("section"));
    assert_eq!(tree.get_attribute(section, "headingoffset"), Some("3"));
    assert!(tree.has_attribute(section, "headingreset"));
}

#[test]
fn test_comments_are_kept() {
    let tree = parse("<h1 id=t><!--Level 1-->Title</h1>").unwrap();
    let h1 = tree.element_by_id(tree.root(), "t").unwrap();
    let first = tree.children(h1).next().unwrap();
    assert!(matches!(&tree.get(first).unwrap().data, NodeData::Comment(c) if c.as_str() == "Level 1"));
}

#[test]
fn test_closed_declarative_shadow_root() {
    let tree = parse(r#"<div id="host"><template shadowrootmode="closed"><h2></h2></template></div>"#).unwrap();
    let host = tree.element_by_id(tree.root(), "host").unwrap();
    let shadow = tree.shadow_root(host).unwrap();
    let data = tree.get(shadow).unwrap().as_shadow_root().unwrap();
    assert_eq!(data.mode, ShadowRootMode::Closed);
    assert_eq!(data.host, host);
}

#[test]
fn test_invalid_shadow_mode_is_plain_template() {
    let tree = parse(r#"<div id="host"><template shadowrootmode="sideways"><h2 id="x"></h2></template></div>"#)
        .unwrap();
    let host = tree.element_by_id(tree.root(), "host").unwrap();
    assert!(tree.shadow_root(host).is_none());
    assert!(tree.element_by_id(tree.root(), "x").is_none());
}

#[test]
fn test_second_declarative_template_is_ignored() {
    let tree = parse(concat!(
        r#"<div id="host">"#,
        r#"<template shadowrootmode="open"><h2 id="first"></h2></template>"#,
        r#"<template shadowrootmode="open"><h3 id="second"></h3></template>"#,
        r#"</div>"#,
    ))
    .unwrap();
    let host = tree.element_by_id(tree.root(), "host").unwrap();
    let shadow = tree.shadow_root(host).unwrap();
    assert!(tree.element_by_id(shadow, "first").is_some());
    assert!(tree.element_by_id(shadow, "second").is_none());
}

#[test]
fn test_nested_declarative_shadow_roots() {
    let mut tree = parse(concat!(
        r#"<div id="outer"><template shadowrootmode="open">"#,
        r#"<section id="inner"><template shadowrootmode="open"><h1 id="deep"></h1></template></section>"#,
        r#"</template></div>"#,
    ))
    .unwrap();
    let outer = tree.element_by_id(tree.root(), "outer").unwrap();
    let outer_shadow = tree.shadow_root(outer).unwrap();
    let inner = tree.element_by_id(outer_shadow, "inner").unwrap();
    let inner_shadow = tree.shadow_root(inner).unwrap();
    let deep = tree.element_by_id(inner_shadow, "deep").unwrap();

    assert!(tree.is_connected(deep));
    assert_eq!(tree.take_attached_shadow_roots().len(), 2);
}

#[test]
fn test_fragment_into_existing_tree() {
    let mut tree = parse(r#"<main id="m"></main>"#).unwrap();
    let main = tree.element_by_id(tree.root(), "m").unwrap();

    let nodes = parse_fragment(&mut tree, "text<h2 id=a></h2>").unwrap();
    assert_eq!(nodes.len(), 2);
    for node in nodes {
        tree.append_child(main, node).unwrap();
    }
    let h2 = tree.element_by_id(tree.root(), "a").unwrap();
    assert_eq!(tree.parent(h2), Some(main));
}

#[test]
fn test_parser_default() {
    let tree = HtmlParser::default().parse("<p>x</p>").unwrap();
    assert!(tree.descendants(tree.root()).any(|n| tree.tag_name(n) == Some("p")));
}
