use cap_validator::location::LineIndex;
use cap_validator::CapError;

const IPAWS_ALERT: &str = include_str!("fixtures/ipaws_alert.xml");
const ATOM_DUPLICATE_IDS: &str = include_str!("fixtures/atom_duplicate_ids.xml");

#[test]
fn test_paths_resolve_to_start_lines() {
    let index = LineIndex::build(IPAWS_ALERT).unwrap();
    assert_eq!(index.line_of("/alert[1]"), Some(2));
    assert_eq!(index.line_of("/alert[1]/sent[1]"), Some(5));
    assert_eq!(index.line_of("/alert[1]/info[1]/eventCode[1]/value[1]"), Some(19));
    assert_eq!(
        index.line_of("/alert[1]/info[1]/area[1]/geocode[1]/value[1]"),
        Some(31)
    );
    assert_eq!(index.line_of("/alert[1]/info[2]"), None);
}

#[test]
fn test_unknown_paths_fall_back_to_nearest_ancestor() {
    let index = LineIndex::build(IPAWS_ALERT).unwrap();
    assert_eq!(index.resolve("/alert[1]/info[1]/expires[1]"), 21);
    assert_eq!(index.resolve("/alert[1]/info[1]/onset[1]"), 10);
    assert_eq!(index.resolve("/alert[1]/note[1]"), 2);
    assert_eq!(index.resolve("/feed[1]"), 0);
}

#[test]
fn test_sibling_indexes_count_per_name() {
    let index = LineIndex::build(ATOM_DUPLICATE_IDS).unwrap();
    assert_eq!(index.line_of("/feed[1]/entry[1]"), Some(6));
    assert_eq!(index.line_of("/feed[1]/entry[2]"), Some(21));
    assert_eq!(index.line_of("/feed[1]/entry[2]/id[1]"), Some(22));
    assert_eq!(
        index.line_of("/feed[1]/entry[2]/content[1]/alert[1]/identifier[1]"),
        Some(27)
    );
}

#[test]
fn test_first_link_occurrence_wins() {
    let text = "<feed xmlns=\"http://www.w3.org/2005/Atom\">\n\
                <entry>\n\
                <link href=\"alert.xml\"/>\n\
                </entry>\n\
                <entry>\n\
                <link href=\" alert.xml \"/>\n\
                </entry>\n\
                </feed>";
    let index = LineIndex::build(text).unwrap();
    assert_eq!(index.line_of_link("alert.xml"), Some(3));
    assert_eq!(index.line_of("/feed[1]/entry[2]/link[1]"), Some(6));
}

#[test]
fn test_text_links_are_indexed() {
    let text = "<rss>\n<channel>\n<item>\n<link>\n  http://example.com/a.xml\n</link>\n</item>\n</channel>\n</rss>";
    let index = LineIndex::build(text).unwrap();
    assert_eq!(index.line_of_link("http://example.com/a.xml"), Some(4));
}

#[test]
fn test_prefixed_names_use_local_name() {
    let text = "<cap:alert xmlns:cap=\"urn:oasis:names:tc:emergency:cap:1.2\">\n\
                <cap:identifier>a</cap:identifier>\n\
                </cap:alert>";
    let index = LineIndex::build(text).unwrap();
    assert_eq!(index.line_of("/alert[1]/identifier[1]"), Some(2));
}

#[test]
fn test_mismatched_tags_are_malformed() {
    let err = LineIndex::build("<alert>\n<info>\n</alert>").unwrap_err();
    assert!(matches!(err, CapError::MalformedDocument { line: 3, .. }));
}
