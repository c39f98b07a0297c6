use std::path::PathBuf;

use notemark_engine::{
    Environment, NavigationIntent, NoteId, NoteIndex, NoteRenderer, PlaceholderMath,
    TagRegistry, read_note,
};
use pretty_assertions::assert_eq;
use rstest::rstest;

fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

fn load_index() -> NoteIndex {
    NoteIndex::from_notes_dir(&fixtures_dir().join("notes"), "note").unwrap()
}

#[rstest]
#[case("garden")]
#[case("beans")]
#[case("digest")]
#[case("projects/shed")]
fn fixture_renders_to_expected_html(#[case] id: &str) {
    let index = load_index();
    let registry = TagRegistry::with_builtins();
    let renderer = NoteRenderer::new(&registry, Environment::new(&index, &PlaceholderMath));

    let id = NoteId::new(id);
    let note = index.get(&id).unwrap();
    let rendered = renderer.render(&id, &note.body).unwrap();

    let expected =
        std::fs::read_to_string(fixtures_dir().join("expected").join(format!("{id}.html"))).unwrap();
    assert_eq!(rendered.to_html(), expected);
}

#[test]
fn untitled_notes_are_left_out_of_the_index() {
    let index = load_index();
    assert_eq!(index.len(), 4);
    assert!(index.get(&NoteId::new("untitled")).is_none());
}

#[test]
fn note_links_are_reported_as_intents() {
    let index = load_index();
    let registry = TagRegistry::with_builtins();
    let renderer = NoteRenderer::new(&registry, Environment::new(&index, &PlaceholderMath));

    let source = read_note(&fixtures_dir().join("notes"), &NoteId::new("projects/shed"), "note").unwrap();
    let rendered = renderer.render(&NoteId::new("projects/shed"), &source).unwrap();

    assert_eq!(
        rendered.intents,
        vec![NavigationIntent::open_note(NoteId::new("garden"))]
    );
}

#[test]
fn summaries_do_not_expand_recursively() {
    let index = load_index();
    let registry = TagRegistry::with_builtins();
    let renderer = NoteRenderer::new(&registry, Environment::new(&index, &PlaceholderMath));

    // Summarizing a note that itself holds summaries only copies its
    // opening paragraph, which here is the unexpanded tag text.
    let tree = renderer
        .parse("# Outer\n\\summary{Digest}\n")
        .unwrap();
    let dump = notemark_engine::dump_tree(&tree);
    assert!(dump.contains("heading level=2 margin=0: \\note{Digest}∎"), "{dump}");
    assert!(dump.contains("paragraph margin=0: \\summary{Beans}↲∎"), "{dump}");
}
