use indexmap::indexmap;

use crate::{
    Code, Error, Frontmatter, Node, Value, code_frontmatter,
    mdast::{self, code_blocks},
    pipeline::Processor,
};

const TEST_NONE: &str = include_str!("fixtures/none.md");
const TEST_EMPTY: &str = include_str!("fixtures/empty.md");
const TEST_SOME: &str = include_str!("fixtures/some.md");
const TEST_MODIFICATION: &str = include_str!("fixtures/modification.md");
const TEST_NESTED: &str = include_str!("fixtures/nested.md");
const TEST_ANSIBLE: &str = include_str!("fixtures/ansible.md");

const TEST_MODIFICATION_HTML: &str = r#"<pre><code class="language-c">#include&lt;stdio.h&gt;
int main()
{
  printf("Hello, World!");
  return 0;
}
</code></pre>
<pre><code class="language-c">// Some other code
</code></pre>"#;

fn extract(markdown: &str) -> Vec<Code> {
    let tree = Processor::new()
        .with(code_frontmatter())
        .process(markdown)
        .unwrap();
    code_blocks(&tree).into_iter().cloned().collect()
}

fn some_data() -> Frontmatter {
    indexmap! {
        "foo".to_owned() => Value::from("bar"),
        "baz".to_owned() => vec![1i64, 2, 3].into(),
    }
}

fn wrap_c_main(tree: &mut Node) -> Result<(), Error> {
    mdast::visit_code_mut(tree, |code| {
        let wrap = code
            .frontmatter
            .as_ref()
            .and_then(|fm| fm.get("wrap"))
            .and_then(Value::as_str);
        if wrap == Some("c-main") {
            let body = code
                .value
                .split('\n')
                .map(|line| format!("  {line}"))
                .collect::<Vec<_>>();
            code.value = ["#include<stdio.h>".to_owned(), "int main()".into(), "{".into()]
                .into_iter()
                .chain(body)
                .chain(["}".to_owned()])
                .collect::<Vec<_>>()
                .join("\n");
        }
    });
    Ok(())
}

#[test]
fn test_no_frontmatter() {
    let blocks = extract(TEST_NONE);
    assert_eq!(blocks.len(), 1);
    assert_eq!(blocks[0].frontmatter, None);
    assert_eq!(blocks[0].value, "some code without frontmatter");
}

#[test]
fn test_empty_frontmatter() {
    let blocks = extract(TEST_EMPTY);
    assert_eq!(blocks.len(), 1);
    assert_eq!(blocks[0].frontmatter, Some(Frontmatter::new()));
    assert_eq!(blocks[0].value, "some code with empty");
}

#[test]
fn test_some_frontmatter() {
    let blocks = extract(TEST_SOME);
    assert_eq!(blocks.len(), 1);
    assert_eq!(blocks[0].frontmatter, Some(some_data()));
    assert_eq!(blocks[0].value, "some code with data");
}

#[test]
fn test_combined_in_document_order() {
    let combined = [TEST_NONE, TEST_EMPTY, TEST_SOME].concat();
    let blocks = extract(&combined);
    assert_eq!(blocks.len(), 3);
    assert_eq!(blocks[0].frontmatter, None);
    assert_eq!(blocks[0].value, "some code without frontmatter");
    assert_eq!(blocks[1].frontmatter, Some(Frontmatter::new()));
    assert_eq!(blocks[1].value, "some code with empty");
    assert_eq!(blocks[2].frontmatter, Some(some_data()));
    assert_eq!(blocks[2].value, "some code with data");
}

#[test]
fn test_later_stage_sees_extracted_frontmatter() {
    let html = Processor::new()
        .with(code_frontmatter())
        .with(wrap_c_main)
        .process_to_html(TEST_MODIFICATION)
        .unwrap();
    assert_eq!(html.trim(), TEST_MODIFICATION_HTML);
}

#[test]
fn test_earlier_stage_sees_raw_value() {
    let tree = Processor::new()
        .with(wrap_c_main)
        .with(code_frontmatter())
        .process(TEST_MODIFICATION)
        .unwrap();
    let blocks = code_blocks(&tree);
    assert_eq!(blocks[0].value, "printf(\"Hello, World!\");\nreturn 0;");
    assert_eq!(
        blocks[0].frontmatter,
        Some(indexmap! {"wrap".to_owned() => Value::from("c-main")})
    );
}

#[test]
fn test_nested_blocks_and_toml() {
    let blocks = extract(TEST_NESTED);
    assert_eq!(blocks.len(), 3);

    assert_eq!(blocks[0].lang.as_deref(), Some("rust"));
    assert_eq!(blocks[0].meta.as_deref(), Some("title=\"lib.rs\""));
    assert_eq!(
        blocks[0].frontmatter,
        Some(indexmap! {
            "edition".to_owned() => Value::from(2024i64),
            "features".to_owned() => vec!["std"].into(),
        })
    );
    assert_eq!(blocks[0].value, "pub fn answer() -> u32 {\n    42\n}");

    assert_eq!(
        blocks[1].frontmatter,
        Some(indexmap! {"nested".to_owned() => Value::from(true)})
    );
    assert_eq!(blocks[1].value, "inside a quote");

    assert_eq!(blocks[2].lang.as_deref(), Some("yaml"));
    assert_eq!(blocks[2].frontmatter, Some(Frontmatter::new()));
    assert_eq!(blocks[2].value, "key: value");
}

#[test]
fn test_running_twice_equals_once() {
    let combined = [TEST_NONE, TEST_EMPTY, TEST_SOME, TEST_NESTED].concat();
    let once = Processor::new()
        .with(code_frontmatter())
        .process(&combined)
        .unwrap();
    let twice = Processor::new()
        .with(code_frontmatter())
        .with(code_frontmatter())
        .process(&combined)
        .unwrap();
    assert_eq!(once, twice);
}

#[test]
fn test_only_code_nodes_change() {
    let src = "# Title\n\n---\n\ntext\n\n```\n---\na: 1\n---\nbody\n```\n";
    let mut tree = mdast::parse(src);
    let before = tree.clone();
    Processor::new()
        .with(code_frontmatter())
        .run(&mut tree)
        .unwrap();
    assert_eq!(tree.children().len(), before.children().len());
    for (after, before) in tree.children().iter().zip(before.children()) {
        match (after, before) {
            (Node::Code(after), Node::Code(before)) => {
                assert_eq!(after.value, "body");
                assert_eq!(before.value, "---\na: 1\n---\nbody");
            }
            (after, before) => assert_eq!(after, before),
        }
    }
}

#[test]
fn test_json_shape() {
    let blocks = extract(&[TEST_NONE, TEST_SOME].concat());
    let json = serde_json::to_value(&blocks).unwrap();
    assert_eq!(
        json,
        serde_json::json!([
            {"lang": null, "meta": null, "value": "some code without frontmatter"},
            {
                "lang": null,
                "meta": null,
                "value": "some code with data",
                "frontmatter": {"foo": "bar", "baz": [1, 2, 3]}
            }
        ])
    );
}

#[test]
fn test_yaml_document_stream_left_in_place() {
    let blocks = extract(TEST_ANSIBLE);
    assert_eq!(blocks.len(), 1);
    assert_eq!(blocks[0].lang.as_deref(), Some("yaml"));
    assert_eq!(blocks[0].frontmatter, None);
    assert_eq!(blocks[0].value, "---\n- hosts: all\n  tasks: []\n---\n- hosts: db");
}
