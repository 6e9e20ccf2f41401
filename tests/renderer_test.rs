use copydir::error::Error;
use copydir::renderer::{MiniJinjaRenderer, TemplateRenderer};
use serde_json::json;

#[test]
fn test_minijinja_renderer() {
    let renderer = MiniJinjaRenderer::new().unwrap();
    let context = json!({"bar": "X", "name": "test"});

    let result = renderer.render("t", "foo-{{bar}}", &context).unwrap();
    assert_eq!(result, "foo-X");

    let result = renderer.render("t", "Hello {{ name }}!", &context).unwrap();
    assert_eq!(result, "Hello test!");

    let result = renderer.render("t", "no placeholders", &context).unwrap();
    assert_eq!(result, "no placeholders");
}

#[test]
fn test_missing_key_is_an_error() {
    let renderer = MiniJinjaRenderer::new().unwrap();
    let result = renderer.render("t", "hello {{ missing }}", &json!({"bar": "X"}));

    match result {
        Err(Error::MinijinjaError(e)) => {
            assert_eq!(e.kind(), minijinja::ErrorKind::UndefinedError)
        }
        other => panic!("Expected MinijinjaError, got {other:?}"),
    }
}

#[test]
fn test_syntax_error() {
    let renderer = MiniJinjaRenderer::new().unwrap();
    let result = renderer.render("t", "hello {{ bar", &json!({"bar": "X"}));

    assert!(matches!(result, Err(Error::TemplateSyntaxError(_))));
}

#[test]
fn test_single_brace_tags_are_literal() {
    let renderer = MiniJinjaRenderer::new().unwrap();
    let context = json!({"bar": "X"});

    let result = renderer.render("t", "n=${#arr[@]} {% if %} {#", &context).unwrap();
    assert_eq!(result, "n=${#arr[@]} {% if %} {#");
}

#[test]
fn test_doubled_delimiters_are_tags() {
    let renderer = MiniJinjaRenderer::new().unwrap();
    let context = json!({"bar": "X"});

    let result = renderer
        .render("t", "{%% if bar %%}{{ bar }}{%% endif %%}{## note ##}", &context)
        .unwrap();
    assert_eq!(result, "X");
}
