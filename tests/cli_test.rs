use copydir::cli::{parse_key_values, Args};
use copydir::error::Error;
use copydir::{RenamePolicy, TemplateScope};
use clap::Parser;
use std::ffi::OsString;
use std::path::PathBuf;

fn make_args(args: &[&str]) -> Vec<OsString> {
    let mut res = vec![OsString::from("copydir")];
    res.extend(args.iter().map(OsString::from));
    res
}

#[test]
fn test_basic_args() {
    let args = make_args(&["./src", "./dst"]);
    let parsed = Args::try_parse_from(args).unwrap();

    assert_eq!(parsed.src_dir, PathBuf::from("./src"));
    assert_eq!(parsed.dst_dir, PathBuf::from("./dst"));
    assert!(parsed.keyvals.is_empty());
    assert!(!parsed.dot);
    assert!(!parsed.verbose);
    assert_eq!(parsed.rename_policy(), RenamePolicy::Identity);
    assert_eq!(parsed.template_scope(), TemplateScope::AllFiles);
}

#[test]
fn test_all_flags() {
    let args = make_args(&["--dot", "--verbose", "--only-suffixed", "src", "dst", "a=1", "b=2"]);
    let parsed = Args::try_parse_from(args).unwrap();

    assert!(parsed.verbose);
    assert_eq!(parsed.keyvals, vec!["a=1", "b=2"]);
    assert_eq!(parsed.rename_policy(), RenamePolicy::Dot);
    assert_eq!(parsed.template_scope(), TemplateScope::SuffixedOnly);
}

#[test]
fn test_missing_args() {
    let args = make_args(&["./src"]);
    assert!(Args::try_parse_from(args).is_err());
}

#[test]
fn test_parse_key_values() {
    let data = parse_key_values(&["bar=X", "url=a=b", "empty=", "bar=Y"]).unwrap();

    assert_eq!(data.len(), 3);
    assert_eq!(data["bar"], "Y");
    assert_eq!(data["url"], "a=b");
    assert_eq!(data["empty"], "");
}

#[test]
fn test_parse_key_values_without_equals() {
    let result = parse_key_values(&["bar=X", "oops"]);

    match result {
        Err(Error::UsageError(msg)) => assert_eq!(msg, "missing '=' in oops"),
        other => panic!("Expected UsageError, got {other:?}"),
    }
}

#[test]
fn test_parse_no_key_values() {
    let data = parse_key_values::<&str>(&[]).unwrap();
    assert!(data.is_empty());
}
