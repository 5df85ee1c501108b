use std::collections::BTreeSet;

use pretty_assertions::assert_eq;
use rstest::rstest;

use super::*;

fn value_flags(flags: &str) -> BTreeSet<char> {
	flags.chars().collect()
}

#[test]
fn parse_separates_flags_from_positional() {
	let mut args = CommandArgs::parse(&["alice", "-lq", "bob"], &BTreeSet::new()).unwrap();

	assert_eq!(args.remaining(), 2);
	assert!(args.has_flag('l'));
	assert!(args.has_flag('q'));
	assert_eq!(args.next("first").unwrap(), "alice");
	assert_eq!(args.peek(), Some("bob"));
}

#[test]
fn value_flag_takes_next_token() {
	let mut args = CommandArgs::parse(&["-p", "Dr.", "alice"], &value_flags("p")).unwrap();

	assert_eq!(args.take_flag('p'), Some(Some("Dr.".to_owned())));
	assert_eq!(args.take_remaining(), vec!["alice".to_owned()]);
}

#[test]
fn value_flag_must_close_group() {
	let err = CommandArgs::parse(&["-pl", "x"], &value_flags("p")).unwrap_err();
	assert_eq!(err, ArgumentError::MissingFlagValue('p'));
}

#[test]
fn value_flag_without_value_fails() {
	let err = CommandArgs::parse(&["alice", "-p"], &value_flags("p")).unwrap_err();
	assert_eq!(err, ArgumentError::MissingFlagValue('p'));
}

#[rstest]
#[case::negative_number("-5")]
#[case::lone_dash("-")]
#[case::mixed("-a1")]
fn non_flag_tokens_stay_positional(#[case] token: &str) {
	let args = CommandArgs::parse(&[token], &BTreeSet::new()).unwrap();
	assert_eq!(args.remaining(), 1);
	assert_eq!(args.unconsumed_flags().count(), 0);
}

#[test]
fn non_ascii_letters_are_flags() {
	let mut args = CommandArgs::parse(&["-éß", "-ü", "x"], &value_flags("ü")).unwrap();
	assert_eq!(args.take_flag('é'), Some(None));
	assert_eq!(args.take_flag('ü'), Some(Some("x".to_owned())));
	assert_eq!(args.unconsumed_flags().collect::<String>(), "ß");
	assert!(!args.has_next());
}

#[test]
fn double_dash_ends_flags() {
	let mut args = CommandArgs::parse(&["-a", "--", "-b"], &BTreeSet::new()).unwrap();
	assert!(args.has_flag('a'));
	assert!(!args.has_flag('b'));
	assert_eq!(args.take_remaining(), vec!["-b".to_owned()]);
}

#[test]
fn consumed_flags_are_not_reported() {
	let mut args = CommandArgs::parse(&["-abz"], &BTreeSet::new()).unwrap();
	assert_eq!(args.take_flag('a'), Some(None));
	assert_eq!(args.take_flag('x'), None);
	assert_eq!(args.unconsumed_flags().collect::<String>(), "bz");
}

#[test]
fn next_reports_missing_argument_by_name() {
	let mut args = CommandArgs::default();
	assert_eq!(args.next("target").unwrap_err(), ArgumentError::MissingArgument("target".into()));
}

#[rstest]
#[case("greet alice", &["greet", "alice"])]
#[case("  spaced   out  ", &["spaced", "out"])]
#[case("say \"hello world\" 'it''s'", &["say", "hello world", "its"])]
#[case("a\"b c\"d", &["ab cd"])]
#[case("empty \"\"", &["empty", ""])]
#[case("", &[])]
fn split_arguments_cases(#[case] input: &str, #[case] expected: &[&str]) {
	assert_eq!(split_arguments(input).unwrap(), expected);
}

#[test]
fn split_arguments_rejects_open_quote() {
	assert_eq!(split_arguments("say \"hi").unwrap_err(), ArgumentError::UnterminatedQuote(4));
}
