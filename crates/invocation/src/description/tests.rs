use pretty_assertions::assert_eq;

use super::*;

fn flag(name: &str, flag: char, value_flag: bool) -> Parameter {
	Parameter {
		name: name.into(),
		flag: Some(flag),
		value_flag,
		..Parameter::default()
	}
}

#[test]
fn usage_is_generated_from_parameters() {
	let description = Description::builder()
		.parameters(vec![
			Parameter::positional("target"),
			Parameter {
				name: "times".into(),
				default: vec!["1".into()],
				..Parameter::default()
			},
			flag("loud", 'l', false),
			flag("prefix", 'p', true),
		])
		.build();

	assert_eq!(description.usage(), "<target> [times] [-l] [-p <prefix>]");
}

#[test]
fn usage_override_wins() {
	let description = Description::builder()
		.parameters(vec![Parameter::positional("target")])
		.usage_override(Some("<who> [...]".into()))
		.build();

	assert_eq!(description.usage(), "<who> [...]");
}

#[test]
fn to_builder_round_trips() {
	let description = Description::builder()
		.short_description(Some("greets".into()))
		.help(Some("greets loudly".into()))
		.permissions(["a", "b"])
		.build();

	assert_eq!(description.to_builder().build(), description);
}

#[test]
fn empty_description_has_no_text() {
	let description = Description::default();
	assert_eq!(description.short_description(), None);
	assert_eq!(description.help(), None);
	assert!(description.permissions().is_empty());
	assert_eq!(description.usage(), "");
}
