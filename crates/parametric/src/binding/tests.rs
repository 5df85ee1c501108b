use pretty_assertions::assert_eq;
use rstest::rstest;

use super::*;
use crate::spec::FlagPolicy;

#[derive(Debug, Clone, PartialEq)]
struct Sender(&'static str);

fn injector() -> Injector {
	Injector::with_builtins().bind::<Sender>(NamespaceProvider::<Sender>::new())
}

fn parser(params: &[(TypeKey, ParameterSpec)], policy: FlagPolicy) -> ArgumentParser {
	let injector = injector();
	let mut builder = ArgumentParser::builder(&injector);
	for (key, spec) in params {
		builder.add_parameter(*key, spec.clone()).unwrap();
	}
	builder.flag_policy(policy);
	builder.build()
}

fn take<T: 'static>(value: Value) -> T {
	*value.downcast::<T>().unwrap_or_else(|_| panic!("expected {}", type_name::<T>()))
}

#[test]
fn unbound_type_is_illegal() {
	struct Unbound;
	let err = Injector::with_builtins()
		.compile(TypeKey::of::<Unbound>(), ParameterSpec::named("u"))
		.unwrap_err();
	assert!(matches!(err, IllegalParameterError::NoProvider(name) if name.ends_with("Unbound")));
}

#[test]
fn bind_also_binds_option() {
	let injector = Injector::new().bind::<i64>(FromStrProvider::<i64>::new());
	assert!(injector.is_bound(TypeKey::of::<i64>()));
	assert!(injector.is_bound(TypeKey::of::<Option<i64>>()));
	assert!(!injector.is_bound(TypeKey::of::<String>()));
}

#[rstest]
#[case::optional_without_default(TypeKey::of::<i32>(), ParameterSpec::named("n").optional())]
#[case::value_flag_without_default(TypeKey::of::<String>(), ParameterSpec::named("p").flag('p'))]
fn omittable_parameters_need_a_fallback(#[case] key: TypeKey, #[case] spec: ParameterSpec) {
	let err = injector().compile(key, spec).unwrap_err();
	assert!(matches!(err, IllegalParameterError::OptionalWithoutDefault { .. }), "got {err:?}");
}

#[test]
fn provided_types_cannot_be_flags() {
	let err = injector()
		.compile(TypeKey::of::<Sender>(), ParameterSpec::named("who").flag('w'))
		.unwrap_err();
	assert!(matches!(err, IllegalParameterError::ProvidedFlag { .. }));
}

#[test]
fn malformed_default_is_rejected_at_compile_time() {
	let err = injector()
		.compile(TypeKey::of::<i32>(), ParameterSpec::named("n").default_value(["many"]))
		.unwrap_err();
	assert!(matches!(err, IllegalParameterError::InvalidDefault { ref name, .. } if name == "n"));
}

#[test]
fn duplicate_flags_are_rejected() {
	let injector = injector();
	let mut builder = ArgumentParser::builder(&injector);
	builder
		.add_parameter(TypeKey::of::<bool>(), ParameterSpec::named("a").flag('x'))
		.unwrap();
	let err = builder
		.add_parameter(TypeKey::of::<Option<String>>(), ParameterSpec::named("b").flag('x'))
		.unwrap_err();
	assert_eq!(err, IllegalParameterError::DuplicateFlag { flag: 'x' });
}

#[test]
fn kinds_follow_type_and_flag() {
	let injector = injector();
	let kind = |key, spec| injector.compile(key, spec).unwrap().kind();

	assert_eq!(kind(TypeKey::of::<String>(), ParameterSpec::named("s")), ParameterKind::Positional);
	assert_eq!(kind(TypeKey::of::<Sender>(), ParameterSpec::named("s")), ParameterKind::Provided);
	assert_eq!(kind(TypeKey::of::<bool>(), ParameterSpec::named("s").flag('s')), ParameterKind::Switch('s'));
	assert_eq!(
		kind(TypeKey::of::<Option<i32>>(), ParameterSpec::named("s").flag('s')),
		ParameterKind::ValueFlag('s')
	);
}

#[test]
fn resolve_binds_every_kind_in_order() {
	let parser = parser(
		&[
			(TypeKey::of::<Sender>(), ParameterSpec::named("sender")),
			(TypeKey::of::<String>(), ParameterSpec::named("target")),
			(TypeKey::of::<i32>(), ParameterSpec::named("times").default_value(["1"])),
			(TypeKey::of::<bool>(), ParameterSpec::named("loud").flag('l')),
			(TypeKey::of::<Option<String>>(), ParameterSpec::named("prefix").flag('p')),
		],
		FlagPolicy::default(),
	);
	let namespace = Namespace::new().with(Sender("console"));

	let mut values = parser
		.resolve(&["-l", "alice", "-p", "Dr.", "3"], &namespace)
		.unwrap()
		.into_iter();

	assert_eq!(take::<Sender>(values.next().unwrap()), Sender("console"));
	assert_eq!(take::<String>(values.next().unwrap()), "alice");
	assert_eq!(take::<i32>(values.next().unwrap()), 3);
	assert!(take::<bool>(values.next().unwrap()));
	assert_eq!(take::<Option<String>>(values.next().unwrap()), Some("Dr.".to_owned()));
	assert!(values.next().is_none());
}

#[test]
fn omitted_parameters_use_defaults_and_none() {
	let parser = parser(
		&[
			(TypeKey::of::<i32>(), ParameterSpec::named("times").default_value(["2"])),
			(TypeKey::of::<Option<String>>(), ParameterSpec::named("note")),
			(TypeKey::of::<bool>(), ParameterSpec::named("loud").flag('l')),
		],
		FlagPolicy::default(),
	);

	let mut values = parser.resolve::<&str>(&[], &Namespace::new()).unwrap().into_iter();

	assert_eq!(take::<i32>(values.next().unwrap()), 2);
	assert_eq!(take::<Option<String>>(values.next().unwrap()), None);
	assert!(!take::<bool>(values.next().unwrap()));
}

#[test]
fn text_modifier_joins_remaining_arguments() {
	let parser = parser(
		&[
			(TypeKey::of::<String>(), ParameterSpec::named("target")),
			(TypeKey::of::<String>(), ParameterSpec::named("message").modifier(TEXT)),
		],
		FlagPolicy::default(),
	);

	let values = parser.resolve(&["bob", "see", "you", "soon"], &Namespace::new()).unwrap();
	let mut values = values.into_iter();
	assert_eq!(take::<String>(values.next().unwrap()), "bob");
	assert_eq!(take::<String>(values.next().unwrap()), "see you soon");
}

#[test]
fn missing_required_argument_is_named() {
	let parser = parser(&[(TypeKey::of::<String>(), ParameterSpec::named("target"))], FlagPolicy::default());
	let err = parser.resolve::<&str>(&[], &Namespace::new()).unwrap_err();
	assert_eq!(err, ArgumentError::MissingArgument("target".into()));
}

#[test]
fn malformed_argument_reports_type() {
	let parser = parser(&[(TypeKey::of::<u32>(), ParameterSpec::named("count"))], FlagPolicy::default());
	let err = parser.resolve(&["-3x"], &Namespace::new()).unwrap_err();
	assert!(matches!(err, ArgumentError::InvalidArgument { expected: "u32", .. }), "got {err:?}");
}

#[test]
fn leftover_arguments_are_rejected() {
	let parser = parser(&[(TypeKey::of::<String>(), ParameterSpec::named("target"))], FlagPolicy::default());
	let err = parser.resolve(&["a", "b", "c"], &Namespace::new()).unwrap_err();
	assert_eq!(err, ArgumentError::UnusedArguments(vec!["b".into(), "c".into()]));
}

#[test]
fn missing_namespace_value_is_a_provision_error() {
	let parser = parser(&[(TypeKey::of::<Sender>(), ParameterSpec::named("sender"))], FlagPolicy::default());
	let err = parser.resolve::<&str>(&[], &Namespace::new()).unwrap_err();
	assert!(matches!(err, ArgumentError::Provision(_)));
}

#[test]
fn provided_parameters_are_hidden_from_users() {
	let parser = parser(
		&[
			(TypeKey::of::<Sender>(), ParameterSpec::named("sender")),
			(TypeKey::of::<String>(), ParameterSpec::named("target")),
		],
		FlagPolicy::default(),
	);
	let names: Vec<_> = parser.user_parameters().into_iter().map(|p| p.name).collect();
	assert_eq!(names, vec!["target".to_owned()]);
}

#[rstest]
#[case::whitelisted(FlagPolicy::whitelist(['f']), &["-f"], None)]
#[case::unknown(FlagPolicy::whitelist(['f']), &["-fz"], Some("z"))]
#[case::any(FlagPolicy::any(), &["-zq"], None)]
#[case::nothing_declared(FlagPolicy::default(), &["-q"], Some("q"))]
fn flag_policy_governs_leftover_flags(
	#[case] policy: FlagPolicy,
	#[case] raw: &[&str],
	#[case] rejected: Option<&str>,
) {
	let parser = parser(&[], policy);
	let result = parser.resolve(raw, &Namespace::new());
	match rejected {
		None => assert!(result.is_ok()),
		Some(flags) => assert_eq!(result.unwrap_err(), ArgumentError::UnusedFlags(flags.into())),
	}
}

#[test]
fn consumed_flags_pass_a_strict_policy() {
	let parser = parser(
		&[(TypeKey::of::<bool>(), ParameterSpec::named("loud").flag('l'))],
		FlagPolicy::whitelist([]),
	);
	assert!(parser.resolve(&["-l"], &Namespace::new()).is_ok());
}

#[test]
fn closures_are_providers() {
	let injector = Injector::new().bind::<Vec<String>>(
		|args: &mut CommandArgs, _: &Namespace, _: &[String]| -> Result<Vec<String>, ArgumentError> {
			Ok(args.take_remaining())
		},
	);
	let mut builder = ArgumentParser::builder(&injector);
	builder
		.add_parameter(TypeKey::of::<Vec<String>>(), ParameterSpec::named("rest"))
		.unwrap();
	let values = builder.build().resolve(&["a", "b"], &Namespace::new()).unwrap();
	assert_eq!(take::<Vec<String>>(values.into_iter().next().unwrap()), vec!["a", "b"]);
}
