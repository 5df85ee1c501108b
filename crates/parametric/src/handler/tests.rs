use std::sync::Mutex;

use pretty_assertions::assert_eq;

use super::*;

#[derive(Default)]
struct Counter {
	total: Mutex<i64>,
}

impl Counter {
	fn add(&self, amount: i64, times: u32) -> HandlerResult {
		*self.total.lock().unwrap() += amount * i64::from(times);
		Ok(())
	}

	fn reset(&self) -> HandlerResult {
		*self.total.lock().unwrap() = 0;
		Ok(())
	}
}

#[test]
fn signature_follows_function_parameters() {
	let def = HandlerDefinition::new("add", Arc::new(Counter::default()), Counter::add);
	assert_eq!(def.signature(), &[TypeKey::of::<i64>(), TypeKey::of::<u32>()]);

	let def = HandlerDefinition::new("reset", Arc::new(Counter::default()), Counter::reset);
	assert!(def.signature().is_empty());
}

#[test]
fn apply_downcasts_arguments_in_order() {
	let counter = Arc::new(Counter::default());
	let def = HandlerDefinition::new("add", counter.clone(), Counter::add);

	let outcome = def.apply(vec![Box::new(5_i64) as Value, Box::new(3_u32)]).unwrap();
	assert!(outcome.is_ok());
	assert_eq!(*counter.total.lock().unwrap(), 15);
}

#[test]
fn wrong_arity_is_an_access_error() {
	let def = HandlerDefinition::new("add", Arc::new(Counter::default()), Counter::add);
	let err = def.apply(vec![Box::new(5_i64) as Value]).unwrap_err();
	assert_eq!(err, AccessError::Arity { expected: 2, found: 1 });
}

#[test]
fn wrong_type_is_an_access_error() {
	let def = HandlerDefinition::new("add", Arc::new(Counter::default()), Counter::add);
	let err = def.apply(vec![Box::new(5_i64) as Value, Box::new("three")]).unwrap_err();
	assert_eq!(err, AccessError::ArgumentType { index: 1, expected: "u32" });
}

#[test]
fn closures_are_handlers() {
	let counter = Arc::new(Counter::default());
	let def = HandlerDefinition::new("double", counter.clone(), |c: &Counter, n: i64| -> HandlerResult {
		*c.total.lock().unwrap() += n * 2;
		Ok(())
	});

	def.apply(vec![Box::new(4_i64) as Value]).unwrap().unwrap();
	assert_eq!(*counter.total.lock().unwrap(), 8);
}

#[test]
fn identity_names_receiver_and_handler() {
	let def = HandlerDefinition::new("add", Arc::new(Counter::default()), Counter::add);
	assert_eq!(def.identity(), "Counter.add");
	assert_eq!(def.name(), "add");
	assert!(def.command_spec().is_none());
}

#[test]
fn short_type_name_strips_paths() {
	assert_eq!(short_type_name("a::b::Greeter"), "Greeter");
	assert_eq!(short_type_name("a::Wrapper<b::Inner>"), "Wrapper<b::Inner>");
	assert_eq!(short_type_name("Plain"), "Plain");
}
