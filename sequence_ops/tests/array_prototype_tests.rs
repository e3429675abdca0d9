// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use std::{cell::RefCell, rc::Rc};

use sequence_ops::ecmascript::{
    builtins::{ArgumentsList, Array, ArrayPrototype},
    execution::{Agent, ExceptionType, JsError, Options},
    types::{Function, JsString, OrdinaryObject, Value},
};

fn numbers(values: &[f64]) -> Vec<Value> {
    values.iter().copied().map(Value::from).collect()
}

fn elements(value: &Value) -> Vec<Value> {
    value.as_array().expect("result is an Array").to_vec()
}

fn number_arg(args: &ArgumentsList, index: usize) -> f64 {
    args.get(index).as_number().expect("numeric argument")
}

fn double() -> Function {
    Function::new("double", 1, |_, _, args| {
        Ok(Value::Number(number_arg(&args, 0) * 2.0))
    })
}

fn is_even() -> Function {
    Function::new("isEven", 1, |_, _, args| {
        Ok(Value::Boolean(number_arg(&args, 0) % 2.0 == 0.0))
    })
}

fn sum() -> Function {
    Function::new("sum", 2, |_, _, args| {
        Ok(Value::Number(number_arg(&args, 0) + number_arg(&args, 1)))
    })
}

fn point(n: f64, id: &str) -> Value {
    OrdinaryObject::from_properties([("n", Value::from(n)), ("id", Value::from(id))]).into()
}

#[test]
fn map_preserves_length_and_holes() {
    let mut agent = Agent::default();
    let source = Array::from_elements(vec![Some(1.0.into()), None, Some(3.0.into())]);
    let calls = Rc::new(RefCell::new(Vec::new()));
    let recorded = calls.clone();
    let source_for_check = source.clone();
    let callback = Function::new("record", 3, move |_, _, args| {
        assert!(args.get(2).as_array().unwrap().ptr_eq(&source_for_check));
        recorded.borrow_mut().push(number_arg(&args, 1));
        Ok(Value::Number(number_arg(&args, 0) * 10.0))
    });

    let result = agent
        .invoke(source.clone().into(), "map", &[callback.into()])
        .unwrap();
    let result = result.as_array().unwrap();
    assert_eq!(result.len(), 3);
    assert_eq!(
        result.elements(),
        vec![Some(10.0.into()), None, Some(30.0.into())]
    );
    assert_eq!(*calls.borrow(), vec![0.0, 2.0]);
    assert_eq!(source.to_vec(), vec![1.0.into(), Value::Undefined, 3.0.into()]);
}

#[test]
fn filter_keeps_truthy_elements_densely() {
    let mut agent = Agent::default();
    let source = Array::from_elements(vec![
        Some(1.0.into()),
        Some(2.0.into()),
        None,
        Some(4.0.into()),
        Some(5.0.into()),
    ]);
    let result = agent
        .invoke(source.into(), "filter", &[is_even().into()])
        .unwrap();
    assert_eq!(elements(&result), numbers(&[2.0, 4.0]));
    assert!(result.as_array().unwrap().has(1));
}

#[test]
fn for_each_passes_this_arg() {
    let mut agent = Agent::default();
    let context = OrdinaryObject::from_properties([("seen", 0.0)]);
    let callback = Function::new("count", 1, |_, this, _| {
        let this = this.as_object().unwrap();
        let seen = this.get("seen").as_number().unwrap();
        this.set("seen", seen + 1.0);
        Ok(Value::Undefined)
    });
    let source = Array::from_elements(vec![Some(Value::Null), None, Some(Value::Undefined)]);
    let result = agent
        .invoke(
            source.into(),
            "forEach",
            &[callback.into(), context.clone().into()],
        )
        .unwrap();
    assert_eq!(result, Value::Undefined);
    assert_eq!(context.get("seen"), Value::from(2.0));
}

#[test]
fn reduce_sums_with_and_without_initial_value() {
    let mut agent = Agent::default();
    let source = Array::from_values([1.0, 2.0, 3.0, 4.0]);
    let with_initial = agent
        .invoke(source.clone().into(), "reduce", &[sum().into(), 0.0.into()])
        .unwrap();
    assert_eq!(with_initial, Value::from(10.0));
    let without_initial = agent
        .invoke(source.into(), "reduce", &[sum().into()])
        .unwrap();
    assert_eq!(without_initial, Value::from(10.0));
}

#[test]
fn reduce_of_empty_array_throws() {
    let mut agent = Agent::default();
    let err = agent
        .invoke(Array::new().into(), "reduce", &[sum().into()])
        .unwrap_err();
    assert_eq!(err.exception_type(), Some(ExceptionType::TypeError));

    let only_holes = Array::with_length(3);
    let err = agent
        .invoke(only_holes.into(), "reduceRight", &[sum().into()])
        .unwrap_err();
    assert_eq!(err.exception_type(), Some(ExceptionType::TypeError));

    let initial = agent
        .invoke(Array::new().into(), "reduce", &[sum().into(), 7.0.into()])
        .unwrap();
    assert_eq!(initial, Value::from(7.0));
}

#[test]
fn reduce_skips_leading_holes() {
    let mut agent = Agent::default();
    let source = Array::from_elements(vec![None, Some(2.0.into()), Some(3.0.into())]);
    let result = agent
        .invoke(source.into(), "reduce", &[sum().into()])
        .unwrap();
    assert_eq!(result, Value::from(5.0));
}

#[test]
fn reduce_can_read_index_zero_unconditionally() {
    let mut agent = Agent::new(Options {
        reduce_reads_index_zero: true,
    });
    let first_call = Rc::new(RefCell::new(None));
    let recorded = first_call.clone();
    let callback = Function::new("record", 4, move |_, _, args| {
        recorded
            .borrow_mut()
            .get_or_insert_with(|| (args.get(0), args.get(2)));
        Ok(args.get(1))
    });
    let source = Array::from_elements(vec![None, Some(2.0.into()), Some(3.0.into())]);
    let result = agent
        .invoke(source.into(), "reduce", &[callback.into()])
        .unwrap();
    assert_eq!(result, Value::from(3.0));
    assert_eq!(
        *first_call.borrow(),
        Some((Value::Undefined, Value::from(1.0)))
    );
}

#[test]
fn reduce_right_folds_from_the_end() {
    let mut agent = Agent::default();
    let concat = Function::new("concat", 2, |_, _, args| {
        let acc = args.get(0);
        let value = args.get(1);
        Ok(Value::from(format!(
            "{}{}",
            acc.as_string().unwrap(),
            value.as_string().unwrap()
        )))
    });
    let source = Array::from_values(["a", "b", "c"]);
    let result = agent
        .invoke(source.into(), "reduceRight", &[concat.into()])
        .unwrap();
    assert_eq!(result, Value::from("cba"));
}

#[test]
fn some_every_and_find_index_short_circuit() {
    let mut agent = Agent::default();
    let calls = Rc::new(RefCell::new(0));
    let counted = calls.clone();
    let is_two = Function::new("isTwo", 1, move |_, _, args| {
        *counted.borrow_mut() += 1;
        Ok(Value::Boolean(number_arg(&args, 0) == 2.0))
    });
    let source = Array::from_values([1.0, 2.0, 3.0, 2.0]);

    let some = agent
        .invoke(source.clone().into(), "some", &[is_two.clone().into()])
        .unwrap();
    assert_eq!(some, Value::Boolean(true));
    assert_eq!(*calls.borrow(), 2);

    let index = agent
        .invoke(source.clone().into(), "findIndex", &[is_two.clone().into()])
        .unwrap();
    assert_eq!(index, Value::from(1.0));

    let last = agent
        .invoke(source.clone().into(), "findLastIndex", &[is_two.into()])
        .unwrap();
    assert_eq!(last, Value::from(3.0));

    let every = agent
        .invoke(source.into(), "every", &[is_even().into()])
        .unwrap();
    assert_eq!(every, Value::Boolean(false));
}

#[test]
fn empty_quantifiers() {
    let mut agent = Agent::default();
    let empty = || Value::from(Array::new());
    assert_eq!(
        agent.invoke(empty(), "every", &[is_even().into()]),
        Ok(Value::Boolean(true))
    );
    assert_eq!(
        agent.invoke(empty(), "some", &[is_even().into()]),
        Ok(Value::Boolean(false))
    );
    assert_eq!(
        agent.invoke(empty(), "findIndex", &[is_even().into()]),
        Ok(Value::from(-1.0))
    );
    assert_eq!(
        agent.invoke(empty(), "find", &[is_even().into()]),
        Ok(Value::Undefined)
    );
}

#[test]
fn find_family_skips_holes() {
    let mut agent = Agent::default();
    let is_undefined = Function::new("isUndefined", 1, |_, _, args| {
        Ok(Value::Boolean(args.get(0).is_undefined()))
    });
    let source = Array::from_elements(vec![None, Some(1.0.into()), None]);
    for method in ["findIndex", "findLastIndex"] {
        let result = agent
            .invoke(source.clone().into(), method, &[is_undefined.clone().into()])
            .unwrap();
        assert_eq!(result, Value::from(-1.0), "{method}");
    }
    // isEven panics on a non-number, so a hole reaching it fails the test.
    let found = agent
        .invoke(source.into(), "findLast", &[is_even().into()])
        .unwrap();
    assert_eq!(found, Value::Undefined);
}

#[test]
fn includes_uses_same_value_zero() {
    let mut agent = Agent::default();
    let nan = Array::from_values([f64::NAN]);
    assert_eq!(
        agent.invoke(nan.into(), "includes", &[Value::nan()]),
        Ok(Value::Boolean(true))
    );
    let source = Array::from_values([1.0, 2.0, 3.0]);
    assert_eq!(
        agent.invoke(source.clone().into(), "includes", &[3.0.into(), (-1.0).into()]),
        Ok(Value::Boolean(true))
    );
    assert_eq!(
        agent.invoke(source.clone().into(), "includes", &[1.0.into(), (-1.0).into()]),
        Ok(Value::Boolean(false))
    );
    assert_eq!(
        agent.invoke(source.into(), "includes", &[4.0.into()]),
        Ok(Value::Boolean(false))
    );
    let zero = Array::from_values([-0.0]);
    assert_eq!(
        agent.invoke(zero.into(), "includes", &[0.0.into()]),
        Ok(Value::Boolean(true))
    );
}

#[test]
fn includes_reads_holes_but_index_of_skips_them() {
    let mut agent = Agent::default();
    let sparse = Array::with_length(2);
    assert_eq!(
        agent.invoke(sparse.clone().into(), "includes", &[Value::Undefined]),
        Ok(Value::Boolean(true))
    );
    assert_eq!(
        agent.invoke(sparse.into(), "indexOf", &[Value::Undefined]),
        Ok(Value::from(-1.0))
    );
    let nan = Array::from_values([f64::NAN]);
    assert_eq!(
        agent.invoke(nan.into(), "indexOf", &[Value::nan()]),
        Ok(Value::from(-1.0))
    );
}

#[test]
fn last_index_of_searches_backwards() {
    let mut agent = Agent::default();
    let source = Array::from_values([1.0, 2.0, 1.0]);
    assert_eq!(
        agent.invoke(source.clone().into(), "lastIndexOf", &[1.0.into()]),
        Ok(Value::from(2.0))
    );
    assert_eq!(
        agent.invoke(source.clone().into(), "lastIndexOf", &[1.0.into(), 1.0.into()]),
        Ok(Value::from(0.0))
    );
    assert_eq!(
        agent.invoke(source.clone().into(), "lastIndexOf", &[1.0.into(), (-5.0).into()]),
        Ok(Value::from(-1.0))
    );
    assert_eq!(
        agent.invoke(source.into(), "indexOf", &[1.0.into(), 1.0.into()]),
        Ok(Value::from(2.0))
    );
}

#[test]
fn sort_is_stable() {
    let mut agent = Agent::default();
    let source = Array::from_values([
        point(2.0, "A"),
        point(1.0, "B"),
        point(2.0, "C"),
        point(1.0, "D"),
    ]);
    let by_n = Function::new("byN", 2, |_, _, args| {
        let n = |index| args.get(index).as_object().unwrap().get("n").as_number().unwrap();
        Ok(Value::Number(n(0) - n(1)))
    });
    let result = agent
        .invoke(source.clone().into(), "sort", &[by_n.into()])
        .unwrap();
    assert!(result.as_array().unwrap().ptr_eq(&source));
    let ids: Vec<Value> = source
        .to_vec()
        .iter()
        .map(|point| point.as_object().unwrap().get("id"))
        .collect();
    assert_eq!(ids, ["B", "D", "A", "C"].map(Value::from));
}

#[test]
fn default_sort_compares_strings() {
    let mut agent = Agent::default();
    let fruit = Array::from_values(["banana", "apple", "cherry"]);
    agent.invoke(fruit.clone().into(), "sort", &[]).unwrap();
    assert_eq!(fruit.to_vec(), ["apple", "banana", "cherry"].map(Value::from));

    let mixed = Array::from_values([
        Value::from(10.0),
        Value::from("2"),
        Value::from(1.0),
        Value::from("a"),
    ]);
    agent.invoke(mixed.clone().into(), "sort", &[]).unwrap();
    assert_eq!(
        mixed.to_vec(),
        vec![
            Value::from(1.0),
            Value::from(10.0),
            Value::from("2"),
            Value::from("a")
        ]
    );
}

#[test]
fn sort_moves_holes_and_undefined_to_the_end() {
    let mut agent = Agent::default();
    let source = Array::from_elements(vec![
        Some(3.0.into()),
        None,
        Some(Value::Undefined),
        Some(1.0.into()),
    ]);
    agent.invoke(source.clone().into(), "sort", &[]).unwrap();
    assert_eq!(
        source.elements(),
        vec![
            Some(1.0.into()),
            Some(3.0.into()),
            Some(Value::Undefined),
            Some(Value::Undefined)
        ]
    );
}

#[test]
fn sort_leaves_input_untouched_on_error() {
    let mut agent = Agent::default();
    let source = Array::from_values([3.0, 1.0, 2.0]);
    let throws = Function::new("throws", 2, |_, _, _| Err(JsError::new("boom")));
    let err = agent
        .invoke(source.clone().into(), "sort", &[throws.into()])
        .unwrap_err();
    assert_eq!(err.value(), &Value::from("boom"));
    assert_eq!(source.to_vec(), numbers(&[3.0, 1.0, 2.0]));

    let err = agent
        .invoke(source.clone().into(), "sort", &[Value::from(1.0)])
        .unwrap_err();
    assert_eq!(err.exception_type(), Some(ExceptionType::TypeError));
    assert_eq!(source.to_vec(), numbers(&[3.0, 1.0, 2.0]));
}

#[test]
fn to_sorted_copies() {
    let mut agent = Agent::default();
    let source = Array::from_elements(vec![Some(2.0.into()), None, Some(1.0.into())]);
    let sorted = agent
        .invoke(source.clone().into(), "toSorted", &[])
        .unwrap();
    assert_eq!(
        elements(&sorted),
        vec![Value::from(1.0), Value::from(2.0), Value::Undefined]
    );
    assert!(sorted.as_array().unwrap().has(2));
    assert!(!source.has(1));
}

#[test]
fn flat_depth_zero_keeps_nesting() {
    let mut agent = Agent::default();
    let inner = Array::from_values([2.0, 3.0]);
    let source = Array::from_values([Value::from(1.0), inner.clone().into(), Value::from(4.0)]);
    let result = agent
        .invoke(source.into(), "flat", &[0.0.into()])
        .unwrap();
    let result = elements(&result);
    assert_eq!(result.len(), 3);
    assert!(result[1].as_array().unwrap().ptr_eq(&inner));
}

#[test]
fn flat_infinity_flattens_fully_and_is_idempotent() {
    let mut agent = Agent::default();
    let mut nested = Value::from(42.0);
    for _ in 0..6 {
        nested = Array::from_values([nested]).into();
    }
    let once = agent
        .invoke(nested, "flat", &[f64::INFINITY.into()])
        .unwrap();
    assert_eq!(elements(&once), numbers(&[42.0]));
    let twice = agent
        .invoke(once.clone(), "flat", &[f64::INFINITY.into()])
        .unwrap();
    assert_eq!(elements(&twice), elements(&once));
}

#[test]
fn flat_drops_holes_at_every_level() {
    let mut agent = Agent::default();
    let inner = Array::from_elements(vec![Some(4.0.into()), None, Some(5.0.into())]);
    let source = Array::from_elements(vec![
        Some(1.0.into()),
        None,
        Some(3.0.into()),
        Some(inner.into()),
    ]);
    let result = agent
        .invoke(source.into(), "flat", &[2.0.into()])
        .unwrap();
    assert_eq!(elements(&result), numbers(&[1.0, 3.0, 4.0, 5.0]));
}

#[test]
fn flat_defaults_to_one_level() {
    let mut agent = Agent::default();
    let source = Array::from_values([
        Value::from(1.0),
        Array::from_values([Value::from(2.0), Array::from_values([3.0]).into()]).into(),
    ]);
    let result = agent.invoke(source.clone().into(), "flat", &[]).unwrap();
    let result = elements(&result);
    assert_eq!(result.len(), 3);
    assert_eq!(elements(&result[2]), numbers(&[3.0]));

    let negative = agent
        .invoke(source.into(), "flat", &[(-3.0).into()])
        .unwrap();
    assert_eq!(elements(&negative).len(), 2);
}

#[test]
fn flat_map_splices_one_level() {
    let mut agent = Agent::default();
    let pair = Function::new("pair", 1, |_, _, args| {
        let x = number_arg(&args, 0);
        Ok(Array::from_values([
            Value::from(x),
            Array::from_values([x * 2.0]).into(),
        ])
        .into())
    });
    let source = Array::from_elements(vec![Some(1.0.into()), None, Some(2.0.into())]);
    let result = agent
        .invoke(source.into(), "flatMap", &[pair.into()])
        .unwrap();
    let result = elements(&result);
    assert_eq!(result.len(), 4);
    assert_eq!(result[0], Value::from(1.0));
    assert_eq!(elements(&result[1]), numbers(&[2.0]));
    assert_eq!(result[2], Value::from(2.0));
    assert_eq!(elements(&result[3]), numbers(&[4.0]));

    let scalar = agent
        .invoke(Array::from_values([1.0, 2.0]).into(), "flatMap", &[double().into()])
        .unwrap();
    assert_eq!(elements(&scalar), numbers(&[2.0, 4.0]));
}

#[test]
fn non_callable_callbacks_throw_before_iterating() {
    let mut agent = Agent::default();
    let source = Array::from_values([1.0, 2.0]);
    for method in [
        "map",
        "filter",
        "forEach",
        "reduce",
        "reduceRight",
        "some",
        "every",
        "find",
        "findIndex",
        "findLast",
        "findLastIndex",
        "flatMap",
        "sort",
        "toSorted",
    ] {
        let err = agent
            .invoke(source.clone().into(), method, &[Value::from("not a function")])
            .unwrap_err();
        assert_eq!(
            err.exception_type(),
            Some(ExceptionType::TypeError),
            "{method}"
        );
        assert_eq!(source.to_vec(), numbers(&[1.0, 2.0]), "{method}");
    }
}

#[test]
fn callback_errors_propagate_and_stop_iteration() {
    let mut agent = Agent::default();
    let calls = Rc::new(RefCell::new(0));
    let counted = calls.clone();
    let fails_on_two = Function::new("failsOnTwo", 1, move |_, _, args| {
        *counted.borrow_mut() += 1;
        if number_arg(&args, 0) == 2.0 {
            Err(JsError::new("boom"))
        } else {
            Ok(Value::Undefined)
        }
    });
    let err = agent
        .invoke(
            Array::from_values([1.0, 2.0, 3.0]).into(),
            "map",
            &[fails_on_two.into()],
        )
        .unwrap_err();
    assert_eq!(err.into_value(), Value::from("boom"));
    assert_eq!(*calls.borrow(), 2);
}

#[test]
fn array_like_objects_are_traversed_generically() {
    let mut agent = Agent::default();
    let array_like = OrdinaryObject::from_properties([
        ("length", Value::from(3.0)),
        ("0", Value::from(1.0)),
        ("2", Value::from(3.0)),
    ]);
    let mapped = agent
        .invoke(array_like.clone().into(), "map", &[double().into()])
        .unwrap();
    assert_eq!(
        mapped.as_array().unwrap().elements(),
        vec![Some(2.0.into()), None, Some(6.0.into())]
    );
    assert_eq!(
        agent.invoke(array_like.clone().into(), "join", &[]),
        Ok(Value::from("1,,3"))
    );

    agent
        .invoke(array_like.clone().into(), "sort", &[])
        .unwrap();
    assert_eq!(array_like.get("0"), Value::from(1.0));
    assert_eq!(array_like.get("1"), Value::from(3.0));
    assert_eq!(array_like.get("2"), Value::Undefined);
    assert!(array_like.has_property("2"));
}

#[cfg(feature = "array-like-strings")]
#[test]
fn strings_are_array_like() {
    let mut agent = Agent::default();
    let is_c = Function::new("isC", 1, |_, _, args| {
        Ok(Value::Boolean(args.get(0) == Value::from("c")))
    });
    assert_eq!(
        agent.invoke("abc".into(), "findIndex", &[is_c.into()]),
        Ok(Value::from(2.0))
    );
    assert_eq!(
        agent.invoke("abc".into(), "includes", &["b".into()]),
        Ok(Value::Boolean(true))
    );
    let err = agent.invoke("ba".into(), "sort", &[]).unwrap_err();
    assert_eq!(err.exception_type(), Some(ExceptionType::TypeError));
}

#[test]
fn join_renders_cycles_as_empty() {
    let mut agent = Agent::default();
    let source = Array::from_values([1.0, 2.0]);
    source.push(source.clone());
    assert_eq!(
        agent.invoke(source.clone().into(), "toString", &[]),
        Ok(Value::from("1,2,"))
    );
    assert_eq!(
        agent.invoke(
            source.into(),
            "join",
            &[Value::from(JsString::from_str(" - "))]
        ),
        Ok(Value::from("1 - 2 - "))
    );
}

#[test]
fn builtins_can_be_called_directly() {
    let mut agent = Agent::default();
    let source = Array::from_values([1.0, 2.0, 3.0]);
    let result = ArrayPrototype::filter(
        &mut agent,
        source.into(),
        ArgumentsList(&[is_even().into()]),
    )
    .unwrap();
    assert_eq!(elements(&result), numbers(&[2.0]));
}

#[cfg(feature = "array-like-strings")]
#[test]
fn for_each_visits_every_code_unit_of_a_long_string() {
    let mut agent = Agent::default();
    let text = format!("{}😀", "a".repeat(100_000));
    let visited = Rc::new(RefCell::new(Vec::new()));
    let recorded = visited.clone();
    let callback = Function::new("record", 2, move |_, _, args| {
        recorded.borrow_mut().push(number_arg(&args, 1));
        Ok(Value::Undefined)
    });
    agent
        .invoke(text.as_str().into(), "forEach", &[callback.into()])
        .unwrap();
    let visited = visited.borrow();
    assert_eq!(visited.len(), 100_002);
    assert!(visited.iter().enumerate().all(|(i, &k)| k == i as f64));
}

#[test]
fn sort_of_length_one_or_less_returns_the_input() {
    let mut agent = Agent::default();
    let empty = Array::new();
    let sorted = agent.invoke(empty.clone().into(), "sort", &[]).unwrap();
    assert!(sorted.as_array().unwrap().ptr_eq(&empty));
    assert!(empty.is_empty());

    let single = Array::from_values([7.0]);
    let sorted = agent.invoke(single.clone().into(), "sort", &[]).unwrap();
    assert!(sorted.as_array().unwrap().ptr_eq(&single));
    assert_eq!(single.to_vec(), numbers(&[7.0]));

    let hole = Array::with_length(1);
    let sorted = agent.invoke(hole.clone().into(), "sort", &[]).unwrap();
    assert!(sorted.as_array().unwrap().ptr_eq(&hole));
    assert_eq!(hole.len(), 1);
    assert!(!hole.has(0));
}

#[test]
fn flat_of_a_self_containing_array() {
    let mut agent = Agent::default();
    let source = Array::from_values([1.0]);
    source.push(source.clone());

    let bounded = agent
        .invoke(source.clone().into(), "flat", &[2.0.into()])
        .unwrap();
    let bounded = elements(&bounded);
    assert_eq!(bounded.len(), 3);
    assert_eq!(bounded[..2], numbers(&[1.0, 1.0])[..]);
    assert!(bounded[2].as_array().unwrap().ptr_eq(&source));

    let err = agent
        .invoke(source.into(), "flat", &[f64::INFINITY.into()])
        .unwrap_err();
    assert_eq!(err.exception_type(), Some(ExceptionType::RangeError));
}

#[test]
fn flat_descends_through_deep_nesting() {
    let mut agent = Agent::default();
    let mut nested = Value::from(42.0);
    for _ in 0..400 {
        nested = Array::from_values([nested]).into();
    }
    let result = agent
        .invoke(nested, "flat", &[f64::INFINITY.into()])
        .unwrap();
    assert_eq!(elements(&result), numbers(&[42.0]));
}

#[test]
fn callbacks_receive_this_arg() {
    let mut agent = Agent::default();
    let context: Value = OrdinaryObject::from_properties([("answer", 42.0)]).into();
    let answer = Function::new("answer", 1, |_, this, _| {
        Ok(this.as_object().expect("thisArg is the context").get("answer"))
    });
    let source = || Value::from(Array::from_values([1.0, 2.0]));
    let mut call = |method: &str| {
        agent
            .invoke(source(), method, &[answer.clone().into(), context.clone()])
            .unwrap()
    };

    assert_eq!(elements(&call("map")), numbers(&[42.0, 42.0]));
    assert_eq!(elements(&call("filter")), numbers(&[1.0, 2.0]));
    assert_eq!(call("some"), Value::Boolean(true));
    assert_eq!(call("every"), Value::Boolean(true));
    assert_eq!(call("findIndex"), Value::from(0.0));
    assert_eq!(elements(&call("flatMap")), numbers(&[42.0, 42.0]));
}

#[test]
fn thrown_cyclic_values_render() {
    let mut agent = Agent::default();
    let thrown = Array::from_values([1.0]);
    thrown.push(thrown.clone());
    let throws = Function::new("throws", 1, move |_, _, _| Err(JsError::new(thrown.clone())));
    let err = agent
        .invoke(Array::from_values([0.0]).into(), "forEach", &[throws.into()])
        .unwrap_err();
    assert_eq!(err.to_string(), "Uncaught [1, [Circular]]");
}
