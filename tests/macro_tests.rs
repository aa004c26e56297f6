use serde::Serialize;
use textfmt::{format_value, params, Number, Value};

#[test]
fn test_params_literals() {
    assert_eq!(params!(null), Value::Null);
    assert_eq!(params!(false), Value::Bool(false));
    assert_eq!(params!(7), Value::Number(Number::Integer(7)));
    assert_eq!(params!("x"), Value::from("x"));
}

#[test]
fn test_params_trailing_commas() {
    let value = params!({
        "a": [1, 2,],
        "b": { "c": null, },
    });
    assert_eq!(value.get_path("a.1"), Some(&Value::from(2)));
    assert_eq!(value.get_path("b.c"), Some(&Value::Null));
}

#[test]
fn test_params_with_variables() {
    #[derive(Serialize)]
    struct Point {
        x: i32,
        y: i32,
    }

    let point = Point { x: 3, y: -4 };
    let label = "origin offset";
    let value = params!({ "p": point, "label": label, "tags": (vec!["a", "b"]) });
    assert_eq!(
        format_value("${label}: ${p.x}/${p.y} [${tags}]", &value).unwrap(),
        "origin offset: 3/-4 [a], [b]"
    );
}

#[test]
fn test_params_as_positional_arguments() {
    let args = params!(["first", 2, null, { "k": "v" }]);
    assert_eq!(format_value("${}|${}|${}|${3.k}", &args).unwrap(), "first|2||v");
}

#[test]
fn test_params_key_order() {
    let value = params!({ "z": 1, "a": 2, "m": 3 });
    assert_eq!(format_value("${}", &value).unwrap(), "{z=1, a=2, m=3}");
}
