/// Builds a [`Value`](crate::Value) from a JSON-like literal.
///
/// Objects keep their key order. Leaves that are not `null`, `true`,
/// `false`, arrays or objects go through [`to_value`](crate::to_value) and
/// become [`Value::Null`](crate::Value::Null) if they cannot be converted.
/// A leaf is a single token tree, so negative literals (`-1`) are accepted
/// but other compound expressions need parentheses: `"len": (name.len())`.
///
/// # Examples
///
/// ```rust
/// use textfmt::{format_value, params};
///
/// let params = params!({
///     "user": { "name": "Bo", "admin": true },
///     "tags": ["a", "b"],
///     "offset": -2
/// });
/// assert_eq!(format_value("${user.name} ${offset}", &params).unwrap(), "Bo -2");
/// assert_eq!(format_value("${tags}", &params).unwrap(), "a,b");
/// ```
#[macro_export]
macro_rules! params {
    (@array [$($done:expr,)*]) => {
        vec![$($done,)*]
    };

    (@array [$($done:expr,)*] - $value:literal $(, $($rest:tt)*)?) => {
        $crate::params!(@array [$($done,)* $crate::params!(-$value),] $($($rest)*)?)
    };

    (@array [$($done:expr,)*] $value:tt $(, $($rest:tt)*)?) => {
        $crate::params!(@array [$($done,)* $crate::params!($value),] $($($rest)*)?)
    };

    (@object $object:ident) => {};

    (@object $object:ident $key:literal : - $value:literal $(, $($rest:tt)*)?) => {
        $object.insert($key.to_string(), $crate::params!(-$value));
        $crate::params!(@object $object $($($rest)*)?);
    };

    (@object $object:ident $key:literal : $value:tt $(, $($rest:tt)*)?) => {
        $object.insert($key.to_string(), $crate::params!($value));
        $crate::params!(@object $object $($($rest)*)?);
    };

    (null) => {
        $crate::Value::Null
    };

    (true) => {
        $crate::Value::Bool(true)
    };

    (false) => {
        $crate::Value::Bool(false)
    };

    ([]) => {
        $crate::Value::Array(vec![])
    };

    ([ $($elements:tt)+ ]) => {
        $crate::Value::Array($crate::params!(@array [] $($elements)+))
    };

    ({}) => {
        $crate::Value::Object($crate::ValueMap::new())
    };

    ({ $($entries:tt)+ }) => {{
        let mut object = $crate::ValueMap::new();
        $crate::params!(@object object $($entries)+);
        $crate::Value::Object(object)
    }};

    ($other:expr) => {
        $crate::to_value(&$other).unwrap_or($crate::Value::Null)
    };
}
