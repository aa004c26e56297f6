//! Behaviour of the template language, one construct at a time.

use serde_json::json;
use textfmt::{format, format_alt, format_simple, format_value, params, FormatOptions, Formatter};

#[test]
fn test_literal_text_is_idempotent() {
    for pattern in ["", "plain", "100% {sure} (maybe) [x]", "a;b=c^d+e!f*g#h"] {
        assert_eq!(format(pattern, &json!({ "x": 1 })).unwrap(), pattern);
        assert_eq!(format(pattern, &[1, 2]).unwrap(), pattern);
    }
}

#[test]
fn test_escaped_opener() {
    let params = json!({ "B": "value" });
    assert_eq!(format("A\\${B}", &params).unwrap(), "A${B}");
    assert_eq!(format("A\\${B} ${B}", &params).unwrap(), "A${B} value");
}

#[test]
fn test_escape_only_structural_characters() {
    let params = json!({ "dir": "temp" });
    assert_eq!(format("C:\\Users\\Public ${dir}", &params).unwrap(), "C:\\Users\\Public temp");
    assert_eq!(format("C:\\Users\\${dir}", &params).unwrap(), "C:\\Users${dir}");
    assert_eq!(format("\\n\\t", &params).unwrap(), "\\n\\t");
    assert_eq!(format("end\\", &params).unwrap(), "end\\");
}

#[test]
fn test_positional_threading() {
    assert_eq!(format("${}-${}", &["a", "b"]).unwrap(), "a-b");
    assert_eq!(format("${}-${}-${}", &["a", "b"]).unwrap(), "a-b-");
    assert_eq!(format("${1}${}${}", &["a", "b"]).unwrap(), "bab");
}

#[test]
fn test_property_path() {
    let params = json!({ "user": { "name": "Bo" } });
    assert_eq!(format("Hi ${user.name}", &params).unwrap(), "Hi Bo");
    assert_eq!(format("Hi ${user.age}!", &params).unwrap(), "Hi !");
}

#[test]
fn test_sequence_expansion() {
    let params = json!({ "x": [1, 2, 3] });
    assert_eq!(format("${x}", &params).unwrap(), "1,2,3");
    assert_eq!(format("${x[ + ;]}", &params).unwrap(), "1 + 2 + 3");
    assert_eq!(format("${x[!<;+>;0.0]}", &params).unwrap(), "<1.0>,2.0>,3.0>");
}

#[test]
fn test_sequence_repeats_bracketed_text() {
    let params = json!({ "x": [1, 2, 3] });
    let out = format("[${x}]", &params).unwrap();
    assert_eq!(out, "[1],[2],[3]");
    assert_eq!(out.matches('[').count(), 3);
    assert!(!out.starts_with(',') && !out.ends_with(','));
    assert_eq!(format("[${x[ ;]}]", &params).unwrap(), "[1] [2] [3]");
}

#[test]
fn test_sequence_repeats_trailing_text() {
    let params = json!({ "x": [1, 2, 3] });
    assert_eq!(format("${x}; ", &params).unwrap(), "1; ,2; ,3; ");
    assert_eq!(format("${x[;]}; ", &params).unwrap(), "1; 2; 3; ");
    assert_eq!(
        format("- ${x[;]}\n", &json!({ "x": ["a", "b"] })).unwrap(),
        "- a\n- b\n"
    );
}

#[test]
fn test_sequence_with_empty_elements() {
    let params = json!({ "x": ["a", null, "", "d"] });
    assert_eq!(format("${x[/;;^_]}", &params).unwrap(), "a/_/_/d");
    assert_eq!(format("(${x[!items: ]})", &json!({ "x": [] })).unwrap(), "()");
}

#[test]
fn test_mapping_with_wildcard() {
    let pattern = "${code[#1=A;2=B;*=Z]}";
    assert_eq!(format(pattern, &json!({ "code": 1 })).unwrap(), "A");
    assert_eq!(format(pattern, &json!({ "code": 9 })).unwrap(), "Z");
    assert_eq!(format(pattern, &json!({ "code": 2 })).unwrap(), "B");
}

#[test]
fn test_mapping_first_match_wins() {
    let pattern = "${v[#*=any;1=one]}";
    assert_eq!(format(pattern, &json!({ "v": 1 })).unwrap(), "any");
    assert_eq!(format("${v[#a=x;b=y]}", &json!({ "v": "c" })).unwrap(), "");
}

#[test]
fn test_mapping_keys_are_trimmed() {
    let pattern = "${v[# yes = Y ; no = N ]}";
    assert_eq!(format(pattern, &json!({ "v": "yes" })).unwrap(), " Y ");
    assert_eq!(format(pattern, &json!({ "v": "no" })).unwrap(), " N ");
}

#[test]
fn test_json_encoding() {
    let params = json!({ "v": "a\"b\nc" });
    assert_eq!(format("${v[#json]}", &params).unwrap(), "a\\\"b\\nc");
}

#[test]
fn test_xml_encoding() {
    let params = json!({ "v": "a\"b\nc" });
    assert_eq!(format("${v[#xml]}", &params).unwrap(), "a&quot;b\nc");
    assert_eq!(
        format("${v[#XML]}", &json!({ "v": "<&'>" })).unwrap(),
        "&lt;&amp;&apos;&gt;"
    );
}

#[test]
fn test_unknown_encoding_is_passthrough() {
    let params = json!({ "v": "<a>" });
    assert_eq!(format("${v[#yaml]}", &params).unwrap(), "<a>");
}

#[test]
fn test_template_text_is_never_encoded() {
    let params = json!({ "v": "&" });
    assert_eq!(format("<&>${v[#xml]}", &params).unwrap(), "<&>&amp;");
}

#[test]
fn test_empty_guard() {
    assert_eq!(format("${x[^(none)]}", &json!({ "x": null })).unwrap(), "(none)");
    assert_eq!(format("${x[^(none)]}", &json!({ "x": "v" })).unwrap(), "v");
    assert_eq!(format("${missing[^(none)]}", &json!({})).unwrap(), "(none)");
}

#[test]
fn test_prefix_and_suffix_guards() {
    let pattern = "${name}${city[, ;;+!]}";
    assert_eq!(
        format(pattern, &json!({ "name": "Bo", "city": "Oslo" })).unwrap(),
        "Bo, Oslo!"
    );
    assert_eq!(
        format(pattern, &json!({ "name": "Bo", "city": null })).unwrap(),
        "Bo"
    );
    // A lone bare segment is the pattern, not a prefix.
    assert_eq!(
        format("${city[, ]}", &json!({ "city": "Oslo" })).unwrap(),
        "Oslo"
    );
}

#[test]
fn test_nested_alternation_two_levels() {
    let params = json!({
        "order": {
            "id": 7,
            "customer": { "name": "Bo", "tier": "gold" }
        }
    });
    let pattern = "${order[#*=#$(id) for $(customer[#*=${name} (${tier[#gold=*;*=-]})])]}";
    assert_eq!(format(pattern, &params).unwrap(), "#7 for Bo (*)");
}

#[test]
fn test_nested_alternation_three_levels() {
    let params = json!({ "a": { "b": { "c": { "d": "deep" } } } });
    let pattern = "<${a[#*=[$(b[#*={${c[#*=$(d)]}}])]]}>";
    assert_eq!(format(pattern, &params).unwrap(), "<[{deep}]>");
}

#[test]
fn test_nested_template_sees_value_as_argument() {
    let params = json!({ "tags": ["x", "y"] });
    assert_eq!(
        format("${tags[ ;;#*=<$()>]}", &params).unwrap(),
        "<x> <y>"
    );
}

#[test]
fn test_unterminated_placeholders_are_text() {
    let params = json!({ "a": 1 });
    assert_eq!(format("${a", &params).unwrap(), "${a");
    // An unclosed modifier bracket becomes part of the name.
    assert_eq!(format("x${a[#json}y", &params).unwrap(), "xy");
    assert_eq!(format("${a} and ${", &params).unwrap(), "1 and ${");
}

#[test]
fn test_alternate_style_entry_point() {
    let params = json!({ "n": 5 });
    assert_eq!(format_alt("$(n) ${n}", &params).unwrap(), "5 ${n}");
    assert_eq!(
        format_alt("$(n[#*=${}!])", &params).unwrap(),
        "5!"
    );
}

#[test]
fn test_simplified_syntax_entry_point() {
    let params = json!({ "who": "Bo", "list": [1, 2] });
    assert_eq!(format_simple("Hi {who}, $5", &params).unwrap(), "Hi Bo, $5");
    assert_eq!(
        format_simple("{list[;#*=[()]]}", &params).unwrap(),
        "[1],[2]"
    );
}

#[test]
fn test_date_patterns() {
    let params = params!({ "at": "2024-03-09T14:05:00Z", "day": "2024-12-24" });
    assert_eq!(format_value("${at[%H:%M]}", &params).unwrap(), "14:05");
    assert_eq!(format_value("${day[%e %b]}", &params).unwrap(), "24 Dec");
    assert_eq!(format_value("${at}", &params).unwrap(), "2024-03-09T14:05:00Z");
}

#[test]
fn test_decimal_patterns() {
    let params = params!({ "n": 1234567.891, "r": 0.256, "i": 42 });
    assert_eq!(format_value("${n[#,##0.00]}", &params).unwrap(), "1,234,567.89");
    assert_eq!(format_value("${r[0.0%]}", &params).unwrap(), "25.6%");
    assert_eq!(format_value("${i[0000]}", &params).unwrap(), "0042");
    assert_eq!(format_value("${i['No. '#]}", &params).unwrap(), "No. 42");
}

#[test]
fn test_bad_patterns_render_empty() {
    let params = params!({ "n": 1, "d": "2024-03-09" });
    assert_eq!(format_value("[${n[0.0.0]}]", &params).unwrap(), "[]");
    assert_eq!(format_value("[${d[%Q]}]", &params).unwrap(), "[]");
    assert_eq!(format_value("[${n[0.0.0;^?]}]", &params).unwrap(), "[?]");
}

#[test]
fn test_custom_separator_option() {
    let formatter = Formatter::new(FormatOptions::new().with_separator("; "));
    let params = params!({ "x": ["a", "b"] });
    assert_eq!(formatter.format_value("${x}", &params).unwrap(), "a; b");
    assert_eq!(formatter.format_value("${x[|;]}", &params).unwrap(), "a|b");
}

#[test]
fn test_custom_escape_character() {
    let formatter = Formatter::new(FormatOptions::new().with_escape(Some('~')));
    let params = params!({ "a": 1 });
    assert_eq!(formatter.format_value("~${a} \\${a}", &params).unwrap(), "${a} \\1");
    assert_eq!(formatter.format_value("~~${a}", &params).unwrap(), "~1");
}
