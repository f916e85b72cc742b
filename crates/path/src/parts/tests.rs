use pretty_assertions::assert_eq;
use rstest::rstest;

use super::*;

#[test]
fn test_parse_attributes() {
	let parts = PathParts::parse(r#"//ldml/dates/calendars/calendar[@type="gregorian"]/eras/eraAbbr/era[@type="0"][@alt="variant"]"#).unwrap();
	assert_eq!(parts.len(), 7);
	assert_eq!(parts.element(3).unwrap().attribute("type"), Some("gregorian"));
	let last = parts.element_from_end(0).unwrap();
	assert_eq!(last.name, "era");
	assert_eq!(last.attribute("alt"), Some("variant"));
	assert_eq!(parts.find_attribute("type"), Some("0"));
}

#[test]
fn test_values_may_contain_delimiters() {
	let raw = r#"//ldml/x[@path="../a[@type='b']/c"]/y"#;
	let parts = PathParts::parse(raw).unwrap();
	assert_eq!(parts.len(), 3);
	assert_eq!(parts.element(1).unwrap().attribute("path"), Some("../a[@type='b']/c"));
	assert_eq!(parts.to_string(), raw);
}

#[test]
fn test_single_quotes_print_as_double() {
	let parts = PathParts::parse("//a[@type='x']").unwrap();
	assert_eq!(parts.to_string(), r#"//a[@type="x"]"#);
}

#[test]
fn test_attribute_edits() {
	let mut parts = PathParts::parse(r#"//a/b[@type="x"][@draft="provisional"]"#).unwrap();
	let last = &mut parts.elements_mut()[1];
	last.set_attribute("type", "y");
	last.set_attribute("alt", "short");
	assert_eq!(last.remove_attribute("draft").as_deref(), Some("provisional"));
	assert_eq!(parts.to_string(), r#"//a/b[@type="y"][@alt="short"]"#);
	assert!(parts.remove_attribute_everywhere("alt"));
	assert!(!parts.remove_attribute_everywhere("alt"));
}

#[rstest]
#[case("ldml/a")]
#[case("/ldml/a")]
#[case("//ldml//a")]
#[case("//ldml/a[type=\"x\"]")]
#[case("//ldml/a[@type=x]")]
#[case("//ldml/a[@type=\"x\"")]
#[case("//ldml/a[@type=\"x]")]
#[case("//ldml/a/")]
fn test_rejects_malformed(#[case] raw: &str) {
	assert!(PathParts::parse(raw).is_err(), "{raw} should be rejected");
}

#[test]
fn test_unterminated_quote_error() {
	assert_eq!(
		PathParts::parse(r#"//a[@type="x]"#).unwrap_err(),
		PathError::UnterminatedQuote(r#"//a[@type="x]"#.to_string())
	);
}
