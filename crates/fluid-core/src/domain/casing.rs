//! Identifier case conversion.
//!
//! Every conversion goes through [`to_kebab`] first: the human-entered name is
//! normalised to a canonical kebab form, and the other casings are derived
//! from that kebab string.
//!
//! ## Kebab detection
//!
//! The input is classified by a single dominant separator style, checked in
//! this order:
//!
//! | Style        | Detected by                          | Example          |
//! |--------------|--------------------------------------|------------------|
//! | Title/space  | contains `' '`                       | `"First Name"`   |
//! | camel/Pascal | uppercase letter after index 0       | `"buildRequest"` |
//! | snake        | contains `'_'`                       | `"base_api"`     |
//! | passthrough  | anything else                        | `"portal-ionic"` |
//!
//! A string without any lowercase letter (`"ID"`, `"BASE_API"`) is an
//! acronym, not camel case, and never takes the camel branch. Every all-caps
//! word stays whole, so `"AB"` gives `ab` and `"A1B"` gives `a1b` rather
//! than `a-b` and `a1-b`.
//!
//! The final `"--"` collapse is a single pass: `"a---b"` becomes `"a--b"`.
//! Generated artifacts depend on this exact output.
//!
//! ## Examples
//!
//! | Input           | kebab          | camel         | Pascal        | snake          | title          |
//! |-----------------|----------------|---------------|---------------|----------------|----------------|
//! | `"First Name"`  | `first-name`   | `firstName`   | `FirstName`   | `first_name`   | `First Name`   |
//! | `"buildRequest"`| `build-request`| `buildRequest`| `BuildRequest`| `build_request`| `Build Request`|
//! | `"base_api"`    | `base-api`     | `baseApi`     | `BaseApi`     | `base_api`     | `Base Api`     |

/// Convert any reasonably-formed identifier to kebab-case.
pub fn to_kebab(input: &str) -> String {
    let stripped: String = input
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | ' '))
        .collect();

    let shaped = if stripped.contains(' ') {
        stripped.replace(' ', "-")
    } else if is_camel_like(&stripped) {
        split_humps(&stripped)
    } else if stripped.contains('_') {
        stripped.replace('_', "-")
    } else {
        stripped
    };

    let lowered: String = shaped
        .to_ascii_lowercase()
        .chars()
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || *c == '-')
        .collect();

    lowered.trim_matches('-').replace("--", "-")
}

/// Convert to camelCase (`"first-name"` → `"firstName"`).
pub fn to_camel(input: &str) -> String {
    join_humps(&to_kebab(input), false, None)
}

/// Convert to PascalCase (`"first-name"` → `"FirstName"`).
pub fn to_pascal(input: &str) -> String {
    join_humps(&to_kebab(input), true, None)
}

/// Convert to snake_case (`"First Name"` → `"first_name"`).
pub fn to_snake(input: &str) -> String {
    to_kebab(input).replace('-', "_")
}

/// Convert to Title Case (`"first-name"` → `"First Name"`).
pub fn to_title(input: &str) -> String {
    join_humps(&to_kebab(input), true, Some(' '))
}

/// `true` when an uppercase letter appears after the first character and the
/// string is not an all-caps acronym.
fn is_camel_like(s: &str) -> bool {
    if s.len() <= 1 {
        return false;
    }
    let has_inner_upper = s.bytes().skip(1).any(|b| b.is_ascii_uppercase());
    let has_lower = s.bytes().any(|b| b.is_ascii_lowercase());
    has_inner_upper && has_lower
}

/// Insert `-` before every uppercase letter after index 0.
fn split_humps(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 4);
    for (i, c) in s.chars().enumerate() {
        if i > 0 && c.is_ascii_uppercase() {
            out.push('-');
        }
        out.push(c);
    }
    out
}

/// Walk a kebab string, consuming each `-` and uppercasing the character that
/// follows it. `separator` is emitted in place of the consumed `-`.
fn join_humps(kebab: &str, upper_first: bool, separator: Option<char>) -> String {
    let mut out = String::with_capacity(kebab.len());
    let mut upper_next = false;

    for (i, c) in kebab.chars().enumerate() {
        if upper_next || (upper_first && i == 0) {
            out.push(c.to_ascii_uppercase());
            upper_next = false;
        } else if c == '-' {
            upper_next = true;
            if let Some(sep) = separator {
                out.push(sep);
            }
        } else {
            out.push(c);
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    // ---------------------------------------------------------------------
    // to_kebab
    // ---------------------------------------------------------------------

    #[test]
    fn all_caps_words_are_not_split() {
        assert_eq!(to_kebab("ID"), "id");
        assert_eq!(to_kebab("AB"), "ab");
        assert_eq!(to_kebab("A1B"), "a1b");
        assert_eq!(to_kebab("BASE_API"), "base-api");
        assert_eq!(to_pascal("AB"), "Ab");
    }

    #[test]
    fn kebab_from_title_case() {
        assert_eq!(to_kebab("First Name"), "first-name");
        assert_eq!(to_kebab("Personal Details"), "personal-details");
    }

    #[test]
    fn kebab_from_camel_and_pascal() {
        assert_eq!(to_kebab("buildRequest"), "build-request");
        assert_eq!(to_kebab("BuildRequest"), "build-request");
        assert_eq!(to_kebab("loginAttempts"), "login-attempts");
    }

    #[test]
    fn kebab_from_snake() {
        assert_eq!(to_kebab("base_api"), "base-api");
        assert_eq!(to_kebab("portal_vuetify_v2"), "portal-vuetify-v2");
    }

    #[test]
    fn kebab_from_acronyms() {
        assert_eq!(to_kebab("ID"), "id");
        assert_eq!(to_kebab("BASE_API"), "base-api");
    }

    #[test]
    fn kebab_passthrough() {
        assert_eq!(to_kebab("portal-ionic"), "portal-ionic");
        assert_eq!(to_kebab("administrator"), "administrator");
    }

    #[test]
    fn space_wins_over_camel_and_underscore() {
        // Space style takes priority; the underscore is stripped afterwards.
        assert_eq!(to_kebab("my_App name"), "myapp-name");
        assert_eq!(to_kebab("Build PARAMETERS"), "build-parameters");
    }

    #[test]
    fn camel_wins_over_underscore() {
        assert_eq!(to_kebab("baseApi_v2"), "base-apiv2");
    }

    #[test]
    fn leading_capital_with_underscore_is_snake() {
        assert_eq!(to_kebab("Hello_world"), "hello-world");
    }

    #[test]
    fn kebab_strips_punctuation() {
        assert_eq!(to_kebab("Fluid!"), "fluid");
        assert_eq!(to_kebab("v2.0.alpha"), "v20alpha");
        assert_eq!(to_kebab("  padded  "), "padded");
    }

    #[test]
    fn kebab_edge_cases() {
        assert_eq!(to_kebab(""), "");
        assert_eq!(to_kebab("A"), "a");
        assert_eq!(to_kebab("x"), "x");
        assert_eq!(to_kebab("12345"), "12345");
        assert_eq!(to_kebab("!@#$%"), "");
        assert_eq!(to_kebab("---"), "");
    }

    #[test]
    fn double_dash_collapse_is_single_pass() {
        assert_eq!(to_kebab("a--b"), "a-b");
        assert_eq!(to_kebab("a---b"), "a--b");
        assert_eq!(to_kebab("First - Name"), "first--name");
    }

    #[test]
    fn kebab_is_idempotent() {
        let inputs = [
            "First Name",
            "buildRequest",
            "base_api",
            "ID",
            "Administrator",
            "Build PARAMETERS",
            "portal-ionic",
            "loginAt",
            "Hello_world",
            "x",
            "",
            "2fa Code",
            "a--b",
        ];
        for input in inputs {
            let once = to_kebab(input);
            assert_eq!(to_kebab(&once), once, "not idempotent for {input:?}");
        }
    }

    // ---------------------------------------------------------------------
    // derived casings
    // ---------------------------------------------------------------------

    #[test]
    fn derived_casings() {
        assert_eq!(to_pascal("first-name"), "FirstName");
        assert_eq!(to_camel("first-name"), "firstName");
        assert_eq!(to_snake("First Name"), "first_name");
        assert_eq!(to_title("first-name"), "First Name");
    }

    #[test]
    fn derived_casings_go_through_kebab() {
        assert_eq!(to_camel("Administrators"), "administrators");
        assert_eq!(to_pascal("Administrators"), "Administrators");
        assert_eq!(to_pascal("buildRequest"), "BuildRequest");
        assert_eq!(to_snake("Build PARAMETERS"), "build_parameters");
        assert_eq!(to_title("base_api"), "Base Api");
    }

    #[test]
    fn derived_casings_of_empty_and_single() {
        for f in [to_camel, to_pascal, to_snake, to_title] {
            assert_eq!(f(""), "");
            assert_eq!(f("!!"), "");
            assert_eq!(f("42"), "42");
        }
        assert_eq!(to_camel("Q"), "q");
        assert_eq!(to_snake("Q"), "q");
        assert_eq!(to_pascal("q"), "Q");
    }

    #[test]
    fn digits_after_separator_are_kept() {
        assert_eq!(to_camel("portal 2"), "portal2");
        assert_eq!(to_title("portal 2"), "Portal 2");
    }
}
