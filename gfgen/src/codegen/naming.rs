//! Naming-case conversion for generated identifiers

use std::fmt;
use std::str::FromStr;

use heck::{
    ToKebabCase, ToLowerCamelCase, ToShoutyKebabCase, ToShoutySnakeCase, ToSnakeCase,
    ToUpperCamelCase,
};

use crate::error::GenError;

/// Identifier conventions supported for struct names, file names and json tags
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NamingCase {
    /// `UserId`
    Camel,
    /// `userId`
    CamelLower,
    /// `user_id`
    Snake,
    /// `USER_ID`
    SnakeScreaming,
    /// `User_id`
    SnakeFirstUpper,
    /// `user-id`
    Kebab,
    /// `USER-ID`
    KebabScreaming,
}

impl NamingCase {
    pub const ALL: [NamingCase; 7] = [
        NamingCase::Camel,
        NamingCase::CamelLower,
        NamingCase::Snake,
        NamingCase::SnakeScreaming,
        NamingCase::SnakeFirstUpper,
        NamingCase::Kebab,
        NamingCase::KebabScreaming,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            NamingCase::Camel => "Camel",
            NamingCase::CamelLower => "CamelLower",
            NamingCase::Snake => "Snake",
            NamingCase::SnakeScreaming => "SnakeScreaming",
            NamingCase::SnakeFirstUpper => "SnakeFirstUpper",
            NamingCase::Kebab => "Kebab",
            NamingCase::KebabScreaming => "KebabScreaming",
        }
    }
}

impl fmt::Display for NamingCase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for NamingCase {
    type Err = GenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        NamingCase::ALL
            .into_iter()
            .find(|case| case.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| {
                GenError::Config(format!(
                    "unknown naming case \"{}\", expected one of: {}",
                    s,
                    NamingCase::ALL.map(|c| c.name()).join(", ")
                ))
            })
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Convert an identifier to the given naming case.
///
/// Word boundaries follow heck: non-alphanumeric characters separate words,
/// an uppercase letter after a lowercase one starts a word, and an uppercase
/// run ends before its last letter when a lowercase letter follows
/// (`RGBCode` is `rgb` + `code`).
pub fn to_case(identifier: &str, case: NamingCase) -> String {
    match case {
        NamingCase::Camel => identifier.to_upper_camel_case(),
        NamingCase::CamelLower => identifier.to_lower_camel_case(),
        NamingCase::Snake => identifier.to_snake_case(),
        NamingCase::SnakeScreaming => identifier.to_shouty_snake_case(),
        NamingCase::SnakeFirstUpper => capitalize(&identifier.to_snake_case()),
        NamingCase::Kebab => identifier.to_kebab_case(),
        NamingCase::KebabScreaming => identifier.to_shouty_kebab_case(),
    }
}

/// Go struct and field names
pub fn to_camel(identifier: &str) -> String {
    to_case(identifier, NamingCase::Camel)
}

pub fn to_camel_lower(identifier: &str) -> String {
    to_case(identifier, NamingCase::CamelLower)
}

pub fn to_snake(identifier: &str) -> String {
    to_case(identifier, NamingCase::Snake)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snake_reference_cases() {
        assert_eq!(to_snake("_ID"), "id");
        assert_eq!(to_snake("md5"), "md5");
        assert_eq!(to_snake("Md5"), "md5");
        assert_eq!(to_snake("userID"), "user_id");
        assert_eq!(to_snake("RGBCodeMd5"), "rgb_code_md5");
        assert_eq!(to_snake("testCase"), "test_case");
    }

    #[test]
    fn test_all_cases() {
        let id = "user_detail_id";
        assert_eq!(to_case(id, NamingCase::Camel), "UserDetailId");
        assert_eq!(to_case(id, NamingCase::CamelLower), "userDetailId");
        assert_eq!(to_case(id, NamingCase::Snake), "user_detail_id");
        assert_eq!(to_case(id, NamingCase::SnakeScreaming), "USER_DETAIL_ID");
        assert_eq!(to_case(id, NamingCase::SnakeFirstUpper), "User_detail_id");
        assert_eq!(to_case(id, NamingCase::Kebab), "user-detail-id");
        assert_eq!(to_case(id, NamingCase::KebabScreaming), "USER-DETAIL-ID");
    }

    #[test]
    fn test_separators_and_edges() {
        assert_eq!(to_camel("user-name.first name"), "UserNameFirstName");
        assert_eq!(to_snake("__created_at__"), "created_at");
        assert_eq!(to_camel(""), "");
        assert_eq!(to_snake("___"), "");
        assert_eq!(to_camel_lower("ID"), "id");
        assert_eq!(to_camel("id"), "Id");
    }

    #[test]
    fn test_idempotent() {
        for input in ["userID", "RGBCodeMd5", "_ID", "created_at", "Md5", "user-name"] {
            for case in NamingCase::ALL {
                let once = to_case(input, case);
                assert_eq!(to_case(&once, case), once, "{input} as {case}");
            }
        }
    }

    #[test]
    fn test_acronyms_and_digits() {
        assert_eq!(to_camel("HTTPServer2Go"), "HttpServer2Go");
        assert_eq!(to_snake("Md5Hash"), "md5_hash");
        assert_eq!(to_camel_lower("v2Api"), "v2Api");
        assert_eq!(to_case("orderID", NamingCase::KebabScreaming), "ORDER-ID");
    }

    #[test]
    fn test_parse_naming_case() {
        assert_eq!("camellower".parse::<NamingCase>().unwrap(), NamingCase::CamelLower);
        assert_eq!(" Snake ".parse::<NamingCase>().unwrap(), NamingCase::Snake);
        assert!(matches!(
            "pascal".parse::<NamingCase>(),
            Err(GenError::Config(_))
        ));
    }
}
