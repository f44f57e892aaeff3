//! Region naming conventions.
//!
//! A region declared as `sex_male` is conventionally implemented by
//! `SexMaleRegion`. A collection declared as `users` is implemented by
//! `UserRegion` items and, optionally, a `UsersRegion` collection type.
//! Regions are typed at declaration, so a departure from the convention
//! only produces a warning, once per region name and type.

use std::any::type_name;
use std::collections::HashSet;
use std::sync::{Mutex, OnceLock};

use tracing::warn;

/// Suffix of conventional region type names
pub const REGION_SUFFIX: &str = "Region";

/// Split on underscores, capitalize each part and concatenate
///
/// `sex_male` becomes `SexMale`; each part is lowercased after its first letter.
#[must_use]
pub fn camelize(name: &str) -> String {
    name.split('_')
        .map(|part| {
            let mut chars = part.chars();
            chars.next().map_or_else(String::new, |first| {
                first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect()
            })
        })
        .collect()
}

/// Conventional type name of a region, or of a collection's items
#[must_use]
pub fn element_type_name(region_name: &str, collection: bool) -> String {
    let base = camelize(region_name);
    let base = if collection {
        base.strip_suffix('s').unwrap_or(&base).to_string()
    } else {
        base
    };
    format!("{base}{REGION_SUFFIX}")
}

/// Conventional type name of a dedicated collection region
#[must_use]
pub fn collection_type_name(region_name: &str) -> String {
    format!("{}{REGION_SUFFIX}", camelize(region_name))
}

/// Last path segment of a type name, without generic arguments
#[must_use]
pub fn short_type_name<T: ?Sized>() -> &'static str {
    let full = type_name::<T>();
    let path = full.split('<').next().unwrap_or(full);
    path.rsplit("::").next().unwrap_or(path)
}

/// Check that `T` follows the conventional name for `region_name`.
///
/// Logs a warning the first time a given region name and type disagree.
pub fn check_convention<T: ?Sized>(region_name: &str, expected: &str) -> bool {
    let actual = short_type_name::<T>();
    if actual == expected {
        return true;
    }
    static WARNED: OnceLock<Mutex<HashSet<String>>> = OnceLock::new();
    let key = format!("{region_name}:{}", type_name::<T>());
    let first = WARNED
        .get_or_init(|| Mutex::new(HashSet::new()))
        .lock()
        .map(|mut warned| warned.insert(key))
        .unwrap_or(false);
    if first {
        warn!(
            region = region_name,
            actual,
            expected,
            "region type does not follow the naming convention"
        );
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    struct UserRegion;
    struct Member;

    #[test]
    fn test_camelize() {
        assert_eq!(camelize("sex_male"), "SexMale");
        assert_eq!(camelize("users"), "Users");
        assert_eq!(camelize("USER_list"), "UserList");
        assert_eq!(camelize("a__b"), "AB");
    }

    #[test]
    fn test_single_region_type_name() {
        assert_eq!(element_type_name("profile", false), "ProfileRegion");
        assert_eq!(element_type_name("sex_male", false), "SexMaleRegion");
    }

    #[test]
    fn test_collection_type_names() {
        assert_eq!(element_type_name("users", true), "UserRegion");
        assert_eq!(collection_type_name("users"), "UsersRegion");
        assert_eq!(element_type_name("admin_users", true), "AdminUserRegion");
    }

    #[test]
    fn test_short_type_name() {
        assert_eq!(short_type_name::<UserRegion>(), "UserRegion");
        assert_eq!(short_type_name::<Vec<UserRegion>>(), "Vec");
        assert_eq!(short_type_name::<str>(), "str");
    }

    #[test]
    fn test_check_convention() {
        assert!(check_convention::<UserRegion>("users", "UserRegion"));
        assert!(!check_convention::<Member>("users", "UserRegion"));
        assert!(!check_convention::<Member>("users", "UserRegion"));
    }
}
