//! Declaration macros.
//!
//! [`regions!`](crate::regions) generates region accessors and finders on a
//! page object; the `impl_*` macros implement the page object traits for
//! structs that only wrap their context or collection.

/// Implement [`PageObject`](crate::PageObject) for a struct with a `context: PageContext` field
#[macro_export]
macro_rules! impl_page_object {
    ($ty:ty) => {
        impl $crate::PageObject for $ty {
            fn context(&self) -> &$crate::PageContext {
                &self.context
            }
        }
    };
}

/// Implement [`PageObject`](crate::PageObject) and [`Region`](crate::Region)
/// for a struct whose only field is `context: PageContext`
#[macro_export]
macro_rules! impl_region {
    ($ty:ty) => {
        $crate::impl_page_object!($ty);

        impl $crate::Region for $ty {
            fn from_context(context: $crate::PageContext) -> Self {
                Self { context }
            }
        }
    };
}

/// Implement [`CollectionRegion`](crate::CollectionRegion) for a struct whose
/// only field is `collection: RegionCollection<Item>`
///
/// Also makes `&Collection` iterable with `for`.
#[macro_export]
macro_rules! impl_collection_region {
    ($ty:ty, $item:ty) => {
        impl $crate::PageObject for $ty {
            fn context(&self) -> &$crate::PageContext {
                self.collection.context()
            }
        }

        impl $crate::CollectionRegion for $ty {
            type Item = $item;

            fn from_collection(collection: $crate::RegionCollection<$item>) -> Self {
                Self { collection }
            }

            fn collection(&self) -> &$crate::RegionCollection<$item> {
                &self.collection
            }
        }

        impl ::std::iter::IntoIterator for &$ty {
            type Item = $item;
            type IntoIter = ::std::vec::IntoIter<$item>;

            fn into_iter(self) -> Self::IntoIter {
                $crate::CollectionRegion::iter(self)
            }
        }
    };
}

/// Generate region accessors on a page object.
///
/// # Example
///
/// ```ignore
/// regions! {
///     impl UsersPage {
///         has_one profile: ProfileRegion;
///         has_one header { body: RegionBody::new().element("title", "h1", Selector::new()) };
///         has_many users / user: UserRegion { each: Selector::class("for-user") };
///         has_many admins / admin => AdminsRegion {
///             each: Selector::class("admin"),
///             within: Selector::id("admins"),
///         };
///         has_many tags / tag {
///             each: Selector::class("tag"),
///             within_scope: |page: &UsersPage| page.element(&Selector::class("tags")),
///             body: RegionBody::new().element("label", "span", Selector::new()),
///         };
///     }
/// }
/// ```
///
/// Each `has_many` names its accessor and its finder; the finder takes an
/// [`Attributes`](crate::Attributes) mapping and returns the first match.
/// The finder must be the accessor name with one trailing `s` stripped:
///
/// ```compile_fail
/// use probar_regions::prelude::*;
///
/// #[derive(Debug, Clone)]
/// struct UsersPage {
///     context: PageContext,
/// }
/// impl_page_object!(UsersPage);
///
/// #[derive(Debug, Clone)]
/// struct UserRegion {
///     context: PageContext,
/// }
/// impl_region!(UserRegion);
///
/// impl Findable for UserRegion {
///     fn read_attribute(&self, name: &str) -> PageResult<serde_json::Value> {
///         Err(unknown_attribute::<Self>(name))
///     }
/// }
///
/// regions! {
///     impl UsersPage {
///         has_many users / member: UserRegion { each: Selector::class("for-user") };
///     }
/// }
///
/// fn main() {}
/// ```
///
/// `within` and `within_scope` are alternatives:
///
/// ```compile_fail
/// use probar_regions::prelude::*;
///
/// #[derive(Debug, Clone)]
/// struct UsersPage {
///     context: PageContext,
/// }
/// impl_page_object!(UsersPage);
///
/// #[derive(Debug, Clone)]
/// struct UserRegion {
///     context: PageContext,
/// }
/// impl_region!(UserRegion);
///
/// impl Findable for UserRegion {
///     fn read_attribute(&self, name: &str) -> PageResult<serde_json::Value> {
///         Err(unknown_attribute::<Self>(name))
///     }
/// }
///
/// regions! {
///     impl UsersPage {
///         has_many users / user: UserRegion {
///             each: Selector::class("for-user"),
///             within: Selector::id("users"),
///             within_scope: |page: &UsersPage| page.element(&Selector::id("users")),
///         };
///     }
/// }
///
/// fn main() {}
/// ```
#[macro_export]
macro_rules! regions {
    (impl $host:ty { $($decls:tt)* }) => {
        impl $host {
            $crate::regions!(@decl $($decls)*);
        }
    };

    (@decl) => {};

    (@decl has_one $name:ident : $region:ty; $($rest:tt)*) => {
        #[doc = concat!("`", stringify!($name), "` region")]
        pub fn $name(&self) -> $crate::PageResult<$region> {
            $crate::HasOne::<$region>::new(stringify!($name)).resolve(self)
        }

        $crate::regions!(@decl $($rest)*);
    };

    (@decl has_one $name:ident { body: $body:expr $(,)? }; $($rest:tt)*) => {
        #[doc = concat!("`", stringify!($name), "` inline region")]
        pub fn $name(&self) -> $crate::PageResult<$crate::InlineRegion> {
            $crate::HasOne::inline(stringify!($name), $body).resolve(self)
        }

        $crate::regions!(@decl $($rest)*);
    };

    (@decl has_many $name:ident / $finder:ident => $collection:ty {
        each: $each:expr
        $(, $scope_kind:ident : $scope:expr)?
        $(,)?
    }; $($rest:tt)*) => {
        #[doc = concat!("`", stringify!($name), "` collection region")]
        pub fn $name(&self) -> $crate::PageResult<$collection> {
            let has_many = $crate::regions!(@scoped
                $crate::HasMany::<Self, <$collection as $crate::CollectionRegion>::Item>::new(
                    stringify!($name),
                    $each,
                )
                $(, $scope_kind: $scope)?
            );
            has_many.resolve_collection::<$collection>(self)
        }

        #[doc = concat!("First item of `", stringify!($name), "` matching every attribute")]
        pub fn $finder(
            &self,
            attributes: &$crate::Attributes,
        ) -> $crate::PageResult<<$collection as $crate::CollectionRegion>::Item> {
            $crate::regions!(@finder $name / $finder);
            let has_many = $crate::regions!(@scoped
                $crate::HasMany::<Self, <$collection as $crate::CollectionRegion>::Item>::new(
                    stringify!($name),
                    $each,
                )
                $(, $scope_kind: $scope)?
            );
            has_many.find_in_collection::<$collection>(self, attributes)
        }

        $crate::regions!(@decl $($rest)*);
    };

    (@decl has_many $name:ident / $finder:ident : $region:ty {
        each: $each:expr
        $(, $scope_kind:ident : $scope:expr)?
        $(,)?
    }; $($rest:tt)*) => {
        #[doc = concat!("`", stringify!($name), "` regions")]
        pub fn $name(&self) -> $crate::PageResult<::std::vec::Vec<$region>> {
            let has_many = $crate::regions!(@scoped
                $crate::HasMany::<Self, $region>::new(stringify!($name), $each)
                $(, $scope_kind: $scope)?
            );
            has_many.resolve(self)
        }

        #[doc = concat!("First of `", stringify!($name), "` matching every attribute")]
        pub fn $finder(&self, attributes: &$crate::Attributes) -> $crate::PageResult<$region> {
            $crate::regions!(@finder $name / $finder);
            let has_many = $crate::regions!(@scoped
                $crate::HasMany::<Self, $region>::new(stringify!($name), $each)
                $(, $scope_kind: $scope)?
            );
            has_many.find(self, attributes)
        }

        $crate::regions!(@decl $($rest)*);
    };

    (@decl has_many $name:ident / $finder:ident {
        each: $each:expr
        $(, within: $within:expr)?
        $(, within_scope: $within_scope:expr)?
        , body: $body:expr
        $(,)?
    }; $($rest:tt)*) => {
        #[doc = concat!("`", stringify!($name), "` inline regions")]
        pub fn $name(&self) -> $crate::PageResult<::std::vec::Vec<$crate::InlineRegion>> {
            let has_many = $crate::regions!(@scoped
                $crate::HasMany::<Self, $crate::InlineRegion>::inline(stringify!($name), $each, $body)
                $(, within: $within)?
                $(, within_scope: $within_scope)?
            );
            has_many.resolve(self)
        }

        #[doc = concat!("First of `", stringify!($name), "` matching every attribute")]
        pub fn $finder(
            &self,
            attributes: &$crate::Attributes,
        ) -> $crate::PageResult<$crate::InlineRegion> {
            $crate::regions!(@finder $name / $finder);
            let has_many = $crate::regions!(@scoped
                $crate::HasMany::<Self, $crate::InlineRegion>::inline(stringify!($name), $each, $body)
                $(, within: $within)?
                $(, within_scope: $within_scope)?
            );
            has_many.find(self, attributes)
        }

        $crate::regions!(@decl $($rest)*);
    };

    (@finder $name:ident / $finder:ident) => {
        const _: () = assert!(
            $crate::region::is_finder_name(stringify!($name), stringify!($finder)),
            concat!(
                "finder `",
                stringify!($finder),
                "` must be `",
                stringify!($name),
                "` with one trailing `s` stripped"
            )
        );
    };

    (@scoped $has_many:expr) => {
        $has_many
    };

    (@scoped $has_many:expr, within: $selector:expr) => {
        $has_many.within($selector)
    };

    (@scoped $has_many:expr, within_scope: $scope:expr) => {
        $has_many.within_scope($scope)
    };

    (@scoped $has_many:expr, within: $selector:expr, within_scope: $scope:expr) => {
        ::std::compile_error!("`within` and `within_scope` are mutually exclusive")
    };

    (@scoped $has_many:expr, $other:ident : $value:expr) => {
        ::std::compile_error!(concat!(
            "unknown collection option `",
            stringify!($other),
            "`: expected `within` or `within_scope`"
        ))
    };
}
