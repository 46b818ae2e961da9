/// A key type that may have a designated invalid sentinel value.
///
/// Some key types reserve one value to mean "no key" — null for raw pointers being the
/// canonical example. Storing the sentinel in a map is almost always a bug, so the table
/// rejects it at the API boundary: [`HashMap::insert`](crate::HashMap::insert) returns
/// `false` and lookups report "not found" for a sentinel key, without touching the table.
///
/// Most key types have no sentinel, and for those the provided `is_valid` body (which
/// always returns `true`) is the right implementation:
///
/// ```
/// use quince::ValidKey;
///
/// #[derive(Hash, PartialEq, Eq)]
/// struct DeviceId(u32);
///
/// impl ValidKey for DeviceId {}
/// ```
///
/// Types with a sentinel override it:
///
/// ```
/// use quince::ValidKey;
///
/// #[derive(Hash, PartialEq, Eq)]
/// struct Handle(u64);
///
/// impl Handle {
///     const INVALID: Handle = Handle(u64::MAX);
/// }
///
/// impl ValidKey for Handle {
///     fn is_valid(&self) -> bool {
///         self.0 != Handle::INVALID.0
///     }
/// }
/// ```
pub trait ValidKey {
    /// Returns `false` if `self` is the type's invalid sentinel.
    fn is_valid(&self) -> bool {
        true
    }
}

macro_rules! valid_key {
    ($($ty:ty),*) => {
        $(impl ValidKey for $ty {})*
    };
}

valid_key! {
    u8, u16, u32, u64, u128, usize,
    i8, i16, i32, i64, i128, isize,
    bool, char, str, String
}

impl<T: ValidKey + ?Sized> ValidKey for &T {
    fn is_valid(&self) -> bool {
        T::is_valid(self)
    }
}

impl<T: ValidKey + ?Sized> ValidKey for &mut T {
    fn is_valid(&self) -> bool {
        T::is_valid(self)
    }
}

// Null is the sentinel for pointer keys.
impl<T> ValidKey for *const T {
    fn is_valid(&self) -> bool {
        !self.is_null()
    }
}

impl<T> ValidKey for *mut T {
    fn is_valid(&self) -> bool {
        !self.is_null()
    }
}
