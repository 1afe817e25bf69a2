#[cfg(all(not(test), not(feature = "debug-checks")))]
pub const GAPLESS_ASSERT_LEVEL_DEFINITION: u8 = GAPLESS_ASSERT_SIMPLE;

#[cfg(any(test, feature = "debug-checks"))]
pub const GAPLESS_ASSERT_LEVEL_DEFINITION: u8 = GAPLESS_ASSERT_ADVANCED;

pub const GAPLESS_ASSERT_SIMPLE: u8 = 1;
pub const GAPLESS_ASSERT_MODERATE: u8 = 2;
pub const GAPLESS_ASSERT_ADVANCED: u8 = 3;
pub const GAPLESS_ASSERT_EXTREME: u8 = 4;

#[macro_export]
#[doc(hidden)]
macro_rules! gapless_assert_simple {
    ($($arg:tt)*) => {
        if $crate::asserts::GAPLESS_ASSERT_LEVEL_DEFINITION >= $crate::asserts::GAPLESS_ASSERT_SIMPLE {
            assert!($($arg)*);
        }
    };
}

#[macro_export]
#[doc(hidden)]
macro_rules! gapless_assert_eq_simple {
    ($($arg:tt)*) => {
        if $crate::asserts::GAPLESS_ASSERT_LEVEL_DEFINITION >= $crate::asserts::GAPLESS_ASSERT_SIMPLE {
            assert_eq!($($arg)*);
        }
    };
}

#[macro_export]
#[doc(hidden)]
macro_rules! gapless_assert_moderate {
    ($($arg:tt)*) => {
        if $crate::asserts::GAPLESS_ASSERT_LEVEL_DEFINITION >= $crate::asserts::GAPLESS_ASSERT_MODERATE {
            assert!($($arg)*);
        }
    };
}

#[macro_export]
#[doc(hidden)]
macro_rules! gapless_assert_advanced {
    ($($arg:tt)*) => {
        if $crate::asserts::GAPLESS_ASSERT_LEVEL_DEFINITION >= $crate::asserts::GAPLESS_ASSERT_ADVANCED {
            assert!($($arg)*);
        }
    };
}
