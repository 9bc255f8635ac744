macro_rules! impl_from_into_u64 {
    ($main: ident) => {
        impl From<u64> for $main {
            fn from(n: u64) -> $main {
                $main(n)
            }
        }

        impl From<$main> for u64 {
            fn from(from: $main) -> u64 {
                from.0
            }
        }

        impl $main {
            pub fn as_u64(&self) -> u64 {
                self.0
            }
        }
    };
}

macro_rules! impl_from_into_usize {
    ($main: ident) => {
        impl From<usize> for $main {
            fn from(n: usize) -> $main {
                $main(n as u64)
            }
        }

        impl From<$main> for usize {
            fn from(from: $main) -> usize {
                from.0 as usize
            }
        }

        impl $main {
            pub fn as_usize(&self) -> usize {
                self.0 as usize
            }
        }
    };
}

macro_rules! impl_math_between {
    ($main: ident, $other: ident) => {
        impl PartialOrd<$other> for $main {
            /// Utilizes `partial_cmp` on the underlying `u64`.
            fn partial_cmp(&self, other: &$other) -> Option<Ordering> {
                Some(self.0.cmp(&(*other).into()))
            }
        }

        impl PartialEq<$other> for $main {
            fn eq(&self, other: &$other) -> bool {
                let other: u64 = (*other).into();
                self.0 == other
            }
        }

        impl Add<$other> for $main {
            type Output = $main;

            fn add(self, other: $other) -> $main {
                $main::from(self.0.saturating_add(other.into()))
            }
        }

        impl AddAssign<$other> for $main {
            fn add_assign(&mut self, other: $other) {
                self.0 = self.0.saturating_add(other.into());
            }
        }

        impl Sub<$other> for $main {
            type Output = $main;

            fn sub(self, other: $other) -> $main {
                $main::from(self.0.saturating_sub(other.into()))
            }
        }

        impl SubAssign<$other> for $main {
            fn sub_assign(&mut self, other: $other) {
                self.0 = self.0.saturating_sub(other.into());
            }
        }

        impl Mul<$other> for $main {
            type Output = $main;

            fn mul(self, rhs: $other) -> $main {
                let rhs: u64 = rhs.into();
                $main::from(self.0.saturating_mul(rhs))
            }
        }

        impl MulAssign<$other> for $main {
            fn mul_assign(&mut self, rhs: $other) {
                let rhs: u64 = rhs.into();
                self.0 = self.0.saturating_mul(rhs)
            }
        }

        impl Div<$other> for $main {
            type Output = $main;

            /// Panics if `rhs` is zero.
            fn div(self, rhs: $other) -> $main {
                let rhs: u64 = rhs.into();
                $main::from(
                    self.0
                        .checked_div(rhs)
                        .expect("Cannot divide by zero-valued Slot/Epoch"),
                )
            }
        }

        impl DivAssign<$other> for $main {
            /// Panics if `rhs` is zero.
            fn div_assign(&mut self, rhs: $other) {
                let rhs: u64 = rhs.into();
                self.0 = self
                    .0
                    .checked_div(rhs)
                    .expect("Cannot divide by zero-valued Slot/Epoch");
            }
        }

        impl Rem<$other> for $main {
            type Output = $main;

            /// Panics if `modulus` is zero.
            fn rem(self, modulus: $other) -> $main {
                let modulus: u64 = modulus.into();
                $main::from(
                    self.0
                        .checked_rem(modulus)
                        .expect("Cannot take remainder of zero-valued Slot/Epoch"),
                )
            }
        }
    };
}

macro_rules! impl_safe_arith {
    ($type: ident) => {
        impl SafeArith<u64> for $type {
            const ZERO: Self = $type::new(0);
            const ONE: Self = $type::new(1);

            fn safe_add(&self, other: u64) -> safe_arith::Result<Self> {
                self.0
                    .checked_add(other)
                    .map(Self::new)
                    .ok_or(ArithError::Overflow)
            }

            fn safe_sub(&self, other: u64) -> safe_arith::Result<Self> {
                self.0
                    .checked_sub(other)
                    .map(Self::new)
                    .ok_or(ArithError::Overflow)
            }

            fn safe_mul(&self, other: u64) -> safe_arith::Result<Self> {
                self.0
                    .checked_mul(other)
                    .map(Self::new)
                    .ok_or(ArithError::Overflow)
            }

            fn safe_div(&self, other: u64) -> safe_arith::Result<Self> {
                self.0
                    .checked_div(other)
                    .map(Self::new)
                    .ok_or(ArithError::DivisionByZero)
            }

            fn safe_rem(&self, other: u64) -> safe_arith::Result<Self> {
                self.0
                    .checked_rem(other)
                    .map(Self::new)
                    .ok_or(ArithError::DivisionByZero)
            }

            fn safe_shl(&self, other: u32) -> safe_arith::Result<Self> {
                self.0
                    .checked_shl(other)
                    .map(Self::new)
                    .ok_or(ArithError::Overflow)
            }

            fn safe_shr(&self, other: u32) -> safe_arith::Result<Self> {
                self.0
                    .checked_shr(other)
                    .map(Self::new)
                    .ok_or(ArithError::Overflow)
            }
        }
    };
}

macro_rules! impl_display {
    ($type: ident) => {
        impl fmt::Display for $type {
            fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

macro_rules! impl_debug {
    ($type: ident) => {
        impl fmt::Debug for $type {
            fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
                write!(f, "{}({:?})", stringify!($type), self.0)
            }
        }
    };
}

macro_rules! impl_common {
    ($type: ident) => {
        impl_from_into_u64!($type);
        impl_from_into_usize!($type);
        impl_math_between!($type, $type);
        impl_math_between!($type, u64);
        impl_safe_arith!($type);
        impl_display!($type);
        impl_debug!($type);

        impl Ord for $type {
            fn cmp(&self, other: &$type) -> Ordering {
                let other: u64 = (*other).into();
                self.0.cmp(&other)
            }
        }
    };
}

// test macros
#[cfg(test)]
macro_rules! new_tests {
    ($type: ident) => {
        #[test]
        fn new() {
            assert_eq!($type(0), $type::new(0));
            assert_eq!($type(3), $type::new(3));
            assert_eq!($type(u64::MAX), $type::new(u64::MAX));
        }
    };
}

#[cfg(test)]
macro_rules! from_into_tests {
    ($type: ident, $other: ident) => {
        #[test]
        fn into() {
            let x: $other = $type(0).into();
            assert_eq!(x, 0);

            let x: $other = $type(3).into();
            assert_eq!(x, 3);
        }

        #[test]
        fn from() {
            assert_eq!($type(0), $type::from(0_u64));
            assert_eq!($type(3), $type::from(3_u64));
        }
    };
}

#[cfg(test)]
macro_rules! math_between_tests {
    ($type: ident, $other: ident) => {
        #[test]
        fn partial_ord() {
            let assert_partial_ord = |a: u64, partial_ord: Ordering, b: u64| {
                let other: $other = $type(b).into();
                assert_eq!($type(a).partial_cmp(&other), Some(partial_ord));
            };

            assert_partial_ord(1, Ordering::Less, 2);
            assert_partial_ord(2, Ordering::Greater, 1);
            assert_partial_ord(0, Ordering::Less, u64::MAX);
            assert_partial_ord(u64::MAX, Ordering::Greater, 0);
            assert_partial_ord(0, Ordering::Equal, 0);
            assert_partial_ord(u64::MAX, Ordering::Equal, u64::MAX);
        }

        #[test]
        fn add_and_add_assign() {
            let assert_add = |a: u64, b: u64, result: u64| {
                let other: $other = $type(b).into();
                assert_eq!($type(a) + other, $type(result));

                let mut add_assigned = $type(a);
                add_assigned += other;

                assert_eq!(add_assigned, $type(result));
            };

            assert_add(0, 1, 1);
            assert_add(1, 0, 1);
            assert_add(1, 2, 3);
            assert_add(u64::MAX, 1, u64::MAX);
        }

        #[test]
        fn sub_and_sub_assign() {
            let assert_sub = |a: u64, b: u64, result: u64| {
                let other: $other = $type(b).into();
                assert_eq!($type(a) - other, $type(result));

                let mut sub_assigned = $type(a);
                sub_assigned -= other;

                assert_eq!(sub_assigned, $type(result));
            };

            assert_sub(1, 0, 1);
            assert_sub(2, 1, 1);
            assert_sub(0, 1, 0);
            assert_sub(1, u64::MAX, 0);
        }

        #[test]
        fn rem() {
            let assert_rem = |a: u64, b: u64, result: u64| {
                let other: $other = $type(b).into();
                assert_eq!($type(a) % other, $type(result));
            };

            assert_rem(1, 1, 0);
            assert_rem(420, 420, 0);
            assert_rem(21, 20, 1);
            assert_rem(u64::MAX, 2, 1);
        }
    };
}

#[cfg(test)]
macro_rules! safe_arith_tests {
    ($type: ident) => {
        #[test]
        fn safe_add_reports_overflow() {
            assert_eq!($type(1).safe_add(2), Ok($type(3)));
            assert_eq!($type(u64::MAX).safe_add(1), Err(ArithError::Overflow));
        }

        #[test]
        fn safe_sub_reports_underflow() {
            assert_eq!($type(3).safe_sub(2), Ok($type(1)));
            assert_eq!($type(0).safe_sub(1), Err(ArithError::Overflow));
        }

        #[test]
        fn safe_div_reports_zero() {
            assert_eq!($type(8).safe_div(2), Ok($type(4)));
            assert_eq!($type(8).safe_div(0), Err(ArithError::DivisionByZero));
        }
    };
}

#[cfg(test)]
macro_rules! all_tests {
    ($type: ident) => {
        new_tests!($type);
        math_between_tests!($type, $type);
        safe_arith_tests!($type);

        mod u64_tests {
            use super::*;

            from_into_tests!($type, u64);
            math_between_tests!($type, u64);
        }

        mod usize_tests {
            use super::*;

            from_into_tests!($type, usize);
        }
    };
}
