use easy_ext::ext;
use typenum::{NonZero, Unsigned};

#[ext(U64Ext)]
pub impl u64 {
    #[inline]
    #[must_use]
    fn div_typenum<N: Unsigned + NonZero>(self) -> Self {
        self / N::U64
    }

    #[inline]
    #[must_use]
    fn mod_typenum<N: Unsigned + NonZero>(self) -> Self {
        self % N::U64
    }

    /// Computes `self * percent / 100` without intermediate overflow.
    ///
    /// Results that do not fit in `u64` saturate.
    #[inline]
    #[must_use]
    fn mul_percent(self, percent: u64) -> Self {
        let product = u128::from(self) * u128::from(percent) / 100;
        product.try_into().unwrap_or(Self::MAX)
    }
}
