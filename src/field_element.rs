use crate::error::{Error, Result};
use crate::utils::new_bigint;
use num::{
    bigint::BigInt,
    traits::{Euclid, One, Pow, Zero},
};
use std::fmt;
use std::ops;
use tracing::debug;

// 有限域元素
#[derive(Debug, PartialEq, Eq, Hash, Clone)]
pub struct FieldElement {
    prime: BigInt, // 有限域的阶
    num: BigInt,   // 元素, 0 <= num < prime
}

impl FieldElement {
    pub fn from_bigint(num: BigInt, prime: BigInt) -> Result<Self> {
        if prime < new_bigint(2) {
            debug!(%prime, "有限域的阶无效");
            return Err(Error::InvalidModulus { prime });
        }
        if num >= prime || num < BigInt::zero() {
            debug!(%num, %prime, "元素超出范围");
            return Err(Error::OutOfRange { num, prime });
        }

        Ok(FieldElement { num, prime })
    }

    pub fn from_i64(num: i64, prime: i64) -> Result<Self> {
        FieldElement::from_bigint(new_bigint(num), new_bigint(prime))
    }

    pub fn zero(prime: &BigInt) -> Result<Self> {
        FieldElement::from_bigint(BigInt::zero(), prime.clone())
    }

    pub fn one(prime: &BigInt) -> Result<Self> {
        FieldElement::from_bigint(BigInt::one(), prime.clone())
    }

    pub fn num(&self) -> &BigInt {
        &self.num
    }

    pub fn prime(&self) -> &BigInt {
        &self.prime
    }

    pub fn is_zero(&self) -> bool {
        self.num.is_zero()
    }

    fn same_field(&self, other: &FieldElement) -> Result<()> {
        if self.prime != other.prime {
            return Err(Error::FieldMismatch {
                left: self.prime.clone(),
                right: other.prime.clone(),
            });
        }
        Ok(())
    }

    // 结果总是落在[0, prime)内，rem_euclid对负数也返回非负余数
    fn reduced(&self, num: BigInt) -> FieldElement {
        FieldElement {
            num: num.rem_euclid(&self.prime),
            prime: self.prime.clone(),
        }
    }

    pub fn checked_add(&self, other: &FieldElement) -> Result<FieldElement> {
        self.same_field(other)?;
        Ok(self.reduced(&self.num + &other.num))
    }

    pub fn checked_sub(&self, other: &FieldElement) -> Result<FieldElement> {
        self.same_field(other)?;
        Ok(self.reduced(&self.num - &other.num))
    }

    pub fn checked_mul(&self, other: &FieldElement) -> Result<FieldElement> {
        self.same_field(other)?;
        Ok(self.reduced(&self.num * &other.num))
    }

    /// 整数倍：k * self，例如切线斜率中的 3x^2 和 2y
    pub fn times(&self, k: i64) -> FieldElement {
        self.reduced(new_bigint(k) * &self.num)
    }

    /// 模幂运算，指数可以为负数。
    ///
    /// 根据费马小定理：a^(p-1) = 1，
    /// 可以把指数加上或者减去任意个p-1，所以先把指数约化到[0, p-1)内。
    pub fn power(&self, exponent: &BigInt) -> FieldElement {
        let e = exponent.rem_euclid(&(&self.prime - BigInt::one()));

        FieldElement {
            num: self.num.modpow(&e, &self.prime),
            prime: self.prime.clone(),
        }
    }

    // 乘法逆元： b^-1 = b^(p-2)
    pub fn inverse(&self) -> Result<FieldElement> {
        if self.is_zero() {
            return Err(Error::DivisionByZero {
                prime: self.prime.clone(),
            });
        }
        Ok(self.power(&(&self.prime - 2u32)))
    }

    // 有限域内的除法：
    // a / b = a * b^-1 = a * b^-1 * b^(p-1) = a * b^(p-2)
    pub fn checked_div(&self, other: &FieldElement) -> Result<FieldElement> {
        self.same_field(other)?;
        self.checked_mul(&other.inverse()?)
    }
}

impl fmt::Display for FieldElement {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "FieldElement_{}({})", self.prime, self.num)
    }
}

// 操作符重载: pow
impl Pow<&BigInt> for &FieldElement {
    type Output = FieldElement;

    fn pow(self, rhs: &BigInt) -> Self::Output {
        self.power(rhs)
    }
}

impl Pow<BigInt> for &FieldElement {
    type Output = FieldElement;

    fn pow(self, rhs: BigInt) -> Self::Output {
        self.power(&rhs)
    }
}

impl Pow<&BigInt> for FieldElement {
    type Output = FieldElement;

    fn pow(self, rhs: &BigInt) -> Self::Output {
        self.power(rhs)
    }
}

impl Pow<BigInt> for FieldElement {
    type Output = FieldElement;

    fn pow(self, rhs: BigInt) -> Self::Output {
        self.power(&rhs)
    }
}

impl Pow<i64> for &FieldElement {
    type Output = FieldElement;

    fn pow(self, rhs: i64) -> Self::Output {
        self.power(&new_bigint(rhs))
    }
}

impl Pow<i64> for FieldElement {
    type Output = FieldElement;

    fn pow(self, rhs: i64) -> Self::Output {
        self.power(&new_bigint(rhs))
    }
}

// 操作符重载: + - * /
// 运算符版本在阶不同或除以0时panic，需要错误处理的调用方使用checked_*版本
macro_rules! field_binop {
    ($imp:ident, $method:ident, $checked:ident) => {
        impl ops::$imp<&FieldElement> for &FieldElement {
            type Output = FieldElement;

            fn $method(self, rhs: &FieldElement) -> FieldElement {
                self.$checked(rhs).unwrap_or_else(|e| panic!("{}", e))
            }
        }

        impl ops::$imp<FieldElement> for &FieldElement {
            type Output = FieldElement;

            fn $method(self, rhs: FieldElement) -> FieldElement {
                ops::$imp::$method(self, &rhs)
            }
        }

        impl ops::$imp<&FieldElement> for FieldElement {
            type Output = FieldElement;

            fn $method(self, rhs: &FieldElement) -> FieldElement {
                ops::$imp::$method(&self, rhs)
            }
        }

        impl ops::$imp<FieldElement> for FieldElement {
            type Output = FieldElement;

            fn $method(self, rhs: FieldElement) -> FieldElement {
                ops::$imp::$method(&self, &rhs)
            }
        }
    };
}

field_binop!(Add, add, checked_add);
field_binop!(Sub, sub, checked_sub);
field_binop!(Mul, mul, checked_mul);
field_binop!(Div, div, checked_div);

// 加法逆元
impl ops::Neg for &FieldElement {
    type Output = FieldElement;

    fn neg(self) -> FieldElement {
        self.reduced(-&self.num)
    }
}

impl ops::Neg for FieldElement {
    type Output = FieldElement;

    fn neg(self) -> FieldElement {
        -&self
    }
}
