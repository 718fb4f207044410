use crate::error::{Error, Result};
use crate::field_element::FieldElement;
use crate::field_point::FieldPoint;
use crate::utils::{bigint_from_be_bytes, biguint_from_be_bytes, new_bigint};
use hex_literal::hex;
use num::{BigInt, BigUint};
use std::fmt;
use std::ops;

// S256 椭圆曲线参数: y^2 = x^3 + 7
const A: i64 = 0;
const B: i64 = 7;
// P = 2**256 - 2**32 - 977
const P: [u8; 32] = hex!("fffffffffffffffffffffffffffffffffffffffffffffffffffffffefffffc2f");
// 生成元的阶
const N: [u8; 32] = hex!("fffffffffffffffffffffffffffffffebaaedce6af48a03bbfd25e8cd0364141");
// 生成元
const GX: [u8; 32] = hex!("79be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f81798");
const GY: [u8; 32] = hex!("483ada7726a3c4655da4fbfc0e1108a8fd17b448a68554199c47d08ffb10d4b8");

pub fn prime() -> BigInt {
    bigint_from_be_bytes(&P)
}

pub fn order() -> BigUint {
    biguint_from_be_bytes(&N)
}

fn s256_field(num: BigInt) -> Result<FieldElement> {
    FieldElement::from_bigint(num, prime())
}

fn curve() -> Result<(FieldElement, FieldElement)> {
    Ok((s256_field(new_bigint(A))?, s256_field(new_bigint(B))?))
}

/// secp256k1 上的点
#[derive(Debug, PartialEq, Eq, Hash, Clone)]
pub struct S256Point(FieldPoint);

impl S256Point {
    pub fn new(x: BigInt, y: BigInt) -> Result<Self> {
        let (a, b) = curve()?;
        let p = FieldPoint::from(Some(s256_field(x)?), Some(s256_field(y)?), a, b)?;
        Ok(S256Point(p))
    }

    pub fn infinity() -> Result<Self> {
        let (a, b) = curve()?;
        FieldPoint::infinity(a, b).map(S256Point)
    }

    pub fn generator() -> Result<Self> {
        S256Point::new(bigint_from_be_bytes(&GX), bigint_from_be_bytes(&GY))
    }

    pub fn is_infinity(&self) -> bool {
        self.0.is_infinity()
    }

    pub fn x(&self) -> Option<&BigInt> {
        self.0.x().map(|x| x.num())
    }

    pub fn y(&self) -> Option<&BigInt> {
        self.0.y().map(|y| y.num())
    }

    pub fn point(&self) -> &FieldPoint {
        &self.0
    }

    pub fn checked_add(&self, other: &S256Point) -> Result<S256Point> {
        self.0.checked_add(&other.0).map(S256Point)
    }

    // nG = 无穷远点，所以系数可以先对n取模
    pub fn scalar_mul(&self, coefficient: &BigUint) -> Result<S256Point> {
        let coef = coefficient % order();
        self.0.scalar_mul(&coef).map(S256Point)
    }
}

impl From<S256Point> for FieldPoint {
    fn from(p: S256Point) -> FieldPoint {
        p.0
    }
}

impl TryFrom<FieldPoint> for S256Point {
    type Error = Error;

    fn try_from(p: FieldPoint) -> Result<Self> {
        let (a, b) = curve()?;
        if p.a() != &a || p.b() != &b {
            return Err(Error::CurveMismatch);
        }
        Ok(S256Point(p))
    }
}

impl fmt::Display for S256Point {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match (self.x(), self.y()) {
            (Some(x), Some(y)) => write!(f, "S256Point({:064x}, {:064x})", x, y),
            _ => write!(f, "S256Point(infinity)"),
        }
    }
}

impl ops::Add<&S256Point> for &S256Point {
    type Output = S256Point;

    fn add(self, other: &S256Point) -> S256Point {
        self.checked_add(other).unwrap_or_else(|e| panic!("{}", e))
    }
}

impl ops::Add<S256Point> for S256Point {
    type Output = S256Point;

    fn add(self, other: S256Point) -> S256Point {
        &self + &other
    }
}

impl ops::Mul<&S256Point> for &BigUint {
    type Output = S256Point;

    fn mul(self, rhs: &S256Point) -> S256Point {
        rhs.scalar_mul(self).unwrap_or_else(|e| panic!("{}", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use num::traits::{Euclid, Pow};
    use num::One;
    use rand::thread_rng;
    use num::bigint::RandBigInt;

    fn from_hex(s: &str) -> BigInt {
        BigInt::parse_bytes(s.as_bytes(), 16).unwrap()
    }

    #[test]
    pub fn test_ecc_parameters() {
        let p = prime();
        assert_eq!(
            p,
            new_bigint(2).pow(256u32) - new_bigint(2).pow(32u32) - new_bigint(977)
        );

        // 生成元在曲线上
        let gx = bigint_from_be_bytes(&GX);
        let gy = bigint_from_be_bytes(&GY);
        assert_eq!(
            (&gy).pow(2u32).rem_euclid(&p),
            ((&gx).pow(3u32) + new_bigint(B)).rem_euclid(&p)
        );

        let g = S256Point::generator().unwrap();
        assert!(!g.is_infinity());
        assert_eq!(g.x(), Some(&gx));
    }

    #[test]
    fn order_times_generator_is_infinity() {
        let g = S256Point::generator().unwrap();
        let n = order();
        // 直接用FieldPoint计算，避免对n取模
        let ng = g.point().scalar_mul(&n).unwrap();
        assert!(ng.is_infinity());
        assert_eq!(g.scalar_mul(&n).unwrap(), S256Point::infinity().unwrap());
        assert_eq!(g.scalar_mul(&(&n + BigUint::one())).unwrap(), g);
    }

    #[test]
    fn small_multiples() {
        let g = S256Point::generator().unwrap();
        let two_g = S256Point::new(
            from_hex("c6047f9441ed7d6d3045406e95c07cd85c778e4b8cef3ca7abac09b95c709ee5"),
            from_hex("1ae168fea63dc339a3c58419466ceaeef7f632653266d0e1236431a950cfe52a"),
        )
        .unwrap();
        let three_g = S256Point::new(
            from_hex("f9308a019258c31049344f85f89d5229b531c845836f99b08601f113bce036f9"),
            from_hex("388f7b0f632de8140fe337e62a37f3566500a99934c2231b6cb9fd7584b8e672"),
        )
        .unwrap();
        assert_eq!(&g + &g, two_g);
        assert_eq!(&two_g + &g, three_g);
        assert_eq!(&BigUint::from(3u32) * &g, three_g);
        assert_eq!(
            three_g.to_string(),
            "S256Point(f9308a019258c31049344f85f89d5229b531c845836f99b08601f113bce036f9, \
             388f7b0f632de8140fe337e62a37f3566500a99934c2231b6cb9fd7584b8e672)"
        );
    }

    #[test]
    fn random_scalars_distribute() {
        let g = S256Point::generator().unwrap();
        let mut rng = thread_rng();
        let j = rng.gen_biguint(256);
        let k = rng.gen_biguint(256);
        assert_eq!(
            g.scalar_mul(&(&j + &k)).unwrap(),
            &g.scalar_mul(&j).unwrap() + &g.scalar_mul(&k).unwrap()
        );
    }

    #[test]
    fn off_curve_and_foreign_points() {
        assert!(matches!(
            S256Point::new(new_bigint(1), new_bigint(1)),
            Err(Error::NotOnCurve { .. })
        ));
        assert!(matches!(
            S256Point::new(prime(), new_bigint(1)),
            Err(Error::OutOfRange { .. })
        ));

        let a = FieldElement::from_i64(0, 223).unwrap();
        let b = FieldElement::from_i64(7, 223).unwrap();
        let other = FieldPoint::infinity(a, b).unwrap();
        assert_eq!(S256Point::try_from(other), Err(Error::CurveMismatch));

        let g = S256Point::generator().unwrap();
        let back: FieldPoint = g.clone().into();
        assert_eq!(S256Point::try_from(back).unwrap(), g);
        assert_eq!(S256Point::infinity().unwrap().to_string(), "S256Point(infinity)");
    }
}
