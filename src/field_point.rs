use crate::error::{Error, Result};
use crate::field_element::FieldElement;
use num::traits::{One, Zero};
use num::{BigInt, BigUint};
use std::fmt;
use std::ops;
use tracing::{debug, instrument, trace};

// 有限域上椭圆曲线上的点
// 椭圆曲线方程： y^2 = x^3 + ax + b
#[derive(Debug, PartialEq, Eq, Hash, Clone)]
pub struct FieldPoint {
    // None 表示无穷远点
    coords: Option<(FieldElement, FieldElement)>,
    a: FieldElement,
    b: FieldElement,
}

impl FieldPoint {
    pub fn from(
        x: Option<FieldElement>,
        y: Option<FieldElement>,
        a: FieldElement,
        b: FieldElement,
    ) -> Result<Self> {
        check_curve(&a, &b)?;

        let (x, y) = match (x, y) {
            (None, None) => return FieldPoint::infinity(a, b),
            (Some(x), Some(y)) => (x, y),
            _ => return Err(Error::IncompleteCoordinates),
        };

        // y^2 = x^3 + ax + b
        let lhs = y.checked_mul(&y)?;
        let rhs = x
            .checked_mul(&x)?
            .checked_mul(&x)?
            .checked_add(&a.checked_mul(&x)?)?
            .checked_add(&b)?;
        if lhs != rhs {
            debug!(%x, %y, "点不在曲线上");
            return Err(Error::NotOnCurve {
                x: x.num().clone(),
                y: y.num().clone(),
            });
        }

        Ok(FieldPoint {
            coords: Some((x, y)),
            a,
            b,
        })
    }

    pub fn infinity(a: FieldElement, b: FieldElement) -> Result<Self> {
        check_curve(&a, &b)?;
        Ok(FieldPoint { coords: None, a, b })
    }

    pub fn is_infinity(&self) -> bool {
        self.coords.is_none()
    }

    pub fn x(&self) -> Option<&FieldElement> {
        self.coords.as_ref().map(|(x, _)| x)
    }

    pub fn y(&self) -> Option<&FieldElement> {
        self.coords.as_ref().map(|(_, y)| y)
    }

    pub fn a(&self) -> &FieldElement {
        &self.a
    }

    pub fn b(&self) -> &FieldElement {
        &self.b
    }

    fn same_curve(&self, other: &FieldPoint) -> bool {
        self.a == other.a && self.b == other.b
    }

    // 加法结果一定在曲线上，不需要再次校验
    fn on_same_curve(&self, x: FieldElement, y: FieldElement) -> FieldPoint {
        FieldPoint {
            coords: Some((x, y)),
            a: self.a.clone(),
            b: self.b.clone(),
        }
    }

    // a和b已经在构造时校验过
    fn identity(&self) -> FieldPoint {
        FieldPoint {
            coords: None,
            a: self.a.clone(),
            b: self.b.clone(),
        }
    }

    /// 点加法，各种情况按顺序判断。
    ///
    /// 切线斜率的分母是2y，所以曲线所在的有限域不能是F_2，构造时已经拒绝。
    pub fn checked_add(&self, other: &FieldPoint) -> Result<FieldPoint> {
        if !self.same_curve(other) {
            return Err(Error::CurveMismatch);
        }

        // case 1: 任何点加上无穷远点都等于自身
        let (x1, y1) = match &self.coords {
            None => return Ok(other.clone()),
            Some(c) => c,
        };
        let (x2, y2) = match &other.coords {
            None => return Ok(self.clone()),
            Some(c) => c,
        };

        // case 2: 关于x轴对称的两个点相加等于无穷远点
        if x1 == x2 && y1 != y2 {
            trace!("垂直割线");
            return Ok(self.identity());
        }

        // case 3: 两个点的x坐标不相同
        // s = (y2 - y1) / (x2 - x1)
        // x3 = s^2 - x1 - x2
        // y3 = s(x1 - x3) - y1
        if x1 != x2 {
            trace!("割线");
            let s = y2.checked_sub(y1)?.checked_div(&x2.checked_sub(x1)?)?;
            let x3 = s.checked_mul(&s)?.checked_sub(x1)?.checked_sub(x2)?;
            let y3 = s.checked_mul(&x1.checked_sub(&x3)?)?.checked_sub(y1)?;
            return Ok(self.on_same_curve(x3, y3));
        }

        // case 4: 两个点相同，做这个点的切线，找到另一个交点
        // s = (3x1^2 + a) / 2y1
        // x3 = s^2 - 2x1
        // y3 = s(x1 - x3) - y1
        if self == other && !y1.is_zero() {
            trace!("切线");
            let s = x1
                .checked_mul(x1)?
                .times(3)
                .checked_add(&self.a)?
                .checked_div(&y1.times(2))?;
            let x3 = s.checked_mul(&s)?.checked_sub(&x1.times(2))?;
            let y3 = s.checked_mul(&x1.checked_sub(&x3)?)?.checked_sub(y1)?;
            return Ok(self.on_same_curve(x3, y3));
        }

        // case 5: 两个点相同，y为0，切线垂直
        if self == other && y1.is_zero() {
            trace!("垂直切线");
            return Ok(self.identity());
        }

        Err(Error::UnhandledCase(format!(
            "{} + {} on y^2 = x^3 + {}x + {}",
            self, other, self.a.num(), self.b.num()
        )))
    }

    /// 标量乘法：二进制展开(double-and-add)，O(log k)次点加法
    #[instrument(level = "trace", skip_all, fields(bits = coefficient.bits()))]
    pub fn scalar_mul(&self, coefficient: &BigUint) -> Result<FieldPoint> {
        let mut coef = coefficient.clone();
        let mut current = self.clone();
        // 从无穷远点开始
        let mut result = self.identity();
        while !coef.is_zero() {
            if (&coef & BigUint::one()).is_one() {
                result = result.checked_add(&current)?;
            }
            current = current.checked_add(&current)?;
            coef >>= 1;
        }
        Ok(result)
    }
}

// a和b必须在同一个有限域上，且该域的阶不能为2
fn check_curve(a: &FieldElement, b: &FieldElement) -> Result<()> {
    if a.prime() != b.prime() {
        return Err(Error::FieldMismatch {
            left: a.prime().clone(),
            right: b.prime().clone(),
        });
    }
    if a.prime() == &BigInt::from(2) {
        debug!(prime = %a.prime(), "曲线不能定义在F_2上");
        return Err(Error::UnsupportedCurveField {
            prime: a.prime().clone(),
        });
    }
    Ok(())
}

impl fmt::Display for FieldPoint {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match &self.coords {
            None => write!(f, "FieldPoint(infinity)"),
            Some((x, y)) => write!(
                f,
                "FieldPoint({},{})_{}_{} FieldElement({})",
                x.num(),
                y.num(),
                self.a.num(),
                self.b.num(),
                self.a.prime(),
            ),
        }
    }
}

// 操作符重载：+，不同曲线的点相加时panic
impl ops::Add<&FieldPoint> for &FieldPoint {
    type Output = FieldPoint;

    fn add(self, other: &FieldPoint) -> Self::Output {
        self.checked_add(other).unwrap_or_else(|e| panic!("{}", e))
    }
}

impl ops::Add<FieldPoint> for &FieldPoint {
    type Output = FieldPoint;

    fn add(self, other: FieldPoint) -> Self::Output {
        self + &other
    }
}

impl ops::Add<&FieldPoint> for FieldPoint {
    type Output = FieldPoint;

    fn add(self, other: &FieldPoint) -> Self::Output {
        &self + other
    }
}

impl ops::Add<FieldPoint> for FieldPoint {
    type Output = FieldPoint;

    fn add(self, other: FieldPoint) -> Self::Output {
        &self + &other
    }
}

// 关于x轴对称的点：(x, -y)
impl ops::Neg for &FieldPoint {
    type Output = FieldPoint;

    fn neg(self) -> FieldPoint {
        match &self.coords {
            None => self.clone(),
            Some((x, y)) => self.on_same_curve(x.clone(), -y),
        }
    }
}

impl ops::Neg for FieldPoint {
    type Output = FieldPoint;

    fn neg(self) -> FieldPoint {
        -&self
    }
}

// 操作符重载：*
impl ops::Mul<&FieldPoint> for &BigUint {
    type Output = FieldPoint;

    fn mul(self, rhs: &FieldPoint) -> FieldPoint {
        rhs.scalar_mul(self).unwrap_or_else(|e| panic!("{}", e))
    }
}

impl ops::Mul<FieldPoint> for BigUint {
    type Output = FieldPoint;

    fn mul(self, rhs: FieldPoint) -> FieldPoint {
        &self * &rhs
    }
}

impl ops::Mul<&FieldPoint> for u64 {
    type Output = FieldPoint;

    fn mul(self, rhs: &FieldPoint) -> FieldPoint {
        &BigUint::from(self) * rhs
    }
}

impl ops::Mul<FieldPoint> for u64 {
    type Output = FieldPoint;

    fn mul(self, rhs: FieldPoint) -> FieldPoint {
        &BigUint::from(self) * &rhs
    }
}
