use anyhow::Result;
use num::BigUint;
use programmingecc::{FieldElement, FieldPoint, S256Point};

fn main() -> Result<()> {
    let prime = 223;
    let a = FieldElement::from_i64(0, prime)?;
    let b = FieldElement::from_i64(7, prime)?;
    let x1 = FieldElement::from_i64(192, prime)?;
    let y1 = FieldElement::from_i64(105, prime)?;
    let x2 = FieldElement::from_i64(17, prime)?;
    let y2 = FieldElement::from_i64(56, prime)?;

    let p1 = FieldPoint::from(Some(x1), Some(y1), a.clone(), b.clone())?;
    println!("{}", p1);
    let p2 = FieldPoint::from(Some(x2), Some(y2), a, b)?;
    println!("{}", p2);

    let p3 = p1.checked_add(&p2)?;
    println!("{} + {} = {}", p1, p2, p3);
    println!("7 * {} = {}", p2, p2.scalar_mul(&BigUint::from(7u32))?);

    let g = S256Point::generator()?;
    println!("G: {}", g);
    println!("n*G: {}", g.point().scalar_mul(&programmingecc::s256point::order())?);
    Ok(())
}
