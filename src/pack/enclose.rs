//! Smallest enclosing circle of a set of circles.
//!
//! Welzl's move-to-front algorithm over a basis of at most three circles,
//! with a seeded shuffle so the expected-linear behavior is deterministic
//! per seed. The basis extension mirrors the classic formulation: try to
//! keep the basis minimal, rebuilding the candidate enclosure from one,
//! two, or three support circles.

use rand::Rng;
use rand::rngs::SmallRng;

use super::Circle;

/// Smallest circle enclosing every input circle. None for empty input.
pub fn enclose(circles: &[Circle], rng: &mut SmallRng) -> Option<Circle> {
    if circles.is_empty() {
        return None;
    }

    let mut shuffled = circles.to_vec();
    for i in (1..shuffled.len()).rev() {
        let j = rng.random_range(0..=i);
        shuffled.swap(i, j);
    }

    let mut basis: Vec<Circle> = Vec::new();
    let mut current: Option<Circle> = None;
    let mut i = 0;
    while i < shuffled.len() {
        let p = shuffled[i];
        match current {
            Some(e) if encloses_weak(e, p) => i += 1,
            _ => {
                basis = extend_basis(&basis, p);
                current = Some(enclose_basis(&basis));
                i = 0;
            }
        }
    }
    current
}

/// Whether `a` encloses `b` with a relative tolerance.
fn encloses_weak(a: Circle, b: Circle) -> bool {
    let dr = a.r - b.r + a.r.max(b.r).max(1.0) * 1e-9;
    let dx = b.x - a.x;
    let dy = b.y - a.y;
    dr > 0.0 && dr * dr > dx * dx + dy * dy
}

/// Whether `a` strictly fails to enclose `b`.
fn encloses_not(a: Circle, b: Circle) -> bool {
    let dr = a.r - b.r;
    let dx = b.x - a.x;
    let dy = b.y - a.y;
    dr < 0.0 || dr * dr < dx * dx + dy * dy
}

fn encloses_weak_all(a: Circle, basis: &[Circle]) -> bool {
    basis.iter().all(|&b| encloses_weak(a, b))
}

fn extend_basis(basis: &[Circle], p: Circle) -> Vec<Circle> {
    if encloses_weak_all(p, basis) {
        return vec![p];
    }

    for i in 0..basis.len() {
        if encloses_not(p, basis[i]) && encloses_weak_all(enclose_basis2(basis[i], p), basis) {
            return vec![basis[i], p];
        }
    }

    for i in 0..basis.len() {
        for j in (i + 1)..basis.len() {
            let bi = basis[i];
            let bj = basis[j];
            if encloses_not(enclose_basis2(bi, bj), p)
                && encloses_not(enclose_basis2(bi, p), bj)
                && encloses_not(enclose_basis2(bj, p), bi)
                && encloses_weak_all(enclose_basis3(bi, bj, p), basis)
            {
                return vec![bi, bj, p];
            }
        }
    }

    unreachable!("enclosing basis extension failed");
}

fn enclose_basis(basis: &[Circle]) -> Circle {
    match basis {
        [a] => *a,
        [a, b] => enclose_basis2(*a, *b),
        [a, b, c] => enclose_basis3(*a, *b, *c),
        _ => unreachable!("basis holds at most three circles"),
    }
}

/// Smallest circle enclosing two circles.
fn enclose_basis2(a: Circle, b: Circle) -> Circle {
    let x21 = b.x - a.x;
    let y21 = b.y - a.y;
    let r21 = b.r - a.r;
    let l = (x21 * x21 + y21 * y21).sqrt();
    if l == 0.0 {
        // Concentric: the larger one wins.
        return if a.r >= b.r { a } else { b };
    }
    Circle::new(
        (a.x + b.x + x21 / l * r21) / 2.0,
        (a.y + b.y + y21 / l * r21) / 2.0,
        (l + a.r + b.r) / 2.0,
    )
}

/// Smallest circle internally tangent to three circles.
fn enclose_basis3(a: Circle, b: Circle, c: Circle) -> Circle {
    let (x1, y1, r1) = (a.x, a.y, a.r);
    let (x2, y2, r2) = (b.x, b.y, b.r);
    let (x3, y3, r3) = (c.x, c.y, c.r);

    let a2 = x1 - x2;
    let a3 = x1 - x3;
    let b2 = y1 - y2;
    let b3 = y1 - y3;
    let c2 = r2 - r1;
    let c3 = r3 - r1;

    let d1 = x1 * x1 + y1 * y1 - r1 * r1;
    let d2 = d1 - x2 * x2 - y2 * y2 + r2 * r2;
    let d3 = d1 - x3 * x3 - y3 * y3 + r3 * r3;

    let ab = a3 * b2 - a2 * b3;
    let xa = (b2 * d3 - b3 * d2) / (ab * 2.0) - x1;
    let xb = (b3 * c2 - b2 * c3) / ab;
    let ya = (a3 * d2 - a2 * d3) / (ab * 2.0) - y1;
    let yb = (a2 * c3 - a3 * c2) / ab;

    let qa = xb * xb + yb * yb - 1.0;
    let qb = 2.0 * (r1 + xa * xb + ya * yb);
    let qc = xa * xa + ya * ya - r1 * r1;
    let r = if qa.abs() > 1e-6 {
        -(qb + (qb * qb - 4.0 * qa * qc).max(0.0).sqrt()) / (2.0 * qa)
    } else {
        -qc / qb
    };

    Circle::new(x1 + xa + xb * r, y1 + ya + yb * r, r)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn rng() -> SmallRng {
        SmallRng::seed_from_u64(11)
    }

    fn contains(e: Circle, c: Circle) -> bool {
        let dx = c.x - e.x;
        let dy = c.y - e.y;
        (dx * dx + dy * dy).sqrt() + c.r <= e.r + 1e-6
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(enclose(&[], &mut rng()), None);
    }

    #[test]
    fn test_single_circle_is_its_own_enclosure() {
        let c = Circle::new(3.0, 4.0, 5.0);
        let e = enclose(&[c], &mut rng()).unwrap();
        assert_eq!(e, c);
    }

    #[test]
    fn test_two_disjoint_circles() {
        let a = Circle::new(0.0, 0.0, 1.0);
        let b = Circle::new(10.0, 0.0, 1.0);
        let e = enclose(&[a, b], &mut rng()).unwrap();

        assert!((e.r - 6.0).abs() < 1e-9);
        assert!((e.x - 5.0).abs() < 1e-9);
        assert!(contains(e, a));
        assert!(contains(e, b));
    }

    #[test]
    fn test_nested_circle_is_absorbed() {
        let big = Circle::new(0.0, 0.0, 10.0);
        let small = Circle::new(1.0, 1.0, 1.0);
        let e = enclose(&[big, small], &mut rng()).unwrap();
        assert!((e.r - 10.0).abs() < 1e-6);
    }

    #[test]
    fn test_three_circles_all_contained() {
        let circles = [
            Circle::new(0.0, 0.0, 2.0),
            Circle::new(6.0, 0.0, 3.0),
            Circle::new(3.0, 5.0, 1.0),
        ];
        let e = enclose(&circles, &mut rng()).unwrap();
        for &c in &circles {
            assert!(contains(e, c), "{c:?} escapes {e:?}");
        }
    }

    #[test]
    fn test_many_circles_all_contained() {
        let circles: Vec<Circle> = (0..40)
            .map(|i| {
                let angle = i as f64 * 0.7;
                Circle::new(
                    angle.cos() * (i as f64),
                    angle.sin() * (i as f64),
                    1.0 + (i % 5) as f64,
                )
            })
            .collect();
        let e = enclose(&circles, &mut rng()).unwrap();
        for &c in &circles {
            assert!(contains(e, c));
        }
    }

    #[test]
    fn test_deterministic_for_fixed_seed() {
        let circles: Vec<Circle> = (0..20)
            .map(|i| Circle::new((i * 3) as f64, ((i * 7) % 11) as f64, 2.0))
            .collect();
        let a = enclose(&circles, &mut rng()).unwrap();
        let b = enclose(&circles, &mut rng()).unwrap();
        assert_eq!(a, b);
    }
}
