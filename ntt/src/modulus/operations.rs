use crate::error::Error;

/// Returns a * b mod q.
#[inline(always)]
pub fn mul(a: u64, b: u64, q: u64) -> u64 {
    ((a as u128 * b as u128) % q as u128) as u64
}

/// Returns x^exponent mod q.
pub fn pow(x: u64, exponent: u64, q: u64) -> u64 {
    if q == 1 {
        return 0;
    }
    let mut y: u64 = 1;
    let mut x: u64 = x % q;
    let mut i: u64 = exponent;
    while i > 0 {
        if i & 1 == 1 {
            y = mul(y, x, q);
        }
        x = mul(x, x, q);
        i >>= 1;
    }
    y
}

/// Returns x^-1 mod q using the extended Euclidean algorithm.
pub fn inv(x: u64, q: u64) -> Result<u64, Error> {
    if q < 2 {
        return Err(Error::NotInvertible { a: x, q });
    }

    let (mut r0, mut r1): (i128, i128) = (q as i128, (x % q) as i128);
    let (mut t0, mut t1): (i128, i128) = (0, 1);

    while r1 != 0 {
        let quotient: i128 = r0 / r1;
        (r0, r1) = (r1, r0 - quotient * r1);
        (t0, t1) = (t1, t0 - quotient * t1);
    }

    if r0 != 1 {
        return Err(Error::NotInvertible { a: x, q });
    }

    Ok(t0.rem_euclid(q as i128) as u64)
}

/// Returns true if x is a quadratic residue mod the odd prime q (Euler's criterion).
pub fn is_quadratic_residue(x: u64, q: u64) -> bool {
    let x: u64 = x % q;
    x == 0 || pow(x, (q - 1) >> 1, q) == 1
}

/// Returns r such that r^2 = x mod q, for q an odd prime (Tonelli-Shanks).
pub fn sqrt(x: u64, q: u64) -> Result<u64, Error> {
    debug_assert!(q > 2 && q & 1 == 1, "invalid q: {} must be an odd prime", q);

    let x: u64 = x % q;

    if x == 0 {
        return Ok(0);
    }

    if !is_quadratic_residue(x, q) {
        return Err(Error::NonResidue { x, q });
    }

    if q & 3 == 3 {
        return Ok(pow(x, (q + 1) >> 2, q));
    }

    // q - 1 = odd * 2^s
    let s: u32 = (q - 1).trailing_zeros();
    let odd: u64 = (q - 1) >> s;

    let mut z: u64 = 2;
    while is_quadratic_residue(z, q) {
        z += 1;
    }

    let mut m: u32 = s;
    let mut c: u64 = pow(z, odd, q);
    let mut t: u64 = pow(x, odd, q);
    let mut r: u64 = pow(x, (odd + 1) >> 1, q);

    while t != 1 {
        // least i in (0, m) such that t^(2^i) = 1
        let mut i: u32 = 0;
        let mut t2i: u64 = t;
        while t2i != 1 {
            t2i = mul(t2i, t2i, q);
            i += 1;
        }

        let b: u64 = pow(c, 1 << (m - i - 1), q);
        m = i;
        c = mul(b, b, q);
        t = mul(t, c, q);
        r = mul(r, b, q);
    }

    Ok(r)
}
