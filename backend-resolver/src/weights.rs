use ingress_backend_resolver_core::backend::MAX_WEIGHT;

pub(crate) fn gcd(mut a: u64, mut b: u64) -> u64 {
    while b != 0 {
        (a, b) = (b, a % b);
    }
    a
}

/// Returns `None` when the multiple does not fit in a `u64`.
pub(crate) fn lcm(a: u64, b: u64) -> Option<u64> {
    if a == 0 || b == 0 {
        return Some(0);
    }
    (a / gcd(a, b)).checked_mul(b)
}

/// Converts a group weight into a per-endpoint weight the load balancer accepts.
///
/// `gcd` and `max` are the greatest common divisor and the largest of all non-zero group weights.
/// Reducing by `gcd` keeps the ratios between groups exact; when the largest reduced weight still
/// exceeds `MAX_WEIGHT`, every weight is scaled down by the same factor and floored, and a non-zero
/// weight never drops to zero.
pub(crate) fn fit(group_weight: u64, gcd: u64, max: u64) -> u32 {
    let weight = group_weight / gcd;
    let factor = max as f32 / gcd as f32 / MAX_WEIGHT as f32;
    if factor > 1.0 {
        let scaled = (weight as f32 / factor) as u32;
        if scaled == 0 && weight > 0 {
            1
        } else {
            scaled.min(MAX_WEIGHT)
        }
    } else {
        weight.min(MAX_WEIGHT as u64) as u32
    }
}
