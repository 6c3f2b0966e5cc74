use num_traits::Float;

/// Iteration ceiling for [`bisect`]; 200 halvings exhaust any `f64` bracket.
const MAX_BISECTION_STEPS: usize = 200;

/// Return `(min, max)` for two owned values.
pub fn sorted_pair<T: PartialOrd>(a: T, b: T) -> (T, T) {
    if a <= b { (a, b) } else { (b, a) }
}

/// Compute a small epsilon relative to the provided step.
/// Returns step / 10, used as the tolerance when merging coincident ticks.
pub fn epsilon_from_step<T: Float>(step: T) -> T {
    let two = T::one() + T::one();
    let ten = two * (two + two + T::one());
    step / ten
}

/// `|a - b| <= tolerance * max(1, |b|)`.
pub fn approx_eq_relative<T: Float>(a: T, b: T, tolerance: T) -> bool {
    (a - b).abs() <= tolerance * b.abs().max(T::one())
}

/// Solve `f(x) = target` for a monotonic `f` on `[lower, upper]` by bisection.
///
/// Works for increasing and decreasing functions. Targets outside the
/// bracket resolve to the nearer bracket end.
pub fn bisect<T, F>(f: F, target: T, lower: T, upper: T, tolerance: T) -> T
where
    T: Float,
    F: Fn(T) -> T,
{
    let (mut lo, mut hi) = sorted_pair(lower, upper);
    let f_lo = f(lo);
    let f_hi = f(hi);
    let increasing = f_hi >= f_lo;

    let (f_min, f_max) = sorted_pair(f_lo, f_hi);
    if target <= f_min {
        return if increasing { lo } else { hi };
    }
    if target >= f_max {
        return if increasing { hi } else { lo };
    }

    let two = T::one() + T::one();
    for _ in 0..MAX_BISECTION_STEPS {
        let mid = lo + (hi - lo) / two;
        if (hi - lo) <= tolerance * mid.abs().max(T::one()) {
            return mid;
        }
        let below = f(mid) < target;
        if below == increasing {
            lo = mid;
        } else {
            hi = mid;
        }
    }
    lo + (hi - lo) / two
}
