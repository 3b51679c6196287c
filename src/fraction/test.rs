#[cfg(test)]
mod tests {
    use crate::{Fraction, Problem};
    use num::Integer;
    use rand::Rng;
    use std::io;
    use std::sync::{Arc, Mutex};
    use tracing_subscriber::util::SubscriberInitExt;

    const ROUNDS: usize = 2000;

    // Exact rational equality of n1/d1 and n2/d2
    fn same_value(n1: i64, d1: i64, n2: i64, d2: i64) -> bool {
        i128::from(n1) * i128::from(d2) == i128::from(n2) * i128::from(d1)
    }

    fn pick(rng: &mut impl Rng) -> (i64, i64) {
        let n = rng.gen_range(-10_000..=10_000);
        let mut d = 0;
        while d == 0 {
            d = rng.gen_range(-10_000..=10_000);
        }
        (n, d)
    }

    fn canonical(f: Fraction) -> bool {
        f.denominator() > 0 && Integer::gcd(&f.numerator(), &f.denominator()) == 1
    }

    #[test]
    fn construction_is_canonical() {
        let mut rng = rand::thread_rng();
        for _ in 0..ROUNDS {
            let (n, d) = pick(&mut rng);
            let f = Fraction::new(n, d).unwrap();
            assert!(canonical(f), "{n}/{d} became {f:?}");
            assert!(same_value(f.numerator(), f.denominator(), n, d));
        }
    }

    #[test]
    fn reduce_is_idempotent() {
        let mut rng = rand::thread_rng();
        for _ in 0..ROUNDS {
            let (n, d) = pick(&mut rng);
            let mut f = Fraction::new(n, d).unwrap();
            let before = f;
            assert!(f.reduce());
            assert_eq!(f, before);
        }
    }

    #[test]
    fn arithmetic_is_canonical() {
        let mut rng = rand::thread_rng();
        for _ in 0..ROUNDS {
            let (a, b) = pick(&mut rng);
            let (c, d) = pick(&mut rng);
            let x = Fraction::new(a, b).unwrap();
            let y = Fraction::new(c, d).unwrap();
            assert!(canonical(x + y));
            assert!(canonical(x - y));
            assert!(canonical(x * y));
            if let Ok(q) = x.try_div(y) {
                assert!(canonical(q));
            }
        }
    }

    #[test]
    fn addition_matches_cross_multiplication() {
        let mut rng = rand::thread_rng();
        for _ in 0..ROUNDS {
            let (a, b) = pick(&mut rng);
            let (c, d) = pick(&mut rng);
            let sum = Fraction::new(a, b).unwrap() + Fraction::new(c, d).unwrap();
            let expected = Fraction::new(a * d + c * b, b * d).unwrap();
            assert_eq!(sum, expected);
            let difference = Fraction::new(a, b).unwrap() - Fraction::new(c, d).unwrap();
            let expected = Fraction::new(a * d - c * b, b * d).unwrap();
            assert_eq!(difference, expected);
        }
    }

    #[test]
    fn multiplication_and_division_are_exact() {
        let mut rng = rand::thread_rng();
        for _ in 0..ROUNDS {
            let (a, b) = pick(&mut rng);
            let (c, d) = pick(&mut rng);
            let x = Fraction::new(a, b).unwrap();
            let y = Fraction::new(c, d).unwrap();
            assert_eq!(x * y, Fraction::new(a * c, b * d).unwrap());
            if c == 0 {
                assert_eq!(x.try_div(y), Err(Problem::DivisionByZero));
            } else {
                assert_eq!(x.try_div(y), Fraction::new(a * d, b * c));
                assert_eq!((x / y) * y, x);
            }
        }
    }

    #[test]
    fn equality_is_exact() {
        let mut rng = rand::thread_rng();
        for _ in 0..ROUNDS {
            let (a, b) = pick(&mut rng);
            let k = rng.gen_range(1..=50) * if rng.gen::<bool>() { 1 } else { -1 };
            let x = Fraction::new(a, b).unwrap();
            let y = Fraction::new(a * k, b * k).unwrap();
            let z = Fraction::new(-a * k, -b * k).unwrap();
            assert_eq!(x, x);
            assert_eq!(x, y);
            assert_eq!(y, x);
            assert_eq!(y, z);
            assert_eq!(x, z);
            let (c, d) = pick(&mut rng);
            let w = Fraction::new(c, d).unwrap();
            assert_eq!(x == w, same_value(a, b, c, d));
        }
    }

    #[test]
    fn ordering_agrees_for_small_values() {
        let mut rng = rand::thread_rng();
        for _ in 0..ROUNDS {
            let (a, b) = pick(&mut rng);
            let (c, d) = pick(&mut rng);
            let x = Fraction::new(a, b).unwrap();
            let y = Fraction::new(c, d).unwrap();
            let exact = (i128::from(x.numerator()) * i128::from(y.denominator()))
                .cmp(&(i128::from(y.numerator()) * i128::from(x.denominator())));
            assert_eq!(x.partial_cmp(&y), Some(exact));
            assert_eq!(x >= y, x == y || x > y);
            assert_eq!(x <= y, x == y || x < y);
        }
    }

    #[test]
    fn failures_leave_receiver_unchanged() {
        let mut rng = rand::thread_rng();
        for _ in 0..ROUNDS {
            let (n, d) = pick(&mut rng);
            let mut f = Fraction::new(n, d).unwrap();
            let before = f;
            if f.is_zero() {
                assert_eq!(f.invert(), Err(Problem::DivisionByZero));
                assert_eq!(f, before);
            } else {
                let inverse = f.invert().unwrap();
                assert_eq!(f, inverse);
                assert_eq!(f * before, Fraction::one());
            }
        }
    }

    // Collects formatted events so a test can look for them
    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl io::Write for Captured {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn rejections_are_traced() {
        let captured = Captured::default();
        let writer = captured.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::TRACE)
            .with_ansi(false)
            .with_writer(move || writer.clone())
            .finish();
        let guard = subscriber.set_default();

        assert_eq!(Fraction::new(3, 0), Err(Problem::DivisionByZero));
        assert_eq!(
            Fraction::one().try_div(Fraction::zero()),
            Err(Problem::DivisionByZero)
        );
        assert_eq!(Fraction::try_from(1e100_f64), Err(Problem::OutOfRange));
        drop(guard);

        let output = String::from_utf8(captured.0.lock().unwrap().clone()).unwrap();
        assert!(output.contains("rejected zero denominator"), "{output}");
        assert!(output.contains("rejected division by zero"), "{output}");
        assert!(output.contains("float too large for a fraction"), "{output}");
    }
}
